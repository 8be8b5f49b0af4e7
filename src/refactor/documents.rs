//! Traversal of every events document of a project with its scope.
//!
//! Each document is handed to the visitor together with the
//! [`ScopedContainers`] describing what its events can see. The scope borrows
//! sibling fields of the project immutably while the events are borrowed
//! mutably, so nothing is cloned except the objects built from an
//! events-function's parameters.

use rustc_hash::FxHashSet;

use crate::project::{
    EventsBasedBehavior, EventsFunction, EventsList, Layout, ObjectsContainer, Project,
    PropertiesContainer,
};
use crate::scope::ScopedContainers;

/// Which layouts, and external events associated with them, are visited.
#[derive(Clone, Copy, Debug)]
pub(crate) enum LayoutFilter<'f> {
    All,
    /// One layout and the external events associated with it.
    Only(&'f str),
    /// Every layout except these. Unassociated external events are visited.
    Except(&'f FxHashSet<String>),
}

impl LayoutFilter<'_> {
    fn includes_layout(self, layout: &str) -> bool {
        match self {
            LayoutFilter::All => true,
            LayoutFilter::Only(name) => name == layout,
            LayoutFilter::Except(skipped) => !skipped.contains(layout),
        }
    }

    fn includes_external_events(self, associated_layout: Option<&str>) -> bool {
        match (self, associated_layout) {
            (LayoutFilter::All, _) => true,
            (LayoutFilter::Only(name), Some(layout)) => name == layout,
            (LayoutFilter::Except(skipped), Some(layout)) => !skipped.contains(layout),
            (LayoutFilter::Except(_), None) => true,
            (LayoutFilter::Only(_), None) => false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DocumentFilter<'f> {
    pub layouts: LayoutFilter<'f>,
    /// Also visit the events of every events-function of every extension.
    pub events_functions: bool,
}

impl DocumentFilter<'_> {
    pub fn everything() -> Self {
        Self {
            layouts: LayoutFilter::All,
            events_functions: true,
        }
    }
}

pub(crate) type DocumentVisitor<'v> = dyn FnMut(&mut EventsList, &ScopedContainers<'_>) + 'v;

/// Visit layouts, then external events, then events-functions.
pub(crate) fn for_each_events_document(
    project: &mut Project,
    filter: DocumentFilter<'_>,
    visit: &mut DocumentVisitor<'_>,
) {
    let Project {
        objects,
        variables,
        layouts,
        external_events,
        extensions,
        ..
    } = project;

    for layout in layouts.iter_mut() {
        if !filter.layouts.includes_layout(&layout.name) {
            continue;
        }
        let Layout {
            objects: layout_objects,
            variables: layout_variables,
            events,
            ..
        } = layout;
        let scope =
            ScopedContainers::for_scene(objects, variables, layout_objects, layout_variables);
        visit(events, &scope);
    }

    for external in external_events.iter_mut() {
        let associated = external.associated_layout.as_deref();
        if !filter.layouts.includes_external_events(associated) {
            continue;
        }
        let layout = associated.and_then(|name| layouts.iter().find(|l| l.name == name));
        let scope = match layout {
            Some(layout) => {
                ScopedContainers::for_scene(objects, variables, &layout.objects, &layout.variables)
            }
            None => {
                let mut scope = ScopedContainers::new();
                scope
                    .add_objects_container(objects)
                    .add_variables_container(variables);
                scope
            }
        };
        visit(&mut external.events, &scope);
    }

    if !filter.events_functions {
        return;
    }
    for extension in extensions.iter_mut() {
        for function in extension.functions.iter_mut() {
            visit_events_function(function, None, visit);
        }
        for behavior in extension.behaviors.iter_mut() {
            let EventsBasedBehavior {
                functions,
                properties,
                ..
            } = behavior;
            for function in functions.iter_mut() {
                visit_events_function(function, Some(&*properties), visit);
            }
        }
    }
}

/// Visit one events-function with the objects built from its parameters and
/// its groups, plus the behavior properties for behavior functions.
pub(crate) fn visit_events_function(
    function: &mut EventsFunction,
    properties: Option<&PropertiesContainer>,
    visit: &mut DocumentVisitor<'_>,
) {
    let mut objects = ObjectsContainer::from_parameters(&function.parameters);
    objects.groups = function.object_groups.clone();
    let scope = ScopedContainers::for_events_function(&objects, properties);
    visit(&mut function.events, &scope);
}
