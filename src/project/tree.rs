//! The project: global objects and variables plus every document.

use super::extension::EventsFunctionsExtension;
use super::layout::{ExternalEvents, ExternalLayout, Layout};
use super::object::{Object, ObjectsContainer};
use super::variables::VariablesContainer;

/// Documents keep insertion order, and names are unique per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub name: String,
    pub objects: ObjectsContainer,
    pub variables: VariablesContainer,
    pub layouts: Vec<Layout>,
    pub external_layouts: Vec<ExternalLayout>,
    pub external_events: Vec<ExternalEvents>,
    pub extensions: Vec<EventsFunctionsExtension>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // GLOBAL OBJECTS
    // ========================================================================

    pub fn insert_new_object(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> &mut Object {
        self.objects.insert_new_object(name, type_name)
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get_object(name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.get_object_mut(name)
    }

    // ========================================================================
    // DOCUMENTS
    // ========================================================================

    pub fn insert_new_layout(&mut self, name: impl Into<String>) -> &mut Layout {
        push_last(&mut self.layouts, Layout::new(name))
    }

    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }

    pub fn layout_mut(&mut self, name: &str) -> Option<&mut Layout> {
        self.layouts.iter_mut().find(|l| l.name == name)
    }

    pub fn has_layout(&self, name: &str) -> bool {
        self.layout(name).is_some()
    }

    pub fn insert_new_external_layout(&mut self, name: impl Into<String>) -> &mut ExternalLayout {
        push_last(&mut self.external_layouts, ExternalLayout::new(name))
    }

    pub fn external_layout(&self, name: &str) -> Option<&ExternalLayout> {
        self.external_layouts.iter().find(|l| l.name == name)
    }

    pub fn external_layout_mut(&mut self, name: &str) -> Option<&mut ExternalLayout> {
        self.external_layouts.iter_mut().find(|l| l.name == name)
    }

    pub fn insert_new_external_events(&mut self, name: impl Into<String>) -> &mut ExternalEvents {
        push_last(&mut self.external_events, ExternalEvents::new(name))
    }

    pub fn external_events(&self, name: &str) -> Option<&ExternalEvents> {
        self.external_events.iter().find(|e| e.name == name)
    }

    pub fn external_events_mut(&mut self, name: &str) -> Option<&mut ExternalEvents> {
        self.external_events.iter_mut().find(|e| e.name == name)
    }

    // ========================================================================
    // EXTENSIONS
    // ========================================================================

    pub fn insert_new_extension(
        &mut self,
        name: impl Into<String>,
    ) -> &mut EventsFunctionsExtension {
        push_last(&mut self.extensions, EventsFunctionsExtension::new(name))
    }

    pub fn extension(&self, name: &str) -> Option<&EventsFunctionsExtension> {
        self.extensions.iter().find(|e| e.name == name)
    }

    pub fn extension_mut(&mut self, name: &str) -> Option<&mut EventsFunctionsExtension> {
        self.extensions.iter_mut().find(|e| e.name == name)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extension(name).is_some()
    }

    /// Every object of the project: global objects first, then each layout's.
    pub fn all_objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.objects_mut().chain(
            self.layouts
                .iter_mut()
                .flat_map(|layout| layout.objects.objects_mut()),
        )
    }
}

fn push_last<T>(items: &mut Vec<T>, item: T) -> &mut T {
    items.push(item);
    let last = items.len() - 1;
    &mut items[last]
}
