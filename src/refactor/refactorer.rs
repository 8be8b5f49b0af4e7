//! Whole-project refactoring operations.
//!
//! Every operation updates the *references* to an entity after (or before)
//! its declaration changed: object groups, initial instances, instruction
//! types, instruction parameters and expressions. A reference that cannot be
//! found anywhere is not an error; the operation is then a no-op.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::documents::{
    DocumentFilter, LayoutFilter, for_each_events_document, visit_events_function,
};
use super::instruction_type::TypeRename;
use super::required_behaviors::{
    RequiredBehaviorProblem, add_behavior_and_required_behaviors,
    find_invalid_required_behavior_properties,
};
use super::rules::{CallMatcher, EventsRewriter, ExpressionRule, ParameterMove};
use crate::base::QualifiedName;
use crate::base::constants::BEHAVIOR_PROPERTY_TYPE;
use crate::error::{RefactorError, Result};
use crate::expression::Transform;
use crate::metadata::{MetadataRegistry, ProjectMetadata};
use crate::project::{
    EventsFunction, Object, ParameterKind, Project, PropertiesContainer,
};

/// Container index of layout objects in a layout's scope (globals are 0).
const LAYOUT_CONTAINER: usize = 1;
/// Container index of global objects, and of an events-function's parameter
/// objects in its own scope.
const FIRST_CONTAINER: usize = 0;

/// Propagates renames, removals and parameter moves through a project.
///
/// The registry describes the built-in functions and behaviors. Each
/// operation layers the project's current extensions over it, so
/// declarations renamed or moved by earlier operations are seen.
#[derive(Clone, Copy)]
pub struct WholeProjectRefactorer<'r> {
    pub(super) registry: &'r dyn MetadataRegistry,
}

impl<'r> WholeProjectRefactorer<'r> {
    pub fn new(registry: &'r dyn MetadataRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r dyn MetadataRegistry {
        self.registry
    }

    /// The registry over the project's declarations as they are now.
    fn live_registry(&self, project: &Project) -> ProjectMetadata<'r> {
        ProjectMetadata::new(self.registry, project)
    }

    // ========================================================================
    // OBJECTS AND GROUPS
    // ========================================================================

    /// An object or group was removed from `layout`.
    ///
    /// Objects are removed from the layout's groups, from its initial
    /// instances and from the instances of the external layouts associated
    /// with it. Groups have no other references to update.
    pub fn object_or_group_removed_in_layout(
        &self,
        project: &mut Project,
        layout: &str,
        name: &str,
        is_object_group: bool,
    ) -> Result<()> {
        debug!(
            "[REFACTOR] object_or_group_removed_in_layout: layout='{}' name='{}'",
            layout, name
        );
        let Project {
            layouts,
            external_layouts,
            ..
        } = project;
        let target = layouts
            .iter_mut()
            .find(|l| l.name == layout)
            .ok_or_else(|| RefactorError::not_found("layout", layout))?;
        if is_object_group {
            return Ok(());
        }

        for group in target.objects.groups.iter_mut() {
            group.remove_object(name);
        }
        target.instances.remove_instances_of(name);
        for external in external_layouts
            .iter_mut()
            .filter(|e| e.is_associated_with(layout))
        {
            external.instances.remove_instances_of(name);
        }
        Ok(())
    }

    /// An object or group of `layout` was renamed.
    ///
    /// Besides groups and instances, every reference in the events of the
    /// layout and of its associated external events is renamed.
    pub fn object_or_group_renamed_in_layout(
        &self,
        project: &mut Project,
        layout: &str,
        old_name: &str,
        new_name: &str,
        is_object_group: bool,
    ) -> Result<()> {
        debug!(
            "[REFACTOR] object_or_group_renamed_in_layout: layout='{}' '{}' -> '{}'",
            layout, old_name, new_name
        );
        let registry = self.live_registry(project);
        let Project {
            layouts,
            external_layouts,
            ..
        } = &mut *project;
        let target = layouts
            .iter_mut()
            .find(|l| l.name == layout)
            .ok_or_else(|| RefactorError::not_found("layout", layout))?;
        if !is_object_group {
            for group in target.objects.groups.iter_mut() {
                group.rename_object(old_name, new_name);
            }
            target.instances.rename_instances_of(old_name, new_name);
            for external in external_layouts
                .iter_mut()
                .filter(|e| e.is_associated_with(layout))
            {
                external.instances.rename_instances_of(old_name, new_name);
            }
        }

        let rewriter = object_rewriter(&registry, old_name, new_name, LAYOUT_CONTAINER);
        let filter = DocumentFilter {
            layouts: LayoutFilter::Only(layout),
            events_functions: false,
        };
        for_each_events_document(project, filter, &mut |events, scope| {
            rewriter.rewrite_events(events, scope);
        });
        Ok(())
    }

    /// A global object or group was removed.
    ///
    /// Layouts declaring their own object or group with that name are left
    /// untouched, together with their associated external layouts.
    pub fn global_object_or_group_removed(
        &self,
        project: &mut Project,
        name: &str,
        is_object_group: bool,
    ) {
        debug!("[REFACTOR] global_object_or_group_removed: name='{}'", name);
        if is_object_group {
            return;
        }
        let shadowing = shadowing_layouts(project, name);

        for group in project.objects.groups.iter_mut() {
            group.remove_object(name);
        }
        for layout in project
            .layouts
            .iter_mut()
            .filter(|l| !shadowing.contains(&l.name))
        {
            for group in layout.objects.groups.iter_mut() {
                group.remove_object(name);
            }
            layout.instances.remove_instances_of(name);
        }
        for external in project
            .external_layouts
            .iter_mut()
            .filter(|e| !is_shadowed(e.associated_layout.as_deref(), &shadowing))
        {
            external.instances.remove_instances_of(name);
        }
    }

    /// A global object or group was renamed, everywhere it is visible.
    pub fn global_object_or_group_renamed(
        &self,
        project: &mut Project,
        old_name: &str,
        new_name: &str,
        is_object_group: bool,
    ) {
        debug!(
            "[REFACTOR] global_object_or_group_renamed: '{}' -> '{}'",
            old_name, new_name
        );
        let shadowing = shadowing_layouts(project, old_name);
        let registry = self.live_registry(project);

        if !is_object_group {
            for group in project.objects.groups.iter_mut() {
                group.rename_object(old_name, new_name);
            }
            for layout in project
                .layouts
                .iter_mut()
                .filter(|l| !shadowing.contains(&l.name))
            {
                for group in layout.objects.groups.iter_mut() {
                    group.rename_object(old_name, new_name);
                }
                layout.instances.rename_instances_of(old_name, new_name);
            }
            for external in project
                .external_layouts
                .iter_mut()
                .filter(|e| !is_shadowed(e.associated_layout.as_deref(), &shadowing))
            {
                external.instances.rename_instances_of(old_name, new_name);
            }
        }

        let rewriter = object_rewriter(&registry, old_name, new_name, FIRST_CONTAINER);
        let filter = DocumentFilter {
            layouts: LayoutFilter::Except(&shadowing),
            events_functions: false,
        };
        for_each_events_document(project, filter, &mut |events, scope| {
            rewriter.rewrite_events(events, scope);
        });
    }

    /// An object or group declared by the parameters of `function` was removed.
    pub fn object_or_group_removed_in_events_function(
        &self,
        function: &mut EventsFunction,
        name: &str,
        is_object_group: bool,
    ) {
        debug!(
            "[REFACTOR] object_or_group_removed_in_events_function: function='{}' name='{}'",
            function.name, name
        );
        if is_object_group {
            return;
        }
        for group in function.object_groups.iter_mut() {
            group.remove_object(name);
        }
    }

    /// An object or group of `function` was renamed. `properties` are the
    /// properties of the behavior owning the function, if any.
    pub fn object_or_group_renamed_in_events_function(
        &self,
        function: &mut EventsFunction,
        properties: Option<&PropertiesContainer>,
        old_name: &str,
        new_name: &str,
        is_object_group: bool,
    ) {
        debug!(
            "[REFACTOR] object_or_group_renamed_in_events_function: function='{}' '{}' -> '{}'",
            function.name, old_name, new_name
        );
        if !is_object_group {
            for group in function.object_groups.iter_mut() {
                group.rename_object(old_name, new_name);
            }
        }
        let rewriter = object_rewriter(self.registry, old_name, new_name, FIRST_CONTAINER);
        visit_events_function(function, properties, &mut |events, scope| {
            rewriter.rewrite_events(events, scope);
        });
    }

    // ========================================================================
    // EXTENSIONS AND EVENTS-FUNCTIONS
    // ========================================================================

    /// An events-functions extension was renamed: every instruction type and
    /// free function call it owns, plus every behavior type reference.
    ///
    /// Behavior methods called through an object (`Object.Behavior::Method`)
    /// do not spell the extension and are left as is.
    pub fn rename_events_functions_extension(
        &self,
        project: &mut Project,
        old_name: &str,
        new_name: &str,
    ) {
        debug!(
            "[REFACTOR] rename_events_functions_extension: '{}' -> '{}'",
            old_name, new_name
        );
        let rename = TypeRename::Extension {
            old: old_name.to_string(),
            new: new_name.to_string(),
        };
        let registry = self.live_registry(project);
        let rewriter = EventsRewriter::new(&registry)
            .with_type_rename(rename.clone())
            .with_rule(ExpressionRule::new(
                CallMatcher::ExtensionQualifier {
                    extension: old_name.to_string(),
                },
                Transform::RenameQualifier(new_name.to_string()),
            ));
        self.rewrite_all_events(project, &rewriter);
        rename_behavior_type_references(project, &rename);
    }

    /// A free events-function of `extension` was renamed.
    pub fn rename_events_function(
        &self,
        project: &mut Project,
        extension: &str,
        old_name: &str,
        new_name: &str,
    ) {
        debug!(
            "[REFACTOR] rename_events_function: '{}::{}' -> '{}'",
            extension, old_name, new_name
        );
        let registry = self.live_registry(project);
        let rewriter = EventsRewriter::new(&registry)
            .with_type_rename(TypeRename::FreeFunction {
                extension: extension.to_string(),
                old: old_name.to_string(),
                new: new_name.to_string(),
            })
            .with_rule(ExpressionRule::new(
                CallMatcher::FreeFunction {
                    extension: extension.to_string(),
                    name: old_name.to_string(),
                },
                Transform::RenameName(new_name.to_string()),
            ));
        self.rewrite_all_events(project, &rewriter);
    }

    /// Parameter `from` of a free events-function moved to `to`, in every
    /// instruction and every call.
    pub fn move_events_function_parameter(
        &self,
        project: &mut Project,
        extension: &str,
        function: &str,
        from: usize,
        to: usize,
    ) -> Result<()> {
        debug!(
            "[REFACTOR] move_events_function_parameter: '{}::{}' {} -> {}",
            extension, function, from, to
        );
        let qualified = QualifiedName::new([extension, function]);
        let registry = self.live_registry(project);
        check_parameter_move(&registry, &qualified, from, to)?;

        let rewriter = EventsRewriter::new(&registry)
            .with_parameter_move(ParameterMove {
                instruction_type: qualified.to_string(),
                from,
                to,
            })
            .with_rule(ExpressionRule::new(
                CallMatcher::FreeFunction {
                    extension: extension.to_string(),
                    name: function.to_string(),
                },
                Transform::MoveArgument { from, to },
            ));
        self.rewrite_all_events(project, &rewriter);
        Ok(())
    }

    // ========================================================================
    // EVENTS-BASED BEHAVIORS
    // ========================================================================

    /// An events-based behavior was renamed.
    ///
    /// Attached behaviors change type but keep their instance name. Method
    /// calls through an object name the instance, not the type, so
    /// expressions are left as is.
    pub fn rename_events_based_behavior(
        &self,
        project: &mut Project,
        extension: &str,
        old_name: &str,
        new_name: &str,
    ) {
        debug!(
            "[REFACTOR] rename_events_based_behavior: '{}::{}' -> '{}'",
            extension, old_name, new_name
        );
        let rename = TypeRename::Behavior {
            extension: extension.to_string(),
            old: old_name.to_string(),
            new: new_name.to_string(),
        };
        let registry = self.live_registry(project);
        let rewriter = EventsRewriter::new(&registry).with_type_rename(rename.clone());
        self.rewrite_all_events(project, &rewriter);
        rename_behavior_type_references(project, &rename);
    }

    /// A function of an events-based behavior was renamed, in instruction
    /// types and in method calls and references through objects.
    pub fn rename_behavior_events_function(
        &self,
        project: &mut Project,
        extension: &str,
        behavior: &str,
        old_name: &str,
        new_name: &str,
    ) {
        debug!(
            "[REFACTOR] rename_behavior_events_function: '{}::{}::{}' -> '{}'",
            extension, behavior, old_name, new_name
        );
        let registry = self.live_registry(project);
        let rewriter = EventsRewriter::new(&registry)
            .with_type_rename(TypeRename::BehaviorFunction {
                extension: extension.to_string(),
                behavior: behavior.to_string(),
                old: old_name.to_string(),
                new: new_name.to_string(),
            })
            .with_rule(ExpressionRule::new(
                CallMatcher::BehaviorMethod {
                    behavior_type: QualifiedName::new([extension, behavior]).to_string(),
                    method: old_name.to_string(),
                },
                Transform::RenameName(new_name.to_string()),
            ));
        self.rewrite_all_events(project, &rewriter);
    }

    /// Parameter `from` of a behavior function moved to `to`.
    pub fn move_behavior_events_function_parameter(
        &self,
        project: &mut Project,
        extension: &str,
        behavior: &str,
        function: &str,
        from: usize,
        to: usize,
    ) -> Result<()> {
        debug!(
            "[REFACTOR] move_behavior_events_function_parameter: '{}::{}::{}' {} -> {}",
            extension, behavior, function, from, to
        );
        let qualified = QualifiedName::new([extension, behavior, function]);
        let registry = self.live_registry(project);
        check_parameter_move(&registry, &qualified, from, to)?;

        let rewriter = EventsRewriter::new(&registry)
            .with_parameter_move(ParameterMove {
                instruction_type: qualified.to_string(),
                from,
                to,
            })
            .with_rule(ExpressionRule::new(
                CallMatcher::BehaviorMethod {
                    behavior_type: QualifiedName::new([extension, behavior]).to_string(),
                    method: function.to_string(),
                },
                Transform::MoveArgument { from, to },
            ));
        self.rewrite_all_events(project, &rewriter);
        Ok(())
    }

    /// A property of an events-based behavior was renamed: its accessor
    /// instructions, its accessor calls through objects, and bare uses
    /// inside the behavior's own functions.
    pub fn rename_behavior_property(
        &self,
        project: &mut Project,
        extension: &str,
        behavior: &str,
        old_name: &str,
        new_name: &str,
    ) {
        debug!(
            "[REFACTOR] rename_behavior_property: '{}::{}' '{}' -> '{}'",
            extension, behavior, old_name, new_name
        );
        let registry = self.live_registry(project);
        let rewriter = EventsRewriter::new(&registry)
            .with_type_rename(TypeRename::BehaviorProperty {
                extension: extension.to_string(),
                behavior: behavior.to_string(),
                old: old_name.to_string(),
                new: new_name.to_string(),
            })
            .with_rule(ExpressionRule::new(
                CallMatcher::BehaviorProperty {
                    behavior_type: QualifiedName::new([extension, behavior]).to_string(),
                    property: old_name.to_string(),
                },
                Transform::RenameProperty(new_name.to_string()),
            ));
        self.rewrite_all_events(project, &rewriter);

        let bare = EventsRewriter::new(&registry).with_rule(ExpressionRule::new(
            CallMatcher::BareProperty {
                name: old_name.to_string(),
            },
            Transform::RenameName(new_name.to_string()),
        ));
        let Some(owner) = project
            .extension_mut(extension)
            .and_then(|e| e.behavior_mut(behavior))
        else {
            return;
        };
        let properties = &owner.properties;
        for function in owner.functions.iter_mut() {
            visit_events_function(function, Some(properties), &mut |events, scope| {
                bare.rewrite_events(events, scope);
            });
        }
    }

    // ========================================================================
    // REQUIRED BEHAVIORS
    // ========================================================================

    /// Required-behavior properties of every object that do not name an
    /// attached behavior of the expected type.
    pub fn find_invalid_required_behavior_properties<'p>(
        &self,
        project: &'p Project,
    ) -> Vec<RequiredBehaviorProblem<'p>> {
        find_invalid_required_behavior_properties(&self.live_registry(project), project)
    }

    /// Attach a behavior and, transitively, the behaviors it requires.
    pub fn add_behavior_and_required_behaviors(
        &self,
        object: &mut Object,
        behavior_type: &str,
        name: &str,
    ) -> Result<()> {
        debug!(
            "[REFACTOR] add_behavior_and_required_behaviors: object='{}' type='{}' name='{}'",
            object.name, behavior_type, name
        );
        add_behavior_and_required_behaviors(self.registry, object, behavior_type, name)
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn rewrite_all_events(&self, project: &mut Project, rewriter: &EventsRewriter<'_>) {
        for_each_events_document(project, DocumentFilter::everything(), &mut |events, scope| {
            rewriter.rewrite_events(events, scope);
        });
    }
}

fn object_rewriter<'a>(
    registry: &'a dyn MetadataRegistry,
    old_name: &str,
    new_name: &str,
    container: usize,
) -> EventsRewriter<'a> {
    EventsRewriter::new(registry).with_rule(ExpressionRule::new(
        CallMatcher::ObjectOrGroup {
            name: old_name.to_string(),
            container,
        },
        Transform::RenameObject(new_name.to_string()),
    ))
}

/// Fails unless both indices are within the function's declared parameters.
fn check_parameter_move(
    registry: &dyn MetadataRegistry,
    function: &QualifiedName,
    from: usize,
    to: usize,
) -> Result<()> {
    let count = registry
        .declared_parameter_count(function)
        .ok_or_else(|| RefactorError::not_found("events function", function.to_string()))?;
    for index in [from, to] {
        if index >= count {
            return Err(RefactorError::InvalidParameterIndex {
                function: function.to_string(),
                index,
                count,
            });
        }
    }
    Ok(())
}

/// Layouts declaring their own object or group called `name`.
fn shadowing_layouts(project: &Project, name: &str) -> FxHashSet<String> {
    project
        .layouts
        .iter()
        .filter(|l| l.objects.has_object_or_group_named(name))
        .map(|l| l.name.clone())
        .collect()
}

fn is_shadowed(associated_layout: Option<&str>, shadowing: &FxHashSet<String>) -> bool {
    associated_layout.is_some_and(|layout| shadowing.contains(layout))
}

/// Update behavior types on attached behaviors, in required-behavior
/// properties and in behavior parameters of events-functions.
fn rename_behavior_type_references(project: &mut Project, rename: &TypeRename) {
    for object in project.all_objects_mut() {
        for behavior in object.behaviors_mut() {
            if let Some(renamed) = rename.apply_to_type_reference(&behavior.type_name) {
                behavior.type_name = renamed;
            }
        }
    }

    let renames_extension = matches!(rename, TypeRename::Extension { .. });
    for extension in project.extensions.iter_mut() {
        for behavior in extension.behaviors.iter_mut() {
            for property in behavior.properties.iter_mut() {
                if property.type_name != BEHAVIOR_PROPERTY_TYPE {
                    continue;
                }
                for info in property.extra_info.iter_mut() {
                    if let Some(renamed) = rename.apply_to_type_reference(info) {
                        *info = renamed;
                    }
                }
            }
        }

        let behavior_functions = extension
            .behaviors
            .iter_mut()
            .flat_map(|b| b.functions.iter_mut());
        for function in extension.functions.iter_mut().chain(behavior_functions) {
            for parameter in function.parameters.iter_mut() {
                let applies = match parameter.kind {
                    ParameterKind::Behavior => true,
                    ParameterKind::Object => renames_extension,
                    _ => false,
                };
                if !applies {
                    continue;
                }
                if let Some(renamed) = rename.apply_to_type_reference(&parameter.extra_info) {
                    parameter.extra_info = renamed;
                }
            }
        }
    }
}
