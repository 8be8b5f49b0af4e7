//! Refactor intents: one call that updates a declaration and its references.
//!
//! Objects and groups are addressed by a [`Scope`] and a simple name. Code
//! entities (events-functions, events-based behaviors, behavior properties)
//! are addressed by their qualified old name and take a simple new name.
//!
//! References are rewritten first and the declaration is updated last, so
//! every document still resolves the old name to the entity being renamed.

use tracing::debug;

use super::refactorer::WholeProjectRefactorer;
use crate::base::QualifiedName;
use crate::error::{RefactorError, Result};
use crate::project::{
    EventsBasedBehavior, EventsFunction, EventsFunctionsExtension, ObjectsContainer, Project,
    PropertiesContainer,
};

/// Where an object or group is declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    Global,
    Layout(String),
    EventsFunction {
        extension: String,
        function: String,
    },
    BehaviorEventsFunction {
        extension: String,
        behavior: String,
        function: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Object,
    ObjectGroup,
    EventsFunction,
    EventsBasedBehavior,
    BehaviorProperty,
}

impl EntityKind {
    fn is_object_group(self) -> bool {
        self == EntityKind::ObjectGroup
    }

    fn describe(self) -> &'static str {
        match self {
            EntityKind::Object => "object",
            EntityKind::ObjectGroup => "object group",
            EntityKind::EventsFunction => "events function",
            EntityKind::EventsBasedBehavior => "events-based behavior",
            EntityKind::BehaviorProperty => "behavior property",
        }
    }
}

/// A refactoring request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefactorIntent {
    /// Code entities ignore `scope`: their qualified `old_name` locates them.
    RenameEntity {
        scope: Scope,
        old_name: String,
        new_name: String,
        kind: EntityKind,
    },
    /// Removing an events-based behavior also detaches it from every object.
    /// Removing an object declared by an events-function parameter only
    /// removes it from the function's groups: the parameter is kept.
    RemoveEntity {
        scope: Scope,
        name: String,
        kind: EntityKind,
    },
    /// `function` is `Extension::Function` or `Extension::Behavior::Function`.
    MoveParameter {
        function: String,
        from: usize,
        to: usize,
    },
    RenameExtension { old_name: String, new_name: String },
}

impl WholeProjectRefactorer<'_> {
    /// Apply `intent` to the declarations and every reference in `project`.
    pub fn apply(&self, project: &mut Project, intent: &RefactorIntent) -> Result<()> {
        debug!("[REFACTOR] apply: {:?}", intent);
        match intent {
            RefactorIntent::RenameEntity {
                scope,
                old_name,
                new_name,
                kind,
            } => match kind {
                EntityKind::Object | EntityKind::ObjectGroup => {
                    self.rename_object_entity(project, scope, old_name, new_name, *kind)
                }
                EntityKind::EventsFunction => {
                    self.rename_function_entity(project, old_name, new_name)
                }
                EntityKind::EventsBasedBehavior => {
                    self.rename_behavior_entity(project, old_name, new_name)
                }
                EntityKind::BehaviorProperty => {
                    self.rename_property_entity(project, old_name, new_name)
                }
            },
            RefactorIntent::RemoveEntity { scope, name, kind } => match kind {
                EntityKind::Object | EntityKind::ObjectGroup => {
                    self.remove_object_entity(project, scope, name, *kind)
                }
                EntityKind::EventsFunction => remove_function_entity(project, name),
                EntityKind::EventsBasedBehavior => remove_behavior_entity(project, name),
                EntityKind::BehaviorProperty => remove_property_entity(project, name),
            },
            RefactorIntent::MoveParameter { function, from, to } => {
                self.move_parameter_entity(project, function, *from, *to)
            }
            RefactorIntent::RenameExtension { old_name, new_name } => {
                if !project.has_extension(old_name) {
                    return Err(RefactorError::not_found("extension", old_name.as_str()));
                }
                if project.has_extension(new_name) {
                    return Err(RefactorError::name_taken("extension", new_name.as_str()));
                }
                self.rename_events_functions_extension(project, old_name, new_name);
                if let Some(extension) = project.extension_mut(old_name) {
                    extension.name = new_name.clone();
                }
                Ok(())
            }
        }
    }

    // ========================================================================
    // OBJECTS AND GROUPS
    // ========================================================================

    fn rename_object_entity(
        &self,
        project: &mut Project,
        scope: &Scope,
        old_name: &str,
        new_name: &str,
        kind: EntityKind,
    ) -> Result<()> {
        let is_group = kind.is_object_group();
        match scope {
            Scope::Global => {
                check_renamable(&project.objects, old_name, new_name, kind)?;
                self.global_object_or_group_renamed(project, old_name, new_name, is_group);
                rename_declaration(&mut project.objects, old_name, new_name, kind);
            }
            Scope::Layout(layout) => {
                let objects = &project
                    .layout(layout)
                    .ok_or_else(|| RefactorError::not_found("layout", layout.as_str()))?
                    .objects;
                check_renamable(objects, old_name, new_name, kind)?;
                self.object_or_group_renamed_in_layout(
                    project, layout, old_name, new_name, is_group,
                )?;
                if let Some(layout) = project.layout_mut(layout) {
                    rename_declaration(&mut layout.objects, old_name, new_name, kind);
                }
            }
            Scope::EventsFunction { .. } | Scope::BehaviorEventsFunction { .. } => {
                let (function, properties) = scoped_function(project, scope)?;
                check_function_renamable(function, old_name, new_name, kind)?;
                self.object_or_group_renamed_in_events_function(
                    function, properties, old_name, new_name, is_group,
                );
                if is_group {
                    if let Some(group) = function.object_groups.get_mut(old_name) {
                        group.name = new_name.to_string();
                    }
                } else if let Some(parameter) = function
                    .parameters
                    .iter_mut()
                    .find(|p| p.kind.is_object() && p.name == old_name)
                {
                    parameter.name = new_name.to_string();
                }
            }
        }
        Ok(())
    }

    fn remove_object_entity(
        &self,
        project: &mut Project,
        scope: &Scope,
        name: &str,
        kind: EntityKind,
    ) -> Result<()> {
        let is_group = kind.is_object_group();
        match scope {
            Scope::Global => {
                check_declared(&project.objects, name, kind)?;
                self.global_object_or_group_removed(project, name, is_group);
                remove_declaration(&mut project.objects, name, kind);
            }
            Scope::Layout(layout) => {
                let objects = &project
                    .layout(layout)
                    .ok_or_else(|| RefactorError::not_found("layout", layout.as_str()))?
                    .objects;
                check_declared(objects, name, kind)?;
                self.object_or_group_removed_in_layout(project, layout, name, is_group)?;
                if let Some(layout) = project.layout_mut(layout) {
                    remove_declaration(&mut layout.objects, name, kind);
                }
            }
            Scope::EventsFunction { .. } | Scope::BehaviorEventsFunction { .. } => {
                let (function, _) = scoped_function(project, scope)?;
                if !declares_in_function(function, name, kind) {
                    return Err(RefactorError::not_found(kind.describe(), name));
                }
                self.object_or_group_removed_in_events_function(function, name, is_group);
                if is_group {
                    function.object_groups.remove(name);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // CODE ENTITIES
    // ========================================================================

    fn rename_function_entity(
        &self,
        project: &mut Project,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        let qualified = parse_qualified(old_name)?;
        match qualified.segments() {
            [extension, function] => {
                let functions = &project
                    .extension(extension)
                    .ok_or_else(|| RefactorError::not_found("extension", extension.as_str()))?
                    .functions;
                check_function_declared(
                    functions.has(function),
                    functions.has(new_name),
                    old_name,
                    new_name,
                )?;
                self.rename_events_function(project, extension, function, new_name);
            }
            [extension, behavior, function] => {
                let functions = &find_behavior(project, extension, behavior)?.functions;
                check_function_declared(
                    functions.has(function),
                    functions.has(new_name),
                    old_name,
                    new_name,
                )?;
                self.rename_behavior_events_function(
                    project, extension, behavior, function, new_name,
                );
            }
            _ => return Err(RefactorError::invalid_qualified_name(old_name)),
        }
        if let Some(declaration) = function_mut(project, &qualified) {
            declaration.name = new_name.to_string();
        }
        Ok(())
    }

    fn rename_behavior_entity(
        &self,
        project: &mut Project,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        let qualified = parse_qualified(old_name)?;
        let [extension, behavior] = qualified.segments() else {
            return Err(RefactorError::invalid_qualified_name(old_name));
        };
        find_behavior(project, extension, behavior)?;
        if find_behavior(project, extension, new_name).is_ok() {
            return Err(RefactorError::name_taken("events-based behavior", new_name));
        }

        self.rename_events_based_behavior(project, extension, behavior, new_name);
        if let Some(declaration) = project
            .extension_mut(extension)
            .and_then(|e| e.behavior_mut(behavior))
        {
            declaration.name = new_name.to_string();
        }
        Ok(())
    }

    fn rename_property_entity(
        &self,
        project: &mut Project,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        let qualified = parse_qualified(old_name)?;
        let [extension, behavior, property] = qualified.segments() else {
            return Err(RefactorError::invalid_qualified_name(old_name));
        };
        let properties = &find_behavior(project, extension, behavior)?.properties;
        if !properties.has(property) {
            return Err(RefactorError::not_found("behavior property", old_name));
        }
        if properties.has(new_name) {
            return Err(RefactorError::name_taken("behavior property", new_name));
        }

        self.rename_behavior_property(project, extension, behavior, property, new_name);
        if let Some(declaration) = project
            .extension_mut(extension)
            .and_then(|e| e.behavior_mut(behavior))
        {
            declaration.properties.rename(property, new_name);
        }
        Ok(())
    }

    fn move_parameter_entity(
        &self,
        project: &mut Project,
        function: &str,
        from: usize,
        to: usize,
    ) -> Result<()> {
        let qualified = parse_qualified(function)?;
        if function_mut(project, &qualified).is_none() {
            return Err(RefactorError::not_found("events function", function));
        }
        match qualified.segments() {
            [extension, name] => {
                self.move_events_function_parameter(project, extension, name, from, to)?
            }
            [extension, behavior, name] => self.move_behavior_events_function_parameter(
                project, extension, behavior, name, from, to,
            )?,
            _ => return Err(RefactorError::invalid_qualified_name(function)),
        }
        if let Some(declaration) = function_mut(project, &qualified) {
            declaration.move_parameter(from, to);
        }
        Ok(())
    }
}

// ============================================================================
// DECLARATION HELPERS
// ============================================================================

fn parse_qualified(name: &str) -> Result<QualifiedName> {
    QualifiedName::parse(name).ok_or_else(|| RefactorError::invalid_qualified_name(name))
}

fn declares(objects: &ObjectsContainer, name: &str, kind: EntityKind) -> bool {
    if kind.is_object_group() {
        objects.groups.has(name)
    } else {
        objects.has_object_named(name)
    }
}

fn check_declared(objects: &ObjectsContainer, name: &str, kind: EntityKind) -> Result<()> {
    if declares(objects, name, kind) {
        Ok(())
    } else {
        Err(RefactorError::not_found(kind.describe(), name))
    }
}

fn check_renamable(
    objects: &ObjectsContainer,
    old_name: &str,
    new_name: &str,
    kind: EntityKind,
) -> Result<()> {
    check_declared(objects, old_name, kind)?;
    if objects.has_object_or_group_named(new_name) {
        return Err(RefactorError::name_taken(kind.describe(), new_name));
    }
    Ok(())
}

fn rename_declaration(
    objects: &mut ObjectsContainer,
    old_name: &str,
    new_name: &str,
    kind: EntityKind,
) {
    if kind.is_object_group() {
        if let Some(group) = objects.groups.get_mut(old_name) {
            group.name = new_name.to_string();
        }
    } else {
        objects.rename_object(old_name, new_name);
    }
}

fn remove_declaration(objects: &mut ObjectsContainer, name: &str, kind: EntityKind) {
    if kind.is_object_group() {
        objects.groups.remove(name);
    } else {
        objects.remove_object(name);
    }
}

fn declares_in_function(function: &EventsFunction, name: &str, kind: EntityKind) -> bool {
    if kind.is_object_group() {
        function.object_groups.has(name)
    } else {
        function
            .parameters
            .iter()
            .any(|p| p.kind.is_object() && p.name == name)
    }
}

fn check_function_renamable(
    function: &EventsFunction,
    old_name: &str,
    new_name: &str,
    kind: EntityKind,
) -> Result<()> {
    if !declares_in_function(function, old_name, kind) {
        return Err(RefactorError::not_found(kind.describe(), old_name));
    }
    let taken = function.object_groups.has(new_name)
        || function
            .parameters
            .iter()
            .any(|p| p.kind.is_object() && p.name == new_name);
    if taken {
        return Err(RefactorError::name_taken(kind.describe(), new_name));
    }
    Ok(())
}

fn check_function_declared(
    declared: bool,
    taken: bool,
    old_name: &str,
    new_name: &str,
) -> Result<()> {
    if !declared {
        return Err(RefactorError::not_found("events function", old_name));
    }
    if taken {
        return Err(RefactorError::name_taken("events function", new_name));
    }
    Ok(())
}

fn find_extension_mut<'p>(
    project: &'p mut Project,
    extension: &str,
) -> Result<&'p mut EventsFunctionsExtension> {
    project
        .extension_mut(extension)
        .ok_or_else(|| RefactorError::not_found("extension", extension))
}

fn find_behavior<'p>(
    project: &'p Project,
    extension: &str,
    behavior: &str,
) -> Result<&'p EventsBasedBehavior> {
    project
        .extension(extension)
        .ok_or_else(|| RefactorError::not_found("extension", extension))?
        .behavior(behavior)
        .ok_or_else(|| {
            RefactorError::not_found("events-based behavior", format!("{extension}::{behavior}"))
        })
}

/// The function a scope names, with the properties of its behavior.
fn scoped_function<'p>(
    project: &'p mut Project,
    scope: &Scope,
) -> Result<(&'p mut EventsFunction, Option<&'p PropertiesContainer>)> {
    match scope {
        Scope::EventsFunction {
            extension,
            function,
        } => {
            let found = find_extension_mut(project, extension)?
                .functions
                .get_mut(function)
                .ok_or_else(|| RefactorError::not_found("events function", function.as_str()))?;
            Ok((found, None))
        }
        Scope::BehaviorEventsFunction {
            extension,
            behavior,
            function,
        } => {
            let EventsBasedBehavior {
                functions,
                properties,
                ..
            } = find_extension_mut(project, extension)?
                .behavior_mut(behavior)
                .ok_or_else(|| {
                    RefactorError::not_found("events-based behavior", behavior.as_str())
                })?;
            let found = functions
                .get_mut(function)
                .ok_or_else(|| RefactorError::not_found("events function", function.as_str()))?;
            Ok((found, Some(&*properties)))
        }
        Scope::Global => Err(RefactorError::invalid_scope("global")),
        Scope::Layout(layout) => Err(RefactorError::invalid_scope(format!("layout '{layout}'"))),
    }
}

fn function_mut<'p>(
    project: &'p mut Project,
    function: &QualifiedName,
) -> Option<&'p mut EventsFunction> {
    let extension = project.extension_mut(function.first()?)?;
    match function.segments() {
        [_, name] => extension.functions.get_mut(name),
        [_, behavior, name] => extension.behavior_mut(behavior)?.functions.get_mut(name),
        _ => None,
    }
}

fn remove_function_entity(project: &mut Project, name: &str) -> Result<()> {
    let qualified = parse_qualified(name)?;
    let removed = match qualified.segments() {
        [extension, function] => find_extension_mut(project, extension)?.functions.remove(function),
        [extension, behavior, function] => find_extension_mut(project, extension)?
            .behavior_mut(behavior)
            .and_then(|b| b.functions.remove(function)),
        _ => return Err(RefactorError::invalid_qualified_name(name)),
    };
    removed
        .map(|_| ())
        .ok_or_else(|| RefactorError::not_found("events function", name))
}

fn remove_behavior_entity(project: &mut Project, name: &str) -> Result<()> {
    let qualified = parse_qualified(name)?;
    let [extension, behavior] = qualified.segments() else {
        return Err(RefactorError::invalid_qualified_name(name));
    };
    if find_extension_mut(project, extension)?
        .remove_behavior(behavior)
        .is_none()
    {
        return Err(RefactorError::not_found("events-based behavior", name));
    }

    for object in project.all_objects_mut() {
        let attached: Vec<String> = object
            .behaviors()
            .filter(|b| b.type_name == name)
            .map(|b| b.name.clone())
            .collect();
        for behavior_name in attached {
            object.remove_behavior(&behavior_name);
        }
    }
    Ok(())
}

fn remove_property_entity(project: &mut Project, name: &str) -> Result<()> {
    let qualified = parse_qualified(name)?;
    let [extension, behavior, property] = qualified.segments() else {
        return Err(RefactorError::invalid_qualified_name(name));
    };
    find_extension_mut(project, extension)?
        .behavior_mut(behavior)
        .and_then(|b| b.properties.remove(property))
        .map(|_| ())
        .ok_or_else(|| RefactorError::not_found("behavior property", name))
}
