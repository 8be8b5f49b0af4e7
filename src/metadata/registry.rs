use indexmap::IndexMap;

use super::platform::{BehaviorMetadata, FunctionMetadata, Platform, PlatformExtension};
use crate::base::QualifiedName;
use crate::base::constants::NAMESPACE_SEPARATOR;
use crate::project::{ParameterKind, Project};

/// A `Behavior`-typed property that must point to another attached behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredBehaviorProperty {
    pub name: String,
    pub behavior_type: String,
}

/// Read-only view over the declared extensions.
///
/// Implementors only provide [`extension`](Self::extension); every query is
/// answered from the extensions it returns.
pub trait MetadataRegistry {
    /// The extension declared under `name`.
    fn extension(&self, name: &str) -> Option<&PlatformExtension>;

    fn has_free_function(&self, extension: &str, name: &str) -> bool {
        self.extension(extension)
            .is_some_and(|e| e.functions.contains_key(name))
    }

    /// Whether the behavior declares the method, property accessors included.
    fn has_behavior_method(&self, extension: &str, behavior: &str, name: &str) -> bool {
        self.extension(extension)
            .and_then(|e| e.behaviors.get(behavior))
            .is_some_and(|b| b.has_method(name))
    }

    /// Behavior metadata for a qualified behavior type (`Extension::Behavior`).
    fn behavior(&self, behavior_type: &str) -> Option<&BehaviorMetadata> {
        let (extension, behavior) = behavior_type.split_once(NAMESPACE_SEPARATOR)?;
        self.extension(extension)?.behaviors.get(behavior)
    }

    fn has_behavior(&self, behavior_type: &str) -> bool {
        self.behavior(behavior_type).is_some()
    }

    /// Free function (`E::F`) or behavior method (`E::B::M`) metadata.
    fn function(&self, function: &QualifiedName) -> Option<&FunctionMetadata> {
        let extension = self.extension(function.first()?)?;
        match function.segments() {
            [_, name] => extension.functions.get(name.as_str()),
            [_, behavior, method] => extension
                .behaviors
                .get(behavior.as_str())?
                .methods
                .get(method.as_str()),
            _ => None,
        }
    }

    /// Number of parameters declared by a function or behavior method.
    fn declared_parameter_count(&self, function: &QualifiedName) -> Option<usize> {
        self.function(function).map(|f| f.parameters.len())
    }

    /// Required-behavior properties declared by a behavior type, in order.
    fn behavior_required_properties(&self, behavior_type: &str) -> Vec<RequiredBehaviorProperty> {
        self.behavior(behavior_type)
            .map(|b| {
                b.properties
                    .required_behaviors()
                    .map(|(name, behavior_type)| RequiredBehaviorProperty {
                        name: name.to_string(),
                        behavior_type: behavior_type.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parameter kinds of an instruction type, when declared.
    ///
    /// Built-in instructions are looked up first, then functions and
    /// behavior methods (which are usable as instructions).
    fn instruction_parameter_kinds(&self, instruction_type: &str) -> Option<&[ParameterKind]> {
        let name = QualifiedName::parse(instruction_type)?;
        let extension = self.extension(name.first()?)?;
        if let Some(instruction) = extension.instructions.get(instruction_type) {
            return Some(&instruction.parameters);
        }
        self.function(&name).map(|f| f.parameters.as_slice())
    }

    /// Instance name used when the behavior is attached without an explicit name.
    fn behavior_default_name(&self, behavior_type: &str) -> Option<&str> {
        self.behavior(behavior_type).map(|b| b.default_name.as_str())
    }
}

impl MetadataRegistry for Platform {
    fn extension(&self, name: &str) -> Option<&PlatformExtension> {
        self.extensions.get(name)
    }
}

/// A registry plus the events-functions extensions declared by a project.
///
/// Holds an owned snapshot of the project's extensions, so the project can be
/// mutated while the registry is in use. Project extensions shadow the
/// extensions of `base` with the same name. The base is usually a
/// [`Platform`], or an older snapshot to refresh.
#[derive(Clone)]
pub struct ProjectMetadata<'p> {
    base: &'p dyn MetadataRegistry,
    extensions: IndexMap<String, PlatformExtension>,
}

impl<'p> ProjectMetadata<'p> {
    pub fn new(base: &'p dyn MetadataRegistry, project: &Project) -> Self {
        let extensions = project
            .extensions
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    PlatformExtension::from_events_functions_extension(e),
                )
            })
            .collect();
        Self { base, extensions }
    }

    pub fn base(&self) -> &'p dyn MetadataRegistry {
        self.base
    }
}

impl MetadataRegistry for ProjectMetadata<'_> {
    fn extension(&self, name: &str) -> Option<&PlatformExtension> {
        self.extensions
            .get(name)
            .or_else(|| self.base.extension(name))
    }
}
