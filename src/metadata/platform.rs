//! The built-in extension catalog.

use indexmap::IndexMap;

use crate::base::constants::{PROPERTY_PREFIX, SET_PROPERTY_PREFIX};
use crate::project::{
    EventsBasedBehavior, EventsFunction, EventsFunctionsExtension, ParameterKind,
    PropertiesContainer,
};

/// A function or behavior method with its declared parameter kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMetadata {
    pub name: String,
    pub parameters: Vec<ParameterKind>,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<String>, parameters: impl Into<Vec<ParameterKind>>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into(),
        }
    }

    fn from_events_function(function: &EventsFunction) -> Self {
        Self {
            name: function.name.clone(),
            parameters: function.parameters.iter().map(|p| p.kind).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorMetadata {
    pub name: String,
    /// Instance name given to the behavior when it is attached to an object.
    pub default_name: String,
    pub properties: PropertiesContainer,
    pub methods: IndexMap<String, FunctionMetadata>,
}

impl BehaviorMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            default_name: name.clone(),
            name,
            properties: PropertiesContainer::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn with_default_name(mut self, default_name: impl Into<String>) -> Self {
        self.default_name = default_name.into();
        self
    }

    pub fn with_method(mut self, method: FunctionMetadata) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    pub fn with_properties(mut self, properties: PropertiesContainer) -> Self {
        self.properties = properties;
        self
    }

    /// Whether `name` is a declared method or a property accessor
    /// (`SetProperty<P>`, `Property<P>`) of a declared property.
    pub fn has_method(&self, name: &str) -> bool {
        if self.methods.contains_key(name) {
            return true;
        }
        let property = name
            .strip_prefix(SET_PROPERTY_PREFIX)
            .or_else(|| name.strip_prefix(PROPERTY_PREFIX));
        property.is_some_and(|p| !p.is_empty() && self.properties.has(p))
    }

    fn from_events_based_behavior(behavior: &EventsBasedBehavior) -> Self {
        let mut metadata = Self::new(&behavior.name).with_properties(behavior.properties.clone());
        for function in behavior.functions.iter() {
            metadata = metadata.with_method(FunctionMetadata::from_events_function(function));
        }
        metadata
    }
}

/// An extension's free functions, behaviors and instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformExtension {
    pub name: String,
    pub functions: IndexMap<String, FunctionMetadata>,
    pub behaviors: IndexMap<String, BehaviorMetadata>,
    /// Instructions keyed by their full type (`Extension::Instruction`).
    pub instructions: IndexMap<String, FunctionMetadata>,
}

impl PlatformExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.insert(function.name.clone(), function);
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorMetadata) -> Self {
        self.behaviors.insert(behavior.name.clone(), behavior);
        self
    }

    /// Declare an instruction; `name` is prefixed with the extension name.
    pub fn with_instruction(
        mut self,
        name: &str,
        parameters: impl Into<Vec<ParameterKind>>,
    ) -> Self {
        let type_name = format!("{}::{}", self.name, name);
        self.instructions
            .insert(type_name.clone(), FunctionMetadata::new(type_name, parameters));
        self
    }

    /// Metadata for an extension declared with events in a project.
    pub fn from_events_functions_extension(extension: &EventsFunctionsExtension) -> Self {
        let mut metadata = Self::new(&extension.name);
        for function in extension.functions.iter() {
            metadata = metadata.with_function(FunctionMetadata::from_events_function(function));
        }
        for behavior in &extension.behaviors {
            metadata =
                metadata.with_behavior(BehaviorMetadata::from_events_based_behavior(behavior));
        }
        metadata
    }
}

/// Catalog of built-in extensions.
///
/// Built explicitly by the caller and passed by reference to every operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Platform {
    pub extensions: IndexMap<String, PlatformExtension>,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_extension(&mut self, extension: PlatformExtension) -> &mut Self {
        self.extensions.insert(extension.name.clone(), extension);
        self
    }

    pub fn with_extension(mut self, extension: PlatformExtension) -> Self {
        self.add_extension(extension);
        self
    }

    /// Parse a platform catalog from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::ProjectError> {
        Ok(serde_json::from_str(json)?)
    }
}
