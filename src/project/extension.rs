//! Events-functions extensions: free functions, events-based behaviors and
//! the parameters they declare.

use super::events::EventsList;
use super::object::ObjectGroupsContainer;
use super::properties::PropertiesContainer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionType {
    #[default]
    Action,
    Condition,
    Expression,
    StringExpression,
}

impl FunctionType {
    pub fn is_expression(self) -> bool {
        matches!(self, FunctionType::Expression | FunctionType::StringExpression)
    }
}

/// Kind of a declared parameter.
///
/// Only `Object` and expression-like parameters are fed to the expression
/// rewriter; the others are raw text with no grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    Object,
    Behavior,
    #[default]
    Number,
    String,
    Boolean,
    /// Free text (operators, layer names, key names...).
    Raw,
}

impl ParameterKind {
    /// Whether the parameter text follows the expression grammar.
    pub fn is_expression(self) -> bool {
        matches!(self, ParameterKind::Number | ParameterKind::String)
    }

    /// Whether the parameter text names an object or group.
    pub fn is_object(self) -> bool {
        self == ParameterKind::Object
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    /// Object type for `Object` parameters, behavior type for `Behavior` parameters.
    pub extra_info: String,
    pub description: String,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            extra_info: String::new(),
            description: String::new(),
        }
    }

    pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
        self.extra_info = extra_info.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventsFunction {
    pub name: String,
    pub function_type: FunctionType,
    pub parameters: Vec<ParameterDescriptor>,
    pub object_groups: ObjectGroupsContainer,
    pub events: EventsList,
}

impl EventsFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_function_type(&mut self, function_type: FunctionType) -> &mut Self {
        self.function_type = function_type;
        self
    }

    pub fn add_parameter(&mut self, parameter: ParameterDescriptor) -> &mut Self {
        self.parameters.push(parameter);
        self
    }

    /// Move a declared parameter, shifting the others.
    ///
    /// Returns `false` (and leaves the parameters untouched) if either index is
    /// out of range.
    pub fn move_parameter(&mut self, from: usize, to: usize) -> bool {
        let count = self.parameters.len();
        if from >= count || to >= count {
            return false;
        }
        let parameter = self.parameters.remove(from);
        self.parameters.insert(to, parameter);
        true
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventsFunctionsContainer {
    functions: Vec<EventsFunction>,
}

impl EventsFunctionsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_new(&mut self, name: impl Into<String>) -> &mut EventsFunction {
        self.insert(EventsFunction::new(name))
    }

    pub fn insert(&mut self, function: EventsFunction) -> &mut EventsFunction {
        self.functions.push(function);
        let last = self.functions.len() - 1;
        &mut self.functions[last]
    }

    pub fn has(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&EventsFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EventsFunction> {
        self.functions.iter_mut().find(|f| f.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<EventsFunction> {
        let index = self.functions.iter().position(|f| f.name == name)?;
        Some(self.functions.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventsFunction> {
        self.functions.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EventsFunction> {
        self.functions.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A behavior implemented with events-functions and declared properties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventsBasedBehavior {
    pub name: String,
    pub full_name: String,
    pub description: String,
    /// Object type the behavior can be attached to. Empty for any object.
    pub object_type: String,
    pub functions: EventsFunctionsContainer,
    pub properties: PropertiesContainer,
}

impl EventsBasedBehavior {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) -> &mut Self {
        self.full_name = full_name.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventsFunctionsExtension {
    pub name: String,
    pub functions: EventsFunctionsContainer,
    pub behaviors: Vec<EventsBasedBehavior>,
}

impl EventsFunctionsExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn insert_new_function(&mut self, name: impl Into<String>) -> &mut EventsFunction {
        self.functions.insert_new(name)
    }

    pub fn insert_new_behavior(&mut self, name: impl Into<String>) -> &mut EventsBasedBehavior {
        self.behaviors.push(EventsBasedBehavior::new(name));
        let last = self.behaviors.len() - 1;
        &mut self.behaviors[last]
    }

    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.iter().any(|b| b.name == name)
    }

    pub fn behavior(&self, name: &str) -> Option<&EventsBasedBehavior> {
        self.behaviors.iter().find(|b| b.name == name)
    }

    pub fn behavior_mut(&mut self, name: &str) -> Option<&mut EventsBasedBehavior> {
        self.behaviors.iter_mut().find(|b| b.name == name)
    }

    pub fn remove_behavior(&mut self, name: &str) -> Option<EventsBasedBehavior> {
        let index = self.behaviors.iter().position(|b| b.name == name)?;
        Some(self.behaviors.remove(index))
    }
}
