//! Property descriptors declared by events-based behaviors.

use indexmap::IndexMap;

use crate::base::constants::BEHAVIOR_PROPERTY_TYPE;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDescriptor {
    pub name: String,
    /// `Number`, `String`, `Boolean`, `Choice`, `Behavior`...
    pub type_name: String,
    /// Default value.
    pub value: String,
    /// For `Behavior` properties, the first entry is the required behavior type.
    pub extra_info: Vec<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: "String".to_string(),
            value: String::new(),
            extra_info: Vec::new(),
        }
    }

    pub fn set_type(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn add_extra_info(&mut self, info: impl Into<String>) -> &mut Self {
        self.extra_info.push(info.into());
        self
    }

    /// The behavior type this property requires, if it is a required-behavior property.
    pub fn required_behavior_type(&self) -> Option<&str> {
        if self.type_name != BEHAVIOR_PROPERTY_TYPE {
            return None;
        }
        self.extra_info.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertiesContainer {
    properties: IndexMap<String, PropertyDescriptor>,
}

impl PropertiesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new property, replacing any property with the same name.
    pub fn insert_new(&mut self, name: impl Into<String>) -> &mut PropertyDescriptor {
        let descriptor = PropertyDescriptor::new(name);
        let (index, _) = self
            .properties
            .insert_full(descriptor.name.clone(), descriptor);
        &mut self.properties[index]
    }

    pub fn has(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyDescriptor> {
        self.properties.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyDescriptor> {
        self.properties.shift_remove(name)
    }

    /// Rename a property, keeping its position. Fails when `new_name` is taken.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.properties.contains_key(new_name) {
            return false;
        }
        let Some((index, _, mut property)) = self.properties.shift_remove_full(old_name) else {
            return false;
        };
        property.name = new_name.to_string();
        self.properties.shift_insert(index, new_name.to_string(), property);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PropertyDescriptor> {
        self.properties.values_mut()
    }

    /// Required-behavior properties, in declaration order.
    pub fn required_behaviors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|p| p.required_behavior_type().map(|t| (p.name.as_str(), t)))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
