//! Layouts, external layouts, external events and their initial instances.

use super::events::EventsList;
use super::object::ObjectsContainer;
use super::variables::VariablesContainer;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialInstance {
    pub object_name: String,
    pub x: f64,
    pub y: f64,
    pub layer: String,
}

impl InitialInstance {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialInstancesContainer {
    instances: Vec<InitialInstance>,
}

impl InitialInstancesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: InitialInstance) -> &mut InitialInstance {
        self.instances.push(instance);
        let last = self.instances.len() - 1;
        &mut self.instances[last]
    }

    pub fn has_instances_of(&self, object_name: &str) -> bool {
        self.instances.iter().any(|i| i.object_name == object_name)
    }

    /// Remove every instance of the object. Returns how many were removed.
    pub fn remove_instances_of(&mut self, object_name: &str) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| i.object_name != object_name);
        before - self.instances.len()
    }

    /// Point every instance of `old_name` at `new_name`. Returns how many changed.
    pub fn rename_instances_of(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut renamed = 0;
        for instance in self.instances.iter_mut().filter(|i| i.object_name == old_name) {
            instance.object_name = new_name.to_string();
            renamed += 1;
        }
        renamed
    }

    pub fn iter(&self) -> impl Iterator<Item = &InitialInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// A scene: local objects and variables, initial instances and events.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub name: String,
    pub objects: ObjectsContainer,
    pub variables: VariablesContainer,
    pub instances: InitialInstancesContainer,
    pub events: EventsList,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Initial instances stored outside of a layout, placed into it at runtime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalLayout {
    pub name: String,
    pub associated_layout: Option<String>,
    pub instances: InitialInstancesContainer,
}

impl ExternalLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_associated_layout(&mut self, layout: impl Into<String>) -> &mut Self {
        self.associated_layout = Some(layout.into());
        self
    }

    pub fn is_associated_with(&self, layout: &str) -> bool {
        self.associated_layout.as_deref() == Some(layout)
    }
}

/// Events stored outside of a layout, included by one or more layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalEvents {
    pub name: String,
    /// Layout whose objects and variables are visible to these events.
    pub associated_layout: Option<String>,
    pub events: EventsList,
}

impl ExternalEvents {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_associated_layout(&mut self, layout: impl Into<String>) -> &mut Self {
        self.associated_layout = Some(layout.into());
        self
    }

    pub fn is_associated_with(&self, layout: &str) -> bool {
        self.associated_layout.as_deref() == Some(layout)
    }
}
