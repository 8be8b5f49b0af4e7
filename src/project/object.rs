//! Objects, their behaviors, object groups and the containers holding them.

use indexmap::IndexMap;

use super::extension::{ParameterDescriptor, ParameterKind};
use super::variables::VariablesContainer;

/// A behavior attached to an object.
///
/// `name` is the instance name used in expressions (`Object.Name::Method`),
/// `type_name` is the qualified behavior type (`Extension::Behavior`).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorContent {
    pub name: String,
    pub type_name: String,
    /// Property values, keyed by property name.
    pub properties: IndexMap<String, String>,
}

impl BehaviorContent {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub name: String,
    pub type_name: String,
    pub behaviors: IndexMap<String, BehaviorContent>,
    pub variables: VariablesContainer,
}

impl Object {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            behaviors: IndexMap::new(),
            variables: VariablesContainer::default(),
        }
    }

    /// Attach a behavior, replacing any behavior with the same instance name.
    pub fn add_behavior(&mut self, behavior: BehaviorContent) -> &mut BehaviorContent {
        let name = behavior.name.clone();
        let (index, _) = self.behaviors.insert_full(name, behavior);
        &mut self.behaviors[index]
    }

    pub fn remove_behavior(&mut self, name: &str) -> Option<BehaviorContent> {
        self.behaviors.shift_remove(name)
    }

    pub fn has_behavior_named(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    pub fn behavior(&self, name: &str) -> Option<&BehaviorContent> {
        self.behaviors.get(name)
    }

    pub fn behavior_mut(&mut self, name: &str) -> Option<&mut BehaviorContent> {
        self.behaviors.get_mut(name)
    }

    /// First attached behavior of the given type, in attachment order.
    pub fn behavior_of_type(&self, type_name: &str) -> Option<&BehaviorContent> {
        self.behaviors.values().find(|b| b.type_name == type_name)
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &BehaviorContent> {
        self.behaviors.values()
    }

    pub fn behaviors_mut(&mut self) -> impl Iterator<Item = &mut BehaviorContent> {
        self.behaviors.values_mut()
    }
}

/// A named list of object names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGroup {
    pub name: String,
    objects: Vec<String>,
}

impl ObjectGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn find(&self, object_name: &str) -> bool {
        self.objects.iter().any(|o| o == object_name)
    }

    /// Add an object name. Duplicates are ignored.
    pub fn add_object(&mut self, object_name: impl Into<String>) {
        let object_name = object_name.into();
        if !self.find(&object_name) {
            self.objects.push(object_name);
        }
    }

    pub fn remove_object(&mut self, object_name: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o != object_name);
        before != self.objects.len()
    }

    /// Rename an object in place, keeping its position in the group.
    pub fn rename_object(&mut self, old_name: &str, new_name: &str) -> bool {
        let mut renamed = false;
        for object in self.objects.iter_mut().filter(|o| *o == old_name) {
            *object = new_name.to_string();
            renamed = true;
        }
        renamed
    }

    pub fn objects(&self) -> &[String] {
        &self.objects
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGroupsContainer {
    groups: Vec<ObjectGroup>,
}

impl ObjectGroupsContainer {
    pub fn insert(&mut self, group: ObjectGroup) -> &mut ObjectGroup {
        self.groups.push(group);
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn insert_new(&mut self, name: impl Into<String>) -> &mut ObjectGroup {
        self.insert(ObjectGroup::new(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ObjectGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ObjectGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ObjectGroup> {
        let index = self.groups.iter().position(|g| g.name == name)?;
        Some(self.groups.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectGroup> {
        self.groups.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObjectGroup> {
        self.groups.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl std::ops::Index<usize> for ObjectGroupsContainer {
    type Output = ObjectGroup;

    fn index(&self, index: usize) -> &ObjectGroup {
        &self.groups[index]
    }
}

/// Objects and object groups declared at one level (project, layout or
/// events-function parameters).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectsContainer {
    objects: IndexMap<String, Object>,
    pub groups: ObjectGroupsContainer,
}

impl ObjectsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the objects visible inside an events-function from its parameters.
    ///
    /// Each object parameter becomes an object. Each behavior parameter attaches
    /// a behavior (named after the parameter, typed by its extra info) to the
    /// closest preceding object parameter.
    pub fn from_parameters(parameters: &[ParameterDescriptor]) -> Self {
        let mut container = Self::new();
        let mut last_object: Option<String> = None;
        for parameter in parameters {
            match parameter.kind {
                ParameterKind::Object => {
                    container.insert_new_object(&parameter.name, &parameter.extra_info);
                    last_object = Some(parameter.name.clone());
                }
                ParameterKind::Behavior => {
                    let Some(object) = last_object
                        .as_deref()
                        .and_then(|name| container.get_object_mut(name))
                    else {
                        continue;
                    };
                    object.add_behavior(BehaviorContent::new(
                        &parameter.name,
                        &parameter.extra_info,
                    ));
                }
                _ => {}
            }
        }
        container
    }

    pub fn insert_new_object(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> &mut Object {
        self.insert_object(Object::new(name, type_name))
    }

    /// Insert an object, replacing any object with the same name.
    pub fn insert_object(&mut self, object: Object) -> &mut Object {
        let name = object.name.clone();
        let (index, _) = self.objects.insert_full(name, object);
        &mut self.objects[index]
    }

    pub fn has_object_named(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn has_object_or_group_named(&self, name: &str) -> bool {
        self.has_object_named(name) || self.groups.has(name)
    }

    pub fn get_object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.get_mut(name)
    }

    pub fn remove_object(&mut self, name: &str) -> Option<Object> {
        self.objects.shift_remove(name)
    }

    /// Rename an object declaration, keeping its position.
    pub fn rename_object(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.objects.contains_key(new_name) {
            return false;
        }
        let Some((index, _, mut object)) = self.objects.shift_remove_full(old_name) else {
            return false;
        };
        object.name = new_name.to_string();
        self.objects.shift_insert(index, new_name.to_string(), object);
        true
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.values_mut()
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
