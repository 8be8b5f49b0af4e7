use rustc_hash::FxHashSet;

use crate::error::{RefactorError, Result};
use crate::project::{
    Object, ObjectGroup, ObjectsContainer, PropertiesContainer, PropertyDescriptor, Variable,
    VariablesContainer,
};

/// A container of uniquely named entries.
pub trait NamedContainer {
    type Item;

    /// Entry kind used in error messages.
    const KIND: &'static str;

    fn get_named(&self, name: &str) -> Option<&Self::Item>;

    /// Entries in declaration order.
    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Item)>;
}

impl NamedContainer for ObjectsContainer {
    type Item = Object;
    const KIND: &'static str = "object";

    fn get_named(&self, name: &str) -> Option<&Object> {
        self.get_object(name)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.objects().map(|o| (o.name.as_str(), o))
    }
}

impl NamedContainer for VariablesContainer {
    type Item = Variable;
    const KIND: &'static str = "variable";

    fn get_named(&self, name: &str) -> Option<&Variable> {
        self.get(name)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.iter()
    }
}

impl NamedContainer for PropertiesContainer {
    type Item = PropertyDescriptor;
    const KIND: &'static str = "property";

    fn get_named(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.get(name)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.iter().map(|p| (p.name.as_str(), p))
    }
}

// ============================================================================
// SCOPED NAME CONTAINER
// ============================================================================

/// Ordered stack of borrowed containers, from most global to most local.
///
/// Lookups return the most local definition of a name. Containers can only
/// be appended, so callers must add them global first.
#[derive(Debug)]
pub struct ScopedNameContainer<'a, C> {
    containers: Vec<&'a C>,
}

impl<C> Default for ScopedNameContainer<'_, C> {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
        }
    }
}

impl<C> Clone for ScopedNameContainer<'_, C> {
    fn clone(&self) -> Self {
        Self {
            containers: self.containers.clone(),
        }
    }
}

impl<'a, C: NamedContainer> ScopedNameContainer<'a, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a container, more local than every container added before.
    pub fn add(&mut self, container: &'a C) -> &mut Self {
        self.containers.push(container);
        self
    }

    pub fn containers(&self) -> &[&'a C] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn has(&self, name: &str) -> bool {
        self.containers.iter().any(|c| c.get_named(name).is_some())
    }

    /// The most local entry named `name`.
    pub fn find(&self, name: &str) -> Option<&'a C::Item> {
        self.containers
            .iter()
            .copied()
            .rev()
            .find_map(|c| c.get_named(name))
    }

    /// Like [`find`](Self::find), failing with `NotFound`.
    pub fn get(&self, name: &str) -> Result<&'a C::Item> {
        self.find(name)
            .ok_or_else(|| RefactorError::not_found(C::KIND, name))
    }

    /// Index of the most local container declaring `name`.
    pub fn defining_container(&self, name: &str) -> Option<usize> {
        self.containers
            .iter()
            .rposition(|c| c.get_named(name).is_some())
    }

    /// Entries whose name starts with `prefix`.
    ///
    /// Names come in global to local order, each exactly once, paired with
    /// their most local entry.
    pub fn with_prefix<'s>(
        &'s self,
        prefix: &'s str,
    ) -> impl Iterator<Item = (&'a str, &'a C::Item)> {
        let mut seen = FxHashSet::default();
        self.containers
            .iter()
            .copied()
            .flat_map(|c| c.entries())
            .filter(move |(name, _)| name.starts_with(prefix))
            .filter_map(move |(name, _)| {
                if !seen.insert(name) {
                    return None;
                }
                self.find(name).map(|item| (name, item))
            })
    }
}

// ============================================================================
// OBJECTS AND GROUPS
// ============================================================================

/// An object or an object group, as found by a scoped lookup.
#[derive(Clone, Copy, Debug)]
pub enum ObjectOrGroup<'a> {
    Object(&'a Object),
    Group(&'a ObjectGroup),
}

impl<'a> ObjectOrGroup<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ObjectOrGroup::Object(object) => &object.name,
            ObjectOrGroup::Group(group) => &group.name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ObjectOrGroup::Group(_))
    }
}

fn object_or_group_in<'a>(
    container: &'a ObjectsContainer,
    name: &str,
) -> Option<ObjectOrGroup<'a>> {
    container
        .get_object(name)
        .map(ObjectOrGroup::Object)
        .or_else(|| container.groups.get(name).map(ObjectOrGroup::Group))
}

impl<'a> ScopedNameContainer<'a, ObjectsContainer> {
    pub fn has_group(&self, name: &str) -> bool {
        self.containers.iter().any(|c| c.groups.has(name))
    }

    pub fn find_group(&self, name: &str) -> Option<&'a ObjectGroup> {
        self.containers
            .iter()
            .copied()
            .rev()
            .find_map(|c| c.groups.get(name))
    }

    pub fn has_object_or_group(&self, name: &str) -> bool {
        self.containers
            .iter()
            .any(|c| c.has_object_or_group_named(name))
    }

    /// The most local object or group named `name`. Within one container an
    /// object wins over a group.
    pub fn find_object_or_group(&self, name: &str) -> Option<ObjectOrGroup<'a>> {
        self.containers
            .iter()
            .copied()
            .rev()
            .find_map(|c| object_or_group_in(c, name))
    }

    pub fn get_object_or_group(&self, name: &str) -> Result<ObjectOrGroup<'a>> {
        self.find_object_or_group(name)
            .ok_or_else(|| RefactorError::not_found("object or group", name))
    }

    /// Index of the most local container declaring an object or group `name`.
    pub fn container_of_object_or_group(&self, name: &str) -> Option<usize> {
        self.containers
            .iter()
            .rposition(|c| c.has_object_or_group_named(name))
    }

    /// Objects and groups whose name starts with `prefix`, each name once.
    pub fn objects_or_groups_with_prefix<'s>(
        &'s self,
        prefix: &'s str,
    ) -> impl Iterator<Item = ObjectOrGroup<'a>> {
        let mut seen = FxHashSet::default();
        self.containers
            .iter()
            .copied()
            .flat_map(|c| {
                c.object_names()
                    .chain(c.groups.iter().map(|g| g.name.as_str()))
            })
            .filter(move |name| name.starts_with(prefix))
            .filter_map(move |name| {
                if !seen.insert(name) {
                    return None;
                }
                self.find_object_or_group(name)
            })
    }

    /// Type of the behavior named `behavior` on an object or group.
    ///
    /// For a group, every member must carry the behavior with the same type.
    pub fn behavior_type_of(&self, object_or_group: &str, behavior: &str) -> Option<&'a str> {
        match self.find_object_or_group(object_or_group)? {
            ObjectOrGroup::Object(object) => {
                object.behavior(behavior).map(|b| b.type_name.as_str())
            }
            ObjectOrGroup::Group(group) => {
                let mut common: Option<&'a str> = None;
                for member in group.objects() {
                    let type_name = self.find(member)?.behavior(behavior)?.type_name.as_str();
                    match common {
                        Some(existing) if existing != type_name => return None,
                        _ => common = Some(type_name),
                    }
                }
                common
            }
        }
    }
}

pub type ObjectsContainersList<'a> = ScopedNameContainer<'a, ObjectsContainer>;
pub type VariablesContainersList<'a> = ScopedNameContainer<'a, VariablesContainer>;
pub type PropertiesContainersList<'a> = ScopedNameContainer<'a, PropertiesContainer>;
