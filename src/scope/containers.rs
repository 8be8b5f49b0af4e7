use rustc_hash::FxHashSet;

use super::container::{
    ObjectOrGroup, ObjectsContainersList, PropertiesContainersList, VariablesContainersList,
};
use crate::project::{
    Layout, ObjectsContainer, Project, PropertiesContainer, PropertyDescriptor, Variable,
    VariablesContainer,
};

/// What a bare identifier refers to in a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    ObjectOrGroup,
    Variable,
    Property,
    Unresolved,
}

/// An identifier visible in a scope, with its most local declaration.
#[derive(Clone, Copy, Debug)]
pub enum ScopedIdentifier<'a> {
    ObjectOrGroup(ObjectOrGroup<'a>),
    Variable {
        name: &'a str,
        variable: &'a Variable,
    },
    Property(&'a PropertyDescriptor),
}

impl<'a> ScopedIdentifier<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ScopedIdentifier::ObjectOrGroup(object_or_group) => object_or_group.name(),
            ScopedIdentifier::Variable { name, .. } => name,
            ScopedIdentifier::Property(property) => &property.name,
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            ScopedIdentifier::ObjectOrGroup(_) => IdentifierKind::ObjectOrGroup,
            ScopedIdentifier::Variable { .. } => IdentifierKind::Variable,
            ScopedIdentifier::Property(_) => IdentifierKind::Property,
        }
    }
}

/// The objects, variables and properties visible from one document.
///
/// Built for a single operation and dropped with it. A name belongs to
/// exactly one kind, checked in the order object or group, variable,
/// property.
#[derive(Clone, Debug, Default)]
pub struct ScopedContainers<'a> {
    objects: ObjectsContainersList<'a>,
    variables: VariablesContainersList<'a>,
    properties: PropertiesContainersList<'a>,
}

impl<'a> ScopedContainers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global objects and variables.
    pub fn for_project(project: &'a Project) -> Self {
        let mut scope = Self::new();
        scope.objects.add(&project.objects);
        scope.variables.add(&project.variables);
        scope
    }

    /// Global objects and variables, then the layout's.
    pub fn for_project_and_layout(project: &'a Project, layout: &'a Layout) -> Self {
        Self::for_scene(
            &project.objects,
            &project.variables,
            &layout.objects,
            &layout.variables,
        )
    }

    /// Same as [`for_project_and_layout`](Self::for_project_and_layout), from
    /// the individual containers.
    pub fn for_scene(
        global_objects: &'a ObjectsContainer,
        global_variables: &'a VariablesContainer,
        objects: &'a ObjectsContainer,
        variables: &'a VariablesContainer,
    ) -> Self {
        let mut scope = Self::new();
        scope.objects.add(global_objects).add(objects);
        scope.variables.add(global_variables).add(variables);
        scope
    }

    /// Objects only: a global container, then a local one.
    pub fn for_containers(
        global_objects: &'a ObjectsContainer,
        objects: &'a ObjectsContainer,
    ) -> Self {
        let mut scope = Self::new();
        scope.objects.add(global_objects).add(objects);
        scope
    }

    /// Inside an events-function: the objects built from its parameters and,
    /// for behavior functions, the behavior's properties.
    pub fn for_events_function(
        parameter_objects: &'a ObjectsContainer,
        properties: Option<&'a PropertiesContainer>,
    ) -> Self {
        let mut scope = Self::new();
        scope.objects.add(parameter_objects);
        if let Some(properties) = properties {
            scope.properties.add(properties);
        }
        scope
    }

    pub fn add_objects_container(&mut self, container: &'a ObjectsContainer) -> &mut Self {
        self.objects.add(container);
        self
    }

    pub fn add_variables_container(&mut self, container: &'a VariablesContainer) -> &mut Self {
        self.variables.add(container);
        self
    }

    pub fn add_properties_container(&mut self, container: &'a PropertiesContainer) -> &mut Self {
        self.properties.add(container);
        self
    }

    pub fn objects(&self) -> &ObjectsContainersList<'a> {
        &self.objects
    }

    pub fn variables(&self) -> &VariablesContainersList<'a> {
        &self.variables
    }

    pub fn properties(&self) -> &PropertiesContainersList<'a> {
        &self.properties
    }

    /// Classify a bare identifier.
    pub fn classify(&self, name: &str) -> IdentifierKind {
        if self.objects.has_object_or_group(name) {
            IdentifierKind::ObjectOrGroup
        } else if self.variables.has(name) {
            IdentifierKind::Variable
        } else if self.properties.has(name) {
            IdentifierKind::Property
        } else {
            IdentifierKind::Unresolved
        }
    }

    /// Every identifier starting with `prefix`, each name once, with the
    /// kind [`classify`](Self::classify) would give it.
    pub fn identifiers_with_prefix<'s>(
        &'s self,
        prefix: &'s str,
    ) -> impl Iterator<Item = ScopedIdentifier<'a>> {
        let objects = self
            .objects
            .objects_or_groups_with_prefix(prefix)
            .map(ScopedIdentifier::ObjectOrGroup);
        let variables = self
            .variables
            .with_prefix(prefix)
            .map(|(name, variable)| ScopedIdentifier::Variable { name, variable });
        let properties = self
            .properties
            .with_prefix(prefix)
            .map(|(_, property)| ScopedIdentifier::Property(property));

        let mut seen = FxHashSet::default();
        objects
            .chain(variables)
            .chain(properties)
            .filter(move |identifier| seen.insert(identifier.name()))
    }
}
