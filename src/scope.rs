//! Scoped identifier resolution.
//!
//! A document sees several levels of declarations: project-wide objects and
//! variables, then its layout's, or, inside an events-function, the objects
//! built from its parameters and the properties of its behavior. Each level
//! is a borrowed container; more local levels shadow more global ones.
//!
//! - [`ScopedNameContainer`] - an ordered stack of one kind of container
//! - [`ScopedContainers`] - objects, variables and properties together,
//!   classifying identifiers with the priority object > variable > property

mod container;
mod containers;

pub use container::{
    NamedContainer, ObjectOrGroup, ObjectsContainersList, PropertiesContainersList,
    ScopedNameContainer, VariablesContainersList,
};
pub use containers::{IdentifierKind, ScopedContainers, ScopedIdentifier};
