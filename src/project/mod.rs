//! Project model: the long-lived, caller-owned documents the refactorer
//! walks and mutates in place.
//!
//! ```text
//! Project
//! ├── objects / variables            (global scope)
//! ├── layouts                        (local objects, variables, instances, events)
//! ├── external_layouts               (instances, tied to a layout)
//! ├── external_events                (events, tied to a layout)
//! └── extensions                     (events-functions, events-based behaviors)
//! ```

mod events;
mod extension;
#[cfg(feature = "serde")]
mod json;
mod layout;
mod object;
mod properties;
mod tree;
mod variables;

pub use events::{Event, EventKind, EventsList, Instruction, InstructionKind};
pub use extension::{
    EventsBasedBehavior, EventsFunction, EventsFunctionsContainer, EventsFunctionsExtension,
    FunctionType, ParameterDescriptor, ParameterKind,
};
#[cfg(feature = "serde")]
pub use json::{from_json, to_json};
pub use layout::{
    ExternalEvents, ExternalLayout, InitialInstance, InitialInstancesContainer, Layout,
};
pub use object::{BehaviorContent, Object, ObjectGroup, ObjectGroupsContainer, ObjectsContainer};
pub use properties::{PropertiesContainer, PropertyDescriptor};
pub use tree::Project;
pub use variables::{Variable, VariableValue, VariablesContainer};
