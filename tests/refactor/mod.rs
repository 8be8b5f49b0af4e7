//! Whole-project refactoring tests
//!
//! - Objects and groups: groups, initial instances, events, shadowing
//! - Extensions and free events-functions
//! - Events-based behaviors, their functions and properties
//! - Required behaviors
//! - Refactor intents

pub mod tests_behaviors;
pub mod tests_extensions;
pub mod tests_objects;
pub mod tests_required_behaviors;
