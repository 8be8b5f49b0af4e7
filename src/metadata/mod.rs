//! Extension metadata: what functions, behaviors and instructions exist and
//! which parameters they declare.
//!
//! The refactorer never reaches for a global registry. Callers build a
//! [`Platform`] (the built-in catalog), wrap it with the project's own
//! extensions in a [`ProjectMetadata`], and pass it down as a
//! `&dyn MetadataRegistry`.

mod platform;
mod registry;

pub use platform::{BehaviorMetadata, FunctionMetadata, Platform, PlatformExtension};
pub use registry::{MetadataRegistry, ProjectMetadata, RequiredBehaviorProperty};
