//! Shared fixtures for the refactoring tests.


pub use project_fixtures::*;
