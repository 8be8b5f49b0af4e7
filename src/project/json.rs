//! JSON loading and saving of projects.

use super::tree::Project;
use crate::error::ProjectError;

/// Parse a project from its JSON representation.
pub fn from_json(json: &str) -> Result<Project, ProjectError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a project to pretty-printed JSON.
pub fn to_json(project: &Project) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(project)?)
}
