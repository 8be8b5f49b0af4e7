//! Exact-segment renames of instruction types and behavior type names.
//!
//! Instruction types are plain qualified names (`Extension::Function`,
//! `Extension::Behavior::Method`) with no expression grammar inside. A rename
//! replaces a single segment and only when every segment before it matches.

use crate::base::QualifiedName;
use crate::expression::AccessorKind;

/// One qualified-name segment rename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRename {
    /// `Old::*` becomes `New::*`, for every symbol the extension owns.
    Extension { old: String, new: String },
    /// `Extension::Old` becomes `Extension::New`.
    FreeFunction {
        extension: String,
        old: String,
        new: String,
    },
    /// `Extension::Old::*` becomes `Extension::New::*`.
    Behavior {
        extension: String,
        old: String,
        new: String,
    },
    /// `Extension::Behavior::Old` becomes `Extension::Behavior::New`.
    BehaviorFunction {
        extension: String,
        behavior: String,
        old: String,
        new: String,
    },
    /// The accessors of property `Old` (`SetPropertyOld`, `PropertyOld`)
    /// become the accessors of `New`.
    BehaviorProperty {
        extension: String,
        behavior: String,
        old: String,
        new: String,
    },
}

impl TypeRename {
    /// The renamed instruction type, or `None` when `instruction_type` is not
    /// affected.
    pub fn apply(&self, instruction_type: &str) -> Option<String> {
        let name = QualifiedName::parse(instruction_type)?;
        let renamed = match self {
            TypeRename::Extension { old, new } => {
                (name.len() >= 2 && name.first() == Some(old.as_str()))
                    .then(|| name.with_segment(0, new))
            }
            TypeRename::FreeFunction {
                extension,
                old,
                new,
            } => name.is(&[extension.as_str(), old.as_str()]).then(|| name.with_segment(1, new)),
            TypeRename::Behavior {
                extension,
                old,
                new,
            } => (name.len() == 3 && name.starts_with(&[extension.as_str(), old.as_str()]))
                .then(|| name.with_segment(1, new)),
            TypeRename::BehaviorFunction {
                extension,
                behavior,
                old,
                new,
            } => name
                .is(&[extension.as_str(), behavior.as_str(), old.as_str()])
                .then(|| name.with_segment(2, new)),
            TypeRename::BehaviorProperty {
                extension,
                behavior,
                old,
                new,
            } => {
                if name.len() != 3 || !name.starts_with(&[extension.as_str(), behavior.as_str()]) {
                    return None;
                }
                let (kind, property) = AccessorKind::parse(name.last()?)?;
                (property == old.as_str())
                    .then(|| name.with_segment(2, &format!("{}{}", kind.prefix(), new)))
            }
        }?;
        Some(renamed.to_string())
    }

    /// The renamed behavior type (`Extension::Behavior`), as stored on
    /// attached behaviors and in required-behavior extra info.
    pub fn apply_to_type_reference(&self, behavior_type: &str) -> Option<String> {
        let name = QualifiedName::parse(behavior_type)?;
        if name.len() != 2 {
            return None;
        }
        let renamed = match self {
            TypeRename::Extension { old, new } => {
                (name.first() == Some(old.as_str())).then(|| name.with_segment(0, new))
            }
            TypeRename::Behavior {
                extension,
                old,
                new,
            } => name.is(&[extension.as_str(), old.as_str()]).then(|| name.with_segment(1, new)),
            _ => None,
        }?;
        Some(renamed.to_string())
    }
}
