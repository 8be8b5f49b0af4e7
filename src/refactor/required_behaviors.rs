//! Required-behavior properties: validation and transitive attachment.
//!
//! A behavior declares `Behavior`-typed properties whose extra info names the
//! type of another behavior it depends on. On an object, such a property holds
//! the name of the attached behavior satisfying the dependency.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::error::{RefactorError, Result};
use crate::metadata::MetadataRegistry;
use crate::project::{BehaviorContent, Object, Project};

/// A required-behavior property that does not name a compatible behavior
/// attached to the same object.
#[derive(Clone, Debug, PartialEq)]
pub struct RequiredBehaviorProblem<'p> {
    pub object: &'p Object,
    pub behavior: &'p BehaviorContent,
    pub property_name: String,
    pub expected_behavior_type: String,
}

/// Every invalid required-behavior property, global objects first, then each
/// layout's objects in order.
pub fn find_invalid_required_behavior_properties<'p>(
    registry: &dyn MetadataRegistry,
    project: &'p Project,
) -> Vec<RequiredBehaviorProblem<'p>> {
    let objects = project
        .objects
        .objects()
        .chain(project.layouts.iter().flat_map(|l| l.objects.objects()));

    let mut problems = Vec::new();
    for object in objects {
        for behavior in object.behaviors() {
            for required in registry.behavior_required_properties(&behavior.type_name) {
                if is_filled(object, behavior, &required.name, &required.behavior_type) {
                    continue;
                }
                problems.push(RequiredBehaviorProblem {
                    object,
                    behavior,
                    property_name: required.name,
                    expected_behavior_type: required.behavior_type,
                });
            }
        }
    }
    problems
}

/// Whether `property` of `behavior` names a behavior of `expected_type`
/// attached to `object`.
fn is_filled(
    object: &Object,
    behavior: &BehaviorContent,
    property: &str,
    expected_type: &str,
) -> bool {
    behavior
        .property(property)
        .and_then(|name| object.behavior(name))
        .is_some_and(|dependency| dependency.type_name == expected_type)
}

/// Attach `behavior_type` as `name`, then every behavior it requires,
/// transitively, filling each required-behavior property.
///
/// A behavior of the same type already attached under `name` is kept; one of
/// another type is an error. A required type already attached is reused
/// rather than added again. Required types unknown to the
/// registry are skipped.
pub fn add_behavior_and_required_behaviors(
    registry: &dyn MetadataRegistry,
    object: &mut Object,
    behavior_type: &str,
    name: &str,
) -> Result<()> {
    if !registry.has_behavior(behavior_type) {
        return Err(RefactorError::not_found("behavior type", behavior_type));
    }
    match object.behavior(name).map(|b| b.type_name != behavior_type) {
        Some(true) => return Err(RefactorError::name_taken("behavior", name)),
        Some(false) => {}
        None => {
            object.add_behavior(new_behavior(registry, name, behavior_type));
        }
    }

    let mut pending = VecDeque::from([name.to_string()]);
    let mut visited: FxHashSet<String> = FxHashSet::default();
    visited.insert(behavior_type.to_string());

    while let Some(behavior_name) = pending.pop_front() {
        let Some(current_type) = object.behavior(&behavior_name).map(|b| b.type_name.clone()) else {
            continue;
        };
        for required in registry.behavior_required_properties(&current_type) {
            let already_filled = object
                .behavior(&behavior_name)
                .is_some_and(|b| is_filled(object, b, &required.name, &required.behavior_type));
            if already_filled {
                continue;
            }

            let dependency = match object.behavior_of_type(&required.behavior_type) {
                Some(existing) => existing.name.clone(),
                None => {
                    if !registry.has_behavior(&required.behavior_type) {
                        warn!(
                            "[REQUIRED_BEHAVIORS] unknown behavior type '{}' required by '{}'",
                            required.behavior_type, current_type
                        );
                        continue;
                    }
                    let base = registry
                        .behavior_default_name(&required.behavior_type)
                        .unwrap_or_else(|| last_segment(&required.behavior_type));
                    let dependency = free_behavior_name(object, base);
                    trace!(
                        "[REQUIRED_BEHAVIORS] adding '{}' ({}) to '{}'",
                        dependency, required.behavior_type, object.name
                    );
                    let behavior = new_behavior(registry, &dependency, &required.behavior_type);
                    object.add_behavior(behavior);
                    dependency
                }
            };

            if let Some(behavior) = object.behavior_mut(&behavior_name) {
                behavior.set_property(&required.name, &dependency);
            }
            if visited.insert(required.behavior_type.clone()) {
                pending.push_back(dependency);
            }
        }
    }
    Ok(())
}

/// A behavior with every declared property at its default value.
fn new_behavior(
    registry: &dyn MetadataRegistry,
    name: &str,
    behavior_type: &str,
) -> BehaviorContent {
    let mut behavior = BehaviorContent::new(name, behavior_type);
    if let Some(metadata) = registry.behavior(behavior_type) {
        for property in metadata.properties.iter() {
            behavior.set_property(&property.name, &property.value);
        }
    }
    behavior
}

fn last_segment(behavior_type: &str) -> &str {
    behavior_type.rsplit("::").next().unwrap_or(behavior_type)
}

/// `base`, or `base2`, `base3`... when taken.
fn free_behavior_name(object: &Object, base: &str) -> String {
    if !object.has_behavior_named(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !object.has_behavior_named(candidate))
        .unwrap_or_else(|| base.to_string())
}
