//! Rewrite rules applied to the events of one document.
//!
//! An [`EventsRewriter`] combines up to three independent rewrites:
//! an instruction type rename, a parameter move for one instruction type, and
//! expression rules. Expression rules pair a [`CallMatcher`], which decides
//! with the document's scope whether a call node refers to the renamed
//! entity, with the [`Transform`] to apply to it.

use std::borrow::Cow;

use tracing::trace;

use super::instruction_type::TypeRename;
use crate::expression::{CallNode, CallShape, Transform, moved_order, rewrite_expression};
use crate::metadata::MetadataRegistry;
use crate::project::{EventsList, Instruction};
use crate::scope::{IdentifierKind, ScopedContainers};

/// Which call nodes refer to the entity being refactored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallMatcher {
    /// `Extension::Name(..)`
    FreeFunction { extension: String, name: String },
    /// Any `Extension::*(..)` free function call.
    ExtensionQualifier { extension: String },
    /// `Object.Behavior::Method(..)` or the bare reference, where the object's
    /// `Behavior` is of type `behavior_type`. The method name matches exactly.
    BehaviorMethod {
        behavior_type: String,
        method: String,
    },
    /// The property accessors of `property`, on a behavior of `behavior_type`.
    BehaviorProperty {
        behavior_type: String,
        property: String,
    },
    /// Any node starting from object or group `name`, declared by the
    /// scope's container at index `container`.
    ObjectOrGroup { name: String, container: usize },
    /// A bare identifier naming a property of the enclosing behavior.
    BareProperty { name: String },
}

impl CallMatcher {
    pub fn matches(&self, node: &CallNode<'_>, scope: &ScopedContainers<'_>) -> bool {
        match self {
            CallMatcher::FreeFunction { extension, name } => {
                node.shape == CallShape::FreeFunctionCall
                    && node.qualifier_name() == Some(extension.as_str())
                    && node.name.text == name
            }
            CallMatcher::ExtensionQualifier { extension } => {
                node.shape == CallShape::FreeFunctionCall
                    && node.qualifier_name() == Some(extension.as_str())
            }
            CallMatcher::BehaviorMethod {
                behavior_type,
                method,
            } => {
                // `Property*` names are accessor-shaped but may be plain methods
                node.is_behavior_method()
                    && node.name.text == method
                    && behavior_type_of(node, scope) == Some(behavior_type.as_str())
            }
            CallMatcher::BehaviorProperty {
                behavior_type,
                property,
            } => {
                node.accessed_property() == Some(property.as_str())
                    && behavior_type_of(node, scope) == Some(behavior_type.as_str())
            }
            CallMatcher::ObjectOrGroup { name, container } => {
                if !node.head_object().is_some_and(|o| o.text == name) {
                    return false;
                }
                // Unresolved once the declaration itself was renamed
                match scope.classify(name) {
                    IdentifierKind::Unresolved => true,
                    IdentifierKind::ObjectOrGroup => {
                        scope.objects().container_of_object_or_group(name) == Some(*container)
                    }
                    IdentifierKind::Variable | IdentifierKind::Property => false,
                }
            }
            CallMatcher::BareProperty { name } => {
                node.shape == CallShape::Identifier
                    && node.name.text == name
                    && matches!(
                        scope.classify(name),
                        IdentifierKind::Property | IdentifierKind::Unresolved
                    )
            }
        }
    }
}

/// The type of the behavior a behavior-method node goes through.
fn behavior_type_of<'a>(node: &CallNode<'_>, scope: &ScopedContainers<'a>) -> Option<&'a str> {
    let object = node.object_name()?;
    let behavior = node.qualifier_name()?;
    scope.objects().behavior_type_of(object, behavior)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionRule {
    pub matcher: CallMatcher,
    pub transform: Transform,
}

impl ExpressionRule {
    pub fn new(matcher: CallMatcher, transform: Transform) -> Self {
        Self { matcher, transform }
    }
}

/// Reordering of the parameters of every instruction of one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterMove {
    pub instruction_type: String,
    pub from: usize,
    pub to: usize,
}

/// Applies a set of rewrites to events, given each document's scope.
pub struct EventsRewriter<'r> {
    registry: &'r dyn MetadataRegistry,
    type_rename: Option<TypeRename>,
    parameter_move: Option<ParameterMove>,
    rules: Vec<ExpressionRule>,
}

impl<'r> EventsRewriter<'r> {
    pub fn new(registry: &'r dyn MetadataRegistry) -> Self {
        Self {
            registry,
            type_rename: None,
            parameter_move: None,
            rules: Vec::new(),
        }
    }

    pub fn with_type_rename(mut self, rename: TypeRename) -> Self {
        self.type_rename = Some(rename);
        self
    }

    pub fn with_parameter_move(mut self, parameter_move: ParameterMove) -> Self {
        self.parameter_move = Some(parameter_move);
        self
    }

    pub fn with_rule(mut self, rule: ExpressionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rewrite every event, instruction and expression of `events`.
    pub fn rewrite_events(&self, events: &mut EventsList, scope: &ScopedContainers<'_>) {
        if !self.rules.is_empty() {
            events.for_each_event_mut(&mut |event| {
                for expression in event.expressions_mut() {
                    self.rewrite_text(expression, scope);
                }
                if let Some(object) = event.object_reference_mut() {
                    self.rewrite_text(object, scope);
                }
            });
        }
        events.for_each_instruction_mut(&mut |instruction, _| {
            self.rewrite_instruction(instruction, scope);
        });
    }

    fn rewrite_instruction(&self, instruction: &mut Instruction, scope: &ScopedContainers<'_>) {
        let renamed_type = self
            .type_rename
            .as_ref()
            .and_then(|rename| rename.apply(&instruction.type_name));

        if !self.rules.is_empty() {
            // The registry may still know the function under its old name, or
            // already under the new one.
            let kinds = self
                .registry
                .instruction_parameter_kinds(&instruction.type_name)
                .or_else(|| {
                    renamed_type
                        .as_deref()
                        .and_then(|t| self.registry.instruction_parameter_kinds(t))
                });
            for (index, parameter) in instruction.parameters.iter_mut().enumerate() {
                let kind = kinds.and_then(|kinds| kinds.get(index));
                if kind.is_none_or(|k| k.is_expression() || k.is_object()) {
                    self.rewrite_text(parameter, scope);
                }
            }
        }

        if let Some(parameter_move) = &self.parameter_move {
            if instruction.type_name == parameter_move.instruction_type {
                let count = instruction.parameters.len();
                if let Some(order) = moved_order(count, parameter_move.from, parameter_move.to) {
                    let parameters = std::mem::take(&mut instruction.parameters);
                    let mut parameters: Vec<Option<String>> =
                        parameters.into_iter().map(Some).collect();
                    instruction.parameters = order
                        .iter()
                        .map(|&index| parameters[index].take().unwrap_or_default())
                        .collect();
                    trace!(
                        "[REWRITE] moved parameter {} -> {} of '{}'",
                        parameter_move.from, parameter_move.to, instruction.type_name
                    );
                }
            }
        }

        if let Some(renamed_type) = renamed_type {
            trace!(
                "[REWRITE] instruction type '{}' -> '{}'",
                instruction.type_name, renamed_type
            );
            instruction.type_name = renamed_type;
        }
    }

    /// Apply every expression rule to `text`, in order.
    fn rewrite_text(&self, text: &mut String, scope: &ScopedContainers<'_>) {
        for rule in &self.rules {
            let rewritten = match rewrite_expression(
                text,
                |node| rule.matcher.matches(node, scope),
                &rule.transform,
            ) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            trace!("[REWRITE] expression '{}' -> '{}'", text, rewritten);
            *text = rewritten;
        }
    }
}
