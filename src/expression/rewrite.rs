//! Rewriting of call nodes inside expression text.
//!
//! The rewriter re-emits the expression in a single left-to-right pass.
//! Literal text and nodes that do not match are copied verbatim; a matching
//! node gets only its targeted part replaced, or its arguments reordered.
//! Arguments are always visited, so nested calls are rewritten too.

use std::borrow::Cow;

use text_size::TextRange;

use super::parser::{Argument, CallNode, CallShape, Segment, parse};

/// What to change in a matching node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    /// Replace the function, method, or identifier name.
    RenameName(String),
    /// Replace the extension of a free function, or the behavior of a
    /// behavior method.
    RenameQualifier(String),
    /// Replace the object prefix, or the head of an identifier chain.
    RenameObject(String),
    /// Replace the property named by a property accessor, keeping its prefix.
    RenameProperty(String),
    /// Move the argument at `from` to `to`, shifting the others.
    MoveArgument { from: usize, to: usize },
    Noop,
}

/// Rewrite every node of `source` accepted by `matcher`.
///
/// Returns the source unchanged (borrowed) when nothing was rewritten.
pub fn rewrite_expression<'s, M>(source: &'s str, matcher: M, transform: &Transform) -> Cow<'s, str>
where
    M: Fn(&CallNode<'_>) -> bool,
{
    let expression = parse(source);
    let mut rewriter = Rewriter {
        source,
        matcher: &matcher,
        transform,
        out: String::with_capacity(source.len()),
    };
    rewriter.emit_segments(&expression.segments, None);

    if rewriter.out == source {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(rewriter.out)
    }
}

/// The order of `count` arguments once `from` is moved to `to`, or `None`
/// when either index is out of range.
pub fn moved_order(count: usize, from: usize, to: usize) -> Option<Vec<usize>> {
    if from >= count || to >= count {
        return None;
    }
    let mut order: Vec<usize> = (0..count).collect();
    let moved = order.remove(from);
    order.insert(to, moved);
    Some(order)
}

struct Rewriter<'a, 's> {
    source: &'s str,
    matcher: &'a dyn Fn(&CallNode<'_>) -> bool,
    transform: &'a Transform,
    out: String,
}

impl<'s> Rewriter<'_, 's> {
    fn push(&mut self, range: TextRange) {
        self.out.push_str(&self.source[range]);
    }

    /// Emit segments, keeping only the text inside `clip` when given.
    fn emit_segments(&mut self, segments: &[Segment<'s>], clip: Option<TextRange>) {
        for segment in segments {
            match segment {
                Segment::Literal(range) => {
                    let range = match clip {
                        Some(clip) => match range.intersect(clip) {
                            Some(range) => range,
                            None => continue,
                        },
                        None => *range,
                    };
                    self.push(range);
                }
                Segment::Node(node) => self.emit_node(node),
            }
        }
    }

    fn emit_node(&mut self, node: &CallNode<'s>) {
        let matched = (self.matcher)(node);
        let head_end = node
            .arguments
            .as_ref()
            .map_or(node.range.end(), |a| a.open.start());
        let head = TextRange::new(node.range.start(), head_end);

        match self.head_replacement(node, matched) {
            Some((part, text)) => {
                self.push(TextRange::new(head.start(), part.start()));
                self.out.push_str(&text);
                self.push(TextRange::new(part.end(), head.end()));
            }
            None => self.push(head),
        }

        let Some(arguments) = &node.arguments else {
            return;
        };
        let order = match self.transform {
            Transform::MoveArgument { from, to } if matched => {
                moved_order(arguments.len(), *from, *to)
            }
            _ => None,
        };

        self.push(arguments.open);
        let count = arguments.arguments.len();
        for (position, slot) in arguments.arguments.iter().enumerate() {
            let content = match &order {
                Some(order) => &arguments.arguments[order[position]],
                None => slot,
            };
            // The slot keeps its own surrounding whitespace.
            self.push(TextRange::new(slot.slot.start(), slot.range.start()));
            self.emit_argument(content);
            self.push(TextRange::new(slot.range.end(), slot.slot.end()));
            if position + 1 < count {
                let next = &arguments.arguments[position + 1];
                self.push(TextRange::new(slot.slot.end(), next.slot.start()));
            }
        }
        if count == 0 {
            // `( )`: whatever sits between the parentheses
            self.push(TextRange::new(arguments.open.end(), arguments.close.start()));
        }
        self.push(arguments.close);
    }

    fn emit_argument(&mut self, argument: &Argument<'s>) {
        self.emit_segments(&argument.segments, Some(argument.range));
    }

    /// The part of the node head to replace, and its replacement.
    fn head_replacement(&self, node: &CallNode<'s>, matched: bool) -> Option<(TextRange, String)> {
        if !matched {
            return None;
        }
        match self.transform {
            Transform::RenameName(name) => Some((node.name.range, name.clone())),
            Transform::RenameQualifier(name) => node.qualifier.map(|q| (q.range, name.clone())),
            Transform::RenameObject(name) => node.head_object().map(|o| (o.range, name.clone())),
            Transform::RenameProperty(property) => match node.shape {
                CallShape::PropertyAccessor(kind) => {
                    Some((node.name.range, format!("{}{}", kind.prefix(), property)))
                }
                _ => None,
            },
            Transform::MoveArgument { .. } | Transform::Noop => None,
        }
    }
}
