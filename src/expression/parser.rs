//! Call-node grammar.
//!
//! An expression is scanned into a flat sequence of literal spans and call
//! nodes. Only identifier chains are structured; operators, numbers and
//! strings stay literal. The recognized chains are:
//!
//! ```text
//! Extension::Function(args)          FreeFunctionCall
//! Object.Behavior::Method(args)      BehaviorMethodCall
//! Object.Behavior::Method            BehaviorMethodRef
//! Object.Behavior::SetPropertyP(..)  PropertyAccessor (also PropertyP, with or without args)
//! Object.Function(args)              ObjectFunctionCall
//! Name, Name.Child.Child             Identifier
//! ```
//!
//! Any other chain, such as `Object::Behavior.Method(args)`, is literal text.
//! So is a chain followed by an argument list that never closes.

use text_size::TextRange;

use super::lexer::{Token, TokenKind, tokenize};
use crate::base::constants::{PROPERTY_PREFIX, SET_PROPERTY_PREFIX};

/// Nesting limit for argument lists. Deeper calls are left literal.
const MAX_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// `Property<Name>`, the condition and expression reading the property.
    Getter,
    /// `SetProperty<Name>`, the action writing the property.
    Setter,
}

impl AccessorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Getter => PROPERTY_PREFIX,
            AccessorKind::Setter => SET_PROPERTY_PREFIX,
        }
    }

    /// The accessor kind and property named by a behavior method name.
    pub fn parse(method: &str) -> Option<(AccessorKind, &str)> {
        let (kind, property) = if let Some(rest) = method.strip_prefix(SET_PROPERTY_PREFIX) {
            (AccessorKind::Setter, rest)
        } else {
            (AccessorKind::Getter, method.strip_prefix(PROPERTY_PREFIX)?)
        };
        (!property.is_empty()).then_some((kind, property))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallShape {
    FreeFunctionCall,
    BehaviorMethodCall,
    BehaviorMethodRef,
    PropertyAccessor(AccessorKind),
    ObjectFunctionCall,
    Identifier,
}

/// One identifier of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamePart<'s> {
    pub text: &'s str,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument<'s> {
    /// Everything between the delimiters, surrounding whitespace included.
    pub slot: TextRange,
    /// The slot without its surrounding whitespace.
    pub range: TextRange,
    pub segments: Vec<Segment<'s>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentList<'s> {
    pub open: TextRange,
    pub close: TextRange,
    pub arguments: Vec<Argument<'s>>,
}

impl ArgumentList<'_> {
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

/// A recognized chain, with its parts and arguments.
///
/// `object` is set for the object-prefixed shapes, `qualifier` holds the
/// extension of a free function or the behavior of a behavior method, and
/// `name` is the function, method, or for identifiers the head name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallNode<'s> {
    pub shape: CallShape,
    pub range: TextRange,
    pub object: Option<NamePart<'s>>,
    pub qualifier: Option<NamePart<'s>>,
    pub name: NamePart<'s>,
    pub arguments: Option<ArgumentList<'s>>,
}

impl<'s> CallNode<'s> {
    pub fn object_name(&self) -> Option<&'s str> {
        self.object.map(|o| o.text)
    }

    pub fn qualifier_name(&self) -> Option<&'s str> {
        self.qualifier.map(|q| q.text)
    }

    /// The property read or written by a property accessor.
    pub fn accessed_property(&self) -> Option<&'s str> {
        match self.shape {
            CallShape::PropertyAccessor(_) => AccessorKind::parse(self.name.text).map(|(_, p)| p),
            _ => None,
        }
    }

    /// Whether the node names a behavior method, call, reference or accessor.
    pub fn is_behavior_method(&self) -> bool {
        matches!(
            self.shape,
            CallShape::BehaviorMethodCall
                | CallShape::BehaviorMethodRef
                | CallShape::PropertyAccessor(_)
        )
    }

    /// The object the node starts from: the prefix of object-prefixed shapes,
    /// the head of an identifier chain.
    pub fn head_object(&self) -> Option<NamePart<'s>> {
        match self.shape {
            CallShape::Identifier => Some(self.name),
            CallShape::FreeFunctionCall => None,
            _ => self.object,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'s> {
    Literal(TextRange),
    Node(CallNode<'s>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression<'s> {
    pub source: &'s str,
    pub segments: Vec<Segment<'s>>,
}

impl<'s> Expression<'s> {
    /// Every call node, nested ones included, in textual order.
    pub fn nodes(&self) -> Vec<&CallNode<'s>> {
        let mut nodes = Vec::new();
        collect_nodes(&self.segments, &mut nodes);
        nodes
    }
}

fn collect_nodes<'e, 's>(segments: &'e [Segment<'s>], nodes: &mut Vec<&'e CallNode<'s>>) {
    for segment in segments {
        if let Segment::Node(node) = segment {
            nodes.push(node);
            if let Some(arguments) = &node.arguments {
                for argument in &arguments.arguments {
                    collect_nodes(&argument.segments, nodes);
                }
            }
        }
    }
}

/// Scan an expression into literal spans and call nodes.
///
/// Never fails: anything that is not a recognized chain is literal.
pub fn parse(source: &str) -> Expression<'_> {
    let tokens = tokenize(source);
    let matching = matching_parens(&tokens);
    let mut parser = Parser {
        tokens,
        matching,
        pos: 0,
        depth: 0,
    };
    let end = parser.tokens.len();
    let segments = parser.parse_sequence(end, false);
    Expression { source, segments }
}

/// For each `(` token, the index of its closing `)`.
fn matching_parens(tokens: &[Token<'_>]) -> Vec<Option<usize>> {
    let mut matching = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => open.push(index),
            TokenKind::RParen => {
                if let Some(start) = open.pop() {
                    matching[start] = Some(index);
                }
            }
            _ => {}
        }
    }
    matching
}

struct Parser<'s> {
    tokens: Vec<Token<'s>>,
    matching: Vec<Option<usize>>,
    pos: usize,
    depth: usize,
}

/// Identifiers of a chain and the separators between them.
struct Chain<'s> {
    parts: Vec<NamePart<'s>>,
    separators: Vec<TokenKind>,
    /// Index of the last token of the chain.
    last: usize,
}

impl<'s> Parser<'s> {
    // ========================================================================
    // SEQUENCES
    // ========================================================================

    /// Parse tokens up to `end`, or up to a top-level comma when parsing an
    /// argument.
    fn parse_sequence(&mut self, end: usize, in_argument: bool) -> Vec<Segment<'s>> {
        let mut segments = Vec::new();
        let mut grouping = 0usize;
        while self.pos < end {
            let token = self.tokens[self.pos];
            match token.kind {
                TokenKind::Comma if in_argument && grouping == 0 => break,
                TokenKind::LParen => {
                    grouping += 1;
                    self.literal(&mut segments, self.pos);
                }
                TokenKind::RParen => {
                    grouping = grouping.saturating_sub(1);
                    self.literal(&mut segments, self.pos);
                }
                TokenKind::Ident if self.is_chain_start(self.pos) => {
                    self.parse_chain(end, &mut segments);
                }
                _ => self.literal(&mut segments, self.pos),
            }
        }
        segments
    }

    /// Push the token at `index` as literal text and move past it.
    fn literal(&mut self, segments: &mut Vec<Segment<'s>>, index: usize) {
        push_literal(segments, self.tokens[index].range);
        self.pos = index + 1;
    }

    fn is_chain_start(&self, index: usize) -> bool {
        index == 0
            || !matches!(
                self.tokens[index - 1].kind,
                TokenKind::Dot | TokenKind::ColonColon
            )
    }

    // ========================================================================
    // CHAINS
    // ========================================================================

    fn collect_chain(&self, start: usize, end: usize) -> Chain<'s> {
        let first = self.tokens[start];
        let mut chain = Chain {
            parts: vec![NamePart {
                text: first.text,
                range: first.range,
            }],
            separators: Vec::new(),
            last: start,
        };
        loop {
            let separator = chain.last + 1;
            let ident = chain.last + 2;
            if ident >= end {
                break;
            }
            let kind = self.tokens[separator].kind;
            if !matches!(kind, TokenKind::Dot | TokenKind::ColonColon)
                || self.tokens[ident].kind != TokenKind::Ident
            {
                break;
            }
            chain.separators.push(kind);
            chain.parts.push(NamePart {
                text: self.tokens[ident].text,
                range: self.tokens[ident].range,
            });
            chain.last = ident;
        }
        chain
    }

    /// Parse the chain starting at the current token, as a node or as literal text.
    fn parse_chain(&mut self, end: usize, segments: &mut Vec<Segment<'s>>) {
        let start = self.pos;
        let chain = self.collect_chain(start, end);
        let chain_range = TextRange::new(
            self.tokens[start].range.start(),
            self.tokens[chain.last].range.end(),
        );

        // A dangling separator means a longer, unrecognized chain.
        let after = chain.last + 1;
        if after < end
            && matches!(
                self.tokens[after].kind,
                TokenKind::Dot | TokenKind::ColonColon
            )
        {
            self.literal_chain(segments, chain_range, chain.last);
            return;
        }

        let open = self.skip_whitespace(after, end);
        let has_open = open < end && self.tokens[open].kind == TokenKind::LParen;
        let close = if has_open {
            self.matching[open].filter(|&close| close < end)
        } else {
            None
        };

        if has_open && (close.is_none() || self.depth >= MAX_DEPTH) {
            self.literal_chain(segments, chain_range, chain.last);
            return;
        }

        let Some(shape) = shape_of(&chain.separators, &chain.parts, close.is_some()) else {
            self.literal_chain(segments, chain_range, chain.last);
            return;
        };

        let (range, arguments) = match close {
            Some(close) => {
                let arguments = self.parse_arguments(open, close);
                let range = TextRange::new(chain_range.start(), self.tokens[close].range.end());
                self.pos = close + 1;
                (range, Some(arguments))
            }
            None => {
                self.pos = chain.last + 1;
                (chain_range, None)
            }
        };

        let parts = &chain.parts;
        let (object, qualifier, name) = match shape {
            CallShape::FreeFunctionCall => (None, Some(parts[0]), parts[1]),
            CallShape::BehaviorMethodCall
            | CallShape::BehaviorMethodRef
            | CallShape::PropertyAccessor(_) => (Some(parts[0]), Some(parts[1]), parts[2]),
            CallShape::ObjectFunctionCall => (Some(parts[0]), None, parts[1]),
            CallShape::Identifier => (None, None, parts[0]),
        };

        segments.push(Segment::Node(CallNode {
            shape,
            range,
            object,
            qualifier,
            name,
            arguments,
        }));
    }

    fn literal_chain(&mut self, segments: &mut Vec<Segment<'s>>, range: TextRange, last: usize) {
        push_literal(segments, range);
        self.pos = last + 1;
    }

    fn skip_whitespace(&self, mut index: usize, end: usize) -> usize {
        while index < end && self.tokens[index].kind == TokenKind::Whitespace {
            index += 1;
        }
        index
    }

    // ========================================================================
    // ARGUMENTS
    // ========================================================================

    fn parse_arguments(&mut self, open: usize, close: usize) -> ArgumentList<'s> {
        self.depth += 1;
        let mut arguments = Vec::new();
        self.pos = open + 1;
        let mut slot_start = self.tokens[open].range.end();
        loop {
            let segments = self.parse_sequence(close, true);
            let delimiter = self.tokens[self.pos.min(close)];
            let slot = TextRange::new(slot_start, delimiter.range.start());
            arguments.push(Argument {
                slot,
                range: self.trimmed(slot),
                segments,
            });
            if self.pos >= close {
                break;
            }
            // Past the comma
            slot_start = delimiter.range.end();
            self.pos += 1;
        }
        self.depth -= 1;

        // `()` has no arguments.
        if let [only] = arguments.as_slice() {
            if only.range.is_empty() {
                arguments.clear();
            }
        }

        ArgumentList {
            open: self.tokens[open].range,
            close: self.tokens[close].range,
            arguments,
        }
    }

    /// `range` without leading and trailing whitespace tokens.
    fn trimmed(&self, range: TextRange) -> TextRange {
        let mut inner = self
            .tokens
            .iter()
            .filter(|t| range.contains_range(t.range) && t.kind != TokenKind::Whitespace);
        match inner.next() {
            None => TextRange::empty(range.start()),
            Some(first) => {
                let end = inner.last().unwrap_or(first).range.end();
                TextRange::new(first.range.start(), end)
            }
        }
    }
}

/// The shape of a chain, from its separators and whether it has arguments.
fn shape_of(
    separators: &[TokenKind],
    parts: &[NamePart<'_>],
    has_arguments: bool,
) -> Option<CallShape> {
    use TokenKind::{ColonColon, Dot};
    match (separators, has_arguments) {
        ([], false) => Some(CallShape::Identifier),
        ([ColonColon], true) => Some(CallShape::FreeFunctionCall),
        ([Dot], true) => Some(CallShape::ObjectFunctionCall),
        ([Dot, ColonColon], _) => Some(match AccessorKind::parse(parts[2].text) {
            Some((kind, _)) => CallShape::PropertyAccessor(kind),
            None if has_arguments => CallShape::BehaviorMethodCall,
            None => CallShape::BehaviorMethodRef,
        }),
        (dots, false) if dots.iter().all(|s| *s == Dot) => Some(CallShape::Identifier),
        _ => None,
    }
}

/// Push a literal range, merging it with a directly preceding literal.
fn push_literal(segments: &mut Vec<Segment<'_>>, range: TextRange) {
    if let Some(Segment::Literal(previous)) = segments.last_mut() {
        if previous.end() == range.start() {
            *previous = previous.cover(range);
            return;
        }
    }
    segments.push(Segment::Literal(range));
}
