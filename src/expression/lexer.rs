//! Logos-based lexer for expression text.
//!
//! The lexer never fails: characters outside of the grammar become
//! [`TokenKind::Error`] tokens, which the parser passes through as literal text.

use logos::Logos;
use text_size::{TextRange, TextSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Ident,
    Number,
    String,
    ColonColon,
    Dot,
    LParen,
    RParen,
    Comma,
    /// Operators and any other single punctuation character.
    Punct,
    Error,
}

/// A token with its kind, text, and position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let start = TextSize::new(self.offset);
        self.offset += text.len() as u32;
        let range = TextRange::new(start, TextSize::new(self.offset));

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, range })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    /// A string missing its closing quote, up to the end of the text.
    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("::")]
    ColonColon,

    #[token(".")]
    Dot,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[regex(r"[+\-*/%<>=!&|?^~;:@#$'\[\]{}]")]
    Punct,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => TokenKind::Whitespace,
            Ident => TokenKind::Ident,
            Number => TokenKind::Number,
            String | UnterminatedString => TokenKind::String,
            ColonColon => TokenKind::ColonColon,
            Dot => TokenKind::Dot,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            Comma => TokenKind::Comma,
            Punct => TokenKind::Punct,
        }
    }
}
