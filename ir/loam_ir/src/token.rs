//! Token stream for dialect parse hooks.
//!
//! Lexes attribute syntax with logos up front, then exposes the small
//! set of primitives parse hooks are written against: optional `<`/`>`
//! delimiters, commas, attribute values, and identifiers. Errors carry
//! the span of the offending token.

use logos::Logos;
use thiserror::Error;

use crate::{Attribute, Name, Span, StringInterner};

/// Parse failure at a source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Location of the offending token.
    pub span: Span,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    /// Create a parse error at a span.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        ParseError {
            span,
            message: message.into(),
        }
    }
}

/// Token kinds recognized in attribute syntax.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token(",")]
    Comma,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[regex(r"-?[0-9]+")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    // Identifiers may be dotted (`dialect.name`).
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*")]
    Ident,
}

/// A lexed token: kind plus source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    span: Span,
}

/// Stream of tokens over one source slice.
///
/// Single-owner: parse hooks advance the stream; it is never shared
/// between threads.
#[derive(Debug)]
pub struct TokenStream<'a> {
    src: &'a str,
    interner: &'a StringInterner,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Lex `src` into a token stream.
    ///
    /// Fails on the first byte sequence that is not a valid token.
    pub fn new(src: &'a str, interner: &'a StringInterner) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        let mut lexer = TokenKind::lexer(src);
        while let Some(result) = lexer.next() {
            let span = Span::try_from_range(lexer.span())
                .map_err(|e| ParseError::new(Span::DUMMY, e.to_string()))?;
            match result {
                Ok(kind) => tokens.push(Token { kind, span }),
                Err(()) => return Err(ParseError::new(span, "invalid token")),
            }
        }
        Ok(TokenStream {
            src,
            interner,
            tokens,
            pos: 0,
        })
    }

    /// Span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(token) => token.span,
            None => Span::from_range(self.src.len()..self.src.len()),
        }
    }

    /// Whether all tokens have been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Build a parse error at the current position.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.current_span(), message)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().map(|t| t.kind) == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a `<` if present.
    pub fn eat_less(&mut self) -> bool {
        self.eat(TokenKind::Less)
    }

    /// Consume a `>` if present.
    pub fn eat_greater(&mut self) -> bool {
        self.eat(TokenKind::Greater)
    }

    /// Consume a `,` if present.
    pub fn eat_comma(&mut self) -> bool {
        self.eat(TokenKind::Comma)
    }

    /// Consume a `,`, or fail.
    pub fn expect_comma(&mut self) -> Result<(), ParseError> {
        if self.eat_comma() {
            Ok(())
        } else {
            Err(self.error("expected `,`"))
        }
    }

    /// Consume an identifier if present, returning it interned.
    pub fn eat_ident(&mut self) -> Option<Name> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Ident => {
                self.pos += 1;
                Some(self.interner.intern(self.text(token)))
            }
            _ => None,
        }
    }

    /// Parse one attribute value: an integer, `true`/`false`, or a
    /// quoted string.
    pub fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.error("expected attribute value, found end of input"));
        };
        let attr = match token.kind {
            TokenKind::Int => {
                let text = self.text(token);
                let value: i64 = text
                    .parse()
                    .map_err(|_| ParseError::new(token.span, "integer attribute out of range"))?;
                Attribute::Int(value)
            }
            TokenKind::True => Attribute::Bool(true),
            TokenKind::False => Attribute::Bool(false),
            TokenKind::Str => {
                let content = self.unescape(token)?;
                Attribute::Str(self.interner.intern(&content))
            }
            _ => return Err(self.error("expected attribute value")),
        };
        self.pos += 1;
        Ok(attr)
    }

    /// Source text of a token.
    fn text(&self, token: Token) -> &'a str {
        &self.src[token.span.start as usize..token.span.end as usize]
    }

    /// Strip quotes and process `\\` and `\"` escapes in a string token.
    fn unescape(&self, token: Token) -> Result<String, ParseError> {
        let raw = self.text(token);
        let inner = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                _ => {
                    return Err(ParseError::new(
                        token.span,
                        "invalid escape in string attribute",
                    ))
                }
            }
        }
        Ok(out)
    }
}
