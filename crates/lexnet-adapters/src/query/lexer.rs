//! Query lexer.
//!
//! Queries are whitespace-separated words. A double-quoted stretch is part
//! of the word it appears in and may contain whitespace, so `"ad hoc":adj`
//! is a single word.

use lexnet_common::utils::error::Span;

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word.
    Word,
    /// A word whose quote is never closed.
    UnterminatedQuote,
    /// End of input.
    Eof,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The raw source text, quotes included.
    pub text: String,
    /// Byte span in the query.
    pub span: Span,
}

/// Splits a query into tokens.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the next token; [`TokenKind::Eof`] once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.position;
        if start >= self.input.len() {
            return Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span: Span::new(start, start),
            };
        }

        let mut kind = TokenKind::Word;
        let mut in_quote = false;
        for (offset, c) in self.input[start..].char_indices() {
            if c == '"' {
                in_quote = !in_quote;
            } else if c.is_whitespace() && !in_quote {
                self.position = start + offset;
                return self.token(kind, start);
            }
        }
        if in_quote {
            kind = TokenKind::UnterminatedQuote;
        }
        self.position = self.input.len();
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.input[start..self.position].to_string(),
            span: Span::new(start, self.position),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
    }
}
