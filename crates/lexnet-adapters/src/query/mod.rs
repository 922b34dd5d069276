//! The query language.
//!
//! A query names a lemma and optionally a relation and a second lemma:
//!
//! | Query | Meaning |
//! |-------|---------|
//! | `taal` | senses of *taal* |
//! | `taal:noun:2` | one sense |
//! | `taal synonym` | synonyms |
//! | `taal has_hyperonym` | hyperonyms, transitively |
//! | `taal has_hyperonym2` | hyperonyms, two levels |
//! | `taal +` | everything reachable, up to the ceiling |
//! | `taal + spraak` | a path between two lemmas |
//!
//! Parsing only checks the grammar; relation names are resolved against the
//! graph when the query runs.

mod ast;
mod lexer;
mod parser;

pub use ast::{DepthSpec, Query, RelationSpec, UnitPattern};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use lexnet_common::utils::error::Result;

/// Parses a query string.
///
/// # Errors
///
/// Returns a syntax error with the byte span of the offending token.
pub fn parse_query(query: &str) -> Result<Query> {
    Parser::new(query).parse()
}

/// Parses a single unit pattern such as `taal:noun:1`.
///
/// # Errors
///
/// Returns a syntax error if `input` is not exactly one unit pattern.
pub fn parse_unit(input: &str) -> Result<UnitPattern> {
    Parser::new(input).parse_single_unit()
}
