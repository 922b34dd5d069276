//! # lexnet-adapters
//!
//! The edges of lexnet: reading the source files and reading queries.
//!
//! - [`source`] - streaming readers for the lexical-unit and synset XML
//!   extracts and the word-count table, and [`load_graph`](source::load_graph)
//!   which turns them into a [`LexicalGraph`](lexnet_core::LexicalGraph)
//! - [`query`] - lexer and parser for the query language

pub mod query;
pub mod source;

pub use query::{DepthSpec, Query, RelationSpec, UnitPattern, parse_query, parse_unit};
pub use source::{Source, load_graph};
