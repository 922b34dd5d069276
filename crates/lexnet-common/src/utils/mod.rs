//! Common utilities used throughout lexnet.
//!
//! - [`error`] - [`Error`], [`LoadError`](error::LoadError) and [`QueryError`](error::QueryError)
//! - [`strings`] - suggestions for misspelled relation names

pub mod error;
pub mod strings;

pub use error::{Error, Result};
