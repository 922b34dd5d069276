//! # lexnet-common
//!
//! Foundation types shared by every lexnet crate.
//!
//! - [`types`] - identifiers ([`UnitId`](types::UnitId), [`SynsetId`](types::SynsetId),
//!   [`RelationId`](types::RelationId)) and word categories
//! - [`collections`] - FxHash-backed map and set aliases
//! - [`utils`] - the error taxonomy and "did you mean" helpers

pub mod collections;
pub mod types;
pub mod utils;

pub use types::{Category, CountCategory, NodeRef, RelationId, SynsetId, UnitId};
pub use utils::error::{Error, Result};
