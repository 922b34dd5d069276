//! Core types: identifiers and word categories.

mod category;
mod id;

pub use category::{Category, CountCategory};
pub use id::{NodeRef, RelationId, SynsetId, UnitId};
