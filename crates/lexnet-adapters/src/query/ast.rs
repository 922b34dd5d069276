//! Query AST.

use std::fmt;

use lexnet_common::Category;
use lexnet_common::utils::error::Span;

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `taal`: the senses of a lemma.
    Lookup(UnitPattern),
    /// `taal has_hyperonym`: units related to a lemma.
    Related {
        /// The queried unit.
        unit: UnitPattern,
        /// Which relations, how deep.
        relation: RelationSpec,
    },
    /// `taal + spraak`: a path between two lemmas.
    Path {
        /// Start of the path.
        from: UnitPattern,
        /// Which relations, how deep.
        relation: RelationSpec,
        /// End of the path.
        to: UnitPattern,
    },
}

/// Selects lexical units by lemma, optionally narrowed by category and
/// sense number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPattern {
    /// The lemma, unquoted.
    pub lemma: String,
    /// Category, if given.
    pub category: Option<Category>,
    /// Sense number, if given.
    pub sense: Option<u32>,
    /// Where the pattern appears in the query.
    pub span: Span,
}

impl UnitPattern {
    /// A pattern matching every sense of `lemma`.
    pub fn lemma(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            category: None,
            sense: None,
            span: Span::default(),
        }
    }

    /// Whether the pattern names a single sense.
    #[must_use]
    pub fn is_specific(&self) -> bool {
        self.category.is_some() && self.sense.is_some()
    }
}

impl fmt::Display for UnitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lemma.contains(|c: char| c.is_whitespace() || c == ':') {
            write!(f, "\"{}\"", self.lemma)?;
        } else {
            f.write_str(&self.lemma)?;
        }
        match (self.category, self.sense) {
            (Some(category), Some(sense)) => write!(f, ":{category}:{sense}"),
            (Some(category), None) => write!(f, ":{category}"),
            (None, Some(sense)) => write!(f, "::{sense}"),
            (None, None) => Ok(()),
        }
    }
}

/// How deep a relation query or path search may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthSpec {
    /// No depth given; the relation decides.
    #[default]
    Default,
    /// An explicit depth, 1 to 9.
    Exactly(u8),
    /// `+`: the depth ceiling.
    Max,
}

/// The relation part of a query: `has_hyperonym`, `has_hyperonym3`, `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSpec {
    /// Relation name as written; `None` means every relation.
    pub name: Option<String>,
    /// Requested depth.
    pub depth: DepthSpec,
    /// Where the relation appears in the query.
    pub span: Span,
}

impl RelationSpec {
    /// Every relation, up to the ceiling.
    #[must_use]
    pub fn any() -> Self {
        Self {
            name: None,
            depth: DepthSpec::Max,
            span: Span::default(),
        }
    }
}

impl fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        match self.depth {
            DepthSpec::Default => Ok(()),
            DepthSpec::Exactly(depth) => write!(f, "{depth}"),
            DepthSpec::Max => f.write_str("+"),
        }
    }
}
