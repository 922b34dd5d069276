//! Error types for lexnet.
//!
//! [`Error`] is what every public operation returns. Load failures carry the
//! byte position of the offending element; query failures carry the span of
//! the offending token so callers can point at it.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout lexnet.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// The sources could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The query could not be parsed or refers to something unknown.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A similarity measure was requested but no word counts were loaded.
    #[error("similarity needs word counts, but none were loaded")]
    MissingCounts,

    /// A selector matched several lexical units where exactly one is needed.
    #[error("'{selector}' matches {} lexical units: {}", .candidates.len(), .candidates.join(", "))]
    AmbiguousLemma {
        /// The selector as given.
        selector: String,
        /// Unit specs of every match.
        candidates: Vec<String>,
    },

    /// The network has not finished loading.
    #[error("lexical network is not ready ({0})")]
    NotReady(&'static str),

    /// `load` was called on a network that is loading or loaded.
    #[error("lexical network is already loaded")]
    AlreadyLoaded,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An argument is out of its accepted range.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Fatal problems while reading the sources.
///
/// `origin` names the source (a path, or a label for in-memory readers).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("cannot read {origin}: {source}")]
    Io {
        /// Source label.
        origin: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The XML itself is broken.
    #[error("{origin}: malformed XML at byte {position}: {message}")]
    Xml {
        /// Source label.
        origin: String,
        /// Byte offset where the reader gave up.
        position: u64,
        /// Reader diagnostic.
        message: String,
    },

    /// A required attribute is absent.
    #[error("{origin}: <{element}> at byte {position} lacks required attribute '{attribute}'")]
    MissingAttribute {
        /// Source label.
        origin: String,
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// Byte offset of the element.
        position: u64,
    },

    /// A required attribute is present but unusable.
    #[error("{origin}: <{element}> at byte {position} has invalid {attribute}='{value}'")]
    InvalidAttribute {
        /// Source label.
        origin: String,
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// The rejected value.
        value: String,
        /// Byte offset of the element.
        position: u64,
    },

    /// A required child element is absent.
    #[error("{origin}: <{parent}> at byte {position} has no <{element}>")]
    MissingElement {
        /// Source label.
        origin: String,
        /// Parent element name.
        parent: &'static str,
        /// Missing child element name.
        element: &'static str,
        /// Byte offset of the parent.
        position: u64,
    },

    /// Two lexical units share an id.
    #[error("{origin}: duplicate {kind} id '{id}' at byte {position}")]
    DuplicateId {
        /// Source label.
        origin: String,
        /// What kind of record.
        kind: &'static str,
        /// The repeated id.
        id: String,
        /// Byte offset of the second occurrence.
        position: u64,
    },

    /// The document is well-formed so far but structurally incomplete.
    #[error("{origin}: {message}")]
    Malformed {
        /// Source label.
        origin: String,
        /// What is wrong.
        message: String,
    },
}

/// Byte range inside a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What went wrong with a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// The query does not follow the grammar.
    Syntax,
    /// The query names a relation the graph does not have.
    UnknownRelation,
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::UnknownRelation => write!(f, "unknown relation"),
        }
    }
}

/// A query error with an optional source position and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Error category.
    pub kind: QueryErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Where in the query string.
    pub span: Option<Span>,
    /// "Did you mean" hint.
    pub suggestion: Option<String>,
}

impl QueryError {
    /// Creates a query error without position.
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            suggestion: None,
        }
    }

    /// Attaches the offending span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches a hint.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {}..{}", span.start, span.end)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". {suggestion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for QueryError {}
