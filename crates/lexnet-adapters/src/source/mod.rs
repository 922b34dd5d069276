//! Source readers.
//!
//! Both XML extracts are read with a streaming pull parser: each record is
//! handed to the [`GraphBuilder`] as soon as its closing tag is seen, and
//! nothing else of the document is kept. The lexical units must be read
//! before the synsets that list them.

mod counts;
mod lexical_units;
mod synsets;
mod xml;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;

use lexnet_common::utils::error::LoadError;
use lexnet_core::{GraphBuilder, LexicalGraph, LoadReport};

pub use counts::read_count_table;
pub use lexical_units::read_lexical_units;
pub use synsets::read_synsets;

/// Where a source is read from.
pub enum Source {
    /// A file on disk.
    Path(PathBuf),
    /// Any buffered reader, with a label for error messages.
    Reader {
        /// Shown in errors in place of a path.
        label: String,
        /// The data.
        reader: Box<dyn BufRead + Send>,
    },
}

impl Source {
    /// A file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// A buffered reader.
    pub fn reader(label: impl Into<String>, reader: impl BufRead + Send + 'static) -> Self {
        Self::Reader {
            label: label.into(),
            reader: Box::new(reader),
        }
    }

    /// In-memory text.
    pub fn text(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::reader(label, Cursor::new(text.into().into_bytes()))
    }

    /// The label used in errors.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Reader { label, .. } => label.clone(),
        }
    }

    pub(crate) fn open(self) -> Result<(String, Box<dyn BufRead + Send>), LoadError> {
        match self {
            Self::Path(path) => {
                let origin = path.display().to_string();
                let file = File::open(&path).map_err(|source| LoadError::Io {
                    origin: origin.clone(),
                    source,
                })?;
                Ok((origin, Box::new(BufReader::new(file))))
            }
            Self::Reader { label, reader } => Ok((label, reader)),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Reader { label, .. } => f.debug_struct("Reader").field("label", label).finish(),
        }
    }
}

/// Reads both XML extracts and, if given, overlays the word counts.
///
/// # Errors
///
/// Returns a [`LoadError`] for unreadable sources, broken XML, missing
/// required attributes or elements, and duplicate lexical unit ids. Other
/// inconsistencies are repaired and reported in the [`LoadReport`].
pub fn load_graph(
    lexical_units: Source,
    synsets: Source,
    counts: Option<Source>,
) -> Result<(LexicalGraph, LoadReport), LoadError> {
    tracing::info!(
        lexical_units = %lexical_units.label(),
        synsets = %synsets.label(),
        "loading lexical network"
    );
    let mut builder = GraphBuilder::new();
    read_lexical_units(lexical_units, &mut builder)?;
    read_synsets(synsets, &mut builder)?;
    let (mut graph, mut report) = builder.finish();

    if let Some(counts) = counts {
        let (table, skipped) = read_count_table(counts)?;
        report.skipped_count_lines = skipped;
        report.counts = Some(graph.apply_counts(&table));
    }
    Ok((graph, report))
}
