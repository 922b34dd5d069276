//! Reader for the word-count table.
//!
//! One entry per line, `count form tag`, separated by whitespace. Tags are
//! CGN part-of-speech tags (`N`, `WW`, `ADJ`, ...). Older tables are
//! Latin-1 encoded, so a line that is not valid UTF-8 is decoded as Latin-1.

use std::borrow::Cow;
use std::io::BufRead;

use lexnet_common::CountCategory;
use lexnet_common::utils::error::LoadError;
use lexnet_core::graph::CountTable;

use super::Source;

fn decode(line: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(line) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(line.iter().map(|&b| char::from(b)).collect()),
    }
}

fn parse_line(line: &str) -> Option<(u64, &str, CountCategory)> {
    let mut fields = line.split_whitespace();
    let count = fields.next()?.parse().ok()?;
    let form = fields.next()?;
    let tag = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((count, form, CountCategory::from_tag(tag)))
}

/// Reads a count table. Returns the table and the number of ill-formed
/// lines that were skipped.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the source cannot be read.
pub fn read_count_table(source: Source) -> Result<(CountTable, usize), LoadError> {
    let (origin, mut input) = source.open()?;
    let mut table = CountTable::new();
    let mut skipped = 0;
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        let read = input.read_until(b'\n', &mut buf).map_err(|source| LoadError::Io {
            origin: origin.clone(),
            source,
        })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = decode(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((count, form, bucket)) => table.add(form, bucket, count),
            None => {
                skipped += 1;
                tracing::debug!(origin = %origin, line = line_number, "skipping ill-formed count line");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(origin = %origin, skipped, "count table has ill-formed lines");
    }
    tracing::debug!(origin = %origin, entries = table.len(), "read count table");
    Ok((table, skipped))
}
