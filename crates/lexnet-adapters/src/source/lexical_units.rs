//! Reader for the lexical-unit extract (`cdb_lu`).
//!
//! ```xml
//! <cdb_lu c_lu_id="r_n-39781" c_seq_nr="1">
//!   <form form-cat="noun" form-spelling="taal" count="4711"/>
//! </cdb_lu>
//! ```
//!
//! `count` is optional; the rest is required.

use arcstr::ArcStr;
use lexnet_common::utils::error::LoadError;
use lexnet_core::graph::UnitDraft;
use lexnet_core::GraphBuilder;
use quick_xml::events::{BytesStart, Event};

use super::Source;
use super::xml::XmlSource;

struct PendingUnit {
    external_id: String,
    sense: u32,
    position: u64,
    form: Option<(String, String, Option<u64>)>,
}

struct UnitReader<'b> {
    xml: XmlSource,
    builder: &'b mut GraphBuilder,
    pending: Option<PendingUnit>,
    read: usize,
}

impl UnitReader<'_> {
    fn on_start(&mut self, element: &BytesStart<'_>, empty: bool, position: u64) -> Result<(), LoadError> {
        match element.name().as_ref() {
            b"cdb_lu" => {
                let external_id = self.xml.required(element, "cdb_lu", "c_lu_id", position)?;
                let raw_sense = self.xml.required(element, "cdb_lu", "c_seq_nr", position)?;
                let sense: u32 = self
                    .xml
                    .parse_number(raw_sense.clone(), "cdb_lu", "c_seq_nr", position)?;
                if sense == 0 {
                    return Err(LoadError::InvalidAttribute {
                        origin: self.xml.origin.clone(),
                        element: "cdb_lu",
                        attribute: "c_seq_nr",
                        value: raw_sense,
                        position,
                    });
                }
                self.pending = Some(PendingUnit {
                    external_id,
                    sense,
                    position,
                    form: None,
                });
                if empty {
                    self.finish()?;
                }
            }
            b"form" => {
                let wants_form = self.pending.as_ref().is_some_and(|p| p.form.is_none());
                if wants_form {
                    let spelling = self.xml.required(element, "form", "form-spelling", position)?;
                    let category = self.xml.required(element, "form", "form-cat", position)?;
                    let count = match self.xml.attribute(element, "count")? {
                        Some(raw) => Some(self.xml.parse_number::<u64>(raw, "form", "count", position)?),
                        None => None,
                    };
                    if let Some(pending) = self.pending.as_mut() {
                        pending.form = Some((spelling, category, count));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), LoadError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let Some((lemma, category, count)) = pending.form else {
            return Err(LoadError::MissingElement {
                origin: self.xml.origin.clone(),
                parent: "cdb_lu",
                element: "form",
                position: pending.position,
            });
        };
        let draft = UnitDraft {
            external_id: ArcStr::from(pending.external_id),
            lemma: ArcStr::from(lemma),
            category,
            sense: pending.sense,
            count,
        };
        match self.builder.add_unit(draft) {
            Ok(_) => {
                self.read += 1;
                Ok(())
            }
            Err(duplicate) => Err(LoadError::DuplicateId {
                origin: self.xml.origin.clone(),
                kind: "lexical unit",
                id: duplicate.0.to_string(),
                position: pending.position,
            }),
        }
    }
}

/// Streams `<cdb_lu>` records into `builder`. Returns the number of
/// records read (dropped ones included).
///
/// # Errors
///
/// See [`load_graph`](super::load_graph).
pub fn read_lexical_units(source: Source, builder: &mut GraphBuilder) -> Result<usize, LoadError> {
    let (origin, input) = source.open()?;
    let mut reader = UnitReader {
        xml: XmlSource::new(origin, input),
        builder,
        pending: None,
        read: 0,
    };
    let mut buf = Vec::new();

    loop {
        let position = reader.xml.position();
        let event = reader
            .xml
            .reader
            .read_event_into(&mut buf)
            .map_err(|e| reader.xml.xml_error(e))?;
        match event {
            Event::Start(element) => reader.on_start(&element, false, position)?,
            Event::Empty(element) => reader.on_start(&element, true, position)?,
            Event::End(element) if element.name().as_ref() == b"cdb_lu" => reader.finish()?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if reader.pending.is_some() {
        return Err(LoadError::Malformed {
            origin: reader.xml.origin,
            message: "document ends inside <cdb_lu>".to_string(),
        });
    }
    tracing::debug!(origin = %reader.xml.origin, units = reader.read, "read lexical units");
    Ok(reader.read)
}
