//! Reader for the synset extract (`cdb_synset`).
//!
//! Only relations under `wn_internal_relations` are kept; equivalence
//! links to other wordnets and anything else in the record are skipped.

use arcstr::ArcStr;
use lexnet_common::utils::error::LoadError;
use lexnet_core::GraphBuilder;
use lexnet_core::graph::SynsetDraft;
use quick_xml::events::{BytesStart, Event};

use super::Source;
use super::xml::XmlSource;

struct SynsetReader<'b> {
    xml: XmlSource,
    builder: &'b mut GraphBuilder,
    pending: Option<SynsetDraft>,
    internal_relations: bool,
    read: usize,
}

impl SynsetReader<'_> {
    fn on_start(
        &mut self,
        element: &BytesStart<'_>,
        empty: bool,
        position: u64,
    ) -> Result<(), LoadError> {
        match element.name().as_ref() {
            b"cdb_synset" => {
                let external_id = self
                    .xml
                    .required(element, "cdb_synset", "c_sy_id", position)?;
                let alias = self
                    .xml
                    .attribute(element, "d_synset_id")?
                    .filter(|alias| !alias.trim().is_empty())
                    .map(ArcStr::from);
                self.pending = Some(SynsetDraft {
                    external_id: ArcStr::from(external_id),
                    alias,
                    ..SynsetDraft::default()
                });
                self.internal_relations = false;
                if empty {
                    self.finish();
                }
            }
            b"synonym" if self.pending.is_some() => {
                let member = self.xml.required(element, "synonym", "c_lu_id", position)?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.members.push(ArcStr::from(member));
                }
            }
            b"wn_internal_relations" => self.internal_relations = !empty,
            b"relation" if self.internal_relations && self.pending.is_some() => {
                let name = self
                    .xml
                    .required(element, "relation", "relation_name", position)?;
                let target = self.xml.required(element, "relation", "target", position)?;
                if let Some(pending) = self.pending.as_mut() {
                    pending
                        .relations
                        .push((ArcStr::from(name), ArcStr::from(target)));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn on_end(&mut self, name: &[u8]) {
        match name {
            b"wn_internal_relations" => self.internal_relations = false,
            b"cdb_synset" => self.finish(),
            _ => {}
        }
    }

    fn finish(&mut self) {
        if let Some(draft) = self.pending.take() {
            self.builder.add_synset(draft);
            self.read += 1;
        }
        self.internal_relations = false;
    }
}

/// Streams `<cdb_synset>` records into `builder`. The lexical units must
/// already be in it. Returns the number of records read.
///
/// # Errors
///
/// See [`load_graph`](super::load_graph).
pub fn read_synsets(source: Source, builder: &mut GraphBuilder) -> Result<usize, LoadError> {
    let (origin, input) = source.open()?;
    let mut reader = SynsetReader {
        xml: XmlSource::new(origin, input),
        builder,
        pending: None,
        internal_relations: false,
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
            Event::End(element) => reader.on_end(element.name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if reader.pending.is_some() {
        return Err(LoadError::Malformed {
            origin: reader.xml.origin,
            message: "document ends inside <cdb_synset>".to_string(),
        });
    }
    tracing::debug!(origin = %reader.xml.origin, synsets = reader.read, "read synsets");
    Ok(reader.read)
}
