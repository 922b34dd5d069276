//! Helpers shared by the XML readers.

use std::io::BufRead;

use lexnet_common::utils::error::LoadError;
use quick_xml::Reader;
use quick_xml::events::BytesStart;

/// A pull reader over one source, remembering its label for errors.
pub(crate) struct XmlSource {
    pub(crate) origin: String,
    pub(crate) reader: Reader<Box<dyn BufRead + Send>>,
}

impl XmlSource {
    pub(crate) fn new(origin: String, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            origin,
            reader: Reader::from_reader(input),
        }
    }

    /// Byte offset of the reader.
    pub(crate) fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    pub(crate) fn xml_error(&self, err: impl std::fmt::Display) -> LoadError {
        LoadError::Xml {
            origin: self.origin.clone(),
            position: self.position(),
            message: err.to_string(),
        }
    }

    /// Value of an optional attribute, unescaped.
    pub(crate) fn attribute(
        &self,
        element: &BytesStart<'_>,
        name: &str,
    ) -> Result<Option<String>, LoadError> {
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|e| self.xml_error(e))?;
            if attribute.key.as_ref() == name.as_bytes() {
                let value = attribute.unescape_value().map_err(|e| self.xml_error(e))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    /// Value of a required, non-empty attribute.
    pub(crate) fn required(
        &self,
        element: &BytesStart<'_>,
        element_name: &'static str,
        name: &'static str,
        position: u64,
    ) -> Result<String, LoadError> {
        match self.attribute(element, name)? {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(value) => Err(LoadError::InvalidAttribute {
                origin: self.origin.clone(),
                element: element_name,
                attribute: name,
                value,
                position,
            }),
            None => Err(LoadError::MissingAttribute {
                origin: self.origin.clone(),
                element: element_name,
                attribute: name,
                position,
            }),
        }
    }

    /// Parses an attribute value, mapping failure to
    /// [`LoadError::InvalidAttribute`].
    pub(crate) fn parse_number<T: std::str::FromStr>(
        &self,
        value: String,
        element: &'static str,
        attribute: &'static str,
        position: u64,
    ) -> Result<T, LoadError> {
        match value.trim().parse() {
            Ok(number) => Ok(number),
            Err(_) => Err(LoadError::InvalidAttribute {
                origin: self.origin.clone(),
                element,
                attribute,
                value,
                position,
            }),
        }
    }
}
