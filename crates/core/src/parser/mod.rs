//! quick-xml driver that turns a descriptor byte stream into [`SaxHandler`] callbacks.
//!
//! The driver owns tokenizing only. Callbacks arrive in document order:
//! `on_document_start`, nested `on_element_start` / `on_characters` /
//! `on_element_end`, `on_document_end`. `resolve_entity` is called out of band
//! when a DOCTYPE names an external subset.

pub mod doctype;

use crate::error::{DescriptorError, Result};
use crate::resolver::EntitySource;
use doctype::DocTypeDecl;
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Receiver of parse events.
pub trait SaxHandler {
    fn on_document_start(&mut self);

    fn on_element_start(&mut self, name: &str, attributes: &[(String, String)]);

    fn on_characters(&mut self, chunk: &str);

    fn on_element_end(&mut self, name: &str);

    fn on_document_end(&mut self) {}

    /// Returns a byte source for the external entity, or `None` to let the
    /// parser fall back to its own default handling.
    fn resolve_entity(&mut self, public_id: Option<&str>, system_id: &str)
    -> Option<EntitySource>;
}

pub fn parse_file<H: SaxHandler>(path: &Path, handler: &mut H) -> Result<()> {
    let file = File::open(path)?;
    parse_descriptor(BufReader::new(file), handler)
}

pub fn parse_str<H: SaxHandler>(xml: &str, handler: &mut H) -> Result<()> {
    parse_descriptor(xml.as_bytes(), handler)
}

/// Text is decoded with the encoding named by the BOM or the XML declaration.
pub fn parse_descriptor<R: BufRead, H: SaxHandler>(source: R, handler: &mut H) -> Result<()> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut entities: HashMap<String, String> = HashMap::new();

    handler.on_document_start();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let decoder = reader.decoder();
                let name = element_name(&e, decoder)?;
                let attributes = attributes(&e, decoder)?;
                handler.on_element_start(&name, &attributes);
            }
            Ok(Event::Empty(e)) => {
                let decoder = reader.decoder();
                let name = element_name(&e, decoder)?;
                let attributes = attributes(&e, decoder)?;
                handler.on_element_start(&name, &attributes);
                handler.on_element_end(&name);
            }
            Ok(Event::End(e)) => {
                let local = e.local_name();
                let name = decode(reader.decoder(), local.as_ref())?;
                handler.on_element_end(&name);
            }
            Ok(Event::Text(e)) => {
                let text = decode(reader.decoder(), e.as_ref())?;
                if !text.is_empty() {
                    handler.on_characters(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = decode(reader.decoder(), e.as_ref())?;
                if !text.is_empty() {
                    handler.on_characters(&text);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                let name = decode(reader.decoder(), e.as_ref())?;
                let text = match resolve_reference(&name) {
                    Some(text) => text,
                    None => match entities.get(&*name) {
                        Some(value) => expand_entity(&name, value, &entities)?,
                        None => {
                            return Err(DescriptorError::Xml(format!(
                                "undeclared entity &{name}; before byte {}",
                                reader.buffer_position()
                            )));
                        }
                    },
                };
                handler.on_characters(&text);
            }
            Ok(Event::DocType(e)) => {
                let decl = DocTypeDecl::parse(&decode(reader.decoder(), e.as_ref())?);
                load_external_subset(&decl, handler)?;
                entities = decl.entities;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DescriptorError::Xml(format!(
                    "parse error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    handler.on_document_end();
    Ok(())
}

/// Hands the DOCTYPE's external identifiers to the handler and drains whatever
/// it resolves to. Declarations are not interpreted, so the bytes are only read.
fn load_external_subset<H: SaxHandler>(decl: &DocTypeDecl, handler: &mut H) -> Result<()> {
    let Some(system_id) = decl.system_id.as_deref() else {
        return Ok(());
    };

    if let Some(mut source) = handler.resolve_entity(decl.public_id.as_deref(), system_id) {
        let mut subset = Vec::new();
        source.read_to_end(&mut subset)?;
        tracing::trace!(
            "Loaded {} bytes of external subset for <{}> from {}",
            subset.len(),
            decl.name,
            source.origin()
        );
    }
    Ok(())
}

fn element_name(e: &BytesStart<'_>, decoder: Decoder) -> Result<String> {
    let local = e.local_name();
    Ok(decode(decoder, local.as_ref())?.into_owned())
}

fn attributes(e: &BytesStart<'_>, decoder: Decoder) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DescriptorError::Xml(format!("invalid attribute: {err}")))?;
        let key = decode(decoder, attr.key.as_ref())?.into_owned();
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|err| DescriptorError::Xml(format!("invalid attribute value: {err}")))?;
        attributes.push((key, value.into_owned()));
    }
    Ok(attributes)
}

/// Expands `&#NN;`, `&#xNN;` and the five predefined entities.
fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(digits) = name.strip_prefix('#') {
        let code_point = match digits.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => digits.parse::<u32>().ok()?,
        };
        return char::from_u32(code_point).map(|c| Cow::Owned(c.to_string()));
    }
    resolve_predefined_entity(name).map(Cow::Borrowed)
}

/// Replacement text of an internal entity. References inside the value are
/// expanded one level deep.
fn expand_entity<'a>(
    name: &str,
    value: &'a str,
    entities: &'a HashMap<String, String>,
) -> Result<Cow<'a, str>> {
    unescape_with(value, |inner| {
        resolve_predefined_entity(inner).or_else(|| entities.get(inner).map(String::as_str))
    })
    .map_err(|err| DescriptorError::Xml(format!("invalid replacement text for &{name};: {err}")))
}

fn decode<'b>(decoder: Decoder, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
    decoder
        .decode(bytes)
        .map_err(|e| DescriptorError::Xml(format!("invalid text encoding: {e}")))
}
