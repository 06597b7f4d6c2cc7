//! Generic XML tree.
//!
//! The document is read into a `serde_json::Value` so the rest of the
//! import never sees raw XML:
//!
//! * an element becomes an object keyed by child element name,
//! * attributes are stored as `@name`,
//! * an element holding only text becomes a string,
//! * text next to attributes or children is stored as `#text`,
//! * an empty element becomes `null`,
//! * repeated sibling names collapse into an array, a lone child does not.
//!
//! Text is decoded with the encoding named in the XML declaration, and the
//! text and CDATA chunks of an element are joined before being trimmed once.

use quick_xml::encoding::{Decoder, EncodingError};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

const TEXT_KEY: &str = "#text";
const ATTRIBUTE_PREFIX: char = '@';

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("Invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("Invalid text encoding: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Element <{0}> is never closed")]
    Unclosed(String),
    #[error("Document has no root element")]
    NoRoot,
    #[error("Unexpected content outside the root element")]
    OutsideRoot,
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart, decoder: Decoder) -> Result<Self, XmlError> {
        let name = decoder.decode(start.name().as_ref())?.into_owned();
        let mut children = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                decoder.decode(attr.key.as_ref())?
            );
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            children.insert(key, Value::String(value));
        }
        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();
        let value = match (self.children.is_empty(), text.is_empty()) {
            (true, true) => Value::Null,
            (true, false) => Value::String(text.to_owned()),
            (false, _) => {
                let mut children = self.children;
                if !text.is_empty() {
                    children.insert(TEXT_KEY.to_owned(), Value::String(text.to_owned()));
                }
                Value::Object(children)
            }
        };
        (self.name, value)
    }
}

fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(siblings)) => siblings.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// Parses `xml` into a generic tree rooted at an object holding the single
/// document element.
pub fn parse(xml: &[u8]) -> Result<Value, XmlError> {
    let mut reader = Reader::from_reader(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(XmlError::OutsideRoot);
                }
                stack.push(Frame::open(&e, reader.decoder())?);
            }
            Event::Empty(e) => {
                if root.is_some() {
                    return Err(XmlError::OutsideRoot);
                }
                let (name, value) = Frame::open(&e, reader.decoder())?.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::End(_) => {
                // quick-xml rejects mismatched and unmatched end tags itself
                let frame = stack.pop().ok_or(XmlError::OutsideRoot)?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(XmlError::OutsideRoot),
                }
            }
            Event::CData(e) => {
                let data = e.decode()?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&data),
                    None => return Err(XmlError::OutsideRoot),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(frame) = stack.pop() {
        return Err(XmlError::Unclosed(frame.name));
    }
    let (name, value) = root.ok_or(XmlError::NoRoot)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}
