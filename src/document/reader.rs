// src/document/reader.rs
//! Element tree reader for the shallow prompt markup.
//!
//! Well-formedness is checked by `quick_xml`; this module only assembles a
//! small tree from its events. Every element keeps its full text content
//! (own character data plus that of its descendants, in document order) so
//! the codec can pull leaf values without walking the tree again.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{PromptError, Result};

/// Nesting beyond this is rejected.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    fn open(start: &BytesStart) -> Result<Self> {
        for attr in start.attributes() {
            attr.map_err(|e| parse_error(format!("malformed attribute: {}", e)))?
                .unescape_value()
                .map_err(|e| parse_error(e.to_string()))?;
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// A leaf contributes its own text; a container contributes the text of
    /// each child element.
    pub fn values(&self) -> Vec<&str> {
        if self.children.is_empty() {
            vec![self.text.as_str()]
        } else {
            self.children.iter().map(|c| c.text.as_str()).collect()
        }
    }
}

/// Parse a complete document and return its root element.
pub fn read_document(src: &str) -> Result<Element> {
    let mut reader = Reader::from_str(src);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            parse_error(format!("{} at position {}", e, reader.error_position()))
        })?;

        match event {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(parse_error("unexpected content after the root element"));
                }
                if open.len() >= MAX_DEPTH {
                    return Err(parse_error("elements are nested too deeply"));
                }
                open.push(Element::open(&e)?);
            }
            Event::Empty(e) => {
                if root.is_some() {
                    return Err(parse_error("unexpected content after the root element"));
                }
                let element = Element::open(&e)?;
                attach(&mut open, &mut root, element);
            }
            Event::End(_) => {
                // Closing names are matched by the reader itself.
                if let Some(element) = open.pop() {
                    attach(&mut open, &mut root, element);
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| parse_error(e.to_string()))?;
                match open.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(parse_error("text outside the root element")),
                }
            }
            Event::CData(e) => match open.last_mut() {
                Some(current) => current.text.push_str(&String::from_utf8_lossy(&e)),
                None => return Err(parse_error("CDATA outside the root element")),
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(parse_error(format!(
            "unterminated element <{}>",
            unclosed.name
        )));
    }
    root.ok_or_else(|| parse_error("document has no root element"))
}

/// Hand a finished element to its parent, or make it the root.
fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => {
            parent.text.push_str(&element.text);
            parent.children.push(element);
        }
        None => *root = Some(element),
    }
}

fn parse_error(message: impl Into<String>) -> PromptError {
    PromptError::Parse(message.into())
}
