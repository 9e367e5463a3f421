//! Minimal owned XML element tree, read and written with quick-xml.
//!
//! This is the markup boundary the decoder and encoder work against: elements
//! with a name, ordered string attributes and ordered child elements. Text
//! content, comments and processing instructions are not modelled; they are
//! skipped on parse and never produced on write.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, TreeError};

/// One markup element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Set an attribute, replacing an existing one of the same name in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append a child element and return it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

/// A parsed or freshly built document: its top-level elements in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// First top-level element with the given name.
    pub fn first_element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Parse markup text.
    ///
    /// Fails with [`TreeError::Markup`] on anything that is not well formed:
    /// mismatched or unclosed tags, broken attributes, bad entity references,
    /// or character data outside of any element.
    pub fn parse(text: &str) -> Result<Document> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut document = Document::new();
        let mut open: Vec<Element> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| TreeError::Markup {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;
            match event {
                Event::Start(start) => {
                    open.push(element_from_start(&start, &reader)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, &reader)?;
                    attach(&mut open, &mut document, element);
                }
                Event::End(_) => {
                    // quick-xml has already matched the end name against the open tag
                    if let Some(element) = open.pop() {
                        attach(&mut open, &mut document, element);
                    }
                }
                Event::Text(text) if open.is_empty() => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(TreeError::Markup {
                            position: reader.buffer_position() as u64,
                            message: "character data outside of the root element".to_string(),
                        });
                    }
                }
                Event::GeneralRef(_) if open.is_empty() => {
                    return Err(TreeError::Markup {
                        position: reader.buffer_position() as u64,
                        message: "entity reference outside of the root element".to_string(),
                    });
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(TreeError::Markup {
                position: reader.buffer_position() as u64,
                message: format!("unclosed element <{}>", unclosed.name),
            });
        }

        tracing::trace!(elements = document.elements.len(), "parsed markup document");
        Ok(document)
    }

    /// Read and parse a markup file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Document> {
        let text = std::fs::read_to_string(path)?;
        Document::parse(&text)
    }

    /// Serialize with an XML declaration, indenting nested elements by
    /// `indent` spaces per level (`0` writes everything on one line).
    ///
    /// Fails with [`TreeError::Unrepresentable`] if an attribute value holds a
    /// character outside the XML 1.0 `Char` production; nothing is written then.
    pub fn write_to<W: Write>(&self, out: W, indent: usize) -> Result<()> {
        for element in &self.elements {
            check_representable(element)?;
        }
        let mut writer = if indent == 0 {
            Writer::new(out)
        } else {
            Writer::new_with_indent(out, b' ', indent)
        };
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        for element in &self.elements {
            write_element(&mut writer, element)?;
        }
        let mut out = writer.into_inner();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    pub fn to_xml_string(&self, indent: usize) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, indent)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the document to a file, creating or truncating it.
    pub fn save(&self, path: impl AsRef<Path>, indent: usize) -> Result<()> {
        // checked before the file is created so a rejected document leaves it untouched
        for element in &self.elements {
            check_representable(element)?;
        }
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), indent)
    }
}

fn attach(open: &mut [Element], document: &mut Document, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => document.elements.push(element),
    }
}

fn element_from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element> {
    let markup_error = |message: String| TreeError::Markup {
        position: reader.buffer_position() as u64,
        message,
    };

    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| markup_error(format!("attribute error: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| markup_error(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let escaped = escape_attribute(value);
        start.push_attribute(Attribute::from((key.as_bytes(), escaped.as_bytes())));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn check_representable(element: &Element) -> Result<()> {
    for (key, value) in &element.attributes {
        if !value.chars().all(is_xml_char) {
            return Err(TreeError::Unrepresentable {
                attribute: key.clone(),
                value: value.clone(),
            });
        }
    }
    element.children.iter().try_for_each(check_representable)
}

/// The XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape markup characters, and also whitespace that a conforming parser
/// would otherwise normalize to a plain space inside an attribute value.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
