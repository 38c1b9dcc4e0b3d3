//! A small owned XML tree for WordprocessingML parts.
//!
//! Parts are parsed with `quick-xml` into [`XmlElement`]s, edited in place and written back. Names
//! keep their namespace prefix (`w:p`, `w:t`, ...) and attributes keep their order, so untouched
//! markup survives a round trip.

use crate::error::{ReportError, ReportResult};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Content of the `<?xml ...?>` declaration, without the delimiters.
    pub declaration: Option<String>,
    pub root: XmlElement,
}

/// Standard declaration written at the top of every generated part.
pub const DEFAULT_DECLARATION: &str = r#"xml version="1.0" encoding="UTF-8" standalone="yes""#;

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated direct character data.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all direct character data with `text`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|c| !matches!(c, XmlNode::Text(_) | XmlNode::CData(_)));
        self.children.push(XmlNode::Text(text.into()));
    }
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self {
            declaration: Some(DEFAULT_DECLARATION.to_string()),
            root,
        }
    }

    pub fn parse(xml: &str) -> ReportResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut declaration = None;
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                ReportError::Xml(format!("at position {}: {e}", reader.buffer_position()))
            })?;
            match event {
                Event::Start(start) => stack.push(element_from(&start)?),
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ReportError::Xml("unbalanced closing tag".into()))?;
                    attach(&mut stack, &mut root, XmlNode::Element(element))?;
                }
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    attach(&mut stack, &mut root, XmlNode::Element(element))?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = text
                            .unescape()
                            .map_err(|e| ReportError::Xml(e.to_string()))?;
                        parent.children.push(XmlNode::Text(value.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = lossy(&data.into_inner()).into_owned();
                        parent.children.push(XmlNode::CData(value));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Comment(lossy(&comment).into_owned()));
                    }
                }
                Event::Decl(decl) => declaration = Some(lossy(&decl).into_owned()),
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ReportError::Xml(format!("unclosed element <{}>", stack[0].name)));
        }
        let root = root.ok_or_else(|| ReportError::Xml("document has no root element".into()))?;
        Ok(Self { declaration, root })
    }

    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        if let Some(decl) = &self.declaration {
            out.push_str("<?");
            out.push_str(decl);
            out.push_str("?>\n");
        }
        write_element(&self.root, &mut out);
        out
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn element_from(start: &BytesStart) -> ReportResult<XmlElement> {
    let mut element = XmlElement::new(lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ReportError::Xml(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ReportError::Xml(e.to_string()))?;
        element
            .attributes
            .push((lossy(attr.key.as_ref()).into_owned(), value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    node: XmlNode,
) -> ReportResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match (node, root.is_some()) {
        (XmlNode::Element(element), false) => {
            *root = Some(element);
            Ok(())
        }
        (XmlNode::Element(element), true) => Err(ReportError::Xml(format!(
            "second root element <{}>",
            element.name
        ))),
        _ => Ok(()),
    }
}

/// Drop characters XML 1.0 does not allow in character data. Carriage returns go too, parsers
/// would normalise them away anyway.
fn xml_safe(text: &str) -> Cow<'_, str> {
    let allowed = |c: char| c == '\t' || c == '\n' || u32::from(c) >= 0x20;
    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|c| allowed(*c)).collect())
    }
}

fn write_element(element: &XmlElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(e, out),
            XmlNode::Text(t) => out.push_str(&escape(&*xml_safe(t))),
            XmlNode::CData(t) => {
                out.push_str("<![CDATA[");
                out.push_str(t);
                out.push_str("]]>");
            }
            XmlNode::Comment(t) => {
                out.push_str("<!--");
                out.push_str(t);
                out.push_str("-->");
            }
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}
