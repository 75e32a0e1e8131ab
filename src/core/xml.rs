// src/core/xml.rs
//! Small owned element tree built from quick-xml events.
//!
//! Entity documents are a few kilobytes, so decoding works on a tree
//! (children, descendants by name, text content) rather than on the raw
//! event stream.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Local name, namespace prefix dropped, case kept.
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Element children only; text nodes skipped.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All descendants named `name`, document order, excluding `self`.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_named(name, &mut out);
        out
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// Concatenated text of all descendants, unmodified.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.push_text(out),
            }
        }
    }
}

fn xml_err(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::Xml(format!("at position {}: {}", reader.error_position(), e))
}

fn start_element(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_err(reader, err))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_err(reader, err))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(Element { name, attrs, children: Vec::new() })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

/// Parse a document and return its root element.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let el = start_element(&reader, e)?;
                stack.push(el);
            }
            Ok(Event::Empty(ref e)) => {
                let el = start_element(&reader, e)?;
                attach(&mut stack, &mut root, el);
            }
            Ok(Event::End(_)) => {
                if let Some(el) = stack.pop() {
                    attach(&mut stack, &mut root, el);
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = t.unescape().map_err(|err| xml_err(&reader, err))?;
                    parent.children.push(Node::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    parent.children.push(Node::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(&reader, e)),
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ScrapeError::Xml(format!("unclosed element <{}>", stack[stack.len() - 1].name)));
    }
    root.ok_or_else(|| ScrapeError::Xml(s!("document has no root element")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_tree_with_text_and_attrs() {
        let doc = parse(
            r#"<?xml version="1.0"?>
            <Characteristic name="X"><Value><Field name="A"><Unit>u</Unit><Note>a &amp; b</Note></Field></Value></Characteristic>"#,
        )
        .unwrap();
        assert_eq!(doc.name, "Characteristic");
        assert_eq!(doc.attr("name"), Some("X"));
        let fields = doc.descendants("Field");
        assert_eq!(fields.len(), 1);
        let names: Vec<_> = fields[0].elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Unit", "Note"]);
        assert_eq!(fields[0].elements().nth(1).unwrap().text_content(), "a & b");
    }

    #[test]
    fn rejects_unclosed() {
        assert!(parse("<a><b></b>").is_err());
    }
}
