//! Markup parser that builds element trees.
//!
//! Uses quick-xml's namespace-aware reader. Namespace declarations are
//! resolved into the names they bind and are not kept as attributes.
//! Comments, processing instructions, the XML declaration and DOCTYPE are
//! skipped.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::trace;

use crate::error::{Result, XmlError};
use crate::node::{Attribute, Element, QName};

/// Parse a document held in memory into its root element.
pub fn parse_str(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    // Leaf text is compared verbatim, so keep surrounding whitespace.
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let element = read_element(&reader, e)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = read_element(&reader, e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Parse("unbalanced end tag".into()))?;
                if !element.children.is_empty() {
                    element.text.clear();
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| XmlError::Parse(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Parse(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or(XmlError::Empty)?;
    trace!(root = %root.name, children = root.children.len(), "parsed document");
    Ok(root)
}

/// Read a document from disk and parse it into its root element.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Element> {
    let source = std::fs::read_to_string(path)?;
    parse_str(&source)
}

/// Hand a finished element to its parent, or make it the document root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Parse(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }
    Ok(())
}

fn read_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Element> {
    let (ns, local) = reader.resolve_element(start.name());
    let mut name = QName::new(namespace_uri(ns)?, utf8(local.as_ref())?);
    if let Some(prefix) = start.name().prefix() {
        name = name.with_prefix(utf8(prefix.as_ref())?);
    }

    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Attribute(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let mut name = QName::new(namespace_uri(ns)?, utf8(local.as_ref())?);
        if let Some(prefix) = attr.key.prefix() {
            name = name.with_prefix(utf8(prefix.as_ref())?);
        }
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Attribute(e.to_string()))?;
        element.attributes.push(Attribute::new(name, value.into_owned()));
    }
    Ok(element)
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Result<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => utf8(uri),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(XmlError::Parse(format!(
            "undeclared namespace prefix `{}`",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| XmlError::Parse(e.to_string()))
}
