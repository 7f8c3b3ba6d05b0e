//! XML serialization.
//!
//! Two forms are produced:
//! - [`serialize_element`] / [`serialize_document`]: output that round-trips
//!   through the parser, with any namespace used but not declared in scope
//!   declared on the root element.
//! - [`canonical_string`]: the fingerprint form. No namespace declarations,
//!   attributes sorted by name, names written with their well-known prefix
//!   or as `{uri}local`. Two elements with the same canonical string carry
//!   the same markup.

use super::node::{XElement, XNode};
use super::xname::{XAttribute, XName, XMLNS_NS, XML_NS};
use crate::error::{CanonError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashMap;
use std::io::Cursor;

/// Namespace bindings in scope while writing.
#[derive(Debug, Clone, Default)]
struct NamespaceScope {
    /// URI to prefix, for prefixed bindings only.
    prefixed: HashMap<String, String>,
    default: Option<String>,
}

impl NamespaceScope {
    fn extend(&mut self, attributes: &[XAttribute]) {
        for attr in attributes {
            match attr.name.namespace.as_deref() {
                None if attr.name.local_name == "xmlns" => {
                    self.default = (!attr.value.is_empty()).then(|| attr.value.clone());
                }
                Some(XMLNS_NS) => self.bind(&attr.value, &attr.name.local_name),
                _ => {}
            }
        }
    }

    /// A prefix rebound to a new URI no longer names the old one.
    fn bind(&mut self, uri: &str, prefix: &str) {
        self.prefixed.retain(|_, p| p != prefix);
        self.prefixed.insert(uri.to_string(), prefix.to_string());
    }

    fn is_taken(&self, prefix: &str) -> bool {
        self.prefixed.values().any(|p| p == prefix)
    }

    /// "" when `ns` is the default namespace.
    fn element_prefix(&self, ns: &str) -> Option<&str> {
        if self.default.as_deref() == Some(ns) {
            return Some("");
        }
        self.prefixed.get(ns).map(String::as_str)
    }

    /// Unprefixed attributes are in no namespace, so only prefixed
    /// bindings count.
    fn attribute_prefix(&self, ns: &str) -> Option<&str> {
        self.prefixed.get(ns).map(String::as_str)
    }
}

fn unbound(ns: &str) -> CanonError {
    CanonError::XmlWrite(format!("no prefix in scope for namespace {}", ns))
}

fn write_error(e: impl std::fmt::Display) -> CanonError {
    CanonError::XmlWrite(e.to_string())
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner()).map_err(write_error)
}

/// Serialize with an XML declaration, as a part would be stored.
pub fn serialize_document(root: &XElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(write_error)?;
    write_root(root, &mut writer)?;
    into_string(writer)
}

/// Serialize a subtree without an XML declaration.
pub fn serialize_element(element: &XElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_root(element, &mut writer)?;
    into_string(writer)
}

/// Deterministic fingerprint form of a subtree.
pub fn canonical_string(element: &XElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_canonical(element, &mut writer)?;
    into_string(writer)
}

fn write_root<W: std::io::Write>(root: &XElement, writer: &mut Writer<W>) -> Result<()> {
    let mut scope = NamespaceScope::default();
    scope.extend(&root.attributes);

    let mut element_namespaces: Vec<&str> = Vec::new();
    let mut attribute_namespaces: Vec<&str> = Vec::new();
    collect_used_namespaces(root, &mut element_namespaces, &mut attribute_namespaces);

    let mut declarations = Vec::new();
    for ns in element_namespaces {
        if scope.element_prefix(ns).is_none() {
            declare(ns, &mut scope, &mut declarations);
        }
    }
    for ns in attribute_namespaces {
        if scope.attribute_prefix(ns).is_none() {
            declare(ns, &mut scope, &mut declarations);
        }
    }

    write_element(root, writer, &scope, &declarations)
}

fn collect_used_namespaces<'a>(
    element: &'a XElement,
    element_namespaces: &mut Vec<&'a str>,
    attribute_namespaces: &mut Vec<&'a str>,
) {
    if let Some(ns) = element.name.namespace.as_deref() {
        if ns != XML_NS && !element_namespaces.contains(&ns) {
            element_namespaces.push(ns);
        }
    }
    for attr in &element.attributes {
        let Some(ns) = attr.name.namespace.as_deref() else { continue };
        if ns != XML_NS && ns != XMLNS_NS && !attribute_namespaces.contains(&ns) {
            attribute_namespaces.push(ns);
        }
    }
    for child in element.elements() {
        collect_used_namespaces(child, element_namespaces, attribute_namespaces);
    }
}

fn declare(ns: &str, scope: &mut NamespaceScope, declarations: &mut Vec<XAttribute>) {
    let prefix = match known_prefix(ns) {
        Some(p) if !scope.is_taken(p) => p.to_string(),
        _ => {
            let mut n = 0;
            loop {
                let candidate = format!("ns{}", n);
                if !scope.is_taken(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        }
    };

    declarations.push(XAttribute::new(XName::new(XMLNS_NS, &prefix), ns));
    scope.bind(ns, &prefix);
}

fn qualified_element_name(name: &XName, scope: &NamespaceScope) -> Result<String> {
    let Some(ns) = name.namespace.as_deref() else {
        return Ok(name.local_name.clone());
    };
    match scope.element_prefix(ns) {
        Some("") => Ok(name.local_name.clone()),
        Some(prefix) => Ok(format!("{}:{}", prefix, name.local_name)),
        None => Err(unbound(ns)),
    }
}

fn qualified_attribute_name(name: &XName, scope: &NamespaceScope) -> Result<String> {
    let Some(ns) = name.namespace.as_deref() else {
        return Ok(name.local_name.clone());
    };
    let prefix = match ns {
        XMLNS_NS => "xmlns",
        XML_NS => "xml",
        _ => scope.attribute_prefix(ns).ok_or_else(|| unbound(ns))?,
    };
    Ok(format!("{}:{}", prefix, name.local_name))
}

fn write_element<W: std::io::Write>(
    element: &XElement,
    writer: &mut Writer<W>,
    scope: &NamespaceScope,
    extra_attributes: &[XAttribute],
) -> Result<()> {
    let mut scope = scope.clone();
    scope.extend(&element.attributes);
    scope.extend(extra_attributes);

    let tag_name = qualified_element_name(&element.name, &scope)?;
    let mut start = BytesStart::new(tag_name.as_str());
    for attr in element.attributes.iter().chain(extra_attributes) {
        let attr_name = qualified_attribute_name(&attr.name, &scope)?;
        start.push_attribute((attr_name.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        match child {
            XNode::Element(e) => write_element(e, writer, &scope, &[])?,
            XNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag_name.as_str())))
        .map_err(write_error)
}

fn canonical_name(name: &XName) -> String {
    match name.namespace.as_deref() {
        None => name.local_name.clone(),
        Some(XML_NS) => format!("xml:{}", name.local_name),
        Some(ns) => match known_prefix(ns) {
            Some(prefix) => format!("{}:{}", prefix, name.local_name),
            None => format!("{{{}}}{}", ns, name.local_name),
        },
    }
}

fn write_canonical<W: std::io::Write>(element: &XElement, writer: &mut Writer<W>) -> Result<()> {
    let tag_name = canonical_name(&element.name);
    let mut start = BytesStart::new(tag_name.as_str());

    let mut attributes: Vec<&XAttribute> = element
        .attributes
        .iter()
        .filter(|a| !a.name.is_namespace_declaration())
        .collect();
    attributes.sort_by(|a, b| a.name.cmp(&b.name));
    for attr in attributes {
        let attr_name = canonical_name(&attr.name);
        start.push_attribute((attr_name.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        match child {
            XNode::Element(e) => write_canonical(e, writer)?,
            XNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag_name.as_str())))
        .map_err(write_error)
}

fn known_prefix(namespace: &str) -> Option<&'static str> {
    let prefix = match namespace {
        // WordprocessingML
        "http://schemas.openxmlformats.org/wordprocessingml/2006/main" => "w",
        "http://schemas.microsoft.com/office/word/2010/wordml" => "w14",
        "http://schemas.microsoft.com/office/word/2012/wordml" => "w15",
        "http://schemas.microsoft.com/office/word/2010/wordprocessingShape" => "wps",
        "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup" => "wpg",
        "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing" => "wp14",
        "http://schemas.microsoft.com/office/word/2023/wordml/word16du" => "w16du",
        // DrawingML
        "http://schemas.openxmlformats.org/drawingml/2006/main" => "a",
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" => "wp",
        "http://schemas.openxmlformats.org/drawingml/2006/picture" => "pic",
        // VML
        "urn:schemas-microsoft-com:vml" => "v",
        "urn:schemas-microsoft-com:office:office" => "o",
        // Office Math
        "http://schemas.openxmlformats.org/officeDocument/2006/math" => "m",
        // Relationships
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships" => "r",
        // Markup Compatibility
        "http://schemas.openxmlformats.org/markup-compatibility/2006" => "mc",
        // PowerTools
        "http://powertools.codeplex.com/2011" => "pt",
        _ => return None,
    };
    Some(prefix)
}
