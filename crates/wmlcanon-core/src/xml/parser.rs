use super::node::{XElement, XNode};
use super::xname::{XAttribute, XName, XMLNS_NS, XML_NS};
use crate::error::{CanonError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Keep whitespace-only text nodes everywhere, not only under
    /// `xml:space="preserve"`.
    pub preserve_whitespace: bool,
}

pub fn parse(xml: &str) -> Result<XElement> {
    parse_with_options(xml, ParseOptions::default())
}

/// Parses a part read straight from disk. A leading UTF-8 byte order mark
/// is skipped.
pub fn parse_bytes(bytes: &[u8]) -> Result<XElement> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| CanonError::XmlParse {
        message: e.to_string(),
        location: "input".to_string(),
    })?;
    parse(text)
}

pub fn parse_with_options(xml: &str, options: ParseOptions) -> Result<XElement> {
    let doc = roxmltree::Document::parse_with_options(
        xml,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .map_err(|e| CanonError::XmlParse {
        message: e.to_string(),
        location: format!("line {}", e.pos().row),
    })?;

    Ok(build_element(doc.root_element(), options))
}

fn build_element(node: roxmltree::Node, options: ParseOptions) -> XElement {
    let name = XName::new(
        node.tag_name().namespace().unwrap_or(""),
        node.tag_name().name(),
    );

    let mut element = XElement::new(name);
    element.attributes = node
        .attributes()
        .map(|attr| XAttribute::new(XName::new(attr.namespace().unwrap_or(""), attr.name()), attr.value()))
        .collect();

    // roxmltree reports every namespace in scope; keep only the ones this
    // element declares itself.
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.uri() == XML_NS || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let decl = match ns.name() {
            Some(prefix) => XName::new(XMLNS_NS, prefix),
            None => XName::local("xmlns"),
        };
        element.attributes.push(XAttribute::new(decl, ns.uri()));
    }

    let keep_whitespace = options.preserve_whitespace
        || node.attribute((XML_NS, "space")) == Some("preserve");

    for child in node.children() {
        match child.node_type() {
            roxmltree::NodeType::Element => {
                element.children.push(XNode::Element(build_element(child, options)));
            }
            roxmltree::NodeType::Text => {
                let Some(text) = child.text() else { continue };
                if !keep_whitespace && text.chars().all(char::is_whitespace) {
                    continue;
                }
                element.children.push(XNode::text(text));
            }
            _ => {}
        }
    }

    element
}
