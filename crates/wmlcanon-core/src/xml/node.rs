//! Immutable XML value tree.
//!
//! Transforms never mutate a tree they are given: they read it and build a
//! new one. Builders take `self` by value so that new nodes are assembled
//! bottom-up before they are placed into a parent.

use super::xname::{XAttribute, XName};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XNode {
    Element(XElement),
    Text(String),
}

impl XNode {
    pub fn text(content: &str) -> Self {
        Self::Text(content.to_string())
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn as_element(&self) -> Option<&XElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn name(&self) -> Option<&XName> {
        self.as_element().map(|e| &e.name)
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Element(_) => None,
        }
    }

    /// Concatenated text of this node and everything below it.
    pub fn value(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Element(element) => element.value(),
        }
    }
}

impl From<XElement> for XNode {
    fn from(element: XElement) -> Self {
        Self::Element(element)
    }
}

/// An element: name, attributes with unique names, ordered children.
///
/// `annotations` holds metadata that travels with the element but is never
/// serialized; unlike attributes, names there may repeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XElement {
    pub name: XName,
    pub attributes: Vec<XAttribute>,
    pub children: Vec<XNode>,
    pub annotations: Vec<XAttribute>,
}

impl XElement {
    pub fn new(name: XName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: XName, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = XAttribute>,
    {
        for attr in attributes {
            self.set_attribute(attr.name, &attr.value);
        }
        self
    }

    pub fn with_child(mut self, child: impl Into<XNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = XNode>,
    {
        self.children.extend(children);
        self
    }

    /// Appends a text child. Empty text adds nothing.
    pub fn with_text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.children.push(XNode::text(text));
        }
        self
    }

    pub fn with_annotation(mut self, annotation: XAttribute) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Same name, attributes and annotations; new children.
    pub fn rebuild_with(&self, children: Vec<XNode>) -> XElement {
        XElement {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children,
            annotations: self.annotations.clone(),
        }
    }

    /// Replaces the value of an existing attribute in place, or appends.
    pub fn set_attribute(&mut self, name: XName, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(XAttribute::new(name, value)),
        }
    }

    pub fn attribute(&self, name: &XName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn annotations_named<'a>(&'a self, name: &'a XName) -> impl Iterator<Item = &'a str> + 'a {
        self.annotations
            .iter()
            .filter(move |a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn is(&self, name: &XName) -> bool {
        &self.name == name
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XElement> + '_ {
        self.children.iter().filter_map(XNode::as_element)
    }

    /// First child element with the given name.
    pub fn element(&self, name: &XName) -> Option<&XElement> {
        self.elements().find(|e| &e.name == name)
    }

    pub fn has_element(&self, name: &XName) -> bool {
        self.element(name).is_some()
    }

    /// All descendant elements in document order, not including `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    pub fn value(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &XElement, out: &mut String) {
    for child in &element.children {
        match child {
            XNode::Text(s) => out.push_str(s),
            XNode::Element(e) => collect_text(e, out),
        }
    }
}

/// Pre-order walk over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match self.stack.last_mut() {
                Some(top) => top.next(),
                None => return None,
            };
            match next {
                Some(XNode::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(XNode::Text(_)) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(local: &str) -> XName {
        XName::new("urn:test", local)
    }

    #[test]
    fn element_node_creation() {
        let node: XNode = XElement::new(n("test")).into();
        assert!(node.is_element());
        assert_eq!(node.name(), Some(&n("test")));
    }

    #[test]
    fn text_node_creation() {
        let node = XNode::text("Hello, World!");
        assert!(node.is_text());
        assert_eq!(node.text_content(), Some("Hello, World!"));
    }

    #[test]
    fn set_attribute_keeps_keys_unique() {
        let e = XElement::new(n("e"))
            .with_attr(n("a"), "1")
            .with_attr(n("b"), "2")
            .with_attr(n("a"), "3");
        assert_eq!(e.attributes.len(), 2);
        assert_eq!(e.attributes[0].name, n("a"));
        assert_eq!(e.attribute(&n("a")), Some("3"));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let tree = XElement::new(n("root"))
            .with_child(
                XElement::new(n("a"))
                    .with_child(XElement::new(n("a1")))
                    .with_text("x"),
            )
            .with_child(XElement::new(n("b")));
        let names: Vec<_> = tree.descendants().map(|e| e.name.local_name.as_str()).collect();
        assert_eq!(names, vec!["a", "a1", "b"]);
    }

    #[test]
    fn value_concatenates_nested_text() {
        let tree = XElement::new(n("p"))
            .with_child(XElement::new(n("r")).with_text("Hello"))
            .with_text(", ")
            .with_child(XElement::new(n("r")).with_text("world"));
        assert_eq!(tree.value(), "Hello, world");
    }

    #[test]
    fn empty_text_adds_no_child() {
        let e = XElement::new(n("t")).with_text("");
        assert!(e.children.is_empty());
    }

    #[test]
    fn rebuild_with_keeps_attributes_and_annotations() {
        let e = XElement::new(n("e"))
            .with_attr(n("a"), "1")
            .with_annotation(XAttribute::new(n("s"), "Inserted"))
            .with_text("old");
        let rebuilt = e.rebuild_with(vec![XNode::text("new")]);
        assert_eq!(rebuilt.attributes, e.attributes);
        assert_eq!(rebuilt.annotations, e.annotations);
        assert_eq!(rebuilt.value(), "new");
        assert_eq!(e.value(), "old");
    }
}
