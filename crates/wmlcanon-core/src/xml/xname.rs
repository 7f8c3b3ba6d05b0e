use std::fmt;

/// Namespace of `xmlns:prefix` declarations when they are kept as attributes.
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";

/// Namespace bound to the reserved `xml` prefix (`xml:space`, `xml:lang`).
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace-qualified name. Two names are equal only when both the
/// namespace and the local name match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl XName {
    pub fn new(namespace: &str, local_name: &str) -> Self {
        Self {
            namespace: if namespace.is_empty() {
                None
            } else {
                Some(namespace.to_string())
            },
            local_name: local_name.to_string(),
        }
    }

    pub fn local(local_name: &str) -> Self {
        Self {
            namespace: None,
            local_name: local_name.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// True for `xmlns` and `xmlns:prefix` attribute names.
    pub fn is_namespace_declaration(&self) -> bool {
        match self.namespace.as_deref() {
            Some(ns) => ns == XMLNS_NS,
            None => self.local_name == "xmlns",
        }
    }
}

impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XAttribute {
    pub name: XName,
    pub value: String,
}

impl XAttribute {
    pub fn new(name: XName, value: &str) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}
