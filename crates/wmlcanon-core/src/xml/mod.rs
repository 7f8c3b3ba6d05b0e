pub mod builder;
pub mod namespaces;
pub mod node;
pub mod parser;
pub mod xname;

pub use builder::{canonical_string, serialize_document, serialize_element};
pub use namespaces::{M, PT, W, W14};
pub use node::{XElement, XNode};
pub use parser::{parse, parse_bytes, parse_with_options, ParseOptions};
pub use xname::{XAttribute, XName, XMLNS_NS, XML_NS};
