pub mod error;
pub mod types;
pub mod util;
pub mod wml;
pub mod xml;

pub use error::{CanonError, Result};
pub use types::{RevisionStamp, RunCategory};

pub use wml::{
    canonical_order, canonicalize, canonicalize_with_report, coalesce, coalesce_paragraphs,
    is_canonical, CanonicalizeReport, CanonicalizeSettings, Canonicalizer, ElementOrderer,
    OrderingTables, RunCoalescer, WmlNames,
};
pub use xml::{parse, serialize_document, XElement, XNode};
