//! Name registry.
//!
//! The coalescer and orderer never spell out tag names; they look them up
//! here. `WmlNames::default()` is the ECMA-376 transitional vocabulary;
//! callers targeting another schema revision build their own.

use crate::xml::namespaces::{PT, W};
use crate::xml::xname::{XName, XML_NS};
use once_cell::sync::Lazy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmlNames {
    pub paragraph: XName,
    pub paragraph_properties: XName,
    pub run: XName,
    pub run_properties: XName,
    pub text: XName,
    pub deleted_text: XName,
    pub field_instruction_text: XName,
    pub insertion: XName,
    pub deletion: XName,
    pub text_box_content: XName,
    pub author: XName,
    pub date: XName,
    pub revision_id: XName,
    /// Opaque provenance attribute carried on text elements.
    pub status: XName,
    pub space: XName,
    /// Containers that hold a run sequence of their own, independent of
    /// the paragraph they sit in.
    pub run_containers: Vec<XName>,
}

impl Default for WmlNames {
    fn default() -> Self {
        Self {
            paragraph: W::p(),
            paragraph_properties: W::pPr(),
            run: W::r(),
            run_properties: W::rPr(),
            text: W::t(),
            deleted_text: W::delText(),
            field_instruction_text: W::instrText(),
            insertion: W::ins(),
            deletion: W::del(),
            text_box_content: W::txbxContent(),
            author: W::author(),
            date: W::date(),
            revision_id: W::id(),
            status: PT::Status(),
            space: XName::new(XML_NS, "space"),
            run_containers: vec![
                W::bdo(),
                W::customXml(),
                W::dir(),
                W::fldSimple(),
                W::hyperlink(),
                W::moveFrom(),
                W::moveTo(),
                W::sdtContent(),
            ],
        }
    }
}

impl WmlNames {
    pub fn is_run_container(&self, name: &XName) -> bool {
        self.run_containers.contains(name)
    }

    /// Elements whose text is gathered when runs are merged.
    pub fn is_text_bearing(&self, name: &XName) -> bool {
        name == &self.text || name == &self.deleted_text || name == &self.field_instruction_text
    }
}

pub static WML_NAMES: Lazy<WmlNames> = Lazy::new(WmlNames::default);
