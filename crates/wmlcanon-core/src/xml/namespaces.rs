#![allow(non_snake_case)]

use super::xname::XName;

pub mod W {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    // Block and inline structure
    pub fn document() -> XName { XName::new(NS, "document") }
    pub fn body() -> XName { XName::new(NS, "body") }
    pub fn p() -> XName { XName::new(NS, "p") }
    pub fn pPr() -> XName { XName::new(NS, "pPr") }
    pub fn r() -> XName { XName::new(NS, "r") }
    pub fn rPr() -> XName { XName::new(NS, "rPr") }
    pub fn t() -> XName { XName::new(NS, "t") }
    pub fn delText() -> XName { XName::new(NS, "delText") }
    pub fn instrText() -> XName { XName::new(NS, "instrText") }
    pub fn br() -> XName { XName::new(NS, "br") }
    pub fn tab() -> XName { XName::new(NS, "tab") }
    pub fn txbxContent() -> XName { XName::new(NS, "txbxContent") }

    // Revisions
    pub fn ins() -> XName { XName::new(NS, "ins") }
    pub fn del() -> XName { XName::new(NS, "del") }
    pub fn moveFrom() -> XName { XName::new(NS, "moveFrom") }
    pub fn moveTo() -> XName { XName::new(NS, "moveTo") }
    pub fn author() -> XName { XName::new(NS, "author") }
    pub fn date() -> XName { XName::new(NS, "date") }
    pub fn id() -> XName { XName::new(NS, "id") }

    // Containers that hold their own run sequence
    pub fn bdo() -> XName { XName::new(NS, "bdo") }
    pub fn customXml() -> XName { XName::new(NS, "customXml") }
    pub fn dir() -> XName { XName::new(NS, "dir") }
    pub fn fldSimple() -> XName { XName::new(NS, "fldSimple") }
    pub fn hyperlink() -> XName { XName::new(NS, "hyperlink") }
    pub fn sdtContent() -> XName { XName::new(NS, "sdtContent") }

    // Schema-ordered property containers
    pub fn tblPr() -> XName { XName::new(NS, "tblPr") }
    pub fn tcPr() -> XName { XName::new(NS, "tcPr") }
    pub fn tblBorders() -> XName { XName::new(NS, "tblBorders") }
    pub fn tcBorders() -> XName { XName::new(NS, "tcBorders") }
    pub fn pBdr() -> XName { XName::new(NS, "pBdr") }
    pub fn settings() -> XName { XName::new(NS, "settings") }

    // Property children
    pub fn pStyle() -> XName { XName::new(NS, "pStyle") }
    pub fn numPr() -> XName { XName::new(NS, "numPr") }
    pub fn b() -> XName { XName::new(NS, "b") }
    pub fn i() -> XName { XName::new(NS, "i") }
    pub fn rsidR() -> XName { XName::new(NS, "rsidR") }
}

pub mod W14 {
    use super::XName;
    pub const NS: &str = "http://schemas.microsoft.com/office/word/2010/wordml";

    pub fn shadow() -> XName { XName::new(NS, "shadow") }
    pub fn textOutline() -> XName { XName::new(NS, "textOutline") }
    pub fn textFill() -> XName { XName::new(NS, "textFill") }
    pub fn scene3d() -> XName { XName::new(NS, "scene3d") }
    pub fn props3d() -> XName { XName::new(NS, "props3d") }
}

pub mod M {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

    pub fn mathPr() -> XName { XName::new(NS, "mathPr") }
}

pub mod PT {
    use super::XName;
    pub const NS: &str = "http://powertools.codeplex.com/2011";

    pub fn Status() -> XName { XName::new(NS, "Status") }
}
