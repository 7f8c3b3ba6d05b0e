//! Schema element ordering.
//!
//! WordprocessingML property containers are `xsd:sequence`s: their children
//! must appear in the order the schema lists them or consumers may reject
//! the part. [`ElementOrderer`] rebuilds a tree so that every registered
//! container has its children stably sorted by rank. Children a table does
//! not list sort after every listed child, whatever ranks the table uses.
//!
//! Ranks cover:
//! - pPr (paragraph properties)
//! - rPr (run properties)
//! - tblPr (table properties)
//! - tcPr (table cell properties)
//! - tblBorders, tcBorders, pBdr (border properties)
//! - settings (document settings part)
//!
//! Paragraphs and runs are not table-driven: their properties element is
//! moved to the front and everything else keeps its order.

use super::registry::{WmlNames, WML_NAMES};
use crate::xml::namespaces::{M, W, W14};
use crate::xml::node::{XElement, XNode};
use crate::xml::xname::XName;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub type OrderTable = HashMap<XName, i32>;

const PARAGRAPH_PROPERTIES: &[(&str, i32)] = &[
    ("pStyle", 10),
    ("keepNext", 20),
    ("keepLines", 30),
    ("pageBreakBefore", 40),
    ("framePr", 50),
    ("widowControl", 60),
    ("numPr", 70),
    ("suppressLineNumbers", 80),
    ("pBdr", 90),
    ("shd", 100),
    ("tabs", 120),
    ("suppressAutoHyphens", 130),
    ("kinsoku", 140),
    ("wordWrap", 150),
    ("overflowPunct", 160),
    ("topLinePunct", 170),
    ("autoSpaceDE", 180),
    ("autoSpaceDN", 190),
    ("bidi", 200),
    ("adjustRightInd", 210),
    ("snapToGrid", 220),
    ("spacing", 230),
    ("ind", 240),
    ("contextualSpacing", 250),
    ("mirrorIndents", 260),
    ("suppressOverlap", 270),
    ("jc", 280),
    ("textDirection", 290),
    ("textAlignment", 300),
    ("textboxTightWrap", 310),
    ("outlineLvl", 320),
    ("divId", 330),
    ("cnfStyle", 340),
    ("rPr", 350),
    ("sectPr", 360),
    ("pPrChange", 370),
];

// Move markers rank ahead of ins/del.
const RUN_PROPERTIES: &[(&str, i32)] = &[
    ("moveFrom", 5),
    ("moveTo", 7),
    ("ins", 10),
    ("del", 20),
    ("rStyle", 30),
    ("rFonts", 40),
    ("b", 50),
    ("bCs", 60),
    ("i", 70),
    ("iCs", 80),
    ("caps", 90),
    ("smallCaps", 100),
    ("strike", 110),
    ("dstrike", 120),
    ("outline", 130),
    ("shadow", 140),
    ("emboss", 150),
    ("imprint", 160),
    ("noProof", 170),
    ("snapToGrid", 180),
    ("vanish", 190),
    ("webHidden", 200),
    ("color", 210),
    ("spacing", 220),
    ("w", 230),
    ("kern", 240),
    ("position", 250),
    ("sz", 260),
    ("szCs", 320),
    ("highlight", 330),
    ("u", 340),
    ("effect", 350),
    ("bdr", 360),
    ("shd", 370),
    ("fitText", 380),
    ("vertAlign", 390),
    ("rtl", 400),
    ("cs", 410),
    ("em", 420),
    ("lang", 430),
    ("eastAsianLayout", 440),
    ("specVanish", 450),
    ("oMath", 460),
];

const TABLE_PROPERTIES: &[(&str, i32)] = &[
    ("tblStyle", 10),
    ("tblpPr", 20),
    ("tblOverlap", 30),
    ("bidiVisual", 40),
    ("tblStyleRowBandSize", 50),
    ("tblStyleColBandSize", 60),
    ("tblW", 70),
    ("jc", 80),
    ("tblCellSpacing", 90),
    ("tblInd", 100),
    ("tblBorders", 110),
    ("shd", 120),
    ("tblLayout", 130),
    ("tblCellMar", 140),
    ("tblLook", 150),
    ("tblCaption", 160),
    ("tblDescription", 170),
];

const TABLE_CELL_PROPERTIES: &[(&str, i32)] = &[
    ("cnfStyle", 10),
    ("tcW", 20),
    ("gridSpan", 30),
    ("hMerge", 40),
    ("vMerge", 50),
    ("tcBorders", 60),
    ("shd", 70),
    ("noWrap", 80),
    ("tcMar", 90),
    ("textDirection", 100),
    ("tcFitText", 110),
    ("vAlign", 120),
    ("hideMark", 130),
    ("headers", 140),
];

const TABLE_BORDERS: &[(&str, i32)] = &[
    ("top", 10),
    ("left", 20),
    ("start", 30),
    ("bottom", 40),
    ("right", 50),
    ("end", 60),
    ("insideH", 70),
    ("insideV", 80),
];

const TABLE_CELL_BORDERS: &[(&str, i32)] = &[
    ("top", 10),
    ("start", 20),
    ("left", 30),
    ("bottom", 40),
    ("right", 50),
    ("end", 60),
    ("insideH", 70),
    ("insideV", 80),
    ("tl2br", 90),
    ("tr2bl", 100),
];

const PARAGRAPH_BORDERS: &[(&str, i32)] = &[
    ("top", 10),
    ("left", 20),
    ("bottom", 30),
    ("right", 40),
    ("between", 50),
    ("bar", 60),
];

const SETTINGS: &[(&str, i32)] = &[
    ("writeProtection", 10),
    ("view", 20),
    ("zoom", 30),
    ("removePersonalInformation", 40),
    ("removeDateAndTime", 50),
    ("doNotDisplayPageBoundaries", 60),
    ("displayBackgroundShape", 70),
    ("printPostScriptOverText", 80),
    ("printFractionalCharacterWidth", 90),
    ("printFormsData", 100),
    ("embedTrueTypeFonts", 110),
    ("embedSystemFonts", 120),
    ("saveSubsetFonts", 130),
    ("saveFormsData", 140),
    ("mirrorMargins", 150),
    ("alignBordersAndEdges", 160),
    ("bordersDoNotSurroundHeader", 170),
    ("bordersDoNotSurroundFooter", 180),
    ("gutterAtTop", 190),
    ("hideSpellingErrors", 200),
    ("hideGrammaticalErrors", 210),
    ("activeWritingStyle", 220),
    ("proofState", 230),
    ("formsDesign", 240),
    ("attachedTemplate", 250),
    ("linkStyles", 260),
    ("stylePaneFormatFilter", 270),
    ("stylePaneSortMethod", 280),
    ("documentType", 290),
    ("mailMerge", 300),
    ("revisionView", 310),
    ("trackRevisions", 320),
    ("doNotTrackMoves", 330),
    ("doNotTrackFormatting", 340),
    ("documentProtection", 350),
    ("autoFormatOverride", 360),
    ("styleLockTheme", 370),
    ("styleLockQFSet", 380),
    ("defaultTabStop", 390),
    ("autoHyphenation", 400),
    ("consecutiveHyphenLimit", 410),
    ("hyphenationZone", 420),
    ("doNotHyphenateCaps", 430),
    ("showEnvelope", 440),
    ("summaryLength", 450),
    ("clickAndTypeStyle", 460),
    ("defaultTableStyle", 470),
    ("evenAndOddHeaders", 480),
    ("bookFoldRevPrinting", 490),
    ("bookFoldPrinting", 500),
    ("bookFoldPrintingSheets", 510),
    ("drawingGridHorizontalSpacing", 520),
    ("drawingGridVerticalSpacing", 530),
    ("displayHorizontalDrawingGridEvery", 540),
    ("displayVerticalDrawingGridEvery", 550),
    ("doNotUseMarginsForDrawingGridOrigin", 560),
    ("drawingGridHorizontalOrigin", 570),
    ("drawingGridVerticalOrigin", 580),
    ("doNotShadeFormData", 590),
    ("noPunctuationKerning", 600),
    ("characterSpacingControl", 610),
    ("printTwoOnOne", 620),
    ("strictFirstAndLastChars", 630),
    ("noLineBreaksAfter", 640),
    ("noLineBreaksBefore", 650),
    ("savePreviewPicture", 660),
    ("doNotValidateAgainstSchema", 670),
    ("saveInvalidXml", 680),
    ("ignoreMixedContent", 690),
    ("alwaysShowPlaceholderText", 700),
    ("doNotDemarcateInvalidXml", 710),
    ("saveXmlDataOnly", 720),
    ("useXSLTWhenSaving", 730),
    ("saveThroughXslt", 740),
    ("showXMLTags", 750),
    ("alwaysMergeEmptyNamespace", 760),
    ("updateFields", 770),
    ("footnotePr", 780),
    ("endnotePr", 790),
    ("compat", 800),
    ("docVars", 810),
    ("rsids", 820),
    ("attachedSchema", 840),
    ("themeFontLang", 850),
    ("clrSchemeMapping", 860),
    ("doNotIncludeSubdocsInStats", 870),
    ("doNotAutoCompressPictures", 880),
    ("forceUpgrade", 890),
    ("smartTagType", 920),
];

fn word_table(entries: &[(&str, i32)]) -> OrderTable {
    entries
        .iter()
        .map(|&(local, rank)| (XName::new(W::NS, local), rank))
        .collect()
}

/// Rank tables keyed by container name.
#[derive(Debug, Clone, Default)]
pub struct OrderingTables {
    tables: HashMap<XName, OrderTable>,
}

impl OrderingTables {
    /// No registered containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled WordprocessingML tables.
    pub fn standard() -> Self {
        let mut run_properties = word_table(RUN_PROPERTIES);
        run_properties.extend([
            (W14::shadow(), 270),
            (W14::textOutline(), 280),
            (W14::textFill(), 290),
            (W14::scene3d(), 300),
            (W14::props3d(), 310),
        ]);

        let mut settings = word_table(SETTINGS);
        settings.insert(M::mathPr(), 830);

        let mut tables = Self::new();
        tables.insert(W::pPr(), word_table(PARAGRAPH_PROPERTIES));
        tables.insert(W::rPr(), run_properties);
        tables.insert(W::tblPr(), word_table(TABLE_PROPERTIES));
        tables.insert(W::tcPr(), word_table(TABLE_CELL_PROPERTIES));
        tables.insert(W::tblBorders(), word_table(TABLE_BORDERS));
        tables.insert(W::tcBorders(), word_table(TABLE_CELL_BORDERS));
        tables.insert(W::pBdr(), word_table(PARAGRAPH_BORDERS));
        tables.insert(W::settings(), settings);
        tables
    }

    /// Registers or replaces the table for `container`.
    pub fn insert(&mut self, container: XName, table: OrderTable) {
        self.tables.insert(container, table);
    }

    pub fn table(&self, container: &XName) -> Option<&OrderTable> {
        self.tables.get(container)
    }

    /// Rank of `child` inside `container`; `None` when either is unknown.
    pub fn rank(&self, container: &XName, child: &XName) -> Option<i32> {
        self.table(container).and_then(|table| table.get(child)).copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

pub static STANDARD_TABLES: Lazy<OrderingTables> = Lazy::new(OrderingTables::standard);

/// Listed children by rank, then everything else.
fn sort_key(table: &OrderTable, node: &XNode) -> (bool, i32) {
    match node.name().and_then(|name| table.get(name)) {
        Some(&rank) => (false, rank),
        None => (true, 0),
    }
}

pub struct ElementOrderer<'a> {
    names: &'a WmlNames,
    tables: &'a OrderingTables,
}

impl<'a> ElementOrderer<'a> {
    pub fn new(names: &'a WmlNames, tables: &'a OrderingTables) -> Self {
        Self { names, tables }
    }

    pub fn canonical_order(&self, node: &XNode) -> XNode {
        match node {
            XNode::Element(element) => XNode::Element(self.order_element(element)),
            XNode::Text(_) => node.clone(),
        }
    }

    /// Orders `element` and everything below it. Children are ordered
    /// before their parent is sorted.
    pub fn order_element(&self, element: &XElement) -> XElement {
        let mut children: Vec<XNode> = element
            .children
            .iter()
            .map(|child| self.canonical_order(child))
            .collect();

        if element.is(&self.names.paragraph) {
            children = hoist(children, &self.names.paragraph_properties);
        } else if element.is(&self.names.run) {
            children = hoist(children, &self.names.run_properties);
        } else if let Some(table) = self.tables.table(&element.name) {
            // sort_by_key is stable: equal ranks keep document order.
            children.sort_by_key(|child| sort_key(table, child));
        }

        element.rebuild_with(children)
    }
}

/// Moves every `properties` child to the front, keeping relative order on
/// both sides.
fn hoist(children: Vec<XNode>, properties: &XName) -> Vec<XNode> {
    let (mut hoisted, rest): (Vec<XNode>, Vec<XNode>) = children
        .into_iter()
        .partition(|child| child.name() == Some(properties));
    hoisted.extend(rest);
    hoisted
}

/// Orders `node` using the standard names and tables.
pub fn canonical_order(node: &XNode) -> XNode {
    ElementOrderer::new(&WML_NAMES, &STANDARD_TABLES).canonical_order(node)
}

/// Element form of [`canonical_order`].
pub fn order_element(element: &XElement) -> XElement {
    ElementOrderer::new(&WML_NAMES, &STANDARD_TABLES).order_element(element)
}
