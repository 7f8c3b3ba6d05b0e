//! WordprocessingML canonicalization tests.
//!
//! Each test parses a literal part fragment, runs the public API and checks
//! the resulting tree.

use pretty_assertions::assert_eq;
use wmlcanon_core::wml::{canonical_order, coalesce, RunCoalescer, WmlNames};
use wmlcanon_core::xml::{
    canonical_string, parse, serialize_document, serialize_element, XElement, XName, XNode, PT, W, XML_NS,
};
use wmlcanon_core::{canonicalize, is_canonical, CanonicalizeSettings};

fn paragraph(body: &str) -> XElement {
    parse(&format!(r#"<w:p xmlns:w="{}">{}</w:p>"#, W::NS, body)).unwrap()
}

fn document(body: &str) -> XElement {
    parse(&format!(
        r#"<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W::NS,
        body
    ))
    .unwrap()
}

fn child_names(element: &XElement) -> Vec<String> {
    element.elements().map(|e| e.name.local_name.clone()).collect()
}

fn run_texts(element: &XElement) -> Vec<String> {
    element
        .elements()
        .filter(|e| e.is(&W::r()))
        .map(XElement::value)
        .collect()
}

fn space() -> XName {
    XName::new(XML_NS, "space")
}

// ============================================================================
// Coalescing
// ============================================================================

#[test]
fn hello_world_runs_merge() {
    let p = paragraph(
        r#"<w:r><w:rPr><w:sz w:val="24"/></w:rPr><w:t>Hello</w:t></w:r>
           <w:r><w:rPr><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">, </w:t></w:r>
           <w:r><w:rPr><w:sz w:val="24"/></w:rPr><w:t>world</w:t></w:r>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(run_texts(&result), vec!["Hello, world"]);
    let rpr = result.element(&W::r()).and_then(|r| r.element(&W::rPr())).unwrap();
    assert_eq!(canonical_string(rpr).unwrap(), r#"<w:rPr><w:sz w:val="24"/></w:rPr>"#);
}

#[test]
fn distinct_formatting_stays_split() {
    let p = paragraph(
        r#"<w:r><w:rPr><w:color w:val="FF0000"/></w:rPr><w:t>red</w:t></w:r>
           <w:r><w:rPr><w:color w:val="0000FF"/></w:rPr><w:t>blue</w:t></w:r>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(run_texts(&result), vec!["red", "blue"]);
}

#[test]
fn attribute_order_in_properties_does_not_matter() {
    let p = paragraph(
        r#"<w:r><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial"/></w:rPr><w:t>a</w:t></w:r>
           <w:r><w:rPr><w:rFonts w:hAnsi="Arial" w:ascii="Arial"/></w:rPr><w:t>b</w:t></w:r>"#,
    );
    assert_eq!(run_texts(&coalesce(&p).unwrap()), vec!["ab"]);
}

#[test]
fn sentinel_is_a_group_boundary() {
    let p = paragraph(
        r#"<w:r><w:t>A</w:t></w:r>
           <w:r><w:t>line</w:t><w:br/></w:r>
           <w:r><w:t>B</w:t></w:r>
           <w:r><w:t>C</w:t></w:r>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(run_texts(&result), vec!["A", "line", "BC"]);
    let sentinel = result.elements().nth(1).unwrap();
    assert_eq!(child_names(sentinel), vec!["t", "br"]);
}

#[test]
fn whitespace_marker_follows_merged_text() {
    let p = paragraph(r#"<w:r><w:t xml:space="preserve">foo </w:t></w:r><w:r><w:t xml:space="preserve"> bar</w:t></w:r>"#);
    let result = coalesce(&p).unwrap();
    let t = result.descendants().find(|e| e.is(&W::t())).unwrap();
    assert_eq!(t.value(), "foo  bar");
    assert_eq!(t.attribute(&space()), None);

    let p = paragraph(r#"<w:r><w:t xml:space="preserve"> </w:t></w:r>"#);
    let result = coalesce(&p).unwrap();
    let t = result.descendants().find(|e| e.is(&W::t())).unwrap();
    assert_eq!(t.value(), " ");
    assert_eq!(t.attribute(&space()), Some("preserve"));
}

#[test]
fn tracked_changes_merge_by_revision() {
    let p = paragraph(
        r#"<w:r><w:t xml:space="preserve">Kept </w:t></w:r>
           <w:del w:id="1" w:author="Ann" w:date="2024-05-01T10:00:00Z"><w:r><w:delText>old</w:delText></w:r></w:del>
           <w:del w:id="2" w:author="Ann" w:date="2024-05-01T10:00:00Z"><w:r><w:delText>er</w:delText></w:r></w:del>
           <w:ins w:id="3" w:author="Ann" w:date="2024-05-01T10:00:00Z"><w:r><w:t>new</w:t></w:r></w:ins>
           <w:ins w:id="3" w:author="Ann" w:date="2024-05-01T10:00:00Z"><w:r><w:t>er</w:t></w:r></w:ins>
           <w:ins w:id="3" w:author="Bob" w:date="2024-05-01T10:00:00Z"><w:r><w:t>!</w:t></w:r></w:ins>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(child_names(&result), vec!["r", "del", "ins", "ins"]);
    let values: Vec<String> = result.elements().map(XElement::value).collect();
    assert_eq!(values, vec!["Kept ", "older", "newer", "!"]);
    let del = result.element(&W::del()).unwrap();
    assert_eq!(del.attribute(&W::id()), Some("1"));
}

#[test]
fn runs_in_hyperlinks_and_fields_coalesce_on_their_own() {
    let p = paragraph(
        r#"<w:r><w:t>x</w:t></w:r>
           <w:fldSimple w:instr="PAGE"><w:r><w:t>1</w:t></w:r><w:r><w:t>2</w:t></w:r></w:fldSimple>
           <w:hyperlink w:anchor="top"><w:r><w:t>to</w:t></w:r><w:r><w:t>p</w:t></w:r></w:hyperlink>
           <w:r><w:t>y</w:t></w:r>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(child_names(&result), vec!["r", "fldSimple", "hyperlink", "r"]);
    assert_eq!(run_texts(result.element(&W::fldSimple()).unwrap()), vec!["12"]);
    assert_eq!(run_texts(result.element(&W::hyperlink()).unwrap()), vec!["top"]);
}

#[test]
fn text_box_paragraphs_are_coalesced_without_leaking_text() {
    let p = paragraph(
        r#"<w:r><w:t>out</w:t></w:r>
           <w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>in</w:t></w:r><w:r><w:t>side</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r>
           <w:r><w:t>side</w:t></w:r>"#,
    );
    let result = coalesce(&p).unwrap();
    assert_eq!(result.elements().count(), 3);
    let inner = result
        .descendants()
        .find(|e| e.is(&W::txbxContent()))
        .and_then(|tb| tb.element(&W::p()))
        .unwrap();
    assert_eq!(run_texts(inner), vec!["inside"]);
}

#[test]
fn coalescer_accepts_custom_run_containers() {
    let mut names = WmlNames::default();
    let custom = XName::new(W::NS, "smartTag");
    names.run_containers.push(custom.clone());

    let p = paragraph(r#"<w:smartTag><w:r><w:t>a</w:t></w:r><w:r><w:t>b</w:t></w:r></w:smartTag>"#);
    let default_result = coalesce(&p).unwrap();
    assert_eq!(run_texts(default_result.element(&custom).unwrap()), vec!["a", "b"]);

    let custom_result = RunCoalescer::new(&names).coalesce(&p).unwrap();
    assert_eq!(run_texts(custom_result.element(&custom).unwrap()), vec!["ab"]);
}

#[test]
fn input_tree_is_left_untouched() {
    let p = paragraph(r#"<w:r><w:t>a</w:t></w:r><w:r><w:t>b</w:t></w:r>"#);
    let snapshot = p.clone();
    let _ = coalesce(&p).unwrap();
    let _ = canonical_order(&XNode::Element(p.clone()));
    assert_eq!(p, snapshot);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn numbering_follows_style_reference() {
    let ppr = parse(&format!(
        r#"<w:pPr xmlns:w="{}"><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr><w:pStyle w:val="ListParagraph"/></w:pPr>"#,
        W::NS
    ))
    .unwrap();
    let ordered = canonical_order(&XNode::Element(ppr));
    let ordered = ordered.as_element().unwrap();
    assert_eq!(child_names(ordered), vec!["pStyle", "numPr"]);
    // numPr's own children are not a registered container.
    assert_eq!(child_names(ordered.element(&W::numPr()).unwrap()), vec!["ilvl", "numId"]);
}

#[test]
fn unknown_siblings_keep_relative_order() {
    let ppr = parse(&format!(
        r#"<w:pPr xmlns:w="{}" xmlns:x="urn:x"><x:B/><w:jc w:val="both"/><x:A/><w:keepNext/></w:pPr>"#,
        W::NS
    ))
    .unwrap();
    let ordered = canonical_order(&XNode::Element(ppr));
    assert_eq!(child_names(ordered.as_element().unwrap()), vec!["keepNext", "jc", "B", "A"]);
}

#[test]
fn paragraph_properties_are_hoisted() {
    let p = paragraph(r#"<w:r><w:t>1</w:t></w:r><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>2</w:t></w:r>"#);
    let ordered = canonical_order(&XNode::Element(p));
    let ordered = ordered.as_element().unwrap();
    assert_eq!(child_names(ordered), vec!["pPr", "r", "r"]);
    assert_eq!(run_texts(ordered), vec!["1", "2"]);
}

#[test]
fn text_nodes_pass_through_ordering() {
    assert_eq!(canonical_order(&XNode::text("plain")), XNode::text("plain"));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn canonicalize_orders_then_merges() {
    let doc = document(
        r#"<w:p>
             <w:r><w:t>Tit</w:t><w:rPr><w:i/><w:b/></w:rPr></w:r>
             <w:pPr><w:jc w:val="center"/><w:pStyle w:val="Title"/></w:pPr>
             <w:r><w:rPr><w:b/><w:i/></w:rPr><w:t>le</w:t></w:r>
           </w:p>"#,
    );
    let settings = CanonicalizeSettings::default();
    assert!(!is_canonical(&doc, &settings).unwrap());

    let result = canonicalize(&doc, &settings).unwrap();
    let p = result.descendants().find(|e| e.is(&W::p())).unwrap();
    assert_eq!(
        canonical_string(p).unwrap(),
        r#"<w:p><w:pPr><w:pStyle w:val="Title"/><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/><w:i/></w:rPr><w:t>Title</w:t></w:r></w:p>"#
    );
    assert!(is_canonical(&result, &settings).unwrap());
}

#[test]
fn canonical_part_serializes_with_declaration() {
    let doc = document(r#"<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t>, world</w:t></w:r></w:p>"#);
    let result = canonicalize(&doc, &CanonicalizeSettings::default()).unwrap();
    insta::assert_snapshot!(
        serialize_document(&result).unwrap(),
        @r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello, world</w:t></w:r></w:p></w:body></w:document>"#
    );
}

#[test]
fn serialized_output_parses_back_to_the_same_tree() {
    let doc = document(
        r#"<w:p><w:r><w:t xml:space="preserve">a </w:t></w:r><w:r><w:t>b</w:t></w:r></w:p>"#,
    );
    let result = canonicalize(&doc, &CanonicalizeSettings::default()).unwrap();
    let reparsed = parse(&serialize_document(&result).unwrap()).unwrap();
    assert_eq!(reparsed, result);
}

#[test]
fn status_survives_serialization() {
    let p = parse(&format!(
        r#"<w:p xmlns:w="{}" xmlns:pt="{}"><w:r><w:t pt:Status="Inserted">x</w:t></w:r></w:p>"#,
        W::NS,
        PT::NS
    ))
    .unwrap();
    let result = coalesce(&p).unwrap();
    let xml = serialize_element(&result).unwrap();
    assert!(xml.contains(r#"<w:t pt:Status="Inserted">x</w:t>"#), "{}", xml);
    assert_eq!(parse(&xml).unwrap(), result);
}

#[test]
fn shared_default_and_prefixed_namespace_round_trips() {
    let root = parse(r#"<a xmlns:p="urn:x" xmlns="urn:x" p:k="v"><b p:k="w"/></a>"#).unwrap();
    let xml = serialize_document(&root).unwrap();
    assert!(!xml.contains("ns:k"), "{}", xml);
    assert!(!xml.contains("xmlns:ns0"), "{}", xml);
    assert_eq!(parse(&xml).unwrap(), root);
}
