//! Whole-part canonicalization: schema ordering followed by run coalescing.
//!
//! Ordering runs first so that run properties which differ only in child
//! order have equal fingerprints by the time runs are grouped. The
//! coalescer only ever emits properties it copied from an ordered run, so a
//! second pass changes nothing.

use super::coalesce::RunCoalescer;
use super::order::{ElementOrderer, OrderingTables, STANDARD_TABLES};
use super::registry::{WmlNames, WML_NAMES};
use super::settings::CanonicalizeSettings;
use crate::error::Result;
use crate::xml::node::{XElement, XNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What [`Canonicalizer::canonicalize_with_report`] did to a part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalizeReport {
    pub paragraphs: usize,
    pub runs_before: usize,
    pub runs_after: usize,
    /// Ordering alone would have changed the tree.
    pub order_changed: bool,
    /// The part was already canonical.
    pub canonical: bool,
}

pub struct Canonicalizer<'a> {
    names: &'a WmlNames,
    tables: &'a OrderingTables,
    settings: CanonicalizeSettings,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(names: &'a WmlNames, tables: &'a OrderingTables, settings: CanonicalizeSettings) -> Self {
        Self {
            names,
            tables,
            settings,
        }
    }

    pub fn settings(&self) -> &CanonicalizeSettings {
        &self.settings
    }

    fn coalescer(&self) -> RunCoalescer<'a> {
        RunCoalescer::with_settings(self.names, &self.settings)
    }

    fn orderer(&self) -> ElementOrderer<'a> {
        ElementOrderer::new(self.names, self.tables)
    }

    /// Replaces every outermost paragraph below `root` (or `root` itself)
    /// with its coalesced form.
    pub fn coalesce_paragraphs(&self, root: &XElement) -> Result<XElement> {
        coalesce_paragraphs_in(&self.coalescer(), self.names, root)
    }

    pub fn canonicalize(&self, root: &XElement) -> Result<XElement> {
        let ordered = if self.settings.order_elements {
            self.orderer().order_element(root)
        } else {
            root.clone()
        };
        if self.settings.coalesce_runs {
            self.coalesce_paragraphs(&ordered)
        } else {
            Ok(ordered)
        }
    }

    pub fn is_canonical(&self, root: &XElement) -> Result<bool> {
        Ok(self.canonicalize(root)? == *root)
    }

    pub fn canonicalize_with_report(&self, root: &XElement) -> Result<(XElement, CanonicalizeReport)> {
        let output = self.canonicalize(root)?;
        let order_changed = self.settings.order_elements && self.orderer().order_element(root) != *root;
        let report = CanonicalizeReport {
            paragraphs: count_named(root, &self.names.paragraph),
            runs_before: count_named(root, &self.names.run),
            runs_after: count_named(&output, &self.names.run),
            order_changed,
            canonical: output == *root,
        };
        debug!(
            paragraphs = report.paragraphs,
            runs_before = report.runs_before,
            runs_after = report.runs_after,
            order_changed = report.order_changed,
            "canonicalized part"
        );
        Ok((output, report))
    }
}

fn coalesce_paragraphs_in(coalescer: &RunCoalescer, names: &WmlNames, element: &XElement) -> Result<XElement> {
    if element.is(&names.paragraph) {
        return coalescer.coalesce(element);
    }
    let children = element
        .children
        .iter()
        .map(|child| -> Result<XNode> {
            match child {
                XNode::Element(e) => Ok(XNode::Element(coalesce_paragraphs_in(coalescer, names, e)?)),
                XNode::Text(_) => Ok(child.clone()),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(element.rebuild_with(children))
}

fn count_named(root: &XElement, name: &crate::xml::XName) -> usize {
    usize::from(root.is(name)) + root.descendants().filter(|e| e.is(name)).count()
}

fn standard(settings: &CanonicalizeSettings) -> Canonicalizer<'static> {
    Canonicalizer::new(&WML_NAMES, &STANDARD_TABLES, settings.clone())
}

/// Coalesces every paragraph of a part using the standard names.
pub fn coalesce_paragraphs(root: &XElement) -> Result<XElement> {
    standard(&CanonicalizeSettings::default()).coalesce_paragraphs(root)
}

pub fn canonicalize(root: &XElement, settings: &CanonicalizeSettings) -> Result<XElement> {
    standard(settings).canonicalize(root)
}

pub fn is_canonical(root: &XElement, settings: &CanonicalizeSettings) -> Result<bool> {
    standard(settings).is_canonical(root)
}

pub fn canonicalize_with_report(
    root: &XElement,
    settings: &CanonicalizeSettings,
) -> Result<(XElement, CanonicalizeReport)> {
    standard(settings).canonicalize_with_report(root)
}
