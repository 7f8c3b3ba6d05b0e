//! Formatting fingerprints and grouping keys.
//!
//! Two siblings merge only when their [`GroupKey`]s are equal and neither is
//! [`GroupKey::Sentinel`]. The key combines the node category, the canonical
//! serialization of the run properties, and for tracked changes the revision
//! metadata.

use super::registry::WmlNames;
use crate::error::Result;
use crate::types::{RevisionStamp, RunCategory};
use crate::xml::builder::canonical_string;
use crate::xml::node::{XElement, XNode};
use chrono::{DateTime, NaiveDateTime, Utc};

const SORTABLE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    /// Stands alone; never merged with a neighbor.
    Sentinel,
    Mergeable {
        category: RunCategory,
        fingerprint: String,
        revision: Option<RevisionStamp>,
    },
}

impl GroupKey {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel)
    }

    pub fn category(&self) -> Option<RunCategory> {
        match self {
            Self::Sentinel => None,
            Self::Mergeable { category, .. } => Some(*category),
        }
    }
}

/// Canonical serialization of a properties element. A missing element has
/// the empty fingerprint, distinct from that of an empty `<w:rPr/>`.
pub fn formatting_fingerprint(properties: Option<&XElement>) -> Result<String> {
    match properties {
        Some(p) => canonical_string(p),
        None => Ok(String::new()),
    }
}

/// Renders a revision timestamp in sortable form (`2024-03-01T09:30:00`),
/// converting offsets to UTC and dropping fractional seconds. Values that do
/// not parse are returned unchanged.
pub fn normalize_revision_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format(SORTABLE_DATE_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(SORTABLE_DATE_FORMAT).to_string();
    }
    raw.to_string()
}

/// Element children of a run other than its properties.
fn content_children<'a>(run: &'a XElement, names: &WmlNames) -> Vec<&'a XElement> {
    run.elements().filter(|e| !e.is(&names.run_properties)).collect()
}

/// The run's single content child, if it has exactly one.
fn single_content_child<'a>(run: &'a XElement, names: &WmlNames) -> Option<&'a XElement> {
    match content_children(run, names).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// The single run a tracked-change wrapper holds, if it holds exactly one
/// element and that element is a run.
fn single_wrapped_run<'a>(wrapper: &'a XElement, names: &WmlNames) -> Option<&'a XElement> {
    let mut elements = wrapper.elements();
    match (elements.next(), elements.next()) {
        (Some(run), None) if run.is(&names.run) => Some(run),
        _ => None,
    }
}

fn revision_stamp(wrapper: &XElement, names: &WmlNames, with_id: bool, normalize_dates: bool) -> RevisionStamp {
    let date = wrapper.attribute(&names.date).unwrap_or("");
    RevisionStamp {
        author: wrapper.attribute(&names.author).unwrap_or("").to_string(),
        date: if normalize_dates {
            normalize_revision_date(date)
        } else {
            date.to_string()
        },
        id: with_id.then(|| wrapper.attribute(&names.revision_id).unwrap_or("").to_string()),
    }
}

/// Computes the grouping key of one sibling.
///
/// Errors only when the properties element cannot be serialized.
pub fn grouping_key(node: &XNode, names: &WmlNames, normalize_dates: bool) -> Result<GroupKey> {
    let Some(element) = node.as_element() else {
        return Ok(GroupKey::Sentinel);
    };

    if element.is(&names.run) {
        let Some(content) = single_content_child(element, names) else {
            return Ok(GroupKey::Sentinel);
        };
        let category = if content.is(&names.text) {
            RunCategory::TextRun
        } else if content.is(&names.field_instruction_text) {
            RunCategory::FieldInstructionRun
        } else {
            return Ok(GroupKey::Sentinel);
        };
        return Ok(GroupKey::Mergeable {
            category,
            fingerprint: formatting_fingerprint(element.element(&names.run_properties))?,
            revision: None,
        });
    }

    if element.is(&names.insertion) {
        // An insertion that was later deleted is left alone.
        if element.has_element(&names.deletion) {
            return Ok(GroupKey::Sentinel);
        }
        return wrapped_run_key(
            element,
            names,
            &names.text,
            RunCategory::TrackedInsertion,
            true,
            normalize_dates,
        );
    }

    if element.is(&names.deletion) {
        return wrapped_run_key(
            element,
            names,
            &names.deleted_text,
            RunCategory::TrackedDeletion,
            false,
            normalize_dates,
        );
    }

    Ok(GroupKey::Sentinel)
}

fn wrapped_run_key(
    wrapper: &XElement,
    names: &WmlNames,
    content_name: &crate::xml::XName,
    category: RunCategory,
    with_id: bool,
    normalize_dates: bool,
) -> Result<GroupKey> {
    let Some(run) = single_wrapped_run(wrapper, names) else {
        return Ok(GroupKey::Sentinel);
    };
    match single_content_child(run, names) {
        Some(content) if content.is(content_name) => Ok(GroupKey::Mergeable {
            category,
            fingerprint: formatting_fingerprint(run.element(&names.run_properties))?,
            revision: Some(revision_stamp(wrapper, names, with_id, normalize_dates)),
        }),
        _ => Ok(GroupKey::Sentinel),
    }
}
