//! Run coalescing.
//!
//! Editing leaves a paragraph's text split across many adjacent runs that
//! carry identical formatting. [`RunCoalescer::coalesce`] rebuilds a
//! run-bearing container so that each maximal sequence of mergeable siblings
//! with equal [`GroupKey`]s becomes a single node:
//!
//! - text runs and field-instruction runs become one run,
//! - tracked insertions become one `w:ins` wrapping one run,
//! - tracked deletions become one `w:del` wrapping one run.
//!
//! Everything else passes through. Passed-through subtrees are searched for
//! nested run sequences (hyperlinks, fields, content controls, text boxes)
//! which are coalesced independently of the container around them.

use super::fingerprint::{grouping_key, GroupKey};
use super::registry::{WmlNames, WML_NAMES};
use super::settings::CanonicalizeSettings;
use crate::error::Result;
use crate::types::RunCategory;
use crate::util::{descendants_trimmed, group_adjacent, needs_space_preserve, string_concatenate};
use crate::xml::node::{XElement, XNode};
use crate::xml::xname::{XAttribute, XName};
use tracing::{debug, trace};

pub struct RunCoalescer<'a> {
    names: &'a WmlNames,
    normalize_revision_dates: bool,
}

impl<'a> RunCoalescer<'a> {
    pub fn new(names: &'a WmlNames) -> Self {
        Self {
            names,
            normalize_revision_dates: true,
        }
    }

    pub fn with_settings(names: &'a WmlNames, settings: &CanonicalizeSettings) -> Self {
        Self {
            names,
            normalize_revision_dates: settings.normalize_revision_dates,
        }
    }

    /// Returns `container` with its adjacent mergeable children merged and
    /// its nested run sequences coalesced. The input is not modified.
    ///
    /// Fails only if a run-properties element cannot be serialized for its
    /// fingerprint.
    pub fn coalesce(&self, container: &XElement) -> Result<XElement> {
        let mut keyed: Vec<(GroupKey, &XNode)> = Vec::with_capacity(container.children.len());
        for child in &container.children {
            keyed.push((grouping_key(child, self.names, self.normalize_revision_dates)?, child));
        }
        let groups = group_adjacent(keyed, |(key, _)| key.clone());

        trace!(
            container = %container.name,
            elements = container.elements().count(),
            groups = groups.len(),
            "coalescing run container"
        );

        let mut children = Vec::with_capacity(groups.len());
        for (key, members) in groups {
            match key {
                GroupKey::Sentinel => {
                    for (_, node) in members {
                        children.push(self.descend(node)?);
                    }
                }
                GroupKey::Mergeable { category, .. } => {
                    let elements: Vec<&XElement> =
                        members.iter().filter_map(|(_, node)| node.as_element()).collect();
                    let Some((&first, _)) = elements.split_first() else {
                        // Mergeable keys are only given to elements.
                        children.extend(members.iter().map(|(_, node)| (*node).clone()));
                        continue;
                    };
                    if elements.len() > 1 {
                        debug!(%category, members = elements.len(), "merging adjacent siblings");
                    }
                    children.push(self.merge(category, first, &elements).into());
                }
            }
        }

        Ok(container.rebuild_with(children))
    }

    /// Builds the single node that replaces `members`. `first` supplies the
    /// properties and wrapper attributes.
    fn merge(&self, category: RunCategory, first: &XElement, members: &[&XElement]) -> XElement {
        let names = self.names;
        let text = self.merged_text(members);

        match category {
            RunCategory::TextRun => self.build_run(
                first.element(&names.run_properties),
                &names.text,
                &text,
                self.statuses(members),
            ),
            RunCategory::FieldInstructionRun => self.build_run(
                first.element(&names.run_properties),
                &names.field_instruction_text,
                &text,
                Vec::new(),
            ),
            RunCategory::TrackedInsertion => XElement::new(names.insertion.clone())
                .with_attributes(first.attributes.iter().cloned())
                .with_child(self.build_run(
                    wrapped_properties(first, names),
                    &names.text,
                    &text,
                    self.statuses(members),
                )),
            RunCategory::TrackedDeletion => XElement::new(names.deletion.clone())
                .with_attributes(first.attributes.iter().cloned())
                .with_child(self.build_run(
                    wrapped_properties(first, names),
                    &names.deleted_text,
                    &text,
                    Vec::new(),
                )),
        }
    }

    fn build_run(
        &self,
        properties: Option<&XElement>,
        text_name: &XName,
        text: &str,
        statuses: Vec<String>,
    ) -> XElement {
        let mut text_element = XElement::new(text_name.clone());
        if needs_space_preserve(text) {
            text_element.set_attribute(self.names.space.clone(), "preserve");
        }
        let text_element = match statuses.as_slice() {
            [] => text_element.with_text(text),
            [status, rest @ ..] if rest.iter().all(|s| s == status) => {
                text_element.set_attribute(self.names.status.clone(), status);
                text_element.with_text(text)
            }
            // Conflicting values cannot share one attribute.
            _ => statuses
                .iter()
                .fold(text_element.with_text(text), |element, status| {
                    element.with_annotation(XAttribute::new(self.names.status.clone(), status))
                }),
        };

        XElement::new(self.names.run.clone())
            .with_children(properties.cloned().map(XNode::Element))
            .with_child(text_element)
    }

    fn is_text_box(&self, element: &XElement) -> bool {
        element.is(&self.names.text_box_content)
    }

    /// Text of every member in order, not crossing into text boxes.
    fn merged_text(&self, members: &[&XElement]) -> String {
        let names = self.names;
        string_concatenate(members.iter().flat_map(move |member| {
            descendants_trimmed(member, move |e| e.is(&names.text_box_content))
                .filter(move |e| names.is_text_bearing(&e.name))
                .map(XElement::value)
        }))
    }

    /// Status values from the first text element of each member, in member
    /// order. Annotations from an earlier merge are read back so that
    /// coalescing twice gives the same list.
    fn statuses(&self, members: &[&XElement]) -> Vec<String> {
        let names = self.names;
        let mut statuses = Vec::new();
        for member in members {
            let first_text = descendants_trimmed(member, |e| e.is(&names.text_box_content)).find(|e| e.is(&names.text));
            if let Some(text) = first_text {
                statuses.extend(
                    text.attribute(&names.status)
                        .into_iter()
                        .chain(text.annotations_named(&names.status))
                        .map(str::to_string),
                );
            }
        }
        statuses
    }

    fn map_children<F>(&self, element: &XElement, f: F) -> Result<Vec<XNode>>
    where
        F: Fn(&Self, &XNode) -> Result<XNode>,
    {
        element.children.iter().map(|child| f(self, child)).collect()
    }

    /// Rebuilds a passed-through child, coalescing any run sequence found
    /// below it.
    fn descend(&self, node: &XNode) -> Result<XNode> {
        let XNode::Element(element) = node else {
            return Ok(node.clone());
        };

        let rebuilt = if self.is_text_box(element) {
            self.rebuild_text_box(element)?
        } else if self.names.is_run_container(&element.name) {
            self.coalesce(element)?
        } else {
            element.rebuild_with(self.map_children(element, Self::descend)?)
        };
        Ok(rebuilt.into())
    }

    fn rebuild_text_box(&self, text_box: &XElement) -> Result<XElement> {
        Ok(text_box.rebuild_with(self.map_children(text_box, Self::descend_in_text_box)?))
    }

    /// Text box content holds whole paragraphs; each is coalesced on its own.
    fn descend_in_text_box(&self, node: &XNode) -> Result<XNode> {
        let XNode::Element(element) = node else {
            return Ok(node.clone());
        };

        if element.is(&self.names.paragraph) {
            return Ok(self.coalesce(element)?.into());
        }
        if self.is_text_box(element) {
            return Ok(self.rebuild_text_box(element)?.into());
        }

        let rebuilt = element.rebuild_with(self.map_children(element, Self::descend_in_text_box)?);
        if self.names.is_run_container(&rebuilt.name) {
            Ok(self.coalesce(&rebuilt)?.into())
        } else {
            Ok(rebuilt.into())
        }
    }
}

/// Run properties of the run inside a tracked-change wrapper.
fn wrapped_properties<'e>(wrapper: &'e XElement, names: &WmlNames) -> Option<&'e XElement> {
    wrapper
        .element(&names.run)
        .and_then(|run| run.element(&names.run_properties))
}

/// Coalesces `container` using the standard WordprocessingML names.
pub fn coalesce(container: &XElement) -> Result<XElement> {
    RunCoalescer::new(&WML_NAMES).coalesce(container)
}
