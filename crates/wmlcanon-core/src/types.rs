use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of sibling a merge group is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunCategory {
    /// `w:r` whose only content child is `w:t`
    TextRun,
    /// `w:r` whose only content child is `w:instrText`
    FieldInstructionRun,
    /// `w:ins` wrapping a single text run
    TrackedInsertion,
    /// `w:del` wrapping a single deleted-text run
    TrackedDeletion,
}

impl RunCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextRun => "text-run",
            Self::FieldInstructionRun => "field-instruction-run",
            Self::TrackedInsertion => "tracked-insertion",
            Self::TrackedDeletion => "tracked-deletion",
        }
    }
}

impl fmt::Display for RunCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revision metadata that must match before two tracked-change wrappers merge.
///
/// Field order is fixed: author, date, id. Deletions do not compare ids, so
/// `id` is `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RevisionStamp {
    pub author: String,
    pub date: String,
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_category_displays_kebab_case() {
        assert_eq!(RunCategory::TrackedInsertion.to_string(), "tracked-insertion");
        assert_eq!(RunCategory::FieldInstructionRun.as_str(), "field-instruction-run");
    }

    #[test]
    fn revision_stamps_compare_every_field() {
        let a = RevisionStamp {
            author: "Ann".to_string(),
            date: "2024-01-01T00:00:00".to_string(),
            id: Some("1".to_string()),
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.id = Some("2".to_string());
        assert_ne!(a, b);
    }
}
