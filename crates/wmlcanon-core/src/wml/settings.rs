use crate::error::{CanonError, Result};
use serde::{Deserialize, Serialize};

/// Settings for [`canonicalize`](super::canonicalize::canonicalize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeSettings {
    /// Merge adjacent runs with identical formatting.
    pub coalesce_runs: bool,

    /// Reorder children of schema-ordered containers.
    pub order_elements: bool,

    /// Compare revision timestamps in sortable UTC form rather than as
    /// written. Two insertions stamped `2024-03-01T09:30:00Z` and
    /// `2024-03-01T11:30:00+02:00` merge only when this is set.
    pub normalize_revision_dates: bool,
}

impl Default for CanonicalizeSettings {
    fn default() -> Self {
        Self {
            coalesce_runs: true,
            order_elements: true,
            normalize_revision_dates: true,
        }
    }
}

impl CanonicalizeSettings {
    /// Reads settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CanonError::Settings(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when neither transform is enabled.
    pub fn is_noop(&self) -> bool {
        !self.coalesce_runs && !self.order_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let settings = CanonicalizeSettings::default();
        assert!(settings.coalesce_runs);
        assert!(settings.order_elements);
        assert!(settings.normalize_revision_dates);
        assert!(!settings.is_noop());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = CanonicalizeSettings::from_json(r#"{ "order_elements": false }"#).unwrap();
        assert!(settings.coalesce_runs);
        assert!(!settings.order_elements);
        assert!(settings.normalize_revision_dates);
    }

    #[test]
    fn invalid_json_is_a_settings_error() {
        let err = CanonicalizeSettings::from_json(r#"{ "coalesce_runs": "yes" }"#).unwrap_err();
        assert!(matches!(err, CanonError::Settings(_)));
    }

    #[test]
    fn json_round_trip() {
        let settings = CanonicalizeSettings {
            coalesce_runs: false,
            order_elements: false,
            normalize_revision_dates: false,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(CanonicalizeSettings::from_json(&json).unwrap(), settings);
        assert!(settings.is_noop());
    }
}
