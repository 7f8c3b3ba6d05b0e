mod canonicalize;
mod coalesce;
mod fingerprint;
mod order;
mod registry;
mod settings;

pub use canonicalize::{
    canonicalize, canonicalize_with_report, coalesce_paragraphs, is_canonical, CanonicalizeReport,
    Canonicalizer,
};
pub use coalesce::{coalesce, RunCoalescer};
pub use fingerprint::{formatting_fingerprint, grouping_key, normalize_revision_date, GroupKey};
pub use order::{
    canonical_order, order_element, ElementOrderer, OrderTable, OrderingTables, STANDARD_TABLES,
};
pub use registry::{WmlNames, WML_NAMES};
pub use settings::CanonicalizeSettings;
