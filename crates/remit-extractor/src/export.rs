//! Result export helpers
//!
//! A succeeded pipeline's record is exportable as a canonical JSON object
//! with exactly the six keys in stable order, under a timestamped
//! filename suitable for a download.

use chrono::{DateTime, Utc};
use remit_domain::StatementRecord;

/// Serialize a record to its canonical pretty-printed JSON form.
///
/// Key order follows the record's declaration order, so repeated exports
/// of the same record are byte-identical.
pub fn record_to_json(record: &StatementRecord) -> String {
    // A struct of plain strings cannot fail to serialize.
    serde_json::to_string_pretty(record).unwrap_or_default()
}

/// Timestamped filename for a record download.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("statement-fields-{}.json", now.format("%Y%m%d-%H%M%S"))
}
