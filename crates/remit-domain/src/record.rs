//! StatementRecord - the six-field extraction result

use serde::{Deserialize, Serialize};

/// Sentinel value for a field the model could not locate in the document.
pub const NOT_FOUND: &str = "Not Found";

/// The six field keys, in canonical serialization order.
///
/// The prompt builder names exactly these keys and the response parser
/// reads exactly these keys, so the two stay in lockstep through this
/// constant.
pub const FIELD_KEYS: [&str; 6] = [
    "issuer",
    "cardLast4",
    "statementPeriod",
    "dueDate",
    "totalBalance",
    "minimumPayment",
];

fn not_found() -> String {
    NOT_FOUND.to_string()
}

/// Structured fields extracted from one credit-card statement.
///
/// Every field is always present: a field the model could not resolve
/// holds the [`NOT_FOUND`] sentinel rather than being absent or null.
/// Values are natural-language strings taken from the model output as-is;
/// in particular `card_last4` is *expected* to be four digits but is not
/// validated (the model is trusted).
///
/// Serialization emits exactly the six camelCase keys in declaration
/// order, which is the canonical export shape.
///
/// # Examples
///
/// ```
/// use remit_domain::{StatementRecord, NOT_FOUND};
///
/// let record = StatementRecord::not_found();
/// assert_eq!(record.issuer, NOT_FOUND);
/// assert!(record.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRecord {
    /// Issuing bank or card network
    #[serde(default = "not_found")]
    pub issuer: String,

    /// Last four digits of the card number
    #[serde(default = "not_found")]
    pub card_last4: String,

    /// Statement period (e.g. "Jan 1 - Jan 31, 2025")
    #[serde(default = "not_found")]
    pub statement_period: String,

    /// Payment due date
    #[serde(default = "not_found")]
    pub due_date: String,

    /// Total balance for the period
    #[serde(default = "not_found")]
    pub total_balance: String,

    /// Minimum payment due
    #[serde(default = "not_found")]
    pub minimum_payment: String,
}

impl StatementRecord {
    /// A record with every field set to the [`NOT_FOUND`] sentinel.
    ///
    /// This is the guaranteed worst-case output of the response parser:
    /// a fully-unrecognized document still yields a complete record.
    pub fn not_found() -> Self {
        Self {
            issuer: not_found(),
            card_last4: not_found(),
            statement_period: not_found(),
            due_date: not_found(),
            total_balance: not_found(),
            minimum_payment: not_found(),
        }
    }

    /// True when no field was resolved (all six hold the sentinel).
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| *v == NOT_FOUND)
    }

    /// The six (key, value) pairs in canonical order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("issuer", &self.issuer),
            ("cardLast4", &self.card_last4),
            ("statementPeriod", &self.statement_period),
            ("dueDate", &self.due_date),
            ("totalBalance", &self.total_balance),
            ("minimumPayment", &self.minimum_payment),
        ]
    }
}

impl Default for StatementRecord {
    fn default() -> Self {
        Self::not_found()
    }
}
