//! Recover a structured record from raw model output
//!
//! Language models are unreliable about emitting pure JSON: they wrap
//! output in prose or code fences, drop keys, or answer with plain text.
//! Parsing is therefore layered and total - the worst possible input
//! still yields a complete all-sentinel record, so the controller never
//! has to special-case a parse failure.

use remit_domain::{StatementRecord, NOT_FOUND};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse raw model output into a statement record.
///
/// Total function: never fails. Recovery is attempted in priority order -
/// the whole trimmed text as a JSON object, then the substring between
/// the first `{` and the last `}` (which covers code fences and
/// surrounding prose), then the all-sentinel default.
pub fn parse_model_response(raw: &str) -> StatementRecord {
    let trimmed = raw.trim();

    // Some backends answer a bare "Not Found" for fully-unrecognized
    // input; that and an empty answer both mean "nothing extracted".
    if trimmed.is_empty() || trimmed == NOT_FOUND {
        return StatementRecord::not_found();
    }

    let basis = object_from(trimmed).or_else(|| embedded_object(trimmed));

    match basis {
        Some(map) => record_from_basis(&map),
        None => {
            warn!(
                response_len = trimmed.len(),
                "Model response contained no JSON object, returning default record"
            );
            StatementRecord::not_found()
        }
    }
}

/// Parse the text as a JSON object, rejecting non-object JSON.
fn object_from(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Try the substring between the first `{` and the last `}`, inclusive.
fn embedded_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    let candidate = &text[start..=end];
    let map = object_from(candidate)?;
    debug!(
        skipped_prefix = start,
        skipped_suffix = text.len() - end - 1,
        "Recovered JSON object embedded in prose"
    );
    Some(map)
}

/// Build the final record from whichever basis object parsed.
///
/// Each of the six keys is read individually; an absent key becomes the
/// sentinel, never a value copied from an unrelated key.
fn record_from_basis(basis: &Map<String, Value>) -> StatementRecord {
    StatementRecord {
        issuer: field_value(basis, "issuer"),
        card_last4: field_value(basis, "cardLast4"),
        statement_period: field_value(basis, "statementPeriod"),
        due_date: field_value(basis, "dueDate"),
        total_balance: field_value(basis, "totalBalance"),
        minimum_payment: field_value(basis, "minimumPayment"),
    }
}

/// Read one field from the basis object.
///
/// Field types are not validated: a numeric balance is accepted and
/// rendered as its JSON text. JSON null counts as unresolved - no field
/// of a published record is ever null.
fn field_value(basis: &Map<String, Value>, key: &str) -> String {
    match basis.get(key) {
        None | Some(Value::Null) => NOT_FOUND.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remit_domain::FIELD_KEYS;

    #[test]
    fn test_parse_clean_json() {
        let record = parse_model_response(
            r#"{"issuer":"Chase","cardLast4":"1234","statementPeriod":"Jan 1 - Jan 31","dueDate":"Feb 25","totalBalance":"$512.44","minimumPayment":"$35.00"}"#,
        );
        assert_eq!(record.issuer, "Chase");
        assert_eq!(record.card_last4, "1234");
        assert_eq!(record.minimum_payment, "$35.00");
    }

    #[test]
    fn test_parse_subset_of_keys_fills_sentinel() {
        let record = parse_model_response(r#"{"issuer":"Amex","dueDate":"Mar 3"}"#);
        assert_eq!(record.issuer, "Amex");
        assert_eq!(record.due_date, "Mar 3");
        assert_eq!(record.card_last4, NOT_FOUND);
        assert_eq!(record.statement_period, NOT_FOUND);
        assert_eq!(record.total_balance, NOT_FOUND);
        assert_eq!(record.minimum_payment, NOT_FOUND);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_model_response(""), StatementRecord::not_found());
        assert_eq!(parse_model_response("   \n  "), StatementRecord::not_found());
    }

    #[test]
    fn test_parse_bare_not_found() {
        assert_eq!(parse_model_response("Not Found"), StatementRecord::not_found());
        // Case-sensitive: anything else is just prose without JSON.
        assert_eq!(parse_model_response("not found"), StatementRecord::not_found());
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let raw = r#"Here is the data: {"issuer":"Chase","cardLast4":"1234","statementPeriod":"Not Found","dueDate":"Not Found","totalBalance":"Not Found","minimumPayment":"Not Found"} Let me know if needed."#;
        let record = parse_model_response(raw);
        assert_eq!(record.issuer, "Chase");
        assert_eq!(record.card_last4, "1234");
        assert_eq!(record.statement_period, NOT_FOUND);
    }

    #[test]
    fn test_parse_json_in_code_fence() {
        let raw = "```json\n{\"issuer\": \"Citi\", \"dueDate\": \"Apr 12\"}\n```";
        let record = parse_model_response(raw);
        assert_eq!(record.issuer, "Citi");
        assert_eq!(record.due_date, "Apr 12");
    }

    #[test]
    fn test_parse_garbage_never_fails() {
        assert_eq!(
            parse_model_response("not json at all"),
            StatementRecord::not_found()
        );
        assert_eq!(parse_model_response("{{{"), StatementRecord::not_found());
        assert_eq!(parse_model_response("}"), StatementRecord::not_found());
    }

    #[test]
    fn test_parse_non_object_json_is_rejected() {
        assert_eq!(parse_model_response("[1, 2, 3]"), StatementRecord::not_found());
        assert_eq!(parse_model_response("\"issuer\""), StatementRecord::not_found());
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let record =
            parse_model_response(r#"{"bank":"Chase","issuer":"Citi","note":"hello"}"#);
        assert_eq!(record.issuer, "Citi");
        // "bank" must not leak into any field.
        assert_eq!(record.card_last4, NOT_FOUND);
    }

    #[test]
    fn test_non_string_values_render_as_json_text() {
        let record = parse_model_response(r#"{"totalBalance": 512.44, "cardLast4": 1234}"#);
        assert_eq!(record.total_balance, "512.44");
        assert_eq!(record.card_last4, "1234");
    }

    #[test]
    fn test_null_value_becomes_sentinel() {
        let record = parse_model_response(r#"{"issuer": null, "dueDate": "May 1"}"#);
        assert_eq!(record.issuer, NOT_FOUND);
        assert_eq!(record.due_date, "May 1");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Totality: any input yields a complete record without
            /// panicking.
            #[test]
            fn parse_never_panics_and_record_is_complete(raw in ".{0,400}") {
                let record = parse_model_response(&raw);
                let keys: Vec<&str> = record.fields().iter().map(|(k, _)| *k).collect();
                prop_assert_eq!(keys, FIELD_KEYS.to_vec());
            }

            /// Any subset of the six keys parses to exactly those values,
            /// with the rest filled by the sentinel.
            #[test]
            fn subset_of_keys_round_trips(mask in proptest::collection::vec(any::<bool>(), 6)) {
                let mut obj = serde_json::Map::new();
                for (idx, key) in FIELD_KEYS.iter().enumerate() {
                    if mask[idx] {
                        obj.insert(key.to_string(), serde_json::json!(format!("value-{idx}")));
                    }
                }
                let raw = serde_json::to_string(&obj).unwrap();
                let record = parse_model_response(&raw);

                for (idx, (key, value)) in record.fields().iter().enumerate() {
                    if mask[idx] {
                        let expected = format!("value-{idx}");
                        prop_assert_eq!(*value, expected.as_str(), "key {}", key);
                    } else {
                        prop_assert_eq!(*value, NOT_FOUND, "key {}", key);
                    }
                }
            }
        }
    }
}
