//! Field normalizers: loosely-typed form values in, well-defined column
//! values (or nothing) out.
//!
//! Every function here is total. Missing, blank, or wrong-typed input
//! degrades to `None` ("omitted") instead of failing, so the dispatcher can
//! assemble attribute maps without per-field error handling. Omitted entries
//! are stripped by [`drop_omitted`] before the map crosses the wire, because
//! the board API rejects column keys it cannot interpret.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// A single column value in the board platform's wire vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Plain text column.
    Text(String),
    /// Email column: the address plus its display text.
    Email { email: String, text: String },
    /// Dropdown / multi-select column.
    Labels(Vec<String>),
    /// Status column addressed by label.
    StatusLabel(String),
    /// Status column addressed by index.
    StatusIndex(i64),
    /// People column: person ids, each sent as `{id, kind: "person"}`.
    People(Vec<i64>),
    /// Date column, serialized as `{date: "YYYY-MM-DD"}`.
    Date(NaiveDate),
    /// Caller-supplied structured value passed through untouched.
    Raw(Value),
}

impl ColumnValue {
    /// Render this value in the shape the board API expects.
    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Text(s) => json!(s),
            ColumnValue::Email { email, text } => json!({ "email": email, "text": text }),
            ColumnValue::Labels(labels) => json!({ "labels": labels }),
            ColumnValue::StatusLabel(label) => json!({ "label": label }),
            ColumnValue::StatusIndex(index) => json!({ "index": index }),
            ColumnValue::People(ids) => {
                let persons: Vec<Value> = ids
                    .iter()
                    .map(|id| json!({ "id": id, "kind": "person" }))
                    .collect();
                json!({ "personsAndTeams": persons })
            }
            ColumnValue::Date(date) => json!({ "date": date.format("%Y-%m-%d").to_string() }),
            ColumnValue::Raw(value) => value.clone(),
        }
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// JS-style falsiness: null, `false`, zero, and the empty string all count.
pub fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Trimmed, non-empty string or nothing. No coercion from other types.
pub fn normalize_string(v: Option<&Value>) -> Option<String> {
    let s = v?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// String form of every usable element, blanks dropped. Non-sequence input
/// yields an empty sequence rather than an error.
pub fn normalize_string_sequence(v: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = v else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => {
                if is_falsy(item) {
                    None
                } else {
                    Some(n.to_string())
                }
            }
            _ => None,
        })
        .collect()
}

/// Status column value: strings become `{label}`, numbers `{index}`, and
/// already-structured objects pass through unchanged.
pub fn normalize_status(v: Option<&Value>) -> Option<ColumnValue> {
    let v = v?;
    if is_falsy(v) {
        return None;
    }
    match v {
        Value::String(s) => Some(ColumnValue::StatusLabel(s.trim().to_string())),
        Value::Number(n) => {
            let index = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Some(ColumnValue::StatusIndex(index))
        }
        Value::Object(_) => Some(ColumnValue::Raw(v.clone())),
        _ => None,
    }
}

/// People column value from a single id, a sequence of ids, or an
/// already-structured object. Sequences that coerce to nothing are omitted.
pub fn normalize_assignees(v: Option<&Value>) -> Option<ColumnValue> {
    let v = v?;
    if is_falsy(v) {
        return None;
    }
    match v {
        Value::Number(_) => coerce_person_id(v).map(|id| ColumnValue::People(vec![id])),
        Value::Array(items) => {
            let ids: Vec<i64> = items.iter().filter_map(coerce_person_id).collect();
            if ids.is_empty() {
                None
            } else {
                Some(ColumnValue::People(ids))
            }
        }
        Value::Object(_) => Some(ColumnValue::Raw(v.clone())),
        _ => None,
    }
}

/// Numeric coercion for person ids: numbers directly, numeric strings via
/// parse. Anything non-finite or non-numeric is dropped.
fn coerce_person_id(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let parsed: f64 = s.trim().parse().ok()?;
            if parsed.is_finite() {
                Some(parsed as i64)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Strip omitted entries, preserving the insertion order of the rest.
pub fn drop_omitted<K: std::hash::Hash + Eq>(
    map: IndexMap<K, Option<ColumnValue>>,
) -> IndexMap<K, ColumnValue> {
    map.into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_string_trims_and_rejects_blank() {
        assert_eq!(
            normalize_string(Some(&json!("  hello  "))),
            Some("hello".to_string())
        );
        assert_eq!(normalize_string(Some(&json!("   "))), None);
        assert_eq!(normalize_string(Some(&json!(""))), None);
        assert_eq!(normalize_string(None), None);
    }

    #[test]
    fn normalize_string_never_coerces() {
        assert_eq!(normalize_string(Some(&json!(42))), None);
        assert_eq!(normalize_string(Some(&json!(true))), None);
        assert_eq!(normalize_string(Some(&json!(["a"]))), None);
        assert_eq!(normalize_string(Some(&json!(null))), None);
    }

    #[test]
    fn normalize_string_sequence_drops_blanks_and_non_strings() {
        let v = json!(["a", "  b ", "", "   ", null, false, 7, 0, {"x": 1}]);
        assert_eq!(
            normalize_string_sequence(Some(&v)),
            vec!["a".to_string(), "b".to_string(), "7".to_string()]
        );
    }

    #[test]
    fn normalize_string_sequence_non_array_is_empty() {
        assert!(normalize_string_sequence(Some(&json!("not a list"))).is_empty());
        assert!(normalize_string_sequence(Some(&json!(3))).is_empty());
        assert!(normalize_string_sequence(None).is_empty());
    }

    #[test]
    fn normalize_status_variants() {
        assert_eq!(
            normalize_status(Some(&json!(" In Progress "))),
            Some(ColumnValue::StatusLabel("In Progress".to_string()))
        );
        assert_eq!(
            normalize_status(Some(&json!(3))),
            Some(ColumnValue::StatusIndex(3))
        );
        let structured = json!({ "index": 5 });
        assert_eq!(
            normalize_status(Some(&structured)),
            Some(ColumnValue::Raw(structured.clone()))
        );
    }

    #[test]
    fn normalize_status_falsy_and_odd_types_are_omitted() {
        assert_eq!(normalize_status(Some(&json!(null))), None);
        assert_eq!(normalize_status(Some(&json!(false))), None);
        assert_eq!(normalize_status(Some(&json!(0))), None);
        assert_eq!(normalize_status(Some(&json!(""))), None);
        assert_eq!(normalize_status(Some(&json!([1, 2]))), None);
        assert_eq!(normalize_status(None), None);
    }

    #[test]
    fn normalize_assignees_single_number() {
        assert_eq!(
            normalize_assignees(Some(&json!(12345))),
            Some(ColumnValue::People(vec![12345]))
        );
    }

    #[test]
    fn normalize_assignees_sequence_coerces_and_filters() {
        assert_eq!(
            normalize_assignees(Some(&json!([1, "2", "junk", null, 3.0]))),
            Some(ColumnValue::People(vec![1, 2, 3]))
        );
        // Everything unusable -> omitted, not an empty set.
        assert_eq!(normalize_assignees(Some(&json!(["junk", null]))), None);
    }

    #[test]
    fn normalize_assignees_passthrough_and_falsy() {
        let structured = json!({ "personsAndTeams": [{ "id": 9, "kind": "person" }] });
        assert_eq!(
            normalize_assignees(Some(&structured)),
            Some(ColumnValue::Raw(structured.clone()))
        );
        assert_eq!(normalize_assignees(Some(&json!(null))), None);
        assert_eq!(normalize_assignees(Some(&json!(0))), None);
        assert_eq!(normalize_assignees(Some(&json!("alice"))), None);
        assert_eq!(normalize_assignees(None), None);
    }

    #[test]
    fn drop_omitted_strips_only_absent_entries() {
        let mut map: IndexMap<&'static str, Option<ColumnValue>> = IndexMap::new();
        map.insert("a", Some(ColumnValue::Text("x".to_string())));
        map.insert("b", None);
        map.insert("c", Some(ColumnValue::StatusIndex(1)));

        let kept = drop_omitted(map);
        let keys: Vec<&str> = kept.keys().copied().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn drop_omitted_is_identity_when_nothing_is_omitted() {
        let mut map: IndexMap<&'static str, Option<ColumnValue>> = IndexMap::new();
        map.insert("z", Some(ColumnValue::Text("1".to_string())));
        map.insert("a", Some(ColumnValue::Text("2".to_string())));

        let kept = drop_omitted(map);
        let keys: Vec<&str> = kept.keys().copied().collect();
        // Insertion order survives, no reordering.
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(kept["z"], ColumnValue::Text("1".to_string()));
        assert_eq!(kept["a"], ColumnValue::Text("2".to_string()));
    }

    #[test]
    fn column_value_wire_shapes() {
        assert_eq!(
            ColumnValue::Email {
                email: "a@b.com".to_string(),
                text: "a@b.com".to_string()
            }
            .to_json(),
            json!({ "email": "a@b.com", "text": "a@b.com" })
        );
        assert_eq!(
            ColumnValue::Labels(vec!["Revenue".to_string()]).to_json(),
            json!({ "labels": ["Revenue"] })
        );
        assert_eq!(
            ColumnValue::People(vec![7]).to_json(),
            json!({ "personsAndTeams": [{ "id": 7, "kind": "person" }] })
        );
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(
            ColumnValue::Date(date).to_json(),
            json!({ "date": "2026-03-09" })
        );
    }
}
