//! Typed accessor layer over the untyped form submission.
//!
//! Submissions arrive as arbitrary JSON; no key is guaranteed present and no
//! value is guaranteed well-typed. `FormFields` wraps one submission and
//! exposes optional, already-normalized reads so the dispatcher never touches
//! raw `serde_json::Value` shape checks itself.

use serde_json::{Map, Value};

use super::normalize::{normalize_string, normalize_string_sequence};

/// Read-only view over one form submission.
#[derive(Debug, Clone, Copy)]
pub struct FormFields<'a> {
    record: Option<&'a Map<String, Value>>,
}

impl<'a> FormFields<'a> {
    /// Wrap a submission. Non-object payloads behave as an empty record.
    pub fn new(value: &'a Value) -> Self {
        Self {
            record: value.as_object(),
        }
    }

    /// Raw value under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.record?.get(key)
    }

    /// First raw value among `keys`, in order. Explicit nulls count as
    /// present so alias precedence stays stable.
    pub fn first_raw(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.raw(key))
    }

    /// Trimmed, non-empty string under `key`.
    pub fn string(&self, key: &str) -> Option<String> {
        normalize_string(self.raw(key))
    }

    /// Normalized string sequence under `key`; empty when absent or not a
    /// sequence.
    pub fn string_sequence(&self, key: &str) -> Vec<String> {
        normalize_string_sequence(self.raw(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_payload_reads_as_empty() {
        let payload = json!("not an object");
        let fields = FormFields::new(&payload);
        assert!(fields.raw("anything").is_none());
        assert!(fields.string("anything").is_none());
        assert!(fields.string_sequence("anything").is_empty());
    }

    #[test]
    fn string_accessor_normalizes() {
        let payload = json!({ "name": "  Ada  ", "blank": "   ", "num": 4 });
        let fields = FormFields::new(&payload);
        assert_eq!(fields.string("name"), Some("Ada".to_string()));
        assert_eq!(fields.string("blank"), None);
        assert_eq!(fields.string("num"), None);
        assert_eq!(fields.string("missing"), None);
    }

    #[test]
    fn first_raw_respects_key_order() {
        let payload = json!({ "person_id": 2, "person_ids": [3] });
        let fields = FormFields::new(&payload);
        let found = fields.first_raw(&["person", "person_id", "person_ids"]);
        assert_eq!(found, Some(&json!(2)));
    }
}
