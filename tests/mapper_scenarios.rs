//! End-to-end mapping scenarios: one form submission in, one set of
//! item-creation arguments out, across all three issue types.

use chrono::Utc;
use intake_relay::config::DestinationConfig;
use intake_relay::map_submission;
use intake_relay::mapper::normalize::ColumnValue;
use serde_json::json;

fn destinations() -> DestinationConfig {
    DestinationConfig::default()
}

#[test]
fn functional_issue_submission_maps_to_issue_board() {
    let dest = destinations();
    let submission = json!({
        "issue_type": "Functional Issue",
        "problem_description": "Login broken",
        "submitter_email": "a@b.com",
    });

    let result = map_submission(&submission, &dest);

    assert_eq!(result.destination_id, dest.boards.functional_issue);
    assert_eq!(result.item_title, "Login broken");

    let cols = &dest.functional_issue_columns;
    assert_eq!(
        result.attributes[cols.submitter_email.as_str()],
        ColumnValue::Text("a@b.com".to_string())
    );
    // No status or assignee was supplied, so neither column appears.
    assert!(!result.attributes.contains_key(cols.status.as_str()));
    assert!(!result.attributes.contains_key(cols.assignees.as_str()));
    // The date column always resolves, defaulting to today.
    assert_eq!(
        result.attributes[cols.date.as_str()],
        ColumnValue::Date(Utc::now().date_naive())
    );
}

#[test]
fn functional_issue_with_status_and_assignees() {
    let dest = destinations();
    let submission = json!({
        "issue_type": "Functional Issue",
        "problem_description": "Export hangs",
        "status": "Blocked",
        "person_ids": [101, "202"],
        "date": "2026-02-01",
    });

    let result = map_submission(&submission, &dest);
    let cols = &dest.functional_issue_columns;

    assert_eq!(
        result.attributes[cols.status.as_str()],
        ColumnValue::StatusLabel("Blocked".to_string())
    );
    assert_eq!(
        result.attributes[cols.assignees.as_str()],
        ColumnValue::People(vec![101, 202])
    );
    assert_eq!(
        result.attributes[cols.date.as_str()],
        ColumnValue::Date(chrono::NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
    );
}

#[test]
fn data_request_submission_maps_to_request_board() {
    let mut dest = destinations();
    dest.boards.data_request = Some("77000088899".to_string());

    let submission = json!({
        "issue_type": "Data Request",
        "table_class": "Orders",
        "field_char": "amount",
    });

    let result = map_submission(&submission, &dest);

    assert_eq!(result.destination_id, "77000088899");
    assert_eq!(result.item_title, "Orders - amount");

    let cols = &dest.data_request_columns;
    assert_eq!(
        result.attributes[cols.table_class.as_str()],
        ColumnValue::Text("Orders".to_string())
    );
    assert_eq!(
        result.attributes[cols.field_char.as_str()],
        ColumnValue::Text("amount".to_string())
    );
}

#[test]
fn data_request_without_date_fields_uses_today() {
    let dest = destinations();
    let submission = json!({ "issue_type": "Data Request" });

    let result = map_submission(&submission, &dest);
    let cols = &dest.data_request_columns;

    assert_eq!(
        result.attributes[cols.date.as_str()],
        ColumnValue::Date(Utc::now().date_naive())
    );
}

#[test]
fn untyped_submission_takes_the_validation_path() {
    let dest = destinations();
    let submission = json!({
        "description": "Nulls in total",
        "target_column": "Revenue",
        "email": "x@y.com",
    });

    let result = map_submission(&submission, &dest);

    assert_eq!(result.destination_id, dest.boards.validation);
    assert_eq!(result.item_title, "Nulls in total");

    let cols = &dest.validation_columns;
    assert_eq!(
        result.attributes[cols.email.as_str()],
        ColumnValue::Email {
            email: "x@y.com".to_string(),
            text: "x@y.com".to_string(),
        }
    );
    assert_eq!(
        result.attributes[cols.target_columns.as_str()],
        ColumnValue::Labels(vec!["Revenue".to_string()])
    );
}

#[test]
fn empty_submission_degrades_to_fallbacks() {
    let dest = destinations();
    let submission = json!({});

    let result = map_submission(&submission, &dest);

    assert_eq!(result.destination_id, dest.boards.validation);
    assert_eq!(result.item_title, "New Validation Request");
    assert!(result.attributes.is_empty());
}

#[test]
fn non_object_submission_is_absorbed() {
    let dest = destinations();
    for submission in [json!("text"), json!(42), json!([1, 2, 3]), json!(null)] {
        let result = map_submission(&submission, &dest);
        assert_eq!(result.item_title, "New Validation Request");
        assert!(result.attributes.is_empty());
    }
}

#[test]
fn unrecognized_keys_are_ignored() {
    let dest = destinations();
    let submission = json!({
        "description": "Check totals",
        "csrf_token": "abc123",
        "utm_source": "newsletter",
        "nested": { "junk": [1, 2] },
    });

    let result = map_submission(&submission, &dest);
    let cols = &dest.validation_columns;

    assert_eq!(result.attributes.len(), 1);
    assert_eq!(
        result.attributes[cols.description.as_str()],
        ColumnValue::Text("Check totals".to_string())
    );
}
