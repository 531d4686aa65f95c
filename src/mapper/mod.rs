//! Request Mapper: form submission in, board mutation arguments out.
//!
//! The mapper is a pure function of the submission plus the injected
//! [`DestinationConfig`]. It classifies the submission by its `issue_type`
//! discriminator, resolves the target board, builds a human-readable item
//! title, and assembles the board-specific column values. Malformed or
//! missing fields never fail a request; they degrade to omitted attributes
//! and fallback titles.

pub mod fields;
pub mod normalize;

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;

use crate::config::DestinationConfig;
use fields::FormFields;
use normalize::{
    drop_omitted, normalize_assignees, normalize_status, ColumnValue,
};

/// Issue-type discriminator. Selects the target board and which mapping
/// rules apply. Unrecognized or absent values fall back to
/// [`IssueType::DataValidation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    DataValidation,
    FunctionalIssue,
    DataRequest,
}

impl IssueType {
    /// Classify a submission by exact match on its `issue_type` field.
    /// No case folding: the form sends fixed option strings.
    pub fn from_fields(fields: &FormFields<'_>) -> Self {
        match fields.string("issue_type").as_deref() {
            Some("Functional Issue") => IssueType::FunctionalIssue,
            Some("Data Request") => IssueType::DataRequest,
            _ => IssueType::DataValidation,
        }
    }
}

/// The mapper's output: everything the item-creation client needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingResult {
    /// Target board id.
    pub destination_id: String,
    /// Human-readable item title.
    pub item_title: String,
    /// Column id -> value, insertion-ordered, omitted entries excluded.
    pub attributes: IndexMap<String, ColumnValue>,
}

/// Map one form submission into item-creation arguments.
pub fn map_submission(
    submission: &serde_json::Value,
    destinations: &DestinationConfig,
) -> MappingResult {
    let fields = FormFields::new(submission);
    match IssueType::from_fields(&fields) {
        IssueType::FunctionalIssue => map_functional_issue(&fields, destinations),
        IssueType::DataRequest => map_data_request(&fields, destinations),
        IssueType::DataValidation => map_data_validation(&fields, destinations),
    }
}

fn map_functional_issue(
    fields: &FormFields<'_>,
    destinations: &DestinationConfig,
) -> MappingResult {
    let cols = &destinations.functional_issue_columns;

    let problem = fields.string("problem_description");
    let item_title = problem
        .clone()
        .or_else(|| fields.string("other_problem"))
        .or_else(|| {
            fields
                .string("functional_issue_type")
                .map(|kind| format!("Functional Issue: {kind}"))
        })
        .unwrap_or_else(|| "Functional Issue".to_string());

    let description = problem.or_else(|| fields.string("functional_issue_type"));

    let mut attributes: IndexMap<String, Option<ColumnValue>> = IndexMap::new();
    attributes.insert(cols.description.clone(), description.map(ColumnValue::Text));
    attributes.insert(
        cols.submitter_name.clone(),
        fields.string("submitter_name").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.submitter_email.clone(),
        fields.string("submitter_email").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.status.clone(),
        normalize_status(fields.first_raw(&["status", "status_label"])),
    );
    attributes.insert(
        cols.assignees.clone(),
        normalize_assignees(fields.first_raw(&["person", "person_id", "person_ids"])),
    );
    attributes.insert(
        cols.date.clone(),
        Some(ColumnValue::Date(resolve_date(fields.string("date"), None))),
    );

    MappingResult {
        destination_id: destinations.boards.functional_issue.clone(),
        item_title,
        attributes: drop_omitted(attributes),
    }
}

fn map_data_request(fields: &FormFields<'_>, destinations: &DestinationConfig) -> MappingResult {
    let cols = &destinations.data_request_columns;

    let table_class = fields.string("table_class");
    let field_char = fields.string("field_char");
    let item_title = match (&table_class, &field_char) {
        (Some(table), Some(field)) => format!("{table} - {field}"),
        (Some(table), None) => table.clone(),
        (None, Some(field)) => field.clone(),
        (None, None) => fields
            .string("reason")
            .unwrap_or_else(|| "New Data Request".to_string()),
    };

    let mut attributes: IndexMap<String, Option<ColumnValue>> = IndexMap::new();
    attributes.insert(
        cols.source.clone(),
        fields.string("source").map(ColumnValue::Text),
    );
    attributes.insert(cols.table_class.clone(), table_class.map(ColumnValue::Text));
    attributes.insert(cols.field_char.clone(), field_char.map(ColumnValue::Text));
    attributes.insert(
        cols.reason.clone(),
        fields.string("reason").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.submitter_name.clone(),
        fields.string("submitter_name").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.submitter_email.clone(),
        fields.string("submitter_email").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.date.clone(),
        Some(ColumnValue::Date(resolve_date(
            fields.string("date"),
            fields.string("timestamp_iso"),
        ))),
    );

    let destination_id = destinations
        .boards
        .data_request
        .clone()
        .unwrap_or_else(|| destinations.boards.validation.clone());

    MappingResult {
        destination_id,
        item_title,
        attributes: drop_omitted(attributes),
    }
}

fn map_data_validation(
    fields: &FormFields<'_>,
    destinations: &DestinationConfig,
) -> MappingResult {
    let cols = &destinations.validation_columns;

    let item_title = fields
        .string("description")
        .unwrap_or_else(|| "New Validation Request".to_string());

    // Multi-select labels: a list field wins over the single-select field
    // when both are supplied.
    let listed = fields.string_sequence("target_columns");
    let labels = if !listed.is_empty() {
        Some(ColumnValue::Labels(listed))
    } else {
        fields
            .string("target_column")
            .map(|column| ColumnValue::Labels(vec![column]))
    };

    let platforms = fields.string_sequence("platform_input");
    let platform_text = if platforms.is_empty() {
        None
    } else {
        Some(ColumnValue::Text(platforms.join(", ")))
    };

    let mut attributes: IndexMap<String, Option<ColumnValue>> = IndexMap::new();
    attributes.insert(
        cols.email.clone(),
        fields.string("email").map(|email| ColumnValue::Email {
            text: email.clone(),
            email,
        }),
    );
    attributes.insert(
        cols.functional_area.clone(),
        fields.string("functional_area").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.description.clone(),
        fields.string("description").map(ColumnValue::Text),
    );
    attributes.insert(cols.target_columns.clone(), labels);
    attributes.insert(
        cols.expected_value.clone(),
        fields.string("expected_value").map(ColumnValue::Text),
    );
    attributes.insert(
        cols.data_filters.clone(),
        fields.string("data_filters").map(ColumnValue::Text),
    );
    attributes.insert(cols.platform_input.clone(), platform_text);
    attributes.insert(
        cols.assignees.clone(),
        normalize_assignees(fields.raw("assigned_to")),
    );

    MappingResult {
        destination_id: destinations.boards.validation.clone(),
        item_title,
        attributes: drop_omitted(attributes),
    }
}

/// Resolve the item's date column: an explicit `YYYY-MM-DD` field wins, then
/// the date portion of an ISO timestamp, then the current UTC calendar date.
fn resolve_date(explicit: Option<String>, timestamp_iso: Option<String>) -> NaiveDate {
    explicit
        .as_deref()
        .and_then(parse_calendar_date)
        .or_else(|| {
            timestamp_iso
                .as_deref()
                .and_then(|stamp| stamp.split('T').next())
                .and_then(parse_calendar_date)
        })
        .unwrap_or_else(|| Utc::now().date_naive())
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
