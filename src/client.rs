//! Item-creation client for the board platform's GraphQL API.
//!
//! The HTTP boundary depends on the [`ItemCreator`] trait, not on the
//! concrete client, so handlers are testable without network access.
//! [`MondayClient`] is the production implementation: one `create_item`
//! mutation per call, no retries. Duplicate submissions may create duplicate
//! items; the platform offers no idempotency key for this mutation.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::MondayConfig;
use crate::mapper::normalize::ColumnValue;

/// The platform's item-creation mutation. Column values travel as a
/// JSON-encoded string because the `JSON!` scalar requires it.
const CREATE_ITEM_MUTATION: &str = "\
mutation ($boardId: ID!, $itemName: String!, $columnValues: JSON!) {
  create_item(board_id: $boardId, item_name: $itemName, column_values: $columnValues) {
    id
  }
}";

pub type ClientResult<T> = Result<T, ClientError>;

/// Item-creation failure modes.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("board API key is not configured")]
    MissingCredential,

    #[error("request to board API failed: {0}")]
    Transport(String),

    #[error("board API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("board API rejected the mutation: {0}")]
    Api(String),

    #[error("board API response did not contain a created item id")]
    MissingItemId,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// A successfully created board item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub id: String,
}

/// Creates one item on a destination board.
#[async_trait]
pub trait ItemCreator: Send + Sync {
    async fn create_item(
        &self,
        destination_id: &str,
        item_name: &str,
        column_values: &IndexMap<String, ColumnValue>,
    ) -> ClientResult<CreatedItem>;
}

/// reqwest-based client for the monday.com v2 GraphQL endpoint.
pub struct MondayClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl MondayClient {
    pub fn new(config: &MondayConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.credential().map(str::to_string),
        })
    }
}

#[async_trait]
impl ItemCreator for MondayClient {
    async fn create_item(
        &self,
        destination_id: &str,
        item_name: &str,
        column_values: &IndexMap<String, ColumnValue>,
    ) -> ClientResult<CreatedItem> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingCredential)?;

        // IndexMap serializes in insertion order; ColumnValue renders the
        // platform's wire shapes.
        let column_values_json = serde_json::to_string(column_values)
            .map_err(|e| ClientError::Transport(format!("failed to encode column values: {e}")))?;

        let payload = json!({
            "query": CREATE_ITEM_MUTATION,
            "variables": {
                "boardId": destination_id,
                "itemName": item_name,
                "columnValues": column_values_json,
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("invalid JSON response: {e}")))?;

        parse_create_item_response(body)
    }
}

/// Extract the created item id, treating a GraphQL `errors` list or a
/// missing id as failure even when the HTTP status was 200.
fn parse_create_item_response(body: Value) -> ClientResult<CreatedItem> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::Api(joined));
        }
    }

    let id = body
        .get("data")
        .and_then(|d| d.get("create_item"))
        .and_then(|item| item.get("id"));

    match id {
        Some(Value::String(s)) if !s.is_empty() => Ok(CreatedItem { id: s.clone() }),
        Some(Value::Number(n)) => Ok(CreatedItem { id: n.to_string() }),
        _ => Err(ClientError::MissingItemId),
    }
}
