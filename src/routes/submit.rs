use crate::error::{ServerError, ServerResult};
use crate::mapper::map_submission;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Response for an accepted submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub item_id: String,
    pub destination_id: String,
    pub item_title: String,
}

/// Accept a form submission and create the corresponding board item.
///
/// The body is an open JSON object; no key is required. The submission is
/// classified by its `issue_type` field, remapped to the matching board's
/// column layout, and forwarded to the platform as one `create_item`
/// mutation. Malformed fields never reject a submission; they are dropped
/// by normalization. Only two things fail the request: a missing board
/// credential (checked before any mapping) and a downstream failure from
/// the platform.
pub async fn submit_form(
    State(state): State<Arc<ServerState>>,
    Json(submission): Json<Value>,
) -> ServerResult<impl IntoResponse> {
    // Credential check comes first: no point mapping a submission we can
    // never forward.
    if state.config.monday.credential().is_none() {
        return Err(ServerError::Config(
            "board API key is not configured".to_string(),
        ));
    }

    let mapped = map_submission(&submission, &state.config.destinations);

    tracing::info!(
        destination_id = %mapped.destination_id,
        item_title = %mapped.item_title,
        attribute_count = mapped.attributes.len(),
        "Forwarding submission"
    );

    match state
        .creator
        .create_item(&mapped.destination_id, &mapped.item_title, &mapped.attributes)
        .await
    {
        Ok(created) => {
            tracing::info!(item_id = %created.id, "Board item created");
            Ok(Json(SubmitResponse {
                success: true,
                item_id: created.id,
                destination_id: mapped.destination_id,
                item_title: mapped.item_title,
            }))
        }
        Err(err) => {
            tracing::error!(
                destination_id = %mapped.destination_id,
                error = %err,
                "Board item creation failed"
            );
            Err(ServerError::Upstream {
                message: err.to_string(),
                destination_id: mapped.destination_id,
                item_title: mapped.item_title,
            })
        }
    }
}
