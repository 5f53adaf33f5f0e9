use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::dispatcher::{Dispatcher, InboundMessage};
use crate::models::{OwnerId, Reply};

/// Response body for a message that produced a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    pub owner_id: OwnerId,
    pub reply: Reply,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Messages
// ============================================================

/// Run one turn for the posting owner.
///
/// Ignored messages answer `204 No Content`.
pub async fn post_message(
    State(dispatcher): State<Dispatcher>,
    Json(message): Json<InboundMessage>,
) -> Result<Response, (StatusCode, String)> {
    if message.owner_id.as_str().trim().is_empty() {
        tracing::warn!("Rejected message without owner_id");
        return Err((StatusCode::BAD_REQUEST, "owner_id is required".to_string()));
    }

    let response = match dispatcher.dispatch(&message).await {
        Some(reply) => Json(OutboundReply {
            owner_id: message.owner_id,
            reply,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}
