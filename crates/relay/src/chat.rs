//! `POST /chat`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use pipeline::{ChatRequest, RequestId};

use crate::{RelayError, RelayState};

/// Request body: `{ "message": string }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatBody {
    /// The user's question. Absent, null or blank is rejected.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body: `{ "reply": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReplyBody {
    /// The assistant's answer, as returned by the provider.
    pub reply: String,
}

/// Forwards one message to the chat provider.
///
/// Rejects a missing or blank message before any upstream call, and a body
/// over the size limit with 413. Provider failures are logged with their
/// detail and answered with a generic 500.
pub async fn chat(
    State(state): State<RelayState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReplyBody>, RelayError> {
    let request_id = RequestId::new_random();
    let span = tracing::info_span!(
        "chat",
        request_id = %request_id,
        provider = %state.provider.name()
    );

    async move {
        let Json(body) = body.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected chat body");
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RelayError::BodyTooLarge
            } else {
                RelayError::InvalidBody(rejection.body_text())
            }
        })?;

        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or(RelayError::MissingMessage)?;

        let request = ChatRequest::pipeline_assistant(message);
        match state.provider.complete(&request).await {
            Ok(reply) => {
                tracing::info!(reply_len = reply.text.len(), "Chat relayed");
                Ok(Json(ChatReplyBody { reply: reply.text }))
            }
            Err(err) => {
                tracing::error!(error = %err, "Chat provider failed");
                Err(RelayError::Completion(err))
            }
        }
    }
    .instrument(span)
    .await
}
