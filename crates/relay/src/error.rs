//! Relay error type and its HTTP mapping.
//!
//! Every variant answers with `{ "error": <public message> }`. The public
//! message is fixed per variant; upstream detail carried by
//! [`RelayError::Completion`] is for logs only and never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pipeline::{ChatError, StepId};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Public message for the failure.
    pub error: String,
}

/// Errors a relay handler can answer with.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `message` absent, null, or empty.
    #[error("Missing message")]
    MissingMessage,

    /// The body is not JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The body exceeds the request size limit.
    #[error("Request body too large")]
    BodyTooLarge,

    /// The chat provider failed.
    #[error("Chat completion failed: {0}")]
    Completion(#[source] ChatError),

    /// A step route was hit but the relay runs without a catalog.
    #[error("No step catalog loaded")]
    NoCatalog,

    /// The requested step does not exist.
    #[error("Unknown step {0}")]
    UnknownStep(String),

    /// The `expanded` query parameter holds something other than step ids.
    #[error("Invalid expanded list: {0}")]
    InvalidExpanded(String),
}

impl RelayError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingMessage | Self::InvalidBody(_) | Self::InvalidExpanded(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoCatalog | Self::UnknownStep(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message returned to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingMessage => "Missing message",
            Self::InvalidBody(_) => "Invalid request body",
            Self::BodyTooLarge => "Request body too large",
            Self::Completion(_) => "Chat completion failed",
            Self::NoCatalog => "No step catalog loaded",
            Self::UnknownStep(_) => "Unknown step",
            Self::InvalidExpanded(_) => "Invalid expanded list",
        }
    }

    pub(crate) fn unknown_step(id: StepId) -> Self {
        Self::UnknownStep(id.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_errors_never_expose_upstream_detail() {
        let err = RelayError::Completion(ChatError::Upstream {
            status: 401,
            message: "Incorrect API key provided: sk-abc".to_string(),
        });

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Chat completion failed");
        assert!(err.to_string().contains("sk-abc"));
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(RelayError::MissingMessage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::unknown_step(StepId::new(9)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(RelayError::NoCatalog.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RelayError::BodyTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
