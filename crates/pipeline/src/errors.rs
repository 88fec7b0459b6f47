//! Error types for the stepmap domain.
//!
//! [`CatalogError`] covers a step document that cannot become a
//! [`crate::StepCatalog`]. [`ChatError`] is what a [`crate::ChatProvider`]
//! reports when no reply text could be obtained.
//!
//! Graph transitions have no error type: an id the graph cannot act on is
//! reported through [`crate::ToggleOutcome`] and leaves the state untouched.

use thiserror::Error;

use crate::StepId;

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors produced while loading a step document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not JSON, or not shaped like `{ "steps": [...] }`.
    #[error("Step document could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two steps anywhere in the tree share an id.
    ///
    /// Ids key the visible node set, so a duplicate would make expansion
    /// ambiguous.
    #[error("Duplicate step id {id} in step document")]
    DuplicateStepId {
        /// The id that appears more than once.
        id: StepId,
    },
}

// ---------------------------------------------------------------------------
// Chat provider errors
// ---------------------------------------------------------------------------

/// Errors reported by a chat completion provider.
///
/// The detail carried here is for server-side logs. The relay maps every
/// variant to the same generic client response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset, timeout).
    #[error("Completion API unreachable: {message}")]
    Transport {
        /// Transport-level description of the failure.
        message: String,
    },

    /// The completion API answered with a non-success status.
    #[error("Completion API returned status {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider-supplied error message, or the status reason.
        message: String,
    },

    /// The completion API answered 2xx with a body that is not a completion.
    #[error("Completion API response could not be parsed: {message}")]
    MalformedResponse {
        /// Parser description of what was wrong.
        message: String,
    },

    /// The completion carried no reply text.
    #[error("Completion API returned no reply text")]
    EmptyReply,
}
