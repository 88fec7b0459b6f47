//! Core domain for stepmap.
//!
//! This crate holds the step catalog, the expandable graph state that drives
//! the diagram, and the chat provider port. Presentation and infrastructure
//! crates build on these types; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! Step documents arrive as strings; chat completions arrive through
//! [`ChatProvider`] implementations supplied by infrastructure crates.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`StepId`, `RequestId`) |
//! | [`types`] | Step records (`Step`, `StepLink`) |
//! | [`catalog`] | The step data store (`StepCatalog`, `StepDocument`) |
//! | [`graph`] | Visible nodes/edges and expand/collapse (`GraphState`) |
//! | [`chat`] | The completion port (`ChatProvider`, `ChatRequest`) |
//! | [`errors`] | `CatalogError`, `ChatError` |

pub mod catalog;
pub mod chat;
pub mod errors;
pub mod graph;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use catalog::{StepCatalog, StepDocument};
pub use chat::{
    ChatMessage, ChatProvider, ChatReply, ChatRequest, ChatRole, DEFAULT_TEMPERATURE,
    PIPELINE_ASSISTANT_PROMPT,
};
pub use errors::{CatalogError, ChatError};
pub use graph::{Edge, GraphState, ToggleOutcome, VisibleNode};
pub use identifiers::{RequestId, StepId};
pub use types::{Step, StepLink};
