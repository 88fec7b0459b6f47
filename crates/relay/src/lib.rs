//! stepmap chat relay.
//!
//! A stateless HTTP service. `POST /chat` takes `{ "message": string }`,
//! forwards it to a [`pipeline::ChatProvider`] with the fixed pipeline
//! assistant prompt, and answers `{ "reply": string }` or `{ "error": string }`.
//! When started with a step catalog it also serves the step document, sidebar
//! panels, and scenes.
//!
//! ## Routes
//!
//! | Route | Answer |
//! |-------|--------|
//! | `POST /chat` | `200 {reply}`, `400 {error}` (missing message / bad body), `413 {error}` (body over 2 MB), `500 {error}` (provider failure) |
//! | `GET /data/pipeline.json` | The step document |
//! | `GET /steps/{id}` | The sidebar panel for a step, `404` if unknown |
//! | `GET /scene?expanded=..` | The scene after toggling the listed steps |
//! | `GET /health` | `{status, timestamp}` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP framing and status mapping live here; the chat
//! backend is whatever [`pipeline::ChatProvider`] the composition root injects.
//! Handlers share only immutable state, so no locking is involved.

pub mod chat;
pub mod error;
pub mod server;
pub mod state;
pub mod steps;

pub use chat::{ChatBody, ChatReplyBody};
pub use error::{ErrorBody, RelayError};
pub use server::{router, serve};
pub use state::RelayState;
