//! stepmap LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::ChatProvider`] trait for OpenAI-compatible chat
//! completion APIs. Other providers are added as new types in this crate
//! without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, and response
//! parsing live here. The relay sees only [`pipeline::ChatProvider`].
//!
//! ## Behaviour
//!
//! One upstream call per [`pipeline::ChatProvider::complete`]. No retry, no
//! back-off, and no request timeout unless [`OpenAiConfig::timeout`] is set.

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider, ProviderBuildError, DEFAULT_MODEL, OPENAI_BASE_URL};
