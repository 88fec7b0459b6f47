//! State shared by every relay handler.

use std::sync::Arc;

use pipeline::{ChatProvider, StepCatalog};

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct RelayState {
    /// Completes chat requests for `POST /chat`.
    pub provider: Arc<dyn ChatProvider>,
    /// Step data served by the read-only step routes, when configured.
    pub catalog: Option<Arc<StepCatalog>>,
}

impl RelayState {
    /// State for a relay that only forwards chat messages.
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            catalog: None,
        }
    }

    /// Adds a step catalog for the step routes.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<StepCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }
}
