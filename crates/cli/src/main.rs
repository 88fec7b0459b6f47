//! stepmap entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Read configuration**: from the environment (see [`config`]).
//! 2. **Wire observability**: `tracing-subscriber` with a JSON layer and,
//!    when configured, an OpenTelemetry OTLP exporter (see [`telemetry`]).
//! 3. **Construct infrastructure**: the [`llm::OpenAiProvider`] and, when a
//!    step document is configured, the [`pipeline::StepCatalog`].
//! 4. **Serve**: run the [`relay`] until Ctrl-C / SIGTERM, then drain.

mod config;
mod telemetry;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use llm::OpenAiProvider;
use pipeline::StepCatalog;
use relay::RelayState;
use tokio::net::TcpListener;

use config::RelayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::from_env().context("invalid configuration")?;
    let _telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    tracing::info!(
        model = %config.openai.model,
        base_url = %config.openai.base_url,
        "Starting stepmap relay"
    );

    let provider = OpenAiProvider::new(config.openai.clone()).context("building chat provider")?;
    let mut state = RelayState::new(Arc::new(provider));

    if let Some(path) = &config.steps_path {
        let catalog = load_catalog(path).await.inspect_err(|err| {
            tracing::error!(path = %path.display(), error = %format!("{err:#}"), "Step document unusable");
        })?;
        state = state.with_catalog(Arc::new(catalog));
    }

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;

    relay::serve(listener, state, shutdown_signal())
        .await
        .context("relay server failed")?;

    Ok(())
}

async fn load_catalog(path: &Path) -> anyhow::Result<StepCatalog> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading step document {}", path.display()))?;
    let catalog = StepCatalog::from_json(&json)
        .with_context(|| format!("loading step document {}", path.display()))?;
    tracing::info!(path = %path.display(), steps = catalog.len(), "Step document loaded");
    Ok(catalog)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
