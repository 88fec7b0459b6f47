//! Process configuration, read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OPENAI_API_KEY` | required |
//! | `PORT` | `3000` |
//! | `STEPMAP_HOST` | `0.0.0.0` |
//! | `OPENAI_MODEL` | `gpt-3.5-turbo` |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `OPENAI_TIMEOUT_SECS` | unset: no timeout |
//! | `STEPMAP_STEPS` | unset: no step routes |
//! | `STEPMAP_LOG_FORMAT` | `json` |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset: no span export |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use llm::{OpenAiConfig, DEFAULT_MODEL, OPENAI_BASE_URL};

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;
/// Bind address used when `STEPMAP_HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(anyhow!("unknown log format '{other}' (expected 'json' or 'pretty')")),
        }
    }
}

/// Everything the composition root needs to start the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Chat provider connection settings.
    pub openai: OpenAiConfig,
    /// Step document to serve, if any.
    pub steps_path: Option<PathBuf>,
    /// Log line format.
    pub log_format: LogFormat,
    /// OTLP collector for span export, if any.
    pub otlp_endpoint: Option<String>,
}

impl RelayConfig {
    /// Reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = get("OPENAI_API_KEY") else {
            bail!("OPENAI_API_KEY is not set");
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().with_context(|| {
                    format!("OPENAI_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'")
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let log_format = match get("STEPMAP_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().context("STEPMAP_LOG_FORMAT")?,
            None => LogFormat::Json,
        };

        let openai = OpenAiConfig::new(api_key.trim())
            .with_base_url(get("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_string()))
            .with_model(get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()))
            .with_timeout(timeout);

        Ok(Self {
            host: get("STEPMAP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            openai,
            steps_path: get("STEPMAP_STEPS").map(PathBuf::from),
            log_format,
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
