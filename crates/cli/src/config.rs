//! Layered configuration.
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed with `RESEARCH_` (`__` separates nesting,
//!    e.g. `RESEARCH_SEARCH__BASE_URL`)
//! 2. Working-directory config file (`.research/config.toml`)
//! 3. Built-in defaults
//!
//! The generation credential additionally falls back to `OPENAI_API_KEY`.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use llm::LlmConfig;
use nodes::prompts::DEFAULT_REPORT_LANGUAGE;
use search::SearchConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".research/config.toml";
pub const ENV_PREFIX: &str = "RESEARCH_";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Natural language the report is written in.
    pub language: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_REPORT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// OTLP gRPC collector (e.g. `http://localhost:4317`). Span export is off
    /// when unset.
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            otlp_endpoint: None,
        }
    }
}

/// Loads configuration for a run started in `workspace`.
pub fn load_config(workspace: &Path) -> Result<AppConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    let file = workspace.join(CONFIG_FILE);
    if file.exists() {
        figment = figment.merge(Toml::file(&file));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let mut config: AppConfig = figment.extract().map_err(Box::new)?;
    if config
        .llm
        .api_key
        .as_deref()
        .map_or(true, |k| k.trim().is_empty())
    {
        config.llm.api_key = std::env::var(API_KEY_ENV).ok();
    }
    Ok(config)
}
