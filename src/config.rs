use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::llm::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};
use crate::pipeline::rag::DEFAULT_TOP_K;

/// Application-level constants
pub const APP_NAME: &str = "Circular AI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_RECYCLERS_PATH: &str = "data/recyclers.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "circular_ai=info,warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Strict mode requires a valid GOOGLE_API_KEY")]
    StrictWithoutCredential,
}

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    /// None means resolve from the account's model list at startup.
    pub gemini_model: Option<String>,
    pub gemini_base_url: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_model_text: String,
    pub openrouter_app_url: Option<String>,
    pub openrouter_app_name: Option<String>,
    pub strict_genai: bool,
    pub recyclers_path: PathBuf,
    /// None means the regulatory lookup runs without retrieval.
    pub cpcb_passages_path: Option<PathBuf>,
    pub retrieval_top_k: usize,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openrouter_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            openrouter_model_text: DEFAULT_OPENROUTER_MODEL.to_string(),
            openrouter_app_url: None,
            openrouter_app_name: None,
            strict_genai: false,
            recyclers_path: PathBuf::from(DEFAULT_RECYCLERS_PATH),
            cpcb_passages_path: None,
            retrieval_top_k: DEFAULT_TOP_K,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let google_api_key = get("GOOGLE_API_KEY").filter(|key| {
            let usable = is_google_key(key);
            if !usable {
                tracing::warn!("GOOGLE_API_KEY does not look like a Google key, ignoring it");
            }
            usable
        });

        Ok(Self {
            google_api_key,
            gemini_model: get("GEMINI_MODEL"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            openrouter_api_key: get("OPENROUTER_API_KEY"),
            openrouter_base_url: get("OPENROUTER_BASE_URL").unwrap_or(defaults.openrouter_base_url),
            openrouter_model_text: get("OPENROUTER_MODEL_TEXT")
                .unwrap_or(defaults.openrouter_model_text),
            openrouter_app_url: get("OPENROUTER_APP_URL"),
            openrouter_app_name: get("OPENROUTER_APP_NAME"),
            strict_genai: get("STRICT_GENAI").is_some_and(|v| parse_flag(&v)),
            recyclers_path: get("RECYCLERS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.recyclers_path),
            cpcb_passages_path: get("CPCB_PASSAGES_PATH").map(PathBuf::from),
            retrieval_top_k: parse_positive("RETRIEVAL_TOP_K", get("RETRIEVAL_TOP_K"))?
                .map_or(defaults.retrieval_top_k, |n| n as usize),
            request_timeout_secs: parse_positive(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
            )?
            .unwrap_or(defaults.request_timeout_secs),
        })
    }

    /// Checks that depend on more than one setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strict_genai && self.google_api_key.is_none() {
            return Err(ConfigError::StrictWithoutCredential);
        }
        Ok(())
    }
}

/// Google API keys start with `AIza`.
pub fn is_google_key(key: &str) -> bool {
    key.starts_with("AIza") && key.len() > 4
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_positive(var: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber { var, value: raw }),
        },
    }
}
