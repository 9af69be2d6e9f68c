use std::{collections::HashMap, fs, path::Path};

use client_core::DEFAULT_API_URL;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "orders.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api url '{url}' must use http or https, not '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Defaults, then `config_path` if it exists, then the process environment.
pub fn load_settings(config_path: &Path) -> Settings {
    let raw = fs::read_to_string(config_path).ok();
    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("ORDERS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("ORDERS_LOG") {
        settings.log_filter = v;
    }

    settings
}

/// Validates the base URL and strips trailing slashes so paths can be appended.
pub fn normalize_api_url(raw_api_url: &str) -> Result<String, SettingsError> {
    let raw_api_url = raw_api_url.trim();
    if raw_api_url.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }

    let parsed = Url::parse(raw_api_url).map_err(|source| SettingsError::InvalidUrl {
        url: raw_api_url.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme {
            url: raw_api_url.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(raw_api_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
