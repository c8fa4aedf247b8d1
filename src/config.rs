// Configuration: every setting the bridge needs, read once at startup.
// Handlers never look at the process environment themselves.

use reqwest::header::HeaderValue;
use std::path::PathBuf;

/// Base URL of the SM.MS v2 API.
pub const DEFAULT_API_BASE: &str = "https://sm.ms/api/v2";

/// Name of the icon cache directory created under the system temp dir.
pub const ICON_DIR_NAME: &str = "sm_ms_icons";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API token: set SM_TOKEN")]
    MissingToken,

    #[error("API token is not a valid header value")]
    InvalidToken,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Sent verbatim as the `Authorization` header.
    pub token: String,
    pub api_base: String,
    pub icon_dir: PathBuf,
}

impl Config {
    /// Build the configuration from `SM_TOKEN`, `SM_API_BASE` and
    /// `SM_ICON_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but over an arbitrary lookup, so tests don't
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("SM_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        if HeaderValue::from_str(&token).is_err() {
            return Err(ConfigError::InvalidToken);
        }

        let api_base = lookup("SM_API_BASE")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());
        let api_base = api_base.trim().trim_end_matches('/').to_string();

        let icon_dir = lookup("SM_ICON_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(ICON_DIR_NAME));

        Ok(Config {
            token,
            api_base,
            icon_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn blank_token_is_rejected() {
        let err = Config::from_lookup(lookup(&[("SM_TOKEN", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn token_with_newline_inside_is_invalid() {
        let err = Config::from_lookup(lookup(&[("SM_TOKEN", "abc\ndef")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidToken);
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("SM_TOKEN", "secret")])).unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.icon_dir, std::env::temp_dir().join(ICON_DIR_NAME));
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("SM_TOKEN", "secret"),
            ("SM_API_BASE", "http://127.0.0.1:9000/api/"),
            ("SM_ICON_DIR", "/var/tmp/icons"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9000/api");
        assert_eq!(config.icon_dir, PathBuf::from("/var/tmp/icons"));
    }
}
