//! Coordinator configuration with sane defaults.

use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "LINK_GUARD_ENDPOINT";
pub const EXCERPT_CHARS_VAR: &str = "LINK_GUARD_EXCERPT_CHARS";

/// Where the analysis service lives and how much of a failed body to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Base URL of the analysis service, without trailing slash.
  pub endpoint: String,
  /// Max characters of a non-2xx body carried into the error message.
  pub body_excerpt_chars: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      endpoint: "http://127.0.0.1:8000".to_string(),
      body_excerpt_chars: 200,
    }
  }
}

impl Config {
  /// Defaults overlaid with `LINK_GUARD_ENDPOINT` / `LINK_GUARD_EXCERPT_CHARS`.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(endpoint) = lookup(ENDPOINT_VAR) {
      config = config.with_endpoint(endpoint.trim());
      if config.endpoint.is_empty() {
        return Err(ConfigError::invalid(ENDPOINT_VAR, "must not be empty"));
      }
    }
    if let Some(raw) = lookup(EXCERPT_CHARS_VAR) {
      config.body_excerpt_chars = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(EXCERPT_CHARS_VAR, "expected a non-negative integer"))?;
    }
    Ok(config)
  }

  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into().trim_end_matches('/').to_string();
    self
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.endpoint, path)
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
  fn defaults_without_env() {
    let config = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.url("/analyze"), "http://127.0.0.1:8000/analyze");
  }

  #[test]
  fn endpoint_trailing_slash_is_trimmed() {
    let config = Config::from_lookup(lookup(&[(ENDPOINT_VAR, "https://guard.example/ ")])).unwrap();
    assert_eq!(config.url("/analyze"), "https://guard.example/analyze");
  }

  #[test]
  fn bad_excerpt_value_is_rejected() {
    let err = Config::from_lookup(lookup(&[(EXCERPT_CHARS_VAR, "lots")])).unwrap_err();
    assert!(err.to_string().contains(EXCERPT_CHARS_VAR));

    let config = Config::from_lookup(lookup(&[(EXCERPT_CHARS_VAR, "500")])).unwrap();
    assert_eq!(config.body_excerpt_chars, 500);
  }

  #[test]
  fn empty_endpoint_is_rejected() {
    assert!(Config::from_lookup(lookup(&[(ENDPOINT_VAR, "  ")])).is_err());
  }
}
