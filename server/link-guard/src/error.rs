//! Structured error types for link analysis.
//!
//! The `Display` form of [`AnalysisError`] is the single human-readable string that
//! reaches the page overlay; nothing downstream inspects the variant again.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
  /// Nothing to analyze. Synthesized locally, never reaches the network.
  #[error("No URL or text found in the selection.")]
  ExtractionEmpty,

  #[error("Could not reach the analysis server: {0}")]
  TransportFailure(String),

  #[error("Server error (HTTP {status}): {excerpt}")]
  ServerFailure { status: u16, excerpt: String },

  /// The other context never received the message or never replied.
  #[error("Background did not reply: {0}")]
  MessagingFailure(String),
}

impl AnalysisError {
  pub fn transport(msg: impl Into<String>) -> Self {
    Self::TransportFailure(msg.into())
  }

  pub fn messaging(msg: impl Into<String>) -> Self {
    Self::MessagingFailure(msg.into())
  }
}

impl From<reqwest::Error> for AnalysisError {
  fn from(e: reqwest::Error) -> Self {
    Self::TransportFailure(e.to_string())
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config: {key}: {reason}")]
  Invalid { key: String, reason: String },
}

impl ConfigError {
  pub fn invalid(key: &str, reason: &str) -> Self {
    Self::Invalid {
      key: key.to_string(),
      reason: reason.to_string(),
    }
  }
}
