//! HTTP client for the external analysis service.
//!
//! One attempt per call: no retries, no caching, no client-side timeout beyond
//! what the transport does on its own.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::types::{AnalysisReport, AnalysisRequest, CheckResult, HeadersRequest};

/// Anything that can turn a request into a report. The coordinator only sees this.
#[async_trait]
pub trait Analyzer: Send + Sync {
  async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError>;
}

pub struct AnalysisClient {
  client: reqwest::Client,
  config: Config,
}

impl AnalysisClient {
  pub fn new(config: Config) -> Self {
    Self {
      client: reqwest::Client::new(),
      config,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Analyze raw e-mail headers only (`POST /analyze_headers`).
  pub async fn analyze_headers(&self, raw_headers: &str) -> Result<CheckResult, AnalysisError> {
    if raw_headers.trim().is_empty() {
      return Err(AnalysisError::ExtractionEmpty);
    }
    self
      .post_json("/analyze_headers", &HeadersRequest { raw_headers })
      .await
  }

  /// Liveness probe against `GET /`.
  pub async fn ping(&self) -> Result<(), AnalysisError> {
    let resp = self.client.get(self.config.url("/")).send().await?;
    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(self.server_failure(status.as_u16(), &body));
    }
    Ok(())
  }

  async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AnalysisError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = self.config.url(path);
    let resp = self.client.post(&url).json(body).send().await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      tracing::warn!(%url, status = status.as_u16(), "analysis service returned an error");
      return Err(self.server_failure(status.as_u16(), &body));
    }

    let parsed: T = resp.json().await?;
    Ok(parsed)
  }

  fn server_failure(&self, status: u16, body: &str) -> AnalysisError {
    AnalysisError::ServerFailure {
      status,
      excerpt: excerpt(body, self.config.body_excerpt_chars),
    }
  }
}

#[async_trait]
impl Analyzer for AnalysisClient {
  async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
    if request.is_empty() {
      return Err(AnalysisError::ExtractionEmpty);
    }
    let body = request.normalized();
    tracing::debug!(has_url = body.url.is_some(), has_text = body.text.is_some(), "POST /analyze");
    self.post_json("/analyze", &body).await
  }
}

/// First `max_chars` characters of `body` (char-boundary safe).
pub fn excerpt(body: &str, max_chars: usize) -> String {
  body.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn excerpt_truncates_on_char_boundary() {
    assert_eq!(excerpt("abcdef", 3), "abc");
    assert_eq!(excerpt("ab", 10), "ab");
    assert_eq!(excerpt("ошибка", 2), "ош");
    assert_eq!(excerpt("anything", 0), "");
  }

  #[tokio::test]
  async fn empty_request_never_leaves_the_process() {
    // Port 9 (discard) on localhost: any attempted call would fail as TransportFailure.
    let client = AnalysisClient::new(Config::default().with_endpoint("http://127.0.0.1:9"));
    let err = client.analyze(&AnalysisRequest::default()).await.unwrap_err();
    assert_eq!(err, AnalysisError::ExtractionEmpty);
  }
}
