//! Core types for link analysis (JSON contracts with the analysis service).

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Outbound request (JSON contract: what we POST to /analyze)
// ---------------------------------------------------------------------------

/// What to assess. Unset fields are omitted from the JSON body, never sent as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  /// Raw e-mail headers; accepted by the service alongside url/text.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub raw_headers: Option<String>,
}

impl AnalysisRequest {
  /// Build a request, treating empty strings as absent.
  pub fn new(url: Option<String>, text: Option<String>) -> Self {
    Self {
      url: non_empty(url),
      text: non_empty(text),
      raw_headers: None,
    }
  }

  /// Menu action over a link: the href is both the URL and the text.
  pub fn for_link(href: &str) -> Self {
    Self::new(Some(href.to_string()), Some(href.to_string()))
  }

  /// Menu action over selected text: the selection plus the first URL found in it.
  pub fn for_selection(selection: &str) -> Self {
    Self::new(crate::extract::extract_first_url(Some(selection)), Some(selection.to_string()))
  }

  pub fn with_raw_headers(mut self, raw_headers: impl Into<String>) -> Self {
    self.raw_headers = non_empty(Some(raw_headers.into()));
    self
  }

  /// True when there is nothing to send (no url, text or headers).
  pub fn is_empty(&self) -> bool {
    blank(&self.url) && blank(&self.text) && blank(&self.raw_headers)
  }

  /// Copy with empty strings dropped, so they are omitted from the wire.
  pub fn normalized(&self) -> Self {
    Self {
      url: non_empty(self.url.clone()),
      text: non_empty(self.text.clone()),
      raw_headers: non_empty(self.raw_headers.clone()),
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

fn blank(value: &Option<String>) -> bool {
  value.as_deref().map_or(true, str::is_empty)
}

// ---------------------------------------------------------------------------
// Inbound report (JSON contract: what /analyze returns)
// ---------------------------------------------------------------------------

/// Scored result bundle. `overall_score` is authoritative for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
  /// Missing, null or non-numeric values decode to 0.
  #[serde(default, deserialize_with = "lenient_score")]
  pub overall_score: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub final_verdict: Option<String>,
  #[serde(default)]
  pub results: Vec<CheckResult>,
}

/// One named finding. Rendering order is report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
  pub check_name: String,
  #[serde(default)]
  pub details: String,
  #[serde(default)]
  pub is_suspicious: bool,
}

/// Body for `POST /analyze_headers`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HeadersRequest<'a> {
  pub raw_headers: &'a str,
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  let score = match value {
    serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
    serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
    _ => 0.0,
  };
  Ok(if score.is_finite() { score } else { 0.0 })
}
