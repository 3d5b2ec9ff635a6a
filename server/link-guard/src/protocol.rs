//! Messages exchanged between the page context and the coordinator.
//!
//! Two shapes:
//! - one-way result envelopes (coordinator -> tab), fire-and-forget;
//! - request/response pairs (page -> coordinator -> page), exactly one reply each.
//!
//! The reply half travels as a [`Responder`] wrapping a oneshot sender. `respond`
//! consumes it, so a second reply cannot be expressed, and dropping it unanswered is
//! observed on the page side as a closed channel.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::error::AnalysisError;
use crate::types::{AnalysisReport, AnalysisRequest};

/// Identifies a browser tab (one page context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

/// Monotonically increasing per page context; pairs a reply with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

// ---------------------------------------------------------------------------
// One-way results (menu flow)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultEnvelope {
  AnalyzeResult { report: AnalysisReport },
  AnalyzeError { message: String },
}

impl ResultEnvelope {
  pub fn from_outcome(outcome: Result<AnalysisReport, AnalysisError>) -> Self {
    match outcome {
      Ok(report) => Self::AnalyzeResult { report },
      Err(e) => Self::AnalyzeError {
        message: e.to_string(),
      },
    }
  }
}

// ---------------------------------------------------------------------------
// Request / response (tooltip flow)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestEnvelope {
  AnalyzeRequest {
    request_id: RequestId,
    payload: AnalysisRequest,
  },
}

impl RequestEnvelope {
  pub fn analyze(request_id: RequestId, payload: AnalysisRequest) -> Self {
    Self::AnalyzeRequest {
      request_id,
      payload,
    }
  }

  pub fn request_id(&self) -> RequestId {
    match self {
      Self::AnalyzeRequest { request_id, .. } => *request_id,
    }
  }
}

/// `{ok:true, report}` or `{ok:false, error}`, echoing the request id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
  pub ok: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub report: Option<AnalysisReport>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  pub request_id: RequestId,
}

impl ResponseEnvelope {
  pub fn success(request_id: RequestId, report: AnalysisReport) -> Self {
    Self {
      ok: true,
      report: Some(report),
      error: None,
      request_id,
    }
  }

  pub fn failure(request_id: RequestId, error: impl Into<String>) -> Self {
    Self {
      ok: false,
      report: None,
      error: Some(error.into()),
      request_id,
    }
  }

  pub fn from_outcome(request_id: RequestId, outcome: Result<AnalysisReport, AnalysisError>) -> Self {
    match outcome {
      Ok(report) => Self::success(request_id, report),
      Err(e) => Self::failure(request_id, e.to_string()),
    }
  }

  /// Report on success, otherwise the error text (with a fallback for malformed replies).
  pub fn into_result(self) -> Result<AnalysisReport, String> {
    match (self.ok, self.report) {
      (true, Some(report)) => Ok(report),
      _ => Err(
        self
          .error
          .unwrap_or_else(|| "Request to the analysis background failed".to_string()),
      ),
    }
  }
}

// ---------------------------------------------------------------------------
// Channel plumbing
// ---------------------------------------------------------------------------

/// The reply half of one request. Consumed by [`Responder::respond`].
#[derive(Debug)]
pub struct Responder {
  request_id: RequestId,
  tx: oneshot::Sender<ResponseEnvelope>,
}

impl Responder {
  pub fn request_id(&self) -> RequestId {
    self.request_id
  }

  /// Deliver the single reply. Returns false if the page stopped listening.
  pub fn respond(self, response: ResponseEnvelope) -> bool {
    self.tx.send(response).is_ok()
  }
}

/// One request as seen by the coordinator.
#[derive(Debug)]
pub struct Incoming {
  pub envelope: RequestEnvelope,
  pub responder: Responder,
}

/// Page-side handle used to reach the coordinator.
#[derive(Debug, Clone)]
pub struct BackgroundHandle {
  tx: mpsc::UnboundedSender<Incoming>,
}

impl BackgroundHandle {
  /// Send a request; the returned receiver resolves with its one reply.
  pub fn send(
    &self,
    envelope: RequestEnvelope,
  ) -> Result<oneshot::Receiver<ResponseEnvelope>, AnalysisError> {
    let (tx, rx) = oneshot::channel();
    let incoming = Incoming {
      responder: Responder {
        request_id: envelope.request_id(),
        tx,
      },
      envelope,
    };
    self
      .tx
      .send(incoming)
      .map_err(|_| AnalysisError::messaging("no listener for analysis requests"))?;
    Ok(rx)
  }
}

/// Request channel between one or more page contexts and the coordinator.
pub fn background_channel() -> (BackgroundHandle, mpsc::UnboundedReceiver<Incoming>) {
  let (tx, rx) = mpsc::unbounded_channel();
  (BackgroundHandle { tx }, rx)
}
