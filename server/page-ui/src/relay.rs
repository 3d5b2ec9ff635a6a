//! Relay: forwards page requests to the coordinator and pairs each reply with its id.
//!
//! Ids increase monotonically per relay. Only the most recently issued id is
//! current; [`Relay::is_current`] lets the page drop replies that were overtaken.

use link_guard::{
  AnalysisError, AnalysisReport, AnalysisRequest, BackgroundHandle, RequestEnvelope, RequestId,
  ResponseEnvelope,
};
use tokio::sync::oneshot;

pub struct Relay {
  background: BackgroundHandle,
  next_id: u64,
  latest: Option<RequestId>,
}

/// A sent request whose single reply has not been awaited yet.
pub struct PendingReply {
  request_id: RequestId,
  reply: Result<oneshot::Receiver<ResponseEnvelope>, AnalysisError>,
}

/// The reply to one request: a report, or the error text for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
  pub request_id: RequestId,
  pub outcome: Result<AnalysisReport, String>,
}

impl Relay {
  pub fn new(background: BackgroundHandle) -> Self {
    Self {
      background,
      next_id: 1,
      latest: None,
    }
  }

  /// Tag `request` with a fresh id and send it. Never blocks.
  pub fn send(&mut self, request: AnalysisRequest) -> PendingReply {
    let request_id = RequestId(self.next_id);
    self.next_id += 1;
    self.latest = Some(request_id);

    let reply = self
      .background
      .send(RequestEnvelope::analyze(request_id, request));
    if let Err(e) = &reply {
      tracing::warn!(request_id = request_id.0, error = %e, "could not reach coordinator");
    }
    PendingReply { request_id, reply }
  }

  pub fn is_current(&self, request_id: RequestId) -> bool {
    self.latest == Some(request_id)
  }

  pub fn latest(&self) -> Option<RequestId> {
    self.latest
  }
}

impl PendingReply {
  pub fn request_id(&self) -> RequestId {
    self.request_id
  }

  /// Wait for the one reply. A coordinator that never answers shows up as an error.
  pub async fn wait(self) -> Reply {
    let outcome = match self.reply {
      Ok(rx) => match rx.await {
        Ok(response) => response.into_result(),
        Err(_) => Err(AnalysisError::messaging("reply channel closed").to_string()),
      },
      Err(e) => Err(e.to_string()),
    };
    Reply {
      request_id: self.request_id,
      outcome,
    }
  }
}
