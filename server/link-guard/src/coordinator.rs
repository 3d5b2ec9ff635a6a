//! Coordinator: the privileged side. Owns the analyzer and every outbound call.
//!
//! Two entry points, both terminal (no retries):
//! - [`Coordinator::on_menu_click`]: builds the request itself and pushes a one-way
//!   [`ResultEnvelope`] to the tab. Undeliverable results are logged and dropped.
//! - [`Coordinator::spawn_server`]: answers page requests, exactly one
//!   [`ResponseEnvelope`] per [`Incoming`], each handled in its own task.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::Analyzer;
use crate::error::AnalysisError;
use crate::protocol::{Incoming, RequestEnvelope, ResponseEnvelope, ResultEnvelope, TabId};
use crate::types::{AnalysisReport, AnalysisRequest};

/// What the context menu was opened over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
  Link { href: String },
  Selection { text: String },
}

impl MenuTarget {
  pub fn into_request(self) -> AnalysisRequest {
    match self {
      Self::Link { href } => AnalysisRequest::for_link(&href),
      Self::Selection { text } => AnalysisRequest::for_selection(&text),
    }
  }
}

pub struct Coordinator {
  analyzer: Arc<dyn Analyzer>,
  tabs: HashMap<TabId, mpsc::UnboundedSender<ResultEnvelope>>,
}

impl Coordinator {
  pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
    Self {
      analyzer,
      tabs: HashMap::new(),
    }
  }

  /// Register a page context; results for `tab` arrive on the returned receiver.
  pub fn attach_tab(&mut self, tab: TabId) -> mpsc::UnboundedReceiver<ResultEnvelope> {
    let (tx, rx) = mpsc::unbounded_channel();
    self.tabs.insert(tab, tx);
    rx
  }

  pub fn detach_tab(&mut self, tab: TabId) {
    self.tabs.remove(&tab);
  }

  /// Menu-triggered flow. Returns the envelope that was (or would have been) delivered.
  pub async fn on_menu_click(&self, tab: TabId, target: MenuTarget) -> ResultEnvelope {
    let request = target.into_request();
    tracing::info!(
      tab = tab.0,
      has_url = request.url.is_some(),
      has_text = request.text.is_some(),
      "menu analysis requested"
    );
    let outcome = analyze_checked(self.analyzer.as_ref(), &request).await;
    if let Err(e) = &outcome {
      tracing::warn!(tab = tab.0, error = %e, "menu analysis failed");
    }
    let envelope = ResultEnvelope::from_outcome(outcome);
    self.deliver(tab, envelope.clone());
    envelope
  }

  fn deliver(&self, tab: TabId, envelope: ResultEnvelope) {
    let delivered = match self.tabs.get(&tab) {
      Some(tx) => tx.send(envelope).is_ok(),
      None => false,
    };
    if !delivered {
      let e = AnalysisError::messaging(format!("tab {} has no listener", tab.0));
      tracing::warn!(tab = tab.0, error = %e, "result dropped");
    }
  }

  /// Message-triggered flow: serve page requests until every handle is dropped.
  pub fn spawn_server(&self, mut rx: mpsc::UnboundedReceiver<Incoming>) -> JoinHandle<()> {
    let analyzer = Arc::clone(&self.analyzer);
    tokio::spawn(async move {
      while let Some(incoming) = rx.recv().await {
        let analyzer = Arc::clone(&analyzer);
        tokio::spawn(async move {
          let Incoming {
            envelope,
            responder,
          } = incoming;
          let response = handle_request(analyzer.as_ref(), envelope).await;
          let request_id = response.request_id;
          if !responder.respond(response) {
            tracing::warn!(request_id = request_id.0, "page stopped waiting for reply");
          }
        });
      }
      tracing::debug!("request channel closed, coordinator server exiting");
    })
  }
}

/// Answer one page request. Always produces exactly one response.
pub async fn handle_request(analyzer: &dyn Analyzer, envelope: RequestEnvelope) -> ResponseEnvelope {
  match envelope {
    RequestEnvelope::AnalyzeRequest {
      request_id,
      payload,
    } => {
      let outcome = analyze_checked(analyzer, &payload).await;
      if let Err(e) = &outcome {
        tracing::warn!(request_id = request_id.0, error = %e, "page analysis failed");
      }
      ResponseEnvelope::from_outcome(request_id, outcome)
    }
  }
}

/// Reject empty requests locally; otherwise exactly one analyzer call.
async fn analyze_checked(
  analyzer: &dyn Analyzer,
  request: &AnalysisRequest,
) -> Result<AnalysisReport, AnalysisError> {
  if request.is_empty() {
    return Err(AnalysisError::ExtractionEmpty);
  }
  analyzer.analyze(request).await
}
