//! One page load's worth of UI state, owned in one place.
//!
//! Every handler takes `&mut self`, so UI transitions never interleave. Handlers
//! that reach the coordinator return a [`PendingReply`] instead of waiting, so
//! the page keeps handling events while a check is in flight. The caller awaits
//! it and hands the result to [`PageContext::apply_reply`].

use std::time::Instant;

use link_guard::{AnalysisReport, AnalysisRequest, BackgroundHandle, ResultEnvelope};
use tokio::sync::mpsc;

use crate::config::UiConfig;
use crate::dom::{Anchor, Document};
use crate::overlay::Overlay;
use crate::relay::{PendingReply, Relay, Reply};
use crate::tooltip::Tooltip;

pub struct PageContext {
  dom: Document,
  overlay: Overlay,
  tooltip: Tooltip,
  relay: Relay,
  inbox: Option<mpsc::UnboundedReceiver<ResultEnvelope>>,
}

impl PageContext {
  pub fn new(background: BackgroundHandle, config: UiConfig) -> Self {
    Self {
      dom: Document::new(),
      overlay: Overlay::new(),
      tooltip: Tooltip::new(config),
      relay: Relay::new(background),
      inbox: None,
    }
  }

  /// Listen for one-way menu results (see `Coordinator::attach_tab`).
  pub fn with_inbox(mut self, inbox: mpsc::UnboundedReceiver<ResultEnvelope>) -> Self {
    self.inbox = Some(inbox);
    self
  }

  pub fn dom(&self) -> &Document {
    &self.dom
  }

  pub fn dom_mut(&mut self) -> &mut Document {
    &mut self.dom
  }

  pub fn overlay(&self) -> &Overlay {
    &self.overlay
  }

  pub fn tooltip(&self) -> &Tooltip {
    &self.tooltip
  }

  // -------------------------------------------------------------------------
  // Menu results
  // -------------------------------------------------------------------------

  /// `ANALYZE_RESULT` / `ANALYZE_ERROR` listener.
  pub fn on_result_message(&mut self, envelope: ResultEnvelope) {
    match envelope {
      ResultEnvelope::AnalyzeResult { report } => self.overlay.show_report(&mut self.dom, report),
      ResultEnvelope::AnalyzeError { message } => {
        let message = if message.is_empty() {
          "Unknown error".to_string()
        } else {
          message
        };
        self.overlay.show_error(&mut self.dom, message)
      }
    }
  }

  /// Apply every menu result already waiting. Returns how many were applied.
  pub fn drain_inbox(&mut self) -> usize {
    let mut pending = Vec::new();
    if let Some(inbox) = self.inbox.as_mut() {
      while let Ok(envelope) = inbox.try_recv() {
        pending.push(envelope);
      }
    }
    let count = pending.len();
    for envelope in pending {
      self.on_result_message(envelope);
    }
    count
  }

  /// Wait for the next menu result and apply it. False once the coordinator is gone.
  pub async fn next_result(&mut self) -> bool {
    let Some(inbox) = self.inbox.as_mut() else {
      return false;
    };
    match inbox.recv().await {
      Some(envelope) => {
        self.on_result_message(envelope);
        true
      }
      None => false,
    }
  }

  // -------------------------------------------------------------------------
  // Relay
  // -------------------------------------------------------------------------

  /// Send without waiting; pair with [`PageContext::apply_reply`].
  pub fn send_request(&mut self, request: AnalysisRequest) -> PendingReply {
    self.relay.send(request)
  }

  /// Route a reply to the overlay, unless a newer request has been issued since.
  pub fn apply_reply(&mut self, reply: Reply) -> Option<AnalysisReport> {
    if !self.relay.is_current(reply.request_id) {
      tracing::debug!(
        request_id = reply.request_id.0,
        latest = ?self.relay.latest().map(|id| id.0),
        "discarding stale reply"
      );
      return None;
    }
    match reply.outcome {
      Ok(report) => {
        self.overlay.show_report(&mut self.dom, report.clone());
        Some(report)
      }
      Err(message) => {
        self.overlay.show_error(&mut self.dom, message);
        None
      }
    }
  }

  /// Round trip to the coordinator; the outcome lands in the overlay.
  pub async fn analyze_via_background(&mut self, request: AnalysisRequest) -> Option<AnalysisReport> {
    let reply = self.relay.send(request).wait().await;
    self.apply_reply(reply)
  }

  // -------------------------------------------------------------------------
  // Tooltip / overlay controls
  // -------------------------------------------------------------------------

  pub fn on_anchor_enter(&mut self, anchor: Anchor) -> bool {
    self.tooltip.on_anchor_enter(&mut self.dom, anchor)
  }

  pub fn on_anchor_leave(&mut self, now: Instant) {
    self.tooltip.on_anchor_leave(now);
  }

  pub fn on_tooltip_enter(&mut self) {
    self.tooltip.on_tooltip_enter();
  }

  pub fn on_tooltip_leave(&mut self, now: Instant) {
    self.tooltip.on_tooltip_leave(now);
  }

  pub fn is_tooltip_visible(&self) -> bool {
    self.tooltip.is_visible(&self.dom)
  }

  pub fn on_tooltip_close(&mut self) {
    self.tooltip.close();
  }

  pub fn tick(&mut self, now: Instant) -> bool {
    self.tooltip.tick(now)
  }

  /// Tooltip action: hide now and send the link for checking. `None` if no link
  /// was offered. Await the reply, then pass it to [`PageContext::apply_reply`].
  pub fn on_tooltip_action(&mut self) -> Option<PendingReply> {
    let request = self.tooltip.take_action(&self.dom)?;
    Some(self.relay.send(request))
  }

  /// [`PageContext::on_tooltip_action`] followed by the round trip.
  pub async fn check_hovered_link(&mut self) -> Option<AnalysisReport> {
    let reply = self.on_tooltip_action()?.wait().await;
    self.apply_reply(reply)
  }

  pub fn close_overlay(&mut self) {
    self.overlay.close(&mut self.dom);
  }
}
