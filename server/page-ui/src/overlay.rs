//! Result overlay: a lazily created, fixed-position panel.
//!
//! `Absent -> Placeholder` on first use (or when the node was removed behind our
//! back), then `Report` / `Error` as results arrive. `close` removes the node; the
//! next display starts again from a fresh `Placeholder`.

use link_guard::AnalysisReport;

use crate::dom::{Document, OVERLAY_ID};
use crate::render;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
  Absent,
  Placeholder,
  Report(AnalysisReport),
  Error(String),
}

#[derive(Debug)]
pub struct Overlay {
  state: OverlayState,
}

impl Default for Overlay {
  fn default() -> Self {
    Self::new()
  }
}

impl Overlay {
  pub fn new() -> Self {
    Self {
      state: OverlayState::Absent,
    }
  }

  pub fn state(&self) -> &OverlayState {
    &self.state
  }

  /// Live means we created it and it is still attached to the document.
  pub fn is_live(&self, dom: &Document) -> bool {
    self.state != OverlayState::Absent && dom.contains(OVERLAY_ID)
  }

  /// Reuse the live panel, or (re)create it in `Placeholder`.
  pub fn ensure(&mut self, dom: &mut Document) {
    if self.is_live(dom) {
      return;
    }
    if self.state != OverlayState::Absent {
      tracing::debug!("overlay was detached, recreating");
    }
    dom.attach(OVERLAY_ID);
    self.state = OverlayState::Placeholder;
  }

  pub fn show_report(&mut self, dom: &mut Document, report: AnalysisReport) {
    self.ensure(dom);
    self.state = OverlayState::Report(report);
  }

  pub fn show_error(&mut self, dom: &mut Document, message: impl Into<String>) {
    self.ensure(dom);
    self.state = OverlayState::Error(message.into());
  }

  /// Close control: drop the panel from the document entirely.
  pub fn close(&mut self, dom: &mut Document) {
    dom.detach(OVERLAY_ID);
    self.state = OverlayState::Absent;
  }

  /// Markup of the panel body for the current state; `None` when absent.
  pub fn body_html(&self) -> Option<String> {
    match &self.state {
      OverlayState::Absent => None,
      OverlayState::Placeholder => Some(render::placeholder_html()),
      OverlayState::Report(report) => Some(render::report_html(report)),
      OverlayState::Error(message) => Some(render::error_html(message)),
    }
  }

  /// Full panel markup (title bar, close control, body).
  pub fn html(&self) -> Option<String> {
    self.body_html().map(|body| render::panel_html(&body))
  }
}
