//! Minimal document model: which singleton nodes are attached, plus scroll offset.

use std::collections::HashSet;

pub const OVERLAY_ID: &str = "lg_overlay";
pub const TOOLTIP_ID: &str = "lg_tooltip";

/// Element box in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
  pub left: f64,
  pub top: f64,
  pub width: f64,
  pub height: f64,
}

impl Rect {
  pub fn bottom(&self) -> f64 {
    self.top + self.height
  }
}

/// Stable identity of an `<a href>` element within one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// A hovered hyperlink.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
  pub id: AnchorId,
  /// Resolved (absolute) href.
  pub href: String,
  /// Visible text of the link.
  pub text: String,
  pub rect: Rect,
  /// Links rendered inside our own overlay never get a tooltip.
  pub inside_overlay: bool,
}

#[derive(Debug, Default)]
pub struct Document {
  attached: HashSet<String>,
  pub scroll_x: f64,
  pub scroll_y: f64,
}

impl Document {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn attach(&mut self, id: &str) {
    self.attached.insert(id.to_string());
  }

  /// Remove a node; returns false if it was not attached.
  pub fn detach(&mut self, id: &str) -> bool {
    self.attached.remove(id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.attached.contains(id)
  }
}
