//! Page UI tunables.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
  /// Delay between leaving a link (or the tooltip) and the tooltip hiding.
  pub hide_delay: Duration,
  /// Vertical gap between a link's bottom edge and the tooltip.
  pub tooltip_offset_px: f64,
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      hide_delay: Duration::from_millis(200),
      tooltip_offset_px: 6.0,
    }
  }
}
