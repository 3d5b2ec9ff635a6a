//! Hover tooltip offering a one-click check of the link under the pointer.
//!
//! Time is passed in explicitly (`now`) and a pending hide only fires from
//! [`Tooltip::tick`], so the machine is deterministic under test.

use std::time::Instant;

use link_guard::AnalysisRequest;

use crate::config::UiConfig;
use crate::dom::{Anchor, Document, TOOLTIP_ID};

/// Page (scroll-relative) coordinates of the tooltip's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
  pub left: f64,
  pub top: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipState {
  Hidden,
  Visible { anchor: Anchor, position: Position },
}

#[derive(Debug)]
pub struct Tooltip {
  config: UiConfig,
  state: TooltipState,
  hide_at: Option<Instant>,
}

impl Tooltip {
  pub fn new(config: UiConfig) -> Self {
    Self {
      config,
      state: TooltipState::Hidden,
      hide_at: None,
    }
  }

  pub fn state(&self) -> &TooltipState {
    &self.state
  }

  /// Visible only while the tooltip node is still attached to `dom`.
  pub fn is_visible(&self, dom: &Document) -> bool {
    self.current_anchor(dom).is_some()
  }

  /// The link being offered, or `None` if hidden or the node was detached.
  pub fn current_anchor(&self, dom: &Document) -> Option<&Anchor> {
    if !dom.contains(TOOLTIP_ID) {
      return None;
    }
    self.shown_anchor()
  }

  pub fn hide_pending(&self) -> bool {
    self.hide_at.is_some()
  }

  /// Pointer entered a link. Returns false if the link is ignored.
  pub fn on_anchor_enter(&mut self, dom: &mut Document, anchor: Anchor) -> bool {
    if anchor.inside_overlay {
      return false;
    }
    self.hide_at = None;
    let same_anchor = self.current_anchor(dom).map(|a| a.id) == Some(anchor.id);
    if !dom.contains(TOOLTIP_ID) {
      dom.attach(TOOLTIP_ID);
    }
    if same_anchor {
      return true;
    }
    let position = Position {
      left: anchor.rect.left + dom.scroll_x,
      top: anchor.rect.bottom() + dom.scroll_y + self.config.tooltip_offset_px,
    };
    self.state = TooltipState::Visible { anchor, position };
    true
  }

  pub fn on_anchor_leave(&mut self, now: Instant) {
    self.schedule_hide(now);
  }

  /// Pointer moved onto the tooltip itself: keep it open.
  pub fn on_tooltip_enter(&mut self) {
    self.hide_at = None;
  }

  pub fn on_tooltip_leave(&mut self, now: Instant) {
    self.schedule_hide(now);
  }

  /// Close control: hide now, no delay.
  pub fn close(&mut self) {
    self.hide_now();
  }

  /// Action control: the request for the current link, hiding immediately either way.
  pub fn take_action(&mut self, dom: &Document) -> Option<AnalysisRequest> {
    let request = self
      .current_anchor(dom)
      .map(|a| AnalysisRequest::new(Some(a.href.clone()), Some(a.text.clone())));
    self.hide_now();
    request
  }

  /// Fire a due hide. Returns true if the tooltip was hidden by this call.
  pub fn tick(&mut self, now: Instant) -> bool {
    match self.hide_at {
      Some(deadline) if now >= deadline => {
        self.hide_now();
        true
      }
      _ => false,
    }
  }

  fn shown_anchor(&self) -> Option<&Anchor> {
    match &self.state {
      TooltipState::Visible { anchor, .. } => Some(anchor),
      TooltipState::Hidden => None,
    }
  }

  fn schedule_hide(&mut self, now: Instant) {
    if self.shown_anchor().is_some() {
      self.hide_at = Some(now + self.config.hide_delay);
    }
  }

  fn hide_now(&mut self) {
    self.hide_at = None;
    self.state = TooltipState::Hidden;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dom::{AnchorId, Rect};
  use std::time::Duration;

  fn anchor(id: u64) -> Anchor {
    Anchor {
      id: AnchorId(id),
      href: format!("https://site{}.example/", id),
      text: format!("link {}", id),
      rect: Rect {
        left: 100.0,
        top: 40.0,
        width: 80.0,
        height: 20.0,
      },
      inside_overlay: false,
    }
  }

  fn setup() -> (Tooltip, Document) {
    (Tooltip::new(UiConfig::default()), Document::new())
  }

  #[test]
  fn shows_below_anchor_in_page_coordinates() {
    let (mut tip, mut dom) = setup();
    dom.scroll_x = 5.0;
    dom.scroll_y = 300.0;
    assert!(tip.on_anchor_enter(&mut dom, anchor(1)));

    match tip.state() {
      TooltipState::Visible { position, .. } => {
        assert_eq!(position.left, 105.0);
        assert_eq!(position.top, 40.0 + 20.0 + 300.0 + 6.0);
      }
      TooltipState::Hidden => panic!("tooltip should be visible"),
    }
    assert!(dom.contains(TOOLTIP_ID));
  }

  #[test]
  fn links_inside_overlay_are_ignored() {
    let (mut tip, mut dom) = setup();
    let mut a = anchor(1);
    a.inside_overlay = true;
    assert!(!tip.on_anchor_enter(&mut dom, a));
    assert!(!tip.is_visible(&dom));
  }

  #[test]
  fn entering_tooltip_within_delay_cancels_hide() {
    let (mut tip, mut dom) = setup();
    let t0 = Instant::now();
    tip.on_anchor_enter(&mut dom, anchor(1));
    tip.on_anchor_leave(t0);
    assert!(tip.hide_pending());

    tip.on_tooltip_enter();
    assert!(!tip.tick(t0 + Duration::from_millis(500)));
    assert!(tip.is_visible(&dom));
  }

  #[test]
  fn hide_fires_only_after_delay() {
    let (mut tip, mut dom) = setup();
    let t0 = Instant::now();
    tip.on_anchor_enter(&mut dom, anchor(1));
    tip.on_anchor_leave(t0);

    assert!(!tip.tick(t0 + Duration::from_millis(199)));
    assert!(tip.is_visible(&dom));
    assert!(tip.tick(t0 + Duration::from_millis(200)));
    assert!(!tip.is_visible(&dom));
  }

  #[test]
  fn leaving_tooltip_reschedules_hide() {
    let (mut tip, mut dom) = setup();
    let t0 = Instant::now();
    tip.on_anchor_enter(&mut dom, anchor(1));
    tip.on_anchor_leave(t0);
    tip.on_tooltip_enter();

    let t1 = t0 + Duration::from_millis(1000);
    tip.on_tooltip_leave(t1);
    assert!(!tip.tick(t1 + Duration::from_millis(100)));
    assert!(tip.tick(t1 + Duration::from_millis(200)));
  }

  #[test]
  fn same_anchor_is_noop_and_other_anchor_replaces() {
    let (mut tip, mut dom) = setup();
    tip.on_anchor_enter(&mut dom, anchor(1));
    let before = tip.state().clone();

    dom.scroll_y = 999.0;
    tip.on_anchor_enter(&mut dom, anchor(1));
    assert_eq!(tip.state(), &before);

    tip.on_anchor_enter(&mut dom, anchor(2));
    assert_eq!(tip.current_anchor(&dom).unwrap().id, AnchorId(2));
  }

  #[test]
  fn close_and_action_hide_immediately() {
    let (mut tip, mut dom) = setup();
    let t0 = Instant::now();
    tip.on_anchor_enter(&mut dom, anchor(1));
    tip.on_anchor_leave(t0);
    tip.close();
    assert!(!tip.is_visible(&dom));
    assert!(!tip.hide_pending());

    tip.on_anchor_enter(&mut dom, anchor(3));
    let request = tip.take_action(&dom).unwrap();
    assert_eq!(request.url.as_deref(), Some("https://site3.example/"));
    assert_eq!(request.text.as_deref(), Some("link 3"));
    assert!(!tip.is_visible(&dom));
    assert_eq!(tip.take_action(&dom), None);
  }

  #[test]
  fn detached_tooltip_is_recreated() {
    let (mut tip, mut dom) = setup();
    tip.on_anchor_enter(&mut dom, anchor(1));
    assert!(dom.detach(TOOLTIP_ID));

    assert!(!tip.is_visible(&dom));
    assert_eq!(tip.current_anchor(&dom), None);
    assert_eq!(tip.take_action(&dom), None);

    // Same link again: the node comes back, repositioned for the current scroll.
    dom.scroll_y = 50.0;
    assert!(tip.on_anchor_enter(&mut dom, anchor(1)));
    assert!(dom.contains(TOOLTIP_ID));
    assert!(tip.is_visible(&dom));
    match tip.state() {
      TooltipState::Visible { position, .. } => {
        assert_eq!(position.top, 40.0 + 20.0 + 50.0 + 6.0);
      }
      TooltipState::Hidden => panic!("tooltip should be visible"),
    }
  }
}
