//! Link Guard page context: tooltip, result overlay and the relay to the coordinator.
//!
//! One [`PageContext`] per page load owns every UI singleton. Nothing here talks
//! to the network; requests go to the coordinator over a
//! [`link_guard::BackgroundHandle`].

pub mod config;
pub mod dom;
pub mod overlay;
pub mod page;
pub mod relay;
pub mod render;
pub mod tooltip;

pub use config::UiConfig;
pub use dom::{Anchor, AnchorId, Document, Rect};
pub use overlay::{Overlay, OverlayState};
pub use page::PageContext;
pub use relay::{PendingReply, Relay, Reply};
pub use tooltip::{Tooltip, TooltipState};
