//! Link Guard coordinator: the privileged, network-capable side of link checking.
//!
//! Extracts a candidate URL from selected text, sends one request per gesture to
//! the external analysis service, and hands the report (or a single human-readable
//! error) back to the page context that asked.
//!
//! No caching, no retries, no history; every failure is terminal for its gesture.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod protocol;
pub mod types;
pub mod verdict;

pub use client::{AnalysisClient, Analyzer};
pub use config::Config;
pub use coordinator::{Coordinator, MenuTarget};
pub use error::{AnalysisError, ConfigError};
pub use extract::extract_first_url;
pub use protocol::{
  background_channel, BackgroundHandle, Incoming, RequestEnvelope, RequestId, ResponseEnvelope,
  ResultEnvelope, TabId,
};
pub use types::{AnalysisReport, AnalysisRequest, CheckResult};
pub use verdict::{badge, verdict_comment, Badge, Verdict};
