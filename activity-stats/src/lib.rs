//! # activity-stats
//!
//! Answers "who was most active" over a time window.
//!
//! - [`window`] – presets, custom ranges and their resolution into `[start, end)` bounds
//! - [`aggregation`] – [`AggregationEngine`]: ranked per-user counts from an [`storage::EventStore`]
//! - [`range_flow`] – [`RangeSelectionFlow`]: per-requester two-turn custom range sessions
//! - [`service`] – [`ActivityStats`]: the ingest / request / submit entry points
//! - [`clock`] – injectable "now"

pub mod aggregation;
pub mod clock;
pub mod error;
pub mod range_flow;
pub mod service;
pub mod window;

pub use aggregation::{AggregationEngine, AggregationResult, RankedUser, StatsReport, TOP_LIMIT};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RangeParseError, StatsError};
pub use range_flow::{parse_custom_range, RangeSelectionFlow, SessionKey, SessionState, SubmitOutcome};
pub use service::{ActivityStats, StatsReply};
pub use window::{Preset, ResolvedWindow, WindowSelector, WindowSpec};
