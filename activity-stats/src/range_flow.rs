//! Two-turn custom range selection.
//!
//! `Idle` is the absence of a session. Choosing "custom" opens an `AwaitingCustomRange` session
//! for that requester in that conversation; the next valid `YYYY-MM-DD YYYY-MM-DD` submission
//! closes it. Sessions are process-local and keyed per requester, so two people in the same
//! group never see each other's pending state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::aggregation::{AggregationEngine, StatsReport};
use crate::error::{RangeParseError, StatsError};
use crate::service::StatsReply;
use crate::window::{WindowSelector, WindowSpec};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub conversation_id: i64,
    pub requester_id: i64,
}

impl SessionKey {
    pub fn new(conversation_id: i64, requester_id: i64) -> Self {
        Self {
            conversation_id,
            requester_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingCustomRange,
}

#[derive(Debug, Clone, Copy)]
struct PendingRange {
    opened_at: DateTime<Utc>,
    /// Distinguishes this session from a later one under the same key.
    generation: u64,
}

/// Result of feeding text to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Range accepted; session closed.
    Report(StatsReport),
    /// Input rejected; session still awaiting a range.
    Invalid(RangeParseError),
    /// Requester has no open session, or it was cancelled or reopened while the ranking was
    /// being computed; the text is not meant for the flow.
    NoPendingSession,
}

/// Parses `"<start> <end>"` (ISO dates, whitespace separated, `end >= start`).
pub fn parse_custom_range(text: &str) -> Result<WindowSpec, RangeParseError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [first, last] = parts.as_slice() else {
        return Err(RangeParseError::WrongArity(parts.len()));
    };
    WindowSpec::range(parse_date(first)?, parse_date(last)?)
}

/// Strict `YYYY-MM-DD`: chrono alone also accepts `2024-5-1` and `+2024-05-01`.
fn parse_date(token: &str) -> Result<NaiveDate, RangeParseError> {
    let invalid = || RangeParseError::InvalidDate(token.to_string());
    let well_formed = token.len() == 10
        && token.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|_| invalid())
}

pub struct RangeSelectionFlow {
    engine: AggregationEngine,
    sessions: Mutex<HashMap<SessionKey, PendingRange>>,
    next_generation: AtomicU64,
}

impl RangeSelectionFlow {
    pub fn new(engine: AggregationEngine) -> Self {
        Self {
            engine,
            sessions: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    pub async fn state(&self, key: SessionKey) -> SessionState {
        if self.sessions.lock().await.contains_key(&key) {
            SessionState::AwaitingCustomRange
        } else {
            SessionState::Idle
        }
    }

    /// Handles a keyboard choice. A preset is answered immediately and supersedes any
    /// half-finished custom range of the same requester; "custom" opens a session.
    #[instrument(skip(self, now))]
    pub async fn select(
        &self,
        key: SessionKey,
        selector: WindowSelector,
        now: DateTime<Utc>,
    ) -> Result<StatsReply, StatsError> {
        match selector {
            WindowSelector::Preset(preset) => {
                if self.sessions.lock().await.remove(&key).is_some() {
                    info!("Preset chosen, pending custom range discarded");
                }
                let report = self
                    .engine
                    .report(key.conversation_id, &WindowSpec::Preset(preset), now)
                    .await?;
                Ok(StatsReply::Report(report))
            }
            WindowSelector::CustomRequested => {
                let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                self.sessions.lock().await.insert(
                    key,
                    PendingRange {
                        opened_at: now,
                        generation,
                    },
                );
                info!("Awaiting custom range");
                Ok(StatsReply::PromptForDates)
            }
        }
    }

    /// Feeds a text reply to the requester's session.
    ///
    /// The session closes only once the ranking has been computed; a storage failure leaves it
    /// open so the same input can be resubmitted. If the session was cancelled or reopened while
    /// the query ran, the ranking is discarded and the newer session is left untouched.
    #[instrument(skip(self, text, now))]
    pub async fn submit(
        &self,
        key: SessionKey,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, StatsError> {
        let Some(pending) = self.sessions.lock().await.get(&key).copied() else {
            return Ok(SubmitOutcome::NoPendingSession);
        };

        let window = match parse_custom_range(text) {
            Ok(window) => window,
            Err(e) => {
                warn!(error = %e, "Rejected custom range input");
                return Ok(SubmitOutcome::Invalid(e));
            }
        };

        let report = self.engine.report(key.conversation_id, &window, now).await?;

        let mut sessions = self.sessions.lock().await;
        if sessions.get(&key).map(|p| p.generation) != Some(pending.generation) {
            info!("Session cancelled or reopened during query, ranking discarded");
            return Ok(SubmitOutcome::NoPendingSession);
        }
        sessions.remove(&key);
        drop(sessions);
        info!(
            waited_secs = (now - pending.opened_at).num_seconds(),
            "Custom range completed"
        );
        Ok(SubmitOutcome::Report(report))
    }

    /// Drops the requester's session. Returns whether one was open.
    pub async fn cancel(&self, key: SessionKey) -> bool {
        let removed = self.sessions.lock().await.remove(&key).is_some();
        if removed {
            info!(
                conversation_id = key.conversation_id,
                requester_id = key.requester_id,
                "Custom range cancelled"
            );
        }
        removed
    }
}
