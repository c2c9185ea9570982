//! Entry points used by the transport layer.

use std::sync::Arc;

use storage::{ActivityEvent, EventStore, StorageError};
use tracing::{debug, instrument, warn};

use crate::aggregation::{AggregationEngine, StatsReport};
use crate::clock::{Clock, SystemClock};
use crate::error::StatsError;
use crate::range_flow::{RangeSelectionFlow, SessionKey, SessionState, SubmitOutcome};
use crate::window::WindowSelector;

/// Answer to a stats request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsReply {
    Report(StatsReport),
    /// A custom range session was opened; ask the requester for two dates.
    PromptForDates,
}

/// Event ingestion plus stats requests, sharing one store and one session map.
pub struct ActivityStats {
    store: Arc<dyn EventStore>,
    flow: RangeSelectionFlow,
    clock: Arc<dyn Clock>,
}

impl ActivityStats {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        let engine = AggregationEngine::new(store.clone());
        Self {
            store,
            flow: RangeSelectionFlow::new(engine),
            clock,
        }
    }

    /// Records one event. The error is informational; later events are unaffected.
    #[instrument(skip(self, event), fields(conversation_id = event.conversation_id(), user_id = event.user_id()))]
    pub async fn ingest(&self, event: &ActivityEvent) -> Result<(), StorageError> {
        match self.store.append(event).await {
            Ok(()) => {
                debug!("Event ingested");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Event accepted but not stored");
                Err(e)
            }
        }
    }

    /// Handles a keyboard payload (`preset:N` or `custom`).
    pub async fn request_stats(
        &self,
        conversation_id: i64,
        requester_id: i64,
        selector: &str,
    ) -> Result<StatsReply, StatsError> {
        let selector: WindowSelector = selector.parse()?;
        self.flow
            .select(
                SessionKey::new(conversation_id, requester_id),
                selector,
                self.clock.now(),
            )
            .await
    }

    /// Handles the requester's date range reply.
    pub async fn submit_custom_range(
        &self,
        conversation_id: i64,
        requester_id: i64,
        raw_text: &str,
    ) -> Result<SubmitOutcome, StatsError> {
        self.flow
            .submit(
                SessionKey::new(conversation_id, requester_id),
                raw_text,
                self.clock.now(),
            )
            .await
    }

    /// Abandons the requester's custom range. Returns whether one was pending.
    pub async fn cancel_custom_range(&self, conversation_id: i64, requester_id: i64) -> bool {
        self.flow
            .cancel(SessionKey::new(conversation_id, requester_id))
            .await
    }

    pub async fn session_state(&self, conversation_id: i64, requester_id: i64) -> SessionState {
        self.flow
            .state(SessionKey::new(conversation_id, requester_id))
            .await
    }
}
