//! Ranked per-user message counts over a window.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{ActivityEvent, EventStore};
use tracing::{debug, instrument};

use crate::error::StatsError;
use crate::window::{ResolvedWindow, WindowSpec};

/// Maximum number of users in a ranking.
pub const TOP_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUser {
    pub user_id: i64,
    /// Name from the user's most recent event inside the window.
    pub display_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationResult {
    /// No events matched the window.
    Empty,
    /// 1..=TOP_LIMIT users, most active first.
    Ranked(Vec<RankedUser>),
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, AggregationResult::Empty)
    }

    pub fn entries(&self) -> &[RankedUser] {
        match self {
            AggregationResult::Empty => &[],
            AggregationResult::Ranked(users) => users,
        }
    }
}

/// A computed ranking together with the window it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub window: WindowSpec,
    pub bounds: ResolvedWindow,
    pub result: AggregationResult,
}

struct Tally {
    user_id: i64,
    display_name: String,
    latest_at: DateTime<Utc>,
    first_at: DateTime<Utc>,
    first_arrival: usize,
    count: u64,
}

/// Computes rankings from the injected store.
#[derive(Clone)]
pub struct AggregationEngine {
    store: Arc<dyn EventStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Ranking for `window` anchored at `now`.
    pub async fn compute(
        &self,
        conversation_id: i64,
        window: &WindowSpec,
        now: DateTime<Utc>,
    ) -> Result<AggregationResult, StatsError> {
        Ok(self.report(conversation_id, window, now).await?.result)
    }

    /// Like [`compute`](Self::compute), also returning the resolved bounds.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        conversation_id: i64,
        window: &WindowSpec,
        now: DateTime<Utc>,
    ) -> Result<StatsReport, StatsError> {
        let bounds = window.resolve(now)?;
        let events = self
            .store
            .query(conversation_id, bounds.start, bounds.end_exclusive)
            .await?;
        debug!(events = events.len(), "Aggregating activity");

        Ok(StatsReport {
            window: *window,
            bounds,
            result: rank(&events),
        })
    }
}

/// Counts events per user and orders them: count descending, then earliest first event,
/// then earliest arrival. Events must be in arrival order.
pub fn rank(events: &[ActivityEvent]) -> AggregationResult {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();

    for (arrival, event) in events.iter().enumerate() {
        let at = event.occurred_at();
        match index.get(&event.user_id()) {
            Some(&i) => {
                let tally = &mut tallies[i];
                tally.count += 1;
                // Later arrivals win ties so a rename within the same second sticks.
                if at >= tally.latest_at {
                    tally.latest_at = at;
                    tally.display_name = event.display_name().to_string();
                }
                tally.first_at = tally.first_at.min(at);
            }
            None => {
                index.insert(event.user_id(), tallies.len());
                tallies.push(Tally {
                    user_id: event.user_id(),
                    display_name: event.display_name().to_string(),
                    latest_at: at,
                    first_at: at,
                    first_arrival: arrival,
                    count: 1,
                });
            }
        }
    }

    if tallies.is_empty() {
        return AggregationResult::Empty;
    }

    tallies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.first_at.cmp(&b.first_at))
            .then(a.first_arrival.cmp(&b.first_arrival))
    });
    tallies.truncate(TOP_LIMIT);

    AggregationResult::Ranked(
        tallies
            .into_iter()
            .map(|t| RankedUser {
                user_id: t.user_id,
                display_name: t.display_name,
                count: t.count,
            })
            .collect(),
    )
}
