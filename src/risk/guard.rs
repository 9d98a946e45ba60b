use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::Channel;
use crate::risk::ChannelRiskConfig;

/// Per-channel attempt bookkeeping, kept for the lifetime of a session.
/// `failure_count` only moves on processor outcomes; locally blocked
/// attempts leave it untouched.
#[derive(Debug, Clone, Default)]
pub struct AttemptState {
    pub failure_count: u32,
    pub last_attempt_ms: Option<i64>,
}

/// Tracks attempts per channel and enforces the hard cap where a channel
/// defines one. State is created lazily on first attempt and never
/// explicitly destroyed.
pub struct AttemptGuard {
    states: RwLock<HashMap<Channel, AttemptState>>,
}

impl AttemptGuard {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Whether the channel may attempt a settlement at all. Channels
    /// without a cap are always eligible.
    pub async fn can_attempt(&self, channel: Channel) -> bool {
        let cap = match ChannelRiskConfig::for_channel(channel).max_attempts {
            Some(cap) => cap,
            None => return true,
        };
        let states = self.states.read().await;
        states
            .get(&channel)
            .map(|state| state.failure_count < cap)
            .unwrap_or(true)
    }

    /// Record that an attempt is being scored now. Returns the previous
    /// attempt timestamp for the velocity rule. The timestamp moves even
    /// when the attempt is later blocked.
    pub async fn note_attempt(&self, channel: Channel, now_ms: i64) -> Option<i64> {
        let mut states = self.states.write().await;
        let state = states.entry(channel).or_default();
        let previous = state.last_attempt_ms;
        state.last_attempt_ms = Some(now_ms);
        previous
    }

    pub async fn record_failure(&self, channel: Channel) {
        let mut states = self.states.write().await;
        let state = states.entry(channel).or_default();
        state.failure_count += 1;
        warn!(
            channel = %channel,
            failure_count = state.failure_count,
            "processor failure recorded"
        );
    }

    pub async fn record_success(&self, channel: Channel) {
        let mut states = self.states.write().await;
        let state = states.entry(channel).or_default();
        if state.failure_count > 0 {
            info!(
                channel = %channel,
                cleared = state.failure_count,
                "failure count reset after successful settlement"
            );
        }
        state.failure_count = 0;
    }

    pub async fn failure_count(&self, channel: Channel) -> u32 {
        let states = self.states.read().await;
        states
            .get(&channel)
            .map(|state| state.failure_count)
            .unwrap_or(0)
    }
}

impl Default for AttemptGuard {
    fn default() -> Self {
        Self::new()
    }
}
