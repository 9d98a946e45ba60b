use std::sync::Arc;

use tracing::info;

use crate::models::{RiskAssessment, RiskFactor, TransactionRequest};
use crate::risk::{ChannelRiskConfig, NoiseSource, UniformNoise};

const BLACKLIST_WEIGHT: f64 = 100.0;
const REPEATING_PATTERN_WEIGHT: f64 = 60.0;
const OVER_LIMIT_WEIGHT: f64 = 50.0;
const SUSPICIOUS_IP_WEIGHT: f64 = 40.0;
const VELOCITY_WEIGHT: f64 = 30.0;

/// Scores payment attempts against the per-channel fraud rule set. All
/// rules contribute independently; there is no short-circuiting, so the
/// factor list always reflects every rule that fired.
pub struct RiskScorer {
    noise: Arc<dyn NoiseSource>,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            noise: Arc::new(UniformNoise),
        }
    }

    pub fn with_noise(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    /// Score one attempt. `last_attempt_ms` is the channel's previous
    /// attempt timestamp as recorded by the guard, before this attempt's
    /// own bookkeeping.
    pub fn score(
        &self,
        request: &TransactionRequest,
        last_attempt_ms: Option<i64>,
    ) -> RiskAssessment {
        let config = ChannelRiskConfig::for_channel(request.channel);
        let mut factors = Vec::new();

        if let Some(identifier) = request.identifier.as_deref() {
            if config.blacklist.contains(&identifier) {
                factors.push(RiskFactor::new("blacklisted identifier", BLACKLIST_WEIGHT));
            }
            if is_repeating_digits(identifier) {
                factors.push(RiskFactor::new(
                    "repeating-digit identifier",
                    REPEATING_PATTERN_WEIGHT,
                ));
            }
        }

        if let Some(limit) = config.amount_limit_usd {
            if request.amount_usd > limit {
                factors.push(RiskFactor::new("amount over limit", OVER_LIMIT_WEIGHT));
            }
        }

        if let Some(ip) = request.client_ip.as_deref() {
            if config.suspicious_ips.contains(&ip) {
                factors.push(RiskFactor::new("suspicious network origin", SUSPICIOUS_IP_WEIGHT));
            }
        }

        if let Some(last) = last_attempt_ms {
            if request.timestamp_ms - last < config.velocity_window_ms {
                factors.push(RiskFactor::new("repeated attempt", VELOCITY_WEIGHT));
            }
        }

        factors.push(RiskFactor::new(
            "heuristic noise",
            self.noise.sample(config.noise_ceiling),
        ));

        let total: f64 = factors.iter().map(|f| f.weight).sum();
        let score = total.clamp(0.0, 100.0);
        let blocked = score > config.block_threshold;

        let assessment = RiskAssessment {
            score,
            factors,
            blocked,
        };

        info!(
            channel = %request.channel,
            score = assessment.score,
            level = assessment.level(),
            blocked = assessment.blocked,
            "fraud score computed"
        );

        assessment
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// True for identifiers made of a single digit repeated, e.g. "1111111111".
fn is_repeating_digits(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() && identifier.len() > 1 => {
            chars.all(|c| c == first)
        }
        _ => false,
    }
}
