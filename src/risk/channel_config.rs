use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Channel;

/// Per-channel tuning for the fraud rule set. The channels share one
/// scorer; only these parameters differ between them.
#[derive(Debug, Clone)]
pub struct ChannelRiskConfig {
    /// Identifiers that are always rejected.
    pub blacklist: &'static [&'static str],
    /// Client IPs treated as a weak fraud signal.
    pub suspicious_ips: &'static [&'static str],
    /// Amount ceiling above which the over-limit rule fires, if any.
    pub amount_limit_usd: Option<Decimal>,
    /// Scores strictly above this block the attempt.
    pub block_threshold: f64,
    /// Upper bound of the uniform noise contribution.
    pub noise_ceiling: f64,
    /// Window for the repeated-attempt rule.
    pub velocity_window_ms: i64,
    /// Hard cap on consecutive processor failures, if any. `None` means
    /// the channel is throttled only through the velocity score.
    pub max_attempts: Option<u32>,
}

const WESTERN_UNION_BLACKLIST: &[&str] = &["1234567890", "1111111111"];
const CARD_BLACKLIST: &[&str] = &["4111111111111111"];

const WESTERN_UNION_SUSPICIOUS_IPS: &[&str] = &["192.168.1.1"];
const GENERIC_SUSPICIOUS_IPS: &[&str] = &["192.168.1.1", "10.0.0.1"];

const VELOCITY_WINDOW_MS: i64 = 300_000;

impl ChannelRiskConfig {
    pub fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::WesternUnion => Self {
                blacklist: WESTERN_UNION_BLACKLIST,
                suspicious_ips: WESTERN_UNION_SUSPICIOUS_IPS,
                amount_limit_usd: None,
                block_threshold: 70.0,
                noise_ceiling: 15.0,
                velocity_window_ms: VELOCITY_WINDOW_MS,
                max_attempts: Some(3),
            },
            Channel::JazzCash => Self {
                blacklist: CARD_BLACKLIST,
                suspicious_ips: GENERIC_SUSPICIOUS_IPS,
                amount_limit_usd: Some(dec!(5000)),
                block_threshold: 70.0,
                noise_ceiling: 20.0,
                velocity_window_ms: VELOCITY_WINDOW_MS,
                max_attempts: None,
            },
            Channel::Crypto => Self {
                blacklist: &[],
                suspicious_ips: GENERIC_SUSPICIOUS_IPS,
                amount_limit_usd: Some(dec!(5000)),
                block_threshold: 60.0,
                noise_ceiling: 20.0,
                velocity_window_ms: VELOCITY_WINDOW_MS,
                max_attempts: None,
            },
        }
    }
}
