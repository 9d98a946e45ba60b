use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Currency;

/// Payment channel a transaction is submitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    JazzCash,
    Crypto,
    WesternUnion,
}

impl Channel {
    /// Currency the settlement is paid out in. Bank rails deposit in PKR,
    /// crypto settles against the USD amount directly.
    pub fn local_currency(&self) -> Currency {
        match self {
            Channel::JazzCash | Channel::WesternUnion => Currency::Pkr,
            Channel::Crypto => Currency::Usd,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::JazzCash => write!(f, "jazzcash"),
            Channel::Crypto => write!(f, "crypto"),
            Channel::WesternUnion => write!(f, "western_union"),
        }
    }
}

/// A single payment attempt. Immutable once constructed; the client IP is
/// filled in by the orchestrator after asynchronous resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub amount_usd: Decimal,
    pub channel: Channel,
    /// 10-digit MTCN for Western Union, card number for JazzCash, absent
    /// for crypto.
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub client_ip: Option<String>,
    #[serde(default = "crate::utils::time::now_ms")]
    pub timestamp_ms: i64,
}

static MTCN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn mtcn_pattern() -> &'static Regex {
    MTCN_PATTERN.get_or_init(|| Regex::new(r"^\d{10}$").unwrap())
}

impl TransactionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.amount_usd <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "amount_usd must be positive".to_string(),
            ));
        }

        if self.channel == Channel::WesternUnion {
            let mtcn = self.identifier.as_deref().ok_or_else(|| {
                AppError::ValidationError("Western Union transfers require an MTCN".to_string())
            })?;
            if !mtcn_pattern().is_match(mtcn) {
                return Err(AppError::ValidationError(
                    "MTCN must be 10 digits".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Return the request with its client IP resolved.
    pub fn resolved(self, client_ip: String) -> Self {
        Self {
            client_ip: Some(client_ip),
            ..self
        }
    }
}
