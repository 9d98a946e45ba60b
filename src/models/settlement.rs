use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ConversionResult, Currency, TaxBreakdown, TransactionRequest};

/// Everything the payment processor needs for one settlement call.
/// Constructed and owned by the orchestrator; dropped after the call.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementPayload {
    pub request: TransactionRequest,
    pub risk_score: f64,
    pub tax: TaxBreakdown,
    /// Conversion of the tax-inclusive total into the channel's local
    /// currency.
    pub conversion: ConversionResult,
}

/// Terminal result of a settlement attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettlementOutcome {
    Success { payout: PayoutDetails },
    Declined { reason: String },
    Blocked { reason: String },
}

/// How the funds were (or will be) paid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PayoutDetails {
    /// Card/bank flows: the processor deposits into a local account.
    BankDeposit {
        iban: String,
        account_name: String,
        host_share: Option<f64>,
        platform_share: Option<f64>,
        converted_total: i64,
        currency: Currency,
    },
    /// Crypto flow: wallet and transaction id are synthesized locally and
    /// not processor-confirmed.
    CryptoTransfer {
        wallet: String,
        txid: String,
        btc_amount: Decimal,
        amount_usd: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = SettlementOutcome::Blocked {
            reason: "too many attempts".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "blocked");
        assert_eq!(json["reason"], "too many attempts");
    }
}
