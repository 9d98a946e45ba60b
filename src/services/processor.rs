use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::config::ProviderSettings;
use crate::error::AppError;
use crate::models::{Channel, PayoutDetails, SettlementPayload, TaxBreakdown};
use crate::risk::ProcessorError;

/// Illustrative BTC quote used by the locally settled crypto flow.
const BTC_USD_RATE: Decimal = dec!(65000);

/// Outbound interface to the external payment processor. Injectable so
/// tests can settle against a mock.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn submit(&self, payload: &SettlementPayload) -> Result<PayoutDetails, ProcessorError>;
}

/// HTTP client for the real processor. Western Union and JazzCash each
/// post to their own endpoint; crypto settles locally with a synthesized
/// wallet and transaction id.
pub struct HttpPaymentProcessor {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct WesternUnionSubmission<'a> {
    mtcn: &'a str,
    amount_usd: Decimal,
    tax: &'a TaxBreakdown,
    #[serde(rename = "fraudScore")]
    fraud_score: f64,
}

#[derive(Debug, Serialize)]
struct CardSubmission<'a> {
    amount: Decimal,
    currency: &'static str,
    tax: &'a TaxBreakdown,
    #[serde(rename = "fraudScore")]
    fraud_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ProcessorResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    iban: Option<String>,
    account_name: Option<String>,
    host_share: Option<f64>,
    platform_share: Option<f64>,
}

impl HttpPaymentProcessor {
    pub fn new(settings: &ProviderSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.processor_timeout_seconds))
            .user_agent("payment-risk-engine/1.0")
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create HTTP client: {}", e))
            })?;
        let base_url = Url::parse(&settings.processor_base_url)
            .map_err(|e| AppError::ConfigError(format!("invalid processor URL: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProcessorError> {
        self.base_url.join(path).map_err(|e| ProcessorError::Unreachable {
            message: e.to_string(),
        })
    }

    async fn post_submission<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        payload: &SettlementPayload,
    ) -> Result<PayoutDetails, ProcessorError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProcessorError::Unreachable {
                message: e.to_string(),
            })?;

        let status = response.status();
        let parsed: ProcessorResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(ProcessorError::Unreachable {
                    message: format!("malformed processor response: {}", e),
                })
            }
            Err(_) => {
                return Err(ProcessorError::Declined {
                    reason: format!("processor returned HTTP {}", status),
                })
            }
        };

        if !parsed.success {
            return Err(ProcessorError::Declined {
                reason: parsed
                    .error
                    .unwrap_or_else(|| format!("processor returned HTTP {}", status)),
            });
        }

        Ok(PayoutDetails::BankDeposit {
            iban: parsed.iban.unwrap_or_default(),
            account_name: parsed.account_name.unwrap_or_default(),
            host_share: parsed.host_share,
            platform_share: parsed.platform_share,
            converted_total: payload.conversion.converted_amount,
            currency: payload.conversion.target_currency,
        })
    }

    /// Crypto settles without a processor round-trip: the wallet address
    /// and transaction id are synthesized locally and not chain-confirmed.
    fn synthesize_crypto_transfer(&self, payload: &SettlementPayload) -> PayoutDetails {
        let mut rng = rand::thread_rng();

        let mut tx_bytes = [0u8; 32];
        rng.fill(&mut tx_bytes);
        let txid = format!("0x{}", hex::encode(tx_bytes));

        const WALLET_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let suffix: String = (0..9)
            .map(|_| WALLET_CHARSET[rng.gen_range(0..WALLET_CHARSET.len())] as char)
            .collect();
        let wallet = format!("bc1q{}", suffix);

        let btc_amount = (payload.request.amount_usd / BTC_USD_RATE).round_dp(6);

        info!(
            wallet = %wallet,
            btc_amount = %btc_amount,
            "crypto transfer synthesized locally"
        );

        PayoutDetails::CryptoTransfer {
            wallet,
            txid,
            btc_amount,
            amount_usd: payload.request.amount_usd,
        }
    }
}

#[async_trait]
impl PaymentProcessor for HttpPaymentProcessor {
    async fn submit(&self, payload: &SettlementPayload) -> Result<PayoutDetails, ProcessorError> {
        match payload.request.channel {
            Channel::WesternUnion => {
                let mtcn = payload.request.identifier.as_deref().unwrap_or_default();
                let body = WesternUnionSubmission {
                    mtcn,
                    amount_usd: payload.request.amount_usd,
                    tax: &payload.tax,
                    fraud_score: payload.risk_score,
                };
                self.post_submission("api/wu-to-jazzcash", &body, payload).await
            }
            Channel::JazzCash => {
                let body = CardSubmission {
                    amount: payload.request.amount_usd,
                    currency: "USD",
                    tax: &payload.tax,
                    fraud_score: payload.risk_score,
                    identifier: payload.request.identifier.as_deref(),
                };
                self.post_submission("api/process-payment", &body, payload).await
            }
            Channel::Crypto => Ok(self.synthesize_crypto_transfer(payload)),
        }
    }
}
