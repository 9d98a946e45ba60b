use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{info, warn};
use url::Url;

use crate::config::ProviderSettings;
use crate::error::AppError;
use crate::models::{ConversionResult, Currency, RateSource};

/// Static fallback rates, USD base. Used whenever the live provider is
/// unavailable or has not been fetched yet.
const FALLBACK_RATES: [(Currency, f64); 7] = [
    (Currency::Usd, 1.0),
    (Currency::Pkr, 278.5),
    (Currency::Eur, 0.92),
    (Currency::Gbp, 0.79),
    (Currency::Aed, 3.67),
    (Currency::Sar, 3.75),
    (Currency::Inr, 84.0),
];

fn fallback_rate(currency: Currency) -> f64 {
    FALLBACK_RATES
        .iter()
        .find(|(c, _)| *c == currency)
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0)
}

#[derive(Debug, Deserialize)]
struct RateTableResponse {
    rates: HashMap<String, f64>,
}

/// Currency conversion with a live-rate/fallback strategy. Live rates are
/// fetched once and cached for the process lifetime with no expiry; any
/// fetch failure degrades silently to the fallback table. Conversion never
/// fails.
pub struct RateService {
    client: Client,
    api_url: Url,
    lookup_timeout: Duration,
    live_rates: RwLock<Option<HashMap<Currency, f64>>>,
}

impl RateService {
    pub fn new(settings: &ProviderSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.lookup_timeout_seconds))
            .user_agent("payment-risk-engine/1.0")
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create HTTP client: {}", e))
            })?;
        let api_url = Url::parse(&settings.rate_api_url)
            .map_err(|e| AppError::ConfigError(format!("invalid rate API URL: {}", e)))?;

        Ok(Self {
            client,
            api_url,
            lookup_timeout: Duration::from_secs(settings.lookup_timeout_seconds),
            live_rates: RwLock::new(None),
        })
    }

    /// Populate the live-rate cache if it is empty. Failures are logged
    /// and swallowed; the service stays on the fallback table.
    pub async fn prefetch(&self) {
        if self.live_rates.read().await.is_some() {
            return;
        }
        match self.fetch_live_rates().await {
            Ok(rates) => {
                info!(currencies = rates.len(), "live exchange rates loaded");
                *self.live_rates.write().await = Some(rates);
            }
            Err(e) => {
                warn!(error = %e, "rate provider unavailable, staying on fallback rates");
            }
        }
    }

    async fn fetch_live_rates(&self) -> Result<HashMap<Currency, f64>, AppError> {
        let response = timeout(
            self.lookup_timeout,
            self.client.get(self.api_url.clone()).send(),
        )
        .await
        .map_err(|_| AppError::ExternalApiError("rate provider timed out".to_string()))??;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "rate provider returned HTTP {}",
                response.status()
            )));
        }

        let body: RateTableResponse = response.json().await?;

        // Merge the live table over the fallback, taking only the
        // currencies the engine supports.
        let mut merged: HashMap<Currency, f64> = FALLBACK_RATES.iter().copied().collect();
        for (currency, rate) in merged.iter_mut() {
            if let Some(live) = body.rates.get(currency.code()) {
                *rate = *live;
            }
        }
        Ok(merged)
    }

    /// Convert a USD amount into the target currency with the best
    /// available rate. `converted_amount` is rounded to the nearest unit.
    pub async fn convert(&self, amount_usd: Decimal, target: Currency) -> ConversionResult {
        self.prefetch().await;

        let (rate, source) = match self.live_rates.read().await.as_ref() {
            Some(rates) => (
                rates.get(&target).copied().unwrap_or_else(|| fallback_rate(target)),
                RateSource::Live,
            ),
            None => (fallback_rate(target), RateSource::Fallback),
        };

        let amount = amount_usd.to_f64().unwrap_or(0.0);
        ConversionResult {
            target_currency: target,
            rate,
            converted_amount: (amount * rate).round() as i64,
            source,
        }
    }

    /// Current rate table and its source, for display surfaces.
    pub async fn rate_table(&self) -> (HashMap<Currency, f64>, RateSource) {
        match self.live_rates.read().await.as_ref() {
            Some(rates) => (rates.clone(), RateSource::Live),
            None => (FALLBACK_RATES.iter().copied().collect(), RateSource::Fallback),
        }
    }
}
