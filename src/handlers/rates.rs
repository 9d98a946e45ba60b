use std::collections::HashMap;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::models::RateSource;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RateQuote {
    pub rate: f64,
    pub symbol: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RateTableView {
    pub source: RateSource,
    pub rates: HashMap<&'static str, RateQuote>,
}

/// Current conversion table and whether it is live or fallback data, for
/// currency display widgets.
pub async fn current_rates(State(state): State<AppState>) -> Json<RateTableView> {
    let rate_service = state.orchestrator.rate_service();
    rate_service.prefetch().await;
    let (rates, source) = rate_service.rate_table().await;

    let rates = rates
        .into_iter()
        .map(|(currency, rate)| {
            (
                currency.code(),
                RateQuote {
                    rate,
                    symbol: currency.symbol(),
                },
            )
        })
        .collect();

    Json(RateTableView { source, rates })
}
