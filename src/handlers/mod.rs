pub mod health;
pub mod rates;
pub mod settlements;

pub use health::health_check;
pub use rates::current_rates;
pub use settlements::submit_settlement;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_settlement_routes() -> Router<AppState> {
    Router::new()
        .route("/settlements", post(settlements::submit_settlement))
        .route("/rates", get(rates::current_rates))
}
