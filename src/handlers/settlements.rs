use axum::{extract::State, response::Json};

use crate::error::AppError;
use crate::models::{SettlementOutcome, TransactionRequest};
use crate::AppState;

/// Submit a payment attempt to the settlement engine. Validation errors
/// come back as 400; every engine decision (blocked, declined, success)
/// is a 200 with a tagged outcome body.
pub async fn submit_settlement(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<SettlementOutcome>, AppError> {
    let outcome = state.orchestrator.settle(request).await?;
    Ok(Json(outcome))
}
