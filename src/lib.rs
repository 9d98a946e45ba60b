pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;

pub use error::types::*;

use std::sync::Arc;

use crate::config::Settings;
use crate::services::settlement::SettlementOrchestrator;

/// Shared application state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub orchestrator: Arc<SettlementOrchestrator>,
}
