use payment_risk_engine::{
    config::Settings, handlers, services::settlement::SettlementOrchestrator, AppState,
};
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    info!("Starting payment risk engine");

    let settings = Settings::new()?;
    info!("Configuration loaded successfully");

    let orchestrator = Arc::new(SettlementOrchestrator::new(&settings)?);

    let state = AppState {
        settings: settings.clone(),
        orchestrator,
    };

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", handlers::create_settlement_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server running on {}", addr);
    info!("  GET  /health - Service health");
    info!("  POST /api/v1/settlements - Submit a payment attempt");
    info!("  GET  /api/v1/rates - Current conversion rates");

    axum::serve(listener, app).await?;
    Ok(())
}
