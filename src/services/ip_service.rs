use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::warn;
use url::Url;

use crate::config::ProviderSettings;
use crate::error::AppError;

/// Sentinel returned when the lookup provider is unreachable. The scorer
/// treats it like any other non-suspicious address.
pub const UNRESOLVED_IP: &str = "0.0.0.0";

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    ip: String,
}

/// Resolves the client's public IP through an external lookup service.
/// Failures degrade to the sentinel address and are never surfaced.
pub struct IpResolver {
    client: Client,
    api_url: Url,
    lookup_timeout: Duration,
}

impl IpResolver {
    pub fn new(settings: &ProviderSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.lookup_timeout_seconds))
            .user_agent("payment-risk-engine/1.0")
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create HTTP client: {}", e))
            })?;
        let api_url = Url::parse(&settings.ip_api_url)
            .map_err(|e| AppError::ConfigError(format!("invalid IP API URL: {}", e)))?;

        Ok(Self {
            client,
            api_url,
            lookup_timeout: Duration::from_secs(settings.lookup_timeout_seconds),
        })
    }

    pub async fn resolve(&self) -> String {
        match self.lookup().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!(error = %e, "IP lookup failed, using sentinel address");
                UNRESOLVED_IP.to_string()
            }
        }
    }

    async fn lookup(&self) -> Result<String, AppError> {
        let response = timeout(
            self.lookup_timeout,
            self.client.get(self.api_url.clone()).send(),
        )
        .await
        .map_err(|_| AppError::ExternalApiError("IP lookup timed out".to_string()))??;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "IP lookup returned HTTP {}",
                response.status()
            )));
        }

        let body: IpLookupResponse = response.json().await?;
        Ok(body.ip)
    }
}
