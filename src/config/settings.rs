use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub providers: ProviderSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

/// Endpoints for the three external collaborators: the exchange-rate
/// provider, the IP lookup service and the payment processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub rate_api_url: String,
    pub ip_api_url: String,
    pub processor_base_url: String,
    pub lookup_timeout_seconds: u64,
    pub processor_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings::default(),
            providers: ProviderSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            rate_api_url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
            ip_api_url: "https://api.ipify.org?format=json".to_string(),
            processor_base_url: "http://localhost:5000".to_string(),
            lookup_timeout_seconds: 3,
            processor_timeout_seconds: 15,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let _settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        Ok(Settings {
            api: ApiSettings {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
            providers: ProviderSettings {
                rate_api_url: env::var("RATE_API_URL")
                    .unwrap_or_else(|_| "https://api.exchangerate-api.com/v4/latest/USD".to_string()),
                ip_api_url: env::var("IP_API_URL")
                    .unwrap_or_else(|_| "https://api.ipify.org?format=json".to_string()),
                processor_base_url: env::var("PROCESSOR_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:5000".to_string()),
                lookup_timeout_seconds: env::var("LOOKUP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
                processor_timeout_seconds: env::var("PROCESSOR_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .unwrap_or(15),
            },
            logging: LoggingSettings {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}
