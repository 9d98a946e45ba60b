pub mod ip_service;
pub mod processor;
pub mod rate_service;
pub mod settlement;
pub mod tax_calculator;

pub use ip_service::IpResolver;
pub use processor::{HttpPaymentProcessor, PaymentProcessor};
pub use rate_service::RateService;
pub use settlement::SettlementOrchestrator;
pub use tax_calculator::TaxCalculator;
