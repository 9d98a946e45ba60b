use serde::{Deserialize, Serialize};

/// Currencies the engine can settle in. The fallback rate table covers
/// exactly this set; live rates for other codes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Pkr,
    Eur,
    Gbp,
    Aed,
    Sar,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Usd,
        Currency::Pkr,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aed,
        Currency::Sar,
        Currency::Inr,
    ];

    /// ISO 4217 code, as used by the rate provider.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Pkr => "PKR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
            Currency::Inr => "INR",
        }
    }

    /// Display symbol for presentation surfaces.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Pkr => "₨",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Aed => "د.إ",
            Currency::Sar => "ر.س",
            Currency::Inr => "₹",
        }
    }
}

/// Where a conversion rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Live,
    Fallback,
}

/// Result of converting a USD amount into a target currency. Conversion
/// never fails; `source` records whether the rate was live or degraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub target_currency: Currency,
    pub rate: f64,
    pub converted_amount: i64,
    pub source: RateSource,
}
