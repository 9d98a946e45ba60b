use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Jurisdictional tax breakdown for a USD amount. Values are exact
/// decimals; rounding happens only at presentation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gst: Decimal,
    pub income_tax: Decimal,
    pub total_tax: Decimal,
}
