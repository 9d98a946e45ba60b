use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBreakdown;

pub const GST_RATE: Decimal = dec!(0.17);
pub const INCOME_TAX_RATE: Decimal = dec!(0.05);

/// Stateless tax computation with fixed jurisdictional rates. The
/// breakdown is exact; nothing here rounds.
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, amount_usd: Decimal) -> TaxBreakdown {
        let gst = amount_usd * GST_RATE;
        let income_tax = amount_usd * INCOME_TAX_RATE;
        TaxBreakdown {
            gst,
            income_tax,
            total_tax: gst + income_tax,
        }
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
