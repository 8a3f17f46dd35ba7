//! Type-safe price representation using decimal arithmetic.
//!
//! Cart and checkout arithmetic stays in unrounded [`Decimal`]; a [`Price`]
//! is only built at the edge, where a value is shown to a shopper.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for a price.
const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store's default currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// The amount rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let mut rounded = self.rounded();
        rounded.rescale(DISPLAY_SCALE);
        format!("{}{rounded}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::new(20, 0)).display(), "$20.00");
        assert_eq!(Price::usd(Decimal::new(3198, 2)).display(), "$31.98");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        // 2.5592 (8% tax on 31.99) -> 2.56
        assert_eq!(Price::usd(Decimal::new(25_592, 4)).display(), "$2.56");
        assert_eq!(Price::usd(Decimal::new(1005, 3)).display(), "$1.01");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(
            Price::new(Decimal::ONE, CurrencyCode::GBP).to_string(),
            "£1.00"
        );
        assert_eq!(CurrencyCode::EUR.code(), "EUR");
    }
}
