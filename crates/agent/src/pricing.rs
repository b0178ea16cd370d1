//! Direct-booking price calculator
//!
//! One rule: the direct rate is the list rate minus the configured whole
//! percentage, rounded half-up to the nearest rupee. All arithmetic is
//! integral; amounts never go through floats.

use concierge_core::Quote;

/// Computes direct-booking quotes from list prices.
#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator {
    discount_percent: u8,
}

impl PricingCalculator {
    pub fn new(discount_percent: u8) -> Self {
        Self { discount_percent }
    }

    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    /// Quote for one list price. Half-rupee discounts round up, so the
    /// guest-facing saving is never understated by a rupee.
    pub fn quote(&self, list_price: i64) -> Quote {
        let discount_amount = (list_price * i64::from(self.discount_percent) + 50) / 100;
        Quote {
            list_price,
            direct_price: list_price - discount_amount,
            discount_amount,
            discount_percent: self.discount_percent,
        }
    }
}
