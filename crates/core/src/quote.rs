//! Direct-booking quote

use serde::{Deserialize, Serialize};

/// Price breakdown for booking a room direct instead of through an OTA.
///
/// All amounts are whole rupees per night. The discount is computed, never
/// transacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Rack rate, as charged on OTA platforms.
    pub list_price: i64,
    /// Discounted direct-booking rate.
    pub direct_price: i64,
    /// `list_price - direct_price`.
    pub discount_amount: i64,
    /// Configured discount as a whole percentage (e.g. 15).
    pub discount_percent: u8,
}
