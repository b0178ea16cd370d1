//! Caller intents
//!
//! The intent set is closed: every utterance is assigned exactly one of the
//! nine variants below. `Fallback` is the catch-all when no configured
//! pattern matches.

use serde::{Deserialize, Serialize};

/// High-level goal of a single utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Opening pleasantries ("hi", "good morning")
    Greeting,
    /// What rooms exist ("what rooms do you have")
    RoomInquiry,
    /// Price of a room or rooms ("how much is the deluxe")
    PricingInquiry,
    /// Caller wants to reserve ("book a suite for tomorrow")
    BookingRequest,
    /// Why book direct instead of an OTA ("is it cheaper to book direct")
    DirectBookingBenefit,
    /// Policy/service questions answered from the FAQ list
    Faq,
    /// Vacancy check ("any deluxe rooms free tonight")
    Availability,
    /// What a room comes with ("does the suite have a bathtub")
    AmenityInquiry,
    /// Nothing matched; answered with a clarification template
    Fallback,
}

impl Intent {
    /// Every intent, for closure checks.
    pub const ALL: [Intent; 9] = [
        Intent::Greeting,
        Intent::RoomInquiry,
        Intent::PricingInquiry,
        Intent::BookingRequest,
        Intent::DirectBookingBenefit,
        Intent::Faq,
        Intent::Availability,
        Intent::AmenityInquiry,
        Intent::Fallback,
    ];

    /// Classification order, most specific first.
    ///
    /// Ambiguous utterances ("book the deluxe room price") can match several
    /// intents; the winner is always the earliest entry here that clears the
    /// confidence floor. `Fallback` is absent because it is never matched,
    /// only defaulted to.
    pub const PRIORITY: [Intent; 8] = [
        Intent::DirectBookingBenefit,
        Intent::BookingRequest,
        Intent::PricingInquiry,
        Intent::Availability,
        Intent::AmenityInquiry,
        Intent::RoomInquiry,
        Intent::Faq,
        Intent::Greeting,
    ];

    /// Stable identifier used in analytics entries and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::RoomInquiry => "room_inquiry",
            Intent::PricingInquiry => "pricing_inquiry",
            Intent::BookingRequest => "booking_request",
            Intent::DirectBookingBenefit => "direct_booking_benefit",
            Intent::Faq => "faq",
            Intent::Availability => "availability",
            Intent::AmenityInquiry => "amenity_inquiry",
            Intent::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_covers_all_matchable_intents() {
        for intent in Intent::ALL {
            if intent == Intent::Fallback {
                assert!(!Intent::PRIORITY.contains(&intent));
            } else {
                assert!(Intent::PRIORITY.contains(&intent), "{intent} missing");
            }
        }
    }

    #[test]
    fn identifiers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for intent in Intent::ALL {
            assert!(seen.insert(intent.as_str()));
        }
    }
}
