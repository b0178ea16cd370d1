//! Reply templates
//!
//! All guest-facing copy lives here, one method per reply shape. The agent
//! decides which template to use; templates only format. Greetings rotate
//! through a few variants so repeated sessions don't sound canned.

use concierge_core::{Quote, RoomRecord, RoomType};
use rand::seq::SliceRandom;

const GREETINGS: &[&str] = &[
    "Hello! Welcome to our hotel. I can help you with rooms, rates and bookings. What would you like to know?",
    "Hi there! I'm the hotel's booking assistant. Ask me about our rooms, prices or availability.",
    "Welcome! I can tell you about our rooms, compare prices and help you book direct. How can I help?",
];

/// Renders guest-facing replies.
#[derive(Debug, Clone)]
pub struct ReplyTemplates {
    currency_symbol: String,
}

impl ReplyTemplates {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Amount with thousands separators and the configured symbol.
    pub fn price(&self, amount: i64) -> String {
        format!("{}{}", self.currency_symbol, group_thousands(amount))
    }

    pub fn greeting(&self) -> String {
        GREETINGS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(GREETINGS[0])
            .to_string()
    }

    /// Catalog overview, one line per room, direct rate highlighted.
    pub fn room_list(&self, rooms: &[RoomRecord], quotes: &[Quote]) -> String {
        let mut reply = String::from("Here are our rooms:\n");
        for (room, quote) in rooms.iter().zip(quotes) {
            reply.push_str(&format!(
                "- {}: {} per night when you book direct ({} on travel sites). {}\n",
                room.room_type.display_name(),
                self.price(quote.direct_price),
                self.price(quote.list_price),
                room.description,
            ));
        }
        reply.push_str("Which one shall I tell you more about?");
        reply
    }

    /// Single-room description with amenities.
    pub fn room_details(&self, room: &RoomRecord, quote: &Quote) -> String {
        format!(
            "Our {} is {}. It comes with {}. Booked direct it's {} per night instead of the {} you'd pay on travel sites.",
            room.room_type.display_name(),
            lowercase_first(&room.description),
            room.amenities,
            self.price(quote.direct_price),
            self.price(quote.list_price),
        )
    }

    pub fn pricing(&self, room: &RoomRecord, quote: &Quote) -> String {
        format!(
            "The {} is {} per night on travel sites, but just {} when you book directly with us. That's {} ({}%) saved every night.",
            room.room_type.display_name(),
            self.price(quote.list_price),
            self.price(quote.direct_price),
            self.price(quote.discount_amount),
            quote.discount_percent,
        )
    }

    pub fn booking(
        &self,
        room: &RoomRecord,
        quote: &Quote,
        quantity: Option<u32>,
        date: Option<&str>,
    ) -> String {
        let mut reply = format!(
            "Wonderful choice! I've noted a {} at the direct rate of {} per night",
            room.room_type.display_name(),
            self.price(quote.direct_price),
        );
        if let Some(n) = quantity {
            reply.push_str(&format!(" for {n} {}", if n == 1 { "room" } else { "rooms" }));
        }
        if let Some(d) = date {
            reply.push_str(&format!(" for {d}"));
        }
        reply.push_str(
            ". Our front desk will call you shortly to confirm the details and take payment.",
        );
        reply
    }

    /// Why book direct, anchored on one room's numbers.
    pub fn direct_benefit(&self, room: &RoomRecord, quote: &Quote) -> String {
        format!(
            "Booking directly with us always beats the travel sites: the {} listed at {} there is {} here, saving you {} a night. Direct guests also get free cancellation up to 24 hours and complimentary breakfast.",
            room.room_type.display_name(),
            self.price(quote.list_price),
            self.price(quote.direct_price),
            self.price(quote.discount_amount),
        )
    }

    pub fn availability(&self, room: &RoomRecord) -> String {
        if room.is_available() {
            let name = room.room_type.display_name();
            let noun = if room.inventory == 1 {
                name.to_string()
            } else {
                format!("{name}s")
            };
            format!(
                "Yes, we have {} {} available right now. Shall I hold one for you at the direct rate?",
                room.inventory, noun,
            )
        } else {
            format!(
                "I'm sorry, the {} is sold out at the moment. Can I interest you in one of our other rooms?",
                room.room_type.display_name(),
            )
        }
    }

    pub fn amenities(&self, room: &RoomRecord) -> String {
        format!(
            "The {} comes with {}.",
            room.room_type.display_name(),
            room.amenities,
        )
    }

    /// Vacancy summary across the catalog.
    pub fn availability_overview(&self, available: &[&RoomRecord]) -> String {
        if available.is_empty() {
            return "I'm sorry, we're fully booked at the moment. Would you like me to note your details for a waitlist?".to_string();
        }
        let names: Vec<&str> = available
            .iter()
            .map(|r| r.room_type.display_name())
            .collect();
        format!(
            "We currently have the {} available. Which one would you like?",
            join_natural(&names),
        )
    }

    /// A room type we recognize but don't currently sell.
    pub fn room_not_found(&self, room_type: RoomType) -> String {
        format!(
            "I'm sorry, the {} isn't on offer at this property right now. Would another of our rooms work for you?",
            room_type.display_name(),
        )
    }

    /// Used when a room-specific question arrives with no room resolved.
    pub fn which_room(&self) -> String {
        let names: Vec<&str> = RoomType::ALL.iter().map(|r| r.display_name()).collect();
        format!(
            "Happy to help with that. Which room did you have in mind? We offer the {}.",
            join_natural(&names),
        )
    }

    pub fn clarification(&self) -> String {
        "I'm sorry, I didn't quite catch that. You can ask me about our rooms, prices, availability or bookings.".to_string()
    }

    pub fn apology(&self) -> String {
        "I'm sorry, something went wrong on our side while looking that up. Please try again in a moment.".to_string()
    }
}

fn group_thousands(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> ReplyTemplates {
        ReplyTemplates::new("₹")
    }

    #[test]
    fn prices_are_grouped() {
        let t = templates();
        assert_eq!(t.price(4_250), "₹4,250");
        assert_eq!(t.price(850), "₹850");
        assert_eq!(t.price(1_250_000), "₹1,250,000");
    }

    #[test]
    fn greeting_is_one_of_the_variants() {
        let t = templates();
        for _ in 0..10 {
            assert!(GREETINGS.contains(&t.greeting().as_str()));
        }
    }

    #[test]
    fn which_room_names_every_type() {
        let reply = templates().which_room();
        for room in RoomType::ALL {
            assert!(reply.contains(room.display_name()), "{reply}");
        }
    }

    #[test]
    fn natural_join() {
        assert_eq!(join_natural(&["a"]), "a");
        assert_eq!(join_natural(&["a", "b"]), "a and b");
        assert_eq!(join_natural(&["a", "b", "c"]), "a, b and c");
    }
}
