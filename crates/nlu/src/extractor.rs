//! Entity extraction
//!
//! Pulls typed facts out of one normalized utterance: the room type, a date
//! expression, and a small quantity. At most one entity per type is
//! produced, always the earliest occurrence, so "deluxe or suite" resolves
//! to deluxe and the caller is asked to narrow down the rest.
//!
//! Extraction is a lazy scan over three phases (room, then date, then
//! quantity). Each [`EntityScan`] is independent; scanning the same text
//! twice yields the same entities.
//!
//! Quantity matching is shape-based and deliberately narrow: one or two
//! digits, or a spelled-out number word, bounded above by the configured
//! maximum. Digits inside a matched date expression are never quantities,
//! which keeps "book for 12/05/2026" from reading as twelve rooms.

use concierge_config::EntityPatterns;
use concierge_core::{Entity, EntityValue, RoomType};
use regex::Regex;
use std::ops::Range;

/// Compiled extraction tables. Built once, immutable afterwards.
pub struct EntityExtractor {
    rooms: Vec<(Regex, RoomType)>,
    dates: Vec<Regex>,
    quantity: Option<Regex>,
    number_words: Vec<(Regex, u32)>,
    max_quantity: u32,
}

impl EntityExtractor {
    /// Compile the vocabulary tables. Invalid patterns are logged and
    /// skipped, never fatal.
    pub fn new(patterns: &EntityPatterns) -> Self {
        let mut rooms = Vec::with_capacity(patterns.room_synonyms.len());
        for synonym in &patterns.room_synonyms {
            match Regex::new(&synonym.pattern) {
                Ok(regex) => rooms.push((regex, synonym.room)),
                Err(e) => {
                    tracing::warn!(pattern = %synonym.pattern, error = %e,
                        "Skipping invalid room synonym");
                }
            }
        }

        let mut dates = Vec::with_capacity(patterns.date_patterns.len());
        for raw in &patterns.date_patterns {
            match Regex::new(raw) {
                Ok(regex) => dates.push(regex),
                Err(e) => {
                    tracing::warn!(pattern = %raw, error = %e,
                        "Skipping invalid date pattern");
                }
            }
        }

        let quantity = match Regex::new(&patterns.quantity_pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern = %patterns.quantity_pattern, error = %e,
                    "Skipping invalid quantity pattern");
                None
            }
        };

        // Word boundaries around the escaped word, so "ten" never fires
        // inside "tent" or "often".
        let number_words = patterns
            .number_words
            .iter()
            .filter_map(|nw| {
                let raw = format!(r"\b{}\b", regex::escape(&nw.word));
                match Regex::new(&raw) {
                    Ok(regex) => Some((regex, nw.value)),
                    Err(e) => {
                        tracing::warn!(word = %nw.word, error = %e,
                            "Skipping invalid number word");
                        None
                    }
                }
            })
            .collect();

        Self {
            rooms,
            dates,
            quantity,
            number_words,
            max_quantity: patterns.max_quantity,
        }
    }

    /// Start a lazy scan over a normalized utterance.
    pub fn scan<'a>(&'a self, normalized: &'a str) -> EntityScan<'a> {
        EntityScan {
            extractor: self,
            text: normalized,
            phase: Phase::Room,
        }
    }

    /// Run a full scan and collect everything.
    pub fn extract(&self, normalized: &str) -> Vec<Entity> {
        self.scan(normalized).collect()
    }

    /// Earliest room-type mention; synonym order breaks start-position ties.
    fn find_room(&self, text: &str) -> Option<Entity> {
        self.rooms
            .iter()
            .filter_map(|(regex, room)| regex.find(text).map(|m| (m.start(), m.end(), *room)))
            .min_by_key(|&(start, _, _)| start)
            .map(|(start, end, room)| Entity {
                value: EntityValue::Room(room),
                span: start..end,
            })
    }

    /// Earliest date expression.
    fn find_date(&self, text: &str) -> Option<Entity> {
        self.dates
            .iter()
            .filter_map(|regex| regex.find(text))
            .min_by_key(|m| m.start())
            .map(|m| Entity {
                value: EntityValue::Date(m.as_str().to_string()),
                span: m.range(),
            })
    }

    /// Every date match span, for quantity exclusion.
    fn date_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.dates
            .iter()
            .flat_map(|regex| regex.find_iter(text).map(|m| m.range()))
            .collect()
    }

    /// Earliest in-bounds quantity, numeral or spelled out, that does not
    /// fall inside a date expression.
    fn find_quantity(&self, text: &str) -> Option<Entity> {
        let date_spans = self.date_spans(text);
        let outside_dates =
            |span: &Range<usize>| !date_spans.iter().any(|d| overlaps(d, span));

        let mut best: Option<(usize, u32, Range<usize>)> = None;
        let mut consider = |start: usize, value: u32, span: Range<usize>| {
            if value == 0 || value > self.max_quantity {
                tracing::debug!(value, "Quantity out of bounds, ignored");
                return;
            }
            if best.as_ref().map_or(true, |&(s, _, _)| start < s) {
                best = Some((start, value, span));
            }
        };

        if let Some(regex) = &self.quantity {
            for m in regex.find_iter(text) {
                let span = m.range();
                if !outside_dates(&span) {
                    continue;
                }
                if let Ok(value) = m.as_str().parse::<u32>() {
                    consider(span.start, value, span);
                }
            }
        }
        for (regex, value) in &self.number_words {
            if let Some(m) = regex.find(text) {
                let span = m.range();
                if outside_dates(&span) {
                    consider(span.start, *value, span);
                }
            }
        }

        best.map(|(_, value, span)| Entity {
            value: EntityValue::Quantity(value),
            span,
        })
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Room,
    Date,
    Quantity,
    Done,
}

/// Lazy extraction iterator: yields at most one entity per type, in phase
/// order (room, date, quantity). Dropping it early skips the later phases
/// entirely.
pub struct EntityScan<'a> {
    extractor: &'a EntityExtractor,
    text: &'a str,
    phase: Phase,
}

impl Iterator for EntityScan<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        loop {
            let (found, next_phase) = match self.phase {
                Phase::Room => (self.extractor.find_room(self.text), Phase::Date),
                Phase::Date => (self.extractor.find_date(self.text), Phase::Quantity),
                Phase::Quantity => (self.extractor.find_quantity(self.text), Phase::Done),
                Phase::Done => return None,
            };
            self.phase = next_phase;
            if found.is_some() {
                return found;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use concierge_core::EntityKind;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(&EntityPatterns::default())
    }

    fn extract(text: &str) -> Vec<Entity> {
        extractor().extract(&normalize(text))
    }

    #[test]
    fn room_synonyms_fold_to_canonical_types() {
        let cases = [
            ("how much is the deluxe room", RoomType::Deluxe),
            ("do you have a luxury room", RoomType::Deluxe),
            ("show me your suites", RoomType::Suite),
            ("a basic room is fine", RoomType::Standard),
            ("i need the executive room", RoomType::Executive),
            ("any business rooms left", RoomType::Executive),
        ];
        for (text, expected) in cases {
            let entities = extract(text);
            let rooms: Vec<RoomType> =
                entities.iter().filter_map(Entity::room_type).collect();
            assert_eq!(rooms, vec![expected], "{text:?}");
        }
    }

    #[test]
    fn at_most_one_entity_per_type() {
        let entities = extract("deluxe or suite, two or three nights, today or tomorrow");
        let mut kinds: Vec<EntityKind> = entities.iter().map(Entity::kind).collect();
        let before = kinds.len();
        kinds.dedup();
        assert_eq!(kinds.len(), before, "duplicate entity types: {entities:?}");
    }

    #[test]
    fn earliest_mention_wins() {
        let entities = extract("deluxe or suite?");
        assert_eq!(entities[0].room_type(), Some(RoomType::Deluxe));
    }

    #[test]
    fn phase_order_is_room_then_date_then_quantity() {
        let entities = extract("tomorrow i want two deluxe rooms");
        let kinds: Vec<EntityKind> = entities.iter().map(Entity::kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::RoomType, EntityKind::Date, EntityKind::Quantity]
        );
    }

    #[test]
    fn date_expressions() {
        for text in ["book for tomorrow", "next weekend please", "arriving 12/05/2026"] {
            let entities = extract(text);
            assert!(
                entities.iter().any(|e| e.kind() == EntityKind::Date),
                "{text:?} -> {entities:?}"
            );
        }
    }

    #[test]
    fn digits_inside_a_date_are_not_quantities() {
        let entities = extract("book for 12/05/2026");
        assert!(entities.iter().all(|e| e.kind() != EntityKind::Quantity));
    }

    #[test]
    fn years_and_phone_numbers_are_not_quantities() {
        for text in ["the hotel opened in 1998", "call me at 9876543210"] {
            let entities = extract(text);
            assert!(
                entities.iter().all(|e| e.kind() != EntityKind::Quantity),
                "{text:?} -> {entities:?}"
            );
        }
    }

    #[test]
    fn spelled_out_and_numeral_quantities() {
        let entities = extract("three rooms please");
        assert!(entities.contains(&Entity {
            value: EntityValue::Quantity(3),
            span: 0..5,
        }));

        let entities = extract("2 nights for two guests");
        let quantities: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Quantity)
            .collect();
        // Earliest occurrence wins between numeral and word.
        assert_eq!(quantities.len(), 1);
        assert_eq!(quantities[0].value, EntityValue::Quantity(2));
        assert_eq!(quantities[0].span, 0..1);
    }

    #[test]
    fn out_of_bounds_quantities_are_rejected() {
        for text in ["give me 25 rooms", "0 rooms"] {
            let entities = extract(text);
            assert!(
                entities.iter().all(|e| e.kind() != EntityKind::Quantity),
                "{text:?} -> {entities:?}"
            );
        }
    }

    #[test]
    fn number_word_needs_its_own_word_boundary() {
        let entities = extract("i often stay in a tent");
        assert!(entities.iter().all(|e| e.kind() != EntityKind::Quantity));
    }

    #[test]
    fn scan_is_lazy_and_restartable() {
        let ex = extractor();
        let text = normalize("two deluxe rooms for tomorrow");

        let first = ex.scan(&text).next();
        assert_eq!(
            first.as_ref().and_then(Entity::room_type),
            Some(RoomType::Deluxe)
        );

        let a: Vec<Entity> = ex.scan(&text).collect();
        let b: Vec<Entity> = ex.scan(&text).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn no_entities_in_plain_text() {
        assert!(extract("hello there").is_empty());
        assert!(extract("").is_empty());
    }
}
