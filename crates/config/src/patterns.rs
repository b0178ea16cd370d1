//! Lexical pattern library
//!
//! Declarative trigger tables for intent classification and entity
//! extraction: `(pattern, intent, priority)` rows plus per-entity-type
//! vocabularies. Keeping the tables as data keeps the matching code small
//! and lets the behavior be tested in isolation.
//!
//! All patterns are written against the normalized utterance (lowercased,
//! trimmed), so none of them needs `(?i)`.
//!
//! The built-in default covers the hotel booking domain. A deployment can
//! replace it wholesale from a YAML file via [`PatternLibrary::load`].

use concierge_core::{Intent, RoomType};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Root pattern configuration, loaded once and then immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternLibrary {
    /// Minimum classifier confidence; below this the turn falls back.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Intent trigger sets. Lower `priority` is tried first.
    #[serde(default)]
    pub intents: Vec<IntentPatterns>,

    /// Entity extraction vocabularies.
    #[serde(default)]
    pub entities: EntityPatterns,
}

fn default_min_confidence() -> f32 {
    0.25
}

/// Trigger set for one intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPatterns {
    pub intent: Intent,
    /// Classification priority: lower values are more specific and win ties
    /// across intents.
    pub priority: u8,
    /// Regex triggers. Within one intent the longest matching pattern is
    /// reported as the trigger, which keeps ambiguity resolution
    /// deterministic.
    pub patterns: Vec<String>,
}

/// Entity vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPatterns {
    /// Room-type surface forms, checked in order; first hit per room wins.
    pub room_synonyms: Vec<RoomSynonym>,

    /// Spelled-out quantities ("two" -> 2).
    pub number_words: Vec<NumberWord>,

    /// Date-expression triggers (calendar keywords and explicit dates).
    /// Matched before quantities; see the extractor for the precedence rule.
    pub date_patterns: Vec<String>,

    /// Numeral quantity shape. Deliberately narrow (1-2 digits) so that
    /// years and phone numbers never parse as quantities.
    pub quantity_pattern: String,

    /// Upper bound for a sane room/night/guest count.
    pub max_quantity: u32,
}

/// One room-type surface form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSynonym {
    pub pattern: String,
    pub room: RoomType,
}

/// One spelled-out number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberWord {
    pub word: String,
    pub value: u32,
}

impl PatternLibrary {
    /// Load a library from a YAML file, replacing the built-in default.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
                path: path.as_ref().display().to_string(),
                source: e,
            })?;
        let library: PatternLibrary = serde_yaml::from_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            intents = library.intents.len(),
            "Pattern library loaded"
        );
        Ok(library)
    }

    /// Intent trigger sets sorted by priority (most specific first).
    pub fn intents_by_priority(&self) -> Vec<&IntentPatterns> {
        let mut sets: Vec<&IntentPatterns> = self.intents.iter().collect();
        sets.sort_by_key(|s| s.priority);
        sets
    }

    /// Trigger set for one intent, if configured.
    pub fn intent_patterns(&self, intent: Intent) -> Option<&IntentPatterns> {
        self.intents.iter().find(|s| s.intent == intent)
    }
}

fn intent_set(intent: Intent, priority: u8, patterns: &[&str]) -> IntentPatterns {
    IntentPatterns {
        intent,
        priority,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        let intents = vec![
            intent_set(
                Intent::DirectBookingBenefit,
                10,
                &[
                    r"\b(compare|comparison|difference|vs|versus)\b",
                    r"\b(booking\.com|makemytrip|agoda|expedia|airbnb|ota)\b",
                    r"\b(cheaper|discount|save|savings?|deal|offer)\b",
                    r"\b(book(ing)?\s+direct(ly)?|direct\s+book(ing)?)\b",
                    r"\b(better\s+deal|best\s+price|lowest\s+rate)\b",
                ],
            ),
            intent_set(
                Intent::BookingRequest,
                20,
                &[
                    r"\b(book|reserve|reservation|make\s+a\s+booking)\b",
                    r"\bi\s+(want|need|would\s+like)\s+(a\s+room|to\s+book|to\s+reserve|to\s+stay)\b",
                    r"\b(can\s+i|how\s+do\s+i)\b.*\b(book|reserve)\b",
                    r"\b(need|want|get)\s+a\s+room\b",
                    r"\bproceed\s+with\s+(the\s+)?(booking|reservation)\b",
                ],
            ),
            intent_set(
                Intent::PricingInquiry,
                30,
                &[
                    r"\bhow\s+much\b",
                    r"\b(price|prices|pricing|cost|costs|rate|rates|tariff|fee)\b",
                    r"\bhow\s+(expensive|costly)\b",
                    r"\bcharge\b",
                ],
            ),
            intent_set(
                Intent::Availability,
                40,
                &[
                    r"\b(available|availability|vacant|vacanc(y|ies))\b",
                    r"\bdo\s+you\s+have\s+any\b",
                    r"\brooms?\s+(left|free)\b",
                    r"\bsold\s+out\b",
                    r"\b(free|open)\b.*\b(tonight|today|tomorrow)\b",
                ],
            ),
            intent_set(
                Intent::AmenityInquiry,
                50,
                &[
                    r"\bamenit(y|ies)\b",
                    r"\bfacilit(y|ies)\b",
                    r"\b(come(s)?\s+with|included?\s+in)\b",
                    r"\b(does|do)\s+(the|it|they)\b.*\b(have|include)\b",
                    r"\b(bathtub|balcony|mini-?bar|work\s+desk|king\s+bed)\b",
                ],
            ),
            intent_set(
                Intent::RoomInquiry,
                60,
                &[
                    r"\b(what|which|show|list|tell|display)\b.*\b(rooms?|room\s+types?|options|accommodations?)\b",
                    r"\b(looking\s+for|want\s+to\s+see)\b.*\brooms?\b",
                    r"\bwhat\s+(kind|types?)\s+of\s+rooms?\b",
                    r"\brooms?\s+do\s+you\s+have\b",
                    r"\btell\s+me\s+about\b.*\b(room|suite|deluxe|standard|executive)\b",
                ],
            ),
            intent_set(
                Intent::Faq,
                70,
                &[
                    r"\b(help|assist|support)\b",
                    r"\bcheck\s*-?\s*(in|out)\b",
                    r"\b(wifi|wi-?fi|internet|password)\b",
                    r"\bpark(ing)?\b",
                    r"\b(breakfast|food|meal|dining)\b",
                    r"\b(cancel(lation)?|refund)\b",
                    r"\b(payment|pay|credit\s+card|cash|upi)\b",
                    r"\b(pets?|dogs?|cats?)\b",
                    r"\b(polic(y|ies)|rules?)\b",
                    r"\b(airport|pickup|shuttle)\b",
                ],
            ),
            intent_set(
                Intent::Greeting,
                80,
                &[
                    r"\b(hello|hi|hey|greetings|namaste|hola)\b",
                    r"\bgood\s+(morning|afternoon|evening)\b",
                    r"^(hi|hello|hey)[\s!.]*$",
                ],
            ),
        ];

        let room_synonyms = vec![
            synonym(r"\bdeluxe(\s+rooms?)?\b", RoomType::Deluxe),
            synonym(r"\b(luxury|premium)\s+rooms?\b", RoomType::Deluxe),
            synonym(r"\bsuites?(\s+rooms?)?\b", RoomType::Suite),
            synonym(r"\bstandard(\s+rooms?)?\b", RoomType::Standard),
            synonym(r"\b(basic|regular)\s+rooms?\b", RoomType::Standard),
            synonym(r"\bexecutive(\s+rooms?)?\b", RoomType::Executive),
            synonym(r"\bbusiness\s+rooms?\b", RoomType::Executive),
        ];

        let number_words = [
            ("one", 1),
            ("two", 2),
            ("three", 3),
            ("four", 4),
            ("five", 5),
            ("six", 6),
            ("seven", 7),
            ("eight", 8),
            ("nine", 9),
            ("ten", 10),
        ]
        .into_iter()
        .map(|(word, value)| NumberWord {
            word: word.to_string(),
            value,
        })
        .collect();

        let date_patterns = vec![
            r"\b(today|tonight|tomorrow)\b".to_string(),
            r"\b(this|next)\s+(weekend|week|month)\b".to_string(),
            r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b".to_string(),
        ];

        Self {
            min_confidence: default_min_confidence(),
            intents,
            entities: EntityPatterns {
                room_synonyms,
                number_words,
                date_patterns,
                quantity_pattern: r"\b(\d{1,2})\b".to_string(),
                max_quantity: 20,
            },
        }
    }
}

impl Default for EntityPatterns {
    fn default() -> Self {
        PatternLibrary::default().entities
    }
}

fn synonym(pattern: &str, room: RoomType) -> RoomSynonym {
    RoomSynonym {
        pattern: pattern.to_string(),
        room,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_library_covers_every_matchable_intent() {
        let library = PatternLibrary::default();
        for intent in Intent::PRIORITY {
            assert!(
                library.intent_patterns(intent).is_some(),
                "no trigger set for {intent}"
            );
        }
        // Fallback is defaulted to, never matched.
        assert!(library.intent_patterns(Intent::Fallback).is_none());
    }

    #[test]
    fn priority_order_matches_intent_declaration() {
        let library = PatternLibrary::default();
        let ordered: Vec<Intent> = library
            .intents_by_priority()
            .iter()
            .map(|s| s.intent)
            .collect();
        assert_eq!(ordered, Intent::PRIORITY.to_vec());
    }

    #[test]
    fn yaml_round_trip_preserves_tables() {
        let library = PatternLibrary::default();
        let yaml = serde_yaml::to_string(&library).unwrap();
        let reloaded: PatternLibrary = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reloaded.intents.len(), library.intents.len());
        assert_eq!(
            reloaded.entities.room_synonyms.len(),
            library.entities.room_synonyms.len()
        );
        assert_eq!(reloaded.entities.max_quantity, 20);
    }
}
