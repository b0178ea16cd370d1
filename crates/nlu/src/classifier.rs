//! Intent classification
//!
//! Walks the intent trigger sets in priority order (most specific first) and
//! returns the first intent whose score clears the confidence floor. The
//! score is bounded to [0, 1] and exists only to support that floor
//! decision: a single pattern hit scores 0.5, and the remainder scales with
//! the fraction of the intent's patterns that matched. It is not a
//! probability and is never compared across intents.
//!
//! Tie-breaks are deterministic and documented:
//! - across intents: declared priority order wins, so "book the deluxe room
//!   price" resolves to a booking request, not a pricing inquiry;
//! - within an intent: the longest matching pattern is recorded as the
//!   trigger (visible in debug logs), independent of match position.

use concierge_config::PatternLibrary;
use concierge_core::Intent;
use regex::Regex;

/// Classification result: exactly one intent per utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    /// Bounded score in [0, 1]; 0.0 for the fallback intent.
    pub confidence: f32,
}

struct CompiledIntent {
    intent: Intent,
    patterns: Vec<Regex>,
}

/// Priority-ordered pattern matcher over the closed intent set.
pub struct IntentClassifier {
    /// Sorted most-specific-first at construction.
    sets: Vec<CompiledIntent>,
    min_confidence: f32,
}

impl IntentClassifier {
    /// Compile the library's trigger sets. Patterns that fail to compile are
    /// logged and skipped so a bad override never takes the classifier down.
    pub fn new(library: &PatternLibrary) -> Self {
        let mut sets = Vec::new();
        for set in library.intents_by_priority() {
            let mut patterns = Vec::with_capacity(set.patterns.len());
            for raw in &set.patterns {
                match Regex::new(raw) {
                    Ok(regex) => patterns.push(regex),
                    Err(e) => {
                        tracing::warn!(intent = %set.intent, pattern = %raw, error = %e,
                            "Skipping invalid intent pattern");
                    }
                }
            }
            if patterns.is_empty() {
                tracing::warn!(intent = %set.intent, "Intent has no usable patterns");
                continue;
            }
            sets.push(CompiledIntent {
                intent: set.intent,
                patterns,
            });
        }
        Self {
            sets,
            min_confidence: library.min_confidence,
        }
    }

    /// Classify a normalized utterance.
    ///
    /// Always returns exactly one intent; when nothing clears the floor the
    /// result is `Intent::Fallback` with confidence 0.0.
    pub fn classify(&self, normalized: &str) -> Classification {
        for set in &self.sets {
            let matched: Vec<&Regex> = set
                .patterns
                .iter()
                .filter(|p| p.is_match(normalized))
                .collect();
            if matched.is_empty() {
                continue;
            }

            let fraction = matched.len() as f32 / set.patterns.len() as f32;
            let confidence = (0.5 + 0.5 * fraction).min(1.0);
            if confidence < self.min_confidence {
                continue;
            }

            // Longest matching pattern is the deterministic trigger.
            let trigger = matched
                .iter()
                .max_by_key(|p| p.as_str().len())
                .map(|p| p.as_str())
                .unwrap_or_default();
            tracing::debug!(
                intent = %set.intent,
                confidence,
                trigger,
                "Intent classified"
            );
            return Classification {
                intent: set.intent,
                confidence,
            };
        }

        tracing::debug!("No intent pattern matched, falling back");
        Classification {
            intent: Intent::Fallback,
            confidence: 0.0,
        }
    }
}
