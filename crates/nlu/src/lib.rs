//! Query understanding: intent classification and entity extraction
//!
//! Both components compile their regex tables once from the
//! [`concierge_config::PatternLibrary`] and are immutable afterwards. They
//! share nothing at runtime, so extraction and classification of the same
//! utterance are order-independent and may run in any order (or in
//! parallel) without affecting the result.
//!
//! Invalid patterns in a user-supplied library are logged and skipped, never
//! fatal; the built-in defaults are known-good.

mod classifier;
mod extractor;

pub use classifier::{Classification, IntentClassifier};
pub use extractor::{EntityExtractor, EntityScan};

/// Normalize an utterance before matching: trim and case-fold.
///
/// All patterns in the library are written against this form.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_folds() {
        assert_eq!(normalize("  How MUCH is the Deluxe?  "), "how much is the deluxe?");
        assert_eq!(normalize(""), "");
    }
}
