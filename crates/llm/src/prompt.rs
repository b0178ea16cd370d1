//! Prompt construction for the generative fallback
//!
//! One flat prompt per call: fixed assistant rules, a one-line dialogue
//! summary, then the guest's utterance. The rules pin the model to the
//! concierge role and forbid it from inventing rates, which stay the
//! calculator's job.

/// Builds the prompt sent to the generative backend.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    hotel_name: String,
}

impl PromptBuilder {
    pub fn new(hotel_name: impl Into<String>) -> Self {
        Self {
            hotel_name: hotel_name.into(),
        }
    }

    /// Render the full prompt for one turn.
    pub fn build(&self, utterance: &str, context_summary: &str) -> String {
        let mut prompt = format!(
            "You are the reception assistant at {name}, a city hotel.\n\
             Rules:\n\
             - Answer in at most two short sentences, warm and professional.\n\
             - Never state or invent room prices, discounts or availability; \
               instead invite the guest to ask about rooms or rates directly.\n\
             - Encourage booking directly with the hotel when relevant.\n\
             - If the question is not about the hotel or a stay, politely steer back.\n",
            name = self.hotel_name
        );
        if !context_summary.is_empty() {
            prompt.push_str("\nConversation so far: ");
            prompt.push_str(context_summary);
            prompt.push('\n');
        }
        prompt.push_str("\nGuest: ");
        prompt.push_str(utterance.trim());
        prompt.push_str("\nAssistant:");
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("Grand Palace Hotel")
    }
}
