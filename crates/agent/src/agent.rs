//! Concierge agent
//!
//! One `respond` call is one turn: normalize, classify, extract, resolve
//! references against the session context, dispatch to an intent handler,
//! patch the context and record exactly one analytics entry. The reply path
//! is total; store failures become an apology, generative failures become a
//! clarification, and both are reflected in the analytics record rather
//! than surfaced to the caller.

use std::sync::Arc;
use std::time::Instant;

use concierge_config::{PatternLibrary, Settings};
use concierge_core::{
    ContextPatch, DialogueContext, Entity, EntityValue, GenerativeBackend, Intent, QueryLogEntry,
    RoomType,
};
use concierge_llm::OllamaBackend;
use concierge_nlu::{normalize, EntityExtractor, IntentClassifier};
use concierge_store::{DataStore, StoreError};

use crate::{AgentError, AnalyticsRecorder, PricingCalculator, ReplyTemplates, SessionManager};

/// The conversational pipeline, shared across sessions.
pub struct ConciergeAgent {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    sessions: SessionManager,
    store: Arc<dyn DataStore>,
    pricing: PricingCalculator,
    templates: ReplyTemplates,
    analytics: AnalyticsRecorder,
    generative: Option<Arc<dyn GenerativeBackend>>,
}

/// Everything one turn's handlers need, resolved up front.
struct Turn<'a> {
    utterance: &'a str,
    normalized: &'a str,
    /// Room named in this utterance, if any.
    mentioned_room: Option<RoomType>,
    /// Mentioned room, falling back to the session's last reference.
    resolved_room: Option<RoomType>,
    quantity: Option<u32>,
    date: Option<&'a str>,
    context: &'a DialogueContext,
}

impl ConciergeAgent {
    /// Build the pipeline from settings. The generative channel is attached
    /// only when enabled; a failed backend construction downgrades to
    /// rule-based operation with a warning.
    pub fn new(settings: &Settings, store: Arc<dyn DataStore>) -> Result<Self, AgentError> {
        let library = match &settings.nlu.patterns_path {
            Some(path) => PatternLibrary::load(path)?,
            None => PatternLibrary::default(),
        };

        let generative: Option<Arc<dyn GenerativeBackend>> = if settings.generative.enabled {
            match OllamaBackend::new(settings.generative.clone()) {
                Ok(backend) => {
                    tracing::info!(model = backend.model_name(), "Generative fallback enabled");
                    Some(Arc::new(backend))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Generative backend unavailable, running rule-based only");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            classifier: IntentClassifier::new(&library),
            extractor: EntityExtractor::new(&library.entities),
            sessions: SessionManager::new(),
            analytics: AnalyticsRecorder::new(store.clone()),
            store,
            pricing: PricingCalculator::new(settings.business.discount_percent),
            templates: ReplyTemplates::new(settings.business.currency_symbol.clone()),
            generative,
        })
    }

    /// Replace the generative backend, mainly for tests and embedding.
    pub fn with_generative(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.generative = Some(backend);
        self
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Process one turn and return the reply. Never fails; every internal
    /// error path degrades to a guest-facing template.
    pub async fn respond(&self, session_id: &str, utterance: &str) -> String {
        let start = Instant::now();
        let normalized = normalize(utterance);
        let context = self.sessions.context(session_id);

        let classification = self.classifier.classify(&normalized);
        let entities = self.extractor.extract(&normalized);

        let mentioned_room = entities.iter().find_map(Entity::room_type);
        let quantity = entities.iter().find_map(|e| match e.value {
            EntityValue::Quantity(n) => Some(n),
            _ => None,
        });
        let date = entities.iter().find_map(|e| match &e.value {
            EntityValue::Date(d) => Some(d.as_str()),
            _ => None,
        });

        let turn = Turn {
            utterance,
            normalized: &normalized,
            mentioned_room,
            resolved_room: mentioned_room.or(context.last_room_type),
            quantity,
            date,
            context: &context,
        };

        let (reply, success) = match self.handle(classification.intent, &turn).await {
            Ok(reply) => (reply, true),
            Err(StoreError::RoomNotFound(room_type)) => {
                tracing::warn!(%room_type, "Catalog miss");
                (self.templates.room_not_found(room_type), false)
            }
            Err(e) => {
                tracing::warn!(intent = %classification.intent, error = %e, "Turn failed, apologizing");
                (self.templates.apology(), false)
            }
        };

        self.sessions.apply(
            session_id,
            &ContextPatch {
                intent: classification.intent,
                room_type: mentioned_room,
            },
        );

        let latency_ms = start.elapsed().as_millis() as u64;
        self.analytics
            .record(QueryLogEntry::new(
                classification.intent,
                success,
                latency_ms,
                utterance.chars().count(),
            ))
            .await;

        tracing::info!(
            session_id,
            intent = %classification.intent,
            confidence = classification.confidence,
            success,
            latency_ms,
            "Turn complete"
        );
        reply
    }

    async fn handle(&self, intent: Intent, turn: &Turn<'_>) -> Result<String, StoreError> {
        match intent {
            Intent::Greeting => Ok(self.templates.greeting()),
            Intent::RoomInquiry => self.handle_room_inquiry(turn).await,
            Intent::PricingInquiry => self.handle_pricing(turn).await,
            Intent::BookingRequest => self.handle_booking(turn).await,
            Intent::DirectBookingBenefit => self.handle_direct_benefit(turn).await,
            Intent::Availability => self.handle_availability(turn).await,
            Intent::AmenityInquiry => self.handle_amenities(turn).await,
            Intent::Faq => self.handle_faq(turn).await,
            Intent::Fallback => Ok(self.handle_fallback(turn).await),
        }
    }

    async fn handle_room_inquiry(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        // A named room gets the detailed pitch; otherwise the overview.
        if let Some(room_type) = turn.mentioned_room {
            let room = self.store.get_room(room_type).await?;
            let quote = self.pricing.quote(room.list_price);
            return Ok(self.templates.room_details(&room, &quote));
        }
        let rooms = self.store.list_rooms().await?;
        let quotes: Vec<_> = rooms.iter().map(|r| self.pricing.quote(r.list_price)).collect();
        Ok(self.templates.room_list(&rooms, &quotes))
    }

    async fn handle_pricing(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        match turn.resolved_room {
            Some(room_type) => {
                let room = self.store.get_room(room_type).await?;
                let quote = self.pricing.quote(room.list_price);
                Ok(self.templates.pricing(&room, &quote))
            }
            None => Ok(self.templates.which_room()),
        }
    }

    async fn handle_booking(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        match turn.resolved_room {
            Some(room_type) => {
                let room = self.store.get_room(room_type).await?;
                let quote = self.pricing.quote(room.list_price);
                Ok(self
                    .templates
                    .booking(&room, &quote, turn.quantity, turn.date))
            }
            None => Ok(self.templates.which_room()),
        }
    }

    async fn handle_direct_benefit(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        // Anchor the comparison on the referenced room, or the deluxe as
        // the showcase rate.
        let room_type = turn.resolved_room.unwrap_or(RoomType::Deluxe);
        let room = self.store.get_room(room_type).await?;
        let quote = self.pricing.quote(room.list_price);
        Ok(self.templates.direct_benefit(&room, &quote))
    }

    async fn handle_availability(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        if let Some(room_type) = turn.resolved_room {
            let room = self.store.get_room(room_type).await?;
            return Ok(self.templates.availability(&room));
        }
        let rooms = self.store.list_rooms().await?;
        let available: Vec<_> = rooms.iter().filter(|r| r.is_available()).collect();
        Ok(self.templates.availability_overview(&available))
    }

    async fn handle_amenities(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        match turn.resolved_room {
            Some(room_type) => {
                let room = self.store.get_room(room_type).await?;
                Ok(self.templates.amenities(&room))
            }
            None => Ok(self.templates.which_room()),
        }
    }

    async fn handle_faq(&self, turn: &Turn<'_>) -> Result<String, StoreError> {
        match self.store.find_faq(turn.normalized).await? {
            Some(faq) => Ok(faq.answer),
            None => Ok(self.templates.clarification()),
        }
    }

    /// Fallback turn: try the generative channel if attached, otherwise (or
    /// on any generative failure) the clarification template.
    async fn handle_fallback(&self, turn: &Turn<'_>) -> String {
        let Some(backend) = &self.generative else {
            return self.templates.clarification();
        };
        if turn.normalized.is_empty() {
            return self.templates.clarification();
        }

        let summary = context_summary(turn.context);
        match backend.generate(turn.utterance, &summary).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, model = backend.model_name(), "Generative fallback failed");
                self.templates.clarification()
            }
        }
    }
}

/// One-line dialogue summary passed to the generative backend.
fn context_summary(context: &DialogueContext) -> String {
    if context.turn_count == 0 {
        return String::new();
    }
    let mut parts = vec![format!("turn {}", context.turn_count + 1)];
    if let Some(intent) = context.last_intent {
        parts.push(format!("last topic: {intent}"));
    }
    if let Some(room) = context.last_room_type {
        parts.push(format!("discussing the {}", room.display_name()));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_core::{FaqEntry, GenerativeError, RoomRecord};
    use concierge_store::InMemoryStore;

    fn agent() -> (ConciergeAgent, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::seeded());
        let agent = ConciergeAgent::new(&Settings::default(), store.clone()).unwrap();
        (agent, store)
    }

    #[tokio::test]
    async fn every_turn_logs_exactly_one_entry() {
        let (agent, store) = agent();
        agent.respond("s1", "hello").await;
        agent.respond("s1", "what rooms do you have?").await;
        agent.respond("s1", "complete gibberish zzz").await;
        assert_eq!(store.query_count(), 3);
    }

    #[tokio::test]
    async fn pricing_reply_quotes_the_direct_rate() {
        let (agent, _) = agent();
        let reply = agent.respond("s1", "how much is the deluxe room?").await;
        assert!(reply.contains("₹4,250"), "{reply}");
        assert!(reply.contains("₹5,000"), "{reply}");
    }

    #[tokio::test]
    async fn follow_up_resolves_the_room_from_context() {
        let (agent, _) = agent();
        agent.respond("s1", "tell me about the deluxe room").await;
        let reply = agent.respond("s1", "how much does it cost?").await;
        assert!(reply.contains("Deluxe Room"), "{reply}");
        assert!(reply.contains("₹4,250"), "{reply}");

        // Switching rooms updates the reference.
        let reply = agent.respond("s1", "and the suite?").await;
        let _ = reply;
        let reply = agent.respond("s1", "what are the amenities?").await;
        assert!(reply.contains("Suite Room"), "{reply}");
    }

    #[tokio::test]
    async fn sessions_do_not_leak_context() {
        let (agent, _) = agent();
        agent.respond("alice", "tell me about the suite").await;
        let reply = agent.respond("bob", "how much does it cost?").await;
        // Bob never mentioned a room, so he is asked to pick one.
        assert!(reply.contains("Which room"), "{reply}");
    }

    #[tokio::test]
    async fn pricing_without_a_room_asks_for_one() {
        let (agent, _) = agent();
        let reply = agent.respond("s1", "how much are your rooms?").await;
        assert!(reply.contains("Which room"), "{reply}");
    }

    #[tokio::test]
    async fn faq_answers_come_from_the_store() {
        let (agent, _) = agent();
        let reply = agent.respond("s1", "what is the wifi password?").await;
        assert!(reply.contains("WiFi"), "{reply}");
    }

    #[tokio::test]
    async fn gibberish_without_generative_gets_the_clarification() {
        let (agent, _) = agent();
        let reply = agent.respond("s1", "flurb the wug tonight-ish").await;
        assert!(reply.contains("didn't quite catch"), "{reply}");
    }

    #[tokio::test]
    async fn empty_utterance_gets_the_clarification() {
        let (agent, store) = agent();
        let reply = agent.respond("s1", "   ").await;
        assert!(reply.contains("didn't quite catch"), "{reply}");
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn catalog_miss_is_a_graceful_failure() {
        let store = Arc::new(InMemoryStore::new());
        store.upsert_room(RoomRecord {
            room_type: RoomType::Deluxe,
            list_price: 5_000,
            description: "Spacious room".to_string(),
            amenities: "King bed".to_string(),
            inventory: 2,
        });
        let agent = ConciergeAgent::new(&Settings::default(), store.clone()).unwrap();

        let reply = agent.respond("s1", "how much is the suite?").await;
        assert!(reply.contains("isn't on offer"), "{reply}");

        let recent = store.recent_queries(1).await.unwrap();
        assert!(!recent[0].success);
    }

    struct EchoBackend;

    #[async_trait]
    impl GenerativeBackend for EchoBackend {
        async fn generate(
            &self,
            utterance: &str,
            _context_summary: &str,
        ) -> Result<String, GenerativeError> {
            Ok(format!("generated: {utterance}"))
        }
        async fn is_available(&self) -> bool {
            true
        }
        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct TimeoutBackend;

    #[async_trait]
    impl GenerativeBackend for TimeoutBackend {
        async fn generate(
            &self,
            _utterance: &str,
            _context_summary: &str,
        ) -> Result<String, GenerativeError> {
            Err(GenerativeError::Timeout)
        }
        async fn is_available(&self) -> bool {
            false
        }
        fn model_name(&self) -> &str {
            "timeout"
        }
    }

    #[tokio::test]
    async fn generative_backend_serves_fallback_turns() {
        let (agent, _) = agent();
        let agent = agent.with_generative(Arc::new(EchoBackend));
        let reply = agent.respond("s1", "zorp blatt frimble").await;
        assert_eq!(reply, "generated: zorp blatt frimble");
    }

    #[tokio::test]
    async fn generative_timeout_degrades_to_clarification() {
        let (agent, store) = agent();
        let agent = agent.with_generative(Arc::new(TimeoutBackend));
        let reply = agent.respond("s1", "zorp blatt frimble").await;
        assert!(reply.contains("didn't quite catch"), "{reply}");
        // Still one analytics record for the turn.
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn store_outage_gets_an_apology_and_a_failure_record() {
        struct DownStore {
            log: InMemoryStore,
        }

        #[async_trait]
        impl DataStore for DownStore {
            async fn get_room(&self, _r: RoomType) -> Result<RoomRecord, StoreError> {
                Err(StoreError::Unavailable("connection refused".to_string()))
            }
            async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError> {
                Err(StoreError::Unavailable("connection refused".to_string()))
            }
            async fn find_faq(&self, _n: &str) -> Result<Option<FaqEntry>, StoreError> {
                Err(StoreError::Unavailable("connection refused".to_string()))
            }
            async fn log_query(&self, entry: QueryLogEntry) -> Result<(), StoreError> {
                self.log.log_query(entry).await
            }
            async fn recent_queries(&self, limit: usize) -> Result<Vec<QueryLogEntry>, StoreError> {
                self.log.recent_queries(limit).await
            }
        }

        let store = Arc::new(DownStore {
            log: InMemoryStore::new(),
        });
        let agent = ConciergeAgent::new(&Settings::default(), store.clone()).unwrap();

        let reply = agent.respond("s1", "what rooms do you have?").await;
        assert!(reply.contains("something went wrong"), "{reply}");

        let recent = store.recent_queries(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert!(!recent[0].success);
    }

    #[tokio::test]
    async fn booking_reply_carries_quantity_and_date() {
        let (agent, _) = agent();
        let reply = agent
            .respond("s1", "book two deluxe rooms for tomorrow")
            .await;
        assert!(reply.contains("Deluxe Room"), "{reply}");
        assert!(reply.contains("2 rooms"), "{reply}");
        assert!(reply.contains("tomorrow"), "{reply}");
    }
}
