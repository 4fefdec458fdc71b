use crate::entities::{Entities, EntityExtractor};
use crate::error::{AssistantError, Result};
use crate::intent::{Intent, IntentClassifier};
use crate::replies::{fill, replies, Replies};
use kalakaart_core::{detect_language, search, ArtisanRecord, DatasetStats, Language, RecordStore};
use kalakaart_retrieval::corpus::{craft_description, regional_specialties};
use kalakaart_retrieval::{context_from, Retriever, ScoredDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Earlier turns kept per request
pub const HISTORY_LIMIT: usize = 10;
/// Artisans attached to a chat reply
pub const CHAT_RESULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), conversation_history: Vec::new() }
    }
}

/// What the assistant understood about one message
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub message: String,
    pub history: Vec<Value>,
    pub language: Language,
    pub intent: Intent,
    pub entities: Entities,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub intent: Intent,
    pub entities: Entities,
    pub artists: Vec<ArtisanRecord>,
    pub suggestions: Vec<String>,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DatasetStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved: Option<Vec<ScoredDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    fn reply(ctx: &QueryContext, message: String) -> Self {
        Self {
            message,
            intent: ctx.intent,
            entities: ctx.entities.clone(),
            artists: Vec::new(),
            suggestions: suggestions(replies(ctx.language)),
            language: ctx.language,
            stats: None,
            retrieved: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A search intent naming both a craft and a state is a combined search
pub fn refine_intent(intent: Intent, entities: &Entities) -> Intent {
    if intent.is_search() && entities.craft.is_some() && entities.state.is_some() {
        Intent::FindByLocationAndCraft
    } else {
        intent
    }
}

/// Chat pipeline: language detection, intent classification, entity
/// extraction, then either a filter search over the record store or a
/// retrieval over the knowledge corpus, rendered through per-language
/// templates.
pub struct Assistant {
    store: Arc<RecordStore>,
    retriever: Option<Arc<Retriever>>,
    classifier: Box<dyn IntentClassifier>,
    extractor: EntityExtractor,
    stats: DatasetStats,
}

impl Assistant {
    pub fn new(store: Arc<RecordStore>, classifier: Box<dyn IntentClassifier>) -> Self {
        let stats = DatasetStats::from_store(&store);
        Self { store, retriever: None, classifier, extractor: EntityExtractor::new(), stats }
    }

    pub fn with_retriever(mut self, retriever: Arc<Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Detect, classify and extract without composing a reply
    pub fn understand(&self, request: &ChatRequest) -> Result<QueryContext> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let language = detect_language(message);
        let entities = self.extractor.extract(message);
        let intent = refine_intent(self.classifier.classify(message)?, &entities);

        let skip = request.conversation_history.len().saturating_sub(HISTORY_LIMIT);
        let history = request.conversation_history[skip..].to_vec();

        debug!(
            "Understood message: language={}, intent={}, entities={:?}, history={}",
            language,
            intent,
            entities,
            history.len()
        );
        Ok(QueryContext { message: message.to_string(), history, language, intent, entities })
    }

    /// Answer a message. Failures become an apology in the detected language
    /// with the error attached.
    pub fn chat(&self, request: &ChatRequest) -> ChatResponse {
        match self.understand(request).and_then(|ctx| self.respond(&ctx)) {
            Ok(response) => response,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                let language = detect_language(&request.message);
                ChatResponse {
                    message: replies(language).apology.to_string(),
                    intent: Intent::GeneralQuery,
                    entities: Entities::default(),
                    artists: Vec::new(),
                    suggestions: suggestions(replies(language)),
                    language,
                    stats: None,
                    retrieved: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn respond(&self, ctx: &QueryContext) -> Result<ChatResponse> {
        let templates = replies(ctx.language);

        match ctx.intent {
            Intent::Greeting => {
                let total = self.stats.total_artists.to_string();
                Ok(ChatResponse::reply(ctx, fill(templates.greeting, &[("total", &total)])))
            }
            Intent::GetStatistics => {
                let mut response = ChatResponse::reply(ctx, self.statistics_message(templates));
                response.stats = Some(self.stats.clone());
                Ok(response)
            }
            Intent::GetContact => {
                let mut response = ChatResponse::reply(ctx, templates.contact.to_string());
                response.artists = self.filter_search(&ctx.entities).map(|(_, a)| a).unwrap_or_default();
                Ok(response)
            }
            Intent::Help => {
                let mut response = ChatResponse::reply(ctx, templates.help.to_string());
                let retrieved = self.retrieve(ctx)?;
                if !retrieved.is_empty() {
                    response.retrieved = Some(retrieved);
                }
                Ok(response)
            }
            Intent::FindByCraft | Intent::FindByLocation | Intent::FindByLocationAndCraft | Intent::GeneralQuery => {
                self.search_or_retrieve(ctx, templates)
            }
        }
    }

    fn search_or_retrieve(&self, ctx: &QueryContext, templates: &Replies) -> Result<ChatResponse> {
        if let Some((total, artists)) = self.filter_search(&ctx.entities) {
            let message = if artists.is_empty() {
                fill(templates.no_results, &[("criteria", &criteria(&ctx.entities))])
            } else {
                self.found_message(ctx, templates, total)
            };
            let mut response = ChatResponse::reply(ctx, message);
            response.artists = artists;
            return Ok(response);
        }

        let retrieved = self.retrieve(ctx)?;
        if retrieved.is_empty() {
            return Ok(ChatResponse::reply(ctx, templates.help.to_string()));
        }

        // Slots come from the best document; nothing was extracted to fill them
        let top = &retrieved[0].document.metadata;
        let craft = top.craft.as_deref();
        let location = top.location.as_deref();
        let context = context_from(&retrieved);
        let message = fill(
            templates.context_template(ctx.intent, craft, location),
            &[
                ("context", &context),
                ("craft", craft.unwrap_or_default()),
                ("location", location.unwrap_or_default()),
            ],
        );
        let mut response = ChatResponse::reply(ctx, message);
        response.retrieved = Some(retrieved);
        Ok(response)
    }

    /// Total matches and the first page, or `None` when nothing was extracted
    fn filter_search(&self, entities: &Entities) -> Option<(usize, Vec<ArtisanRecord>)> {
        let filters = entities.to_filters(CHAT_RESULT_LIMIT)?;
        let (page, _) = search(&self.store, &filters);
        Some((page.total, page.artists))
    }

    fn retrieve(&self, ctx: &QueryContext) -> Result<Vec<ScoredDocument>> {
        match &self.retriever {
            Some(retriever) => Ok(retriever.retrieve(&ctx.message, ctx.language)?),
            None => Ok(Vec::new()),
        }
    }

    fn found_message(&self, ctx: &QueryContext, templates: &Replies, total: usize) -> String {
        let count = total.to_string();
        let craft = ctx.entities.craft.as_deref().unwrap_or("");
        let location = ctx.entities.state.as_deref().unwrap_or("");

        let template = match (ctx.entities.craft.is_some(), ctx.entities.state.is_some()) {
            (true, true) => templates.found_combined,
            (true, false) => templates.found_craft,
            (false, true) => templates.found_location,
            (false, false) => templates.found_any,
        };
        let mut message = fill(template, &[("count", &count), ("craft", craft), ("location", location)]);

        // Background notes are English-only
        if ctx.language == Language::English {
            if let Some(description) = craft_description(craft) {
                message.push_str("\n\n");
                message.push_str(description);
            } else if let Some(specialties) = regional_specialties(location) {
                message.push_str(&format!("\n\n{} is known for {}.", location, specialties.join(", ")));
            }
        }
        message
    }

    fn statistics_message(&self, templates: &Replies) -> String {
        let total = self.stats.total_artists.to_string();
        let states = self.stats.unique_states.to_string();
        let districts = self.stats.unique_districts.to_string();
        let crafts = self.stats.unique_crafts.to_string();
        fill(
            templates.statistics,
            &[("total", &total), ("states", &states), ("districts", &districts), ("crafts", &crafts)],
        )
    }
}

fn suggestions(templates: &Replies) -> Vec<String> {
    templates.suggestions.iter().map(|s| s.to_string()).collect()
}

fn criteria(entities: &Entities) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(entities.age_description);
    parts.extend(entities.gender);
    parts.extend(entities.craft.as_deref());
    let mut text = parts.join(" ");
    if let Some(state) = &entities.state {
        if !text.is_empty() {
            text.push_str(" in ");
        }
        text.push_str(state);
    }
    text
}
