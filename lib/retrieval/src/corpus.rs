//! Documents that make up the retrieval corpus.
//!
//! Three sources feed the index: a built-in craft knowledge base, one summary
//! document per craft found in the artisan dataset, and an optional training
//! file with recorded conversations and per-language knowledge entries.

use crate::{Error, Result, RetrievalDocument};
use kalakaart_core::{Language, RecordStore};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

const CRAFT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("pottery", "Traditional pottery involves shaping clay into beautiful vessels, bowls, and decorative items using techniques passed down through generations. Blue pottery from Rajasthan and black pottery from Manipur are famous varieties."),
    ("weaving", "Handloom weaving creates intricate textiles using traditional looms. Banarasi silk weaves, Assamese silk, and cotton handlooms produce everything from sarees to carpets."),
    ("painting", "Traditional Indian painting includes Madhubani from Bihar, Warli from Maharashtra, Pattachitra from Odisha, and Tanjore painting from Tamil Nadu, each with unique cultural significance."),
    ("carving", "Wood and stone carving creates intricate sculptures, decorative items, and architectural elements. Sandalwood carving from Karnataka is particularly renowned."),
    ("embroidery", "Traditional embroidery like Chikankari from Uttar Pradesh, Phulkari from Punjab, and Kutch embroidery from Gujarat adds beautiful patterns to fabrics."),
    ("metalwork", "Includes Bidriware from Karnataka, Dokra bell metal work, and silver filigree work, creating decorative and functional items."),
    ("carpet weaving", "Hand-knotted carpets and durries are woven using traditional techniques, particularly famous in Kashmir, Rajasthan, and Uttar Pradesh."),
    ("jewelry", "Traditional jewelry making includes Kundan work, silver jewelry, and tribal ornaments crafted with intricate designs."),
    ("leather craft", "Traditional leather work creates bags, shoes, and decorative items using age-old tanning and crafting techniques."),
    ("bamboo", "Bamboo and cane craft creates baskets, furniture, and decorative items, particularly prevalent in northeastern states."),
];

const REGIONAL_SPECIALTIES: &[(&str, &[&str])] = &[
    ("gujarat", &["bandhani tie-dye", "block printing", "pottery", "embroidery", "metalwork"]),
    ("rajasthan", &["blue pottery", "stone carving", "carpet weaving", "painting", "jewelry"]),
    ("west bengal", &["handloom weaving", "dokra bell metal", "terracotta", "silk weaving"]),
    ("uttar pradesh", &["chikankari embroidery", "carpet weaving", "brass work", "zardozi"]),
    ("tamil nadu", &["tanjore painting", "bronze work", "silk weaving", "stone carving"]),
    ("karnataka", &["sandalwood carving", "bidriware", "silk weaving", "channapatna toys"]),
    ("odisha", &["pattachitra painting", "silver filigree", "handloom weaving", "stone carving"]),
    ("bihar", &["madhubani painting", "sikki grass work", "handloom weaving"]),
    ("punjab", &["phulkari embroidery", "punjabi juttis", "handicrafts"]),
    ("kerala", &["coir craft", "metal work", "handloom weaving", "wood carving"]),
    ("maharashtra", &["warli painting", "handloom weaving", "metalwork"]),
    ("assam", &["silk weaving", "bamboo craft", "handloom weaving"]),
    ("himachal pradesh", &["wood carving", "metalwork", "handloom weaving"]),
    ("haryana", &["handloom weaving", "pottery", "metalwork"]),
    ("madhya pradesh", &["handloom weaving", "metalwork", "stone carving"]),
];

/// Background text for a craft, keyed case-insensitively
pub fn craft_description(craft: &str) -> Option<&'static str> {
    let craft = craft.trim().to_lowercase();
    CRAFT_DESCRIPTIONS.iter().find(|(name, _)| *name == craft).map(|(_, d)| *d)
}

/// Crafts a state is renowned for, keyed case-insensitively
pub fn regional_specialties(state: &str) -> Option<&'static [&'static str]> {
    let state = state.trim().to_lowercase();
    REGIONAL_SPECIALTIES.iter().find(|(name, _)| *name == state).map(|(_, s)| *s)
}

const HINDI_CRAFTS: &[(&str, &str, &str)] = &[
    ("pottery", "मिट्टी के बर्तन", "पारंपरिक मिट्टी के बर्तन बनाने की कला, चाक और हाथ से बनाने की तकनीकों के साथ"),
    ("weaving", "बुनाई", "हाथ की तकिया और प्राकृतिक रेशों का उपयोग करके पारंपरिक कपड़ा बुनाई"),
    ("painting", "चित्रकारी", "मधुबनी, वारली और पट्टचित्र जैसी पारंपरिक भारतीय चित्रकला शैलियां"),
    ("embroidery", "कढ़ाई", "चिकनकारी और फुलकारी जैसी पारंपरिक कढ़ाई रंगीन धागों से कपड़ों पर नमूने बनाती है"),
];

/// Craft descriptions and regional specialties shipped with the service
pub fn builtin_documents() -> Vec<RetrievalDocument> {
    let mut docs = Vec::new();

    for (craft, description) in CRAFT_DESCRIPTIONS {
        docs.push(
            RetrievalDocument::knowledge(Language::English, format!("{}: {}", title_case(craft), description))
                .with_craft(title_case(craft)),
        );
    }

    for (state, specialties) in REGIONAL_SPECIALTIES {
        let text = format!("{} is known for {}.", title_case(state), specialties.join(", "));
        docs.push(RetrievalDocument::knowledge(Language::English, text).with_location(title_case(state)));
    }

    for (craft, local, description) in HINDI_CRAFTS {
        let text = format!("शिल्प: {}\nविवरण: {}", local, description);
        docs.push(RetrievalDocument::knowledge(Language::Hindi, text).with_craft(title_case(craft)));
    }

    docs
}

/// One English document per distinct craft, listing where it is practised
pub fn documents_from_store(store: &RecordStore) -> Vec<RetrievalDocument> {
    let mut by_craft: BTreeMap<&str, (usize, BTreeSet<&str>)> = BTreeMap::new();
    for record in store.get_all() {
        if record.craft_type.is_empty() {
            continue;
        }
        let entry = by_craft.entry(record.craft_type.as_str()).or_default();
        entry.0 += 1;
        if !record.state().is_empty() {
            entry.1.insert(record.state());
        }
    }

    by_craft
        .into_iter()
        .map(|(craft, (count, states))| {
            let states: Vec<&str> = states.into_iter().collect();
            let text = format!(
                "{} is practised by {} registered artisans in {}.",
                craft,
                count,
                states.join(", ")
            );
            RetrievalDocument::knowledge(Language::English, text).with_craft(craft)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TrainingFile {
    #[serde(default)]
    conversations: Vec<ConversationEntry>,
    #[serde(default)]
    knowledge_base: BTreeMap<String, Vec<KnowledgeEntry>>,
}

#[derive(Debug, Deserialize)]
struct ConversationEntry {
    language: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    user_message: Option<String>,
    #[serde(default)]
    bot_response: Option<String>,
    #[serde(default)]
    intent: Option<String>,
}

impl ConversationEntry {
    fn text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        match (&self.user_message, &self.bot_response) {
            (Some(q), Some(a)) => Some(format!("{}\n{}", q, a)),
            (Some(q), None) => Some(q.clone()),
            (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct KnowledgeEntry {
    #[serde(default)]
    craft_english: Option<String>,
    craft_local: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    regions: Vec<String>,
    #[serde(default)]
    materials: Vec<String>,
}

impl KnowledgeEntry {
    fn text(&self) -> String {
        format!(
            "Craft: {}\nDescription: {}\nRegions: {}\nMaterials: {}",
            self.craft_local,
            self.description,
            self.regions.join(", "),
            self.materials.join(", ")
        )
    }
}

/// Parse a training file: `{conversations: [...], knowledge_base: {lang: [...]}}`.
///
/// Entries in unsupported languages or without any text are skipped.
pub fn parse_knowledge(json: &str) -> Result<Vec<RetrievalDocument>> {
    let file: TrainingFile = serde_json::from_str(json)?;
    let mut docs = Vec::new();
    let mut skipped = 0usize;

    for entry in &file.conversations {
        match (entry.language.parse::<Language>(), entry.text()) {
            (Ok(language), Some(text)) => {
                docs.push(RetrievalDocument::conversation(language, text, entry.intent.clone()))
            }
            _ => skipped += 1,
        }
    }

    for (lang, entries) in &file.knowledge_base {
        let Ok(language) = lang.parse::<Language>() else {
            skipped += entries.len();
            continue;
        };
        for entry in entries {
            let craft = entry.craft_english.clone().unwrap_or_else(|| entry.craft_local.clone());
            docs.push(RetrievalDocument::knowledge(language, entry.text()).with_craft(craft));
        }
    }

    if skipped > 0 {
        warn!("Skipped {} knowledge entries without a supported language or text", skipped);
    }
    Ok(docs)
}

pub fn load_knowledge_file<P: AsRef<Path>>(path: P) -> Result<Vec<RetrievalDocument>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let docs = parse_knowledge(&content)
        .map_err(|e| Error::Knowledge(format!("{}: {}", path.display(), e)))?;
    info!("Loaded {} documents from {:?}", docs.len(), path);
    Ok(docs)
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
