use crate::error::{AssistantError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse purpose of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    FindByCraft,
    FindByLocation,
    FindByLocationAndCraft,
    GetStatistics,
    GetContact,
    Help,
    GeneralQuery,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::FindByCraft => "find_by_craft",
            Intent::FindByLocation => "find_by_location",
            Intent::FindByLocationAndCraft => "find_by_location_and_craft",
            Intent::GetStatistics => "get_statistics",
            Intent::GetContact => "get_contact",
            Intent::Help => "help",
            Intent::GeneralQuery => "general_query",
        }
    }

    /// Intents answered by looking up artisans
    pub fn is_search(&self) -> bool {
        matches!(
            self,
            Intent::FindByCraft | Intent::FindByLocation | Intent::FindByLocationAndCraft | Intent::GeneralQuery
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which classifier answers [`IntentClassifier::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    #[default]
    Pattern,
    Prototype,
}

impl FromStr for ClassifierKind {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "regex" => Ok(ClassifierKind::Pattern),
            "prototype" | "embedding" => Ok(ClassifierKind::Prototype),
            other => Err(AssistantError::UnknownClassifier(other.to_string())),
        }
    }
}

pub trait IntentClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, message: &str) -> Result<Intent>;
}

const CRAFT_WORDS: &str = "pottery|weaving|painting|carving|textile|metal|wood|stone|jewelry|embroidery|carpet|handicraft|bamboo|cane|banarasi|bandhani|bidriware|chikankari|kalamkari|madhubani|pattachitra|phulkari|tanjore|terracotta|warli|zardozi|zari|dokra|handloom|kutch|lac|leather|metalwork|rogan|sandalwood|shell|sikki|silver|filigree|blue pottery|black pottery|block printing|channapatna|coir|durrie|jute|kundan|paper mache|thanjavur";

const PLACE_WORDS: &str = "andhra pradesh|assam|bihar|chhattisgarh|goa|gujarat|haryana|himachal pradesh|jammu|kashmir|jharkhand|karnataka|kerala|ladakh|madhya pradesh|maharashtra|manipur|meghalaya|mizoram|odisha|punjab|rajasthan|sikkim|tamil nadu|telangana|tripura|uttar pradesh|uttarakhand|west bengal|delhi|mumbai|chennai|bangalore|hyderabad|pune|ahmedabad|surat|jaipur|lucknow|kanpur|nagpur|visakhapatnam|bhopal|patna|vadodara|ludhiana|agra|nashik|faridabad|meerut|rajkot";

const PERSON_WORDS: &str = "artists?|artisans?|craftsman|craftsmen|craftspeople|makers?";

const SEARCH_VERBS: &str = "find|show|get|search|display|list";

/// Ordered pattern lists, one per intent. Earlier intents win ties.
fn pattern_table() -> Vec<(Intent, Vec<String>)> {
    vec![
        (
            Intent::FindByCraft,
            vec![
                format!(r"\b({SEARCH_VERBS})\b.*\b({PERSON_WORDS})\b.*\b({CRAFT_WORDS})\b"),
                format!(r"\b({CRAFT_WORDS})\b.*\b({PERSON_WORDS})\b"),
                r"(कुम्हार|बुनकर|चित्रकार|मूर्तिकार|कारीगर|शिल्पकार)".to_string(),
                r"(குயவன்|நெசவாளர்|ஓவியர்|சிற்பி|கைவினைஞர்)".to_string(),
                r"(కుమ్మరి|నేత కార్మికుడు|చిత్రకారుడు|శిల్పి)".to_string(),
            ],
        ),
        (
            Intent::FindByLocation,
            vec![
                format!(r"\b({SEARCH_VERBS})\b.*\b({PERSON_WORDS})\b.*\b(in|from|at|of)\b.*\b({PLACE_WORDS})\b"),
                format!(r"\b({PERSON_WORDS})\b.*\b(in|from|at|of)\b.*\b({PLACE_WORDS})\b"),
                format!(r"\b({PLACE_WORDS})\b.*\b({PERSON_WORDS})\b"),
                r"(में|से)\s.*(कारीगर|कलाकार|शिल्पकार)".to_string(),
            ],
        ),
        (
            Intent::GetStatistics,
            vec![
                r"\b(how many|count|total|statistics|stats|data|database|overview|information)\b".to_string(),
                r"(कितने|संख्या|आंकड़े|जानकारी)".to_string(),
                r"(எத்தனை|எண்ணிக்கை|தகவல்)".to_string(),
                r"(ఎన్ని|సంఖ్య|గణాంకాలు)".to_string(),
            ],
        ),
        (
            Intent::GetContact,
            vec![
                r"\b(contact|phone|call|reach|email|address|number|telephone|mobile)\b.*\b(information|details|info)\b".to_string(),
                r"\b(how to contact|how to reach|contact details|phone number)\b".to_string(),
                r"(संपर्क|फोन|नंबर|पता)".to_string(),
                r"(தொடர்பு|எண்|முகவரி)".to_string(),
                r"(సంప్రదించు|ఫోన్|చిరునామా)".to_string(),
            ],
        ),
        (
            Intent::Greeting,
            vec![
                r"\b(hello|hi|hey|greetings|good morning|good afternoon|good evening|namaste|namaskar)\b".to_string(),
                r"(नमस्ते|हैलो|प्रणाम|नमस्कार)".to_string(),
                r"(வணக்கம்|ஹலோ|நமஸ்காரம்)".to_string(),
                r"(నమస్కారం|హలో)".to_string(),
            ],
        ),
        (
            Intent::Help,
            vec![
                r"\b(help|assist|guide|support|how to|what can you|capabilities)\b".to_string(),
                r"(मदद|सहायता|गाइड)".to_string(),
                r"(உதவி|வழிகாட்டுதல்)".to_string(),
                r"(సహాయం|మార్గదర్శనం)".to_string(),
            ],
        ),
    ]
}

/// Keyword classifier: every intent scores one point per matching pattern.
///
/// The highest non-zero score wins; with no match at all the message is a
/// `general_query`.
pub struct PatternClassifier {
    patterns: Vec<(Intent, Vec<Regex>)>,
}

impl PatternClassifier {
    /// Compiles the built-in pattern table.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::Regex` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let patterns = pattern_table()
            .into_iter()
            .map(|(intent, sources)| {
                let compiled = sources.iter().map(|s| Regex::new(s)).collect::<std::result::Result<Vec<_>, _>>()?;
                Ok((intent, compiled))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Per-intent match counts, in table order
    pub fn scores(&self, message: &str) -> Vec<(Intent, usize)> {
        let lower = message.to_lowercase();
        self.patterns
            .iter()
            .map(|(intent, regexes)| (*intent, regexes.iter().filter(|re| re.is_match(&lower)).count()))
            .collect()
    }
}

impl IntentClassifier for PatternClassifier {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn classify(&self, message: &str) -> Result<Intent> {
        let mut best: Option<(Intent, usize)> = None;
        for (intent, score) in self.scores(message) {
            // Strictly greater: ties keep the earlier intent
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((intent, score));
            }
        }
        Ok(best.map(|(intent, _)| intent).unwrap_or(Intent::GeneralQuery))
    }
}
