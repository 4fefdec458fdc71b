use kalakaart_core::SearchFilters;
use serde::Serialize;

pub const YOUNG_AGE_MAX: u32 = 35;
pub const SENIOR_AGE_MIN: u32 = 50;

/// Structured hints pulled from a chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub craft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'static str>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.craft.is_none()
            && self.state.is_none()
            && self.age_min.is_none()
            && self.age_max.is_none()
            && self.gender.is_none()
    }

    /// Filters for the search service; `None` when nothing constrains the search
    pub fn to_filters(&self, limit: usize) -> Option<SearchFilters> {
        if self.is_empty() {
            return None;
        }
        Some(SearchFilters {
            state: self.state.clone(),
            craft_type: self.craft.clone(),
            age_min: self.age_min,
            age_max: self.age_max,
            gender: self.gender.map(String::from),
            limit: Some(limit),
            ..Default::default()
        })
    }
}

/// Lower-case state needles with their display name, checked in order
const STATES: &[(&str, &str)] = &[
    ("andhra pradesh", "Andhra Pradesh"),
    ("assam", "Assam"),
    ("bihar", "Bihar"),
    ("chhattisgarh", "Chhattisgarh"),
    ("goa", "Goa"),
    ("gujarat", "Gujarat"),
    ("haryana", "Haryana"),
    ("himachal pradesh", "Himachal Pradesh"),
    ("jammu kashmir", "Jammu & Kashmir"),
    ("jammu & kashmir", "Jammu & Kashmir"),
    ("jharkhand", "Jharkhand"),
    ("karnataka", "Karnataka"),
    ("kerala", "Kerala"),
    ("kerela", "Kerala"),
    ("ladakh", "Ladakh"),
    ("madhya pradesh", "Madhya Pradesh"),
    ("maharashtra", "Maharashtra"),
    ("manipur", "Manipur"),
    ("meghalaya", "Meghalaya"),
    ("mizoram", "Mizoram"),
    ("odisha", "Odisha"),
    ("punjab", "Punjab"),
    ("rajasthan", "Rajasthan"),
    ("sikkim", "Sikkim"),
    ("tamil nadu", "Tamil Nadu"),
    ("tamil naidu", "Tamil Nadu"),
    ("telangana", "Telangana"),
    ("tripura", "Tripura"),
    ("uttar pradesh", "Uttar Pradesh"),
    ("uttarakhand", "Uttarakhand"),
    ("west bengal", "West Bengal"),
    // Devanagari names
    ("राजस्थान", "Rajasthan"),
    ("उत्तर प्रदेश", "Uttar Pradesh"),
    ("बिहार", "Bihar"),
    ("गुजरात", "Gujarat"),
    ("महाराष्ट्र", "Maharashtra"),
    ("तमिलनाडु", "Tamil Nadu"),
    ("केरल", "Kerala"),
    ("कर्नाटक", "Karnataka"),
    ("पंजाब", "Punjab"),
    ("हरियाणा", "Haryana"),
];

/// Short forms that only count as whole tokens
const STATE_TOKENS: &[(&str, &str)] = &[
    ("up", "Uttar Pradesh"),
    ("u.p.", "Uttar Pradesh"),
    ("hp", "Himachal Pradesh"),
    ("h.p.", "Himachal Pradesh"),
    ("mp", "Madhya Pradesh"),
    ("m.p.", "Madhya Pradesh"),
];

const CRAFTS: &[&str] = &[
    "pottery", "weaving", "painting", "carving", "textile", "metal", "wood",
    "stone", "jewelry", "embroidery", "carpet", "handicraft", "bamboo",
    "cane", "banarasi", "bandhani", "bidriware", "block printing", "blue pottery",
    "black pottery", "channapatna toys", "chikankari", "coir craft", "dokra", "bell metal",
    "durrie weaving", "handloom weaving", "handloom", "jute craft", "kalamkari",
    "kundan jewellery", "kundan", "kutch embroidery", "lac work", "leather craft",
    "madhubani painting", "madhubani", "metalwork", "paper mache", "pattachitra", "phulkari",
    "rogan art", "sandalwood carving", "shell craft", "sikki grass",
    "silver filigree", "stone carving", "tanjore painting", "terracotta",
    "thanjavur dolls", "warli painting", "wood carving", "zari", "zardozi",
];

/// Words that imply a craft without naming it
const CRAFT_VARIATIONS: &[(&str, &str)] = &[
    ("potter", "Pottery"),
    ("clay", "Pottery"),
    ("ceramic", "Pottery"),
    ("weaver", "Weaving"),
    ("loom", "Weaving"),
    ("painter", "Painting"),
    ("कुम्हार", "Pottery"),
    ("मिट्टी के बर्तन", "Pottery"),
    ("बुनकर", "Weaving"),
    ("बुनाई", "Weaving"),
    ("हथकरघा", "Handloom"),
    ("चित्रकार", "Painting"),
    ("पेंटिंग", "Painting"),
    ("कढ़ाई", "Embroidery"),
    ("चिकनकारी", "Chikankari"),
    ("नक्काशी", "Carving"),
    ("कालीन", "Carpet"),
    ("आभूषण", "Jewelry"),
    ("गहने", "Jewelry"),
    ("குயவன்", "Pottery"),
    ("நெசவு", "Weaving"),
    ("ஓவியம்", "Painting"),
    ("కుమ్మరి", "Pottery"),
    ("నేత", "Weaving"),
];

const YOUNG_WORDS: &[&str] = &["young", "youth", "junior"];
const SENIOR_WORDS: &[&str] = &["old", "senior", "elderly", "experienced", "veteran", "master"];
const FEMALE_WORDS: &[&str] = &["female", "women", "woman"];
const MALE_WORDS: &[&str] = &["male", "men", "man"];

/// Extracts craft, state, age band and gender, independent of the intent
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, message: &str) -> Entities {
        let lower = message.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '?' | '!' | ';' | ':' | '।'))
            .filter(|t| !t.is_empty())
            .collect();
        let has_word = |words: &[&str]| tokens.iter().any(|t| words.contains(t));

        let mut entities = Entities {
            craft: Self::craft(&lower),
            state: Self::state(&lower, &tokens),
            ..Default::default()
        };

        if has_word(YOUNG_WORDS) {
            entities.age_max = Some(YOUNG_AGE_MAX);
            entities.age_description = Some("young");
        } else if has_word(SENIOR_WORDS) {
            entities.age_min = Some(SENIOR_AGE_MIN);
            entities.age_description = Some("senior");
        }

        if has_word(FEMALE_WORDS) {
            entities.gender = Some("Female");
        } else if has_word(MALE_WORDS) {
            entities.gender = Some("Male");
        }

        entities
    }

    fn state(lower: &str, tokens: &[&str]) -> Option<String> {
        if let Some((_, name)) = STATES.iter().find(|(needle, _)| contains_phrase(lower, needle)) {
            return Some(name.to_string());
        }
        STATE_TOKENS
            .iter()
            .find(|(token, _)| tokens.contains(token))
            .map(|(_, name)| name.to_string())
    }

    /// The longest craft name in the message, else a craft implied by a variation
    fn craft(lower: &str) -> Option<String> {
        let named = CRAFTS
            .iter()
            .filter(|craft| contains_phrase(lower, craft) || contains_phrase(lower, &format!("{}s", craft)))
            .max_by_key(|craft| craft.len());
        if let Some(craft) = named {
            return Some(title_case(craft));
        }
        CRAFT_VARIATIONS
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, craft)| craft.to_string())
    }
}

/// Substring match that does not start or end inside a word
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
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
