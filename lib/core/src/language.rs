use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages with their own response templates and retrieval partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
}

/// Romanized Hindi words that mark a Latin-script message as Hindi
const HINDI_CUES: &[&str] = &["namaste", "namaskar", "kaise", "kya", "kahan"];

impl Language {
    pub const ALL: [Language; 4] = [Language::English, Language::Hindi, Language::Tamil, Language::Telugu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Tamil => "tamil",
            Language::Telugu => "telugu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "tamil" | "ta" => Ok(Language::Tamil),
            "telugu" | "te" => Ok(Language::Telugu),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Character-range language detection.
///
/// Script blocks are checked in order (Devanagari, Tamil, Telugu); a Latin
/// message is Hindi only when it contains a romanized Hindi cue word.
pub fn detect_language(text: &str) -> Language {
    let in_block = |lo: u32, hi: u32| text.chars().any(|c| (lo..=hi).contains(&(c as u32)));

    if in_block(0x0900, 0x097F) {
        return Language::Hindi;
    }
    if in_block(0x0B80, 0x0BFF) {
        return Language::Tamil;
    }
    if in_block(0x0C00, 0x0C7F) {
        return Language::Telugu;
    }

    let lower = text.to_lowercase();
    let romanized_hindi = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| HINDI_CUES.contains(&word));
    if romanized_hindi {
        Language::Hindi
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts() {
        assert_eq!(detect_language("मुझे कुम्हार चाहिए"), Language::Hindi);
        assert_eq!(detect_language("வணக்கம்"), Language::Tamil);
        assert_eq!(detect_language("నమస్కారం"), Language::Telugu);
        assert_eq!(detect_language("show me weavers"), Language::English);
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn test_romanized_hindi() {
        assert_eq!(detect_language("Namaste, kya haal hai"), Language::Hindi);
        // Cue words only count as whole words
        assert_eq!(detect_language("Kyathi from Mysore"), Language::English);
    }

    #[test]
    fn test_round_trip_names() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
        assert!("french".parse::<Language>().is_err());
        assert_eq!(serde_json::to_value(Language::Tamil).unwrap(), "tamil");
    }
}
