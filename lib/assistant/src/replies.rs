//! Reply templates for the four supported languages.
//!
//! Placeholders are written `{name}` and substituted with [`fill`]. Unknown
//! placeholders are left in place.

use crate::intent::Intent;
use kalakaart_core::Language;

/// Every reply the assistant can give in one language
#[derive(Debug)]
pub struct Replies {
    pub greeting: &'static str,
    pub help: &'static str,
    pub contact: &'static str,
    pub apology: &'static str,
    pub no_results: &'static str,
    pub found_craft: &'static str,
    pub found_location: &'static str,
    pub found_combined: &'static str,
    pub found_any: &'static str,
    pub statistics: &'static str,
    pub context_general: &'static str,
    pub context_craft: &'static str,
    pub context_location: &'static str,
    pub context_artist: &'static str,
    pub suggestions: &'static [&'static str],
}

const ENGLISH: Replies = Replies {
    greeting: "Hello! I'm the Kala-Kaart assistant. I can help you find traditional Indian artisans among {total} registered artists. How can I help you today?",
    help: "I can help you find traditional Indian artisans by craft, location or age. Try 'pottery artists in Gujarat' or 'young weavers'. I understand English, Hindi, Tamil and Telugu.",
    contact: "Contact details are listed with each artisan. Search for a craft or a state to see phone numbers and email addresses.",
    apology: "Sorry, I encountered an error processing your request. Please try again.",
    no_results: "Sorry, I couldn't find any artisans matching {criteria}. Try a nearby state or a similar craft.",
    found_craft: "Found {count} {craft} artisans. Here are the top results:",
    found_location: "Found {count} artisans in {location}. Here are some featured artisans:",
    found_combined: "Found {count} {craft} artisans in {location}:",
    found_any: "Found {count} artisans matching your request:",
    statistics: "Kala-Kaart has {total} artists from {states} states and {districts} districts, practising {crafts} crafts.",
    context_general: "Here's what I found: {context}",
    context_craft: "I found information about {craft} artisans: {context}",
    context_location: "Here are artisans from {location}: {context}",
    context_artist: "Based on your query, here are some relevant artisans: {context}",
    suggestions: &["Show me pottery artists", "Find artists in Gujarat", "Young weaving artists", "Database statistics"],
};

const HINDI: Replies = Replies {
    greeting: "नमस्ते! मैं कला-कार्त सहायक हूं। मैं {total} पंजीकृत कारीगरों में से पारंपरिक भारतीय कारीगर खोजने में आपकी मदद कर सकता हूं।",
    help: "आप मुझसे कारीगरों के बारे में हिंदी या अंग्रेजी में पूछ सकते हैं। जैसे: 'कुम्हार कारीगर दिखाओ' या 'राजस्थान में शिल्पकार'",
    contact: "हर कारीगर के साथ संपर्क जानकारी दी गई है। फोन नंबर देखने के लिए किसी शिल्प या राज्य की खोज करें।",
    apology: "क्षमा करें, मुझे आपका प्रश्न समझने में कोई समस्या हुई है। कृपया दोबारा पूछें।",
    no_results: "क्षमा करें, {criteria} के लिए कोई कारीगर नहीं मिला।",
    found_craft: "मुझे {count} {craft} कारीगर मिले हैं।",
    found_location: "मुझे {location} में {count} कारीगर मिले हैं।",
    found_combined: "मुझे {location} में {count} {craft} कारीगर मिले हैं।",
    found_any: "मुझे {count} कारीगर मिले हैं।",
    statistics: "कला-कार्त में {states} राज्यों और {districts} जिलों के {total} कारीगर हैं, जो {crafts} शिल्पों में काम करते हैं।",
    context_general: "यहां वह है जो मुझे मिला: {context}",
    context_craft: "मुझे {craft} कारीगरों के बारे में जानकारी मिली: {context}",
    context_location: "यहां {location} के कारीगर हैं: {context}",
    context_artist: "आपकी खोज के आधार पर, यहां कुछ संबंधित कारीगर हैं: {context}",
    suggestions: &["कुम्हार कारीगर दिखाओ", "राजस्थान में शिल्पकार", "चिकनकारी के बारे में बताओ", "आंकड़े दिखाओ"],
};

const TAMIL: Replies = Replies {
    greeting: "வணக்கம்! நான் கலா-கார்ட் உதவியாளர். {total} பதிவு செய்யப்பட்ட கைவினைஞர்களில் பாரம்பரிய இந்திய கைவினைஞர்களைக் கண்டறிய உதவ முடியும்.",
    help: "கைவினை, இடம் அல்லது வயதின் அடிப்படையில் பாரம்பரிய இந்திய கைவினைஞர்களைக் கண்டறிய உதவ முடியும். நான் இந்தி, ஆங்கிலம், தமிழ் மற்றும் தெலுங்கு மொழிகளை ஆதரிக்கிறேன்.",
    contact: "ஒவ்வொரு கைவினைஞருடனும் தொடர்பு விவரங்கள் உள்ளன. தொலைபேசி எண்களைக் காண ஒரு கைவினை அல்லது மாநிலத்தைத் தேடுங்கள்.",
    apology: "மன்னிக்கவும், உங்கள் கோரிக்கையைச் செயலாக்குவதில் பிழை ஏற்பட்டது. மீண்டும் முயற்சிக்கவும்.",
    no_results: "மன்னிக்கவும், {criteria} க்கு கைவினைஞர்கள் எதுவும் கிடைக்கவில்லை.",
    found_craft: "{count} {craft} கைவினைஞர்கள் கிடைத்தனர்.",
    found_location: "{location} இல் {count} கைவினைஞர்கள் கிடைத்தனர்.",
    found_combined: "{location} இல் {count} {craft} கைவினைஞர்கள் கிடைத்தனர்.",
    found_any: "{count} கைவினைஞர்கள் கிடைத்தனர்.",
    statistics: "கலா-கார்டில் {states} மாநிலங்கள் மற்றும் {districts} மாவட்டங்களைச் சேர்ந்த {total} கைவினைஞர்கள் {crafts} கைவினைகளில் உள்ளனர்.",
    context_general: "நான் கண்டுபிடித்தது இதுதான்: {context}",
    context_craft: "{craft} கைவினைஞர்களைப் பற்றிய தகவல் கிடைத்தது: {context}",
    context_location: "இங்கே {location} இலிருந்து கைவினைஞர்கள்: {context}",
    context_artist: "உங்கள் தேடலின் அடிப்படையில், இங்கே சில தொடர்புடைய கைவினைஞர்கள்: {context}",
    suggestions: &["மட்பாண்ட கைவினைஞர்களைக் காட்டு", "தமிழ்நாட்டில் கைவினைஞர்கள்", "எத்தனை கைவினைஞர்கள்", "உதவி"],
};

const TELUGU: Replies = Replies {
    greeting: "నమస్కారం! నేను కలా-కార్ట్ సహాయకుడను. {total} నమోదిత కళాకారులలో సాంప్రదాయ భారతీయ కళాకారులను కనుగొనడంలో సహాయపడగలను.",
    help: "చేతిపని, ప్రాంతం లేదా వయస్సు ఆధారంగా సాంప్రదాయ భారతీయ కళాకారులను కనుగొనడంలో సహాయపడగలను. నేను హిందీ, ఇంగ్లీష్, తమిళం మరియు తెలుగు భాషలకు మద్దతు ఇస్తాను.",
    contact: "ప్రతి కళాకారుడితో సంప్రదింపు వివరాలు ఉన్నాయి. ఫోన్ నంబర్ల కోసం ఒక చేతిపని లేదా రాష్ట్రాన్ని శోధించండి.",
    apology: "క్షమించండి, మీ అభ్యర్థనను ప్రాసెస్ చేయడంలో లోపం జరిగింది. దయచేసి మళ్ళీ ప్రయత్నించండి.",
    no_results: "క్షమించండి, {criteria} కోసం కళాకారులు ఎవరూ దొరకలేదు.",
    found_craft: "{count} {craft} కళాకారులు దొరికారు.",
    found_location: "{location} లో {count} కళాకారులు దొరికారు.",
    found_combined: "{location} లో {count} {craft} కళాకారులు దొరికారు.",
    found_any: "{count} కళాకారులు దొరికారు.",
    statistics: "కలా-కార్ట్‌లో {states} రాష్ట్రాలు మరియు {districts} జిల్లాల నుండి {total} కళాకారులు {crafts} చేతిపనులలో ఉన్నారు.",
    context_general: "నేను కనుగొన్నది ఇదే: {context}",
    context_craft: "{craft} కళాకారుల గురించి సమాచారం దొరికింది: {context}",
    context_location: "ఇక్కడ {location} నుండి కళాకారులు ఉన్నారు: {context}",
    context_artist: "మీ శోధన ఆధారంగా, ఇక్కడ కొంత సంబంధిత కళాకారులు ఉన్నారు: {context}",
    suggestions: &["కుమ్మరి కళాకారులను చూపించు", "తెలంగాణలో కళాకారులు", "ఎన్ని కళాకారులు", "సహాయం"],
};

pub fn replies(language: Language) -> &'static Replies {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Tamil => &TAMIL,
        Language::Telugu => &TELUGU,
    }
}

impl Replies {
    /// Template used to present retrieved context for an intent.
    ///
    /// Craft and location templates are only chosen when their slot has a
    /// value; otherwise the general template is used.
    pub fn context_template(&self, intent: Intent, craft: Option<&str>, location: Option<&str>) -> &'static str {
        let present = |slot: Option<&str>| slot.is_some_and(|v| !v.trim().is_empty());
        match intent {
            Intent::FindByCraft if present(craft) => self.context_craft,
            Intent::FindByLocation if present(location) => self.context_location,
            Intent::FindByLocationAndCraft => self.context_artist,
            _ => self.context_general,
        }
    }
}

/// Substitute `{key}` placeholders
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill() {
        let text = fill(ENGLISH.found_combined, &[("count", "2"), ("craft", "Pottery"), ("location", "Gujarat")]);
        assert_eq!(text, "Found 2 Pottery artisans in Gujarat:");
        assert_eq!(fill("{context} {other}", &[("context", "x")]), "x {other}");
    }

    #[test]
    fn test_every_language_has_suggestions() {
        for language in Language::ALL {
            let r = replies(language);
            assert!(!r.suggestions.is_empty());
            assert!(r.greeting.contains("{total}"));
            assert!(r.context_general.contains("{context}"));
        }
    }

    #[test]
    fn test_context_template_by_intent() {
        let r = replies(Language::English);
        assert_eq!(r.context_template(Intent::FindByCraft, Some("Pottery"), None), r.context_craft);
        assert_eq!(r.context_template(Intent::FindByLocation, None, Some("Bihar")), r.context_location);
        assert_eq!(r.context_template(Intent::FindByLocationAndCraft, None, None), r.context_artist);
        assert_eq!(r.context_template(Intent::Help, Some("Pottery"), None), r.context_general);
    }

    #[test]
    fn test_missing_slot_falls_back_to_general() {
        let r = replies(Language::Tamil);
        assert_eq!(r.context_template(Intent::FindByCraft, None, Some("Bihar")), r.context_general);
        assert_eq!(r.context_template(Intent::FindByLocation, Some("Pottery"), Some(" ")), r.context_general);
    }
}
