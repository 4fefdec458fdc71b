use serde::{Deserialize, Serialize};

/// Number of columns in the artisan dataset, in source order:
/// id, name, gender, age, craft_type, state, district, village, languages,
/// email, phone, phone_available, government_id, cluster_code.
pub const COLUMN_COUNT: usize = 14;

/// Where an artisan works
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub state: String,
    pub district: String,
    pub village: String,
}

/// How to reach an artisan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub phone_available: bool,
}

/// One row of the artisan dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtisanRecord {
    pub id: String,
    pub name: String,
    pub gender: String,
    /// Parsed age, `0` when the source value is not a plain integer
    pub age: u32,
    pub craft_type: String,
    pub location: Location,
    pub languages: Vec<String>,
    pub contact: Contact,
    pub government_id: String,
    pub cluster_code: String,
}

impl ArtisanRecord {
    /// Build a record from already-split CSV fields.
    ///
    /// Missing trailing columns become empty values; callers are expected to
    /// reject rows shorter than the header before getting here.
    pub fn from_fields(fields: &[String]) -> Self {
        let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

        Self {
            id: field(0).to_string(),
            name: field(1).to_string(),
            gender: field(2).to_string(),
            age: parse_age(field(3)),
            craft_type: field(4).to_string(),
            location: Location {
                state: field(5).to_string(),
                district: field(6).to_string(),
                village: field(7).to_string(),
            },
            languages: parse_languages(field(8)),
            contact: Contact {
                email: field(9).to_string(),
                phone: format_phone_number(field(10)),
                phone_available: field(11).eq_ignore_ascii_case("yes"),
            },
            government_id: field(12).to_string(),
            cluster_code: field(13).to_string(),
        }
    }

    #[inline]
    pub fn state(&self) -> &str {
        &self.location.state
    }

    #[inline]
    pub fn district(&self) -> &str {
        &self.location.district
    }

    /// True when any spoken language contains `needle` (case-insensitive)
    pub fn speaks(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.languages.iter().any(|l| l.to_lowercase().contains(&needle))
    }
}

/// Ages are accepted only as plain ASCII digit strings
pub fn parse_age(raw: &str) -> u32 {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}

fn parse_languages(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|lang| lang.trim().replace('"', ""))
        .collect()
}

/// Normalize phone numbers that spreadsheet exports wrote in scientific notation.
///
/// `9.19876543210E+11` becomes `+919876543210`. Anything without `E+` is
/// returned untouched, which makes the function idempotent.
pub fn format_phone_number(phone: &str) -> String {
    if !phone.contains("E+") {
        return phone.to_string();
    }

    let Ok(value) = phone.trim().parse::<f64>() else {
        return phone.to_string();
    };
    if !value.is_finite() || value < 0.0 {
        return phone.to_string();
    }

    let digits = format!("{:.0}", value.round());
    if digits.len() == 12 && digits.starts_with("91") {
        format!("+{}", digits)
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_phone_scientific_notation() {
        assert_eq!(format_phone_number("9.19876543210E+11"), "+919876543210");
        assert_eq!(format_phone_number("9.876543210E+09"), "9876543210");
    }

    #[test]
    fn test_phone_is_idempotent() {
        let once = format_phone_number("9.18005551234E+11");
        assert_eq!(once, "+918005551234");
        assert_eq!(format_phone_number(&once), once);
    }

    #[test]
    fn test_phone_passthrough() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("98765 43210"), "98765 43210");
        assert_eq!(format_phone_number("notE+number"), "notE+number");
    }

    #[test]
    fn test_age_sentinel() {
        assert_eq!(parse_age("42"), 42);
        assert_eq!(parse_age("42.5"), 0);
        assert_eq!(parse_age("-3"), 0);
        assert_eq!(parse_age(""), 0);
    }

    #[test]
    fn test_from_fields() {
        let record = ArtisanRecord::from_fields(&row(&[
            "A1", "Meera Devi", "Female", "34", "Pottery", "Rajasthan", "Jaipur",
            "Sanganer", "Hindi, \"Rajasthani\"", "meera@example.com",
            "9.19876543210E+11", "Yes", "GOV-1", "CL-9",
        ]));

        assert_eq!(record.id, "A1");
        assert_eq!(record.age, 34);
        assert_eq!(record.state(), "Rajasthan");
        assert_eq!(record.languages, vec!["Hindi", "Rajasthani"]);
        assert_eq!(record.contact.phone, "+919876543210");
        assert!(record.contact.phone_available);
        assert_eq!(record.cluster_code, "CL-9");
        assert!(record.speaks("rajas"));
    }

    #[test]
    fn test_serialized_shape() {
        let record = ArtisanRecord::from_fields(&row(&["A2", "Ravi", "Male", "x", "Weaving"]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["age"], 0);
        assert_eq!(json["location"]["state"], "");
        assert_eq!(json["contact"]["phone_available"], false);
        assert!(json["languages"].as_array().unwrap().is_empty());
    }
}
