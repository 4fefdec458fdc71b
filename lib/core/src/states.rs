//! Indian state names and their common abbreviations.
//!
//! Search queries use short forms ("up", "j&k", "tn") while the dataset uses
//! full names, so state matching goes through this table.

/// Canonical (lower-case) state name with its accepted variations
pub const STATE_ALIASES: &[(&str, &[&str])] = &[
    ("andhra pradesh", &["andhra pradesh", "ap", "andhra"]),
    ("arunachal pradesh", &["arunachal pradesh", "arunachal"]),
    ("assam", &["assam"]),
    ("bihar", &["bihar"]),
    ("chhattisgarh", &["chhattisgarh", "chattisgarh", "cg"]),
    ("goa", &["goa"]),
    ("gujarat", &["gujarat", "gj"]),
    ("haryana", &["haryana", "hr"]),
    ("himachal pradesh", &["himachal pradesh", "himachal", "hp", "h.p."]),
    ("jammu & kashmir", &["jammu & kashmir", "jammu and kashmir", "jammu kashmir", "j&k", "jk", "kashmir", "jammu"]),
    ("jharkhand", &["jharkhand", "jh"]),
    ("karnataka", &["karnataka", "kn", "mysore"]),
    ("kerala", &["kerala", "kl", "kerela"]),
    ("madhya pradesh", &["madhya pradesh", "mp", "m.p.", "central pradesh"]),
    ("maharashtra", &["maharashtra", "mh"]),
    ("manipur", &["manipur", "mn"]),
    ("meghalaya", &["meghalaya", "ml"]),
    ("mizoram", &["mizoram", "mz"]),
    ("nagaland", &["nagaland", "nl"]),
    ("odisha", &["odisha", "orissa", "or"]),
    ("punjab", &["punjab", "pb"]),
    ("rajasthan", &["rajasthan", "rj"]),
    ("sikkim", &["sikkim", "sk"]),
    ("tamil nadu", &["tamil nadu", "tamilnadu", "tamil naidu", "tn"]),
    ("telangana", &["telangana", "ts"]),
    ("tripura", &["tripura", "tr"]),
    ("uttar pradesh", &["uttar pradesh", "up", "u.p."]),
    ("uttarakhand", &["uttarakhand", "uttaranchal", "uk", "ua"]),
    ("west bengal", &["west bengal", "bengal", "wb"]),
    ("ladakh", &["ladakh"]),
    ("delhi", &["delhi", "new delhi", "dl"]),
    ("chandigarh", &["chandigarh", "ch"]),
    ("puducherry", &["puducherry", "pondicherry", "py"]),
    ("andaman and nicobar islands", &["andaman", "nicobar", "andaman and nicobar", "an"]),
    ("dadra and nagar haveli", &["dadra", "nagar haveli", "dadra and nagar haveli", "dn"]),
    ("daman and diu", &["daman", "diu", "daman and diu", "dd"]),
    ("lakshadweep", &["lakshadweep", "ld"]),
];

#[inline]
fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Does the user's state query refer to the artisan's state?
///
/// Checks, in order: bidirectional substring match, the alias table, and a
/// final comparison with `&` spelled out as `and`.
pub fn match_state(query: &str, artisan_state: &str) -> bool {
    let query = query.trim().to_lowercase();
    let state = artisan_state.trim().to_lowercase();
    if query.is_empty() || state.is_empty() {
        return false;
    }

    if overlaps(&query, &state) {
        return true;
    }

    for (canonical, variations) in STATE_ALIASES {
        let query_matches = variations.iter().any(|v| overlaps(&query, v));
        if !query_matches {
            continue;
        }
        let state_matches = variations.iter().any(|v| overlaps(&state, v)) || overlaps(&state, canonical);
        if state_matches {
            return true;
        }
    }

    let normalize = |s: &str| s.replace('&', "and").replace("  ", " ");
    overlaps(&normalize(&query), &normalize(&state))
}

/// True when `query` is a substring of any alias in the table
pub fn is_known_alias_fragment(query: &str) -> bool {
    let query = query.trim().to_lowercase();
    !query.is_empty()
        && STATE_ALIASES
            .iter()
            .any(|(_, variations)| variations.iter().any(|v| v.contains(query.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_substring() {
        assert!(match_state("raj", "Rajasthan"));
        assert!(match_state("RAJASTHAN", "rajasthan"));
        assert!(!match_state("", "Rajasthan"));
    }

    #[test]
    fn test_abbreviations() {
        assert!(match_state("up", "Uttar Pradesh"));
        assert!(match_state("j&k", "Jammu & Kashmir"));
        assert!(match_state("jammu and kashmir", "Jammu & Kashmir"));
        assert!(match_state("orissa", "Odisha"));
        assert!(match_state("pondicherry", "Puducherry"));
    }

    #[test]
    fn test_unrelated_states() {
        assert!(!match_state("gujarat", "Rajasthan"));
        assert!(!match_state("kerala", "Karnataka"));
    }
}
