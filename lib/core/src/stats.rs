use crate::states::is_known_alias_fragment;
use crate::{ArtisanRecord, RecordStore};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

/// Aggregates over a filtered result set
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_artists: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_states: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_districts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_crafts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_clusters: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states_found: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crafts_found: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
}

impl SearchStatistics {
    /// Statistics for `records`; an empty input serializes as `{}`
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ArtisanRecord>,
    {
        let mut total = 0usize;
        let mut states = BTreeSet::new();
        let mut districts = BTreeSet::new();
        let mut crafts = BTreeSet::new();
        let mut clusters = BTreeSet::new();
        let mut age_range: Option<AgeRange> = None;

        for record in records {
            total += 1;
            states.insert(record.state().to_string());
            districts.insert(record.district().to_string());
            crafts.insert(record.craft_type.clone());
            clusters.insert(record.cluster_code.clone());
            age_range = Some(match age_range {
                Some(r) => AgeRange { min: r.min.min(record.age), max: r.max.max(record.age) },
                None => AgeRange { min: record.age, max: record.age },
            });
        }

        if total == 0 {
            return Self::default();
        }

        Self {
            total_artists: Some(total),
            unique_states: Some(states.len()),
            unique_districts: Some(districts.len()),
            unique_crafts: Some(crafts.len()),
            unique_clusters: Some(clusters.len()),
            states_found: states.into_iter().collect(),
            crafts_found: crafts.into_iter().collect(),
            age_range,
        }
    }
}

/// Distinct, sorted, non-empty crafts and states in the store
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub crafts: Vec<String>,
    pub states: Vec<String>,
}

impl Catalog {
    pub fn from_store(store: &RecordStore) -> Self {
        let crafts: BTreeSet<&str> = store
            .get_all()
            .iter()
            .map(|r| r.craft_type.as_str())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            crafts: crafts.into_iter().map(String::from).collect(),
            states: available_states(store),
        }
    }
}

pub fn available_states(store: &RecordStore) -> Vec<String> {
    let states: BTreeSet<&str> = store
        .get_all()
        .iter()
        .map(|r| r.state())
        .filter(|s| !s.is_empty())
        .collect();
    states.into_iter().map(String::from).collect()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AgeDistribution {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

/// Whole-dataset overview served by `/stats` and the chat statistics intent
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub total_artists: usize,
    pub unique_crafts: usize,
    pub unique_states: usize,
    pub unique_districts: usize,
    pub hindi_speakers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_distribution: Option<AgeDistribution>,
}

impl DatasetStats {
    pub fn from_store(store: &RecordStore) -> Self {
        let records = store.get_all();
        let distinct = |f: fn(&ArtisanRecord) -> &str| {
            records.iter().map(f).collect::<BTreeSet<&str>>().len()
        };

        // Unparseable ages are stored as 0 and would skew the distribution
        let ages: Vec<u32> = records.iter().map(|r| r.age).filter(|&a| a > 0).collect();
        let age_distribution = if ages.is_empty() {
            None
        } else {
            let sum: u64 = ages.iter().map(|&a| a as u64).sum();
            Some(AgeDistribution {
                min: ages.iter().copied().min().unwrap_or(0),
                max: ages.iter().copied().max().unwrap_or(0),
                mean: sum as f64 / ages.len() as f64,
            })
        };

        Self {
            total_artists: records.len(),
            unique_crafts: distinct(|r| r.craft_type.as_str()),
            unique_states: distinct(|r| r.state()),
            unique_districts: distinct(|r| r.district()),
            hindi_speakers: records.iter().filter(|r| r.speaks("hindi")).count(),
            age_distribution,
        }
    }
}

/// "Did you mean" states for a state query that matched nothing
pub fn suggest_states(store: &RecordStore, query: &str, max: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let alias_hit = is_known_alias_fragment(&needle);
    available_states(store)
        .into_iter()
        .filter(|s| alias_hit || s.to_lowercase().contains(&needle))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Location;

    fn artisan(craft: &str, state: &str, district: &str, age: u32, langs: &[&str]) -> ArtisanRecord {
        ArtisanRecord {
            id: format!("{}-{}", craft, age),
            name: "Test".to_string(),
            age,
            craft_type: craft.to_string(),
            location: Location { state: state.to_string(), district: district.to_string(), ..Default::default() },
            languages: langs.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            artisan("Pottery", "Rajasthan", "Jaipur", 30, &["Hindi"]),
            artisan("Pottery", "Gujarat", "Kutch", 0, &["Gujarati"]),
            artisan("Weaving", "Rajasthan", "Barmer", 60, &["Hindi", "Marwari"]),
            artisan("", "", "", 40, &[]),
        ])
    }

    #[test]
    fn test_catalog_is_sorted_and_skips_empty() {
        let catalog = Catalog::from_store(&store());
        assert_eq!(catalog.crafts, vec!["Pottery", "Weaving"]);
        assert_eq!(catalog.states, vec!["Gujarat", "Rajasthan"]);
    }

    #[test]
    fn test_dataset_stats() {
        let stats = DatasetStats::from_store(&store());
        assert_eq!(stats.total_artists, 4);
        assert_eq!(stats.unique_crafts, 3);
        assert_eq!(stats.hindi_speakers, 2);
        let ages = stats.age_distribution.unwrap();
        assert_eq!((ages.min, ages.max), (30, 60));
        assert!((ages.mean - 130.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_search_statistics_empty() {
        let stats = SearchStatistics::from_records(std::iter::empty());
        assert_eq!(serde_json::to_value(&stats).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_search_statistics() {
        let store = store();
        let stats = SearchStatistics::from_records(store.get_all().iter().take(3));
        assert_eq!(stats.total_artists, Some(3));
        assert_eq!(stats.states_found, vec!["Gujarat", "Rajasthan"]);
        assert_eq!(stats.age_range, Some(AgeRange { min: 0, max: 60 }));
    }

    #[test]
    fn test_suggest_states() {
        let store = store();
        // A fragment of any known alias keeps every available state
        assert_eq!(suggest_states(&store, "raj", 5), vec!["Gujarat", "Rajasthan"]);
        assert_eq!(suggest_states(&store, "raj", 1), vec!["Gujarat"]);
        assert!(suggest_states(&store, "zzz", 5).is_empty());
    }
}
