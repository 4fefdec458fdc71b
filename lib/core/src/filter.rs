// Conjunctive record filters for the search endpoint
use crate::states::match_state;
use crate::stats::SearchStatistics;
use crate::{ArtisanRecord, RecordStore};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

pub const DEFAULT_LIMIT: usize = 20;

pub trait Filter {
    fn matches(&self, record: &ArtisanRecord) -> bool;
}

/// A single predicate over an artisan record
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    State(String),
    DistrictContains(String),
    CraftContains(String),
    NameContains(String),
    LanguageContains(String),
    ClusterContains(String),
    AgeAtLeast(u32),
    AgeAtMost(u32),
    GenderIs(String),
    PhoneAvailable(bool),
    And(Vec<FilterCondition>),
}

pub struct ArtisanFilter {
    condition: FilterCondition,
}

impl ArtisanFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    fn contains(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.trim().to_lowercase())
    }

    fn matches_condition(condition: &FilterCondition, record: &ArtisanRecord) -> bool {
        match condition {
            FilterCondition::State(query) => match_state(query, record.state()),
            FilterCondition::DistrictContains(q) => Self::contains(record.district(), q),
            FilterCondition::CraftContains(q) => Self::contains(&record.craft_type, q),
            FilterCondition::NameContains(q) => Self::contains(&record.name, q),
            FilterCondition::LanguageContains(q) => record.speaks(q.trim()),
            FilterCondition::ClusterContains(q) => Self::contains(&record.cluster_code, q),
            FilterCondition::AgeAtLeast(min) => record.age >= *min,
            FilterCondition::AgeAtMost(max) => record.age <= *max,
            FilterCondition::GenderIs(g) => record.gender.trim().eq_ignore_ascii_case(g.trim()),
            FilterCondition::PhoneAvailable(want) => record.contact.phone_available == *want,
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
        }
    }
}

impl Filter for ArtisanFilter {
    fn matches(&self, record: &ArtisanRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Age,
    State,
    Craft,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "age" => Some(SortKey::Age),
            "state" => Some(SortKey::State),
            "craft" | "craft_type" => Some(SortKey::Craft),
            _ => None,
        }
    }

    fn compare(&self, a: &ArtisanRecord, b: &ArtisanRecord) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Age => a.age.cmp(&b.age),
            SortKey::State => a.state().to_lowercase().cmp(&b.state().to_lowercase()),
            SortKey::Craft => a.craft_type.to_lowercase().cmp(&b.craft_type.to_lowercase()),
        }
    }
}

/// Search request body.
///
/// Every key is optional. Numeric and boolean fields are lenient: values of
/// the wrong type are treated as absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    #[serde(default, deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub craft_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cluster_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub age_min: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub age_max: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub phone_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub limit: Option<usize>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub offset: Option<usize>,
}

impl SearchFilters {
    /// Parse a JSON body; anything that is not an object means "no filters"
    pub fn from_json(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// Predicates implied by the supplied keys, in evaluation order
    pub fn conditions(&self) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();
        if let Some(v) = &self.state {
            conditions.push(FilterCondition::State(v.clone()));
        }
        if let Some(v) = &self.district {
            conditions.push(FilterCondition::DistrictContains(v.clone()));
        }
        if let Some(v) = &self.craft_type {
            conditions.push(FilterCondition::CraftContains(v.clone()));
        }
        if let Some(v) = &self.name {
            conditions.push(FilterCondition::NameContains(v.clone()));
        }
        if let Some(v) = &self.language {
            conditions.push(FilterCondition::LanguageContains(v.clone()));
        }
        if let Some(v) = &self.cluster_code {
            conditions.push(FilterCondition::ClusterContains(v.clone()));
        }
        if let Some(v) = self.age_min {
            conditions.push(FilterCondition::AgeAtLeast(v));
        }
        if let Some(v) = self.age_max {
            conditions.push(FilterCondition::AgeAtMost(v));
        }
        if let Some(v) = &self.gender {
            conditions.push(FilterCondition::GenderIs(v.clone()));
        }
        if let Some(v) = self.phone_available {
            conditions.push(FilterCondition::PhoneAvailable(v));
        }
        conditions
    }

    /// Names of the predicate keys that took part in filtering
    pub fn applied_keys(&self) -> Vec<&'static str> {
        [
            ("state", self.state.is_some()),
            ("district", self.district.is_some()),
            ("craft_type", self.craft_type.is_some()),
            ("name", self.name.is_some()),
            ("language", self.language.is_some()),
            ("cluster_code", self.cluster_code.is_some()),
            ("age_min", self.age_min.is_some()),
            ("age_max", self.age_max.is_some()),
            ("gender", self.gender.is_some()),
            ("phone_available", self.phone_available.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_by.as_deref().and_then(SortKey::parse)
    }

    pub fn descending(&self) -> bool {
        self.sort_order
            .as_deref()
            .map(|o| o.eq_ignore_ascii_case("desc"))
            .unwrap_or(false)
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub artists: Vec<ArtisanRecord>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Every record satisfying all supplied predicates, sorted if requested
pub fn filter_records<'a>(store: &'a RecordStore, filters: &SearchFilters) -> Vec<&'a ArtisanRecord> {
    let filter = ArtisanFilter::new(FilterCondition::And(filters.conditions()));
    let mut matched: Vec<&ArtisanRecord> = store
        .get_all()
        .iter()
        .filter(|record| filter.matches(record))
        .collect();

    if let Some(key) = filters.sort_key() {
        // `sort_by` is stable, so ties keep source order in both directions
        if filters.descending() {
            matched.sort_by(|a, b| key.compare(b, a));
        } else {
            matched.sort_by(|a, b| key.compare(a, b));
        }
    }

    matched
}

/// Filter, sort and paginate in one step
pub fn search(store: &RecordStore, filters: &SearchFilters) -> (SearchPage, SearchStatistics) {
    let matched = filter_records(store, filters);
    let statistics = SearchStatistics::from_records(matched.iter().copied());
    (paginate(&matched, filters.limit(), filters.offset()), statistics)
}

pub fn paginate(matched: &[&ArtisanRecord], limit: usize, offset: usize) -> SearchPage {
    let total = matched.len();
    let artists = matched
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| (*r).clone())
        .collect();

    SearchPage {
        artists,
        total,
        limit,
        offset,
        has_more: offset.saturating_add(limit) < total,
    }
}

mod lenient {
    use super::*;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let raw = match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(raw.and_then(|v| T::try_from(v).ok()))
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}
