use crate::{ArtisanRecord, Error, RecordStore, Result};
use serde::Serialize;

pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// How closely a candidate relates to the target, lower is closer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Affinity {
    SameCraft,
    SameState,
    SameCluster,
}

impl Affinity {
    fn between(target: &ArtisanRecord, candidate: &ArtisanRecord) -> Option<Self> {
        if candidate.craft_type == target.craft_type {
            Some(Affinity::SameCraft)
        } else if candidate.state() == target.state() {
            Some(Affinity::SameState)
        } else if !target.cluster_code.is_empty() && candidate.cluster_code == target.cluster_code {
            Some(Affinity::SameCluster)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarArtists {
    pub similar_artists: Vec<ArtisanRecord>,
    pub total_found: usize,
    pub target_artist: ArtisanRecord,
}

/// Records sharing craft, state or cluster with `id`, closest first.
///
/// The target itself is never part of the result.
pub fn find_similar(store: &RecordStore, id: &str, limit: usize) -> Result<SimilarArtists> {
    let target = store
        .get(id)
        .ok_or_else(|| Error::ArtistNotFound(id.to_string()))?;

    let mut candidates: Vec<(Affinity, &ArtisanRecord)> = store
        .get_all()
        .iter()
        .filter(|r| r.id != target.id)
        .filter_map(|r| Affinity::between(target, r).map(|a| (a, r)))
        .collect();

    candidates.sort_by(|(a, ra), (b, rb)| a.cmp(b).then_with(|| ra.state().cmp(rb.state())));

    Ok(SimilarArtists {
        total_found: candidates.len(),
        similar_artists: candidates.into_iter().take(limit).map(|(_, r)| r.clone()).collect(),
        target_artist: target.clone(),
    })
}
