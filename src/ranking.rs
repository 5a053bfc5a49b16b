//! Points leaderboard: top 10 profiles by points plus the current
//! user's 1-based rank in the full ordered list.
//!
//! Equal point totals are tie-broken by registration timestamp
//! ascending, so ranks are deterministic.

use serde::Deserialize;

use crate::backend::{BackendClient, Query};
use crate::error::AppResult;

const TOP_N: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct RankEntry {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub top: Vec<RankEntry>,
    /// 1-based rank of the current user in the full list, if present.
    pub current_rank: Option<usize>,
}

pub async fn fetch_leaderboard(
    backend: &BackendClient,
    current_user_id: &str,
) -> AppResult<Leaderboard> {
    let entries: Vec<RankEntry> = backend
        .select(
            "user_profiles",
            &Query::new().order("points.desc,created_at.asc"),
        )
        .await?;

    let current_rank = rank_of(&entries, current_user_id);
    let top = entries.into_iter().take(TOP_N).collect();

    Ok(Leaderboard { top, current_rank })
}

pub fn rank_of(entries: &[RankEntry], user_id: &str) -> Option<usize> {
    entries
        .iter()
        .position(|entry| entry.id == user_id)
        .map(|index| index + 1)
}
