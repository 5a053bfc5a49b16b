//! Opportunity listings split by urgency tier, and the urgent-needs
//! teaser shown on the home page.

use crate::backend::{BackendClient, Query};
use crate::error::AppResult;
use crate::models::{Opportunity, Urgency};

/// Teaser cards shown on the home page.
const TEASER_LIMIT: u32 = 3;
const IMMEDIATE_LIMIT: u32 = 6;
const ONGOING_LIMIT: u32 = 4;

#[derive(Debug, Clone)]
pub struct UrgentTeaser {
    pub needs: Vec<Opportunity>,
    /// Count of further urgent needs beyond the ones shown, floored at 0.
    pub remaining: u64,
}

pub async fn urgent_teaser(backend: &BackendClient) -> AppResult<UrgentTeaser> {
    let filters = Query::new()
        .eq("urgency", Urgency::Urgent.as_str())
        .eq("status", "active");

    let total = backend.count("opportunities", &filters).await?;
    let needs: Vec<Opportunity> = backend
        .select(
            "opportunities",
            &filters.order("created_at.desc").limit(TEASER_LIMIT),
        )
        .await?;

    let remaining = compute_remaining(total, needs.len());
    Ok(UrgentTeaser { needs, remaining })
}

#[derive(Debug, Clone)]
pub struct Listings {
    pub immediate: Vec<Opportunity>,
    pub ongoing: Vec<Opportunity>,
}

pub async fn listings(backend: &BackendClient) -> AppResult<Listings> {
    let immediate = backend
        .select(
            "opportunities",
            &Query::new()
                .eq("status", "active")
                .eq("urgency", Urgency::Immediate.as_str())
                .order("created_at.desc")
                .limit(IMMEDIATE_LIMIT),
        )
        .await?;

    let ongoing = backend
        .select(
            "opportunities",
            &Query::new()
                .eq("status", "active")
                .eq("urgency", Urgency::Ongoing.as_str())
                .order("created_at.desc")
                .limit(ONGOING_LIMIT),
        )
        .await?;

    Ok(Listings { immediate, ongoing })
}

pub fn compute_remaining(total: u64, shown: usize) -> u64 {
    total.saturating_sub(shown as u64)
}
