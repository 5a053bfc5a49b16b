//! Upcoming events: future-dated fetch with three sort keys and the
//! join-event counter update.

use chrono::Utc;

use crate::backend::{BackendClient, Query};
use crate::error::{AppError, AppResult};
use crate::models::Event;

/// Bounded retries for the compare-and-swap attendee update.
const JOIN_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSort {
    Date,
    Category,
    Location,
}

impl EventSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(EventSort::Date),
            "category" => Some(EventSort::Category),
            "location" => Some(EventSort::Location),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventSort::Date => "date",
            EventSort::Category => "category",
            EventSort::Location => "location",
        }
    }
}

/// Fetch future-dated events. `date` and `category` are server-ordered;
/// `location` is re-ranked client-side by the proximity heuristic.
pub async fn fetch_upcoming(
    backend: &BackendClient,
    sort: EventSort,
    limit: u32,
    user_location: &str,
) -> AppResult<Vec<Event>> {
    let now = Utc::now().to_rfc3339();
    let query = Query::new().gte("event_date", &now).limit(limit);
    let query = match sort {
        EventSort::Date => query.order("event_date.asc"),
        EventSort::Category => query.order("category.asc"),
        EventSort::Location => query.order("location.asc"),
    };

    let mut events: Vec<Event> = backend.select("events", &query).await?;
    if sort == EventSort::Location {
        rank_by_proximity(&mut events, user_location);
    }
    Ok(events)
}

/// Coarse string-matching proximity, deliberately insensitive to real
/// geography: exact match 0, substring containment either way 1, same
/// city prefix before the first comma 2, everything else 3.
pub fn location_distance(location1: &str, location2: &str) -> u8 {
    let loc1 = location1.to_lowercase();
    let loc2 = location2.to_lowercase();

    if loc1 == loc2 {
        return 0;
    }
    if loc1.contains(&loc2) || loc2.contains(&loc1) {
        return 1;
    }

    let city1 = loc1.split(',').next().unwrap_or("").trim();
    let city2 = loc2.split(',').next().unwrap_or("").trim();
    if city1 == city2 {
        return 2;
    }

    3
}

/// Stable re-rank by proximity to the user's location; ties keep the
/// fetch order.
pub fn rank_by_proximity(events: &mut [Event], user_location: &str) {
    events.sort_by_key(|event| location_distance(&event.location, user_location));
}

/// Join an event by bumping its attendee counter. The update is a
/// compare-and-swap on the counter value with bounded retries, so two
/// concurrent joins cannot lose an increment. Returns the new count.
pub async fn join_event(backend: &BackendClient, event_id: &str) -> AppResult<i64> {
    for _ in 0..JOIN_RETRIES {
        let event: Option<Event> = backend
            .select_one("events", &Query::new().eq("id", event_id))
            .await?;
        let current = event.ok_or(AppError::NotFound)?.attendees_count;

        let updated = backend
            .update(
                "events",
                &Query::new()
                    .eq("id", event_id)
                    .eq("attendees_count", current),
                &serde_json::json!({ "attendees_count": current + 1 }),
            )
            .await?;
        if !updated.is_empty() {
            return Ok(current + 1);
        }
        // Another join landed between the read and the write; re-read.
    }

    Err(AppError::Internal(format!(
        "join kept conflicting for event {}",
        event_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn event(title: &str, location: &str) -> Event {
        Event {
            id: uuid::Uuid::now_v7().to_string(),
            title: title.into(),
            description: String::new(),
            category: "community_service".into(),
            location: location.into(),
            event_date: Utc::now() + Duration::days(7),
            organizer: "Hearthy Foundation".into(),
            attendees_count: 0,
        }
    }

    #[test]
    fn exact_match_is_distance_zero() {
        assert_eq!(location_distance("Warsaw, Poland", "warsaw, poland"), 0);
    }

    #[test]
    fn containment_is_distance_one() {
        assert_eq!(location_distance("Warsaw", "Warsaw, Poland"), 1);
        assert_eq!(location_distance("Warsaw, Poland", "Warsaw"), 1);
    }

    #[test]
    fn same_city_prefix_is_distance_two() {
        assert_eq!(location_distance("Warsaw, Mazovia", "Warsaw, Poland"), 2);
    }

    #[test]
    fn unrelated_locations_are_distance_three() {
        assert_eq!(location_distance("Kraków, Poland", "Warsaw, Poland"), 3);
    }

    #[test]
    fn proximity_orders_exact_before_containment_before_unrelated() {
        // User in "Warsaw, Poland": exact (0) < containment (1) < other (3).
        let mut events = vec![
            event("far", "Kraków, Poland"),
            event("contains", "Warsaw"),
            event("exact", "Warsaw, Poland"),
        ];
        rank_by_proximity(&mut events, "Warsaw, Poland");
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["exact", "contains", "far"]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let mut events = vec![
            event("first", "Kraków, Poland"),
            event("second", "Gdańsk, Poland"),
            event("third", "Łódź, Poland"),
        ];
        rank_by_proximity(&mut events, "Warsaw, Poland");
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn sort_keys_parse_from_query_values() {
        assert_eq!(EventSort::parse("date"), Some(EventSort::Date));
        assert_eq!(EventSort::parse("category"), Some(EventSort::Category));
        assert_eq!(EventSort::parse("location"), Some(EventSort::Location));
        assert_eq!(EventSort::parse("distance"), None);
    }
}
