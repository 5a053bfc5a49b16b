use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::events::{self, EventSort};
use crate::extractors::{CurrentUser, MaybeUser};
use crate::models::Event;
use crate::routes::home::Html;
use crate::state::AppState;

/// Widget on the dashboard shows two events; the full page shows twelve.
pub const WIDGET_LIMIT: u32 = 2;
const PAGE_LIMIT: u32 = 12;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(events_page))
        .route("/events/{id}/join", post(join))
}

pub struct EventView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub date_label: String,
    pub time_label: String,
    pub attendees_count: i64,
}

impl EventView {
    pub fn from_event(event: Event, now: DateTime<Utc>) -> Self {
        EventView {
            id: event.id,
            title: event.title,
            description: event.description,
            category: event.category,
            location: event.location,
            date_label: format_event_date(event.event_date, now),
            time_label: format_event_time(event.event_date),
            attendees_count: event.attendees_count,
        }
    }
}

/// "Today", "Tomorrow", "In N days" inside a week, else a short date.
pub fn format_event_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (date - now).num_seconds();
    let days = (seconds as f64 / 86400.0).ceil() as i64;

    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=6 => format!("In {} days", days),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

pub fn format_event_time(date: DateTime<Utc>) -> String {
    date.format("%-I:%M %p").to_string()
}

#[derive(Template)]
#[template(path = "pages/events.html")]
struct EventsTemplate {
    signed_in: bool,
    read_only: bool,
    sort: String,
    events: Vec<EventView>,
}

#[derive(Deserialize)]
struct EventsQuery {
    #[serde(default)]
    sort: String,
}

async fn events_page(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
    maybe_user: MaybeUser,
) -> AppResult<Response> {
    let sort = EventSort::parse(&query.sort).unwrap_or(EventSort::Date);
    let user_location = maybe_user
        .0
        .as_ref()
        .map(|u| u.profile.location.clone())
        .unwrap_or_default();

    let events = events::fetch_upcoming(&state.backend, sort, PAGE_LIMIT, &user_location).await?;

    let now = Utc::now();
    Ok(Html(EventsTemplate {
        signed_in: maybe_user.0.is_some(),
        read_only: maybe_user.0.as_ref().map_or(true, |u| u.is_read_only()),
        sort: sort.as_str().to_string(),
        events: events
            .into_iter()
            .map(|e| EventView::from_event(e, now))
            .collect(),
    })
    .into_response())
}

async fn join(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    user: CurrentUser,
) -> AppResult<Response> {
    if user.is_read_only() {
        return Err(AppError::ReadOnly);
    }

    events::join_event(&state.backend, &event_id).await?;
    Ok(Redirect::to("/events").into_response())
}
