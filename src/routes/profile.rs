use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;

use crate::backend::Query;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::models::{Activity, AssignedOpportunity, VerificationStatus};
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(profile_page))
}

#[derive(Template)]
#[template(path = "pages/profile.html")]
struct ProfileTemplate {
    full_name: String,
    email: String,
    location: String,
    bio: String,
    points: i64,
    verification_label: String,
    read_only: bool,
    skills: Vec<String>,
    interests: Vec<String>,
    activities: Vec<ActivityView>,
    assigned: Vec<AssignedView>,
}

struct ActivityView {
    description: String,
    points_label: String,
    date_label: String,
}

struct AssignedView {
    title: String,
    status: String,
    start_date: String,
}

async fn profile_page(State(state): State<AppState>, maybe_user: MaybeUser) -> AppResult<Response> {
    let user = match maybe_user.0 {
        Some(user) => user,
        None => return Ok(Redirect::to("/auth/login").into_response()),
    };
    let profile = &user.profile;

    let activities: Vec<Activity> = state
        .backend
        .select(
            "user_activities",
            &Query::new()
                .eq("user_id", &profile.id)
                .order("created_at.desc"),
        )
        .await?;

    let assigned: Vec<AssignedOpportunity> = state
        .backend
        .select(
            "assigned_opportunities",
            &Query::new()
                .eq("user_id", &profile.id)
                .order("created_at.desc"),
        )
        .await?;

    let verification_label = match profile.verification_status {
        VerificationStatus::NotVerified => "Not verified",
        VerificationStatus::VerifiedLevel1 => "Verified (level 1)",
        VerificationStatus::VerifiedLevel2 => "Verified (level 2)",
    }
    .to_string();

    Ok(Html(ProfileTemplate {
        full_name: profile.full_name.clone(),
        email: profile.email.clone(),
        location: profile.location.clone(),
        bio: profile.bio.clone().unwrap_or_default(),
        points: profile.points,
        verification_label,
        read_only: user.is_read_only(),
        skills: profile.skills.clone(),
        interests: profile.interests.clone(),
        activities: activities
            .into_iter()
            .map(|a| ActivityView {
                description: a.description,
                points_label: format!("+{}", a.points_earned),
                date_label: a.created_at.format("%b %-d, %Y").to_string(),
            })
            .collect(),
        assigned: assigned
            .into_iter()
            .map(|a| AssignedView {
                title: a.opportunity_title,
                status: a.status,
                start_date: a.start_date.unwrap_or_default(),
            })
            .collect(),
    })
    .into_response())
}
