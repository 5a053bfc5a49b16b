use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::events::EventSort;
use crate::extractors::{CurrentUser, MaybeUser};
use crate::feed::{self, FeedPost};
use crate::models::{PostCategory, PostComment};
use crate::ranking;
use crate::routes::events::{EventView, WIDGET_LIMIT};
use crate::routes::home::Html;
use crate::state::AppState;
use crate::{events, opportunities};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/posts", post(create_post))
        .route("/dashboard/posts/{id}/like", post(like_post))
        .route("/dashboard/posts/{id}/comments", post(comment_post))
}

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    read_only: bool,
    user_name: String,
    selected_category: String,
    location_filter: String,
    categories: Vec<CategoryView>,
    posts: Vec<PostView>,
    top: Vec<RankView>,
    current_rank: String,
    events: Vec<EventView>,
    urgent_needs: Vec<NeedRow>,
}

struct CategoryView {
    value: String,
    label: String,
    selected: bool,
}

struct PostView {
    id: String,
    author_name: String,
    initials: String,
    content: String,
    category_label: String,
    location: String,
    time_ago: String,
    likes_count: i64,
    comments_count: i64,
    user_has_liked: bool,
    comments: Vec<CommentView>,
}

struct CommentView {
    user_name: String,
    content: String,
    time_ago: String,
}

struct RankView {
    rank: usize,
    full_name: String,
    location: String,
    points: i64,
    is_current: bool,
}

struct NeedRow {
    title: String,
    location: String,
}

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default)]
    category: String,
    #[serde(default)]
    location: String,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    maybe_user: MaybeUser,
) -> AppResult<Response> {
    let user = match maybe_user.0 {
        Some(user) => user,
        None => return Ok(Redirect::to("/auth/login").into_response()),
    };

    let now = Utc::now();
    let posts = feed::fetch_feed(&state.backend, &user.profile.id).await?;
    let category = PostCategory::parse(&query.category);
    let filtered = feed::filter_posts(&posts, category, &query.location);

    let leaderboard = ranking::fetch_leaderboard(&state.backend, &user.profile.id).await?;
    let widget_events = events::fetch_upcoming(
        &state.backend,
        EventSort::Location,
        WIDGET_LIMIT,
        &user.profile.location,
    )
    .await?;
    let teaser = opportunities::urgent_teaser(&state.backend).await?;

    let selected_category = if category.is_some() {
        query.category.clone()
    } else {
        "all".to_string()
    };

    let mut categories = vec![CategoryView {
        value: "all".to_string(),
        label: "All Posts".to_string(),
        selected: selected_category == "all",
    }];
    categories.extend(PostCategory::ALL.iter().map(|c| CategoryView {
        value: c.as_str().to_string(),
        label: c.label().to_string(),
        selected: selected_category == c.as_str(),
    }));

    let top = leaderboard
        .top
        .iter()
        .enumerate()
        .map(|(index, entry)| RankView {
            rank: index + 1,
            full_name: entry.full_name.clone(),
            location: entry.location.clone(),
            points: entry.points,
            is_current: entry.id == user.profile.id,
        })
        .collect();
    let current_rank = leaderboard
        .current_rank
        .map(|rank| format!("#{}", rank))
        .unwrap_or_default();

    Ok(Html(DashboardTemplate {
        read_only: user.is_read_only(),
        user_name: user.profile.full_name.clone(),
        selected_category,
        location_filter: query.location,
        categories,
        posts: filtered.iter().map(|fp| post_view(fp, now)).collect(),
        top,
        current_rank,
        events: widget_events
            .into_iter()
            .map(|e| EventView::from_event(e, now))
            .collect(),
        urgent_needs: teaser
            .needs
            .into_iter()
            .map(|need| NeedRow {
                title: need.title,
                location: need.location,
            })
            .collect(),
    })
    .into_response())
}

fn post_view(fp: &FeedPost, now: DateTime<Utc>) -> PostView {
    PostView {
        id: fp.post.id.clone(),
        author_name: fp.post.author_name.clone(),
        initials: initials(&fp.post.author_name),
        content: fp.post.content.clone(),
        category_label: fp.post.category.label().to_string(),
        location: fp.post.location.clone(),
        time_ago: format_time_ago(fp.post.created_at, now),
        likes_count: fp.post.likes_count,
        comments_count: fp.post.comments_count,
        user_has_liked: fp.user_has_liked,
        comments: fp.comments.iter().map(|c| comment_view(c, now)).collect(),
    }
}

fn comment_view(comment: &PostComment, now: DateTime<Utc>) -> CommentView {
    CommentView {
        user_name: comment.user_name.clone(),
        content: comment.content.clone(),
        time_ago: format_time_ago(comment.created_at, now),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

fn format_time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{}d ago", seconds / 86400)
    } else {
        date.format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Deserialize)]
struct NewPostForm {
    content: String,
    category: String,
    #[serde(default)]
    location: String,
}

async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<NewPostForm>,
) -> AppResult<Response> {
    if user.is_read_only() {
        return Err(AppError::ReadOnly);
    }
    let category = PostCategory::parse(&form.category)
        .ok_or_else(|| AppError::BadRequest("Unknown post category".into()))?;

    feed::create_post(
        &state.backend,
        &user.profile,
        &form.content,
        category,
        &form.location,
    )
    .await?;
    Ok(Redirect::to("/dashboard").into_response())
}

async fn like_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    user: CurrentUser,
) -> AppResult<Response> {
    if user.is_read_only() {
        return Err(AppError::ReadOnly);
    }

    feed::toggle_like(&state.backend, &user.profile.id, &post_id).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

#[derive(Deserialize)]
struct CommentForm {
    content: String,
}

async fn comment_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    user: CurrentUser,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    if user.is_read_only() {
        return Err(AppError::ReadOnly);
    }

    feed::add_comment(&state.backend, &user.profile, &post_id, &form.content).await?;
    Ok(Redirect::to("/dashboard").into_response())
}
