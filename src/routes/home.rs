use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::models::Opportunity;
use crate::opportunities;
use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
    pub needs: Vec<NeedView>,
    pub remaining: u64,
}

pub struct NeedView {
    pub title: String,
    pub location: String,
    pub institution_name: String,
    pub category: String,
}

impl From<Opportunity> for NeedView {
    fn from(opp: Opportunity) -> Self {
        NeedView {
            title: opp.title,
            location: opp.location,
            institution_name: opp.institution_name,
            category: opp.category,
        }
    }
}

pub async fn index(State(state): State<AppState>, maybe_user: MaybeUser) -> AppResult<Response> {
    let teaser = opportunities::urgent_teaser(&state.backend).await?;

    Ok(Html(HomeTemplate {
        signed_in: maybe_user.0.is_some(),
        needs: teaser.needs.into_iter().map(NeedView::from).collect(),
        remaining: teaser.remaining,
    })
    .into_response())
}
