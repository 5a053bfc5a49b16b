use askama::Template;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
}

#[derive(Template)]
#[template(path = "pages/login.html")]
struct LoginTemplate {
    error: String,
    email: String,
}

async fn login_page() -> Html<LoginTemplate> {
    Html(LoginTemplate {
        error: String::new(),
        email: String::new(),
    })
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> AppResult<Response> {
    match state
        .sessions
        .sign_in(&state.backend, &form.email, &form.password)
        .await
    {
        Ok(session) => {
            let cookie = format!(
                "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
                state.config.auth.cookie_name,
                session.token,
                state.config.auth.session_hours * 3600
            );
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to("/dashboard"),
            )
                .into_response())
        }
        Err(AppError::NotFound) => Ok(Html(LoginTemplate {
            error: "No account found with this email".to_string(),
            email: form.email,
        })
        .into_response()),
        Err(e) => {
            tracing::error!("sign-in failed: {}", e);
            Ok(Html(LoginTemplate {
                error: "Sign in failed, please try again".to_string(),
                email: form.email,
            })
            .into_response())
        }
    }
}

async fn logout(State(state): State<AppState>, user: CurrentUser) -> Response {
    state.sessions.sign_out(&state.backend, &user.token).await;
    let cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        state.config.auth.cookie_name
    );
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

/// Re-fetch the signed-in user's profile row, then return to the
/// profile page.
async fn refresh(State(state): State<AppState>, user: CurrentUser) -> Response {
    state
        .sessions
        .refresh_profile(&state.backend, &user.token)
        .await;
    Redirect::to("/profile").into_response()
}
