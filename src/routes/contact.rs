use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::NewContactRequest;
use crate::registration::is_valid_email;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/contact", get(contact_page).post(submit))
}

#[derive(Template)]
#[template(path = "pages/contact.html")]
struct ContactTemplate {
    error: String,
    submitted: bool,
}

async fn contact_page() -> Html<ContactTemplate> {
    Html(ContactTemplate {
        error: String::new(),
        submitted: false,
    })
}

#[derive(Deserialize)]
struct ContactForm {
    full_name: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    message: String,
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    if form.full_name.trim().is_empty() || form.email.trim().is_empty() {
        return Ok(Html(ContactTemplate {
            error: "Please provide your name and email address".to_string(),
            submitted: false,
        })
        .into_response());
    }
    if !is_valid_email(&form.email) {
        return Ok(Html(ContactTemplate {
            error: "Please provide a valid email address".to_string(),
            submitted: false,
        })
        .into_response());
    }

    let row = NewContactRequest {
        full_name: form.full_name,
        email: form.email,
        phone: if form.phone.is_empty() {
            None
        } else {
            Some(form.phone)
        },
        message: if form.message.is_empty() {
            None
        } else {
            Some(form.message)
        },
        status: "new".to_string(),
    };

    match state
        .backend
        .insert::<_, serde_json::Value>("contact_requests", &row)
        .await
    {
        Ok(_) => Ok(Html(ContactTemplate {
            error: String::new(),
            submitted: true,
        })
        .into_response()),
        Err(e) => {
            tracing::error!("contact request insert failed: {}", e);
            Ok(Html(ContactTemplate {
                error: "Failed to submit your request. Please try again.".to_string(),
                submitted: false,
            })
            .into_response())
        }
    }
}
