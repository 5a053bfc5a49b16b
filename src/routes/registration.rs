use askama::Template;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;

use crate::backend::BackendError;
use crate::error::{AppError, AppResult};
use crate::registration::documents::{
    screen, DocumentUpload, ScreenedDocument, PARTNER_POLICY, VOLUNTEER_POLICY,
};
use crate::registration::{facility, foundation, volunteer};
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration", get(volunteer_page).post(submit_volunteer))
        .route(
            "/care-facility-registration",
            get(facility_page).post(submit_facility),
        )
        .route(
            "/foundation-registration",
            get(foundation_page).post(submit_foundation),
        )
        .route("/success", get(success_page))
}

#[derive(Template)]
#[template(path = "pages/register_volunteer.html")]
struct VolunteerTemplate {
    errors: Vec<String>,
    form: volunteer::VolunteerForm,
}

#[derive(Template)]
#[template(path = "pages/register_facility.html")]
struct FacilityTemplate {
    errors: Vec<String>,
    form: facility::FacilityForm,
}

#[derive(Template)]
#[template(path = "pages/register_foundation.html")]
struct FoundationTemplate {
    errors: Vec<String>,
    form: foundation::FoundationForm,
}

#[derive(Template)]
#[template(path = "pages/success.html")]
struct SuccessTemplate;

async fn success_page() -> Html<SuccessTemplate> {
    Html(SuccessTemplate)
}

async fn volunteer_page() -> Html<VolunteerTemplate> {
    Html(VolunteerTemplate {
        errors: Vec::new(),
        form: volunteer::VolunteerForm::default(),
    })
}

async fn facility_page() -> Html<FacilityTemplate> {
    Html(FacilityTemplate {
        errors: Vec::new(),
        form: facility::FacilityForm::default(),
    })
}

async fn foundation_page() -> Html<FoundationTemplate> {
    Html(FoundationTemplate {
        errors: Vec::new(),
        form: foundation::FoundationForm::default(),
    })
}

/// Split a multipart form into its text fields and uploaded documents.
/// File bytes are read only to size the upload; binary storage is out of
/// scope.
async fn read_multipart(
    mut multipart: Multipart,
) -> AppResult<(HashMap<String, String>, Vec<DocumentUpload>)> {
    let mut fields = HashMap::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) if !file_name.is_empty() => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                uploads.push(DocumentUpload {
                    file_name,
                    content_type,
                    size: bytes.len() as u64,
                });
            }
            Some(_) => {} // empty file input, no upload
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.insert(name, value);
            }
        }
    }

    Ok((fields, uploads))
}

fn field(fields: &HashMap<String, String>, name: &str) -> String {
    fields.get(name).cloned().unwrap_or_default()
}

/// One human-readable message for a failed backend submission.
fn submission_error(err: &AppError) -> String {
    if let AppError::Backend(BackendError::Status { body, .. }) = err {
        if body.contains("already registered") {
            return "This email is already registered. Please try logging in instead.".to_string();
        }
    }
    "Failed to create account. Please try again.".to_string()
}

async fn submit_volunteer(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (fields, uploads) = read_multipart(multipart).await?;

    let form = volunteer::VolunteerForm {
        first_name: field(&fields, "first_name"),
        last_name: field(&fields, "last_name"),
        email: field(&fields, "email"),
        phone: field(&fields, "phone"),
        date_of_birth: field(&fields, "date_of_birth"),
        profession: field(&fields, "profession"),
        experience: field(&fields, "experience"),
        motivation: field(&fields, "motivation"),
        password: field(&fields, "password"),
        confirm_password: field(&fields, "confirm_password"),
    };

    // Volunteer documents are optional; flagged items are kept but noted.
    let screened: Vec<ScreenedDocument> = uploads
        .into_iter()
        .map(|u| screen(&VOLUNTEER_POLICY, u))
        .collect();
    for doc in screened.iter().filter(|d| !d.is_valid()) {
        tracing::debug!("flagged upload {}: {:?}", doc.file_name, doc.error);
    }

    let errors = volunteer::validate(&form);
    if !errors.is_empty() {
        return Ok(Html(VolunteerTemplate { errors, form }).into_response());
    }

    match volunteer::submit(&state.backend, &form).await {
        Ok(()) => Ok(Redirect::to("/success").into_response()),
        Err(e) => {
            tracing::error!("volunteer registration failed: {}", e);
            Ok(Html(VolunteerTemplate {
                errors: vec![submission_error(&e)],
                form,
            })
            .into_response())
        }
    }
}

async fn submit_facility(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (fields, uploads) = read_multipart(multipart).await?;

    let form = facility::FacilityForm {
        name: field(&fields, "name"),
        date_of_establishment: field(&fields, "date_of_establishment"),
        business_profile: field(&fields, "business_profile"),
        address: field(&fields, "address"),
        krs: field(&fields, "krs"),
        email: field(&fields, "email"),
        password: field(&fields, "password"),
        confirm_password: field(&fields, "confirm_password"),
    };

    let screened: Vec<ScreenedDocument> = uploads
        .into_iter()
        .map(|u| screen(&PARTNER_POLICY, u))
        .collect();

    let errors = facility::validate(&form, screened.len());
    if !errors.is_empty() {
        return Ok(Html(FacilityTemplate { errors, form }).into_response());
    }

    match facility::submit(&state.backend, &form, &screened).await {
        Ok(()) => Ok(Redirect::to("/success").into_response()),
        Err(e) => {
            tracing::error!("care facility registration failed: {}", e);
            Ok(Html(FacilityTemplate {
                errors: vec![submission_error(&e)],
                form,
            })
            .into_response())
        }
    }
}

async fn submit_foundation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (fields, uploads) = read_multipart(multipart).await?;

    let form = foundation::FoundationForm {
        name: field(&fields, "name"),
        date_of_establishment: field(&fields, "date_of_establishment"),
        mission_statement: field(&fields, "mission_statement"),
        address: field(&fields, "address"),
        krs: field(&fields, "krs"),
        email: field(&fields, "email"),
        password: field(&fields, "password"),
        confirm_password: field(&fields, "confirm_password"),
    };

    let screened: Vec<ScreenedDocument> = uploads
        .into_iter()
        .map(|u| screen(&PARTNER_POLICY, u))
        .collect();

    let errors = foundation::validate(&form, screened.len());
    if !errors.is_empty() {
        return Ok(Html(FoundationTemplate { errors, form }).into_response());
    }

    match foundation::submit(&state.backend, &form, &screened).await {
        Ok(()) => Ok(Redirect::to("/success").into_response()),
        Err(e) => {
            tracing::error!("foundation registration failed: {}", e);
            Ok(Html(FoundationTemplate {
                errors: vec![submission_error(&e)],
                form,
            })
            .into_response())
        }
    }
}
