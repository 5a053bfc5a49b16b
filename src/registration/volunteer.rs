//! Volunteer sign-up: auth identity first, then the profile row, then a
//! "pending review" application row when any optional detail was given.

use crate::backend::{BackendClient, Query};
use crate::error::AppResult;
use crate::models::{NewUserProfile, NewVolunteerRegistration, VerificationStatus};
use crate::registration::{is_valid_email, validate_credentials};

#[derive(Debug, Clone, Default)]
pub struct VolunteerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub profession: String,
    pub experience: String,
    pub motivation: String,
    pub password: String,
    pub confirm_password: String,
}

impl VolunteerForm {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    fn has_details(&self) -> bool {
        !self.phone.is_empty()
            || !self.date_of_birth.is_empty()
            || !self.profession.is_empty()
            || !self.experience.is_empty()
            || !self.motivation.is_empty()
    }
}

/// All violations, not just the first; the form re-renders the full list.
pub fn validate(form: &VolunteerForm) -> Vec<String> {
    let mut errors = Vec::new();

    if form.first_name.trim().is_empty() {
        errors.push("First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        errors.push("Last name is required".to_string());
    }
    if form.email.trim().is_empty() {
        errors.push("Email is required".to_string());
    }
    if !is_valid_email(&form.email) {
        errors.push("Invalid email format".to_string());
    }
    validate_credentials(&form.password, &form.confirm_password, &mut errors);

    errors
}

/// Ordered insert sequence: auth sign-up, profile, then optionally the
/// application row. Later failures delete the profile row; the auth
/// identity cannot be removed with the public key and is logged as an
/// orphan.
pub async fn submit(backend: &BackendClient, form: &VolunteerForm) -> AppResult<()> {
    let full_name = form.full_name();

    let identity_id = backend
        .sign_up(
            &form.email,
            &form.password,
            serde_json::json!({
                "full_name": full_name,
                "first_name": form.first_name,
                "last_name": form.last_name,
            }),
        )
        .await?;

    let profile = NewUserProfile {
        id: identity_id.clone(),
        user_id: identity_id.clone(),
        full_name: full_name.clone(),
        email: form.email.clone(),
        location: if form.phone.is_empty() {
            String::new()
        } else {
            "Poland".to_string()
        },
        bio: if form.motivation.is_empty() {
            None
        } else {
            Some(form.motivation.clone())
        },
        verification_status: VerificationStatus::NotVerified,
    };

    if let Err(e) = backend
        .insert::<_, serde_json::Value>("user_profiles", &profile)
        .await
    {
        tracing::warn!(
            "profile insert failed; auth identity {} left orphaned",
            identity_id
        );
        return Err(e.into());
    }

    if form.has_details() {
        let application = NewVolunteerRegistration {
            full_name,
            email: form.email.clone(),
            phone: form.phone.clone(),
            date_of_birth: if form.date_of_birth.is_empty() {
                None
            } else {
                Some(form.date_of_birth.clone())
            },
            profession: form.profession.clone(),
            experience: form.experience.clone(),
            motivation: form.motivation.clone(),
            status: "pending".to_string(),
        };
        if let Err(e) = backend
            .insert::<_, serde_json::Value>("volunteer_registrations", &application)
            .await
        {
            compensate_profile(backend, &identity_id).await;
            return Err(e.into());
        }
    }

    Ok(())
}

async fn compensate_profile(backend: &BackendClient, profile_id: &str) {
    if let Err(e) = backend
        .delete("user_profiles", &Query::new().eq("id", profile_id))
        .await
    {
        tracing::error!("profile compensation failed for {}: {}", profile_id, e);
    }
    tracing::warn!(
        "application insert failed; auth identity {} left orphaned",
        profile_id
    );
}
