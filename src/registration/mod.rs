//! Registration flows for volunteers, care facilities and foundations.
//!
//! Each flow validates synchronously before any network call, then runs
//! an ordered insert sequence against the backend with explicit
//! compensation when a later step fails.

pub mod documents;
pub mod facility;
pub mod foundation;
pub mod volunteer;

use crate::backend::{BackendClient, Query};
use crate::error::AppResult;
use crate::models::{NewPartnerRegistration, NewRegistrationDocument, PartnerRegistration};

use documents::ScreenedDocument;

/// Shape check matching `^[^\s@]+@[^\s@]+\.[^\s@]+$`: a local part, one
/// `@`, and a domain containing an interior dot, none of it whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .bytes()
        .enumerate()
        .any(|(i, b)| b == b'.' && i > 0 && i < domain.len() - 1)
}

/// Password rules shared by every flow.
pub fn validate_credentials(password: &str, confirm: &str, errors: &mut Vec<String>) {
    if password.trim().is_empty() {
        errors.push("Password is required".to_string());
    }
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if password != confirm {
        errors.push("Passwords do not match".to_string());
    }
}

/// Table pair backing one of the partner (facility/foundation) flows.
pub struct PartnerTables {
    pub registrations: &'static str,
    pub documents: &'static str,
}

/// Insert the registration row, then one metadata row per submitted
/// document. On a document failure the inserted document rows and the
/// registration row are deleted before the error propagates.
pub async fn submit_partner(
    backend: &BackendClient,
    tables: &PartnerTables,
    row: NewPartnerRegistration,
    docs: &[ScreenedDocument],
) -> AppResult<PartnerRegistration> {
    let registration: PartnerRegistration = backend.insert(tables.registrations, &row).await?;

    for doc in docs {
        let doc_row = NewRegistrationDocument {
            registration_id: registration.id.clone(),
            document_type: doc.document_type.clone(),
            file_name: doc.file_name.clone(),
            // Binary storage is out of scope; only metadata is kept.
            file_url: String::new(),
            file_size: doc.size,
        };
        if let Err(e) = backend
            .insert::<_, serde_json::Value>(tables.documents, &doc_row)
            .await
        {
            compensate_partner(backend, tables, &registration.id).await;
            return Err(e.into());
        }
    }

    Ok(registration)
}

async fn compensate_partner(backend: &BackendClient, tables: &PartnerTables, registration_id: &str) {
    if let Err(e) = backend
        .delete(
            tables.documents,
            &Query::new().eq("registration_id", registration_id),
        )
        .await
    {
        tracing::error!("compensation failed for {}: {}", tables.documents, e);
    }
    if let Err(e) = backend
        .delete(tables.registrations, &Query::new().eq("id", registration_id))
        .await
    {
        tracing::error!("compensation failed for {}: {}", tables.registrations, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("anna@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("anna"));
        assert!(!is_valid_email("anna@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("anna@example"));
        assert!(!is_valid_email("anna@.com"));
        assert!(!is_valid_email("anna@example."));
        assert!(!is_valid_email("an na@example.com"));
        assert!(!is_valid_email("anna@ex@ample.com"));
    }

    #[test]
    fn short_password_is_reported() {
        let mut errors = Vec::new();
        validate_credentials("short", "short", &mut errors);
        assert!(errors
            .iter()
            .any(|e| e.contains("at least 8 characters")));
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let mut errors = Vec::new();
        validate_credentials("longenough", "different", &mut errors);
        assert_eq!(errors, vec!["Passwords do not match".to_string()]);
    }

    #[test]
    fn valid_credentials_add_no_errors() {
        let mut errors = Vec::new();
        validate_credentials("longenough", "longenough", &mut errors);
        assert!(errors.is_empty());
    }
}
