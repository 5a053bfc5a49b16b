//! Partner foundation registration flow.

use crate::backend::BackendClient;
use crate::error::AppResult;
use crate::models::NewPartnerRegistration;
use crate::registration::documents::ScreenedDocument;
use crate::registration::{is_valid_email, submit_partner, validate_credentials, PartnerTables};

pub const TABLES: PartnerTables = PartnerTables {
    registrations: "foundation_registrations",
    documents: "foundation_documents",
};

#[derive(Debug, Clone, Default)]
pub struct FoundationForm {
    pub name: String,
    pub date_of_establishment: String,
    pub mission_statement: String,
    pub address: String,
    pub krs: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate(form: &FoundationForm, document_count: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push("Foundation name is required".to_string());
    }
    if form.date_of_establishment.trim().is_empty() {
        errors.push("Date of establishment is required".to_string());
    }
    if form.address.trim().is_empty() {
        errors.push("Address is required".to_string());
    }
    if form.krs.trim().is_empty() {
        errors.push("KRS number is required".to_string());
    }
    if form.email.trim().is_empty() {
        errors.push("Email is required".to_string());
    }
    if !is_valid_email(&form.email) {
        errors.push("Invalid email format".to_string());
    }
    validate_credentials(&form.password, &form.confirm_password, &mut errors);
    if document_count == 0 {
        errors.push("Please upload at least one document".to_string());
    }

    errors
}

pub async fn submit(
    backend: &BackendClient,
    form: &FoundationForm,
    docs: &[ScreenedDocument],
) -> AppResult<()> {
    let password_hash = bcrypt::hash(&form.password, bcrypt::DEFAULT_COST)
        .map_err(|e| crate::error::AppError::Internal(format!("password hashing failed: {}", e)))?;

    let row = NewPartnerRegistration {
        name: form.name.clone(),
        date_of_establishment: form.date_of_establishment.clone(),
        business_profile: None,
        mission_statement: Some(form.mission_statement.clone()),
        address: form.address.clone(),
        krs: form.krs.clone(),
        email: form.email.clone(),
        password_hash,
        status: "pending".to_string(),
    };

    submit_partner(backend, &TABLES, row, docs).await?;
    Ok(())
}
