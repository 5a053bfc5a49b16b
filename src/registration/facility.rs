//! Care facility / carer registration flow.

use crate::backend::BackendClient;
use crate::error::AppResult;
use crate::models::NewPartnerRegistration;
use crate::registration::documents::ScreenedDocument;
use crate::registration::{is_valid_email, submit_partner, validate_credentials, PartnerTables};

pub const TABLES: PartnerTables = PartnerTables {
    registrations: "care_facility_registrations",
    documents: "care_facility_documents",
};

#[derive(Debug, Clone, Default)]
pub struct FacilityForm {
    pub name: String,
    pub date_of_establishment: String,
    pub business_profile: String,
    pub address: String,
    pub krs: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate(form: &FacilityForm, document_count: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push("Facility name is required".to_string());
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
    form: &FacilityForm,
    docs: &[ScreenedDocument],
) -> AppResult<()> {
    let password_hash = bcrypt::hash(&form.password, bcrypt::DEFAULT_COST)
        .map_err(|e| crate::error::AppError::Internal(format!("password hashing failed: {}", e)))?;

    let row = NewPartnerRegistration {
        name: form.name.clone(),
        date_of_establishment: form.date_of_establishment.clone(),
        business_profile: Some(form.business_profile.clone()),
        mission_statement: None,
        address: form.address.clone(),
        krs: form.krs.clone(),
        email: form.email.clone(),
        password_hash,
        status: "pending".to_string(),
    };

    submit_partner(backend, &TABLES, row, docs).await?;
    Ok(())
}
