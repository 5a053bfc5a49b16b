mod common;

use common::spawn_stub;
use hearthy::backend::BackendClient;
use hearthy::registration::documents::{screen, ScreenedDocument, DocumentUpload, PARTNER_POLICY};
use hearthy::registration::{facility, foundation, volunteer};
use serde_json::json;

fn volunteer_form() -> volunteer::VolunteerForm {
    volunteer::VolunteerForm {
        first_name: "Anna".into(),
        last_name: "Kowalska".into(),
        email: "anna@example.com".into(),
        password: "longenough".into(),
        confirm_password: "longenough".into(),
        ..volunteer::VolunteerForm::default()
    }
}

fn facility_form() -> facility::FacilityForm {
    facility::FacilityForm {
        name: "Dom Seniora".into(),
        date_of_establishment: "2015-04-01".into(),
        business_profile: "Elder care".into(),
        address: "ul. Prosta 1, Warsaw".into(),
        krs: "0000123456".into(),
        email: "kontakt@domseniora.pl".into(),
        password: "longenough".into(),
        confirm_password: "longenough".into(),
    }
}

fn pdf_doc(name: &str) -> ScreenedDocument {
    screen(
        &PARTNER_POLICY,
        DocumentUpload {
            file_name: name.to_string(),
            content_type: Some("application/pdf".to_string()),
            size: 1024,
        },
    )
}

#[tokio::test]
async fn minimal_volunteer_signup_creates_identity_and_profile_only() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");

    volunteer::submit(&backend, &volunteer_form()).await.unwrap();

    assert_eq!(stub.rows("auth_users").len(), 1);
    let profiles = stub.rows("user_profiles");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["full_name"], json!("Anna Kowalska"));
    assert_eq!(profiles[0]["verification_status"], json!("not_verified"));
    // Profile id is the auth identity's id.
    assert_eq!(profiles[0]["id"], stub.rows("auth_users")[0]["id"]);
    // No optional details, so no review application.
    assert!(stub.rows("volunteer_registrations").is_empty());
}

#[tokio::test]
async fn detailed_volunteer_signup_files_a_pending_application() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");

    let mut form = volunteer_form();
    form.profession = "Teacher".into();
    form.motivation = "I want to help children learn".into();
    volunteer::submit(&backend, &form).await.unwrap();

    let applications = stub.rows("volunteer_registrations");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["status"], json!("pending"));
    assert_eq!(applications[0]["profession"], json!("Teacher"));
    // The motivation doubles as the profile bio.
    assert_eq!(
        stub.rows("user_profiles")[0]["bio"],
        json!("I want to help children learn")
    );
}

#[tokio::test]
async fn failed_application_insert_deletes_the_profile_row() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");
    stub.fail_inserts_on("volunteer_registrations");

    let mut form = volunteer_form();
    form.profession = "Teacher".into();
    let result = volunteer::submit(&backend, &form).await;

    assert!(result.is_err());
    // The profile insert is compensated; the auth identity cannot be
    // deleted with the public key and stays behind.
    assert!(stub.rows("user_profiles").is_empty());
    assert_eq!(stub.rows("auth_users").len(), 1);
}

#[tokio::test]
async fn facility_registration_stores_a_hashed_credential_and_documents() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");

    let docs = vec![pdf_doc("krs.pdf"), pdf_doc("statute.pdf")];
    facility::submit(&backend, &facility_form(), &docs).await.unwrap();

    let registrations = stub.rows("care_facility_registrations");
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0]["status"], json!("pending"));
    let hash = registrations[0]["password_hash"].as_str().unwrap();
    assert_ne!(hash, "longenough");
    assert!(hash.starts_with("$2"));

    let documents = stub.rows("care_facility_documents");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["registration_id"], registrations[0]["id"]);
    assert_eq!(documents[0]["file_url"], json!(""));
    assert_eq!(documents[0]["document_type"], json!("pdf"));
}

#[tokio::test]
async fn failed_document_insert_compensates_the_whole_registration() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");
    stub.fail_inserts_on("care_facility_documents");

    let docs = vec![pdf_doc("krs.pdf")];
    let result = facility::submit(&backend, &facility_form(), &docs).await;

    assert!(result.is_err());
    assert!(stub.rows("care_facility_registrations").is_empty());
    assert!(stub.rows("care_facility_documents").is_empty());
}

#[tokio::test]
async fn foundation_registration_writes_its_own_tables() {
    let stub = spawn_stub().await;
    let backend = BackendClient::new(&stub.url, "test-anon");

    let form = foundation::FoundationForm {
        name: "Fundacja Pomoc".into(),
        date_of_establishment: "2010-01-01".into(),
        mission_statement: "Support for seniors".into(),
        address: "ul. Długa 5, Kraków".into(),
        krs: "0000654321".into(),
        email: "biuro@pomoc.org".into(),
        password: "longenough".into(),
        confirm_password: "longenough".into(),
    };
    let docs = vec![pdf_doc("statute.pdf")];
    foundation::submit(&backend, &form, &docs).await.unwrap();

    let registrations = stub.rows("foundation_registrations");
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0]["mission_statement"], json!("Support for seniors"));
    assert_eq!(stub.rows("foundation_documents").len(), 1);
    // The facility tables are untouched.
    assert!(stub.rows("care_facility_registrations").is_empty());
}
