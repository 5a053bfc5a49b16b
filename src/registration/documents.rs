//! Per-item screening of uploaded document metadata.
//!
//! Invalid files are flagged, not rejected: a flagged item stays in the
//! submitted list with its violated rule, and only a zero-document
//! submission is blocked where documents are required.

const MB: u64 = 1024 * 1024;

pub struct DocumentPolicy {
    allowed_mime: &'static [&'static str],
    max_size: u64,
    type_error: &'static str,
    size_error: &'static str,
}

/// Volunteer uploads: PDF and images only, 5 MB each.
pub const VOLUNTEER_POLICY: DocumentPolicy = DocumentPolicy {
    allowed_mime: &["application/pdf", "image/jpeg", "image/jpg", "image/png"],
    max_size: 5 * MB,
    type_error: "Only PDF and JPEG files are accepted",
    size_error: "File size must be less than 5MB",
};

/// Facility/foundation uploads additionally allow Word documents, 10 MB.
pub const PARTNER_POLICY: DocumentPolicy = DocumentPolicy {
    allowed_mime: &[
        "application/pdf",
        "image/jpeg",
        "image/jpg",
        "image/png",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ],
    max_size: 10 * MB,
    type_error: "Only PDF, JPEG, PNG and Word documents are accepted",
    size_error: "File size must be less than 10MB",
};

/// Raw upload as it arrives from the multipart form. Only metadata is
/// retained; the bytes themselves are discarded after sizing.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ScreenedDocument {
    pub file_name: String,
    pub document_type: String,
    pub size: u64,
    pub error: Option<&'static str>,
}

impl ScreenedDocument {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Screen one upload against a policy. The MIME type comes from the
/// multipart part when present, otherwise inferred from the file name.
pub fn screen(policy: &DocumentPolicy, upload: DocumentUpload) -> ScreenedDocument {
    let mime = upload.content_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(&upload.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    });

    let error = if !policy.allowed_mime.contains(&mime.as_str()) {
        Some(policy.type_error)
    } else if upload.size > policy.max_size {
        Some(policy.size_error)
    } else {
        None
    };

    let document_type = upload
        .file_name
        .rsplit('.')
        .next()
        .filter(|ext| *ext != upload.file_name)
        .unwrap_or("document")
        .to_lowercase();

    ScreenedDocument {
        file_name: upload.file_name,
        document_type,
        size: upload.size,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: Option<&str>, size: u64) -> DocumentUpload {
        DocumentUpload {
            file_name: name.to_string(),
            content_type: mime.map(str::to_string),
            size,
        }
    }

    #[test]
    fn pdf_within_limit_passes() {
        let doc = screen(&VOLUNTEER_POLICY, upload("id.pdf", Some("application/pdf"), MB));
        assert!(doc.is_valid());
        assert_eq!(doc.document_type, "pdf");
    }

    #[test]
    fn word_document_is_flagged_for_volunteers_but_not_partners() {
        let mime = "application/msword";
        let flagged = screen(&VOLUNTEER_POLICY, upload("krs.doc", Some(mime), MB));
        assert!(!flagged.is_valid());

        let accepted = screen(&PARTNER_POLICY, upload("krs.doc", Some(mime), MB));
        assert!(accepted.is_valid());
    }

    #[test]
    fn oversized_file_is_flagged_with_the_size_rule() {
        let doc = screen(
            &VOLUNTEER_POLICY,
            upload("scan.png", Some("image/png"), 6 * MB),
        );
        assert_eq!(doc.error, Some("File size must be less than 5MB"));
    }

    #[test]
    fn partner_limit_is_ten_megabytes() {
        let ok = screen(&PARTNER_POLICY, upload("a.pdf", Some("application/pdf"), 9 * MB));
        assert!(ok.is_valid());
        let too_big = screen(
            &PARTNER_POLICY,
            upload("b.pdf", Some("application/pdf"), 11 * MB),
        );
        assert!(!too_big.is_valid());
    }

    #[test]
    fn mime_falls_back_to_the_file_name() {
        let doc = screen(&VOLUNTEER_POLICY, upload("photo.jpg", None, MB));
        assert!(doc.is_valid());
        let doc = screen(&VOLUNTEER_POLICY, upload("archive.zip", None, MB));
        assert!(!doc.is_valid());
    }

    #[test]
    fn extensionless_name_gets_the_generic_type() {
        let doc = screen(&PARTNER_POLICY, upload("statute", Some("application/pdf"), MB));
        assert_eq!(doc.document_type, "document");
    }
}
