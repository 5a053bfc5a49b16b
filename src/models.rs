use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trust tier on a profile. Unverified accounts get read-only access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    NotVerified,
    #[serde(rename = "verified_level_1")]
    VerifiedLevel1,
    #[serde(rename = "verified_level_2")]
    VerifiedLevel2,
}

impl VerificationStatus {
    pub fn is_read_only(&self) -> bool {
        matches!(self, VerificationStatus::NotVerified)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert shape for `user_profiles`; the id comes from the auth identity.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub location: String,
    pub bio: Option<String>,
    pub verification_status: VerificationStatus,
}

/// Closed category set for feed posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    EducationMath,
    EducationEnglish,
    EducationPolish,
    Health,
    Events,
    CommunityService,
}

impl PostCategory {
    pub const ALL: [PostCategory; 6] = [
        PostCategory::EducationMath,
        PostCategory::EducationEnglish,
        PostCategory::EducationPolish,
        PostCategory::Health,
        PostCategory::Events,
        PostCategory::CommunityService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::EducationMath => "education_math",
            PostCategory::EducationEnglish => "education_english",
            PostCategory::EducationPolish => "education_polish",
            PostCategory::Health => "health",
            PostCategory::Events => "events",
            PostCategory::CommunityService => "community_service",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostCategory::EducationMath => "Math Education",
            PostCategory::EducationEnglish => "English Education",
            PostCategory::EducationPolish => "Polish Education",
            PostCategory::Health => "Health & Wellness",
            PostCategory::Events => "Events",
            PostCategory::CommunityService => "Community Service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub category: PostCategory,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub category: PostCategory,
    pub location: String,
    pub likes_count: i64,
    pub comments_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLike {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostComment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub attendees_count: i64,
}

/// Urgency tier used to prioritize opportunity listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Ongoing,
    Urgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Ongoing => "ongoing",
            Urgency::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub institution_name: String,
    pub location: String,
    pub urgency: Urgency,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVolunteerRegistration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub profession: String,
    pub experience: String,
    pub motivation: String,
    pub status: String,
}

/// Shared insert shape for the care-facility and foundation registration
/// tables; the description column differs per flow.
#[derive(Debug, Clone, Serialize)]
pub struct NewPartnerRegistration {
    pub name: String,
    pub date_of_establishment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_statement: Option<String>,
    pub address: String,
    pub krs: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRegistration {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
}

/// Document metadata row. Binary content is out of scope; `file_url`
/// is persisted as an empty placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct NewRegistrationDocument {
    pub registration_id: String,
    pub document_type: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub activity_type: String,
    pub description: String,
    #[serde(default)]
    pub points_earned: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedOpportunity {
    pub id: String,
    pub user_id: String,
    pub opportunity_title: String,
    pub status: String,
    #[serde(default)]
    pub start_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContactRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_status_round_trips_snake_case() {
        let json = serde_json::to_string(&VerificationStatus::VerifiedLevel1).unwrap();
        assert_eq!(json, "\"verified_level_1\"");
        let back: VerificationStatus = serde_json::from_str("\"not_verified\"").unwrap();
        assert_eq!(back, VerificationStatus::NotVerified);
    }

    #[test]
    fn only_not_verified_is_read_only() {
        assert!(VerificationStatus::NotVerified.is_read_only());
        assert!(!VerificationStatus::VerifiedLevel1.is_read_only());
        assert!(!VerificationStatus::VerifiedLevel2.is_read_only());
    }

    #[test]
    fn post_category_parses_wire_values() {
        assert_eq!(
            PostCategory::parse("education_math"),
            Some(PostCategory::EducationMath)
        );
        assert_eq!(PostCategory::parse("all"), None);
        assert_eq!(PostCategory::parse("garbage"), None);
    }

    #[test]
    fn profile_deserializes_with_missing_optional_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "id": "u1",
                "full_name": "Anna Kowalska",
                "email": "anna@example.com",
                "verification_status": "verified_level_1"
            }"#,
        )
        .unwrap();
        assert_eq!(profile.points, 0);
        assert!(profile.skills.is_empty());
        assert_eq!(profile.location, "");
    }
}
