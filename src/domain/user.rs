//! User accounts, roles, and profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Role assigned to an account at registration.
///
/// The role is dispatched **once** at the boundary where the authenticated
/// account is loaded (see the dashboard routes); downstream code works with
/// the already-dispatched variant instead of re-checking strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// An applicant browsing and applying to postings.
    #[serde(rename = "job-seeker")]
    JobSeeker,
    /// A recruiter publishing postings and reviewing applicants.
    #[serde(rename = "recruiter")]
    Recruiter,
}

impl Role {
    /// Stable wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobSeeker => "job-seeker",
            Self::Recruiter => "recruiter",
        }
    }
}

/// A registered account document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Document id (the auth provider's uid).
    pub id: UserId,
    /// Contact email.
    pub email: String,
    /// Name shown across the product.
    pub display_name: String,
    /// Avatar URL.
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    /// Account role, fixed at registration.
    pub role: Role,
    /// Topics the account follows (used for recommendations).
    #[serde(default)]
    pub interests: Vec<String>,
    /// Extended profile, filled in after registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Extended profile attached to an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// One-line headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Home location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Skill tags.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Work history, most recent first.
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Education history.
    #[serde(default)]
    pub education: Vec<Education>,
    /// Hosted resume URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    /// Public profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_profile_url: Option<String>,
}

/// One entry of work history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Entry id (client-minted).
    pub id: String,
    /// Position title.
    pub title: String,
    /// Employer name.
    pub company: String,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Start of the position.
    pub start_date: DateTime<Utc>,
    /// End of the position, absent while current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Whether this is the current position.
    pub current: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One entry of education history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Entry id (client-minted).
    pub id: String,
    /// School name.
    pub institution: String,
    /// Degree earned.
    pub degree: String,
    /// Field of study.
    pub field: String,
    /// Start of the program.
    pub start_date: DateTime<Utc>,
    /// End of the program, absent while current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Whether the program is ongoing.
    pub current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let seeker = serde_json::to_string(&Role::JobSeeker).ok();
        let recruiter = serde_json::to_string(&Role::Recruiter).ok();
        assert_eq!(seeker.as_deref(), Some("\"job-seeker\""));
        assert_eq!(recruiter.as_deref(), Some("\"recruiter\""));
    }

    #[test]
    fn test_account_field_names_match_documents() {
        let json = serde_json::json!({
            "id": "u1",
            "email": "u1@example.com",
            "displayName": "User One",
            "photoURL": "https://example.com/u1.png",
            "role": "recruiter",
            "createdAt": "2025-03-01T12:00:00Z"
        });
        let account: Result<UserAccount, _> = serde_json::from_value(json);
        let account = account.ok();
        assert!(account.is_some());
        let account = account.map(|a| (a.display_name, a.role));
        assert_eq!(
            account,
            Some(("User One".to_string(), Role::Recruiter))
        );
    }
}
