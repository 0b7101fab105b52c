//! Job application records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ApplicationId, JobId, UserId};

/// Review state of an application.
///
/// Transitions are recruiter-driven and unrestricted; the external store is
/// the only arbiter of the current value (no local state machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at.
    Pending,
    /// Under review.
    Reviewing,
    /// Shortlisted for interviews.
    Shortlisted,
    /// Rejected.
    Rejected,
    /// Hired.
    Hired,
}

impl ApplicationStatus {
    /// Stable wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewing => "reviewing",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }
}

/// A job application document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Document id.
    pub id: ApplicationId,
    /// Posting applied to.
    pub job_id: JobId,
    /// Recruiter owning the posting (denormalized for listing).
    pub recruiter_id: UserId,
    /// Applicant account.
    pub applicant_id: UserId,
    /// Hosted resume URL submitted with the application.
    pub resume_url: String,
    /// Optional cover letter text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    /// Review state.
    pub status: ApplicationStatus,
    /// Submission time.
    pub applied_at: DateTime<Utc>,
    /// Last status-change time.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(ApplicationStatus::Pending.as_str(), "pending");
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Shortlisted)
                .ok()
                .as_deref(),
            Some("\"shortlisted\"")
        );
        let parsed: Result<ApplicationStatus, _> = serde_json::from_str("\"hired\"");
        assert_eq!(parsed.ok(), Some(ApplicationStatus::Hired));
    }
}
