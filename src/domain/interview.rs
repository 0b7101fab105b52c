//! Scheduled interview records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ApplicationId, InterviewId, JobId, UserId};

/// Lifecycle state of a scheduled interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    /// Upcoming.
    Scheduled,
    /// Took place.
    Completed,
    /// Called off.
    Cancelled,
}

/// How the interview is conducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    /// Video call on the external video platform.
    Video,
    /// Phone call.
    Phone,
    /// In person.
    InPerson,
}

/// A scheduled interview document.
///
/// `meeting_url` holds the external video platform's call id when the
/// interview type is [`InterviewType::Video`]; the call itself is created
/// once at scheduling time and never mutated from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    /// Document id.
    pub id: InterviewId,
    /// Application this interview belongs to.
    pub application_id: ApplicationId,
    /// Posting the application targets (denormalized for listing).
    pub job_id: JobId,
    /// Recruiter conducting the interview.
    pub recruiter_id: UserId,
    /// Applicant being interviewed.
    pub applicant_id: UserId,
    /// Scheduled start time.
    pub scheduled_at: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration: u32,
    /// Lifecycle state.
    pub status: InterviewStatus,
    /// Video call id, when a call was created at scheduling time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    /// Recruiter notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// How the interview is conducted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<InterviewType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&InterviewType::InPerson)
                .ok()
                .as_deref(),
            Some("\"in-person\"")
        );
        assert_eq!(
            serde_json::to_string(&InterviewStatus::Scheduled)
                .ok()
                .as_deref(),
            Some("\"scheduled\"")
        );
    }
}
