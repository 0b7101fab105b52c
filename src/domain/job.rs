//! Job posting records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{JobId, UserId};

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    /// Fully remote.
    Remote,
    /// Mixed remote and on-site.
    Hybrid,
    /// Fully on-site.
    OnSite,
}

/// Contract shape of the posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    /// Full-time position.
    FullTime,
    /// Part-time position.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Internship,
}

/// Publication state of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Visible and accepting applications.
    Active,
    /// No longer accepting applications.
    Closed,
    /// Not yet published.
    Draft,
}

impl JobStatus {
    /// Stable wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Draft => "draft",
        }
    }
}

/// Advertised salary range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    /// Lower bound, whole currency units.
    pub min: u64,
    /// Upper bound, whole currency units.
    pub max: u64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A job posting document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Document id.
    pub id: JobId,
    /// Recruiter who owns the posting.
    pub recruiter_id: UserId,
    /// Hiring company name.
    pub company_name: String,
    /// Company logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    /// Position title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Advertised location.
    pub location: String,
    /// Remote/hybrid/on-site.
    pub location_type: LocationType,
    /// Contract shape.
    pub employment_type: EmploymentType,
    /// Required skill tags.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Advertised salary range, if disclosed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    /// Publication time.
    pub posted_at: DateTime<Utc>,
    /// Expiry time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Publication state.
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&LocationType::OnSite).ok().as_deref(),
            Some("\"on-site\"")
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime)
                .ok()
                .as_deref(),
            Some("\"full-time\"")
        );
        assert_eq!(
            serde_json::to_string(&JobStatus::Active).ok().as_deref(),
            Some("\"active\"")
        );
    }

    #[test]
    fn test_job_document_round_trip_field_names() {
        let json = serde_json::json!({
            "id": "job-1",
            "recruiterId": "rec-1",
            "companyName": "Acme",
            "title": "Backend Engineer",
            "description": "Build services.",
            "location": "Berlin",
            "locationType": "hybrid",
            "employmentType": "full-time",
            "skills": ["rust", "sql"],
            "salary": { "min": 70000, "max": 90000, "currency": "EUR" },
            "postedAt": "2025-04-02T09:30:00Z",
            "status": "active"
        });
        let job: Result<Job, _> = serde_json::from_value(json);
        let job = job.ok();
        assert!(job.is_some());
        let salary = job.and_then(|j| j.salary);
        assert_eq!(
            salary,
            Some(SalaryRange {
                min: 70_000,
                max: 90_000,
                currency: "EUR".to_string()
            })
        );
    }
}
