//! Role-dispatched dashboard views.
//!
//! The authenticated role is resolved exactly once, where the account
//! document is loaded; everything downstream carries the dispatched variant.

use serde::{Deserialize, Serialize};

use super::application::Application;
use super::job::Job;

/// A posting together with its best-effort application count.
///
/// The count is produced by re-querying the applications collection; the
/// external store offers no transactional aggregate, so the value may lag
/// recent writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithApplications {
    /// The posting.
    pub job: Job,
    /// Number of applications observed for the posting.
    pub application_count: usize,
}

/// An application together with the posting it targets.
///
/// The posting is `None` when its document has since been removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    /// The application.
    pub application: Application,
    /// The posting applied to, when still present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

/// Dashboard payload, dispatched on the account role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "kebab-case")]
pub enum DashboardView {
    /// Recruiter view: own postings with application counts.
    Recruiter {
        /// Postings owned by the recruiter, with counts.
        jobs: Vec<JobWithApplications>,
    },
    /// Job-seeker view: own applications with their postings.
    JobSeeker {
        /// Applications submitted by the account.
        applications: Vec<ApplicationWithJob>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_tagging() {
        let view = DashboardView::Recruiter { jobs: Vec::new() };
        let json = serde_json::to_value(&view).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("role")).and_then(|v| v.as_str()),
            Some("recruiter")
        );

        let view = DashboardView::JobSeeker {
            applications: Vec::new(),
        };
        let json = serde_json::to_value(&view).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("role")).and_then(|v| v.as_str()),
            Some("job-seeker")
        );
    }
}
