//! Core record types shared across the service.
//!
//! Field and enum wire names match the external documents exactly
//! (camelCase fields, kebab-case enum values), so the same serde shapes are
//! used for storage and for the HTTP surface.

pub mod application;
pub mod dashboard;
pub mod ids;
pub mod interview;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use dashboard::{ApplicationWithJob, DashboardView, JobWithApplications};
pub use ids::{ApplicationId, CallId, DocIdError, InterviewId, JobId, UserId};
pub use interview::{Interview, InterviewStatus, InterviewType};
pub use job::{EmploymentType, Job, JobStatus, LocationType, SalaryRange};
pub use user::{Education, Experience, Role, UserAccount, UserProfile};
