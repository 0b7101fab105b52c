//! Repository for job application documents.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Application, ApplicationId, ApplicationStatus, JobId, UserId};

use super::error::{StoreError, StoreResult};
use super::firestore::{DocumentClient, decode_record, encode_record};

/// Typed access to the `applications` collection.
#[derive(Clone)]
pub struct ApplicationStore {
    docs: DocumentClient,
}

impl ApplicationStore {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "applications";

    /// Wrap the shared document client.
    #[must_use]
    pub const fn new(docs: DocumentClient) -> Self {
        Self { docs }
    }

    /// Store a submitted application under its own id.
    ///
    /// # Errors
    /// Returns an error on conflict or upstream failure.
    pub async fn create(&self, application: &Application) -> StoreResult<Application> {
        let data = encode_record(application)?;
        let doc = self
            .docs
            .create(Self::COLLECTION, application.id.as_str(), &data)
            .await?;
        decode_record(doc)
    }

    /// Point lookup by id.
    ///
    /// # Errors
    /// Returns an error on upstream failure or a malformed document.
    pub async fn get(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        match self.docs.get(Self::COLLECTION, id.as_str()).await? {
            Some(doc) => decode_record(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Point lookup that fails with [`StoreError::NotFound`] when absent.
    ///
    /// # Errors
    /// Returns an error when absent or on upstream failure.
    pub async fn require(&self, id: &ApplicationId) -> StoreResult<Application> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: Self::COLLECTION,
            id: id.to_string(),
        })
    }

    /// Applications submitted against one posting.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_by_job(&self, job_id: &JobId) -> StoreResult<Vec<Application>> {
        let docs = self
            .docs
            .list(Self::COLLECTION, &[("jobId", json!(job_id.as_str()))], None)
            .await?;
        docs.into_iter().map(decode_record).collect()
    }

    /// Applications submitted by one account.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_by_applicant(&self, applicant_id: &UserId) -> StoreResult<Vec<Application>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[("applicantId", json!(applicant_id.as_str()))],
                None,
            )
            .await?;
        docs.into_iter().map(decode_record).collect()
    }

    /// Look for an existing application by this applicant for this posting.
    ///
    /// Used to reject duplicate submissions before creating a new document.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn find_existing(
        &self,
        job_id: &JobId,
        applicant_id: &UserId,
    ) -> StoreResult<Option<Application>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[
                    ("jobId", json!(job_id.as_str())),
                    ("applicantId", json!(applicant_id.as_str())),
                ],
                None,
            )
            .await?;
        match docs.into_iter().next() {
            Some(doc) => decode_record(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Move an application to a new review state, stamping the change time.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> StoreResult<Application> {
        let patch = json!({
            "status": status.as_str(),
            "updatedAt": at,
        });
        let doc = self.docs.update(Self::COLLECTION, id.as_str(), &patch).await?;
        decode_record(doc)
    }
}
