//! Repository for job posting documents.

use serde_json::{Value, json};

use crate::domain::{Job, JobId, JobStatus, UserId};

use super::error::{StoreError, StoreResult};
use super::firestore::{DocumentClient, decode_record, encode_record};

/// Typed access to the `jobs` collection.
#[derive(Clone)]
pub struct JobStore {
    docs: DocumentClient,
}

impl JobStore {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "jobs";

    /// Wrap the shared document client.
    #[must_use]
    pub const fn new(docs: DocumentClient) -> Self {
        Self { docs }
    }

    /// Store a new posting under its own id.
    ///
    /// # Errors
    /// Returns an error on conflict or upstream failure.
    pub async fn create(&self, job: &Job) -> StoreResult<Job> {
        let data = encode_record(job)?;
        let doc = self
            .docs
            .create(Self::COLLECTION, job.id.as_str(), &data)
            .await?;
        decode_record(doc)
    }

    /// Point lookup by id.
    ///
    /// # Errors
    /// Returns an error on upstream failure or a malformed document.
    pub async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        match self.docs.get(Self::COLLECTION, id.as_str()).await? {
            Some(doc) => decode_record(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Point lookup that fails with [`StoreError::NotFound`] when absent.
    ///
    /// # Errors
    /// Returns an error when absent or on upstream failure.
    pub async fn require(&self, id: &JobId) -> StoreResult<Job> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: Self::COLLECTION,
            id: id.to_string(),
        })
    }

    /// Patch the named fields of a posting and return the updated record.
    ///
    /// # Errors
    /// Returns an error on upstream failure or bad payload.
    pub async fn update(&self, id: &JobId, patch: &Value) -> StoreResult<Job> {
        let doc = self.docs.update(Self::COLLECTION, id.as_str(), patch).await?;
        decode_record(doc)
    }

    /// All postings, newest first.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_all(&self) -> StoreResult<Vec<Job>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[],
                Some(("postedAt", super::firestore::Direction::Descending)),
            )
            .await?;
        docs.into_iter().map(decode_record).collect()
    }

    /// Postings owned by one recruiter.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_by_recruiter(&self, recruiter_id: &UserId) -> StoreResult<Vec<Job>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[("recruiterId", json!(recruiter_id.as_str()))],
                None,
            )
            .await?;
        docs.into_iter().map(decode_record).collect()
    }

    /// Postings currently accepting applications.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_active(&self) -> StoreResult<Vec<Job>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[("status", json!(JobStatus::Active.as_str()))],
                None,
            )
            .await?;
        docs.into_iter().map(decode_record).collect()
    }
}
