//! Repository for scheduled interview documents.

use super::error::{StoreError, StoreResult};
use super::firestore::{Direction, DocumentClient, decode_record, encode_record};

use crate::domain::{Interview, InterviewId};

/// Typed access to the `interviews` collection.
#[derive(Clone)]
pub struct InterviewStore {
    docs: DocumentClient,
}

impl InterviewStore {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "interviews";

    /// Wrap the shared document client.
    #[must_use]
    pub const fn new(docs: DocumentClient) -> Self {
        Self { docs }
    }

    /// Store a newly scheduled interview under its own id.
    ///
    /// # Errors
    /// Returns an error on conflict or upstream failure.
    pub async fn create(&self, interview: &Interview) -> StoreResult<Interview> {
        let data = encode_record(interview)?;
        let doc = self
            .docs
            .create(Self::COLLECTION, interview.id.as_str(), &data)
            .await?;
        decode_record(doc)
    }

    /// Point lookup by id.
    ///
    /// # Errors
    /// Returns an error on upstream failure or a malformed document.
    pub async fn get(&self, id: &InterviewId) -> StoreResult<Option<Interview>> {
        match self.docs.get(Self::COLLECTION, id.as_str()).await? {
            Some(doc) => decode_record(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Point lookup that fails with [`StoreError::NotFound`] when absent.
    ///
    /// # Errors
    /// Returns an error when absent or on upstream failure.
    pub async fn require(&self, id: &InterviewId) -> StoreResult<Interview> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: Self::COLLECTION,
            id: id.to_string(),
        })
    }

    /// All interviews, most recently scheduled first.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn list_recent(&self) -> StoreResult<Vec<Interview>> {
        let docs = self
            .docs
            .list(
                Self::COLLECTION,
                &[],
                Some(("scheduledAt", Direction::Descending)),
            )
            .await?;
        docs.into_iter().map(decode_record).collect()
    }

    /// Remove a scheduled interview.
    ///
    /// The associated video call, if any, is an external-platform record and
    /// is left untouched.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn delete(&self, id: &InterviewId) -> StoreResult<()> {
        self.docs.delete(Self::COLLECTION, id.as_str()).await
    }
}
