//! Repository for account documents.

use serde_json::json;

use crate::domain::{UserAccount, UserId, UserProfile};

use super::error::{StoreError, StoreResult};
use super::firestore::{DocumentClient, decode_record, encode_record};

/// Typed access to the `users` collection.
#[derive(Clone)]
pub struct UserStore {
    docs: DocumentClient,
}

impl UserStore {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "users";

    /// Wrap the shared document client.
    #[must_use]
    pub const fn new(docs: DocumentClient) -> Self {
        Self { docs }
    }

    /// Store a registration document keyed by the auth provider's uid.
    ///
    /// # Errors
    /// Returns an error on conflict or upstream failure.
    pub async fn create(&self, account: &UserAccount) -> StoreResult<UserAccount> {
        let data = encode_record(account)?;
        let doc = self
            .docs
            .create(Self::COLLECTION, account.id.as_str(), &data)
            .await?;
        decode_record(doc)
    }

    /// Point lookup by id.
    ///
    /// # Errors
    /// Returns an error on upstream failure or a malformed document.
    pub async fn get(&self, id: &UserId) -> StoreResult<Option<UserAccount>> {
        match self.docs.get(Self::COLLECTION, id.as_str()).await? {
            Some(doc) => decode_record(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Point lookup that fails with [`StoreError::NotFound`] when absent.
    ///
    /// # Errors
    /// Returns an error when absent or on upstream failure.
    pub async fn require(&self, id: &UserId) -> StoreResult<UserAccount> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: Self::COLLECTION,
            id: id.to_string(),
        })
    }

    /// Replace the extended profile of an account.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn update_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> StoreResult<UserAccount> {
        let patch = json!({ "profile": profile });
        let doc = self.docs.update(Self::COLLECTION, id.as_str(), &patch).await?;
        decode_record(doc)
    }
}
