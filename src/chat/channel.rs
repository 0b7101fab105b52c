//! Deterministic conversation identity and idempotent channel resolution.
//!
//! A two-party conversation is keyed by the unordered pair of its
//! participants: the pair is ordered lexicographically and joined with a
//! reserved separator, so both participants derive the same id no matter
//! who initiates contact. Resolution is lookup-then-create against the
//! messaging platform; at most one creation write is ever issued per call.

use core::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::domain::{JobId, UserId};

use super::error::{ChatError, ChatResult};
use super::types::{Channel, ChannelMessage};

/// Separator joining the ordered participant pair into a conversation id.
///
/// Participant identifiers must not contain this sequence; the constructors
/// below reject such identifiers instead of deriving an ambiguous id.
pub const CONVERSATION_SEPARATOR: &str = "::";

/// Deterministic identifier of a two-party conversation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Wrap an id echoed back by the messaging platform.
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow as `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unordered pair of participants in a two-party conversation.
///
/// Two keys are equal iff their participant sets are equal, irrespective of
/// argument order; construction orders the pair lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    low: UserId,
    high: UserId,
}

impl ConversationKey {
    /// Build a key from two distinct participants.
    ///
    /// # Errors
    /// - [`ChatError::InvalidParticipants`] when the two are identical.
    /// - [`ChatError::IdentifierCollision`] when either identifier contains
    ///   the reserved separator.
    pub fn new(a: UserId, b: UserId) -> ChatResult<Self> {
        if a == b {
            return Err(ChatError::InvalidParticipants(format!(
                "a participant may not converse with themselves: {a}"
            )));
        }
        for id in [&a, &b] {
            if id.as_str().contains(CONVERSATION_SEPARATOR) {
                return Err(ChatError::IdentifierCollision {
                    id: id.to_string(),
                    separator: CONVERSATION_SEPARATOR,
                });
            }
        }

        let (low, high) = if a.as_str() <= b.as_str() {
            (a, b)
        } else {
            (b, a)
        };
        Ok(Self { low, high })
    }

    /// Build a key from raw identifier strings.
    ///
    /// # Errors
    /// - [`ChatError::InvalidParticipants`] when either identifier is empty
    ///   or otherwise invalid, or the two are identical.
    /// - [`ChatError::IdentifierCollision`] when either identifier contains
    ///   the reserved separator.
    pub fn parse(a: &str, b: &str) -> ChatResult<Self> {
        let a = UserId::new(a).map_err(|e| ChatError::InvalidParticipants(e.to_string()))?;
        let b = UserId::new(b).map_err(|e| ChatError::InvalidParticipants(e.to_string()))?;
        Self::new(a, b)
    }

    /// The lexicographically smaller participant.
    #[must_use]
    pub const fn low(&self) -> &UserId {
        &self.low
    }

    /// The lexicographically larger participant.
    #[must_use]
    pub const fn high(&self) -> &UserId {
        &self.high
    }

    /// Both participants, in derivation order.
    #[must_use]
    pub fn members(&self) -> [UserId; 2] {
        [self.low.clone(), self.high.clone()]
    }

    /// Derive the conversation id: `low::high`.
    #[must_use]
    pub fn conversation_id(&self) -> ConversationId {
        ConversationId(format!(
            "{}{CONVERSATION_SEPARATOR}{}",
            self.low.as_str(),
            self.high.as_str()
        ))
    }
}

/// Boxed future type for channel backend operations.
pub type ChatFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The messaging-platform primitives the resolver is built on.
///
/// Implemented by the platform client and by in-memory fakes in tests.
pub trait ChannelBackend: Send + Sync {
    /// Look up a conversation by id. Absent conversations are `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached.
    fn lookup_channel(&self, id: ConversationId) -> ChatFuture<'_, ChatResult<Option<Channel>>>;

    /// Create a conversation with the given id, members, and optional topic
    /// metadata.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached or rejects the
    /// create.
    fn create_channel(
        &self,
        id: ConversationId,
        members: [UserId; 2],
        job_id: Option<JobId>,
    ) -> ChatFuture<'_, ChatResult<Channel>>;

    /// Append one message to an existing conversation.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached.
    fn send_message(
        &self,
        id: ConversationId,
        message: ChannelMessage,
    ) -> ChatFuture<'_, ChatResult<()>>;
}

/// Resolve the conversation between two participants, creating it on first
/// contact.
///
/// The derived id is commutative in the participants, so concurrent calls
/// from both sides converge on the same record. Convergence under a true
/// lookup/create race relies on the platform's create-by-id uniqueness; no
/// local lock, transaction, or compare-and-swap is performed, and no retry
/// is attempted here.
///
/// # Errors
/// - [`ChatError::InvalidParticipants`] / [`ChatError::IdentifierCollision`]
///   on bad input (see [`ConversationKey::new`]).
/// - [`ChatError::UpstreamUnavailable`] when the platform cannot be
///   reached; no partial record is created in that case.
pub async fn resolve_conversation(
    backend: &dyn ChannelBackend,
    a: &UserId,
    b: &UserId,
    job_id: Option<&JobId>,
) -> ChatResult<Channel> {
    let key = ConversationKey::new(a.clone(), b.clone())?;
    let id = key.conversation_id();

    if let Some(existing) = backend.lookup_channel(id.clone()).await? {
        tracing::debug!(conversation = %id, "conversation already exists");
        return Ok(existing);
    }

    tracing::debug!(conversation = %id, "creating conversation on first contact");
    backend
        .create_channel(id, key.members(), job_id.cloned())
        .await
}

/// Resolve the conversation between sender and receiver, then append one
/// notification message to it.
///
/// # Errors
/// Propagates [`resolve_conversation`] errors and send failures unchanged.
pub async fn send_notification(
    backend: &dyn ChannelBackend,
    sender: &UserId,
    receiver: &UserId,
    text: impl Into<String>,
    job_title: Option<String>,
) -> ChatResult<()> {
    let channel = resolve_conversation(backend, sender, receiver, None).await?;
    backend
        .send_message(channel.id, ChannelMessage::notification(text, job_title))
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn uid(raw: &str) -> UserId {
        UserId::new(raw).unwrap_or_else(|_| UserId::generate())
    }

    #[test]
    fn test_id_is_commutative() {
        let ab = ConversationKey::parse("u1", "u2").map(|k| k.conversation_id());
        let ba = ConversationKey::parse("u2", "u1").map(|k| k.conversation_id());
        assert_eq!(ab.ok(), ba.ok());
    }

    #[test]
    fn test_id_concrete_derivation() {
        let id = ConversationKey::parse("u1", "u2").map(|k| k.conversation_id());
        assert_eq!(id.ok().map(ConversationId::into_string), Some("u1::u2".to_string()));

        // Lexicographic ordering applies regardless of argument order.
        let id = ConversationKey::parse("u5", "u2").map(|k| k.conversation_id());
        assert_eq!(id.ok().map(ConversationId::into_string), Some("u2::u5".to_string()));
    }

    #[test]
    fn test_distinct_pairs_get_distinct_ids() {
        let ab = ConversationKey::parse("u1", "u2").map(|k| k.conversation_id());
        let cd = ConversationKey::parse("u1", "u3").map(|k| k.conversation_id());
        assert_ne!(ab.ok(), cd.ok());
    }

    #[test]
    fn test_self_conversation_rejected() {
        let err = ConversationKey::parse("u1", "u1");
        assert!(matches!(err, Err(ChatError::InvalidParticipants(_))));
    }

    #[test]
    fn test_empty_participant_rejected() {
        let err = ConversationKey::parse("", "u2");
        assert!(matches!(err, Err(ChatError::InvalidParticipants(_))));
    }

    #[test]
    fn test_separator_in_identifier_fails_fast() {
        let err = ConversationKey::parse("u::1", "u2");
        assert!(matches!(err, Err(ChatError::IdentifierCollision { .. })));
    }

    /// In-memory backend recording creations, for resolver tests.
    #[derive(Default)]
    struct FakeBackend {
        channels: Mutex<HashMap<String, Channel>>,
        creates: AtomicUsize,
    }

    impl FakeBackend {
        fn create_count(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }
    }

    impl ChannelBackend for FakeBackend {
        fn lookup_channel(
            &self,
            id: ConversationId,
        ) -> ChatFuture<'_, ChatResult<Option<Channel>>> {
            Box::pin(async move {
                let channels = self
                    .channels
                    .lock()
                    .map_err(|e| ChatError::UpstreamUnavailable(e.to_string()))?;
                Ok(channels.get(id.as_str()).cloned())
            })
        }

        fn create_channel(
            &self,
            id: ConversationId,
            members: [UserId; 2],
            job_id: Option<JobId>,
        ) -> ChatFuture<'_, ChatResult<Channel>> {
            Box::pin(async move {
                self.creates.fetch_add(1, Ordering::SeqCst);
                let channel = Channel {
                    id: id.clone(),
                    members: members.to_vec(),
                    job_id,
                    created_at: None,
                };
                let mut channels = self
                    .channels
                    .lock()
                    .map_err(|e| ChatError::UpstreamUnavailable(e.to_string()))?;
                channels.insert(id.into_string(), channel.clone());
                Ok(channel)
            })
        }

        fn send_message(
            &self,
            _id: ConversationId,
            _message: ChannelMessage,
        ) -> ChatFuture<'_, ChatResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    /// Backend whose lookups always fail, for upstream-failure tests.
    struct UnreachableBackend {
        creates: AtomicUsize,
    }

    impl ChannelBackend for UnreachableBackend {
        fn lookup_channel(
            &self,
            _id: ConversationId,
        ) -> ChatFuture<'_, ChatResult<Option<Channel>>> {
            Box::pin(async { Err(ChatError::UpstreamUnavailable("timed out".to_string())) })
        }

        fn create_channel(
            &self,
            _id: ConversationId,
            _members: [UserId; 2],
            _job_id: Option<JobId>,
        ) -> ChatFuture<'_, ChatResult<Channel>> {
            Box::pin(async move {
                self.creates.fetch_add(1, Ordering::SeqCst);
                Err(ChatError::UpstreamUnavailable("timed out".to_string()))
            })
        }

        fn send_message(
            &self,
            _id: ConversationId,
            _message: ChannelMessage,
        ) -> ChatFuture<'_, ChatResult<()>> {
            Box::pin(async { Err(ChatError::UpstreamUnavailable("timed out".to_string())) })
        }
    }

    #[tokio::test]
    async fn test_resolve_creates_once_then_reuses() {
        let backend = FakeBackend::default();
        let (a, b) = (uid("u1"), uid("u2"));

        let first = resolve_conversation(&backend, &a, &b, None).await.ok();
        assert!(first.is_some());
        assert_eq!(backend.create_count(), 1);

        // Second call from the other side: same record, zero new creations.
        let second = resolve_conversation(&backend, &b, &a, None).await.ok();
        assert_eq!(
            first.map(|c| c.id),
            second.map(|c| c.id)
        );
        assert_eq!(backend.create_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent_per_pair() {
        let backend = FakeBackend::default();
        let (a, b) = (uid("u1"), uid("u2"));

        for _ in 0..3 {
            let resolved = resolve_conversation(&backend, &a, &b, None).await;
            assert!(resolved.is_ok());
        }
        assert_eq!(backend.create_count(), 1);
        let stored = backend
            .channels
            .lock()
            .map(|channels| channels.len())
            .unwrap_or_default();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_topic_reference_is_metadata_not_identity() {
        let backend = FakeBackend::default();
        let (a, b) = (uid("u1"), uid("u2"));
        let job = JobId::new("job-7").ok();

        let with_topic = resolve_conversation(&backend, &a, &b, job.as_ref()).await.ok();
        let without = resolve_conversation(&backend, &a, &b, None).await.ok();
        assert_eq!(
            with_topic.as_ref().map(|c| c.id.clone()),
            without.as_ref().map(|c| c.id.clone())
        );
        // The record keeps the metadata it was created with.
        assert_eq!(without.and_then(|c| c.job_id), job);
        assert_eq!(backend.create_count(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_creates_nothing() {
        let backend = UnreachableBackend {
            creates: AtomicUsize::new(0),
        };
        let (a, b) = (uid("u1"), uid("u2"));

        let err = resolve_conversation(&backend, &a, &b, None).await;
        assert!(matches!(err, Err(ChatError::UpstreamUnavailable(_))));
        assert_eq!(backend.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_notification_resolves_then_appends() {
        let backend = FakeBackend::default();
        let (a, b) = (uid("rec-1"), uid("app-1"));

        let sent = send_notification(
            &backend,
            &a,
            &b,
            "Your application moved to reviewing",
            Some("Backend Engineer".to_string()),
        )
        .await;
        assert!(sent.is_ok());
        assert_eq!(backend.create_count(), 1);
    }
}
