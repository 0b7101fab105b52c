//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::chat::ChatService;
use crate::config::AppConfig;
use crate::store::{ApplicationStore, DocumentClient, InterviewStore, JobStore, UserStore};
use crate::video::VideoService;

/// Shared application state.
///
/// All external-collaborator handles live here: one document client shared
/// by the repositories, and one connection handle each for chat and video.
/// Handlers receive the state by reference; nothing is process-global.
pub struct AppState {
    /// Job posting repository.
    pub jobs: JobStore,
    /// Application repository.
    pub applications: ApplicationStore,
    /// Interview repository.
    pub interviews: InterviewStore,
    /// Account repository.
    pub users: UserStore,
    /// Messaging platform facade.
    pub chat: ChatService,
    /// Video platform facade.
    pub video: VideoService,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// # Errors
    /// Returns an error if any collaborator client cannot be created.
    pub fn new(config: AppConfig) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let docs = DocumentClient::new(config.store)
            .map_err(|e| format!("Failed to create document client: {e}"))?;

        let chat = ChatService::connect(config.stream.clone())
            .map_err(|e| format!("Failed to connect chat service: {e}"))?;
        let video = VideoService::connect(config.stream)
            .map_err(|e| format!("Failed to connect video service: {e}"))?;

        Ok(Arc::new(Self {
            jobs: JobStore::new(docs.clone()),
            applications: ApplicationStore::new(docs.clone()),
            interviews: InterviewStore::new(docs.clone()),
            users: UserStore::new(docs),
            chat,
            video,
        }))
    }
}
