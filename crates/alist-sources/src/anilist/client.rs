use crate::anilist::api;
use crate::error::SourceError;
use crate::traits::ListService;
use alist_models::{AiringSchedule, Entry, EntryUpdate, SavedEntry, Viewer};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// AniList GraphQL client.
#[derive(Clone)]
pub struct AniListClient {
    client: Arc<Client>,
}

pub fn create_anilist_client() -> Client {
    Client::builder()
        .user_agent(concat!("alist/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl AniListClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(create_anilist_client()),
        }
    }
}

impl Default for AniListClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListService for AniListClient {
    fn service_name(&self) -> &str {
        "AniList"
    }

    async fn viewer(&self, token: &str) -> Result<Viewer, SourceError> {
        let viewer = api::get_viewer(&self.client, token).await?;
        info!(user = %viewer.name, id = viewer.id, "Authenticated to AniList");
        Ok(viewer)
    }

    async fn fetch_list(&self, token: &str, user_id: u64) -> Result<Vec<Entry>, SourceError> {
        let entries = api::get_user_list(&self.client, token, user_id).await?;
        info!(user_id, entries = entries.len(), "Fetched AniList anime list");
        Ok(entries)
    }

    async fn save_entry(&self, token: &str, update: &EntryUpdate) -> Result<SavedEntry, SourceError> {
        let saved = api::save_entry(&self.client, token, update).await?;
        info!(
            list_id = saved.list_id,
            status = %saved.status,
            progress = saved.progress,
            score = saved.score,
            "Saved AniList entry"
        );
        Ok(saved)
    }

    async fn airing_schedule(
        &self,
        token: &str,
        media_id: u64,
        episode: u32,
    ) -> Result<AiringSchedule, SourceError> {
        api::get_airing_schedule(&self.client, token, media_id, episode).await
    }
}
