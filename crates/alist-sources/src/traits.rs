use alist_models::{AiringSchedule, Entry, EntryUpdate, SavedEntry, Themes, Viewer};
use async_trait::async_trait;

use crate::error::SourceError;

/// The remote system of record for the user's list.
///
/// Every call takes the access token explicitly; the token belongs to the
/// loaded list cache, not to the client.
#[async_trait]
pub trait ListService: Send + Sync {
    fn service_name(&self) -> &str;

    /// Credentials check; returns the authenticated user
    async fn viewer(&self, token: &str) -> Result<Viewer, SourceError>;

    /// Full anime list of `user_id`, in remote order
    async fn fetch_list(&self, token: &str, user_id: u64) -> Result<Vec<Entry>, SourceError>;

    /// Save one entry and return the fields the service acknowledged
    async fn save_entry(&self, token: &str, update: &EntryUpdate) -> Result<SavedEntry, SourceError>;

    async fn airing_schedule(
        &self,
        token: &str,
        media_id: u64,
        episode: u32,
    ) -> Result<AiringSchedule, SourceError>;
}

/// Secondary catalog keyed by the external (MyAnimeList) id.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn themes(&self, external_id: u64) -> Result<Themes, SourceError>;
}
