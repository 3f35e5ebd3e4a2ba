use alist_config::{write_atomic, PathManager};
use alist_models::{Entry, Viewer};
use alist_sources::ListService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::sync::MAX_SCORE;

/// Local snapshot of the user's list.
///
/// Entries keep the remote order. The access token lives only in memory and
/// is re-attached from the credential store on every load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListCache {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer: Option<Viewer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(skip)]
    token: Option<String>,
}

impl ListCache {
    pub fn new(viewer: Viewer, entries: Vec<Entry>) -> Self {
        Self {
            viewer: Some(viewer),
            refreshed_at: Some(Utc::now()),
            entries,
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn find_by_id(&self, list_id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.list_id == list_id)
    }

    pub fn find_by_id_mut(&mut self, list_id: u64) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.list_id == list_id)
    }

    pub fn find_by_external_id(&self, external_id: u64) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.external_media_id == Some(external_id))
    }

    /// Reject snapshots whose entries could not have come from the service.
    fn check_entries(&self) -> Result<(), String> {
        match self.entries.iter().find(|e| i64::from(e.score) > MAX_SCORE) {
            Some(e) => Err(format!(
                "entry {} has score {} (max {})",
                e.list_id, e.score, MAX_SCORE
            )),
            None => Ok(()),
        }
    }
}

/// On-disk location of the list snapshot.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path_manager: &PathManager) -> Self {
        Self::at(path_manager.list_cache_file())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing, unreadable or corrupt file counts as no
    /// snapshot; corrupt files are deleted.
    pub fn read(&self) -> Option<ListCache> {
        if !self.path.exists() {
            debug!("Cache miss: {} (file does not exist)", self.path.display());
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read list cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        let parsed = serde_json::from_str::<ListCache>(&content)
            .map_err(|e| e.to_string())
            .and_then(|cache| cache.check_entries().map(|()| cache));
        match parsed {
            Ok(cache) => {
                info!("Cache hit: loaded {} entries", cache.len());
                Some(cache)
            }
            Err(e) => {
                warn!(
                    "Cache corruption detected in {}: {}. Deleting corrupted file.",
                    self.path.display(),
                    e
                );
                if let Err(rm_err) = std::fs::remove_file(&self.path) {
                    warn!("Failed to delete corrupted cache file: {}", rm_err);
                }
                None
            }
        }
    }

    /// Overwrite the whole snapshot. The file holds either the old or the new
    /// content at every point.
    pub fn persist(&self, cache: &ListCache) -> Result<(), SyncError> {
        let json = serde_json::to_vec_pretty(cache).map_err(|e| SyncError::Persist {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        write_atomic(&self.path, &json).map_err(|source| SyncError::Persist {
            path: self.path.clone(),
            source,
        })?;
        debug!("Cache saved: {} entries", cache.len());
        Ok(())
    }

    /// Remove the snapshot; returns whether a file existed.
    pub fn clear(&self) -> std::io::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared list cache {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Result of [`load`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub cache: ListCache,
    /// True when the list came from the remote service
    pub fetched: bool,
    /// Saving a freshly fetched list failed; the cache is still usable
    pub persist_error: Option<SyncError>,
}

/// Read-through load of the list cache.
///
/// A non-empty local snapshot is returned as is unless `force_refresh` is
/// set; otherwise the list is fetched for the token's viewer and persisted.
pub async fn load(
    store: &CacheStore,
    service: &dyn ListService,
    token: Option<&str>,
    force_refresh: bool,
) -> Result<LoadOutcome, SyncError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SyncError::Auth("no access token stored".to_string()))?;

    if !force_refresh {
        if let Some(mut cache) = store.read().filter(|c| !c.is_empty()) {
            cache.set_token(token);
            return Ok(LoadOutcome {
                cache,
                fetched: false,
                persist_error: None,
            });
        }
    }

    info!("Fetching list from {}", service.service_name());
    let viewer = service.viewer(token).await?;
    let entries = service.fetch_list(token, viewer.id).await?;
    info!("Fetched {} entries for {}", entries.len(), viewer.name);

    let mut cache = ListCache::new(viewer, entries);
    cache.set_token(token);

    let persist_error = match store.persist(&cache) {
        Ok(()) => None,
        Err(e) => {
            warn!("Fetched list could not be cached: {}", e);
            Some(e)
        }
    };

    Ok(LoadOutcome {
        cache,
        fetched: true,
        persist_error,
    })
}
