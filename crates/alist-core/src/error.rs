use alist_sources::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds of a list command. None of them is retried automatically.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("not authenticated with AniList: {0}. Run `alist auth` to store a new access token")]
    Auth(String),

    /// Remote call failed; local state was left unchanged
    #[error("AniList request failed: {0}")]
    Transport(#[source] SourceError),

    #[error("failed to write list cache {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote save went through but the local snapshot is now stale
    #[error("'{title}' was updated on AniList but the local cache could not be saved ({source}); run again with --refresh to resync")]
    PartialSync {
        list_id: u64,
        title: String,
        #[source]
        source: Box<SyncError>,
    },

    #[error("no entry matches '{0}'")]
    NoMatch(String),

    #[error("'{search}' matches {} entries; be more specific", candidates.len())]
    AmbiguousInput { search: String, candidates: Vec<u64> },

    #[error("no entry selected; use `alist sel <title>` first")]
    NoSelection,

    #[error("{0}")]
    Validation(String),
}

impl From<SourceError> for SyncError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unauthorized(message) => SyncError::Auth(message),
            other => SyncError::Transport(other),
        }
    }
}

impl SyncError {
    /// Local and remote state disagree after this error
    pub fn is_partial_sync(&self) -> bool {
        matches!(self, SyncError::PartialSync { .. })
    }
}
