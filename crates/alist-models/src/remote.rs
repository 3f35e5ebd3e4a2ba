use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::status::ListStatus;

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Viewer {
    pub id: u64,
    pub name: String,
}

/// Full entry state pushed to the list service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntryUpdate {
    pub list_id: u64,
    pub media_id: u64,
    pub status: ListStatus,
    pub progress: u32,
    pub score: u8,
}

/// Fields acknowledged by the list service after a save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedEntry {
    pub list_id: u64,
    pub status: ListStatus,
    pub progress: u32,
    pub score: u8,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiringSchedule {
    pub media_id: u64,
    pub episode: u32,
    pub airing_at: DateTime<Utc>,
    /// Negative once the episode has aired
    pub time_until_airing: i64,
}

/// Opening and ending themes from the secondary catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Themes {
    pub openings: Vec<String>,
    pub endings: Vec<String>,
}
