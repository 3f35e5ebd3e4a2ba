//! In-memory collaborators shared by the unit tests.

use alist_models::{
    AiringSchedule, Entry, EntryUpdate, ListStatus, MediaTitle, SavedEntry, Viewer,
};
use alist_sources::{ListService, SourceError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

use crate::selection::Chooser;

pub fn entry(list_id: u64, romaji: &str, status: ListStatus, progress: u32, total: u32) -> Entry {
    Entry {
        list_id,
        media_id: list_id + 1000,
        external_media_id: None,
        title: MediaTitle {
            romaji: romaji.to_string(),
            english: String::new(),
            native: String::new(),
            user_preferred: romaji.to_string(),
        },
        synonyms: Vec::new(),
        status,
        progress,
        score: 0,
        total_units: total,
        updated_at: Utc.with_ymd_and_hms(2024, 1, list_id as u32 % 28 + 1, 0, 0, 0).unwrap(),
        next_airing: None,
    }
}

#[derive(Default)]
struct Calls {
    viewer: usize,
    fetch: usize,
    saves: Vec<EntryUpdate>,
    airing: Vec<(u64, u32)>,
}

pub struct FakeService {
    entries: Vec<Entry>,
    unauthorized: bool,
    fail_fetch: Mutex<bool>,
    fail_save: Mutex<bool>,
    calls: Mutex<Calls>,
}

impl FakeService {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            unauthorized: false,
            fail_fetch: Mutex::new(false),
            fail_save: Mutex::new(false),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            unauthorized: true,
            ..Self::with_entries(Vec::new())
        }
    }

    pub fn fail_fetch(&self) {
        *self.fail_fetch.lock().unwrap() = true;
    }

    pub fn fail_save(&self) {
        *self.fail_save.lock().unwrap() = true;
    }

    pub fn viewer_calls(&self) -> usize {
        self.calls.lock().unwrap().viewer
    }

    pub fn fetch_calls(&self) -> usize {
        self.calls.lock().unwrap().fetch
    }

    pub fn saves(&self) -> Vec<EntryUpdate> {
        self.calls.lock().unwrap().saves.clone()
    }

    pub fn airing_requests(&self) -> Vec<(u64, u32)> {
        self.calls.lock().unwrap().airing.clone()
    }

    fn check_token(&self) -> Result<(), SourceError> {
        if self.unauthorized {
            return Err(SourceError::Unauthorized("Invalid token".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListService for FakeService {
    fn service_name(&self) -> &str {
        "fake"
    }

    async fn viewer(&self, _token: &str) -> Result<Viewer, SourceError> {
        self.calls.lock().unwrap().viewer += 1;
        self.check_token()?;
        Ok(Viewer { id: 42, name: "tester".to_string() })
    }

    async fn fetch_list(&self, _token: &str, _user_id: u64) -> Result<Vec<Entry>, SourceError> {
        self.calls.lock().unwrap().fetch += 1;
        self.check_token()?;
        if *self.fail_fetch.lock().unwrap() {
            return Err(SourceError::Api { status: 500, message: "Internal Server Error".to_string() });
        }
        Ok(self.entries.clone())
    }

    async fn save_entry(&self, _token: &str, update: &EntryUpdate) -> Result<SavedEntry, SourceError> {
        self.calls.lock().unwrap().saves.push(update.clone());
        self.check_token()?;
        if *self.fail_save.lock().unwrap() {
            return Err(SourceError::Api { status: 502, message: "Bad Gateway".to_string() });
        }
        Ok(SavedEntry {
            list_id: update.list_id,
            status: update.status,
            progress: update.progress,
            score: update.score,
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        })
    }

    async fn airing_schedule(
        &self,
        _token: &str,
        media_id: u64,
        episode: u32,
    ) -> Result<AiringSchedule, SourceError> {
        self.calls.lock().unwrap().airing.push((media_id, episode));
        self.check_token()?;
        Ok(AiringSchedule {
            media_id,
            episode,
            airing_at: Utc.with_ymd_and_hms(2025, 6, 8, 15, 0, 0).unwrap(),
            time_until_airing: 3600,
        })
    }
}

/// Chooser that answers with a fixed index and records what it was offered.
pub struct ScriptedChooser {
    answer: Option<usize>,
    offered: Mutex<Vec<Vec<String>>>,
}

impl ScriptedChooser {
    pub fn picks(index: usize) -> Self {
        Self { answer: Some(index), offered: Mutex::new(Vec::new()) }
    }

    pub fn aborts() -> Self {
        Self { answer: None, offered: Mutex::new(Vec::new()) }
    }

    pub fn offered(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&self, _prompt: &str, items: &[String]) -> Option<usize> {
        self.offered.lock().unwrap().push(items.to_vec());
        self.answer.filter(|i| *i < items.len())
    }
}
