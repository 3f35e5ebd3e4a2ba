use alist_config::AniListConfig;
use alist_models::{
    AiringInfo, AiringSchedule, AutoUpdateMode, Entry, EntryUpdate, ListStatus,
};
use alist_sources::ListService;
use tracing::{debug, info, info_span, Instrument};

use crate::cache::{self, CacheStore, ListCache, LoadOutcome};
use crate::error::SyncError;
use crate::policy;
use crate::selection::{self, Chooser};

pub const MAX_SCORE: i64 = 10;

/// Which entry a command acts on.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// The persisted selection
    Selected(Option<u64>),
    /// Title search through the selection resolver
    Search(&'a str),
}

/// Requested change, still unvalidated.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// `None` increments the current progress
    Progress(Option<i64>),
    Status(String),
    Score(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Change {
    SetProgress(u32),
    IncrementProgress,
    Status(ListStatus),
    Score(u8),
}

impl Mutation {
    /// Check the value ranges without touching any entry.
    pub fn validate(&self) -> Result<(), SyncError> {
        self.change().map(|_| ())
    }

    fn change(&self) -> Result<Change, SyncError> {
        match self {
            Mutation::Progress(None) => Ok(Change::IncrementProgress),
            Mutation::Progress(Some(n)) => u32::try_from(*n)
                .map(Change::SetProgress)
                .map_err(|_| {
                    SyncError::Validation(format!("progress must be 0 or greater, got {}", n))
                }),
            Mutation::Status(text) => text
                .parse::<ListStatus>()
                .map(Change::Status)
                .map_err(|e| SyncError::Validation(e.to_string())),
            Mutation::Score(n) if (0..=MAX_SCORE).contains(n) => Ok(Change::Score(*n as u8)),
            Mutation::Score(n) => Err(SyncError::Validation(format!(
                "score must be between 0 and {}, got {}",
                MAX_SCORE, n
            ))),
        }
    }
}

/// Parse a whole number given on the command line.
pub fn parse_number(text: &str, what: &str) -> Result<i64, SyncError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| SyncError::Validation(format!("{} must be a whole number, got '{}'", what, text)))
}

/// Result of a successful [`SyncController::update`].
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub entry: Entry,
    pub previous: Entry,
}

impl UpdateOutcome {
    pub fn status_changed(&self) -> bool {
        self.entry.status != self.previous.status
    }
}

/// Mediates every mutation between the list cache and the list service.
///
/// A mutation is applied to a detached copy, pushed, and only then written
/// into the cache and persisted.
pub struct SyncController<'a> {
    service: &'a dyn ListService,
    store: &'a CacheStore,
    auto_update: AutoUpdateMode,
}

impl<'a> SyncController<'a> {
    pub fn new(service: &'a dyn ListService, store: &'a CacheStore, auto_update: AutoUpdateMode) -> Self {
        Self {
            service,
            store,
            auto_update,
        }
    }

    pub async fn load(&self, token: Option<&str>, force_refresh: bool) -> Result<LoadOutcome, SyncError> {
        cache::load(self.store, self.service, token, force_refresh).await
    }

    pub fn resolve_target<'c>(
        &self,
        cache: &'c ListCache,
        target: Target<'_>,
        chooser: &dyn Chooser,
    ) -> Result<&'c Entry, SyncError> {
        match target {
            Target::Selected(Some(list_id)) => {
                cache.find_by_id(list_id).ok_or(SyncError::NoSelection)
            }
            Target::Selected(None) => Err(SyncError::NoSelection),
            Target::Search(search) => selection::resolve(search, cache.entries(), chooser),
        }
    }

    pub async fn update(
        &self,
        cache: &mut ListCache,
        target: Target<'_>,
        mutation: Mutation,
        chooser: &dyn Chooser,
    ) -> Result<UpdateOutcome, SyncError> {
        let change = mutation.change()?;
        let token = required_token(cache)?;
        let previous = self.resolve_target(cache, target, chooser)?.clone();

        let mut draft = previous.clone();
        match change {
            Change::SetProgress(n) => draft.progress = n,
            Change::IncrementProgress => draft.progress = draft.progress.saturating_add(1),
            Change::Status(status) => draft.status = status,
            Change::Score(score) => draft.score = score,
        }
        if draft.progress != previous.progress {
            draft = policy::apply(self.auto_update, draft);
        }

        let update = EntryUpdate {
            list_id: draft.list_id,
            media_id: draft.media_id,
            status: draft.status,
            progress: draft.progress,
            score: draft.score,
        };
        debug!(?update, "Pushing entry update");

        let span = info_span!("save_entry", operation = "SaveMediaListEntry", list_id = update.list_id);
        let saved = self
            .service
            .save_entry(&token, &update)
            .instrument(span)
            .await?;

        let entry = {
            let cached = cache
                .find_by_id_mut(draft.list_id)
                .ok_or(SyncError::NoSelection)?;
            cached.status = saved.status;
            cached.progress = saved.progress;
            cached.score = saved.score;
            cached.updated_at = saved.updated_at;
            cached.clone()
        };
        info!(
            "Updated '{}': {} {}",
            entry.title.display(),
            entry.status,
            entry.progress_label()
        );

        self.store
            .persist(cache)
            .map_err(|source| SyncError::PartialSync {
                list_id: entry.list_id,
                title: entry.title.display().to_string(),
                source: Box::new(source),
            })?;

        Ok(UpdateOutcome { entry, previous })
    }

    /// Episode whose airing time is asked for, given the current progress.
    pub fn airing_episode(&self, entry: &Entry) -> u32 {
        let mut episode = entry.progress;
        if self.auto_update != AutoUpdateMode::AfterThreshold && entry.progress < entry.total_units {
            episode += 1;
        }
        episode
    }

    /// Fetch the airing schedule and store it on the in-memory entry.
    pub async fn next_airing(&self, cache: &mut ListCache, list_id: u64) -> Result<AiringSchedule, SyncError> {
        let token = required_token(cache)?;
        let entry = cache.find_by_id(list_id).ok_or(SyncError::NoSelection)?;
        let episode = self.airing_episode(entry);
        let media_id = entry.media_id;

        let span = info_span!("airing_schedule", operation = "AiringSchedule", media_id, episode);
        let schedule = self
            .service
            .airing_schedule(&token, media_id, episode)
            .instrument(span)
            .await?;

        if let Some(cached) = cache.find_by_id_mut(list_id) {
            cached.next_airing = Some(AiringInfo {
                airing_at: schedule.airing_at,
                episode: schedule.episode,
            });
        }
        Ok(schedule)
    }
}

fn required_token(cache: &ListCache) -> Result<String, SyncError> {
    cache
        .token()
        .map(str::to_string)
        .ok_or_else(|| SyncError::Auth("no access token attached to the list".to_string()))
}

/// Resolve `search` and remember the entry as the current selection.
///
/// Only the in-memory configuration is changed; saving it is up to the
/// caller.
pub fn select<'c>(
    config: &mut AniListConfig,
    cache: &'c ListCache,
    search: &str,
    chooser: &dyn Chooser,
) -> Result<&'c Entry, SyncError> {
    let entry = selection::resolve(search, cache.entries(), chooser)?;
    config.selected_id = Some(entry.list_id);
    info!("Selected '{}' ({})", entry.title.display(), entry.list_id);
    Ok(entry)
}
