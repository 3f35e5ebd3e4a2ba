use super::prompts::FuzzyChooser;
use super::sync_ui::with_spinner;
use super::ListArgs;
use crate::output::Output;
use alist_config::{AppMode, Config, CredentialStore, PathManager};
use alist_core::{CacheStore, ListCache, SyncController, SyncError, Target};
use alist_models::Entry;
use alist_sources::AniListClient;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;

/// State every command starts from: paths, configuration, credentials and
/// the AniList client. The configuration is saved explicitly at the end of
/// commands that change it.
pub struct Session {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
    pub client: AniListClient,
    pub store: CacheStore,
}

impl Session {
    pub fn open() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        let store = CacheStore::new(&paths);
        Ok(Self {
            paths,
            config,
            credentials,
            client: AniListClient::new(),
            store,
        })
    }

    /// List commands only run in AniList mode.
    pub fn require_anilist_mode(&self) -> Result<()> {
        if self.config.mode == AppMode::Mal {
            return Err(eyre!(
                "App mode is {}; list commands work on AniList only. Run `alist mode anilist` to switch back",
                self.config.mode
            ));
        }
        Ok(())
    }

    pub fn controller(&self) -> SyncController<'_> {
        SyncController::new(&self.client, &self.store, self.config.anilist.status_auto_update)
    }

    /// Load the list, fetching it when there is no snapshot or a refresh
    /// was requested. A failed save of a fresh list is only a warning.
    pub async fn load_list(&self, args: &ListArgs, output: &Output) -> Result<ListCache> {
        let token = self.credentials.get_anilist_access_token().map(String::as_str);
        let controller = self.controller();
        let outcome = with_spinner(
            "Fetching list from AniList...",
            !output.is_quiet(),
            controller.load(token, args.refresh),
        )
        .await?;

        if let Some(err) = &outcome.persist_error {
            output.warn(format!("List loaded but not cached: {}", err));
        }
        if outcome.fetched && args.refresh {
            output.info(format!("Refreshed {} entries", outcome.cache.len()));
        }
        Ok(outcome.cache)
    }

    /// The entry referenced by the persisted selection.
    pub fn selected<'c>(&self, cache: &'c ListCache) -> Result<&'c Entry, SyncError> {
        self.controller()
            .resolve_target(cache, Target::Selected(self.config.anilist.selected_id), &FuzzyChooser)
    }

    pub fn save_config(&self) -> Result<()> {
        let config_file = self.paths.config_file();
        self.config
            .validate()
            .map_err(|e| eyre!("Invalid configuration: {}", e))?;
        self.config
            .save_to_file(&config_file)
            .map_err(|e| eyre!("{}", e))
            .wrap_err_with(|| format!("Failed to save config to {}", config_file.display()))
    }
}

/// Open `url` with the configured browser, or the system default.
pub fn open_url(url: &str, browser_path: Option<&str>) -> Result<()> {
    let result = match browser_path {
        Some(browser) => open::with(url, browser),
        None => open::that(url),
    };
    result.wrap_err_with(|| format!("Failed to open {}", url))
}
