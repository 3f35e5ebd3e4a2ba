use alist_models::{AutoUpdateMode, StatusFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::paths::write_atomic;

/// Which list service the client talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Anilist,
    Mal,
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppMode::Anilist => f.write_str("AniList"),
            AppMode::Mal => f.write_str("MyAnimeList"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mode: AppMode,
    /// Browser executable used instead of the system default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_path: Option<String>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub anilist: AniListConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Rows shown by the list view; negative shows everything
    #[serde(default = "default_max_visible_entries")]
    pub max_visible_entries: i64,
    #[serde(default)]
    pub status_filter: StatusFilter,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_visible_entries: default_max_visible_entries(),
            status_filter: StatusFilter::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AniListConfig {
    /// OAuth client id used to build the implicit-grant URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// `list_id` of the selected entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<u64>,
    #[serde(default)]
    pub status_auto_update: AutoUpdateMode,
    /// Website overrides keyed by MyAnimeList id (decimal string, TOML keys are strings)
    #[serde(default)]
    pub websites: BTreeMap<String, String>,
}

fn default_max_visible_entries() -> i64 {
    20
}

impl AniListConfig {
    pub fn website(&self, external_id: u64) -> Option<&String> {
        self.websites.get(&external_id.to_string())
    }

    pub fn set_website(&mut self, external_id: u64, url: String) {
        self.websites.insert(external_id.to_string(), url);
    }

    pub fn clear_website(&mut self, external_id: u64) -> Option<String> {
        self.websites.remove(&external_id.to_string())
    }

    /// Overrides with parseable ids, in id order.
    pub fn websites(&self) -> Vec<(u64, &String)> {
        let mut pairs: Vec<(u64, &String)> = self
            .websites
            .iter()
            .filter_map(|(k, v)| k.parse::<u64>().ok().map(|id| (id, v)))
            .collect();
        pairs.sort_by_key(|(id, _)| *id);
        pairs
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config, falling back to defaults when no file exists yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_atomic(path, content.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.display.max_visible_entries == 0 {
            return Err(anyhow::anyhow!("display.max_visible_entries must not be 0 (use a negative value to show all entries)"));
        }
        if let Some(ref path) = self.browser_path {
            if path.trim().is_empty() {
                return Err(anyhow::anyhow!("browser_path is set but empty"));
            }
        }
        if self.anilist.websites.keys().any(|k| k.parse::<u64>().is_err()) {
            return Err(anyhow::anyhow!("anilist.websites keys must be MyAnimeList ids"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alist_models::ListStatus;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.browser_path = Some("firefox".to_string());
        config.display.status_filter = StatusFilter::Only(ListStatus::Paused);
        config.anilist.selected_id = Some(42);
        config.anilist.status_auto_update = AutoUpdateMode::AfterThreshold;
        config.anilist.set_website(5114, "https://example.org/fmab".to_string());

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.mode, AppMode::Anilist);
        assert_eq!(loaded.browser_path.as_deref(), Some("firefox"));
        assert_eq!(loaded.display.status_filter, StatusFilter::Only(ListStatus::Paused));
        assert_eq!(loaded.anilist.selected_id, Some(42));
        assert_eq!(loaded.anilist.status_auto_update, AutoUpdateMode::AfterThreshold);
        assert_eq!(loaded.anilist.website(5114).map(|s| s.as_str()), Some("https://example.org/fmab"));
    }

    #[test]
    fn test_defaults_from_sparse_file() {
        let config: Config = toml::from_str("mode = \"mal\"\n").unwrap();
        assert_eq!(config.mode, AppMode::Mal);
        assert_eq!(config.display.max_visible_entries, 20);
        assert_eq!(config.display.status_filter, StatusFilter::Only(ListStatus::Watching));
        assert_eq!(config.anilist.status_auto_update, AutoUpdateMode::Normal);
        assert!(config.anilist.selected_id.is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.mode, AppMode::Anilist);
        assert!(config.anilist.websites.is_empty());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.display.max_visible_entries = 0;
        assert!(config.validate().is_err());

        config.display.max_visible_entries = -1;
        config.anilist.websites.insert("not-an-id".to_string(), "https://x".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_websites_sorted_by_id() {
        let mut anilist = AniListConfig::default();
        anilist.set_website(300, "c".to_string());
        anilist.set_website(20, "b".to_string());
        anilist.set_website(1, "a".to_string());
        let ids: Vec<u64> = anilist.websites().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 20, 300]);
        assert_eq!(anilist.clear_website(20), Some("b".to_string()));
        assert!(anilist.website(20).is_none());
    }
}
