use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::write_atomic;

/// On-disk layout of `credentials.toml`.
///
/// ```toml
/// [anilist]
/// access_token = "..."
/// saved_at = "2025-06-01T12:00:00Z"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
struct CredentialsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anilist: Option<AniListToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct AniListToken {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// Access tokens, kept apart from `config.toml` so the config can be shared.
pub struct CredentialStore {
    path: PathBuf,
    file: CredentialsFile,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: CredentialsFile::default() }
    }

    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        self.file = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.file)?;
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }

    /// Non-empty AniList access token, if one has been stored.
    pub fn get_anilist_access_token(&self) -> Option<&String> {
        self.file
            .anilist
            .as_ref()
            .map(|t| &t.access_token)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn set_anilist_access_token(&mut self, token: String) {
        self.file.anilist = Some(AniListToken { access_token: token, saved_at: Some(Utc::now()) });
    }

    pub fn get_anilist_token_saved_at(&self) -> Option<DateTime<Utc>> {
        self.file.anilist.as_ref().and_then(|t| t.saved_at)
    }

    pub fn clear_anilist(&mut self) {
        self.file.anilist = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_token_survives_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_anilist_access_token("test_token".to_string());
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_anilist_access_token(), Some(&"test_token".to_string()));
        let saved_at = loaded.get_anilist_token_saved_at().unwrap();
        assert!((Utc::now() - saved_at).num_seconds().abs() < 5);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.get_anilist_access_token(), None);
        assert_eq!(store.get_anilist_token_saved_at(), None);
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_anilist_access_token("   ".to_string());
        assert_eq!(store.get_anilist_access_token(), None);
    }

    #[test]
    fn test_clear_anilist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        let mut store = CredentialStore::new(path.clone());
        store.set_anilist_access_token("token".to_string());
        store.clear_anilist();
        store.save().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "");
        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_anilist_access_token(), None);
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "[anilist]\naccess_token = \"abc\"\n").unwrap();

        let mut store = CredentialStore::new(path);
        store.load().unwrap();
        assert_eq!(store.get_anilist_access_token(), Some(&"abc".to_string()));
        assert_eq!(store.get_anilist_token_saved_at(), None);
    }
}
