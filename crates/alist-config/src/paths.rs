use anyhow::Result;
use dirs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Base directory override, mainly for tests and portable installs
pub const HOME_ENV: &str = "ALIST_HOME";

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("alist");

        Ok(Self::with_base(base_dir))
    }

    /// Config files at the base level, the list snapshot under `data/`
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    pub fn list_cache_file(&self) -> PathBuf {
        self.cache_dir().join("anilist_list.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Ok(base) = std::env::var(HOME_ENV) {
            if !base.is_empty() {
                return Self::with_base(PathBuf::from(base));
            }
        }

        // Platform-specific paths (e.g., ~/.config/alist on Linux)
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".alist")))
    }
}

/// Replace `path` with `contents` so that readers see either the old or the
/// new file, never a torn write.
///
/// The temp file lives next to the target so the final rename stays on one
/// filesystem.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let result = (|| {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/alist-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/alist-test/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/alist-test/credentials.toml"));
        assert_eq!(paths.config_dir(), Path::new("/tmp/alist-test"));
        assert_eq!(
            paths.list_cache_file(),
            PathBuf::from("/tmp/alist-test/data/cache/anilist_list.json")
        );
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("snapshot.json");

        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"second");
        let leftovers: Vec<_> = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(write_atomic(&blocker.join("snapshot.json"), b"data").is_err());
    }
}
