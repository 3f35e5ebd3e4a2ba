use crate::output::Output;
use alist_config::PathManager;
use alist_core::CacheStore;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use std::fs;

pub async fn run_clear(all: bool, cache: bool, credentials: bool, output: &Output) -> Result<()> {
    if !(all || cache || credentials) {
        output.warn("No clear option specified. Use --cache, --credentials, or --all");
        output.info("\nExample: alist clear --cache");
        return Ok(());
    }

    // Config and credentials are not parsed here
    let path_manager = PathManager::default();

    if all || cache {
        clear_cache(&path_manager, output)?;
    }
    if all || credentials {
        clear_credentials(&path_manager, output)?;
    }
    if all {
        output.success("List cache and credentials cleared");
    }
    Ok(())
}

fn clear_cache(path_manager: &PathManager, output: &Output) -> Result<()> {
    let store = CacheStore::new(path_manager);
    let path = store.path().to_path_buf();
    let removed = store
        .clear()
        .wrap_err_with(|| format!("Failed to remove list cache at {}", path.display()))?;
    if removed {
        output.success(format!("Cleared list cache: {}", path.display()));
    } else {
        output.info("No list cache found to clear");
    }
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
