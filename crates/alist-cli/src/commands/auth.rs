use super::prompts::prompt_token;
use super::session::{open_url, Session};
use super::sync_ui::{is_interactive, with_spinner};
use crate::output::Output;
use alist_core::SyncError;
use alist_sources::anilist::{authorize_url, normalize_token};
use alist_sources::ListService;
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Store an AniList access token after checking it against the API.
pub async fn run_auth(token: Option<String>, output: &Output) -> Result<()> {
    let mut session = Session::open()?;

    let raw = match token {
        Some(token) => token,
        None => {
            if !is_interactive() {
                return Err(eyre!("no terminal to read the token from; pass it with --token"));
            }
            if let Some(client_id) = session.config.anilist.client_id.as_deref() {
                let url = authorize_url(client_id);
                output.info(format!("Authorize alist in your browser:\n  {}", url));
                if let Err(e) = open_url(&url, session.config.browser_path.as_deref()) {
                    tracing::warn!("Could not open browser: {}", e);
                }
            } else {
                output.info("Paste an AniList access token (set anilist.client_id with `alist config set --client-id` to get an authorization link)");
            }
            prompt_token("Access token: ")?
        }
    };

    let token = normalize_token(&raw).ok_or_else(|| eyre!("access token must not be empty"))?;

    let viewer = with_spinner(
        "Verifying token...",
        !output.is_quiet(),
        session.client.viewer(&token),
    )
    .await
    .map_err(SyncError::from)?;

    // A list cached for another account is useless now
    if let Some(cached) = session.store.read() {
        if cached.viewer.as_ref().is_some_and(|v| v.id != viewer.id) {
            session.store.clear()?;
            session.config.anilist.selected_id = None;
            session.save_config()?;
            output.info("Cleared the list cached for the previous account");
        }
    }

    session.credentials.set_anilist_access_token(token);
    session
        .credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Authenticated as {}", viewer.name));
    Ok(())
}
