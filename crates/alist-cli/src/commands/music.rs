use super::session::Session;
use super::sync_ui::with_spinner;
use super::ListArgs;
use crate::output::Output;
use alist_sources::{CatalogService, JikanClient};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

/// Opening and ending themes of the selected entry.
pub async fn run_music(args: &ListArgs, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;
    let entry = session.selected(&cache)?;
    let external_id = entry
        .external_media_id
        .ok_or_else(|| eyre!("'{}' has no MyAnimeList id to look up themes", entry.title.display()))?;

    let catalog = JikanClient::new();
    let themes = with_spinner(
        "Fetching themes...",
        !output.is_quiet(),
        catalog.themes(external_id),
    )
    .await?;

    if !output.is_human() {
        output.json(&json!({ "type": "themes", "title": entry.title.display(), "themes": themes }));
        return Ok(());
    }

    let print_themes = |heading: &str, themes: &[String]| {
        output.info(heading);
        if themes.is_empty() {
            output.info("  none");
        }
        for theme in themes {
            output.info(format!("  {}", theme.bright_yellow()));
        }
    };
    print_themes("Openings:", &themes.openings);
    output.info("");
    print_themes("Endings:", &themes.endings);
    Ok(())
}
