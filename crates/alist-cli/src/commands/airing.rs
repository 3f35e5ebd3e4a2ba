use super::session::Session;
use super::sync_ui::with_spinner;
use super::ListArgs;
use crate::output::{format_duration, Output};
use chrono::Local;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_airing(args: &ListArgs, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let mut cache = session.load_list(args, output).await?;
    let list_id = session.selected(&cache)?.list_id;

    let controller = session.controller();
    let schedule = with_spinner(
        "Querying airing schedule...",
        !output.is_quiet(),
        controller.next_airing(&mut cache, list_id),
    )
    .await?;

    let title = cache
        .find_by_id(list_id)
        .map(|e| e.title.display().to_string())
        .unwrap_or_default();

    if !output.is_human() {
        output.json(&json!({ "type": "airing", "title": title, "schedule": schedule }));
        return Ok(());
    }

    let airing_at = schedule.airing_at.with_timezone(&Local);
    output.info(format!(
        "Title: {}\nEpisode: {}\nAiring at: {}",
        title.bright_yellow(),
        schedule.episode.cyan(),
        airing_at.format("%H:%M:%S %d-%m-%Y %Z").cyan()
    ));
    let span = format_duration(schedule.time_until_airing);
    if schedule.time_until_airing < 0 {
        output.info(format!("Episode aired {} ago", span.cyan()));
    } else {
        output.info(format!("Time until airing: {}", span.cyan()));
    }
    Ok(())
}
