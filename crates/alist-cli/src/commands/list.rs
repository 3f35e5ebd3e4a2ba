use super::session::Session;
use super::ListArgs;
use crate::output::Output;
use alist_core::{list_view, visible_count};
use alist_models::StatusFilter;
use color_eyre::Result;

pub async fn run_list(args: &ListArgs, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;

    let display = &session.config.display;
    let filter = match &args.status {
        Some(text) => text.parse::<StatusFilter>()?,
        None => display.status_filter,
    };

    let rows = list_view(&cache, &filter);
    let count = visible_count(args.max, display.max_visible_entries, args.all, rows.len());
    tracing::debug!(filter = %filter, shown = count, total = rows.len(), "Listing entries");

    output.entry_list(&rows[..count], session.config.anilist.selected_id);
    Ok(())
}
