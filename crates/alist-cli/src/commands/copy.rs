use super::prompts::choose_string;
use super::session::Session;
use super::ListArgs;
use crate::output::Output;
use clap::ValueEnum;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyTarget {
    Title,
    Url,
}

pub async fn run_copy(args: &ListArgs, target: CopyTarget, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;
    let entry = session.selected(&cache)?;

    let text = match target {
        CopyTarget::Title => choose_string("Select desired title", &entry.alternative_titles())?,
        CopyTarget::Url => entry
            .external_media_id
            .and_then(|id| session.config.anilist.website(id))
            .cloned()
            .ok_or_else(|| eyre!("no url to copy"))?,
    };

    let mut clipboard = arboard::Clipboard::new().wrap_err("Clipboard is not available")?;
    clipboard
        .set_text(text.clone())
        .wrap_err("Failed to copy into clipboard")?;

    output.success(format!("Text {} copied into clipboard", text.bright_yellow()));
    Ok(())
}
