use super::prompts::choose_string;
use super::session::{open_url, Session};
use super::ListArgs;
use crate::output::Output;
use alist_models::Entry;
use alist_sources::nyaa;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

fn external_id(entry: &Entry) -> Result<u64> {
    entry.external_media_id.ok_or_else(|| {
        eyre!(
            "'{}' has no MyAnimeList id; website overrides are keyed by it",
            entry.title.display()
        )
    })
}

/// Set, clear or open the website stored for the selected entry.
pub async fn run_web(args: &ListArgs, url: Option<String>, clear: bool, output: &Output) -> Result<()> {
    let mut session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;
    let entry = session.selected(&cache)?;
    let id = external_id(entry)?;

    if let Some(url) = url {
        let url = url.trim().to_string();
        if url.is_empty() {
            return Err(eyre!("website URL must not be empty"));
        }
        session.config.anilist.set_website(id, url.clone());
        session.save_config()?;
        output.success(format!("Website set for {}", entry.title.display()));
        output.info(format!("URL: {}", url.bright_red()));
        return Ok(());
    }

    if clear {
        match session.config.anilist.clear_website(id) {
            Some(_) => {
                session.save_config()?;
                output.success("Entry cleared");
            }
            None => output.info("No website stored for this entry"),
        }
        return Ok(());
    }

    match session.config.anilist.website(id) {
        Some(url) => {
            open_url(url, session.config.browser_path.as_deref())?;
            output.success("Opened website for:");
            output.entry_details(entry);
            output.info(format!("URL: {}", url.cyan()));
        }
        None => output.info("Nothing to open"),
    }
    Ok(())
}

/// Print every stored website with the title it belongs to.
pub async fn run_web_get_all(args: &ListArgs, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;

    let websites = session.config.anilist.websites();
    if !output.is_human() {
        let items: Vec<_> = websites
            .iter()
            .map(|(id, url)| {
                json!({
                    "external_media_id": id,
                    "title": cache.find_by_external_id(*id).map(|e| e.title.display()),
                    "url": url,
                })
            })
            .collect();
        output.json(&json!({ "type": "websites", "websites": items }));
        return Ok(());
    }

    if websites.is_empty() {
        output.info("No websites stored");
        return Ok(());
    }
    for (id, url) in websites {
        let title = cache
            .find_by_external_id(id)
            .map(|e| e.title.display())
            .unwrap_or("");
        output.info(format!("{:>6} ({}): {}", id, title, url.bright_red()));
    }
    Ok(())
}

/// Torrent search for the selected entry on nyaa.si.
pub async fn run_nyaa(args: &ListArgs, alt: bool, print: bool, output: &Output) -> Result<()> {
    let session = Session::open()?;
    session.require_anilist_mode()?;
    let cache = session.load_list(args, output).await?;
    let entry = session.selected(&cache)?;

    let term = if alt {
        choose_string("Select desired title", &entry.alternative_titles())?
    } else if !entry.title.romaji.is_empty() {
        entry.title.romaji.clone()
    } else {
        entry.title.display().to_string()
    };
    let address = nyaa::search_url(&term);

    if print {
        if output.is_human() {
            println!("{}", address);
        } else {
            output.json(&json!({ "type": "url", "url": address, "term": term }));
        }
        return Ok(());
    }

    open_url(&address, session.config.browser_path.as_deref())?;
    output.success(format!("Searched for: {}", term));
    output.entry_details(entry);
    Ok(())
}
