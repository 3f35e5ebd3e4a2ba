use super::session::Session;
use crate::output::Output;
use alist_models::{AutoUpdateMode, StatusFilter};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

/// Values accepted by `config set`; `None` leaves the field alone.
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub max_visible: Option<i64>,
    pub status_filter: Option<String>,
    pub auto_update: Option<String>,
    pub browser: Option<String>,
    pub client_id: Option<String>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.max_visible.is_none()
            && self.status_filter.is_none()
            && self.auto_update.is_none()
            && self.browser.is_none()
            && self.client_id.is_none()
    }
}

fn styled_table(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

pub async fn show_config(full: bool, output: &Output) -> Result<()> {
    let session = Session::open()?;
    let config = &session.config;
    let token = session.credentials.get_anilist_access_token();

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": session.paths.config_file(),
            "config": config,
            "token_stored": token.is_some(),
            "token_saved_at": session.credentials.get_anilist_token_saved_at(),
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut files = styled_table("Files");
    files.add_row(vec![Cell::new("Config"), Cell::new(session.paths.config_file().display())]);
    files.add_row(vec![Cell::new("Credentials"), Cell::new(session.paths.credentials_file().display())]);
    files.add_row(vec![Cell::new("List cache"), Cell::new(session.store.path().display())]);
    println!("{}", files);
    println!();

    let mut general = styled_table("General");
    general.add_row(vec![Cell::new("Mode"), Cell::new(config.mode)]);
    general.add_row(vec![
        Cell::new("Browser"),
        Cell::new(config.browser_path.as_deref().unwrap_or("<system default>")),
    ]);
    general.add_row(vec![Cell::new("Max visible entries"), Cell::new(config.display.max_visible_entries)]);
    general.add_row(vec![Cell::new("Status filter"), Cell::new(config.display.status_filter)]);
    println!("{}", general);
    println!();

    let anilist = &config.anilist;
    let mut table = styled_table("AniList");
    table.add_row(vec![
        Cell::new("Client ID"),
        Cell::new(anilist.client_id.as_deref().unwrap_or("<not set>")),
    ]);
    let token_display = match token {
        Some(t) if full => t.clone(),
        Some(t) => mask_string(t),
        None => "✗".red().to_string(),
    };
    table.add_row(vec![Cell::new("Access token"), Cell::new(token_display)]);
    if let Some(saved_at) = session.credentials.get_anilist_token_saved_at() {
        table.add_row(vec![Cell::new("Token saved"), Cell::new(saved_at.format("%Y-%m-%d %H:%M UTC"))]);
    }
    table.add_row(vec![
        Cell::new("Selected entry"),
        Cell::new(anilist.selected_id.map_or("<none>".to_string(), |id| id.to_string())),
    ]);
    table.add_row(vec![Cell::new("Status auto-update"), Cell::new(anilist.status_auto_update)]);
    table.add_row(vec![Cell::new("Websites"), Cell::new(anilist.websites.len())]);
    println!("{}", table);
    Ok(())
}

pub async fn set_config(update: ConfigUpdate, output: &Output) -> Result<()> {
    if update.is_empty() {
        output.warn("Nothing to change. See `alist config set --help`");
        return Ok(());
    }

    let mut session = Session::open()?;
    let config = &mut session.config;

    if let Some(max) = update.max_visible {
        config.display.max_visible_entries = max;
    }
    if let Some(filter) = update.status_filter {
        config.display.status_filter = filter.parse::<StatusFilter>()?;
    }
    if let Some(mode) = update.auto_update {
        config.anilist.status_auto_update = mode
            .parse::<AutoUpdateMode>()
            .map_err(|e| eyre!("{}", e))?;
    }
    if let Some(browser) = update.browser {
        let browser = browser.trim().to_string();
        config.browser_path = (!browser.is_empty()).then_some(browser);
    }
    if let Some(client_id) = update.client_id {
        let client_id = client_id.trim().to_string();
        config.anilist.client_id = (!client_id.is_empty()).then_some(client_id);
    }

    session.save_config()?;
    output.success(format!("Configuration saved to {}", session.paths.config_file().display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdefghijkl"), "abcd***ijkl");
    }

    #[test]
    fn test_empty_update() {
        assert!(ConfigUpdate::default().is_empty());
        let update = ConfigUpdate { max_visible: Some(-1), ..Default::default() };
        assert!(!update.is_empty());
    }
}
