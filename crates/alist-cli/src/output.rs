use alist_models::Entry;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": kind, "message": msg }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Title, status, episodes and score of one entry.
    pub fn entry_details(&self, entry: &Entry) {
        if self.quiet {
            return;
        }
        if !self.is_human() {
            self.json(&json!({ "type": "entry", "entry": entry }));
            return;
        }
        println!("Title:  {}", entry.title.display().bright_yellow());
        println!("Status: {}", entry.status.cyan());
        println!("Eps:    {}", entry.progress_label().cyan());
        println!("Score:  {}", entry.score.cyan());
    }

    /// Same as [`Output::entry_details`] but shows the episode change.
    pub fn entry_progress_change(&self, entry: &Entry, progress_before: u32) {
        if self.quiet || !self.is_human() {
            self.entry_details(entry);
            return;
        }
        println!("Title:  {}", entry.title.display().bright_yellow());
        println!("Status: {}", entry.status.cyan());
        println!(
            "Eps:    {} -> {}",
            progress_before.to_string().red(),
            entry.progress_label().cyan()
        );
        println!("Score:  {}", entry.score.cyan());
    }

    /// Numbered list, printed bottom-up so the most recent entry ends up
    /// next to the prompt.
    pub fn entry_list(&self, rows: &[&Entry], selected_id: Option<u64>) {
        if !self.is_human() {
            self.json(&json!({ "type": "list", "entries": rows }));
            return;
        }
        if self.quiet {
            return;
        }

        println!("{:<3}{:>61}{:>8}{:>6}", "No", "Title", "Eps", "Score");
        println!("{}", "=".repeat(78));
        for (i, entry) in rows.iter().enumerate().rev() {
            let line = format!(
                "{:<3}{:>61.61}{:>8}{:>6}",
                i + 1,
                entry.title.display(),
                entry.progress_label(),
                entry.score
            );
            if Some(entry.list_id) == selected_id {
                println!("{}", line.bright_yellow());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Human-readable span such as `2d 3h 15m`.
pub fn format_duration(seconds: i64) -> String {
    let total = seconds.unsigned_abs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let secs = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
