use alist_models::Entry;
use tracing::debug;

use crate::error::SyncError;

/// Interactive pick among entry labels. `None` means the user aborted.
pub trait Chooser {
    fn choose(&self, prompt: &str, items: &[String]) -> Option<usize>;
}

/// One-line label shown by the chooser.
pub fn entry_label(entry: &Entry) -> String {
    format!(
        "{} [{} {}]",
        entry.title.display(),
        entry.status,
        entry.progress_label()
    )
}

/// Case-insensitive substring match on the romaji, english and native titles.
///
/// Only a single match is accepted; several matches are reported with their
/// `list_id`s and never narrowed down here.
pub fn match_unique<'a>(search: &str, entries: &'a [Entry]) -> Result<&'a Entry, SyncError> {
    let needle = search.trim().to_lowercase();
    let matches: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.title.search_text().to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(SyncError::NoMatch(search.to_string())),
        [only] => Ok(only),
        many => Err(SyncError::AmbiguousInput {
            search: search.to_string(),
            candidates: many.iter().map(|e| e.list_id).collect(),
        }),
    }
}

/// Resolve a search to one entry, asking the chooser when the text alone is
/// not enough.
pub fn resolve<'a>(
    search: &str,
    entries: &'a [Entry],
    chooser: &dyn Chooser,
) -> Result<&'a Entry, SyncError> {
    if search.trim().is_empty() {
        return choose_among(search, "Select an entry", entries.iter().collect(), chooser);
    }

    match match_unique(search, entries) {
        Ok(entry) => Ok(entry),
        Err(SyncError::AmbiguousInput { candidates, .. }) => {
            debug!("'{}' is ambiguous ({} candidates)", search, candidates.len());
            let pool = entries
                .iter()
                .filter(|e| candidates.contains(&e.list_id))
                .collect();
            choose_among(search, &format!("Several entries match '{}'", search.trim()), pool, chooser)
        }
        Err(SyncError::NoMatch(_)) => {
            debug!("'{}' matched nothing, offering the full list", search);
            choose_among(
                search,
                &format!("Nothing matches '{}'; pick an entry", search.trim()),
                entries.iter().collect(),
                chooser,
            )
        }
        Err(other) => Err(other),
    }
}

fn choose_among<'a>(
    search: &str,
    prompt: &str,
    pool: Vec<&'a Entry>,
    chooser: &dyn Chooser,
) -> Result<&'a Entry, SyncError> {
    if pool.is_empty() {
        return Err(SyncError::NoMatch(search.to_string()));
    }
    let labels: Vec<String> = pool.iter().map(|e| entry_label(e)).collect();
    chooser
        .choose(prompt, &labels)
        .and_then(|index| pool.get(index).copied())
        .ok_or_else(|| SyncError::NoMatch(search.to_string()))
}
