use alist_models::{AutoUpdateMode, Entry, ListStatus};

/// Derive the status implied by a progress change.
///
/// Entries with an unknown total (`total_units == 0`) are never touched.
pub fn apply(mode: AutoUpdateMode, mut entry: Entry) -> Entry {
    let total = entry.total_units;
    if mode == AutoUpdateMode::Off || total == 0 {
        return entry;
    }

    let completes = match mode {
        AutoUpdateMode::Normal => entry.progress >= total,
        AutoUpdateMode::AfterThreshold => entry.progress > total,
        AutoUpdateMode::Off => false,
    };

    if completes {
        entry.status = ListStatus::Completed;
        entry.progress = total;
    } else if entry.status == ListStatus::Completed && entry.progress < total {
        entry.status = ListStatus::Watching;
    }

    entry
}
