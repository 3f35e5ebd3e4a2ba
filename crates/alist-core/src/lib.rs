pub mod cache;
pub mod error;
pub mod listing;
pub mod policy;
pub mod selection;
pub mod sync;

#[cfg(test)]
mod testing;

pub use cache::{load, CacheStore, ListCache, LoadOutcome};
pub use error::SyncError;
pub use listing::{list_view, visible_count};
pub use selection::{entry_label, match_unique, resolve, Chooser};
pub use sync::{parse_number, select, Mutation, SyncController, Target, UpdateOutcome, MAX_SCORE};
