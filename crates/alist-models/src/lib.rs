pub mod entry;
pub mod remote;
pub mod status;

pub use entry::{AiringInfo, Entry, MediaTitle};
pub use remote::{AiringSchedule, EntryUpdate, SavedEntry, Themes, Viewer};
pub use status::{AutoUpdateMode, ListStatus, ParseStatusError, StatusFilter, STATUS_CHOICES};
