pub mod anilist;
pub mod error;
pub mod jikan;
pub mod nyaa;
pub mod traits;

pub use anilist::AniListClient;
pub use error::SourceError;
pub use jikan::JikanClient;
pub use traits::{CatalogService, ListService};
