pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AniListConfig, AppMode, Config, DisplayConfig};
pub use credentials::CredentialStore;
pub use paths::{write_atomic, PathManager, HOME_ENV};
