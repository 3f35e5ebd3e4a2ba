pub mod api;
pub mod auth;
pub mod client;

pub use auth::{authorize_url, normalize_token};
pub use client::AniListClient;
