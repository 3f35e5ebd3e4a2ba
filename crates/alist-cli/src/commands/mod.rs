pub mod airing;
pub mod auth;
pub mod clear;
pub mod config;
pub mod copy;
pub mod list;
pub mod mode;
pub mod music;
pub mod prompts;
pub mod select;
pub mod session;
pub mod sync_ui;
pub mod update;
pub mod web;

/// Global flags that shape how the list is loaded and shown.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub refresh: bool,
    /// 0 when not given
    pub max: i64,
    pub all: bool,
    pub status: Option<String>,
}
