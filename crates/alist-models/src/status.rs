use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of an entry on the user's list.
///
/// Serialized with the AniList `MediaListStatus` names so the snapshot and the
/// wire format agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListStatus {
    #[serde(rename = "CURRENT")]
    Watching,
    Planning,
    Completed,
    Repeating,
    Paused,
    Dropped,
}

pub const STATUS_CHOICES: &str = "watching|planning|completed|dropped|paused|repeating";

impl ListStatus {
    pub const ALL: [ListStatus; 6] = [
        ListStatus::Watching,
        ListStatus::Planning,
        ListStatus::Completed,
        ListStatus::Repeating,
        ListStatus::Paused,
        ListStatus::Dropped,
    ];

    /// Name used by the AniList API.
    pub fn api_name(&self) -> &'static str {
        match self {
            ListStatus::Watching => "CURRENT",
            ListStatus::Planning => "PLANNING",
            ListStatus::Completed => "COMPLETED",
            ListStatus::Repeating => "REPEATING",
            ListStatus::Paused => "PAUSED",
            ListStatus::Dropped => "DROPPED",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.api_name() == name)
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListStatus::Watching => "watching",
            ListStatus::Planning => "planning",
            ListStatus::Completed => "completed",
            ListStatus::Repeating => "repeating",
            ListStatus::Paused => "paused",
            ListStatus::Dropped => "dropped",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    input: String,
}

impl ParseStatusError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status '{}'; possible values: {}", self.input, STATUS_CHOICES)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for ListStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watching" | "current" => Ok(ListStatus::Watching),
            "planning" | "plan" => Ok(ListStatus::Planning),
            "completed" => Ok(ListStatus::Completed),
            "repeating" | "rewatching" => Ok(ListStatus::Repeating),
            "paused" | "onhold" | "on-hold" => Ok(ListStatus::Paused),
            "dropped" => Ok(ListStatus::Dropped),
            _ => Err(ParseStatusError { input: s.to_string() }),
        }
    }
}

/// Filter applied when listing entries. `All` never appears on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ListStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ListStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::Only(ListStatus::Watching)
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How progress changes feed back into the entry status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AutoUpdateMode {
    Off,
    #[default]
    Normal,
    AfterThreshold,
}

impl FromStr for AutoUpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "off" => Ok(AutoUpdateMode::Off),
            "normal" => Ok(AutoUpdateMode::Normal),
            "after_threshold" | "threshold" => Ok(AutoUpdateMode::AfterThreshold),
            _ => Err(format!("Invalid auto-update mode: {}. Use 'off', 'normal' or 'after-threshold'", s)),
        }
    }
}

impl fmt::Display for AutoUpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoUpdateMode::Off => f.write_str("off"),
            AutoUpdateMode::Normal => f.write_str("normal"),
            AutoUpdateMode::AfterThreshold => f.write_str("after-threshold"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_aliases() {
        assert_eq!("Watching".parse::<ListStatus>().unwrap(), ListStatus::Watching);
        assert_eq!("current".parse::<ListStatus>().unwrap(), ListStatus::Watching);
        assert_eq!(" paused ".parse::<ListStatus>().unwrap(), ListStatus::Paused);
        assert_eq!("REPEATING".parse::<ListStatus>().unwrap(), ListStatus::Repeating);
    }

    #[test]
    fn test_all_is_not_a_list_status() {
        let err = "all".parse::<ListStatus>().unwrap_err();
        assert_eq!(err.input(), "all");
        assert!(err.to_string().contains(STATUS_CHOICES));
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(ListStatus::Dropped));
        assert!(StatusFilter::default().matches(ListStatus::Watching));
        assert!(!StatusFilter::default().matches(ListStatus::Planning));
        let filter: StatusFilter = "completed".parse().unwrap();
        assert!(filter.matches(ListStatus::Completed));
        assert!(!filter.matches(ListStatus::Watching));
    }

    #[test]
    fn test_api_names_round_trip() {
        for status in ListStatus::ALL {
            assert_eq!(ListStatus::from_api_name(status.api_name()), Some(status));
        }
        let json = serde_json::to_string(&ListStatus::Watching).unwrap();
        assert_eq!(json, "\"CURRENT\"");
    }

    #[test]
    fn test_auto_update_mode_parse() {
        assert_eq!("after-threshold".parse::<AutoUpdateMode>().unwrap(), AutoUpdateMode::AfterThreshold);
        assert_eq!("OFF".parse::<AutoUpdateMode>().unwrap(), AutoUpdateMode::Off);
        assert!("sometimes".parse::<AutoUpdateMode>().is_err());
    }
}
