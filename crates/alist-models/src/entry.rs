use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::status::ListStatus;

/// Name variants of a media title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub native: String,
    #[serde(default)]
    pub user_preferred: String,
}

impl MediaTitle {
    /// Concatenation searched by substring selection.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.romaji, self.english, self.native)
    }

    pub fn display(&self) -> &str {
        [&self.user_preferred, &self.romaji, &self.english, &self.native]
            .into_iter()
            .find(|t| !t.is_empty())
            .map(|t| t.as_str())
            .unwrap_or("")
    }
}

/// Snapshot of the next scheduled episode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiringInfo {
    pub airing_at: DateTime<Utc>,
    pub episode: u32,
}

/// One item of the user's anime list.
///
/// `list_id` identifies the list-membership record, `media_id` the anime
/// itself and `external_media_id` the MyAnimeList entry (used for theme
/// lookups and website overrides).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub list_id: u64,
    pub media_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_media_id: Option<u64>,
    pub title: MediaTitle,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub status: ListStatus,
    pub progress: u32,
    pub score: u8,
    /// 0 while the total is unknown (e.g. still airing)
    pub total_units: u32,
    pub updated_at: DateTime<Utc>,
    /// Filled from the last fetch or airing query; never written to the snapshot
    #[serde(skip)]
    pub next_airing: Option<AiringInfo>,
}

impl Entry {
    /// Every distinct non-empty title, romaji first.
    pub fn alternative_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = Vec::new();
        let candidates = [
            &self.title.romaji,
            &self.title.english,
            &self.title.native,
            &self.title.user_preferred,
        ]
        .into_iter()
        .chain(self.synonyms.iter());
        for title in candidates {
            let trimmed = title.trim();
            if !trimmed.is_empty() && !titles.iter().any(|t| t == trimmed) {
                titles.push(trimmed.to_string());
            }
        }
        titles
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.progress, self.total_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry {
            list_id: 1,
            media_id: 5114,
            external_media_id: Some(5114),
            title: MediaTitle {
                romaji: "Hagane no Renkinjutsushi: FULLMETAL ALCHEMIST".to_string(),
                english: "Fullmetal Alchemist: Brotherhood".to_string(),
                native: "鋼の錬金術師 FULLMETAL ALCHEMIST".to_string(),
                user_preferred: "Hagane no Renkinjutsushi: FULLMETAL ALCHEMIST".to_string(),
            },
            synonyms: vec!["FMA:B".to_string(), "Fullmetal Alchemist: Brotherhood".to_string()],
            status: ListStatus::Watching,
            progress: 3,
            score: 0,
            total_units: 64,
            updated_at: Utc::now(),
            next_airing: None,
        }
    }

    #[test]
    fn test_alternative_titles_are_distinct() {
        let titles = entry().alternative_titles();
        assert_eq!(titles.len(), 4);
        assert_eq!(titles[0], "Hagane no Renkinjutsushi: FULLMETAL ALCHEMIST");
        assert_eq!(titles[3], "FMA:B");
    }

    #[test]
    fn test_display_falls_back_to_romaji() {
        let mut e = entry();
        e.title.user_preferred.clear();
        assert_eq!(e.title.display(), "Hagane no Renkinjutsushi: FULLMETAL ALCHEMIST");
        assert_eq!(e.progress_label(), "3/64");
    }

    #[test]
    fn test_next_airing_is_not_serialized() {
        let mut e = entry();
        e.next_airing = Some(AiringInfo { airing_at: Utc::now(), episode: 4 });

        let json = serde_json::to_string(&e).unwrap();
        assert!(!json.contains("next_airing"));
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.next_airing, None);
        assert_eq!(back.progress, 3);
    }
}
