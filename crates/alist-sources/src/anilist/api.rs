use alist_models::{AiringInfo, AiringSchedule, Entry, EntryUpdate, ListStatus, MediaTitle, SavedEntry, Viewer};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;

pub const API_URL: &str = "https://graphql.anilist.co";

const USER_LIST_QUERY: &str = r#"
query UserList ($userID: Int) {
    MediaListCollection (userId: $userID, type: ANIME) {
        lists {
            entries {
                id
                status
                score(format: POINT_10)
                progress
                updatedAt
                media {
                    id
                    idMal
                    title { romaji english native userPreferred }
                    episodes
                    synonyms
                    nextAiringEpisode { airingAt episode }
                }
            }
            name
        }
    }
}
"#;

const VIEWER_QUERY: &str = r#"
query {
    Viewer {
        id
        name
    }
}
"#;

const SAVE_ENTRY_MUTATION: &str = r#"
mutation ($listId: Int, $mediaId: Int, $status: MediaListStatus, $progress: Int, $score: Float) {
    SaveMediaListEntry (id: $listId, mediaId: $mediaId, status: $status, progress: $progress, score: $score) {
        id
        status
        progress
        score
        updatedAt
    }
}
"#;

const AIRING_SCHEDULE_QUERY: &str = r#"
query ($mediaId: Int, $episode: Int) {
    AiringSchedule (mediaId: $mediaId, episode: $episode) {
        id
        airingAt
        timeUntilAiring
        episode
        mediaId
    }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    #[serde(rename = "Viewer")]
    viewer: RawViewer,
}

#[derive(Debug, Deserialize)]
struct RawViewer {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListCollectionData {
    #[serde(rename = "MediaListCollection")]
    collection: RawCollection,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    lists: Vec<RawList>,
}

#[derive(Debug, Deserialize)]
struct RawList {
    #[serde(default)]
    entries: Vec<RawEntry>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    id: u64,
    status: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    progress: u32,
    #[serde(default)]
    updated_at: i64,
    media: RawMedia,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMedia {
    id: u64,
    #[serde(default)]
    id_mal: Option<u64>,
    title: RawTitle,
    #[serde(default)]
    episodes: Option<u32>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    next_airing_episode: Option<RawNextAiring>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTitle {
    romaji: Option<String>,
    english: Option<String>,
    native: Option<String>,
    user_preferred: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNextAiring {
    airing_at: i64,
    episode: u32,
}

#[derive(Debug, Deserialize)]
struct SaveEntryData {
    #[serde(rename = "SaveMediaListEntry")]
    saved: RawSavedEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSavedEntry {
    id: u64,
    status: String,
    #[serde(default)]
    progress: u32,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct AiringScheduleData {
    #[serde(rename = "AiringSchedule")]
    schedule: RawAiringSchedule,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAiringSchedule {
    airing_at: i64,
    time_until_airing: i64,
    episode: u32,
    media_id: u64,
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn parse_status(raw: &str) -> Result<ListStatus, SourceError> {
    ListStatus::from_api_name(raw)
        .ok_or_else(|| SourceError::Parse(format!("unknown list status '{}'", raw)))
}

/// AniList scores in POINT_10 format arrive as floats
fn score_from_api(raw: f64) -> u8 {
    raw.round().clamp(0.0, 10.0) as u8
}

impl RawEntry {
    fn into_entry(self) -> Result<Entry, SourceError> {
        let title = MediaTitle {
            romaji: self.media.title.romaji.unwrap_or_default(),
            english: self.media.title.english.unwrap_or_default(),
            native: self.media.title.native.unwrap_or_default(),
            user_preferred: self.media.title.user_preferred.unwrap_or_default(),
        };
        Ok(Entry {
            list_id: self.id,
            media_id: self.media.id,
            external_media_id: self.media.id_mal,
            title,
            synonyms: self.media.synonyms,
            status: parse_status(&self.status)?,
            progress: self.progress,
            score: score_from_api(self.score),
            total_units: self.media.episodes.unwrap_or(0),
            updated_at: timestamp(self.updated_at),
            next_airing: self.media.next_airing_episode.map(|n| AiringInfo {
                airing_at: timestamp(n.airing_at),
                episode: n.episode,
            }),
        })
    }
}

/// Decode a GraphQL body, classifying token rejections as `Unauthorized`.
fn decode<T: DeserializeOwned>(operation: &str, status: u16, body: &str) -> Result<T, SourceError> {
    let parsed: GraphQlResponse<T> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            if status == 401 {
                return Err(SourceError::Unauthorized(body.to_string()));
            }
            if !(200..300).contains(&status) {
                return Err(SourceError::Api { status, message: body.to_string() });
            }
            return Err(SourceError::Parse(format!("{}: {}", operation, e)));
        }
    };

    if !parsed.errors.is_empty() {
        let unauthorized = status == 401
            || parsed.errors.iter().any(|e| {
                e.status == Some(401) || e.message.to_lowercase().contains("invalid token")
            });
        let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
        warn!(operation, status, errors = ?messages, "AniList returned errors");
        if unauthorized {
            return Err(SourceError::Unauthorized(messages.join("; ")));
        }
        return Err(SourceError::GraphQl(messages));
    }

    if status == 401 {
        return Err(SourceError::Unauthorized(body.to_string()));
    }

    parsed
        .data
        .ok_or_else(|| SourceError::Parse(format!("{}: response has no data", operation)))
}

async fn graphql_request<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
) -> Result<T, SourceError> {
    debug!(operation, "AniList GraphQL request");

    let response = client
        .post(API_URL)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .json(&serde_json::json!({
            "query": query,
            "variables": variables,
        }))
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    debug!(operation, status, bytes = body.len(), "AniList response received");
    decode(operation, status, &body)
}

pub async fn get_viewer(client: &Client, token: &str) -> Result<Viewer, SourceError> {
    let data: ViewerData =
        graphql_request(client, token, "Viewer", VIEWER_QUERY, serde_json::json!({})).await?;
    Ok(Viewer {
        id: data.viewer.id,
        name: data.viewer.name,
    })
}

pub async fn get_user_list(client: &Client, token: &str, user_id: u64) -> Result<Vec<Entry>, SourceError> {
    let data: ListCollectionData = graphql_request(
        client,
        token,
        "UserList",
        USER_LIST_QUERY,
        serde_json::json!({ "userID": user_id }),
    )
    .await?;
    flatten_lists(data.collection)
}

/// Entries of custom lists also appear in their status list; keep the first
/// occurrence so every `list_id` is unique.
fn flatten_lists(collection: RawCollection) -> Result<Vec<Entry>, SourceError> {
    let mut entries: Vec<Entry> = Vec::new();
    for list in collection.lists {
        debug!(list = list.name.as_deref().unwrap_or("?"), entries = list.entries.len(), "AniList list");
        for raw in list.entries {
            if entries.iter().any(|e| e.list_id == raw.id) {
                continue;
            }
            entries.push(raw.into_entry()?);
        }
    }
    Ok(entries)
}

pub async fn save_entry(client: &Client, token: &str, update: &EntryUpdate) -> Result<SavedEntry, SourceError> {
    let data: SaveEntryData = graphql_request(
        client,
        token,
        "SaveMediaListEntry",
        SAVE_ENTRY_MUTATION,
        serde_json::json!({
            "listId": update.list_id,
            "mediaId": update.media_id,
            "status": update.status.api_name(),
            "progress": update.progress,
            "score": update.score as f64,
        }),
    )
    .await?;

    let saved = data.saved;
    Ok(SavedEntry {
        list_id: saved.id,
        status: parse_status(&saved.status)?,
        progress: saved.progress,
        score: score_from_api(saved.score),
        updated_at: timestamp(saved.updated_at),
    })
}

pub async fn get_airing_schedule(
    client: &Client,
    token: &str,
    media_id: u64,
    episode: u32,
) -> Result<AiringSchedule, SourceError> {
    let data: AiringScheduleData = graphql_request(
        client,
        token,
        "AiringSchedule",
        AIRING_SCHEDULE_QUERY,
        serde_json::json!({ "mediaId": media_id, "episode": episode }),
    )
    .await?;

    let raw = data.schedule;
    Ok(AiringSchedule {
        media_id: raw.media_id,
        episode: raw.episode,
        airing_at: timestamp(raw.airing_at),
        time_until_airing: raw.time_until_airing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"{
        "data": {
            "MediaListCollection": {
                "lists": [
                    {
                        "name": "Watching",
                        "entries": [
                            {
                                "id": 101,
                                "status": "CURRENT",
                                "score": 8.0,
                                "progress": 11,
                                "updatedAt": 1700000000,
                                "media": {
                                    "id": 16498,
                                    "idMal": 16498,
                                    "title": {
                                        "romaji": "Shingeki no Kyojin",
                                        "english": "Attack on Titan",
                                        "native": "進撃の巨人",
                                        "userPreferred": "Shingeki no Kyojin"
                                    },
                                    "episodes": 25,
                                    "synonyms": ["AoT"],
                                    "nextAiringEpisode": null
                                }
                            }
                        ]
                    },
                    {
                        "name": "Favourites",
                        "entries": [
                            {
                                "id": 101,
                                "status": "CURRENT",
                                "score": 8.0,
                                "progress": 11,
                                "updatedAt": 1700000000,
                                "media": {
                                    "id": 16498,
                                    "idMal": 16498,
                                    "title": { "romaji": "Shingeki no Kyojin", "english": null, "native": null, "userPreferred": null },
                                    "episodes": 25
                                }
                            },
                            {
                                "id": 102,
                                "status": "PLANNING",
                                "score": 0,
                                "progress": 0,
                                "updatedAt": 1700000100,
                                "media": {
                                    "id": 170942,
                                    "idMal": null,
                                    "title": { "romaji": "Sousou no Frieren", "english": null, "native": null, "userPreferred": "Sousou no Frieren" },
                                    "episodes": null,
                                    "nextAiringEpisode": { "airingAt": 1700600000, "episode": 3 }
                                }
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_decode_user_list_dedupes_custom_lists() {
        let data: ListCollectionData = decode("UserList", 200, LIST_BODY).unwrap();
        let entries = flatten_lists(data.collection).unwrap();

        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.list_id, 101);
        assert_eq!(first.status, ListStatus::Watching);
        assert_eq!(first.score, 8);
        assert_eq!(first.total_units, 25);
        assert_eq!(first.title.english, "Attack on Titan");
        assert_eq!(first.updated_at.timestamp(), 1700000000);

        let second = &entries[1];
        assert_eq!(second.external_media_id, None);
        assert_eq!(second.total_units, 0);
        assert_eq!(second.title.english, "");
        assert_eq!(second.next_airing.map(|n| n.episode), Some(3));
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let body = r#"{"data": null, "errors": [{"message": "Invalid token", "status": 400}]}"#;
        let err = decode::<ViewerData>("Viewer", 400, body).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_other_graphql_errors_are_reported() {
        let body = r#"{"data": null, "errors": [{"message": "Not Found.", "status": 404}]}"#;
        let err = decode::<AiringScheduleData>("AiringSchedule", 404, body).unwrap_err();
        assert!(matches!(err, SourceError::GraphQl(ref m) if m == &vec!["Not Found.".to_string()]));
    }

    #[test]
    fn test_non_json_error_body() {
        let err = decode::<ViewerData>("Viewer", 502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 502, .. }));
    }

    #[test]
    fn test_decode_saved_entry() {
        let body = r#"{"data": {"SaveMediaListEntry": {"id": 101, "status": "COMPLETED", "progress": 12, "score": 9.4, "updatedAt": 1700000500}}}"#;
        let data: SaveEntryData = decode("SaveMediaListEntry", 200, body).unwrap();
        assert_eq!(data.saved.id, 101);
        assert_eq!(parse_status(&data.saved.status).unwrap(), ListStatus::Completed);
        assert_eq!(score_from_api(data.saved.score), 9);
    }
}
