use crate::error::SourceError;
use crate::traits::CatalogService;
use alist_models::Themes;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

// Jikan mirrors MyAnimeList without authentication
const API_BASE: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Deserialize)]
struct ThemesResponse {
    data: RawThemes,
}

#[derive(Debug, Deserialize)]
struct RawThemes {
    #[serde(default)]
    openings: Vec<String>,
    #[serde(default)]
    endings: Vec<String>,
}

fn into_themes(raw: RawThemes) -> Themes {
    let clean = |items: Vec<String>| -> Vec<String> {
        items
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    };
    Themes {
        openings: clean(raw.openings),
        endings: clean(raw.endings),
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Arc<Client>,
    base_url: String,
}

impl JikanClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(crate::anilist::client::create_anilist_client()),
            base_url: API_BASE.to_string(),
        }
    }
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for JikanClient {
    async fn themes(&self, external_id: u64) -> Result<Themes, SourceError> {
        let url = format!("{}/anime/{}/themes", self.base_url, external_id);
        debug!(%url, "Fetching themes");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, external_id, "Jikan API error");
            return Err(SourceError::Api { status, message });
        }

        let body: ThemesResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(into_themes(body.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_themes() {
        let body = r#"{"data": {"openings": ["1: \"Guren no Yumiya\" by Linked Horizon (eps 1-13)  ", ""], "endings": []}}"#;
        let parsed: ThemesResponse = serde_json::from_str(body).unwrap();
        let themes = into_themes(parsed.data);
        assert_eq!(themes.openings, vec!["1: \"Guren no Yumiya\" by Linked Horizon (eps 1-13)".to_string()]);
        assert!(themes.endings.is_empty());
    }
}
