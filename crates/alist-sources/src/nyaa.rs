const SEARCH_URL: &str = "https://nyaa.si/";

/// Torrent search restricted to English-translated anime (category 1_2).
pub fn search_url(term: &str) -> String {
    format!("{}?f=0&c=1_2&q={}", SEARCH_URL, urlencoding::encode(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_escapes_term() {
        assert_eq!(
            search_url("Sousou no Frieren: 2"),
            "https://nyaa.si/?f=0&c=1_2&q=Sousou%20no%20Frieren%3A%202"
        );
    }
}
