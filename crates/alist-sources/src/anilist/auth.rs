const AUTH_URL: &str = "https://anilist.co/api/v2/oauth/authorize";

/// Implicit-grant URL; AniList shows the access token on the page it
/// redirects to, and the user pastes it back into `alist auth`.
pub fn authorize_url(client_id: &str) -> String {
    format!(
        "{}?client_id={}&response_type=token",
        AUTH_URL,
        urlencoding::encode(client_id.trim())
    )
}

/// Strip whitespace and an optional `Bearer ` prefix from a pasted token.
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))
        .unwrap_or(trimmed)
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url() {
        assert_eq!(
            authorize_url(" 1234 "),
            "https://anilist.co/api/v2/oauth/authorize?client_id=1234&response_type=token"
        );
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("  abc.def \n"), Some("abc.def".to_string()));
        assert_eq!(normalize_token("Bearer abc"), Some("abc".to_string()));
        assert_eq!(normalize_token("   "), None);
    }
}
