use super::error::InputError;
use url::Url;

/// Turn the positional argument into a WebSocket URL.
///
/// Input without a `://` separator is treated as a bare host (optionally
/// with port and path) and gets `wss://`, or `ws://` when `insecure` is set.
/// Anything else is parsed as given and must use `ws` or `wss`.
pub fn resolve_target(raw: &str, insecure: bool) -> Result<Url, InputError> {
    let raw = raw.trim();
    let qualified = if raw.contains("://") {
        raw.to_string()
    } else {
        let scheme = if insecure { "ws" } else { "wss" };
        format!("{scheme}://{raw}")
    };

    let url = Url::parse(&qualified).map_err(|source| InputError::InvalidUri {
        input: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "ws" | "wss" => {}
        other => return Err(InputError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(InputError::MissingHost(raw.to_string()));
    }

    tracing::debug!(target_url = %url, "resolved target");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_defaults_to_wss() {
        let url = resolve_target("example.org", false).unwrap();
        assert_eq!(url.as_str(), "wss://example.org/");
    }

    #[test]
    fn test_bare_host_insecure() {
        let url = resolve_target("example.org:8080/feed", true).unwrap();
        assert_eq!(url.scheme(), "ws");
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/feed");
    }

    #[test]
    fn test_explicit_scheme_wins_over_insecure() {
        let url = resolve_target("wss://example.org/ws?x=1", true).unwrap();
        assert_eq!(url.scheme(), "wss");
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            resolve_target("https://example.org", false),
            Err(InputError::UnsupportedScheme(s)) if s == "https"
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            resolve_target("ws://exa mple.org", false),
            Err(InputError::InvalidUri { .. })
        ));
        assert!(resolve_target("", false).is_err());
    }
}
