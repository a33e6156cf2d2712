pub mod render;

use vidmod_core::ClientConfig;

/// Apply `--api-url` on top of the environment configuration.
pub fn apply_api_url_override(
    config: ClientConfig,
    api_url: Option<String>,
) -> anyhow::Result<ClientConfig> {
    let Some(api_url) = api_url else {
        return Ok(config);
    };

    let config = config.with_api_url(api_url);
    if let Err(e) = config.validate() {
        tracing::error!(api_url = %config.api_url, error = %e, "Invalid --api-url");
        return Err(e);
    }
    tracing::info!(api_url = %config.api_url, "Using API URL from command line");
    Ok(config)
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays
/// parseable when `--json` is used.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_override_absent_keeps_config() {
        let config = apply_api_url_override(ClientConfig::default(), None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn api_url_override_is_applied() {
        let config = apply_api_url_override(
            ClientConfig::default(),
            Some(" https://moderation.example.com/ ".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_url, "https://moderation.example.com");
    }

    #[test]
    fn api_url_override_is_validated() {
        let err = apply_api_url_override(ClientConfig::default(), Some("ftp://host".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("vidéo_été.mp4", 8), "vidéo...");
    }
}
