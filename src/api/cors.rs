//! Cross-origin policy selected at startup.

use anyhow::{Context, Result, anyhow};
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use url::Url;

/// Which origins may call the API from a browser.
///
/// Both variants allow any method and header and allow credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin. The request origin is echoed back, which is required when
    /// credentials are allowed.
    #[default]
    Permissive,
    /// Only the listed origins (`scheme://host[:port]`).
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Parse a comma-separated origin list; `*` (or nothing) means permissive.
    ///
    /// # Errors
    /// Returns an error if an entry is not a valid `http(s)` origin.
    pub fn parse(value: &str) -> Result<Self> {
        let entries: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() || entries.contains(&"*") {
            return Ok(Self::Permissive);
        }

        entries
            .into_iter()
            .map(origin)
            .collect::<Result<Vec<_>>>()
            .map(Self::Origins)
    }

    #[must_use]
    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);

        match self {
            Self::Permissive => layer.allow_origin(AllowOrigin::mirror_request()),
            Self::Origins(origins) => layer.allow_origin(AllowOrigin::list(origins.clone())),
        }
    }
}

/// Reduce a URL to its origin header form.
fn origin(value: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(value).with_context(|| format!("Invalid CORS origin: {value}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("CORS origin must use http or https: {value}"));
    }
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("CORS origin must include a valid host: {value}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build CORS origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_and_empty_are_permissive() -> Result<()> {
        assert_eq!(CorsPolicy::parse("*")?, CorsPolicy::Permissive);
        assert_eq!(CorsPolicy::parse("")?, CorsPolicy::Permissive);
        assert_eq!(
            CorsPolicy::parse("https://app.example.com, *")?,
            CorsPolicy::Permissive
        );
        Ok(())
    }

    #[test]
    fn origin_list_is_normalized() -> Result<()> {
        let policy = CorsPolicy::parse("https://app.example.com/login, http://localhost:3000")?;
        assert_eq!(
            policy,
            CorsPolicy::Origins(vec![
                HeaderValue::from_static("https://app.example.com"),
                HeaderValue::from_static("http://localhost:3000"),
            ])
        );
        Ok(())
    }

    #[test]
    fn invalid_origins_are_rejected() {
        assert!(CorsPolicy::parse("not a url").is_err());
        assert!(CorsPolicy::parse("ftp://files.example.com").is_err());
    }
}
