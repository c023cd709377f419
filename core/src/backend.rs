//! Backend base URL resolution.
//!
//! The backend is located from the page that hosts the client: a `server`
//! query parameter names it outright, otherwise it is assumed to run on the
//! page's own host at `DEFAULT_BACKEND_PORT`. The result is resolved once
//! and handed to `ActivityClient`.

use url::Url;

use crate::error::ApiError;

/// Port the backend listens on when the page does not name a server.
pub const DEFAULT_BACKEND_PORT: u16 = 8000;

/// Env var naming the backend base URL outright.
pub const SERVER_ENV: &str = "ACTIVITY_SERVER";

/// Env var holding a page URL to resolve the backend from.
pub const PAGE_URL_ENV: &str = "ACTIVITY_PAGE_URL";

/// Resolved backend location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the backend from a page URL.
    ///
    /// `?server=<url>` wins when present and non-empty and is used as given,
    /// except that a trailing `/` is stripped so route paths join without a
    /// double slash (`http://example.com:9000/` becomes
    /// `http://example.com:9000`). Otherwise the backend is
    /// `<scheme>://<host>:8000`.
    pub fn from_page_url(page_url: &str) -> Result<Self, ApiError> {
        let page = Url::parse(page_url).map_err(|e| ApiError::InvalidPageUrl(format!("{page_url}: {e}")))?;

        if let Some(server) = page
            .query_pairs()
            .find(|(key, _)| key == "server")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
        {
            return Ok(Self::new(&server));
        }

        let host = page
            .host_str()
            .ok_or_else(|| ApiError::InvalidPageUrl(format!("{page_url}: no host")))?;
        Ok(Self::new(&format!(
            "{}://{host}:{DEFAULT_BACKEND_PORT}",
            page.scheme()
        )))
    }

    /// Resolve from `ACTIVITY_SERVER`, then `ACTIVITY_PAGE_URL`, then
    /// `http://localhost:8000`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        if let Some(server) = lookup(SERVER_ENV).filter(|s| !s.is_empty()) {
            return Ok(Self::new(&server));
        }
        match lookup(PAGE_URL_ENV).filter(|s| !s.is_empty()) {
            Some(page_url) => Self::from_page_url(&page_url),
            None => Ok(Self::new(&format!("http://localhost:{DEFAULT_BACKEND_PORT}"))),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_param_overrides_host() {
        let config =
            BackendConfig::from_page_url("https://app.local/?server=http://example.com:9000").unwrap();
        assert_eq!(config.base_url(), "http://example.com:9000");
    }

    #[test]
    fn server_param_trailing_slash_is_stripped() {
        let config = BackendConfig::from_page_url("https://app.local/?server=http://example.com:9000/").unwrap();
        assert_eq!(config.base_url(), "http://example.com:9000");
    }

    #[test]
    fn server_param_is_percent_decoded() {
        let config =
            BackendConfig::from_page_url("http://app.local/view?x=1&server=http%3A%2F%2Fexample.com%3A9000")
                .unwrap();
        assert_eq!(config.base_url(), "http://example.com:9000");
    }

    #[test]
    fn falls_back_to_page_host_on_backend_port() {
        let config = BackendConfig::from_page_url("https://tracker.example.org:3000/timeline?day=1").unwrap();
        assert_eq!(config.base_url(), "https://tracker.example.org:8000");
    }

    #[test]
    fn empty_server_param_counts_as_absent() {
        let config = BackendConfig::from_page_url("http://localhost:5173/?server=").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn first_server_param_wins() {
        let config =
            BackendConfig::from_page_url("http://a/?server=http://one:1&server=http://two:2").unwrap();
        assert_eq!(config.base_url(), "http://one:1");
    }

    #[test]
    fn page_without_host_is_rejected() {
        let err = BackendConfig::from_page_url("file:///tmp/index.html").unwrap_err();
        assert!(matches!(err, ApiError::InvalidPageUrl(_)));
    }

    #[test]
    fn unparseable_page_url_is_rejected() {
        let err = BackendConfig::from_page_url("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidPageUrl(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(BackendConfig::new("http://localhost:8000/").base_url(), "http://localhost:8000");
    }

    #[test]
    fn lookup_prefers_server_over_page_url() {
        let config = BackendConfig::from_lookup(|key| match key {
            SERVER_ENV => Some("http://direct:1234".to_string()),
            PAGE_URL_ENV => Some("http://page.local/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url(), "http://direct:1234");
    }

    #[test]
    fn lookup_resolves_page_url() {
        let config = BackendConfig::from_lookup(|key| match key {
            PAGE_URL_ENV => Some("http://page.local/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url(), "http://page.local:8000");
    }

    #[test]
    fn lookup_defaults_to_localhost() {
        let config = BackendConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }
}
