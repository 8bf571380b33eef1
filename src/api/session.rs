//! Explicit request context: where the API lives and who is calling it.
//!
//! Every request-issuing call takes a `&Session`; nothing about authentication
//! is stored process-wide. Signing in produces a new session value.

use reqwest::Url;

use super::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    base_url: Url,
    token: Option<String>,
}

impl Session {
    /// `base_url` is the versioned API root, e.g. `http://host:8000/api/v1`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    /// Same API root, no credentials.
    pub fn signed_out(&self) -> Self {
        Self::new(self.base_url.clone())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from a path relative to the API root.
    ///
    /// `path` may carry a query string (`/availability?campaign_id=...`).
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Resolves a server-supplied href.
    ///
    /// Absolute URLs are used verbatim; `/api/v1/...` style hrefs resolve
    /// against the API origin.
    pub fn resolve_href(&self, href: &str) -> Result<Url, ApiError> {
        match Url::parse(href) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base_url
                .join(href)
                .map_err(|e| ApiError::InvalidUrl(format!("{href}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Url::parse("http://localhost:8000/api/v1").unwrap())
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let s = session();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);
    }

    #[test]
    fn test_with_token_and_signed_out() {
        let s = session().with_token("abc");
        assert_eq!(s.token(), Some("abc"));
        let out = s.signed_out();
        assert!(!out.is_authenticated());
        assert_eq!(out.base_url(), s.base_url());
    }

    #[test]
    fn test_endpoint_appends_path() {
        let url = session().endpoint("/billboards").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/billboards");
    }

    #[test]
    fn test_endpoint_keeps_query() {
        let url = session().endpoint("/availability?campaign_id=42").unwrap();
        assert_eq!(url.path(), "/api/v1/availability");
        assert_eq!(url.query(), Some("campaign_id=42"));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash_in_base() {
        let s = Session::new(Url::parse("http://localhost:8000/api/v1/").unwrap());
        let url = s.endpoint("locations").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/locations");
    }

    #[test]
    fn test_resolve_origin_relative_href() {
        let url = session()
            .resolve_href("/api/v1/campaigns/c1/billboards/b1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/campaigns/c1/billboards/b1"
        );
    }

    #[test]
    fn test_resolve_absolute_href() {
        let url = session()
            .resolve_href("https://api.example.com/x")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/x");
    }
}
