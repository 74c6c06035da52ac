//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use crate::error::ConfigError;

/// A validated API base URL.
///
/// The base URL points at the CMS REST endpoint root (e.g.
/// `https://cms.example.com/api`). A trailing slash is stripped so that
/// request paths can always be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use cms_admin::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("https://cms.example.com/api/").unwrap();
/// assert_eq!(url.as_ref(), "https://cms.example.com/api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl(String);

impl ApiBaseUrl {
    /// Creates a new validated API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBaseUrl`] if the URL is empty or
    /// lacks an `http://`/`https://` scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidApiBaseUrl { url });
        }

        let without_trailing = trimmed.trim_end_matches('/');
        if without_trailing.len() <= "https://".len() {
            return Err(ConfigError::InvalidApiBaseUrl { url });
        }

        Ok(Self(without_trailing.to_string()))
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated bearer access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AccessToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use cms_admin::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_accepts_https() {
        let url = ApiBaseUrl::new("https://cms.example.com/api").unwrap();
        assert_eq!(url.as_ref(), "https://cms.example.com/api");
    }

    #[test]
    fn test_api_base_url_accepts_http() {
        let url = ApiBaseUrl::new("http://localhost:1337/api").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:1337/api");
    }

    #[test]
    fn test_api_base_url_strips_trailing_slash() {
        let url = ApiBaseUrl::new("https://cms.example.com/api///").unwrap();
        assert_eq!(url.as_ref(), "https://cms.example.com/api");
    }

    #[test]
    fn test_api_base_url_rejects_missing_scheme() {
        let result = ApiBaseUrl::new("cms.example.com/api");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidApiBaseUrl { url }) if url == "cms.example.com/api"
        ));
    }

    #[test]
    fn test_api_base_url_rejects_scheme_only() {
        let result = ApiBaseUrl::new("https://");
        assert!(result.is_err());
    }

    #[test]
    fn test_api_base_url_rejects_empty() {
        let result = ApiBaseUrl::new("");
        assert!(result.is_err());
    }

    #[test]
    fn test_access_token_accepts_non_empty() {
        let token = AccessToken::new("abc123").unwrap();
        assert_eq!(token.as_ref(), "abc123");
    }

    #[test]
    fn test_access_token_rejects_empty() {
        let result = AccessToken::new("");
        assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert_eq!(debug, "AccessToken(*****)");
        assert!(!debug.contains("super-secret"));
    }
}
