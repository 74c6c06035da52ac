//! Configuration types for the CMS admin SDK.
//!
//! This module provides the core configuration types used to initialize the
//! SDK for communication with the CMS REST API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CmsConfig`]: The main configuration struct holding all SDK settings
//! - [`CmsConfigBuilder`]: A builder for constructing [`CmsConfig`] instances
//! - [`ApiBaseUrl`]: A validated API base URL newtype
//! - [`AccessToken`]: A validated bearer token newtype with masked debug output
//! - [`TokenProvider`]: Per-request credential injection for the transport
//!
//! Authentication is owned by an external collaborator; the SDK only consumes
//! an already-issued bearer token through a [`TokenProvider`]. The provider is
//! queried on every request, so rotating the token never requires mutating
//! shared transport state.
//!
//! # Example
//!
//! ```rust
//! use cms_admin::{AccessToken, ApiBaseUrl, CmsConfig, StaticTokenProvider};
//! use std::sync::Arc;
//!
//! let config = CmsConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://cms.example.com/api").unwrap())
//!     .token_provider(Arc::new(StaticTokenProvider::new(
//!         AccessToken::new("my-token").unwrap(),
//!     )))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base_url().as_ref(), "https://cms.example.com/api");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiBaseUrl};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supplies the bearer token attached to each outgoing request.
///
/// Implementations are queried once per request, so a provider backed by a
/// session store can rotate tokens without rebuilding the client.
///
/// Returning `None` sends the request unauthenticated (useful against a local
/// development CMS with public permissions).
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns the current bearer token, if one is available.
    fn access_token(&self) -> Option<String>;
}

/// A [`TokenProvider`] that always returns the same token.
///
/// # Example
///
/// ```rust
/// use cms_admin::{AccessToken, StaticTokenProvider, TokenProvider};
///
/// let provider = StaticTokenProvider::new(AccessToken::new("my-token").unwrap());
/// assert_eq!(provider.access_token(), Some("my-token".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a provider wrapping the given token.
    #[must_use]
    pub const fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn access_token(&self) -> Option<String> {
        Some(self.token.as_ref().to_string())
    }
}

/// Configuration for the CMS admin SDK.
///
/// This struct holds all settings needed for SDK operations: the API base
/// URL, the credential source, and transport tuning.
///
/// # Thread Safety
///
/// `CmsConfig` is `Clone`, `Send`, and `Sync`, making it safe to share across
/// threads and async tasks.
#[derive(Clone, Debug)]
pub struct CmsConfig {
    api_base_url: ApiBaseUrl,
    token_provider: Option<Arc<dyn TokenProvider>>,
    request_timeout: Duration,
    user_agent_prefix: Option<String>,
}

// Verify CmsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CmsConfig>();
};

impl CmsConfig {
    /// Creates a new builder for constructing a `CmsConfig`.
    #[must_use]
    pub fn builder() -> CmsConfigBuilder {
        CmsConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base_url(&self) -> &ApiBaseUrl {
        &self.api_base_url
    }

    /// Returns the token provider, if one is configured.
    #[must_use]
    pub fn token_provider(&self) -> Option<&Arc<dyn TokenProvider>> {
        self.token_provider.as_ref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the User-Agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for constructing [`CmsConfig`] instances.
#[derive(Debug, Default)]
pub struct CmsConfigBuilder {
    api_base_url: Option<ApiBaseUrl>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl CmsConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the token provider used for per-request bearer injection.
    #[must_use]
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Sets the per-request timeout.
    ///
    /// Defaults to [`DEFAULT_REQUEST_TIMEOUT`] when not set.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets a prefix for the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_base_url` was
    /// not set.
    pub fn build(self) -> Result<CmsConfig, ConfigError> {
        let api_base_url = self.api_base_url.ok_or(ConfigError::MissingRequiredField {
            field: "api_base_url",
        })?;

        Ok(CmsConfig {
            api_base_url,
            token_provider: self.token_provider,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
