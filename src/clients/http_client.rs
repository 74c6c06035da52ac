//! HTTP client for CMS REST API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the CMS REST API with per-request bearer injection, a
//! configurable timeout, and automatic retry handling for transient failures.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{CmsConfig, TokenProvider};

/// Fixed retry wait time in seconds for 429/500 responses.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the CMS REST API.
///
/// The client handles:
/// - URL construction from the configured API base URL
/// - Default headers including User-Agent and Accept
/// - Per-request bearer token injection via the configured [`TokenProvider`]
/// - A per-request timeout around every network call
/// - Automatic retry logic for 429 and 500 responses
/// - Multipart asset uploads (`POST upload` with the `files` field)
///
/// Credentials are read from the token provider on every request; the client
/// itself holds no mutable authentication state.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use cms_admin::{CmsConfig, HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "news")
///     .query_param("pagination[page]", "1")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL of the CMS REST API (e.g., `https://cms.example.com/api`).
    base_url: String,
    /// Per-request credential source.
    token_provider: Option<Arc<dyn TokenProvider>>,
    /// Timeout applied to every network call.
    timeout: Duration,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}CMS Admin SDK v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.api_base_url().as_ref().to_string(),
            token_provider: config.token_provider().cloned(),
            timeout: config.request_timeout(),
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request to the given path with ordered query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request validation, network, timeout, or
    /// non-2xx response failures.
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_pairs(query)
            .build()?;
        self.request(request).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request validation, network, timeout, or
    /// non-2xx response failures.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request validation, network, timeout, or
    /// non-2xx response failures.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE request to the given path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on request validation, network, timeout, or
    /// non-2xx response failures.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.request(request).await
    }

    /// Sends an HTTP request to the CMS REST API.
    ///
    /// This method handles request validation, URL construction, header
    /// merging, bearer injection, response parsing, and retry logic for
    /// 429 and 500 responses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - The timeout elapses (`Timeout`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let path = request.path.trim_start_matches('/');
        let url = format!("{}/{path}", self.base_url);

        tracing::debug!(method = %request.http_method, path, "dispatching request");

        // Merge headers
        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        // Retry loop
        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            req_builder = self.apply_bearer(req_builder);

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }

            let response = self.send_with_timeout(req_builder).await?;

            if response.is_ok() {
                return Ok(response);
            }

            let code = response.code;
            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                }));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                }));
            }

            tokio::time::sleep(Duration::from_secs(RETRY_WAIT_TIME)).await;
        }
    }

    /// Uploads a prepared multipart form to the given path.
    ///
    /// Used by the asset upload sub-protocol; the form carries one `files`
    /// part per binary attachment. Multipart bodies are not replayable, so
    /// no retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on network, timeout, or non-2xx response
    /// failures.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        tracing::debug!(path, "dispatching multipart upload");

        let mut req_builder = self.client.post(&url).multipart(form);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = self.apply_bearer(req_builder);

        let response = self.send_with_timeout(req_builder).await?;

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code: response.code,
            message: Self::serialize_error(&response),
        }))
    }

    /// Injects the bearer token from the configured provider, if any.
    fn apply_bearer(&self, req_builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self
            .token_provider
            .as_ref()
            .and_then(|provider| provider.access_token())
        {
            Some(token) => req_builder.header("Authorization", format!("Bearer {token}")),
            None => req_builder,
        }
    }

    /// Sends the request with the configured timeout and parses the response.
    ///
    /// The timeout covers the full exchange, from connect through reading
    /// the last body byte; a backend that stalls mid-body still surfaces as
    /// [`HttpError::Timeout`].
    async fn send_with_timeout(
        &self,
        req_builder: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, HttpError> {
        let seconds = self.timeout.as_secs();
        tokio::time::timeout(self.timeout, async {
            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // For 5xx errors, keep the raw body for diagnostics
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            Ok(HttpResponse::new(code, res_headers, body))
        })
        .await
        .map_err(|_| HttpError::Timeout { seconds })?
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes an error response body for the error message.
    fn serialize_error(response: &HttpResponse) -> String {
        serde_json::to_string(&response.body).unwrap_or_else(|_| "{}".to_string())
    }
}
