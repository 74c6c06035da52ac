//! HTTP response types for the SDK transport.

use std::collections::HashMap;

/// A parsed response from the CMS REST API.
///
/// The body is always parsed as JSON; an empty body becomes an empty JSON
/// object so callers never have to special-case it.
///
/// # Example
///
/// ```rust
/// use cms_admin::HttpResponse;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(200, HashMap::new(), json!({"data": []}));
/// assert!(response.is_ok());
/// assert_eq!(response.body["data"], json!([]));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase header name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of the given header, if present.
    ///
    /// Header names are matched case-insensitively (stored lowercase).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
