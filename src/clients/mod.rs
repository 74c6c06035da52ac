//! HTTP transport for CMS REST API communication.
//!
//! This module provides the foundational HTTP client layer for making
//! authenticated requests to the CMS REST API. It handles request/response
//! processing, per-request bearer injection, timeouts, retry logic for
//! transient failures, and multipart asset uploads.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`HttpError`]: Unified transport error type
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)** and **500 (Server Error)**: retried with a fixed
//!   1-second delay
//! - **Other errors (4xx)**: returned immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`HttpRequest::builder`] with `.tries(n)` to enable retries.
//!
//! # Timeouts
//!
//! Every network call is wrapped in the timeout from
//! [`CmsConfig::request_timeout`](crate::config::CmsConfig::request_timeout);
//! an elapsed timeout surfaces as [`HttpError::Timeout`]. A hung backend can
//! therefore never stall an operation indefinitely.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
