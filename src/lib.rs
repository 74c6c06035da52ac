//! # CMS Admin SDK for Rust
//!
//! A Rust SDK for the admin back-office of a headless-CMS-style REST API.
//! It covers the four back-office collections (news, playgrounds, meal
//! combos, rooms) with schema-validated CRUD, two-phase binary attachment
//! uploads, and an escape hatch for free-form requests.
//!
//! ## Features
//!
//! - **Closed resource set**: the four collections are a tagged union with
//!   one descriptor per variant; dispatch is an exhaustive `match`
//! - **Fail-closed validation**: payloads and responses are checked against
//!   per-resource field schemas before anything crosses the boundary
//! - **Two-phase writes**: binary attachments are uploaded first, then the
//!   record is written referencing the stored asset ids
//! - **Partial-failure tolerance**: a nested resource's failed detail upload
//!   degrades that detail instead of losing the whole record
//! - **Per-request bearer injection**: credentials come from a
//!   [`TokenProvider`] on every request, never from shared mutable state
//! - **Timeouts and retries**: every network call is bounded by the
//!   configured timeout; 429/500 responses can be retried
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cms_admin::{
//!     AccessToken, ApiBaseUrl, CmsConfig, DataProvider, ListQuery, ResourceType,
//!     StaticTokenProvider,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CmsConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://cms.example.com/api")?)
//!     .token_provider(Arc::new(StaticTokenProvider::new(AccessToken::new(
//!         "admin-token",
//!     )?)))
//!     .build()?;
//!
//! let provider = DataProvider::new(&config);
//!
//! let page = provider
//!     .get_list(ResourceType::News, ListQuery::default())
//!     .await?;
//! println!("{} news records of {}", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The crate is layered bottom-up:
//!
//! - [`config`]: validated configuration newtypes and the [`TokenProvider`]
//!   credential seam
//! - [`clients`]: the HTTP transport with timeouts, retries, and multipart
//!   uploads
//! - [`provider`]: resource descriptors, schema validation, query
//!   compilation, the attachment lifecycle, and the [`DataProvider`] CRUD
//!   surface

pub mod clients;
pub mod config;
pub mod error;
pub mod provider;

pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, RETRY_WAIT_TIME,
    SDK_VERSION,
};
pub use config::{
    AccessToken, ApiBaseUrl, CmsConfig, CmsConfigBuilder, StaticTokenProvider, TokenProvider,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use error::ConfigError;
pub use provider::{
    compile_filters, compile_sorters, split_for_update, AssetId, AttachmentTopology, CreateInput,
    CustomRequest, DataProvider, DetailCreateInput, DetailUpdateInput, DetailView, FieldKind,
    FieldSpec, FieldValue, Filter, FilterOperator, ImageAttachment, ImageBlob, ListPage,
    ListQuery, ListRecord, Pagination, PaginationMode, ProviderError, RemoteImage,
    ResourceDescriptor, ResourceType, SchemaOperation, ShowRecord, SortOrder, Sorter,
    UpdateInput, UploadError, ValidationError, UPLOAD_PATH,
};
