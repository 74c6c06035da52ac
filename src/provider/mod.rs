//! The admin back-office data provider.
//!
//! This module composes the per-resource schema registry, the filter/sort
//! query compiler, the asset upload sub-protocol, and the wire-shape adapter
//! into the seven-operation CRUD surface of [`DataProvider`].
//!
//! # Layering
//!
//! - [`resource`]: the closed set of resource types and their descriptors
//! - [`schema`]: fail-closed payload and response validation
//! - [`query`]: filter/sort compilation into query-string pairs
//! - [`attachment`] and [`upload`]: the two-state attachment lifecycle and
//!   the multipart upload protocol that persists local blobs
//! - [`shape`]: the backend's JSON envelope conventions
//! - [`data_provider`]: the public operations composing all of the above

pub mod attachment;
pub mod data_provider;
pub mod query;
pub mod resource;
pub mod schema;
pub mod shape;
pub mod upload;

pub use attachment::{split_for_update, AssetId, ImageAttachment, ImageBlob, RemoteImage};
pub use data_provider::{
    CustomRequest, DataProvider, ListQuery, Pagination, PaginationMode, ProviderError,
};
pub use query::{compile_filters, compile_sorters, Filter, FilterOperator, SortOrder, Sorter};
pub use resource::{
    AttachmentTopology, FieldKind, FieldSpec, ResourceDescriptor, ResourceType,
};
pub use schema::{
    CreateInput, DetailCreateInput, DetailUpdateInput, DetailView, FieldValue, ListPage,
    ListRecord, SchemaOperation, ShowRecord, UpdateInput, ValidationError,
};
pub use upload::{UploadError, UPLOAD_PATH};
