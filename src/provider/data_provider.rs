//! The public CRUD surface composing validation, uploads, and shaping into
//! full request/response cycles.
//!
//! Every operation follows the same discipline: validate the payload first
//! (a payload that fails the schema never reaches the network), upload any
//! binary attachments second, and only then touch the record endpoint with
//! the uploaded ids embedded in the body.

use futures::future::join_all;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::CmsConfig;
use crate::provider::attachment::AssetId;
use crate::provider::query::{compile_filters, compile_sorters, Filter, Sorter};
use crate::provider::resource::ResourceType;
use crate::provider::schema::{
    self, CreateInput, CreateShape, ListPage, SchemaOperation, ShowRecord, UpdateInput,
    UpdateShape, ValidatedFields, ValidationError,
};
use crate::provider::shape::{
    create_wire_body, update_wire_body, DetailAssetOutcome, ResolvedCreateAssets,
    ResolvedUpdateAssets,
};
use crate::provider::upload::{self, UploadError};

/// How a list request paginates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaginationMode {
    /// The backend paginates; the request carries page parameters.
    #[default]
    Server,
    /// The caller paginates locally; the request carries no page parameters.
    Client,
    /// No pagination at all.
    Off,
}

/// Pagination parameters for [`DataProvider::get_list`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub page_size: u32,
    /// Whether the backend or the caller paginates.
    pub mode: PaginationMode,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            mode: PaginationMode::Server,
        }
    }
}

/// The full parameter set of a list request.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    /// Pagination parameters.
    pub pagination: Pagination,
    /// Filters, compiled to operator-suffixed query keys.
    pub filters: Vec<Filter>,
    /// Sorters, compiled to positional `sort[i]` keys.
    pub sorters: Vec<Sorter>,
}

/// A free-form request escaping the per-resource surface.
///
/// Filters and sorters are compiled with the same compilers the list
/// operation uses, then the literal `query` pairs are appended.
#[derive(Clone, Debug)]
pub struct CustomRequest {
    /// Path relative to the API base URL.
    pub path: String,
    /// HTTP method to dispatch with.
    pub method: HttpMethod,
    /// Filters to compile into the query string.
    pub filters: Vec<Filter>,
    /// Sorters to compile into the query string.
    pub sorters: Vec<Sorter>,
    /// Literal query pairs appended after the compiled ones.
    pub query: Vec<(String, String)>,
    /// JSON body for write methods.
    pub payload: Option<Value>,
}

impl CustomRequest {
    /// Creates a custom request with no query or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            filters: Vec::new(),
            sorters: Vec::new(),
            query: Vec::new(),
            payload: None,
        }
    }
}

/// Unified error type of the provider surface.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The payload failed schema validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required asset upload failed; the record write was aborted.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The transport failed or the backend answered non-2xx.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// The admin back-office data provider.
///
/// One instance per configured backend; cheap to share behind an `Arc`
/// across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use cms_admin::{CmsConfig, DataProvider, ListQuery, ResourceType};
///
/// let provider = DataProvider::new(&config);
/// let page = provider
///     .get_list(ResourceType::News, ListQuery::default())
///     .await?;
/// println!("{} of {} records", page.data.len(), page.total);
/// ```
#[derive(Debug)]
pub struct DataProvider {
    http: HttpClient,
    api_url: String,
}

// Verify DataProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DataProvider>();
};

impl DataProvider {
    /// Creates a provider from the given configuration.
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        Self {
            http: HttpClient::new(config),
            api_url: config.api_base_url().as_ref().to_string(),
        }
    }

    /// Returns the configured API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Lists records of a resource.
    ///
    /// Query parameters are emitted in a fixed order: sorters, then
    /// pagination (server mode only), then filters.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure or when the response
    /// fails the resource schema.
    pub async fn get_list(
        &self,
        resource: ResourceType,
        query: ListQuery,
    ) -> Result<ListPage, ProviderError> {
        let mut params = compile_sorters(&query.sorters);
        if query.pagination.mode == PaginationMode::Server {
            params.push((
                "pagination[page]".to_string(),
                query.pagination.page.to_string(),
            ));
            params.push((
                "pagination[pageSize]".to_string(),
                query.pagination.page_size.to_string(),
            ));
        }
        params.extend(compile_filters(&query.filters));

        let response = self.http.get(resource.slug(), params).await?;
        Ok(schema::validate_list_page(resource, &response.body)?)
    }

    /// Fetches a single record with its attachments populated.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure or when the response
    /// fails the resource schema.
    pub async fn get_one(
        &self,
        resource: ResourceType,
        id: u64,
    ) -> Result<ShowRecord, ProviderError> {
        let descriptor = resource.descriptor();
        let (populate_key, populate_value) = descriptor.populate;
        let response = self
            .http
            .get(
                &format!("{}/{id}", descriptor.slug),
                vec![(populate_key.to_string(), populate_value.to_string())],
            )
            .await?;
        Ok(schema::validate_show_record(resource, &response.body)?)
    }

    /// Fetches several records by id using repeated `id` query keys.
    ///
    /// Unlike the other read operations this one does not run the resource
    /// schema: the records come back raw, with only the envelope checked.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure or when the body is
    /// neither an array nor a `{"data": [...]}` envelope.
    pub async fn get_many(
        &self,
        resource: ResourceType,
        ids: &[u64],
    ) -> Result<Vec<Value>, ProviderError> {
        let params = ids
            .iter()
            .map(|id| ("id".to_string(), id.to_string()))
            .collect();
        let response = self.http.get(resource.slug(), params).await?;

        let records = match &response.body {
            Value::Array(items) => items.clone(),
            body => body
                .get("data")
                .and_then(Value::as_array)
                .cloned()
                .ok_or_else(|| ValidationError {
                    resource,
                    operation: SchemaOperation::List,
                    path: "data".to_string(),
                    reason: "expected an array of records".to_string(),
                })?,
        };
        Ok(records)
    }

    /// Creates a record, uploading its binary attachments first.
    ///
    /// Flat resources upload one batch and abort the whole create when it
    /// fails. Nested resources upload one batch per detail concurrently; a
    /// failed batch degrades that detail's attachment list instead of
    /// aborting the create.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on validation failure (nothing sent), flat
    /// upload failure (no record created), or transport failure.
    pub async fn create(
        &self,
        resource: ResourceType,
        input: CreateInput,
    ) -> Result<Value, ProviderError> {
        let validated = schema::validate_create(resource, &input)?;

        let (detail_fields, assets) = match validated.shape {
            CreateShape::Flat(blobs) => {
                let ids = upload::upload_batch(&self.http, blobs).await?;
                (Vec::new(), ResolvedCreateAssets::Flat(ids))
            }
            CreateShape::Nested(details) => {
                let mut fields: Vec<ValidatedFields> = Vec::with_capacity(details.len());
                let mut batches = Vec::with_capacity(details.len());
                let mut had_blobs = Vec::with_capacity(details.len());
                for detail in details {
                    fields.push(detail.fields);
                    had_blobs.push(!detail.images.is_empty());
                    batches.push(detail.images);
                }

                let results = upload::upload_batches(&self.http, batches).await;
                let outcomes = results
                    .into_iter()
                    .zip(had_blobs)
                    .enumerate()
                    .map(|(index, (result, had))| match (result, had) {
                        (_, false) => DetailAssetOutcome::Absent,
                        (Ok(ids), true) => DetailAssetOutcome::Uploaded(ids),
                        (Err(error), true) => {
                            tracing::warn!(%resource, index, %error, "detail upload failed");
                            DetailAssetOutcome::Failed
                        }
                    })
                    .collect();
                (fields, ResolvedCreateAssets::Nested(outcomes))
            }
        };

        let body = create_wire_body(&validated.fields, &detail_fields, &assets);
        let response = self.http.post(resource.slug(), body).await?;
        Ok(response.body)
    }

    /// Updates a record, uploading new attachments and unioning their ids
    /// with the retained old ones.
    ///
    /// Flat resources abort when the upload fails. Nested resources degrade
    /// a failed detail batch to its retained old ids.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on validation failure (nothing sent), flat
    /// upload failure (record untouched), or transport failure.
    pub async fn update(
        &self,
        resource: ResourceType,
        id: u64,
        input: UpdateInput,
    ) -> Result<Value, ProviderError> {
        let validated = schema::validate_update(resource, &input)?;

        let (detail_fields, assets) = match validated.shape {
            UpdateShape::Flat {
                old_images,
                new_images,
            } => {
                let mut ids = old_images;
                ids.extend(upload::upload_batch(&self.http, new_images).await?);
                (Vec::new(), ResolvedUpdateAssets::Flat(ids))
            }
            UpdateShape::Nested(details) => {
                let mut fields: Vec<ValidatedFields> = Vec::with_capacity(details.len());
                let mut old_lists = Vec::with_capacity(details.len());
                let mut batches = Vec::with_capacity(details.len());
                for detail in details {
                    fields.push(detail.fields);
                    old_lists.push(detail.old_images);
                    batches.push(detail.new_images);
                }

                let results = upload::upload_batches(&self.http, batches).await;
                let id_lists = results
                    .into_iter()
                    .zip(old_lists)
                    .enumerate()
                    .map(|(index, (result, mut old))| {
                        match result {
                            Ok(new_ids) => old.extend(new_ids),
                            Err(error) => {
                                tracing::warn!(
                                    %resource, index, %error,
                                    "detail upload failed, keeping retained ids"
                                );
                            }
                        }
                        old
                    })
                    .collect();
                (fields, ResolvedUpdateAssets::Nested(id_lists))
            }
        };

        let body = update_wire_body(&validated.fields, &detail_fields, &assets);
        let response = self
            .http
            .put(&format!("{}/{id}", resource.slug()), body)
            .await?;
        Ok(response.body)
    }

    /// Deletes a record, first firing best-effort deletions of its listed
    /// attachments.
    ///
    /// Attachment deletions run concurrently; individual failures are logged
    /// and swallowed. Only the record deletion itself can fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the record deletion fails.
    pub async fn delete_one(
        &self,
        resource: ResourceType,
        id: u64,
        attachment_ids: &[AssetId],
    ) -> Result<Value, ProviderError> {
        let deletions = attachment_ids.iter().map(|asset_id| {
            let path = upload::asset_delete_path(*asset_id);
            async move { self.http.delete(&path).await }
        });
        for (asset_id, result) in attachment_ids.iter().zip(join_all(deletions).await) {
            if let Err(error) = result {
                tracing::warn!(%resource, asset_id, %error, "attachment delete failed");
            }
        }

        let response = self
            .http
            .delete(&format!("{}/{id}", resource.slug()))
            .await?;
        Ok(response.body)
    }

    /// Dispatches a free-form request with compiled filters and sorters.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on request validation or transport failure.
    pub async fn custom(&self, request: CustomRequest) -> Result<HttpResponse, ProviderError> {
        let mut params = compile_sorters(&request.sorters);
        params.extend(compile_filters(&request.filters));
        params.extend(request.query);

        let mut builder =
            HttpRequest::builder(request.method, request.path).query_pairs(params);
        match request.method {
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                builder = builder.body(request.payload.unwrap_or_else(|| serde_json::json!({})));
            }
            HttpMethod::Get | HttpMethod::Delete => {
                if let Some(payload) = request.payload {
                    builder = builder.body(payload);
                }
            }
        }
        let http_request = builder.build().map_err(HttpError::from)?;

        Ok(self.http.request(http_request).await?)
    }
}
