//! The binary asset upload sub-protocol.
//!
//! Blobs are persisted through a dedicated multipart endpoint before the
//! record that references them is written: `POST upload` with one `files`
//! part per blob returns the stored assets, whose ids the caller then embeds
//! in the record body. Deletion is the mirror image, `DELETE
//! upload/files/{id}` per asset.

use futures::future::join_all;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError};
use crate::provider::attachment::{AssetId, ImageBlob};

/// Path of the multipart upload endpoint, relative to the API base URL.
pub const UPLOAD_PATH: &str = "upload";

/// Returns the deletion path for a stored asset.
#[must_use]
pub fn asset_delete_path(id: AssetId) -> String {
    format!("upload/files/{id}")
}

/// An asset upload failed.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The transport failed or the endpoint answered non-2xx.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint answered 2xx but the body was not an asset array.
    #[error("upload response was not an array of stored assets")]
    NotAnArray,

    /// A stored asset entry carried no usable id.
    #[error("upload response entry {index} is missing an id")]
    MissingId {
        /// Index of the malformed entry in the response array.
        index: usize,
    },
}

/// Extracts the stored asset ids from an upload response body.
fn parse_upload_response(body: &Value) -> Result<Vec<AssetId>, UploadError> {
    let entries = body.as_array().ok_or(UploadError::NotAnArray)?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .get("id")
                .and_then(Value::as_u64)
                .ok_or(UploadError::MissingId { index })
        })
        .collect()
}

/// Uploads one batch of blobs in a single multipart request and returns the
/// stored asset ids in upload order.
///
/// An empty batch short-circuits to an empty id list without touching the
/// network.
///
/// # Errors
///
/// Returns [`UploadError`] when the transport fails or the response body is
/// not a well-formed asset array.
pub async fn upload_batch(
    http: &HttpClient,
    blobs: Vec<ImageBlob>,
) -> Result<Vec<AssetId>, UploadError> {
    if blobs.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(count = blobs.len(), "uploading asset batch");

    let mut form = reqwest::multipart::Form::new();
    for blob in blobs {
        let part = reqwest::multipart::Part::bytes(blob.bytes)
            .file_name(blob.file_name)
            .mime_str(&blob.content_type)
            .map_err(HttpError::from)?;
        form = form.part("files", part);
    }

    let response = http.post_multipart(UPLOAD_PATH, form).await?;
    parse_upload_response(&response.body)
}

/// Uploads several batches concurrently, one result per batch in input
/// order. A failed batch does not disturb its siblings.
pub async fn upload_batches(
    http: &HttpClient,
    batches: Vec<Vec<ImageBlob>>,
) -> Vec<Result<Vec<AssetId>, UploadError>> {
    join_all(batches.into_iter().map(|batch| upload_batch(http, batch))).await
}
