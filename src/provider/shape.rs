//! Wire-shape adaptation between validated records and the backend's JSON
//! envelopes.
//!
//! The backend wraps write bodies in `{"data": ...}`, nests populated
//! attachments as `{"data": [{"id", "attributes": {"url"}}]}`, and stores
//! dates as day strings. This module is the single place those conventions
//! live: everything above it works with [`FieldValue`]s, [`RemoteImage`]s,
//! and plain id lists.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::{json, Map, Value};

use crate::provider::attachment::{AssetId, RemoteImage};
use crate::provider::schema::{FieldValue, ValidatedFields};

/// Hours added to a date before truncating it to a day string on write.
///
/// The backend stores calendar days in a UTC+8 venue timezone; shifting
/// before truncation keeps "late evening UTC" on the venue's next day.
const WRITE_SHIFT_HOURS: i64 = 8;

/// Parses a wire date string.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps
/// (taken as UTC), and bare `YYYY-MM-DD` day strings (taken as UTC
/// midnight).
#[must_use]
pub fn parse_date_value(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serializes a date for the wire: shift forward by the venue offset, then
/// truncate to a `YYYY-MM-DD` day string.
#[must_use]
pub fn shifted_day_string(date: &DateTime<Utc>) -> String {
    (*date + Duration::hours(WRITE_SHIFT_HOURS))
        .format("%Y-%m-%d")
        .to_string()
}

/// Converts a validated field value to its wire representation.
#[must_use]
pub fn field_value_to_wire(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(s) => Value::String(s.clone()),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(n) => json!(n),
        FieldValue::Date(d) => Value::String(shifted_day_string(d)),
        FieldValue::Null => Value::Null,
    }
}

fn fields_to_wire(fields: &ValidatedFields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| ((*name).to_string(), field_value_to_wire(value)))
        .collect()
}

/// Flattens a populated image envelope to `{id, url}` pairs.
///
/// An absent key, JSON null, or `{"data": null}` all mean "no attachments"
/// and flatten to an empty list. Anything else must be `{"data": [{"id",
/// "attributes": {"url"}}]}`.
///
/// # Errors
///
/// Returns a reason string when the envelope is present but malformed.
pub fn flatten_image_envelope(envelope: Option<&Value>) -> Result<Vec<RemoteImage>, String> {
    let Some(envelope) = envelope else {
        return Ok(Vec::new());
    };
    let data = match envelope {
        Value::Null => return Ok(Vec::new()),
        Value::Object(object) => match object.get("data") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err("expected `data` to be an array or null".to_string()),
        },
        _ => return Err("expected an object or null".to_string()),
    };

    let mut images = Vec::with_capacity(data.len());
    for (index, item) in data.iter().enumerate() {
        let id = item.get("id").and_then(Value::as_u64).ok_or_else(|| {
            format!("expected `data[{index}].id` to be an id")
        })?;
        let url = item
            .pointer("/attributes/url")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("expected `data[{index}].attributes.url` to be a string"))?;
        images.push(RemoteImage {
            id,
            url: url.to_string(),
        });
    }
    Ok(images)
}

/// The attachment-reference outcome for one detail of a nested create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailAssetOutcome {
    /// Blobs were uploaded; reference these ids.
    Uploaded(Vec<AssetId>),
    /// The detail had no blobs; the wire shows an explicit null.
    Absent,
    /// The upload batch failed; the key is omitted from the wire body.
    Failed,
}

/// Resolved attachment references for a create, per topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedCreateAssets {
    /// One id list on the record; empty means the key is omitted.
    Flat(Vec<AssetId>),
    /// One outcome per detail, in input order.
    Nested(Vec<DetailAssetOutcome>),
}

/// Resolved attachment references for an update, per topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedUpdateAssets {
    /// The full retained-plus-uploaded id list for the record.
    Flat(Vec<AssetId>),
    /// The full id list per detail, in input order.
    Nested(Vec<Vec<AssetId>>),
}

fn asset_ids_to_wire(ids: &[AssetId]) -> Value {
    Value::Array(ids.iter().map(|id| json!(id)).collect())
}

/// Builds the `{"data": {...}}` body for a create request.
///
/// Flat records carry an `images` id list only when attachments were
/// uploaded. Nested records carry a `details` array whose per-detail
/// `images` key is the uploaded ids, an explicit null when the detail had
/// no blobs, or omitted when its upload batch failed.
#[must_use]
pub fn create_wire_body(
    fields: &ValidatedFields,
    detail_fields: &[ValidatedFields],
    assets: &ResolvedCreateAssets,
) -> Value {
    let mut body = fields_to_wire(fields);
    match assets {
        ResolvedCreateAssets::Flat(ids) => {
            if !ids.is_empty() {
                body.insert("images".to_string(), asset_ids_to_wire(ids));
            }
        }
        ResolvedCreateAssets::Nested(outcomes) => {
            let details: Vec<Value> = detail_fields
                .iter()
                .zip(outcomes)
                .map(|(fields, outcome)| {
                    let mut detail = fields_to_wire(fields);
                    match outcome {
                        DetailAssetOutcome::Uploaded(ids) => {
                            detail.insert("images".to_string(), asset_ids_to_wire(ids));
                        }
                        DetailAssetOutcome::Absent => {
                            detail.insert("images".to_string(), Value::Null);
                        }
                        DetailAssetOutcome::Failed => {}
                    }
                    Value::Object(detail)
                })
                .collect();
            body.insert("details".to_string(), Value::Array(details));
        }
    }
    json!({ "data": body })
}

/// Builds the `{"data": {...}}` body for an update request.
///
/// Unlike creates, updates always carry the attachment id lists, even when
/// empty: an empty list is how a caller detaches everything.
#[must_use]
pub fn update_wire_body(
    fields: &ValidatedFields,
    detail_fields: &[ValidatedFields],
    assets: &ResolvedUpdateAssets,
) -> Value {
    let mut body = fields_to_wire(fields);
    match assets {
        ResolvedUpdateAssets::Flat(ids) => {
            body.insert("images".to_string(), asset_ids_to_wire(ids));
        }
        ResolvedUpdateAssets::Nested(id_lists) => {
            let details: Vec<Value> = detail_fields
                .iter()
                .zip(id_lists)
                .map(|(fields, ids)| {
                    let mut detail = fields_to_wire(fields);
                    detail.insert("images".to_string(), asset_ids_to_wire(ids));
                    Value::Object(detail)
                })
                .collect();
            body.insert("details".to_string(), Value::Array(details));
        }
    }
    json!({ "data": body })
}
