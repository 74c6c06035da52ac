//! Per-resource schema validation for inbound payloads and outbound
//! responses.
//!
//! Every record crossing the provider boundary is checked against the
//! [`ResourceDescriptor`](crate::provider::resource::ResourceDescriptor)
//! field schema for its type. Validation fails closed: a malformed wire
//! payload or caller input surfaces as a [`ValidationError`] naming the
//! resource, operation, and offending path, never as a silently-coerced
//! record. Unknown fields are dropped rather than rejected, so additive
//! backend changes do not break existing clients.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::provider::attachment::{AssetId, ImageBlob, RemoteImage};
use crate::provider::resource::{AttachmentTopology, FieldKind, FieldSpec, ResourceType};
use crate::provider::shape;

/// The schema-checked operation a payload was validated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaOperation {
    /// Listing records.
    List,
    /// Creating a record.
    Create,
    /// Fetching a single record.
    Show,
    /// Updating a record.
    Update,
}

impl fmt::Display for SchemaOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Create => write!(f, "create"),
            Self::Show => write!(f, "show"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// A payload failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {resource} {operation} at `{path}`: {reason}")]
pub struct ValidationError {
    /// The resource type being validated.
    pub resource: ResourceType,
    /// The operation the payload belonged to.
    pub operation: SchemaOperation,
    /// Dotted path to the offending value (e.g., `details[1].title`).
    pub path: String,
    /// What was wrong with the value.
    pub reason: String,
}

impl ValidationError {
    fn new(
        resource: ResourceType,
        operation: SchemaOperation,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            resource,
            operation,
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A schema-checked scalar field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A parsed date (wire representation is a string).
    Date(chrono::DateTime<chrono::Utc>),
    /// JSON null, only valid for nullable fields.
    Null,
}

impl FieldValue {
    /// Returns the string payload, if this is a [`FieldValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a [`FieldValue::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Caller-supplied fields and blobs for one detail sub-item of a create.
#[derive(Clone, Debug, Default)]
pub struct DetailCreateInput {
    /// Scalar fields of the detail.
    pub fields: Map<String, Value>,
    /// Blobs to upload for this detail.
    pub images: Vec<ImageBlob>,
}

/// Caller-supplied payload for [`create`](crate::DataProvider::create).
#[derive(Clone, Debug, Default)]
pub struct CreateInput {
    /// Scalar fields of the record.
    pub fields: Map<String, Value>,
    /// Blobs to upload (flat resources only).
    pub images: Vec<ImageBlob>,
    /// Detail sub-items (nested resources only).
    pub details: Vec<DetailCreateInput>,
}

/// Caller-supplied fields and attachments for one detail of an update.
#[derive(Clone, Debug, Default)]
pub struct DetailUpdateInput {
    /// Scalar fields of the detail.
    pub fields: Map<String, Value>,
    /// Ids of already-persisted attachments to retain.
    pub old_images: Vec<AssetId>,
    /// Blobs to upload for this detail.
    pub new_images: Vec<ImageBlob>,
}

/// Caller-supplied payload for [`update`](crate::DataProvider::update).
#[derive(Clone, Debug, Default)]
pub struct UpdateInput {
    /// Scalar fields of the record.
    pub fields: Map<String, Value>,
    /// Ids of already-persisted attachments to retain (flat resources only).
    pub old_images: Vec<AssetId>,
    /// Blobs to upload (flat resources only).
    pub new_images: Vec<ImageBlob>,
    /// Detail sub-items (nested resources only).
    pub details: Vec<DetailUpdateInput>,
}

/// Schema-checked fields keyed by their static wire names.
pub type ValidatedFields = BTreeMap<&'static str, FieldValue>;

/// A schema-checked detail of a create payload.
#[derive(Clone, Debug)]
pub struct ValidatedDetailCreate {
    /// Checked scalar fields.
    pub fields: ValidatedFields,
    /// Blobs awaiting upload.
    pub images: Vec<ImageBlob>,
}

/// Topology-specific attachment portion of a checked create payload.
#[derive(Clone, Debug)]
pub enum CreateShape {
    /// One direct blob list on the record.
    Flat(Vec<ImageBlob>),
    /// Per-detail fields and blob lists.
    Nested(Vec<ValidatedDetailCreate>),
}

/// A fully schema-checked create payload.
#[derive(Clone, Debug)]
pub struct ValidatedCreate {
    /// Checked scalar fields of the record.
    pub fields: ValidatedFields,
    /// The attachment portion, matching the resource's topology.
    pub shape: CreateShape,
}

/// A schema-checked detail of an update payload.
#[derive(Clone, Debug)]
pub struct ValidatedDetailUpdate {
    /// Checked scalar fields.
    pub fields: ValidatedFields,
    /// Retained persisted attachment ids.
    pub old_images: Vec<AssetId>,
    /// Blobs awaiting upload.
    pub new_images: Vec<ImageBlob>,
}

/// Topology-specific attachment portion of a checked update payload.
#[derive(Clone, Debug)]
pub enum UpdateShape {
    /// Retained ids plus new blobs on the record itself.
    Flat {
        /// Retained persisted attachment ids.
        old_images: Vec<AssetId>,
        /// Blobs awaiting upload.
        new_images: Vec<ImageBlob>,
    },
    /// Per-detail fields, retained ids, and blob lists.
    Nested(Vec<ValidatedDetailUpdate>),
}

/// A fully schema-checked update payload.
#[derive(Clone, Debug)]
pub struct ValidatedUpdate {
    /// Checked scalar fields of the record.
    pub fields: ValidatedFields,
    /// The attachment portion, matching the resource's topology.
    pub shape: UpdateShape,
}

/// One record of a list response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRecord {
    /// The record's id.
    pub id: u64,
    /// Checked scalar fields.
    pub fields: ValidatedFields,
}

/// A page of records plus the collection's total count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListPage {
    /// The records of this page, in server order.
    pub data: Vec<ListRecord>,
    /// Total records in the collection (falls back to the page length when
    /// the backend omits or zeroes the pagination metadata).
    pub total: u64,
}

/// One detail sub-item of a nested show response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    /// The detail's id, when the backend assigns one.
    pub id: Option<u64>,
    /// Checked scalar fields.
    pub fields: ValidatedFields,
    /// Flattened persisted attachments of this detail.
    pub images: Vec<RemoteImage>,
}

/// A single fully-hydrated record from a show response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowRecord {
    /// The record's id.
    pub id: u64,
    /// Checked scalar fields.
    pub fields: ValidatedFields,
    /// Flattened persisted attachments (flat resources).
    pub images: Vec<RemoteImage>,
    /// Detail sub-items with their own attachments (nested resources).
    pub details: Vec<DetailView>,
}

/// Validates a single scalar value against its declared kind.
fn check_field(
    resource: ResourceType,
    operation: SchemaOperation,
    path: &str,
    kind: FieldKind,
    value: &Value,
) -> Result<FieldValue, ValidationError> {
    let mismatch = |expected: &str| {
        ValidationError::new(
            resource,
            operation,
            path,
            format!("expected {expected}, got {}", type_name(value)),
        )
    };
    match kind {
        FieldKind::Str => value
            .as_str()
            .map(|s| FieldValue::Str(s.to_string()))
            .ok_or_else(|| mismatch("a string")),
        FieldKind::NullableStr => match value {
            Value::Null => Ok(FieldValue::Null),
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            _ => Err(mismatch("a string or null")),
        },
        FieldKind::Bool => value
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| mismatch("a boolean")),
        FieldKind::Int => value
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| mismatch("an integer")),
        FieldKind::Date => {
            let raw = value.as_str().ok_or_else(|| mismatch("a date string"))?;
            shape::parse_date_value(raw).map(FieldValue::Date).ok_or_else(|| {
                ValidationError::new(
                    resource,
                    operation,
                    path,
                    format!("unparseable date `{raw}`"),
                )
            })
        }
    }
}

/// Validates an object's fields against a field schema.
///
/// Declared fields are required (nullable ones may be JSON null); fields
/// absent from the schema are dropped.
fn check_fields(
    resource: ResourceType,
    operation: SchemaOperation,
    path_prefix: &str,
    specs: &[FieldSpec],
    object: &Map<String, Value>,
) -> Result<ValidatedFields, ValidationError> {
    let mut fields = BTreeMap::new();
    for spec in specs {
        let path = if path_prefix.is_empty() {
            spec.name.to_string()
        } else {
            format!("{path_prefix}.{}", spec.name)
        };
        let value = object.get(spec.name).ok_or_else(|| {
            ValidationError::new(resource, operation, path.clone(), "missing required field")
        })?;
        fields.insert(
            spec.name,
            check_field(resource, operation, &path, spec.kind, value)?,
        );
    }
    Ok(fields)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validates a create payload against the resource's schema and topology.
///
/// # Errors
///
/// Returns a [`ValidationError`] when a field is missing or mistyped, when a
/// flat resource carries details, or when a nested resource carries
/// record-level blobs.
pub fn validate_create(
    resource: ResourceType,
    input: &CreateInput,
) -> Result<ValidatedCreate, ValidationError> {
    let operation = SchemaOperation::Create;
    let descriptor = resource.descriptor();
    let fields = check_fields(resource, operation, "", descriptor.fields, &input.fields)?;

    let shape = match descriptor.topology {
        AttachmentTopology::Flat => {
            if !input.details.is_empty() {
                return Err(ValidationError::new(
                    resource,
                    operation,
                    "details",
                    "flat resources do not carry details",
                ));
            }
            CreateShape::Flat(input.images.clone())
        }
        AttachmentTopology::Nested => {
            if !input.images.is_empty() {
                return Err(ValidationError::new(
                    resource,
                    operation,
                    "images",
                    "nested resources attach images per detail, not on the record",
                ));
            }
            let mut details = Vec::with_capacity(input.details.len());
            for (index, detail) in input.details.iter().enumerate() {
                details.push(ValidatedDetailCreate {
                    fields: check_fields(
                        resource,
                        operation,
                        &format!("details[{index}]"),
                        descriptor.detail_fields,
                        &detail.fields,
                    )?,
                    images: detail.images.clone(),
                });
            }
            CreateShape::Nested(details)
        }
    };

    Ok(ValidatedCreate { fields, shape })
}

/// Validates an update payload against the resource's schema and topology.
///
/// # Errors
///
/// Same failure modes as [`validate_create`].
pub fn validate_update(
    resource: ResourceType,
    input: &UpdateInput,
) -> Result<ValidatedUpdate, ValidationError> {
    let operation = SchemaOperation::Update;
    let descriptor = resource.descriptor();
    let fields = check_fields(resource, operation, "", descriptor.fields, &input.fields)?;

    let shape = match descriptor.topology {
        AttachmentTopology::Flat => {
            if !input.details.is_empty() {
                return Err(ValidationError::new(
                    resource,
                    operation,
                    "details",
                    "flat resources do not carry details",
                ));
            }
            UpdateShape::Flat {
                old_images: input.old_images.clone(),
                new_images: input.new_images.clone(),
            }
        }
        AttachmentTopology::Nested => {
            if !input.old_images.is_empty() || !input.new_images.is_empty() {
                return Err(ValidationError::new(
                    resource,
                    operation,
                    "images",
                    "nested resources attach images per detail, not on the record",
                ));
            }
            let mut details = Vec::with_capacity(input.details.len());
            for (index, detail) in input.details.iter().enumerate() {
                details.push(ValidatedDetailUpdate {
                    fields: check_fields(
                        resource,
                        operation,
                        &format!("details[{index}]"),
                        descriptor.detail_fields,
                        &detail.fields,
                    )?,
                    old_images: detail.old_images.clone(),
                    new_images: detail.new_images.clone(),
                });
            }
            UpdateShape::Nested(details)
        }
    };

    Ok(ValidatedUpdate { fields, shape })
}

/// Validates a list response body into a [`ListPage`].
///
/// Expects `{"data": [{"id", "attributes": {...}}, ...], "meta":
/// {"pagination": {"total": n}}}`.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the envelope or any record fails the
/// schema.
pub fn validate_list_page(
    resource: ResourceType,
    body: &Value,
) -> Result<ListPage, ValidationError> {
    let operation = SchemaOperation::List;
    let descriptor = resource.descriptor();
    let records = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::new(resource, operation, "data", "expected an array"))?;

    let mut data = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let path = format!("data[{index}]");
        let id = record.get("id").and_then(Value::as_u64).ok_or_else(|| {
            ValidationError::new(resource, operation, format!("{path}.id"), "expected an id")
        })?;
        let attributes = record
            .get("attributes")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ValidationError::new(
                    resource,
                    operation,
                    format!("{path}.attributes"),
                    "expected an object",
                )
            })?;
        data.push(ListRecord {
            id,
            fields: check_fields(resource, operation, &path, descriptor.fields, attributes)?,
        });
    }

    let reported = body
        .pointer("/meta/pagination/total")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let total = if reported == 0 {
        data.len() as u64
    } else {
        reported
    };

    Ok(ListPage { data, total })
}

/// Validates a show response body into a [`ShowRecord`].
///
/// Expects `{"data": {"id", "attributes": {...}}}` with attachments
/// populated; image envelopes are flattened to `{id, url}` pairs and date
/// fields are parsed.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the envelope, a field, or an image
/// envelope fails the schema.
pub fn validate_show_record(
    resource: ResourceType,
    body: &Value,
) -> Result<ShowRecord, ValidationError> {
    let operation = SchemaOperation::Show;
    let descriptor = resource.descriptor();
    let record = body.get("data").ok_or_else(|| {
        ValidationError::new(resource, operation, "data", "expected an object")
    })?;
    let id = record.get("id").and_then(Value::as_u64).ok_or_else(|| {
        ValidationError::new(resource, operation, "data.id", "expected an id")
    })?;
    let attributes = record
        .get("attributes")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ValidationError::new(resource, operation, "data.attributes", "expected an object")
        })?;

    let fields = check_fields(resource, operation, "data", descriptor.fields, attributes)?;

    let mut images = Vec::new();
    let mut details = Vec::new();
    match descriptor.topology {
        AttachmentTopology::Flat => {
            images = shape::flatten_image_envelope(attributes.get("images")).map_err(|reason| {
                ValidationError::new(resource, operation, "data.images", reason)
            })?;
        }
        AttachmentTopology::Nested => {
            let raw_details = attributes
                .get("details")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    ValidationError::new(resource, operation, "data.details", "expected an array")
                })?;
            for (index, raw) in raw_details.iter().enumerate() {
                let path = format!("data.details[{index}]");
                let object = raw.as_object().ok_or_else(|| {
                    ValidationError::new(resource, operation, path.clone(), "expected an object")
                })?;
                details.push(DetailView {
                    id: object.get("id").and_then(Value::as_u64),
                    fields: check_fields(
                        resource,
                        operation,
                        &path,
                        descriptor.detail_fields,
                        object,
                    )?,
                    images: shape::flatten_image_envelope(object.get("images")).map_err(
                        |reason| {
                            ValidationError::new(
                                resource,
                                operation,
                                format!("{path}.images"),
                                reason,
                            )
                        },
                    )?,
                });
            }
        }
    }

    Ok(ShowRecord {
        id,
        fields,
        images,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn news_fields() -> Map<String, Value> {
        json!({
            "title": "Grand opening",
            "content": "Doors open at nine.",
            "startDate": "2024-03-01T00:00:00Z",
            "endDate": "2024-03-08T00:00:00Z",
            "isTop": true,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_validate_create_flat_accepts_well_formed_input() {
        let input = CreateInput {
            fields: news_fields(),
            images: vec![ImageBlob::new("a.png", "image/png", vec![1])],
            details: Vec::new(),
        };

        let validated = validate_create(ResourceType::News, &input).unwrap();
        assert_eq!(
            validated.fields.get("title"),
            Some(&FieldValue::Str("Grand opening".to_string()))
        );
        assert_eq!(
            validated.fields.get("startDate"),
            Some(&FieldValue::Date(
                Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
            ))
        );
        let CreateShape::Flat(blobs) = validated.shape else {
            panic!("expected a flat shape");
        };
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn test_validate_create_rejects_missing_field() {
        let mut fields = news_fields();
        fields.remove("title");
        let input = CreateInput {
            fields,
            ..CreateInput::default()
        };

        let err = validate_create(ResourceType::News, &input).unwrap_err();
        assert_eq!(err.path, "title");
        assert_eq!(err.operation, SchemaOperation::Create);
        assert!(err.reason.contains("missing"));
    }

    #[test]
    fn test_validate_create_rejects_mistyped_field() {
        let mut fields = news_fields();
        fields.insert("isTop".to_string(), json!("yes"));
        let input = CreateInput {
            fields,
            ..CreateInput::default()
        };

        let err = validate_create(ResourceType::News, &input).unwrap_err();
        assert_eq!(err.path, "isTop");
        assert!(err.reason.contains("expected a boolean"));
    }

    #[test]
    fn test_validate_create_rejects_unparseable_date() {
        let mut fields = news_fields();
        fields.insert("startDate".to_string(), json!("not-a-date"));
        let input = CreateInput {
            fields,
            ..CreateInput::default()
        };

        let err = validate_create(ResourceType::News, &input).unwrap_err();
        assert_eq!(err.path, "startDate");
        assert!(err.reason.contains("unparseable date"));
    }

    #[test]
    fn test_validate_create_drops_unknown_fields() {
        let mut fields = news_fields();
        fields.insert("unknownExtra".to_string(), json!(42));
        let input = CreateInput {
            fields,
            ..CreateInput::default()
        };

        let validated = validate_create(ResourceType::News, &input).unwrap();
        assert!(!validated.fields.contains_key("unknownExtra"));
    }

    #[test]
    fn test_validate_create_flat_rejects_details() {
        let input = CreateInput {
            fields: news_fields(),
            images: Vec::new(),
            details: vec![DetailCreateInput::default()],
        };

        let err = validate_create(ResourceType::News, &input).unwrap_err();
        assert_eq!(err.path, "details");
    }

    #[test]
    fn test_validate_create_nested_rejects_record_level_images() {
        let input = CreateInput {
            fields: json!({"name": "Summer menu"}).as_object().cloned().unwrap(),
            images: vec![ImageBlob::new("a.png", "image/png", vec![1])],
            details: Vec::new(),
        };

        let err = validate_create(ResourceType::MealCombo, &input).unwrap_err();
        assert_eq!(err.path, "images");
    }

    #[test]
    fn test_validate_create_nested_checks_detail_fields() {
        let input = CreateInput {
            fields: json!({"name": "Summer menu"}).as_object().cloned().unwrap(),
            images: Vec::new(),
            details: vec![
                DetailCreateInput {
                    fields: json!({"title": "Starter", "content": "Soup"})
                        .as_object()
                        .cloned()
                        .unwrap(),
                    images: Vec::new(),
                },
                DetailCreateInput {
                    fields: json!({"title": "Main"}).as_object().cloned().unwrap(),
                    images: Vec::new(),
                },
            ],
        };

        let err = validate_create(ResourceType::MealCombo, &input).unwrap_err();
        assert_eq!(err.path, "details[1].content");
    }

    #[test]
    fn test_validate_update_flat_keeps_old_and_new_images() {
        let input = UpdateInput {
            fields: news_fields(),
            old_images: vec![4, 9],
            new_images: vec![ImageBlob::new("b.png", "image/png", vec![2])],
            details: Vec::new(),
        };

        let validated = validate_update(ResourceType::News, &input).unwrap();
        let UpdateShape::Flat {
            old_images,
            new_images,
        } = validated.shape
        else {
            panic!("expected a flat shape");
        };
        assert_eq!(old_images, vec![4, 9]);
        assert_eq!(new_images.len(), 1);
    }

    #[test]
    fn test_validate_update_nested_rejects_record_level_attachments() {
        let input = UpdateInput {
            fields: json!({"name": "Summer menu"}).as_object().cloned().unwrap(),
            old_images: vec![1],
            ..UpdateInput::default()
        };

        let err = validate_update(ResourceType::MealCombo, &input).unwrap_err();
        assert_eq!(err.path, "images");
    }

    fn room_fields() -> Map<String, Value> {
        json!({
            "name": "Lakeside suite",
            "intro": "Two rooms, lake view.",
            "count": 3,
            "maxCount": 4,
            "checkinTime": "15:00",
            "checkoutTime": "11:00",
            "holidayJudgment": null,
            "notice": "No smoking",
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_room_nullable_fields_accept_null() {
        let input = CreateInput {
            fields: room_fields(),
            ..CreateInput::default()
        };

        let validated = validate_create(ResourceType::Room, &input).unwrap();
        assert_eq!(validated.fields.get("holidayJudgment"), Some(&FieldValue::Null));
        assert_eq!(
            validated.fields.get("notice"),
            Some(&FieldValue::Str("No smoking".to_string()))
        );
        assert_eq!(validated.fields.get("count"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_validate_create_playground_rejects_missing_field() {
        let input = CreateInput {
            fields: json!({"title": "Sandpit"}).as_object().cloned().unwrap(),
            ..CreateInput::default()
        };

        let err = validate_create(ResourceType::Playground, &input).unwrap_err();
        assert_eq!(err.path, "content");
        assert!(err.reason.contains("missing"));
    }

    #[test]
    fn test_validate_create_room_rejects_missing_field() {
        let mut fields = room_fields();
        fields.remove("maxCount");
        let input = CreateInput {
            fields,
            ..CreateInput::default()
        };

        let err = validate_create(ResourceType::Room, &input).unwrap_err();
        assert_eq!(err.path, "maxCount");
        assert!(err.reason.contains("missing"));
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Int(7).as_int(), Some(7));
        assert_eq!(FieldValue::Str("x".to_string()).as_str(), Some("x"));
        assert_eq!(FieldValue::Bool(true).as_int(), None);
        assert_eq!(FieldValue::Null.as_str(), None);
    }

    #[test]
    fn test_validate_list_page_parses_records_and_total() {
        let body = json!({
            "data": [
                {"id": 1, "attributes": {"title": "One", "content": "A"}},
                {"id": 2, "attributes": {"title": "Two", "content": "B"}},
            ],
            "meta": {"pagination": {"total": 14}},
        });

        let page = validate_list_page(ResourceType::Playground, &body).unwrap();
        assert_eq!(page.total, 14);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, 1);
        assert_eq!(
            page.data[1].fields.get("title"),
            Some(&FieldValue::Str("Two".to_string()))
        );
    }

    #[test]
    fn test_validate_list_page_total_falls_back_to_page_length() {
        let body = json!({
            "data": [
                {"id": 1, "attributes": {"title": "One", "content": "A"}},
                {"id": 2, "attributes": {"title": "Two", "content": "B"}},
            ],
            "meta": {},
        });

        let page = validate_list_page(ResourceType::Playground, &body).unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_validate_list_page_rejects_malformed_record() {
        let body = json!({
            "data": [{"id": 1, "attributes": {"title": "One"}}],
            "meta": {"pagination": {"total": 1}},
        });

        let err = validate_list_page(ResourceType::Playground, &body).unwrap_err();
        assert_eq!(err.path, "data[0].content");
        assert_eq!(err.operation, SchemaOperation::List);
    }

    #[test]
    fn test_validate_show_record_flattens_flat_images() {
        let body = json!({
            "data": {
                "id": 7,
                "attributes": {
                    "title": "One",
                    "content": "A",
                    "images": {"data": [
                        {"id": 11, "attributes": {"url": "/u/11.png"}},
                        {"id": 12, "attributes": {"url": "/u/12.png"}},
                    ]},
                },
            },
        });

        let record = validate_show_record(ResourceType::Playground, &body).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(
            record.images,
            vec![
                RemoteImage { id: 11, url: "/u/11.png".to_string() },
                RemoteImage { id: 12, url: "/u/12.png".to_string() },
            ]
        );
        assert!(record.details.is_empty());
    }

    #[test]
    fn test_validate_show_record_parses_dates() {
        let body = json!({
            "data": {
                "id": 3,
                "attributes": {
                    "title": "T",
                    "content": "C",
                    "startDate": "2024-03-01",
                    "endDate": "2024-03-08",
                    "isTop": false,
                    "images": {"data": null},
                },
            },
        });

        let record = validate_show_record(ResourceType::News, &body).unwrap();
        assert_eq!(
            record.fields.get("startDate"),
            Some(&FieldValue::Date(
                Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
            ))
        );
        assert!(record.images.is_empty());
    }

    #[test]
    fn test_validate_show_record_nested_details() {
        let body = json!({
            "data": {
                "id": 5,
                "attributes": {
                    "name": "Summer menu",
                    "details": [
                        {
                            "id": 31,
                            "title": "Starter",
                            "content": "Soup",
                            "images": {"data": [
                                {"id": 41, "attributes": {"url": "/u/41.png"}},
                            ]},
                        },
                        {
                            "id": 32,
                            "title": "Main",
                            "content": "Fish",
                            "images": {"data": null},
                        },
                    ],
                },
            },
        });

        let record = validate_show_record(ResourceType::MealCombo, &body).unwrap();
        assert_eq!(record.details.len(), 2);
        assert_eq!(record.details[0].id, Some(31));
        assert_eq!(record.details[0].images[0].id, 41);
        assert!(record.details[1].images.is_empty());
    }

    #[test]
    fn test_validate_show_record_rejects_malformed_image_envelope() {
        let body = json!({
            "data": {
                "id": 7,
                "attributes": {
                    "title": "One",
                    "content": "A",
                    "images": {"data": "nope"},
                },
            },
        });

        let err = validate_show_record(ResourceType::Playground, &body).unwrap_err();
        assert_eq!(err.path, "data.images");
        assert_eq!(err.operation, SchemaOperation::Show);
    }
}
