//! Integration tests for the two-phase write operations: blobs are
//! uploaded first, then the record is written referencing the stored ids.

use std::sync::Arc;

use cms_admin::{
    AccessToken, ApiBaseUrl, CmsConfig, CreateInput, DataProvider, DetailCreateInput,
    DetailUpdateInput, ImageBlob, ProviderError, ResourceType, StaticTokenProvider, UpdateInput,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a provider pointed at the given mock server.
fn create_provider(server: &MockServer) -> DataProvider {
    let config = CmsConfig::builder()
        .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .token_provider(Arc::new(StaticTokenProvider::new(
            AccessToken::new("admin-token").unwrap(),
        )))
        .build()
        .unwrap();
    DataProvider::new(&config)
}

fn news_fields() -> serde_json::Map<String, serde_json::Value> {
    json!({
        "title": "Grand opening",
        "content": "Doors open at nine.",
        "startDate": "2024-03-01T00:00:00Z",
        "endDate": "2024-03-07T20:00:00Z",
        "isTop": true,
    })
    .as_object()
    .cloned()
    .unwrap()
}

/// The wire form of [`news_fields`]: dates shifted by the venue offset and
/// truncated to day strings.
fn news_wire_fields() -> serde_json::Value {
    json!({
        "title": "Grand opening",
        "content": "Doors open at nine.",
        "startDate": "2024-03-01",
        "endDate": "2024-03-08",
        "isTop": true,
    })
}

fn blob(name: &str, bytes: &str) -> ImageBlob {
    ImageBlob::new(name, "image/png", bytes.as_bytes().to_vec())
}

// ============================================================================
// create (flat)
// ============================================================================

#[tokio::test]
async fn test_create_flat_uploads_then_posts_with_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "url": "/uploads/7.png"},
            {"id": 8, "url": "/uploads/8.png"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut expected = news_wire_fields();
    expected["images"] = json!([7, 8]);
    Mock::given(method("POST"))
        .and(path("/news"))
        .and(body_json(json!({"data": expected})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 99}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider(&server);
    let body = provider
        .create(
            ResourceType::News,
            CreateInput {
                fields: news_fields(),
                images: vec![blob("a.png", "first-image"), blob("b.png", "second-image")],
                details: Vec::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"data": {"id": 99}}));
}

#[tokio::test]
async fn test_create_flat_without_images_skips_upload_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    // No `images` key at all when nothing was uploaded.
    Mock::given(method("POST"))
        .and(path("/news"))
        .and(body_json(json!({"data": news_wire_fields()})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 100}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider(&server);
    provider
        .create(
            ResourceType::News,
            CreateInput {
                fields: news_fields(),
                ..CreateInput::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_validation_failure_makes_no_network_calls() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would fail the expect(0) below.
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut fields = news_fields();
    fields.remove("title");

    let provider = create_provider(&server);
    let result = provider
        .create(
            ResourceType::News,
            CreateInput {
                fields,
                images: vec![blob("a.png", "unused")],
                ..CreateInput::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ProviderError::Validation(_))));
}

#[tokio::test]
async fn test_create_flat_upload_failure_aborts_record_write() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "disk full"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let provider = create_provider(&server);
    let result = provider
        .create(
            ResourceType::News,
            CreateInput {
                fields: news_fields(),
                images: vec![blob("a.png", "doomed")],
                ..CreateInput::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ProviderError::Upload(_))));
}

// ============================================================================
// create (nested)
// ============================================================================

#[tokio::test]
async fn test_create_nested_degrades_failed_detail_batch() {
    let server = MockServer::start().await;

    // First detail's batch uploads fine.
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("starter-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 101, "url": "/uploads/101.png"},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    // Second detail's batch fails.
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("main-image"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    // Failed detail omits `images`; blob-less detail carries an explicit null.
    Mock::given(method("POST"))
        .and(path("/food-stories"))
        .and(body_json(json!({"data": {
            "name": "Summer menu",
            "details": [
                {"title": "Starter", "content": "Soup", "images": [101]},
                {"title": "Main", "content": "Fish"},
                {"title": "Dessert", "content": "Ice cream", "images": null},
            ],
        }})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 55}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let detail = |title: &str, content: &str, images: Vec<ImageBlob>| DetailCreateInput {
        fields: json!({"title": title, "content": content})
            .as_object()
            .cloned()
            .unwrap(),
        images,
    };

    let provider = create_provider(&server);
    provider
        .create(
            ResourceType::MealCombo,
            CreateInput {
                fields: json!({"name": "Summer menu"}).as_object().cloned().unwrap(),
                images: Vec::new(),
                details: vec![
                    detail("Starter", "Soup", vec![blob("s.png", "starter-image")]),
                    detail("Main", "Fish", vec![blob("m.png", "main-image")]),
                    detail("Dessert", "Ice cream", Vec::new()),
                ],
            },
        )
        .await
        .unwrap();
}

// ============================================================================
// update (flat)
// ============================================================================

#[tokio::test]
async fn test_update_flat_unions_retained_and_uploaded_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 77, "url": "/uploads/77.png"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut expected = news_wire_fields();
    expected["images"] = json!([4, 9, 77]);
    Mock::given(method("PUT"))
        .and(path("/news/3"))
        .and(body_json(json!({"data": expected})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 3}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider(&server);
    provider
        .update(
            ResourceType::News,
            3,
            UpdateInput {
                fields: news_fields(),
                old_images: vec![4, 9],
                new_images: vec![blob("c.png", "replacement")],
                details: Vec::new(),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_flat_empty_image_list_detaches_everything() {
    let server = MockServer::start().await;

    let mut expected = news_wire_fields();
    expected["images"] = json!([]);
    Mock::given(method("PUT"))
        .and(path("/news/3"))
        .and(body_json(json!({"data": expected})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 3}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider(&server);
    provider
        .update(
            ResourceType::News,
            3,
            UpdateInput {
                fields: news_fields(),
                ..UpdateInput::default()
            },
        )
        .await
        .unwrap();
}

// ============================================================================
// update (nested)
// ============================================================================

#[tokio::test]
async fn test_update_nested_failed_batch_falls_back_to_retained_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("starter-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 101, "url": "/uploads/101.png"},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("main-new"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    // Detail 1: retained [11] plus uploaded 101. Detail 2: its upload
    // failed and it retained nothing, so it ends empty. Detail 3: retained
    // [33], nothing new to upload.
    Mock::given(method("PUT"))
        .and(path("/food-stories/5"))
        .and(body_json(json!({"data": {
            "name": "Summer menu",
            "details": [
                {"title": "Starter", "content": "Soup", "images": [11, 101]},
                {"title": "Main", "content": "Fish", "images": []},
                {"title": "Dessert", "content": "Ice cream", "images": [33]},
            ],
        }})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 5}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let detail = |title: &str,
                  content: &str,
                  old_images: Vec<u64>,
                  new_images: Vec<ImageBlob>| DetailUpdateInput {
        fields: json!({"title": title, "content": content})
            .as_object()
            .cloned()
            .unwrap(),
        old_images,
        new_images,
    };

    let provider = create_provider(&server);
    provider
        .update(
            ResourceType::MealCombo,
            5,
            UpdateInput {
                fields: json!({"name": "Summer menu"}).as_object().cloned().unwrap(),
                old_images: Vec::new(),
                new_images: Vec::new(),
                details: vec![
                    detail("Starter", "Soup", vec![11], vec![blob("s.png", "starter-new")]),
                    detail("Main", "Fish", Vec::new(), vec![blob("m.png", "main-new")]),
                    detail("Dessert", "Ice cream", vec![33], Vec::new()),
                ],
            },
        )
        .await
        .unwrap();
}
