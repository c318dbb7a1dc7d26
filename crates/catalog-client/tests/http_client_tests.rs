//! # Integration Tests for CatalogClient
//!
//! Runs the reqwest client against wiremock servers to check request
//! construction, response parsing, and error mapping.

use catalog_client::{CatalogApi, CatalogClient, ClientConfig, ClientError, ImageFile, ItemSubmission};
use wiremock::matchers::{body_json, body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CatalogClient {
    let config = ClientConfig::new(&server.uri()).expect("valid config");
    CatalogClient::new(config).expect("client build")
}

fn chair_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Chair",
        "type": "Furniture",
        "description": "Oak",
        "images": ["http://localhost:5000/uploads/1-a.png"]
    })
}

#[tokio::test]
async fn list_items_parses_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            chair_json(),
            {"name": "Lamp", "type": "Lighting", "description": "Brass", "coverImage": "lamp.png", "images": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).list_items().await.expect("list");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Chair");
    assert_eq!(items[0].item_type, "Furniture");
    assert_eq!(items[1].cover_image.as_deref(), Some("lamp.png"));
    assert!(items[1].images.is_empty());
}

#[tokio::test]
async fn list_items_maps_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).list_items().await.unwrap_err();
    match err {
        ClientError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_items_rejects_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).list_items().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }));
}

#[tokio::test]
async fn create_item_sends_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"name\""))
        .and(body_string_contains("name=\"type\""))
        .and(body_string_contains("name=\"coverImage\""))
        .and(body_string_contains("filename=\"a.png\""))
        .and(body_string_contains("image-bytes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(chair_json()))
        .expect(1)
        .mount(&server)
        .await;

    let submission = ItemSubmission {
        name: "Chair".into(),
        item_type: "Furniture".into(),
        description: "Oak".into(),
        cover_image: Some("cover.png".into()),
        images: vec![ImageFile {
            file_name: "a.png".into(),
            content_type: Some("image/png".into()),
            bytes: b"image-bytes".to_vec(),
        }],
    };

    let item = client(&server).create_item(&submission).await.expect("create");
    assert_eq!(item.name, "Chair");
    assert_eq!(item.images.len(), 1);
}

#[tokio::test]
async fn create_item_is_not_retried_on_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "error": {"code": "VALIDATION_ERROR", "message": "too many images"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .create_item(&ItemSubmission::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }));
}

#[tokio::test]
async fn enquire_posts_item_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/enquire"))
        .and(body_json(serde_json::json!({"itemName": "Chair"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("Enquiry email sent."))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).enquire("Chair").await.expect("enquire");
    assert_eq!(reply, "Enquiry email sent.");
}

#[tokio::test]
async fn enquire_failure_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/enquire"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Failed to send enquiry email."))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).enquire("Chair").await.unwrap_err();
    match err {
        ClientError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Failed to send enquiry email.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn base_url_has_no_trailing_slash() {
    let server = MockServer::start().await;
    let c = client(&server);
    assert_eq!(c.base_url(), server.uri().trim_end_matches('/'));
}
