//! Handler tests for the Products domain
//!
//! The router runs over in-memory repositories and a temporary upload
//! directory, covering status codes, bodies and the error envelope.

mod common;

use axum::http::StatusCode;
use common::*;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};

fn shoe(category: ObjectId) -> Value {
    json!({
        "name": "Shoe",
        "price": 20,
        "category": category.to_hex(),
        "countInStock": 5
    })
}

async fn create(app: &TestApp, body: Value) -> Value {
    let (status, created) = app.send(json_request("POST", "/", &body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    created
}

#[tokio::test]
async fn test_create_with_existing_category() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");

    let created = create(&app, shoe(category)).await;

    assert_eq!(created["id"].as_str().unwrap().len(), 24);
    assert_eq!(created["name"], "Shoe");
    assert_eq!(created["price"], 20.0);
    assert_eq!(created["countInStock"], 5);
    assert_eq!(created["category"], category.to_hex());
    assert_eq!(created["isFeatured"], false);
    assert_eq!(created["images"], json!([]));
}

#[tokio::test]
async fn test_create_with_bogus_category_is_400_and_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    app.categories.insert("Shoes");

    let (status, body) = app
        .send(json_request("POST", "/", &shoe(ObjectId::new())))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Category");
    assert_eq!(body["success"], false);
    assert_eq!(app.products.len(), 0);
}

#[tokio::test]
async fn test_create_with_invalid_body_is_400_with_details() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");

    let mut body = shoe(category);
    body["countInStock"] = json!(1000);
    let (status, response) = app.send(json_request("POST", "/", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["kind"], "VALIDATION_ERROR");
    assert_eq!(response["details"].as_object().unwrap().len(), 1);

    let (status, _) = app
        .send(json_request("POST", "/", &json!({"name": "Shoe"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.products.len(), 0);
}

#[tokio::test]
async fn test_get_populates_category() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;

    let uri = format!("/{}", created["id"].as_str().unwrap());
    let (status, body) = app.send(empty_request("GET", &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["id"], category.to_hex());
    assert_eq!(body["category"]["name"], "Shoes");
}

#[tokio::test]
async fn test_get_with_deleted_category_renders_null() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    app.categories.remove(category);

    let uri = format!("/{}", created["id"].as_str().unwrap());
    let (status, body) = app.send(empty_request("GET", &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["category"].is_null());
}

#[tokio::test]
async fn test_missing_ids_are_404_not_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let uri = format!("/{}", ObjectId::new().to_hex());

    let (status, body) = app.send(empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found!");

    let (status, _) = app.send(json_request("PUT", &uri, &shoe(category))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(json_request("PUT", &uri, &shoe(ObjectId::new())))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "unknown product checked first: {body}");
    assert_eq!(body["kind"], "NOT_FOUND");

    let (status, _) = app.send(empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_ids_are_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");

    let (status, body) = app.send(empty_request("GET", "/12345")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_OBJECT_ID");

    let (status, _) = app
        .send(json_request("PUT", "/12345", &shoe(category)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(empty_request("DELETE", "/12345")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let shoes = app.categories.insert("Shoes");
    let boots = app.categories.insert("Boots");
    let created = create(&app, shoe(shoes)).await;
    let id = created["id"].as_str().unwrap();

    let body = json!({
        "name": "Boot",
        "price": 55.5,
        "category": boots.to_hex(),
        "countInStock": 2,
        "isFeatured": true
    });
    let (status, updated) = app.send(json_request("PUT", &format!("/{id}"), &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Boot");
    assert_eq!(updated["category"], boots.to_hex());
    assert_eq!(updated["isFeatured"], true);
    assert_eq!(updated["dateCreated"], created["dateCreated"]);
}

#[tokio::test]
async fn test_update_with_bogus_category_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/{}", created["id"].as_str().unwrap());

    let (status, body) = app
        .send(json_request("PUT", &uri, &shoe(ObjectId::new())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Category");
}

#[tokio::test]
async fn test_delete_twice() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/{}", created["id"].as_str().unwrap());

    let (status, body) = app.send(empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "The product is deleted!"}));

    let (status, body) = app.send(empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_count_tracks_inserts() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");

    let (_, before) = app.send(empty_request("GET", "/get/count")).await;
    let before = before["productCount"].as_u64().unwrap();

    for _ in 0..3 {
        create(&app, shoe(category)).await;
    }

    let (status, after) = app.send(empty_request("GET", "/get/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["productCount"].as_u64().unwrap(), before + 3);
}

#[tokio::test]
async fn test_list_filters_by_categories() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let shoes = app.categories.insert("Shoes");
    let books = app.categories.insert("Books");
    let toys = app.categories.insert("Toys");

    for category in [shoes, shoes, books, toys] {
        create(&app, shoe(category)).await;
    }

    let (status, all) = app.send(empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 4);

    let uri = format!("/?categories={},{},", shoes.to_hex(), books.to_hex());
    let (status, some) = app.send(empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    let some = some.as_array().unwrap();
    assert_eq!(some.len(), 3);
    assert!(
        some.iter()
            .all(|p| p["category"] == shoes.to_hex() || p["category"] == books.to_hex())
    );

    let (status, _) = app.send(empty_request("GET", "/?categories=")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(empty_request("GET", "/?categories=not-an-id"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_OBJECT_ID");
}

#[tokio::test]
async fn test_featured_limits() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");

    for featured in [true, true, true, false] {
        let mut body = shoe(category);
        body["isFeatured"] = json!(featured);
        create(&app, body).await;
    }

    for uri in ["/get/featured", "/get/featured/0"] {
        let (status, body) = app.send(empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::OK);
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 3, "{uri}");
        assert!(products.iter().all(|p| p["isFeatured"] == true));
    }

    let (status, body) = app.send(empty_request("GET", "/get/featured/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = app.send(empty_request("GET", "/get/featured/many")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_featured_empty_is_200() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());

    let (status, body) = app.send(empty_request("GET", "/get/featured/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_upload_png_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());

    let request = multipart_request(
        "POST",
        "/upload",
        &[("image", "running shoe.png", "image/png", b"\x89PNG fake".as_slice())],
    );
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let file_name = body["fileName"].as_str().unwrap();
    assert!(file_name.starts_with("running-shoe-"));
    assert!(file_name.ends_with(".png"));
    assert_eq!(
        body["url"],
        format!("http://shop.test/public/uploads/{file_name}")
    );
    assert_eq!(files_in(dir.path()), vec![file_name.to_string()]);
}

#[tokio::test]
async fn test_upload_text_is_rejected_and_nothing_written() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());

    let request = multipart_request(
        "POST",
        "/upload",
        &[("image", "notes.txt", "text/plain", b"hello".as_slice())],
    );
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_upload_without_image_part_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());

    let (status, _) = app.send(multipart_request("POST", "/upload", &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(json_request("POST", "/upload", &json!({"image": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::with_upload_limit(dir.path(), 1024);
    let big = vec![0u8; 4096];

    let request = multipart_request("POST", "/upload", &[("image", "big.png", "image/png", big.as_slice())]);
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_gallery_replaces_images() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/gallery-images/{}", created["id"].as_str().unwrap());

    let request = multipart_request(
        "PUT",
        &uri,
        &[
            ("images", "front.png", "image/png", b"front".as_slice()),
            ("images", "side.jpg", "image/jpeg", b"side".as_slice()),
        ],
    );
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].as_str().unwrap().contains("/public/uploads/front-"));
    assert!(images[1].as_str().unwrap().ends_with(".jpeg"));
    assert_eq!(files_in(dir.path()).len(), 2);
}

#[tokio::test]
async fn test_gallery_parts_with_same_name_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/gallery-images/{}", created["id"].as_str().unwrap());

    let request = multipart_request(
        "PUT",
        &uri,
        &[
            ("images", "a.png", "image/png", b"one".as_slice()),
            ("images", "a.png", "image/png", b"two".as_slice()),
        ],
    );
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_ne!(images[0], images[1]);
    assert_eq!(files_in(dir.path()).len(), 2);
}

#[tokio::test]
async fn test_gallery_with_one_bad_part_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/gallery-images/{}", created["id"].as_str().unwrap());

    let request = multipart_request(
        "PUT",
        &uri,
        &[
            ("images", "front.png", "image/png", b"front".as_slice()),
            ("images", "virus.exe", "application/octet-stream", b"MZ".as_slice()),
        ],
    );
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_gallery_caps_file_count() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let category = app.categories.insert("Shoes");
    let created = create(&app, shoe(category)).await;
    let uri = format!("/gallery-images/{}", created["id"].as_str().unwrap());

    let parts: Vec<Part<'_>> = (0..11)
        .map(|_| ("images", "a.png", "image/png", b"x".as_slice()))
        .collect();
    let (status, _) = app.send(multipart_request("PUT", &uri, &parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_gallery_for_missing_product_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::new(dir.path());
    let uri = format!("/gallery-images/{}", ObjectId::new().to_hex());

    let request = multipart_request("PUT", &uri, &[("images", "a.png", "image/png", b"x".as_slice())]);
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(files_in(dir.path()).is_empty());
}
