//! Staff API tests.
//!
//! Every request here is answered before the Shopify client is called.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use freshcounter_integration_tests::{TEST_API_TOKEN, json_body, send, staff_request};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let response = send(Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_staff_route_requires_token() {
    let response = send(
        Request::get("/api/orders/1001/status")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("bearer token"));
}

#[tokio::test]
async fn test_staff_route_rejects_wrong_token() {
    let response = send(
        Request::get("/api/orders/1001/status")
            .header("authorization", "Bearer not-the-token")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_staff_route_requires_staff_name() {
    let response = send(
        Request::get("/api/orders/1001/status")
            .header("authorization", format!("Bearer {TEST_API_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("X-Staff-First-Name"));
}

#[tokio::test]
async fn test_variants_preview() {
    let response = send(staff_request(
        "POST",
        "/api/variants/preview",
        Some(json!({
            "options": [
                { "name": "Size", "values": [{ "name": "1kg" }, { "name": "5kg" }] },
                { "name": "Grind", "values": [{ "name": "Whole" }, { "name": "Ground" }] }
            ],
            "prior_variants": [{
                "id": "gid://shopify/ProductVariant/11",
                "title": "1kg / Whole",
                "price": "4.50",
                "barcode": "0001",
                "selected_options": [
                    { "name": "Size", "value": "1kg" },
                    { "name": "Grind", "value": "Whole" }
                ],
                "is_new": false
            }, {
                "id": "gid://shopify/ProductVariant/12",
                "title": "500g / Whole",
                "price": "2.50",
                "barcode": "",
                "selected_options": [
                    { "name": "Size", "value": "500g" },
                    { "name": "Grind", "value": "Whole" }
                ],
                "is_new": false
            }]
        })),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let titles: Vec<&str> = body["variants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["1kg / Whole", "1kg / Ground", "5kg / Whole", "5kg / Ground"]
    );

    let kept = &body["variants"][0];
    assert_eq!(kept["id"], "gid://shopify/ProductVariant/11");
    assert_eq!(kept["price"], "4.50");
    assert_eq!(kept["is_new"], false);

    let placeholder = &body["variants"][1];
    assert_eq!(placeholder["id"], "new-1kg / Ground");
    assert_eq!(placeholder["price"], "0.00");
    assert_eq!(placeholder["is_new"], true);

    assert_eq!(body["to_delete"], json!(["gid://shopify/ProductVariant/12"]));
}

#[tokio::test]
async fn test_invalid_order_id() {
    let response = send(staff_request("GET", "/api/orders/not-an-id/status", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_options_validates_first() {
    let response = send(staff_request(
        "PUT",
        "/api/products/123/options",
        Some(json!({
            "current_options": [
                { "name": "Size", "values": [{ "name": "1kg" }, { "name": "1kg" }] }
            ]
        })),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "values");
    assert!(
        body["details"][0]["message"]
            .as_str()
            .unwrap()
            .contains("more than once")
    );
}

#[tokio::test]
async fn test_create_product_requires_new_product() {
    let response = send(staff_request(
        "POST",
        "/api/products",
        Some(json!({
            "current_options": [{ "name": "Size", "values": [{ "name": "1kg" }] }]
        })),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inventory_adjust_rejects_zero_delta() {
    let response = send(staff_request(
        "POST",
        "/api/inventory/adjust",
        Some(json!({
            "inventory_item_id": "7",
            "location_id": "1",
            "delta": 0
        })),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "delta");
}

#[tokio::test]
async fn test_inventory_adjust_needs_a_location() {
    let response = send(staff_request(
        "POST",
        "/api/inventory/adjust",
        Some(json!({ "inventory_item_id": "7", "delta": 3 })),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "location_id");
}
