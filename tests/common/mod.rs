//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use invoicechain_ledger::server::{build_router, AppState, Config};

/// Router with a fresh in-memory store and default configuration.
pub fn test_app() -> axum::Router<()> {
    test_app_with(Config::default())
}

pub fn test_app_with(config: Config) -> axum::Router<()> {
    let state = AppState::in_memory(&config).unwrap();
    build_router(&config).unwrap().with_state(state)
}

/// Send a request and decode the JSON response body (`{}` when empty).
pub async fn send_request(
    app: &axum::Router<()>,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, _, json) = send_request_with_headers(app, method, uri, body).await;
    (status, json)
}

pub async fn send_request_with_headers(
    app: &axum::Router<()>,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }

    let body = body
        .map(|v| Body::from(serde_json::to_vec(&v).unwrap()))
        .unwrap_or_else(|| Body::from(Vec::new()));

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    let json = if bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes) }))
    };

    (status, headers, json)
}

/// Send a raw (possibly malformed) body with a JSON content type.
pub async fn send_raw(app: &axum::Router<()>, method: Method, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));
    (status, json)
}

/// Minimal valid inspection: steel delivery at a Pune warehouse
pub fn steel_inspection() -> serde_json::Value {
    json!({
        "submitterId": "E1",
        "siteId": "W1",
        "location": "Pune",
        "sensorReadings": { "temperature": 22 },
        "result": { "rawMaterial": "Steel" }
    })
}

/// Full engineer-check form payload, using the form's own field names
pub fn engineer_check_form(engineer_id: &str, material: &str) -> serde_json::Value {
    json!({
        "engineerId": engineer_id,
        "warehouseId": "WH-07",
        "location": "Bhiwandi",
        "sensorData": {
            "temperature": 28.5,
            "humidity": 61,
            "weight": null
        },
        "result": {
            "rawMaterial": material,
            "quantity": 120,
            "quality": "Good",
            "vendor": { "name": "Shree Metals", "contact": "+91-22-5550-0100" },
            "notes": "Seals intact",
            "media": {
                "photos": [
                    { "name": "pallet.jpg", "type": "image/jpeg", "data": "data:image/jpeg;base64,/9j/4AAQ" }
                ],
                "videos": []
            }
        }
    })
}

/// Invoice-proof payload carrying line items
pub fn invoice_proof(invoice_number: &str) -> serde_json::Value {
    json!({
        "submitterId": "MSME-42",
        "siteId": "GSTIN-27AAACT2727Q1ZW",
        "location": "Nashik",
        "sensorReadings": {},
        "result": {
            "invoiceNumber": invoice_number,
            "vendor": { "name": "Acme Buyers Pvt Ltd" },
            "lineItems": [
                { "description": "Copper wire", "quantity": 10, "unitPrice": 450, "total": 4500 },
                { "description": "Transport", "quantity": 1, "unitPrice": 800, "total": 800 }
            ]
        }
    })
}
