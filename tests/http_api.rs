//! HTTP-level tests: the payment router wired to an in-memory store, driven
//! with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mockpay::{db::Db, payment};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Db::in_memory().await.unwrap();
    payment::api::router().with_state(db)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_payment(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/payments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_invoice(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/invoices/{id}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn payment_submission_and_invoice_lookup() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(post_payment(&json!({
            "name": "Alice",
            "card_number": "4532015112830366",
            "payment_amount": 19.99,
            "currency": "USD"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Payment Successful");
    let id = body["payment_id"].as_i64().unwrap();

    let response = app.oneshot(get_invoice(&id.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["payment_amount"], json!(19.99));
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["valid"], json!(true));
}

#[tokio::test]
async fn invalid_card_is_a_bad_request() {
    let response = app()
        .await
        .oneshot(post_payment(&json!({
            "name": "Mallory",
            "card_number": "4532015112830367",
            "payment_amount": 10.0,
            "currency": "USD"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("card"));
}

#[tokio::test]
async fn non_positive_amount_is_a_bad_request() {
    let response = app()
        .await
        .oneshot(post_payment(&json!({
            "name": "Alice",
            "card_number": "4532015112830366",
            "payment_amount": -5.0,
            "currency": "USD"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn unknown_invoice_is_not_found() {
    let response = app().await.oneshot(get_invoice("999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("999999"));
}

#[tokio::test]
async fn malformed_invoice_ids_are_bad_requests() {
    for raw in ["abc", "-1", "0", "1.5"] {
        let response = app().await.oneshot(get_invoice(raw)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{raw:?}");
    }
}
