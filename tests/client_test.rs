//! Integration tests for the transaction API client against a mock backend.

mod common;

use axum::http::StatusCode;
use common::{date, MockBackend};
use savegen::models::{Category, KnownCategory, TransactionType};
use savegen::services::transaction_client::{NewTransaction, TransactionClient};
use savegen::AppError;
use serde_json::json;
use std::time::Duration;

fn client_for(backend: &MockBackend) -> TransactionClient {
    TransactionClient::new(&backend.base_url, Duration::from_secs(5)).unwrap()
}

/// Fetching normalises amounts, categories and ids from the wire format.
#[tokio::test]
async fn test_fetch_transactions() {
    let backend = MockBackend::start(vec![
        json!({
            "id": 17,
            "user_id": 1,
            "date": "2025-04-02",
            "detail": "April rent",
            "amount": -1500.0,
            "transaction_type": "debit",
            "transaction_category": "rent"
        }),
        json!({
            "id": "abc",
            "date": "2025-04-01T08:30:00Z",
            "amount": 5000,
            "transaction_type": "credit",
            "transaction_category": null
        }),
        json!({
            "date": "2025-04-03",
            "amount": 12.5,
            "transaction_type": "debit",
            "transaction_category": "pets"
        }),
    ])
    .await;

    let records = client_for(&backend).fetch_transactions(1).await.unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].id.as_deref(), Some("17"));
    assert_eq!(records[0].amount_cents(), 150_000);
    assert_eq!(records[0].transaction_type, TransactionType::Debit);
    assert_eq!(
        records[0].transaction_category,
        Category::Known(KnownCategory::Rent)
    );
    assert_eq!(records[0].detail_text(), "April rent");

    assert_eq!(records[1].id.as_deref(), Some("abc"));
    assert_eq!(records[1].parsed_date(), Some(date(2025, 4, 1)));
    assert_eq!(records[1].transaction_category, Category::default());

    assert_eq!(records[2].id, None);
    assert_eq!(records[2].amount_cents(), 1_250);
    assert_eq!(records[2].transaction_category, Category::Other("pets".into()));

    assert_eq!(backend.requests(), vec!["user_id=1".to_string()]);
}

/// An empty ledger is not an error.
#[tokio::test]
async fn test_fetch_empty() {
    let backend = MockBackend::start(Vec::new()).await;
    let records = client_for(&backend).fetch_transactions(9).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(backend.requests(), vec!["user_id=9".to_string()]);
}

/// Creating a transaction sends the magnitude with a type derived from the sign.
#[tokio::test]
async fn test_create_transaction() {
    let backend = MockBackend::start(Vec::new()).await;
    let client = client_for(&backend);

    let request = NewTransaction::from_signed_amount(
        4,
        -75.25,
        date(2025, 4, 10),
        "Groceries",
        KnownCategory::Groceries.into(),
    )
    .unwrap();
    let created = client.create_transaction(&request).await.unwrap();

    assert_eq!(created.id.as_deref(), Some("tx-1"));
    assert_eq!(created.amount_cents(), 7_525);
    assert!(created.is_debit());
    assert_eq!(created.date, "2025-04-10");

    let stored = backend.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["user_id"], json!(4));
    assert_eq!(stored[0]["amount"], json!(75.25));
    assert_eq!(stored[0]["transaction_type"], json!("debit"));
    assert_eq!(stored[0]["transaction_category"], json!("groceries"));
}

/// A non-2xx response surfaces the backend's message.
#[tokio::test]
async fn test_error_status_with_message() {
    let backend = MockBackend::failing(
        StatusCode::BAD_REQUEST,
        r#"{"code":"400","message":"user not found"}"#,
    )
    .await;

    let err = client_for(&backend).fetch_transactions(1).await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "user not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// A non-JSON error body is passed through as-is.
#[tokio::test]
async fn test_error_status_plain_body() {
    let backend = MockBackend::failing(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let err = client_for(&backend).fetch_transactions(1).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api { status: 500, ref message } if message == "boom"
    ));
}

/// A success status with a malformed payload is a JSON error.
#[tokio::test]
async fn test_malformed_payload() {
    let backend = MockBackend::failing(StatusCode::OK, r#"{"data": "nope"}"#).await;

    let err = client_for(&backend).fetch_transactions(1).await.unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

/// An unreachable backend is an HTTP error.
#[tokio::test]
async fn test_unreachable_backend() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TransactionClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.fetch_transactions(1).await.unwrap_err();
    assert!(matches!(err, AppError::Http(_)));
}
