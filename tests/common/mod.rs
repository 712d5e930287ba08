//! Shared test utilities for integration tests.
//!
//! Provides transaction fixtures and a `MockBackend` that serves the
//! transaction API on a random local port, so the client can be exercised
//! over real HTTP.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use savegen::models::{TransactionRecord, TransactionType};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn debit(date: &str, cents: i64, category: &str) -> TransactionRecord {
    TransactionRecord::new(date, cents, TransactionType::Debit, category)
}

pub fn credit(date: &str, cents: i64, category: &str) -> TransactionRecord {
    TransactionRecord::new(date, cents, TransactionType::Credit, category)
}

/// A small ledger spanning a year boundary, in backend order (not sorted).
pub fn sample_ledger() -> Vec<TransactionRecord> {
    vec![
        credit("2025-02-01", 800_000, "salary"),
        debit("2024-12-24", 120_000, "family"),
        debit("2025-02-03", 300_000, "rent"),
        debit("2025-01-15", 45_000, "groceries"),
        credit("2025-01-01", 800_000, "salary"),
        debit("2025-02-14", 60_000, "foodanddrink"),
        debit("2025-02-20", 25_000, "groceries"),
        debit("2024-11-30", 10_000, "bills"),
    ]
}

#[derive(Clone, Default)]
struct MockState {
    transactions: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// An in-process stand-in for the transaction backend.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    /// Start a backend serving `transactions` (raw JSON objects, as the real
    /// backend would send them).
    pub async fn start(transactions: Vec<Value>) -> Self {
        let state = MockState {
            transactions: Arc::new(Mutex::new(transactions)),
            requests: Arc::default(),
        };

        let app = Router::new()
            .route(
                "/transactions",
                get(list_transactions).post(create_transaction),
            )
            .with_state(state.clone());

        let base_url = serve(app).await;
        Self { base_url, state }
    }

    /// Start a backend that answers every request with `status` and `body`.
    pub async fn failing(status: StatusCode, body: &'static str) -> Self {
        let app = Router::new().fallback(move || async move { (status, body) });
        let base_url = serve(app).await;
        Self {
            base_url,
            state: MockState::default(),
        }
    }

    /// Query strings and bodies received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Value> {
        self.state.transactions.lock().unwrap().clone()
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

async fn list_transactions(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let user_id = params.get("user_id").cloned().unwrap_or_default();
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("user_id={}", user_id));

    let data = state.transactions.lock().unwrap().clone();
    Json(json!({ "code": "200", "message": "OK", "data": data }))
}

async fn create_transaction(
    State(state): State<MockState>,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body.to_string());

    let id = {
        let mut stored = state.transactions.lock().unwrap();
        let id = format!("tx-{}", stored.len() + 1);
        body["id"] = json!(id);
        stored.push(body.clone());
        id
    };

    (
        StatusCode::CREATED,
        Json(json!({ "code": "201", "message": format!("Created {}", id), "data": body })),
    )
}
