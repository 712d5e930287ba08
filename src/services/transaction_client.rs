use crate::error::{AppError, AppResult};
use crate::models::{Category, TransactionRecord, TransactionType};
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub user_id: i64,
    pub amount: f64,
    pub date: String,
    pub detail: String,
    pub transaction_type: TransactionType,
    pub transaction_category: Category,
}

impl NewTransaction {
    /// Build a request from a signed amount as typed by the user: positive
    /// amounts are income, negative amounts are expenses, zero is rejected.
    pub fn from_signed_amount(
        user_id: i64,
        amount: f64,
        date: NaiveDate,
        detail: impl Into<String>,
        category: Category,
    ) -> AppResult<Self> {
        if !amount.is_finite() || amount == 0.0 {
            return Err(AppError::Validation("Please enter a valid amount".into()));
        }

        let transaction_type = if amount > 0.0 {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        };

        Ok(Self {
            user_id,
            amount: amount.abs(),
            date: date.format("%Y-%m-%d").to_string(),
            detail: detail.into(),
            transaction_type,
            transaction_category: category,
        })
    }
}

/// Client for the transaction backend.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    client: Client,
    base_url: String,
}

impl TransactionClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transactions_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    /// Fetch every transaction belonging to `user_id`.
    pub async fn fetch_transactions(&self, user_id: i64) -> AppResult<Vec<TransactionRecord>> {
        let url = self.transactions_url();
        debug!(%url, user_id, "Fetching transactions");

        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let envelope: ApiEnvelope<Vec<TransactionRecord>> = read_envelope(response).await?;

        info!(
            user_id,
            count = envelope.data.len(),
            "Fetched transactions"
        );
        Ok(envelope.data)
    }

    /// Create a transaction and return the record the backend stored.
    pub async fn create_transaction(
        &self,
        request: &NewTransaction,
    ) -> AppResult<TransactionRecord> {
        let url = self.transactions_url();
        debug!(
            %url,
            user_id = request.user_id,
            kind = %request.transaction_type,
            "Creating transaction"
        );

        let response = self.client.post(&url).json(request).send().await?;
        let envelope: ApiEnvelope<TransactionRecord> = read_envelope(response).await?;

        info!(
            id = envelope.data.id.as_deref().unwrap_or("-"),
            "Created transaction"
        );
        Ok(envelope.data)
    }
}

async fn read_envelope<T>(response: Response) -> AppResult<ApiEnvelope<T>>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or(body);
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
