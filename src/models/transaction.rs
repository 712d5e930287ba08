use crate::models::category::Category;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Income, increases the balance.
    Credit,
    /// Expense, decreases the balance.
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// +1 for credit, -1 for debit.
    pub fn sign(&self) -> i64 {
        match self {
            Self::Credit => 1,
            Self::Debit => -1,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single financial event as returned by the backend.
///
/// The amount is a magnitude in cents. Whatever sign the backend sends is
/// dropped at deserialization; direction comes from `transaction_type` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Raw timestamp as received. May not parse, see [`TransactionRecord::parsed_date`].
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(
        rename = "amount",
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    amount_cents: i64,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub transaction_category: Category,
}

impl TransactionRecord {
    pub fn new(
        date: impl Into<String>,
        amount_cents: i64,
        transaction_type: TransactionType,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            id: None,
            date: date.into(),
            detail: None,
            amount_cents: amount_cents.saturating_abs(),
            transaction_type,
            transaction_category: category.into(),
        }
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Amount with the direction applied: positive for credit, negative for debit.
    pub fn signed_cents(&self) -> i64 {
        self.amount_cents * self.transaction_type.sign()
    }

    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.transaction_type == TransactionType::Debit
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn detail_text(&self) -> &str {
        self.detail.as_deref().unwrap_or("")
    }
}

/// Parse the calendar date of an ISO 8601 timestamp.
///
/// The date is taken as written; timestamps with an offset are not converted
/// to another zone first.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|datetime| datetime.date())
}

/// Convert a decimal amount to non-negative cents.
pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount.abs() * 100.0).round() as i64
}

pub fn decimal_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = f64::deserialize(deserializer)?;
    if !amount.is_finite() {
        return Err(serde::de::Error::custom("amount must be a finite number"));
    }
    Ok(cents_from_decimal(amount))
}

fn serialize_amount<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(decimal_from_cents(*cents))
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}
