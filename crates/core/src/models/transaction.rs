use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Type of a recorded transaction.
///
/// Serialized upper-case (`"BUY"`, `"SELL"`, ...) as the transaction service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Buying an asset on an exchange
    Buy,
    /// Selling an asset on an exchange
    Sell,
    /// Sending an asset out (to another wallet or person)
    Send,
    /// Receiving an asset in
    Receive,
}

impl TransactionType {
    /// BUY and RECEIVE add to holdings and cost basis.
    pub fn is_acquisition(self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Receive)
    }

    /// SELL and SEND reduce holdings and cost basis proportionally.
    pub fn is_disposal(self) -> bool {
        !self.is_acquisition()
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "BUY"),
            TransactionType::Sell => write!(f, "SELL"),
            TransactionType::Send => write!(f, "SEND"),
            TransactionType::Receive => write!(f, "RECEIVE"),
        }
    }
}

/// A transaction as stored by the transaction service.
///
/// Immutable once recorded. The service assigns `id`, `session_id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Ticker symbol, uppercased (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Quantity moved (always positive)
    pub amount: f64,

    /// Unit price in JPY. Only meaningful for acquisitions.
    #[serde(default)]
    pub price_jpy: Option<f64>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub transaction_date: NaiveDateTime,

    #[serde(default)]
    pub exchange: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Transaction {
    /// Acquisition cost of this transaction: `amount × price` (missing price counts as 0).
    pub fn cost(&self) -> f64 {
        self.amount * self.price_jpy.unwrap_or(0.0)
    }
}

/// Request body for recording a new transaction (a `Transaction` without server-assigned fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub symbol: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_jpy: Option<f64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub transaction_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(
        tx_type: TransactionType,
        symbol: impl Into<String>,
        amount: f64,
        price_jpy: Option<f64>,
        transaction_date: NaiveDateTime,
    ) -> Self {
        Self {
            tx_type,
            symbol: symbol.into().trim().to_uppercase(),
            amount,
            price_jpy,
            transaction_date,
            exchange: None,
            notes: None,
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate before sending to the service.
    ///
    /// Rules:
    /// - Symbol must not be blank
    /// - Amount must be finite and positive
    /// - Price, when present, must be finite and non-negative
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError("Symbol is required".into()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number (got {})",
                self.amount
            )));
        }
        if let Some(price) = self.price_jpy {
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Price must be a non-negative number (got {price})"
                )));
            }
        }
        Ok(())
    }
}

/// Parse a user-typed number, accepting full-width digits and the full-width period.
///
/// `"１．５"` → `1.5`. Anything that isn't a finite number is rejected.
pub fn parse_numeric_input(input: &str) -> Result<f64, CoreError> {
    let normalized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '．' => '.',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(CoreError::ValidationError("Value is required".into()));
    }
    if normalized
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
    {
        return Err(CoreError::ValidationError(format!(
            "'{input}' contains non-numeric characters"
        )));
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::ValidationError(format!("'{input}' is not a valid number"))),
    }
}

/// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]` as well as the minute-precision
/// `YYYY-MM-DDTHH:MM` that browser datetime inputs produce.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(serde::de::Error::custom)
}
