use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single price observation for a symbol, as fed to chart generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,

    /// Unit price in JPY
    pub price: f64,

    pub symbol: String,
}

impl PriceData {
    pub fn new(symbol: impl Into<String>, timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price,
            symbol: symbol.into().to_uppercase(),
        }
    }

    /// UTC calendar day of this observation, `None` for out-of-range timestamps.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.timestamp).map(|dt| dt.date_naive())
    }
}
