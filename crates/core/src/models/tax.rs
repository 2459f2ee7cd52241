use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tax report computed by the transaction service (moving-average method).
///
/// This crate only consumes it; the numbers come from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    pub total_gain_loss: f64,
    pub total_purchase_amount: f64,
    pub total_sale_amount: f64,
    #[serde(default)]
    pub transaction_summaries: Vec<TransactionSummary>,
    pub calculated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Per-symbol line of a tax report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub symbol: String,
    pub total_amount: f64,
    pub total_purchase_price: f64,
    pub total_sale_price: f64,
    pub gain_loss: f64,
}
