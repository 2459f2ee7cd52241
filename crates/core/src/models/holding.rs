use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Current position in a single asset, derived from the transaction log.
///
/// Never persisted: recomputed from transactions whenever the log changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,

    /// Quantity held (never negative)
    pub amount: f64,

    /// Remaining cost basis in JPY (never negative)
    pub total_cost: f64,

    /// `total_cost / amount`, or 0 when nothing is held
    pub average_cost: f64,

    /// Display-only valuation fields, filled by `Holding::with_price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_gain_loss: Option<f64>,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, amount: f64, total_cost: f64) -> Self {
        let average_cost = if amount > 0.0 { total_cost / amount } else { 0.0 };
        Self {
            symbol: symbol.into(),
            amount,
            total_cost,
            average_cost,
            current_price: None,
            current_value: None,
            unrealized_gain_loss: None,
        }
    }

    /// Attach a market price: sets current price, value and unrealized gain/loss.
    pub fn with_price(mut self, price: f64) -> Self {
        let value = self.amount * price;
        self.current_price = Some(price);
        self.current_value = Some(value);
        self.unrealized_gain_loss = Some(value - self.total_cost);
        self
    }
}

/// Valuation of one holding as of a cutoff date at a supplied current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub symbol: String,

    /// Earliest acquisition on or before the cutoff
    pub purchase_date: NaiveDateTime,

    /// Moving-average cost per unit
    pub purchase_price: f64,

    pub current_price: f64,

    pub amount: f64,

    pub unrealized_gain_loss: f64,

    /// Gain/loss relative to cost basis, in percent (0 when cost basis is 0)
    pub gain_loss_percentage: f64,
}

/// Input for a what-if valuation of one symbol at a hypothetical price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSimulationRequest {
    pub symbol: String,
    pub target_date: NaiveDate,
    pub simulated_price: f64,
}

/// Result of a what-if valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSimulation {
    pub symbol: String,
    pub target_date: NaiveDate,
    pub simulated_price: f64,
    pub current_holdings: f64,
    pub simulated_value: f64,
    pub potential_gain_loss: f64,
}

/// Portfolio-wide totals over the current holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Σ current value (holdings without a price count as 0)
    pub total_portfolio_value: f64,

    /// Σ remaining cost basis
    pub total_investment: f64,

    pub total_gain_loss: f64,

    pub total_gain_loss_percentage: f64,
}
