use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::holding::{
    AssetPerformance, Holding, PortfolioMetrics, PriceSimulation, PriceSimulationRequest,
};
use crate::models::transaction::Transaction;
use crate::services::cost_basis::{chronological, CostBasisPosition};

/// Cost-basis and valuation engine.
///
/// Pure business logic with no I/O. Every method is a fold over
/// the transaction slice it is given, replayed in `transaction_date` order.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Current holdings: every symbol with a positive amount, largest cost basis first.
    pub fn calculate_holdings(&self, transactions: &[Transaction]) -> Vec<Holding> {
        let positions = Self::replay(transactions, |_| true);
        Self::holdings_from(&positions)
    }

    /// Holdings as they stood at the end of `cutoff` (same-day transactions included).
    pub fn holdings_as_of(&self, transactions: &[Transaction], cutoff: NaiveDate) -> Vec<Holding> {
        let positions = Self::replay(transactions, |tx| tx.transaction_date.date() <= cutoff);
        Self::holdings_from(&positions)
    }

    /// Value every holding as of `cutoff` using `current_prices` (symbol → JPY).
    ///
    /// A symbol missing from `current_prices` is valued at 0, which reports the
    /// whole cost basis as an unrealized loss. Sorted by absolute gain/loss, largest first.
    pub fn calculate_asset_performance(
        &self,
        transactions: &[Transaction],
        cutoff: NaiveDate,
        current_prices: &HashMap<String, f64>,
    ) -> Vec<AssetPerformance> {
        let positions = Self::replay(transactions, |tx| tx.transaction_date.date() <= cutoff);

        let mut performances: Vec<AssetPerformance> = positions
            .into_iter()
            .filter(|(_, pos)| pos.is_open())
            .filter_map(|(symbol, pos)| {
                let purchase_date = pos.first_acquired?;
                let current_price = match current_prices.get(&symbol) {
                    Some(price) => *price,
                    None => {
                        debug!(%symbol, "no current price supplied, valuing at 0");
                        0.0
                    }
                };
                let current_value = pos.amount * current_price;
                let unrealized_gain_loss = current_value - pos.total_cost;
                let gain_loss_percentage = if pos.total_cost > 0.0 {
                    (unrealized_gain_loss / pos.total_cost) * 100.0
                } else {
                    0.0
                };

                Some(AssetPerformance {
                    purchase_price: pos.average_cost(),
                    amount: pos.amount,
                    symbol,
                    purchase_date,
                    current_price,
                    unrealized_gain_loss,
                    gain_loss_percentage,
                })
            })
            .collect();

        performances.sort_by(|a, b| {
            b.unrealized_gain_loss
                .abs()
                .total_cmp(&a.unrealized_gain_loss.abs())
        });
        performances
    }

    /// What the position in one symbol would be worth at a hypothetical price.
    ///
    /// Only that symbol's transactions up to and including `target_date` are replayed.
    /// Symbols match exactly, the same way holdings are keyed.
    pub fn simulate_price(
        &self,
        transactions: &[Transaction],
        request: &PriceSimulationRequest,
    ) -> PriceSimulation {
        let mut position = CostBasisPosition::new();
        for tx in chronological(transactions) {
            if tx.symbol == request.symbol
                && tx.transaction_date.date() <= request.target_date
            {
                position.apply(tx);
            }
        }

        let simulated_value = position.amount * request.simulated_price;
        PriceSimulation {
            symbol: request.symbol.clone(),
            target_date: request.target_date,
            simulated_price: request.simulated_price,
            current_holdings: position.amount,
            simulated_value,
            potential_gain_loss: simulated_value - position.total_cost,
        }
    }

    /// Attach market prices to holdings. Holdings without a price stay unpriced.
    pub fn price_holdings(&self, holdings: &[Holding], prices: &HashMap<String, f64>) -> Vec<Holding> {
        holdings
            .iter()
            .map(|h| match prices.get(&h.symbol) {
                Some(price) => h.clone().with_price(*price),
                None => h.clone(),
            })
            .collect()
    }

    /// Portfolio totals. Holdings without a `current_value` contribute 0 value.
    pub fn portfolio_metrics(&self, holdings: &[Holding]) -> PortfolioMetrics {
        let total_portfolio_value: f64 = holdings.iter().map(|h| h.current_value.unwrap_or(0.0)).sum();
        let total_investment: f64 = holdings.iter().map(|h| h.total_cost).sum();
        let total_gain_loss = total_portfolio_value - total_investment;
        let total_gain_loss_percentage = if total_investment > 0.0 {
            (total_gain_loss / total_investment) * 100.0
        } else {
            0.0
        };

        PortfolioMetrics {
            total_portfolio_value,
            total_investment,
            total_gain_loss,
            total_gain_loss_percentage,
        }
    }

    /// Replay the filtered transactions chronologically into per-symbol positions.
    fn replay<F>(transactions: &[Transaction], include: F) -> BTreeMap<String, CostBasisPosition>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut positions: BTreeMap<String, CostBasisPosition> = BTreeMap::new();
        for tx in chronological(transactions) {
            if !include(tx) {
                continue;
            }
            positions.entry(tx.symbol.clone()).or_default().apply(tx);
        }
        positions
    }

    /// Drop closed positions and sort by cost basis, largest first (ties by symbol).
    pub(crate) fn holdings_from(positions: &BTreeMap<String, CostBasisPosition>) -> Vec<Holding> {
        let mut holdings: Vec<Holding> = positions
            .iter()
            .filter(|(_, pos)| pos.is_open())
            .map(|(symbol, pos)| Holding::new(symbol.clone(), pos.amount, pos.total_cost))
            .collect();
        holdings.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
        holdings
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
