use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::models::chart::{ChartDataPoint, ChartTimeframe, PortfolioSnapshot};
use crate::models::holding::Holding;
use crate::models::price::PriceData;
use crate::models::transaction::Transaction;
use crate::services::cost_basis::{chronological, CostBasisPosition};
use crate::services::portfolio_service::PortfolioService;

/// Generates chart-ready data sets from the transaction log and price history.
///
/// The core computes all the numbers; the frontend only renders them.
pub struct ChartService {
    portfolio_service: PortfolioService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            portfolio_service: PortfolioService::new(),
        }
    }

    /// Value the portfolio as it stood at the end of `date`.
    pub fn snapshot_at(
        &self,
        transactions: &[Transaction],
        date: NaiveDate,
        prices: &HashMap<String, f64>,
    ) -> PortfolioSnapshot {
        let holdings = self.portfolio_service.holdings_as_of(transactions, date);
        self.build_snapshot(date, &holdings, prices)
    }

    /// One snapshot per day that has price data inside `timeframe` (ending at `today`).
    ///
    /// Days are UTC calendar days. A symbol without a quote on a given day keeps
    /// its last known price, including quotes from before the window starts.
    ///
    /// Uses incremental replay: O(days + transactions) instead of O(days × transactions).
    pub fn portfolio_history(
        &self,
        transactions: &[Transaction],
        price_history: &[PriceData],
        timeframe: ChartTimeframe,
        today: NaiveDate,
    ) -> Vec<PortfolioSnapshot> {
        let start = timeframe.start_date(today);

        let mut quotes_by_day: BTreeMap<NaiveDate, Vec<&PriceData>> = BTreeMap::new();
        for quote in price_history {
            match quote.date() {
                Some(day) if day <= today => quotes_by_day.entry(day).or_default().push(quote),
                _ => continue,
            }
        }

        let ordered = chronological(transactions);
        let mut next_tx = 0;
        let mut positions: BTreeMap<String, CostBasisPosition> = BTreeMap::new();
        let mut last_known: HashMap<String, f64> = HashMap::new();
        let mut snapshots = Vec::new();

        for (day, mut quotes) in quotes_by_day {
            quotes.sort_by_key(|q| q.timestamp);
            for quote in quotes {
                last_known.insert(quote.symbol.clone(), quote.price);
            }

            if start.is_some_and(|s| day < s) {
                continue;
            }

            while let Some(tx) = ordered.get(next_tx) {
                if tx.transaction_date.date() > day {
                    break;
                }
                positions.entry(tx.symbol.clone()).or_default().apply(tx);
                next_tx += 1;
            }

            let holdings = PortfolioService::holdings_from(&positions);
            snapshots.push(self.build_snapshot(day, &holdings, &last_known));
        }

        snapshots
    }

    /// Map snapshots to `{time, value}` points for the value chart.
    pub fn value_series(&self, snapshots: &[PortfolioSnapshot]) -> Vec<ChartDataPoint> {
        snapshots
            .iter()
            .map(|s| ChartDataPoint {
                time: s.date.format("%Y-%m-%d").to_string(),
                value: s.total_value,
            })
            .collect()
    }

    fn build_snapshot(
        &self,
        date: NaiveDate,
        holdings: &[Holding],
        prices: &HashMap<String, f64>,
    ) -> PortfolioSnapshot {
        let priced = self.portfolio_service.price_holdings(holdings, prices);
        let metrics = self.portfolio_service.portfolio_metrics(&priced);
        PortfolioSnapshot {
            date,
            total_value: metrics.total_portfolio_value,
            total_cost: metrics.total_investment,
            total_gain_loss: metrics.total_gain_loss,
            holdings: priced,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
