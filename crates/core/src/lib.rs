pub mod client;
pub mod errors;
pub mod models;
pub mod services;

use chrono::{NaiveDate, NaiveDateTime};
use client::{
    http::HttpTransactionApi,
    traits::{HealthStatus, TransactionApi},
};
use models::{
    chart::{ChartDataPoint, ChartTimeframe, PortfolioSnapshot},
    holding::{AssetPerformance, Holding, PortfolioMetrics, PriceSimulation, PriceSimulationRequest},
    price::PriceData,
    settings::ClientSettings,
    tax::TaxCalculationResult,
    transaction::{NewTransaction, Transaction, TransactionType},
};
use services::{
    chart_service::ChartService,
    holdings_watcher::{HoldingsWatcher, SubscriptionId},
    portfolio_service::PortfolioService,
};
use std::collections::HashMap;
use tracing::{error, info};

use errors::CoreError;

/// Main entry point for the Crypto Tracker core library.
///
/// Holds the last server-confirmed snapshot of the transaction log and
/// everything derived from it. Mutations go to the transaction service first;
/// the local log only changes after the service confirms, and holdings are
/// then recomputed from scratch and pushed to subscribers.
#[must_use]
pub struct CryptoTracker {
    api: Box<dyn TransactionApi>,
    settings: ClientSettings,
    transactions: Vec<Transaction>,
    holdings: Vec<Holding>,
    tax_result: Option<TaxCalculationResult>,
    /// User-visible message for the last failed operation.
    last_error: Option<String>,
    portfolio_service: PortfolioService,
    chart_service: ChartService,
    watcher: HoldingsWatcher,
}

impl std::fmt::Debug for CryptoTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoTracker")
            .field("api", &self.api.name())
            .field("settings", &self.settings)
            .field("transactions", &self.transactions.len())
            .field("holdings", &self.holdings.len())
            .field("last_error", &self.last_error)
            .field("watcher", &self.watcher)
            .finish()
    }
}

impl CryptoTracker {
    /// Connect to the transaction service over HTTP.
    pub fn connect(settings: ClientSettings) -> Result<Self, CoreError> {
        let api = HttpTransactionApi::new(&settings)?;
        Ok(Self::with_api(Box::new(api), settings))
    }

    /// Connect using `CRYPTO_TRACKER_*` environment variables (see `ClientSettings::from_env`).
    pub fn from_env() -> Result<Self, CoreError> {
        Self::connect(ClientSettings::from_env()?)
    }

    /// Build on top of any `TransactionApi` implementation.
    pub fn with_api(api: Box<dyn TransactionApi>, settings: ClientSettings) -> Self {
        Self {
            api,
            settings,
            transactions: Vec::new(),
            holdings: Vec::new(),
            tax_result: None,
            last_error: None,
            portfolio_service: PortfolioService::new(),
            chart_service: ChartService::new(),
            watcher: HoldingsWatcher::new(),
        }
    }

    // ── Transaction Log ─────────────────────────────────────────────

    /// Reload the log from the service. On failure the current log is kept.
    /// Returns the number of transactions loaded.
    pub async fn fetch_transactions(&mut self) -> Result<usize, CoreError> {
        self.last_error = None;
        let result = self.api.get_transactions().await;
        match result {
            Ok(transactions) => {
                info!(count = transactions.len(), "fetched transactions");
                self.transactions = transactions;
                self.recompute_holdings();
                Ok(self.transactions.len())
            }
            Err(e) => Err(self.record_failure("Failed to fetch transactions", e)),
        }
    }

    /// Validate and record a transaction. The server-confirmed copy (with id) is
    /// appended to the log and returned.
    pub async fn add_transaction(&mut self, transaction: NewTransaction) -> Result<Transaction, CoreError> {
        self.last_error = None;
        if let Err(e) = transaction.validate() {
            return Err(self.record_failure("Invalid transaction", e));
        }

        let result = self.api.add_transaction(&transaction).await;
        match result {
            Ok(saved) => {
                info!(id = ?saved.id, symbol = %saved.symbol, tx_type = %saved.tx_type, "transaction added");
                self.transactions.push(saved.clone());
                self.recompute_holdings();
                Ok(saved)
            }
            Err(e) => Err(self.record_failure("Failed to add transaction", e)),
        }
    }

    /// Delete a transaction from the service, then from the local log.
    pub async fn delete_transaction(&mut self, id: i64) -> Result<(), CoreError> {
        self.last_error = None;
        if self.get_transaction(id).is_none() {
            return Err(self.record_failure(
                "Failed to delete transaction",
                CoreError::TransactionNotFound(id),
            ));
        }

        let result = self.api.delete_transaction(id).await;
        match result {
            Ok(()) => {
                info!(id, "transaction deleted");
                self.transactions.retain(|t| t.id != Some(id));
                self.recompute_holdings();
                Ok(())
            }
            Err(e) => Err(self.record_failure("Failed to delete transaction", e)),
        }
    }

    /// Remove every transaction of this session, server-side and locally.
    pub async fn clear_all_data(&mut self) -> Result<(), CoreError> {
        self.last_error = None;
        let result = self.api.clear_data().await;
        match result {
            Ok(()) => {
                info!("all transactions cleared");
                self.transactions.clear();
                self.tax_result = None;
                self.recompute_holdings();
                Ok(())
            }
            Err(e) => Err(self.record_failure("Failed to clear data", e)),
        }
    }

    /// Ask the service for a tax report and keep it as the latest result.
    pub async fn calculate_tax(&mut self) -> Result<TaxCalculationResult, CoreError> {
        self.last_error = None;
        let result = self.api.calculate_tax().await;
        match result {
            Ok(result) => {
                self.tax_result = Some(result.clone());
                Ok(result)
            }
            Err(e) => Err(self.record_failure("Failed to calculate tax", e)),
        }
    }

    pub async fn health_check(&self) -> Result<HealthStatus, CoreError> {
        self.api.health_check().await
    }

    /// Start a new transaction pre-filled with the configured default exchange.
    pub fn new_transaction(
        &self,
        tx_type: TransactionType,
        symbol: impl Into<String>,
        amount: f64,
        price_jpy: Option<f64>,
        transaction_date: NaiveDateTime,
    ) -> NewTransaction {
        NewTransaction::new(tx_type, symbol, amount, price_jpy, transaction_date)
            .with_exchange(self.settings.default_exchange.clone())
    }

    /// The log in storage order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn get_transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == Some(id))
    }

    #[must_use]
    pub fn total_transactions(&self) -> usize {
        self.transactions.len()
    }

    /// Number of transactions per type. Types with no transactions are absent.
    #[must_use]
    pub fn total_by_type(&self) -> HashMap<TransactionType, usize> {
        let mut counts = HashMap::new();
        for tx in &self.transactions {
            *counts.entry(tx.tx_type).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn tax_result(&self) -> Option<&TaxCalculationResult> {
        self.tax_result.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Holdings as of the last recomputation, largest cost basis first.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Rebuild holdings from the full log and notify subscribers.
    /// Called after every successful mutation; callers may also invoke it directly.
    pub fn recompute_holdings(&mut self) {
        self.holdings = self.portfolio_service.calculate_holdings(&self.transactions);
        self.watcher.notify(&self.holdings);
    }

    /// Register a callback that receives the holdings after each recomputation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&[Holding]) + Send + Sync + 'static,
    {
        self.watcher.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.watcher.unsubscribe(id)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Per-asset performance as of `cutoff`, valued at `current_prices` (symbol → JPY).
    #[must_use]
    pub fn asset_performance(
        &self,
        cutoff: NaiveDate,
        current_prices: &HashMap<String, f64>,
    ) -> Vec<AssetPerformance> {
        self.portfolio_service
            .calculate_asset_performance(&self.transactions, cutoff, current_prices)
    }

    #[must_use]
    pub fn simulate_price(&self, request: &PriceSimulationRequest) -> PriceSimulation {
        self.portfolio_service.simulate_price(&self.transactions, request)
    }

    /// Current holdings with market prices attached.
    #[must_use]
    pub fn priced_holdings(&self, prices: &HashMap<String, f64>) -> Vec<Holding> {
        self.portfolio_service.price_holdings(&self.holdings, prices)
    }

    /// Portfolio totals at `prices`. Holdings without a price contribute 0 value.
    #[must_use]
    pub fn portfolio_metrics(&self, prices: &HashMap<String, f64>) -> PortfolioMetrics {
        let priced = self.priced_holdings(prices);
        self.portfolio_service.portfolio_metrics(&priced)
    }

    // ── Charts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn snapshot_at(&self, date: NaiveDate, prices: &HashMap<String, f64>) -> PortfolioSnapshot {
        self.chart_service.snapshot_at(&self.transactions, date, prices)
    }

    /// Daily portfolio snapshots over `timeframe`, ending at `today`.
    #[must_use]
    pub fn portfolio_history(
        &self,
        price_history: &[PriceData],
        timeframe: ChartTimeframe,
        today: NaiveDate,
    ) -> Vec<PortfolioSnapshot> {
        self.chart_service
            .portfolio_history(&self.transactions, price_history, timeframe, today)
    }

    /// Value chart points over `timeframe`, ending at `today`.
    #[must_use]
    pub fn value_chart(
        &self,
        price_history: &[PriceData],
        timeframe: ChartTimeframe,
        today: NaiveDate,
    ) -> Vec<ChartDataPoint> {
        let history = self.portfolio_history(price_history, timeframe, today);
        self.chart_service.value_series(&history)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Log the failure and keep a user-visible message. The log is not touched.
    fn record_failure(&mut self, message: &str, err: CoreError) -> CoreError {
        error!(error = %err, "{message}");
        self.last_error = Some(format!("{message}: {err}"));
        err
    }
}
