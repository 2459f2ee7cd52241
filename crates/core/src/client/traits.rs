use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::tax::TaxCalculationResult;
use crate::models::transaction::{NewTransaction, Transaction};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP") || self.status.eq_ignore_ascii_case("OK")
    }
}

/// Abstraction over the transaction storage service.
///
/// The service owns persistence and tax calculation; the core only reads
/// snapshots of the log and asks for mutations. Tests swap in an in-memory
/// implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionApi: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// `GET /transactions`
    async fn get_transactions(&self) -> Result<Vec<Transaction>, CoreError>;

    /// `POST /transactions`. Returns the stored transaction with its assigned id.
    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, CoreError>;

    /// `DELETE /transactions/{id}`
    async fn delete_transaction(&self, id: i64) -> Result<(), CoreError>;

    /// `POST /transactions/calculate-tax`
    async fn calculate_tax(&self) -> Result<TaxCalculationResult, CoreError>;

    /// `DELETE /transactions/clear`
    async fn clear_data(&self) -> Result<(), CoreError>;

    /// `GET /health`
    async fn health_check(&self) -> Result<HealthStatus, CoreError>;
}
