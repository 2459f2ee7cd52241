use chrono::NaiveDateTime;

use crate::models::transaction::Transaction;

/// Running moving-average cost basis for one symbol.
///
/// Acquisitions add quantity and cost. Disposals remove quantity and the
/// same fraction of cost, so the average cost per unit is unchanged by a sale.
/// `amount` and `total_cost` never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBasisPosition {
    pub amount: f64,
    pub total_cost: f64,
    /// Date of the earliest acquisition applied so far
    pub first_acquired: Option<NaiveDateTime>,
}

impl CostBasisPosition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one transaction into the position.
    pub fn apply(&mut self, tx: &Transaction) {
        if tx.tx_type.is_acquisition() {
            self.acquire(tx.amount, tx.cost(), tx.transaction_date);
        } else {
            self.dispose(tx.amount);
        }
    }

    fn acquire(&mut self, amount: f64, cost: f64, date: NaiveDateTime) {
        self.amount += amount;
        self.total_cost += cost;
        self.first_acquired = Some(match self.first_acquired {
            Some(existing) if existing <= date => existing,
            _ => date,
        });
    }

    /// Disposing more than is held is clamped to the held amount.
    /// Disposing from an empty position is a no-op.
    fn dispose(&mut self, amount: f64) {
        if self.amount <= 0.0 {
            return;
        }
        let sell_amount = amount.min(self.amount);
        if sell_amount >= self.amount {
            self.amount = 0.0;
            self.total_cost = 0.0;
            return;
        }
        let ratio = sell_amount / self.amount;
        self.amount -= sell_amount;
        self.total_cost -= self.total_cost * ratio;
    }

    pub fn average_cost(&self) -> f64 {
        if self.amount > 0.0 {
            self.total_cost / self.amount
        } else {
            0.0
        }
    }

    pub fn is_open(&self) -> bool {
        self.amount > 0.0
    }
}

/// Transactions in replay order: ascending `transaction_date`, ties in storage order.
pub fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.transaction_date);
    ordered
}

