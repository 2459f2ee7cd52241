use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// A single point for the value chart.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Day label, `YYYY-MM-DD`
    pub time: String,

    pub value: f64,
}

/// Valuation of the whole portfolio on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub holdings: Vec<Holding>,
}

/// Chart window selectable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartTimeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "all")]
    All,
}

impl ChartTimeframe {
    /// Window length in days; `None` means unbounded.
    pub fn days(self) -> Option<i64> {
        match self {
            ChartTimeframe::OneDay => Some(1),
            ChartTimeframe::SevenDays => Some(7),
            ChartTimeframe::ThirtyDays => Some(30),
            ChartTimeframe::NinetyDays => Some(90),
            ChartTimeframe::OneYear => Some(365),
            ChartTimeframe::All => None,
        }
    }

    /// First day included in the window ending at `today`.
    /// A window of `n` days covers `n` calendar days, `today` included.
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        self.days()
            .and_then(|days| today.checked_sub_signed(chrono::Duration::days(days - 1)))
    }
}

impl std::fmt::Display for ChartTimeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChartTimeframe::OneDay => "1d",
            ChartTimeframe::SevenDays => "7d",
            ChartTimeframe::ThirtyDays => "30d",
            ChartTimeframe::NinetyDays => "90d",
            ChartTimeframe::OneYear => "1y",
            ChartTimeframe::All => "all",
        };
        write!(f, "{label}")
    }
}
