use core_types::{CalendarDay, DateRange};
use rust_decimal::Decimal;
use serde::Serialize;

/// Statistics for a single calendar day of the requested range.
///
/// A bucket exists for every day in the range, whether or not anything was
/// recorded on it. Empty days have zero totals and no ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: CalendarDay,
    pub total_expense: Decimal,
    pub total_revenue: Decimal,
    pub profit: Decimal,
    pub ratio: Option<Decimal>, // None when nothing was spent
}

impl DayBucket {
    /// A zeroed bucket for a day with no activity.
    pub fn empty(date: CalendarDay) -> Self {
        Self {
            date,
            total_expense: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            ratio: None,
        }
    }
}

/// Headline totals across a range of day buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub total_profit: Decimal,
    /// Mean of the days that have a ratio. Days without one are skipped, not counted as zero.
    pub average_ratio: Option<Decimal>,
}

impl RangeSummary {
    pub fn new() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            average_ratio: None,
        }
    }
}

impl Default for RangeSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Prorated spend accumulated under one expense category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Narrative signals derived from the day buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Percent change of the average ratio from the first half of the range to the second.
    pub ratio_variation_percent: Option<Decimal>,
    pub days_above_average_expense_count: usize,
    pub average_expense: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatus {
    /// No daily budget configured.
    Unbudgeted,
    WithinBudget,
    /// Average spend is at or above the warning threshold but not over budget.
    Warning,
    Exceeded,
}

/// Average daily spend over a period compared with the operation's daily budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub status: BudgetStatus,
    pub daily_budget: Decimal,
    pub average_daily_expense: Decimal,
    pub usage_percent: Option<Decimal>,
    /// How far the average is over budget. Only set when exceeded.
    pub overage: Option<Decimal>,
}

impl BudgetAlert {
    /// Whether the alert is worth showing to the user.
    pub fn is_alerting(&self) -> bool {
        matches!(self.status, BudgetStatus::Warning | BudgetStatus::Exceeded)
    }
}

/// One operation's totals in a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub operation_id: String,
    pub operation_name: String,
    #[serde(flatten)]
    pub summary: RangeSummary,
}

/// Everything computed for one operation over one date range.
///
/// This struct is the final output of the `AnalyticsEngine` and is handed to
/// presentation code as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    pub operation_id: String,
    pub operation_name: String,
    pub range: DateRange,
    pub days: Vec<DayBucket>,
    pub summary: RangeSummary,
    pub categories: Vec<CategoryTotal>,
    pub insights: Insights,
    pub budget: BudgetAlert,
}
