use crate::budget::{DEFAULT_WARNING_RATIO, assess_budget};
use crate::buckets::{buckets_for_range, checked_range};
use crate::categories::categories_for_range;
use crate::comparison::compare_operations;
use crate::error::AnalyticsError;
use crate::insights::compute_insights;
use crate::report::{ComparisonRow, OperationReport};
use crate::summary::summarize;
use core_types::{CalendarDay, DateRange, Operation};
use rust_decimal::Decimal;

/// A stateless calculator for deriving financial performance from ledger entries.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    warning_ratio: Decimal,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the share of the daily budget at which the budget check starts warning.
    pub fn with_warning_ratio(mut self, warning_ratio: Decimal) -> Self {
        self.warning_ratio = warning_ratio;
        self
    }

    pub fn warning_ratio(&self) -> Decimal {
        self.warning_ratio
    }

    /// The main entry point for calculating an operation's report.
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation whose daily entries are analysed.
    /// * `range` - The inclusive range of calendar days to report on.
    ///
    /// # Returns
    ///
    /// An `OperationReport` with one bucket per day of `range`, the range
    /// totals, the category breakdown, the insights and the budget check, or
    /// `AnalyticsError::Overflow` when the amounts exceed the `Decimal` range.
    #[tracing::instrument(name = "operation_report", skip(self, operation), fields(operation = %operation.name))]
    pub fn calculate(
        &self,
        operation: &Operation,
        range: &DateRange,
    ) -> Result<OperationReport, AnalyticsError> {
        let days = buckets_for_range(&operation.daily_entries, range)?;
        let summary = summarize(&days)?;
        let categories = categories_for_range(&operation.daily_entries, range)?;
        let insights = compute_insights(&days)?;
        let budget = assess_budget(
            operation.daily_budget,
            summary.total_expense,
            range.num_days(),
            self.warning_ratio,
        );

        tracing::debug!(
            revenue = %summary.total_revenue,
            expense = %summary.total_expense,
            categories = categories.len(),
            budget = ?budget.status,
            "Operation report calculated."
        );

        Ok(OperationReport {
            operation_id: operation.id.clone(),
            operation_name: operation.name.clone(),
            range: *range,
            days,
            summary,
            categories,
            insights,
            budget,
        })
    }

    /// Same as `calculate`, for callers holding raw endpoints.
    pub fn calculate_between(
        &self,
        operation: &Operation,
        start: CalendarDay,
        end: CalendarDay,
    ) -> Result<OperationReport, AnalyticsError> {
        let range = checked_range(start, end)?;
        self.calculate(operation, &range)
    }

    /// Side-by-side totals for several operations over one range.
    pub fn compare(
        &self,
        operations: &[Operation],
        range: &DateRange,
    ) -> Result<Vec<ComparisonRow>, AnalyticsError> {
        compare_operations(operations, range)
    }
}
