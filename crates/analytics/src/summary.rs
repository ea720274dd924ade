use crate::calculations::{checked_total, mean};
use crate::error::AnalyticsError;
use crate::report::{DayBucket, RangeSummary};
use rust_decimal::Decimal;

/// Reduces day buckets to range totals and the average ratio.
pub fn summarize(buckets: &[DayBucket]) -> Result<RangeSummary, AnalyticsError> {
    let total_revenue = checked_total(buckets.iter().map(|b| b.total_revenue), "total revenue")?;
    let total_expense = checked_total(buckets.iter().map(|b| b.total_expense), "total expense")?;
    let total_profit = total_revenue
        .checked_sub(total_expense)
        .ok_or(AnalyticsError::Overflow("total profit"))?;

    // Days without a ratio are left out of both the sum and the count.
    let ratios: Vec<Decimal> = buckets.iter().filter_map(|b| b.ratio).collect();

    Ok(RangeSummary {
        total_revenue,
        total_expense,
        total_profit,
        average_ratio: mean(&ratios),
    })
}
