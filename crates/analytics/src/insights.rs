use crate::calculations::{checked_total, mean};
use crate::error::AnalyticsError;
use crate::report::{DayBucket, Insights};
use rust_decimal::Decimal;

/// Derives the trend and overspend signals from chronologically ordered buckets.
pub fn compute_insights(buckets: &[DayBucket]) -> Result<Insights, AnalyticsError> {
    // Days with no activity count as zero spend here, unlike ratio averaging.
    let expenses: Vec<Decimal> = buckets.iter().map(|b| b.total_expense).collect();
    let average_expense = if expenses.is_empty() {
        Decimal::ZERO
    } else {
        checked_total(expenses.iter().copied(), "average expense")? / Decimal::from(expenses.len())
    };

    let days_above_average_expense_count = if average_expense > Decimal::ZERO {
        expenses.iter().filter(|e| **e > average_expense).count()
    } else {
        0
    };

    let ratios: Vec<Decimal> = buckets.iter().filter_map(|b| b.ratio).collect();

    Ok(Insights {
        ratio_variation_percent: ratio_variation_percent(&ratios),
        days_above_average_expense_count,
        average_expense,
    })
}

/// Percent change between the mean of the first and second half of `ratios`.
///
/// The split point is `floor(n / 2)`, so an odd middle value lands in the
/// second half. Needs at least two values and a non-zero first-half mean, and
/// is undefined when the change does not fit in a `Decimal`.
fn ratio_variation_percent(ratios: &[Decimal]) -> Option<Decimal> {
    if ratios.len() < 2 {
        return None;
    }
    let (first, second) = ratios.split_at(ratios.len() / 2);
    let first_avg = mean(first)?;
    let second_avg = mean(second)?;
    if first_avg.is_zero() {
        return None;
    }
    second_avg
        .checked_sub(first_avg)?
        .checked_div(first_avg.abs())?
        .checked_mul(Decimal::ONE_HUNDRED)
}
