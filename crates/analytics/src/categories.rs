use crate::buckets::checked_range;
use crate::calculations::{checked_total, daily_expense_amount};
use crate::error::AnalyticsError;
use crate::report::CategoryTotal;
use core_types::{CalendarDay, DailyEntry, DateRange};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Totals prorated expenses per category over `[start, end]`, largest first.
///
/// Only categories that actually occur in the range are listed. Equal totals
/// keep category-id order.
pub fn summarize_by_category(
    entries: &[DailyEntry],
    start: CalendarDay,
    end: CalendarDay,
) -> Result<Vec<CategoryTotal>, AnalyticsError> {
    let range = checked_range(start, end)?;
    categories_for_range(entries, &range)
}

pub(crate) fn categories_for_range(
    entries: &[DailyEntry],
    range: &DateRange,
) -> Result<Vec<CategoryTotal>, AnalyticsError> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();

    for entry in entries.iter().filter(|e| range.contains(e.date)) {
        for expense in &entry.expenses {
            let amount = daily_expense_amount(expense, entry.date)?;
            let total = by_category.entry(expense.category.as_str()).or_default();
            *total = checked_total([*total, amount], "category total")?;
        }
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    // Stable sort, so ties stay in id order.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(totals)
}
