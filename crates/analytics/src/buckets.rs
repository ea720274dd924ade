use crate::calculations::{checked_total, daily_expense_amount, ratio};
use crate::error::AnalyticsError;
use crate::report::DayBucket;
use core_types::{CalendarDay, DailyEntry, DateRange};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Validates `start <= end` and builds the inclusive range.
pub(crate) fn checked_range(
    start: CalendarDay,
    end: CalendarDay,
) -> Result<DateRange, AnalyticsError> {
    DateRange::new(start, end).map_err(|_| AnalyticsError::InvalidRange { start, end })
}

/// Builds one bucket per calendar day in `[start, end]`.
///
/// The result is ascending by date with no gaps and no duplicates; days
/// without entries get an empty bucket. Entries dated outside the range are
/// ignored, and entries sharing a date are merged before profit and ratio are
/// derived.
pub fn build_buckets(
    entries: &[DailyEntry],
    start: CalendarDay,
    end: CalendarDay,
) -> Result<Vec<DayBucket>, AnalyticsError> {
    let range = checked_range(start, end)?;
    buckets_for_range(entries, &range)
}

pub(crate) fn buckets_for_range(
    entries: &[DailyEntry],
    range: &DateRange,
) -> Result<Vec<DayBucket>, AnalyticsError> {
    let mut days: BTreeMap<CalendarDay, DayBucket> =
        range.days().map(|day| (day, DayBucket::empty(day))).collect();

    for entry in entries {
        let Some(bucket) = days.get_mut(&entry.date) else {
            tracing::warn!(date = %entry.date, %range, "Ignoring entry outside the requested range.");
            continue;
        };

        let amounts = entry
            .expenses
            .iter()
            .map(|exp| daily_expense_amount(exp, entry.date))
            .collect::<Result<Vec<Decimal>, _>>()?;
        let expense = checked_total(amounts, "daily expense")?;
        let revenue = checked_total(entry.revenues.iter().map(|rev| rev.amount), "daily revenue")?;

        bucket.total_expense = checked_total([bucket.total_expense, expense], "daily expense")?;
        bucket.total_revenue = checked_total([bucket.total_revenue, revenue], "daily revenue")?;
        bucket.profit = bucket
            .total_revenue
            .checked_sub(bucket.total_expense)
            .ok_or(AnalyticsError::Overflow("daily profit"))?;
        bucket.ratio = ratio(bucket.total_revenue, bucket.total_expense);
    }

    tracing::debug!(%range, days = days.len(), entries = entries.len(), "Built day buckets.");
    Ok(days.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ExpenseRecord, RevenueRecord};
    use rust_decimal_macros::dec;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn every_day_in_range_gets_a_bucket() {
        let buckets = build_buckets(&[], day("2025-02-26"), day("2025-03-03")).unwrap();
        let dates: Vec<String> = buckets.iter().map(|b| b.date.iso_key()).collect();
        assert_eq!(
            dates,
            vec!["2025-02-26", "2025-02-27", "2025-02-28", "2025-03-01", "2025-03-02", "2025-03-03"]
        );
        assert!(buckets.iter().all(|b| *b == DayBucket::empty(b.date)));
    }

    #[test]
    fn single_day_range_yields_one_bucket() {
        let buckets = build_buckets(&[], day("2025-05-05"), day("2025-05-05")).unwrap();
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn reversed_range_is_an_error() {
        let err = build_buckets(&[], day("2025-05-06"), day("2025-05-05")).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidRange {
                start: day("2025-05-06"),
                end: day("2025-05-05"),
            }
        );
    }

    #[test]
    fn sums_prorated_expenses_and_revenues_per_day() {
        let entries = vec![
            DailyEntry::new(day("2025-01-02"))
                .with_expense(ExpenseRecord::new("ADS", dec!(40)))
                .with_expense(ExpenseRecord::monthly("IA", dec!(310)))
                .with_revenue(RevenueRecord::new(dec!(75)).at("10:00"))
                .with_revenue(RevenueRecord::new(dec!(25))),
        ];
        let buckets = build_buckets(&entries, day("2025-01-01"), day("2025-01-03")).unwrap();

        assert_eq!(buckets[0], DayBucket::empty(day("2025-01-01")));
        let busy = &buckets[1];
        assert_eq!(busy.total_expense, dec!(50));
        assert_eq!(busy.total_revenue, dec!(100));
        assert_eq!(busy.profit, dec!(50));
        assert_eq!(busy.ratio, Some(dec!(2)));
        assert_eq!(buckets[2].ratio, None);
    }

    #[test]
    fn revenue_without_spend_has_no_ratio() {
        let entries = vec![DailyEntry::new(day("2025-01-01")).with_revenue(RevenueRecord::new(dec!(80)))];
        let buckets = build_buckets(&entries, day("2025-01-01"), day("2025-01-01")).unwrap();
        assert_eq!(buckets[0].profit, dec!(80));
        assert_eq!(buckets[0].ratio, None);
    }

    #[test]
    fn entries_outside_range_are_ignored() {
        let entries = vec![
            DailyEntry::new(day("2024-12-31")).with_expense(ExpenseRecord::new("ADS", dec!(999))),
            DailyEntry::new(day("2025-01-01")).with_expense(ExpenseRecord::new("ADS", dec!(5))),
        ];
        let buckets = build_buckets(&entries, day("2025-01-01"), day("2025-01-02")).unwrap();
        let total: Decimal = buckets.iter().map(|b| b.total_expense).sum();
        assert_eq!(total, dec!(5));
    }

    #[test]
    fn entries_sharing_a_day_are_merged() {
        let entries = vec![
            DailyEntry::new(day("2025-01-01"))
                .with_expense(ExpenseRecord::new("ADS", dec!(10)))
                .with_revenue(RevenueRecord::new(dec!(10))),
            DailyEntry::new(day("2025-01-01"))
                .with_expense(ExpenseRecord::new("IA", dec!(10)))
                .with_revenue(RevenueRecord::new(dec!(50))),
        ];
        let buckets = build_buckets(&entries, day("2025-01-01"), day("2025-01-01")).unwrap();
        assert_eq!(buckets[0].total_expense, dec!(20));
        assert_eq!(buckets[0].total_revenue, dec!(60));
        assert_eq!(buckets[0].ratio, Some(dec!(3)));
    }

    #[test]
    fn huge_revenue_on_tiny_spend_leaves_ratio_undefined() {
        let revenue = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        let entries = vec![
            DailyEntry::new(day("2025-01-01"))
                .with_expense(ExpenseRecord::new("ADS", dec!(0.0001)))
                .with_revenue(RevenueRecord::new(revenue)),
        ];
        let buckets = build_buckets(&entries, day("2025-01-01"), day("2025-01-01")).unwrap();
        assert_eq!(buckets[0].total_revenue, revenue);
        assert_eq!(buckets[0].ratio, None);
    }

    #[test]
    fn day_total_past_the_decimal_limit_is_an_error() {
        let entries = vec![
            DailyEntry::new(day("2025-01-01"))
                .with_revenue(RevenueRecord::new(Decimal::MAX))
                .with_revenue(RevenueRecord::new(Decimal::MAX)),
        ];
        let err = build_buckets(&entries, day("2025-01-01"), day("2025-01-01")).unwrap_err();
        assert_eq!(err, AnalyticsError::Overflow("daily revenue"));
    }
}
