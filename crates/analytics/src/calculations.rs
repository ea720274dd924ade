//! Pure per-record helpers used by the aggregators.

use crate::error::AnalyticsError;
use core_types::{CalendarDay, ExpenseRecord};
use rust_decimal::Decimal;

/// The share of `expense` that falls on `date`.
///
/// Monthly costs are spread over the actual length of the month containing
/// `date`, so the same monthly amount costs less per day in a 31-day month
/// than in February. The manual adjustment is added as-is in both cases.
pub fn daily_expense_amount(expense: &ExpenseRecord, date: CalendarDay) -> Result<Decimal, AnalyticsError> {
    let base = if expense.is_monthly {
        expense.amount / Decimal::from(date.days_in_month())
    } else {
        expense.amount
    };
    base.checked_add(expense.manual_adjust.unwrap_or_default())
        .ok_or(AnalyticsError::Overflow("daily expense"))
}

/// Revenue per unit of expense. `None` when nothing was spent, or when the
/// quotient does not fit in a `Decimal`.
pub fn ratio(revenue: Decimal, expense: Decimal) -> Option<Decimal> {
    if expense <= Decimal::ZERO {
        return None;
    }
    revenue.checked_div(expense)
}

/// Sums `values`, failing with `Overflow(what)` instead of panicking.
pub(crate) fn checked_total<I>(values: I, what: &'static str) -> Result<Decimal, AnalyticsError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, val| acc.checked_add(val))
        .ok_or(AnalyticsError::Overflow(what))
}

/// Arithmetic mean. `None` for an empty slice or when the sum overflows.
pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = checked_total(values.iter().copied(), "mean").ok()?;
    sum.checked_div(Decimal::from(values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    fn amount(expense: &ExpenseRecord, date: CalendarDay) -> Decimal {
        daily_expense_amount(expense, date).unwrap()
    }

    #[test]
    fn monthly_expense_is_prorated_by_month_length() {
        let rent = ExpenseRecord::monthly("IA", dec!(310));
        assert_eq!(amount(&rent, day("2025-01-10")), dec!(10));

        let chips = ExpenseRecord::monthly("CHIPS", dec!(280));
        assert_eq!(amount(&chips, day("2025-02-10")), dec!(10));
        assert_eq!(amount(&chips, day("2024-02-10")), dec!(280) / dec!(29));
    }

    #[test]
    fn one_off_expense_adds_manual_adjustment() {
        let ads = ExpenseRecord::new("ADS", dec!(100)).with_adjustment(dec!(20));
        assert_eq!(amount(&ads, day("2025-07-01")), dec!(120));
        assert_eq!(amount(&ads, day("2025-02-28")), dec!(120));

        let refund = ExpenseRecord::new("ADS", dec!(50)).with_adjustment(dec!(-5));
        assert_eq!(amount(&refund, day("2025-07-01")), dec!(45));
    }

    #[test]
    fn monthly_adjustment_is_not_prorated() {
        let tool = ExpenseRecord::monthly("IA", dec!(300)).with_adjustment(dec!(1.5));
        assert_eq!(amount(&tool, day("2025-06-15")), dec!(11.5));
    }

    #[test]
    fn ratio_is_undefined_without_spend() {
        assert_eq!(ratio(dec!(100), dec!(0)), None);
        assert_eq!(ratio(dec!(100), dec!(-3)), None);
        assert_eq!(ratio(dec!(0), dec!(0)), None);
        assert_eq!(ratio(dec!(150), dec!(50)), Some(dec!(3)));
        assert_eq!(ratio(dec!(0), dec!(40)), Some(dec!(0)));
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[dec!(1), dec!(2)]), Some(dec!(1.5)));
    }

    #[test]
    fn ratio_too_large_for_a_decimal_is_undefined() {
        let revenue = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        assert_eq!(ratio(revenue, dec!(0.0001)), None);
        assert_eq!(ratio(Decimal::MAX, dec!(1)), Some(Decimal::MAX));
    }

    #[test]
    fn adjustment_past_the_decimal_limit_is_an_error() {
        let ads = ExpenseRecord::new("ADS", Decimal::MAX).with_adjustment(dec!(1));
        assert_eq!(
            daily_expense_amount(&ads, day("2025-01-01")),
            Err(AnalyticsError::Overflow("daily expense"))
        );
    }

    #[test]
    fn overflowing_sums_are_reported() {
        assert_eq!(checked_total([dec!(1), dec!(2)], "total"), Ok(dec!(3)));
        assert_eq!(
            checked_total([Decimal::MAX, Decimal::MAX], "total"),
            Err(AnalyticsError::Overflow("total"))
        );
        assert_eq!(mean(&[Decimal::MAX, Decimal::MAX]), None);
    }
}
