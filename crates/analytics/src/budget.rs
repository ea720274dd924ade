use crate::report::{BudgetAlert, BudgetStatus};
use rust_decimal::Decimal;

/// Share of the daily budget at which a warning is raised.
pub const DEFAULT_WARNING_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Compares the average daily spend over `period_days` with `daily_budget`.
pub fn assess_budget(
    daily_budget: Decimal,
    total_expense: Decimal,
    period_days: usize,
    warning_ratio: Decimal,
) -> BudgetAlert {
    let average_daily_expense = total_expense / Decimal::from(period_days.max(1));

    if daily_budget <= Decimal::ZERO {
        return BudgetAlert {
            status: BudgetStatus::Unbudgeted,
            daily_budget,
            average_daily_expense,
            usage_percent: None,
            overage: None,
        };
    }

    // A tiny budget against a large spend can exceed the `Decimal` range.
    let usage_percent = average_daily_expense
        .checked_div(daily_budget)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED));
    let status = if average_daily_expense > daily_budget {
        BudgetStatus::Exceeded
    } else if daily_budget
        .checked_mul(warning_ratio)
        .is_some_and(|threshold| average_daily_expense >= threshold)
    {
        BudgetStatus::Warning
    } else {
        BudgetStatus::WithinBudget
    };

    BudgetAlert {
        status,
        daily_budget,
        average_daily_expense,
        usage_percent,
        overage: (status == BudgetStatus::Exceeded)
            .then(|| average_daily_expense.checked_sub(daily_budget))
            .flatten(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_warning_ratio_is_ninety_percent() {
        assert_eq!(DEFAULT_WARNING_RATIO, dec!(0.9));
    }

    #[test]
    fn over_budget_reports_overage() {
        let alert = assess_budget(dec!(100), dec!(840), 7, DEFAULT_WARNING_RATIO);
        assert_eq!(alert.status, BudgetStatus::Exceeded);
        assert_eq!(alert.average_daily_expense, dec!(120));
        assert_eq!(alert.usage_percent, Some(dec!(120)));
        assert_eq!(alert.overage, Some(dec!(20)));
        assert!(alert.is_alerting());
    }

    #[test]
    fn close_to_budget_warns() {
        let alert = assess_budget(dec!(100), dec!(95), 1, DEFAULT_WARNING_RATIO);
        assert_eq!(alert.status, BudgetStatus::Warning);
        assert_eq!(alert.overage, None);

        let exact = assess_budget(dec!(100), dec!(700), 7, DEFAULT_WARNING_RATIO);
        assert_eq!(exact.status, BudgetStatus::Warning);
    }

    #[test]
    fn comfortably_under_budget_is_quiet() {
        let alert = assess_budget(dec!(100), dec!(300), 7, DEFAULT_WARNING_RATIO);
        assert_eq!(alert.status, BudgetStatus::WithinBudget);
        assert!(!alert.is_alerting());
    }

    #[test]
    fn zero_budget_is_unbudgeted() {
        let alert = assess_budget(dec!(0), dec!(0), 7, DEFAULT_WARNING_RATIO);
        assert_eq!(alert.status, BudgetStatus::Unbudgeted);
        assert_eq!(alert.usage_percent, None);
        assert!(!alert.is_alerting());
    }

    #[test]
    fn usage_too_large_to_express_is_left_out() {
        let alert = assess_budget(dec!(0.0001), Decimal::MAX, 1, DEFAULT_WARNING_RATIO);
        assert_eq!(alert.status, BudgetStatus::Exceeded);
        assert_eq!(alert.usage_percent, None);
    }
}
