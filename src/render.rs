use crate::fmt;
use analytics::{BudgetAlert, BudgetStatus, ComparisonRow, OperationReport};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use configuration::OutputFormat;
use core_types::{DateRange, Operation};
use serde::Serialize;
use std::io::Write;

/// JSON shape of the `compare` command.
#[derive(Debug, Serialize)]
struct ComparisonDocument<'a> {
    range: &'a DateRange,
    operations: &'a [ComparisonRow],
}

/// Writes command results in the selected output format.
pub struct Renderer<'a> {
    currency: &'a str,
    format: OutputFormat,
}

impl<'a> Renderer<'a> {
    pub fn new(currency: &'a str, format: OutputFormat) -> Self {
        Self { currency, format }
    }

    fn money(&self, val: rust_decimal::Decimal) -> String {
        fmt::money(self.currency, val)
    }

    pub fn report<W: Write>(&self, out: &mut W, report: &OperationReport, operation: &Operation) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, report)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => self.report_csv(out, report)?,
            OutputFormat::Table => self.report_table(out, report, operation)?,
        }
        Ok(())
    }

    fn report_table<W: Write>(&self, out: &mut W, report: &OperationReport, operation: &Operation) -> Result<()> {
        writeln!(out, "{} ({}): {}", report.operation_name, report.operation_id, report.range)?;

        let mut days = Table::new();
        days.set_header(vec!["Date", "Revenue", "Expense", "Profit", "Ratio"]);
        for day in &report.days {
            days.add_row(vec![
                Cell::new(day.date),
                right(self.money(day.total_revenue)),
                right(self.money(day.total_expense)),
                right(self.money(day.profit)),
                right(fmt::ratio(day.ratio)),
            ]);
        }
        let summary = &report.summary;
        days.add_row(vec![
            Cell::new("Total"),
            right(self.money(summary.total_revenue)),
            right(self.money(summary.total_expense)),
            right(self.money(summary.total_profit)),
            right(fmt::ratio(summary.average_ratio)),
        ]);
        writeln!(out, "{days}")?;

        writeln!(out, "\nExpenses by category")?;
        if report.categories.is_empty() {
            writeln!(out, "  No expenses in this period.")?;
        } else {
            let mut categories = Table::new();
            categories.set_header(vec!["Category", "Total", "Share"]);
            for item in &report.categories {
                let share = item
                    .total
                    .checked_div(summary.total_expense)
                    .and_then(|part| part.checked_mul(rust_decimal::Decimal::ONE_HUNDRED));
                categories.add_row(vec![
                    Cell::new(operation.category_label(&item.category)),
                    right(self.money(item.total)),
                    right(fmt::percent(share)),
                ]);
            }
            writeln!(out, "{categories}")?;
        }

        let insights = &report.insights;
        writeln!(out, "\nInsights")?;
        if insights.ratio_variation_percent.is_some() {
            writeln!(
                out,
                "  Ratio variation: {} (first half vs second half of the period)",
                fmt::signed_percent(insights.ratio_variation_percent)
            )?;
        }
        writeln!(
            out,
            "  Days with above-average expense: {} (average: {})",
            insights.days_above_average_expense_count,
            self.money(insights.average_expense)
        )?;

        self.budget_lines(out, &report.budget)
    }

    fn budget_lines<W: Write>(&self, out: &mut W, budget: &BudgetAlert) -> Result<()> {
        writeln!(out, "\nBudget")?;
        match budget.status {
            BudgetStatus::Unbudgeted => {
                writeln!(out, "  No daily budget set.")?;
                return Ok(());
            }
            BudgetStatus::WithinBudget => writeln!(out, "  Within budget.")?,
            BudgetStatus::Warning => writeln!(out, "  Warning: close to the daily budget.")?,
            BudgetStatus::Exceeded => writeln!(out, "  Budget exceeded!")?,
        }
        writeln!(
            out,
            "  Average daily expense: {} / daily budget: {} ({})",
            self.money(budget.average_daily_expense),
            self.money(budget.daily_budget),
            fmt::percent(budget.usage_percent)
        )?;
        if let Some(overage) = budget.overage {
            writeln!(out, "  Spending {} per day above budget.", self.money(overage))?;
        }
        Ok(())
    }

    fn report_csv<W: Write>(&self, out: &mut W, report: &OperationReport) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record(["Date", "Revenue", "Expense", "Profit", "Ratio"])?;
        for day in &report.days {
            wtr.write_record([
                day.date.iso_key(),
                fmt::plain(day.total_revenue),
                fmt::plain(day.total_expense),
                fmt::plain(day.profit),
                fmt::plain_ratio(day.ratio),
            ])?;
        }
        let summary = &report.summary;
        wtr.write_record([
            "Total".to_string(),
            fmt::plain(summary.total_revenue),
            fmt::plain(summary.total_expense),
            fmt::plain(summary.total_profit),
            fmt::plain_ratio(summary.average_ratio),
        ])?;
        wtr.flush()?;
        Ok(())
    }

    pub fn comparison<W: Write>(&self, out: &mut W, rows: &[ComparisonRow], range: &DateRange) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let doc = ComparisonDocument { range, operations: rows };
                serde_json::to_writer_pretty(&mut *out, &doc)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(out);
                wtr.write_record(["Operation", "Revenue", "Expense", "Profit", "Average ratio"])?;
                for row in rows {
                    wtr.write_record([
                        row.operation_name.clone(),
                        fmt::plain(row.summary.total_revenue),
                        fmt::plain(row.summary.total_expense),
                        fmt::plain(row.summary.total_profit),
                        fmt::plain_ratio(row.summary.average_ratio),
                    ])?;
                }
                wtr.flush()?;
            }
            OutputFormat::Table => {
                writeln!(out, "Operations: {range}")?;
                if rows.is_empty() {
                    writeln!(out, "  No operations in this ledger.")?;
                    return Ok(());
                }
                let mut table = Table::new();
                table.set_header(vec!["Operation", "Revenue", "Expense", "Profit", "Average ratio"]);
                for row in rows {
                    table.add_row(vec![
                        Cell::new(&row.operation_name),
                        right(self.money(row.summary.total_revenue)),
                        right(self.money(row.summary.total_expense)),
                        right(self.money(row.summary.total_profit)),
                        right(fmt::ratio(row.summary.average_ratio)),
                    ]);
                }
                writeln!(out, "{table}")?;
            }
        }
        Ok(())
    }

    pub fn categories<W: Write>(&self, out: &mut W, operation: &Operation) -> Result<()> {
        let categories = operation.expense_categories();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &categories)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(out);
                wtr.write_record(["id", "label"])?;
                for category in &categories {
                    wtr.write_record([&category.id, &category.label])?;
                }
                wtr.flush()?;
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table.set_header(vec!["Id", "Label"]);
                for category in &categories {
                    table.add_row(vec![Cell::new(&category.id), Cell::new(&category.label)]);
                }
                writeln!(out, "{}", operation.name)?;
                writeln!(out, "{table}")?;
            }
        }
        Ok(())
    }
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::{CalendarDay, DailyEntry, ExpenseRecord, RevenueRecord};
    use rust_decimal_macros::dec;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    fn sample() -> (Operation, OperationReport) {
        let mut op = Operation::new("op-1", "Loja", dec!(40));
        op.daily_entries = vec![
            DailyEntry::new(day("2025-01-01"))
                .with_expense(ExpenseRecord::new("ADS", dec!(50)))
                .with_revenue(RevenueRecord::new(dec!(100))),
        ];
        let range = DateRange::new(day("2025-01-01"), day("2025-01-02")).unwrap();
        let report = AnalyticsEngine::new().calculate(&op, &range).unwrap();
        (op, report)
    }

    fn render(format: OutputFormat) -> String {
        let (op, report) = sample();
        let mut buf = Vec::new();
        Renderer::new("R$", format).report(&mut buf, &report, &op).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_day_rows_and_totals() {
        let csv = render(OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,Revenue,Expense,Profit,Ratio",
                "2025-01-01,100.00,50.00,50.00,2.00",
                "2025-01-02,0.00,0.00,0.00,",
                "Total,100.00,50.00,50.00,2.00",
            ]
        );
    }

    #[test]
    fn table_shows_labels_insights_and_budget() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Loja (op-1): 2025-01-01 to 2025-01-02"));
        assert!(table.contains("Ads"));
        assert!(table.contains("2.00x"));
        assert!(table.contains("Days with above-average expense: 1 (average: R$ 25.00)"));
        assert!(table.contains("Within budget."));
    }

    #[test]
    fn json_is_the_report_verbatim() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json["operationName"], "Loja");
        assert_eq!(json["days"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn share_too_large_to_express_is_shown_as_missing() {
        let big = rust_decimal::Decimal::from_i128_with_scale(10_i128.pow(23), 0);
        let mut op = Operation::new("op-2", "Refunds", dec!(0));
        op.daily_entries = vec![
            DailyEntry::new(day("2025-01-01"))
                .with_expense(ExpenseRecord::new("ADS", big))
                .with_expense(ExpenseRecord::new("IA", dec!(0)).with_adjustment(dec!(0.0001) - big)),
        ];
        let range = DateRange::new(day("2025-01-01"), day("2025-01-01")).unwrap();
        let report = AnalyticsEngine::new().calculate(&op, &range).unwrap();

        let mut buf = Vec::new();
        Renderer::new("R$", OutputFormat::Table).report(&mut buf, &report, &op).unwrap();
        let table = String::from_utf8(buf).unwrap();
        assert!(table.contains(fmt::MISSING));
    }
}

