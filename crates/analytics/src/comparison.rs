use crate::buckets::buckets_for_range;
use crate::error::AnalyticsError;
use crate::report::ComparisonRow;
use crate::summary::summarize;
use core_types::{DateRange, Operation};

/// Summarizes every operation over the same range, ordered by name.
pub fn compare_operations(
    operations: &[Operation],
    range: &DateRange,
) -> Result<Vec<ComparisonRow>, AnalyticsError> {
    let mut rows = operations
        .iter()
        .map(|op| -> Result<ComparisonRow, AnalyticsError> {
            Ok(ComparisonRow {
                operation_id: op.id.clone(),
                operation_name: op.name.clone(),
                summary: summarize(&buckets_for_range(&op.daily_entries, range)?)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by(|a, b| {
        a.operation_name
            .cmp(&b.operation_name)
            .then_with(|| a.operation_id.cmp(&b.operation_id))
    });
    Ok(rows)
}
