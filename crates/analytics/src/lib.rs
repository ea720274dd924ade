//! # Operation Analytics Engine
//!
//! This crate turns the raw daily ledger of a business operation (expenses
//! and revenues attached to calendar days) into per-day statistics, range
//! totals, category breakdowns and trend insights.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage or
//!   presentation. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function reads its input and allocates its own
//!   output, so reports for different operations or periods can be computed in parallel.
//! - **Decimal Arithmetic:** Amounts and ratios are `rust_decimal::Decimal` end to end.
//!   Undefined ratios are `None` and are never averaged as zero.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs the full pipeline for one operation and range.
//! - `build_buckets`, `summarize`, `summarize_by_category`, `compute_insights`: the
//!   individual pipeline stages.
//! - `daily_expense_amount`, `ratio`: the per-record helpers.
//! - `OperationReport` and its parts: the structures handed to presentation code.

pub mod buckets;
pub mod budget;
pub mod calculations;
pub mod categories;
pub mod comparison;
pub mod engine;
pub mod error;
pub mod insights;
pub mod report;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use buckets::build_buckets;
pub use budget::{DEFAULT_WARNING_RATIO, assess_budget};
pub use calculations::{daily_expense_amount, ratio};
pub use categories::summarize_by_category;
pub use comparison::compare_operations;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use insights::compute_insights;
pub use report::{
    BudgetAlert, BudgetStatus, CategoryTotal, ComparisonRow, DayBucket, Insights,
    OperationReport, RangeSummary,
};
pub use summary::summarize;
