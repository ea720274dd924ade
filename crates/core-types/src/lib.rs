pub mod calendar;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use calendar::{CalendarDay, DateRange};
pub use enums::PeriodPreset;
pub use error::CoreError;
pub use structs::{
    DailyEntry, ExpenseCategory, ExpenseRecord, LedgerBackup, Operation, RevenueRecord,
    default_expense_categories,
};
