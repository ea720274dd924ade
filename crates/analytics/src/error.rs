use core_types::{CalendarDay, CoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: CalendarDay, end: CalendarDay },

    #[error("Amounts too large: overflow while computing the {0}")]
    Overflow(&'static str),

    #[error("Invalid input: {0}")]
    Core(#[from] CoreError),
}
