use crate::calendar::{CalendarDay, DateRange};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The preset reporting windows offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodPreset {
    Today,
    #[default]
    Last7Days,
    Last15Days,
    Last30Days,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 4] = [
        PeriodPreset::Today,
        PeriodPreset::Last7Days,
        PeriodPreset::Last15Days,
        PeriodPreset::Last30Days,
    ];

    /// Returns the preset covering exactly `days` days, if one exists.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.days() == days)
    }

    pub fn days(&self) -> u32 {
        match self {
            PeriodPreset::Today => 1,
            PeriodPreset::Last7Days => 7,
            PeriodPreset::Last15Days => 15,
            PeriodPreset::Last30Days => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodPreset::Today => "Today",
            PeriodPreset::Last7Days => "7 days",
            PeriodPreset::Last15Days => "15 days",
            PeriodPreset::Last30Days => "30 days",
        }
    }

    /// The window of this preset ending at `reference`.
    pub fn range_ending(&self, reference: CalendarDay) -> Result<DateRange, CoreError> {
        DateRange::trailing(reference, self.days())
    }
}

impl fmt::Display for PeriodPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PeriodPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let preset = match normalized.as_str() {
            "today" | "1" | "1d" => Some(PeriodPreset::Today),
            "7" | "7d" => Some(PeriodPreset::Last7Days),
            "15" | "15d" => Some(PeriodPreset::Last15Days),
            "30" | "30d" => Some(PeriodPreset::Last30Days),
            _ => None,
        };
        preset.ok_or_else(|| {
            CoreError::InvalidInput(
                "period".to_string(),
                format!("'{s}' is not one of today, 7d, 15d, 30d"),
            )
        })
    }
}
