use crate::calendar::CalendarDay;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A single cost entry attached to one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When set, `amount` is a monthly cost spread evenly over the days of the month.
    #[serde(default)]
    pub is_monthly: bool,
    #[serde(default)]
    pub manual_adjust: Option<Decimal>,
}

impl ExpenseRecord {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: None,
            category: category.into(),
            amount,
            description: None,
            is_monthly: false,
            manual_adjust: None,
        }
    }

    /// A recurring monthly cost recorded against a day.
    pub fn monthly(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            is_monthly: true,
            ..Self::new(category, amount)
        }
    }

    pub fn with_adjustment(mut self, adjust: Decimal) -> Self {
        self.manual_adjust = Some(adjust);
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.category.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "category".to_string(),
                "category is required".to_string(),
            ));
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(CoreError::InvalidInput(
                "amount".to_string(),
                format!("expense amount {} must not be negative", self.amount),
            ));
        }
        Ok(())
    }
}

/// A single income entry attached to one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form time-of-day label, e.g. "14:30".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl RevenueRecord {
    pub fn new(amount: Decimal) -> Self {
        Self {
            id: None,
            amount,
            description: None,
            time: None,
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(CoreError::InvalidInput(
                "amount".to_string(),
                format!("revenue amount {} must not be negative", self.amount),
            ));
        }
        Ok(())
    }
}

/// All records an operation logged for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: CalendarDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub revenues: Vec<RevenueRecord>,
}

impl DailyEntry {
    pub fn new(date: CalendarDay) -> Self {
        Self {
            id: None,
            date,
            observations: None,
            expenses: Vec::new(),
            revenues: Vec::new(),
        }
    }

    pub fn with_expense(mut self, expense: ExpenseRecord) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn with_revenue(mut self, revenue: RevenueRecord) -> Self {
        self.revenues.push(revenue);
        self
    }
}

/// An expense category an operation can file costs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: String,
    pub label: String,
}

impl ExpenseCategory {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The built-in categories used when an operation defines none of its own.
pub fn default_expense_categories() -> Vec<ExpenseCategory> {
    vec![
        ExpenseCategory::new("ADS", "Ads"),
        ExpenseCategory::new("IA", "IA"),
        ExpenseCategory::new("CHIPS", "Chips"),
        ExpenseCategory::new("VARIAVEL", "Gastos variáveis"),
    ]
}

/// A business operation whose revenue and expenses are tracked day by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub daily_budget: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_account: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_categories",
        skip_serializing_if = "Option::is_none"
    )]
    pub expense_categories: Option<Vec<ExpenseCategory>>,
    #[serde(default)]
    pub daily_entries: Vec<DailyEntry>,
}

impl Operation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, daily_budget: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            daily_budget,
            pix_account: None,
            expense_categories: None,
            daily_entries: Vec::new(),
        }
    }

    /// The operation's own categories, or the defaults when it has none.
    pub fn expense_categories(&self) -> Vec<ExpenseCategory> {
        match &self.expense_categories {
            Some(categories) if !categories.is_empty() => categories.clone(),
            _ => default_expense_categories(),
        }
    }

    /// Display label for a category id; unknown ids are shown as-is.
    pub fn category_label(&self, id: &str) -> String {
        self.expense_categories()
            .into_iter()
            .find(|category| category.id == id)
            .map(|category| category.label)
            .unwrap_or_else(|| id.to_string())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "name".to_string(),
                format!("operation {} has no name", self.id),
            ));
        }
        if self.daily_budget.is_sign_negative() && !self.daily_budget.is_zero() {
            return Err(CoreError::InvalidInput(
                "dailyBudget".to_string(),
                format!("budget of '{}' must not be negative", self.name),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.daily_entries {
            if !seen.insert(entry.date) {
                return Err(CoreError::InvalidInput(
                    "dailyEntries".to_string(),
                    format!("'{}' has more than one entry for {}", self.name, entry.date),
                ));
            }
            for expense in &entry.expenses {
                expense.validate()?;
            }
            for revenue in &entry.revenues {
                revenue.validate()?;
            }
        }
        Ok(())
    }
}

/// Older backups store the category list as an embedded JSON string. Anything
/// that does not parse falls back to the defaults.
fn deserialize_categories<'de, D>(deserializer: D) -> Result<Option<Vec<ExpenseCategory>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => serde_json::from_str::<Vec<ExpenseCategory>>(&text),
        Some(value) => serde_json::from_value::<Vec<ExpenseCategory>>(value),
    };
    match parsed {
        Ok(categories) => Ok(Some(categories)),
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable expense categories, using defaults.");
            Ok(None)
        }
    }
}

/// The JSON backup document holding every operation and its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBackup {
    #[serde(default = "default_backup_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

fn default_backup_version() -> u32 {
    1
}

impl LedgerBackup {
    /// Finds an operation by exact id, or by name ignoring case.
    pub fn operation(&self, key: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.id == key)
            .or_else(|| self.operations.iter().find(|op| op.name.eq_ignore_ascii_case(key)))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.operations.iter().try_for_each(Operation::validate)
    }
}
