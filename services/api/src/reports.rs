//! Aggregations over an account's transactions: dashboard totals, expense
//! breakdown per category, month-by-month totals and budget consumption.

use chrono::Datelike;
use postgres_models::{Budget, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Consumption at or above this share of a budget is a warning.
pub const WARNING_PERCENTAGE: f64 = 75.0;
/// Consumption at or above this share of a budget counts as exceeded.
pub const EXCEEDED_PERCENTAGE: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotals {
    /// `YYYY-MM`, UTC.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCEEDED_PERCENTAGE {
            Self::Exceeded
        } else if percentage >= WARNING_PERCENTAGE {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent: f64,
    pub percentage: f64,
    /// `percentage` capped at 100, for progress bars.
    pub progress: f64,
    pub status: BudgetStatus,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let income: f64 = transactions.iter().filter(|tx| tx.is_income()).map(|tx| tx.amount).sum();
    let expense: f64 = transactions.iter().filter(|tx| tx.is_expense()).map(|tx| tx.amount).sum();
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Expense totals per category, ordered by category name.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let category = if tx.category.is_empty() {
            UNCATEGORIZED
        } else {
            tx.category.as_str()
        };
        *by_category.entry(category).or_default() += tx.amount;
    }

    by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect()
}

/// Income and expense per calendar month, oldest month first.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthTotals> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for tx in transactions {
        let entry = by_month
            .entry(tx.occurred_at.format("%Y-%m").to_string())
            .or_default();
        if tx.is_income() {
            entry.0 += tx.amount;
        } else if tx.is_expense() {
            entry.1 += tx.amount;
        }
    }

    by_month
        .into_iter()
        .map(|(month, (income, expense))| MonthTotals {
            month,
            income,
            expense,
        })
        .collect()
}

/// Sums the expenses that count against `budget`: same category ignoring
/// case, same calendar month (UTC).
pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let category = budget.category.to_lowercase();
    let spent: f64 = transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .filter(|tx| tx.category.to_lowercase() == category)
        .filter(|tx| {
            tx.occurred_at.year() == budget.month.year()
                && tx.occurred_at.month() == budget.month.month()
        })
        .map(|tx| tx.amount)
        .sum();

    let percentage = if budget.amount > 0.0 {
        spent / budget.amount * 100.0
    } else {
        0.0
    };

    BudgetProgress {
        budget: budget.clone(),
        spent,
        percentage,
        progress: percentage.min(100.0),
        status: BudgetStatus::from_percentage(percentage),
    }
}
