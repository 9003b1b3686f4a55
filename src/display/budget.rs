//! Budget display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::services::BudgetStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format budget standings as a table
pub fn format_budget_status_table(statuses: &[BudgetStatus], symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budgets set. Add one with 'budget set'.\n".to_string();
    }

    let rows: Vec<BudgetRow> = statuses
        .iter()
        .map(|s| BudgetRow {
            category: format!("{} {}", s.category_emoji, s.category_name),
            period: s.budget.period.to_string(),
            limit: s.budget.amount.format_with_symbol(symbol),
            spent: s.spent.format_with_symbol(symbol),
            remaining: s.remaining.format_with_symbol(symbol),
            used: if s.is_over() {
                format!("{}% OVER", s.percent_used())
            } else {
                format!("{}%", s.percent_used())
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, CategoryId, Money, Period};
    use chrono::NaiveDate;

    #[test]
    fn test_over_budget_flagged() {
        let budget = Budget::new(CategoryId::new(), Money::from_cents(10_000), Period::Monthly);
        let status = BudgetStatus {
            category_name: "Food".into(),
            category_emoji: "🛒".into(),
            window: (
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ),
            spent: Money::from_cents(15_000),
            remaining: Money::from_cents(-5_000),
            budget,
        };

        let out = format_budget_status_table(&[status], "$");
        assert!(out.contains("150% OVER"));
        assert!(out.contains("Food"));
    }

    #[test]
    fn test_empty() {
        assert!(format_budget_status_table(&[], "$").contains("No budgets"));
    }
}
