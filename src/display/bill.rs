//! Bill display formatting

use chrono::NaiveDate;
use tabled::{settings::Style, Table, Tabled};

use crate::models::BillReminder;

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Bill")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Cadence")]
    cadence: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format bills as a table with due-date context
pub fn format_bill_list(bills: &[BillReminder], today: NaiveDate, symbol: &str) -> String {
    if bills.is_empty() {
        return "No bills tracked. Add one with 'bill add'.\n".to_string();
    }

    let rows: Vec<BillRow> = bills
        .iter()
        .map(|b| {
            let status = if b.paid {
                "paid".to_string()
            } else if b.is_overdue(today) {
                format!("OVERDUE {}d", -b.days_until_due(today))
            } else {
                format!("due in {}d", b.days_until_due(today))
            };

            BillRow {
                name: b.name.clone(),
                amount: b.amount.format_with_symbol(symbol),
                due: b.due_date.format("%Y-%m-%d").to_string(),
                cadence: b
                    .recurrence
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "once".to_string()),
                status,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
