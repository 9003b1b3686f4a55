//! Liability display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Liability, LiabilityPayment};

#[derive(Tabled)]
struct LiabilityRow {
    #[tabled(rename = "Debt")]
    name: String,
    #[tabled(rename = "Creditor")]
    creditor: String,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Outstanding")]
    outstanding: String,
    #[tabled(rename = "Due")]
    due: String,
}

/// Format liabilities as a table
pub fn format_liability_list(liabilities: &[Liability], symbol: &str) -> String {
    if liabilities.is_empty() {
        return "No liabilities tracked.\n".to_string();
    }

    let rows: Vec<LiabilityRow> = liabilities
        .iter()
        .map(|l| LiabilityRow {
            name: if l.is_settled() {
                format!("{} (settled)", l.name)
            } else {
                l.name.clone()
            },
            creditor: l.creditor.clone(),
            original: l.original_amount.format_with_symbol(symbol),
            outstanding: l.balance.format_with_symbol(symbol),
            due: l
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format one liability with its payment history
pub fn format_payment_history(
    liability: &Liability,
    payments: &[LiabilityPayment],
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", liability));
    output.push_str(&format!(
        "Paid so far: {} of {}\n",
        liability.paid_amount().format_with_symbol(symbol),
        liability.original_amount.format_with_symbol(symbol),
    ));

    if payments.is_empty() {
        output.push_str("No payments recorded.\n");
        return output;
    }

    output.push_str("\nPayments:\n");
    for payment in payments {
        output.push_str(&format!(
            "  {}  {}{}\n",
            payment.date.format("%Y-%m-%d"),
            payment.amount.format_with_symbol(symbol),
            if payment.notes.is_empty() {
                String::new()
            } else {
                format!("  ({})", payment.notes)
            },
        ));
    }

    output
}
