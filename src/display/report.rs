//! Report display formatting
//!
//! Renders the dashboard, spending, and calendar reports as terminal text.

use crate::reports::{CalendarReport, DashboardReport, SpendingReport};

/// Format the dashboard overview
pub fn format_dashboard(report: &DashboardReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Overview as of {}\n", report.as_of.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Cash:         {}\n",
        report.total_cash.format_with_symbol(symbol)
    ));

    match (&report.gold_value, &report.quote) {
        (Some(value), Some(quote)) => {
            output.push_str(&format!(
                "Gold:         {} worth {} (spot {}/g)\n",
                report.gold_weight,
                value.format_with_symbol(symbol),
                quote.price_per_gram.format_with_symbol(symbol),
            ));
        }
        _ => {
            output.push_str(&format!(
                "Gold:         {} at cost {} (no spot quote)\n",
                report.gold_weight,
                report.gold_cost_basis.format_with_symbol(symbol),
            ));
        }
    }

    output.push_str(&format!(
        "Debts:        {}\n",
        report.liabilities_outstanding.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net position: {}\n",
        report.net_position().format_with_symbol(symbol)
    ));

    if !report.goals.is_empty() {
        output.push_str("\nSavings goals:\n");
        output.push_str(&super::format_goal_list(&report.goals, symbol));
    }

    if !report.upcoming_bills.is_empty() {
        output.push_str("\nBills due soon:\n");
        for bill in &report.upcoming_bills {
            output.push_str(&format!(
                "  {}  {}  {}\n",
                bill.due_date.format("%Y-%m-%d"),
                bill.amount.format_with_symbol(symbol),
                bill.name,
            ));
        }
    }

    if !report.recent_transactions.is_empty() {
        output.push_str("\nRecent activity:\n");
        for txn in &report.recent_transactions {
            output.push_str(&format!(
                "  {}  {:8}  {}{}\n",
                txn.date.format("%Y-%m-%d"),
                txn.kind.to_string(),
                txn.amount.format_with_symbol(symbol),
                if txn.notes.is_empty() {
                    String::new()
                } else {
                    format!("  {}", super::truncate(&txn.notes, 40))
                },
            ));
        }
    }

    output
}

/// Format the spending breakdown
pub fn format_spending(report: &SpendingReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Spending {} to {}\n",
        report.start.format("%Y-%m-%d"),
        report.end.format("%Y-%m-%d")
    ));

    if report.rows.is_empty() {
        output.push_str("No spending in this range.\n");
        return output;
    }

    for row in &report.rows {
        output.push_str(&format!(
            "  {} {:20} {:>12}  {:>3}%\n",
            row.category_emoji,
            super::truncate(&row.category_name, 20),
            row.total.format_with_symbol(symbol),
            row.percent,
        ));
    }

    output.push_str(&format!(
        "Total: {}\n",
        report.total.format_with_symbol(symbol)
    ));

    output
}

/// Format the calendar month summary
pub fn format_calendar(report: &CalendarReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}-{:02}\n", report.year, report.month));

    if report.days.is_empty() {
        output.push_str("No activity this month.\n");
    } else {
        for day in &report.days {
            output.push_str(&format!(
                "  {}  in {:>12}  out {:>12}  ({} entries)\n",
                day.date.format("%Y-%m-%d"),
                day.inflow.format_with_symbol(symbol),
                day.outflow.format_with_symbol(symbol),
                day.entry_count,
            ));
        }
        output.push_str(&format!(
            "Month: in {} / out {} / net {}\n",
            report.total_inflow.format_with_symbol(symbol),
            report.total_outflow.format_with_symbol(symbol),
            report.net().format_with_symbol(symbol),
        ));
    }

    if !report.bills_due.is_empty() {
        output.push_str("\nBills due this month:\n");
        for bill in &report.bills_due {
            output.push_str(&format!(
                "  {}  {}  {}{}\n",
                bill.due_date.format("%Y-%m-%d"),
                bill.amount.format_with_symbol(symbol),
                bill.name,
                if bill.paid { " (paid)" } else { "" },
            ));
        }
    }

    output
}
