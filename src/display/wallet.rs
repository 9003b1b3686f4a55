//! Wallet display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Money, Wallet};

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Wallet")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format wallets as a table, with a total row context line
pub fn format_wallet_list(wallets: &[Wallet], symbol: &str) -> String {
    if wallets.is_empty() {
        return "No wallets yet. Create one with 'wallet create'.\n".to_string();
    }

    let rows: Vec<WalletRow> = wallets
        .iter()
        .map(|w| WalletRow {
            name: format!(
                "{} {}{}",
                w.emoji,
                w.name,
                if w.archived { " (archived)" } else { "" }
            ),
            balance: w.balance.format_with_symbol(symbol),
            notes: super::truncate(&w.notes, 30),
        })
        .collect();

    let total: Money = wallets.iter().filter(|w| !w.archived).map(|w| w.balance).sum();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!(
        "{}\nTotal: {}\n",
        table,
        total.format_with_symbol(symbol)
    )
}

/// Format one wallet in detail
pub fn format_wallet_details(wallet: &Wallet, ledger_balance: Money, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", wallet.emoji, wallet.name));
    output.push_str(&format!("ID:             {}\n", wallet.id));
    output.push_str(&format!(
        "Balance:        {}\n",
        wallet.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Opening:        {}\n",
        wallet.opening_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Per ledger:     {}\n",
        ledger_balance.format_with_symbol(symbol)
    ));

    if ledger_balance != wallet.balance {
        output.push_str("Warning: stored balance and ledger disagree; run 'doctor'\n");
    }

    if !wallet.notes.is_empty() {
        output.push_str(&format!("Notes:          {}\n", wallet.notes));
    }
    if wallet.archived {
        output.push_str("Archived:       yes\n");
    }
    output.push_str(&format!(
        "Created:        {}\n",
        wallet.created_at.format("%Y-%m-%d")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let out = format_wallet_list(&[], "$");
        assert!(out.contains("No wallets"));
    }

    #[test]
    fn test_list_contains_names_and_total() {
        let wallets = vec![
            Wallet::with_balance("Bank", Money::from_cents(10_000)),
            Wallet::with_balance("Cash", Money::from_cents(2_500)),
        ];
        let out = format_wallet_list(&wallets, "$");
        assert!(out.contains("Bank"));
        assert!(out.contains("$100.00"));
        assert!(out.contains("Total: $125.00"));
    }

    #[test]
    fn test_details_warns_on_drift() {
        let wallet = Wallet::with_balance("Bank", Money::from_cents(10_000));
        let out = format_wallet_details(&wallet, Money::from_cents(9_000), "$");
        assert!(out.contains("doctor"));

        let out = format_wallet_details(&wallet, Money::from_cents(10_000), "$");
        assert!(!out.contains("doctor"));
    }
}
