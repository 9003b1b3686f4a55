//! Gold display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{GoldPriceQuote, GoldWallet, Money, Weight};
use crate::services::GoldHolding;

#[derive(Tabled)]
struct GoldWalletRow {
    #[tabled(rename = "Gold wallet")]
    name: String,
    #[tabled(rename = "Purity")]
    purity: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Cost basis")]
    cost_basis: String,
}

/// Format gold wallets as a table
pub fn format_gold_wallet_list(wallets: &[GoldWallet], symbol: &str) -> String {
    if wallets.is_empty() {
        return "No gold wallets yet. Create one with 'gold wallet create'.\n".to_string();
    }

    let rows: Vec<GoldWalletRow> = wallets
        .iter()
        .map(|w| GoldWalletRow {
            name: format!("{} {}", w.emoji, w.name),
            purity: w.purity.to_string(),
            weight: w.weight.to_string(),
            cost_basis: w.cost_basis.format_with_symbol(symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Gold wallet")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Fine")]
    fine: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Gain")]
    gain: String,
}

/// Format valued holdings as a table with a portfolio summary line
pub fn format_holdings_table(
    holdings: &[GoldHolding],
    quote: &GoldPriceQuote,
    symbol: &str,
) -> String {
    if holdings.is_empty() {
        return "No gold holdings.\n".to_string();
    }

    let rows: Vec<HoldingRow> = holdings
        .iter()
        .map(|h| HoldingRow {
            name: format!("{} {}", h.wallet.emoji, h.wallet.name),
            weight: h.wallet.weight.to_string(),
            fine: h.wallet.fine_weight().to_string(),
            value: h.value.format_with_symbol(symbol),
            gain: h.gain.format_with_symbol(symbol),
        })
        .collect();

    let total_weight: Weight = holdings.iter().map(|h| h.wallet.weight).sum();
    let total_value: Money = holdings.iter().map(|h| h.value).sum();
    let total_gain: Money = holdings.iter().map(|h| h.gain).sum();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!(
        "{}\nSpot: {}/g ({}, {}h old)\nTotal: {} worth {} ({} unrealized)\n",
        table,
        quote.price_per_gram.format_with_symbol(symbol),
        quote.source,
        quote.age_hours(),
        total_weight,
        total_value.format_with_symbol(symbol),
        total_gain.format_with_symbol(symbol),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoldPurity;

    #[test]
    fn test_empty_lists() {
        assert!(format_gold_wallet_list(&[], "$").contains("No gold wallets"));
    }

    #[test]
    fn test_holdings_table_totals() {
        let mut vault = GoldWallet::new("Vault", GoldPurity::K24);
        vault.add(Weight::from_grams(10), Money::from_cents(60_000));
        let value = vault.value_at(Money::from_cents(7_000));

        let holdings = vec![GoldHolding {
            gain: value - vault.cost_basis,
            value,
            wallet: vault,
        }];
        let quote = GoldPriceQuote::manual(Money::from_cents(7_000), "USD");

        let out = format_holdings_table(&holdings, &quote, "$");
        assert!(out.contains("Vault"));
        assert!(out.contains("$70.00/g"));
        assert!(out.contains("unrealized"));
    }
}
