//! Transfer CLI command

use crate::config::Settings;
use crate::error::FintrackResult;
use crate::services::{TransferService, WalletService};
use crate::storage::Storage;

/// Handle the transfer command
pub fn handle_transfer_command(
    storage: &Storage,
    settings: &Settings,
    from: &str,
    to: &str,
    amount: &str,
    date: Option<&str>,
    notes: Option<String>,
) -> FintrackResult<()> {
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    let from = wallets.require_active(from)?;
    let to = wallets.require_active(to)?;
    let amount = super::parse_money(amount)?;
    let date = super::parse_date_or_today(date)?;

    let service = TransferService::new(storage);
    service.create(from.id, to.id, amount, date, notes)?;

    let from = wallets.require(&from.name)?;
    let to = wallets.require(&to.name)?;

    println!(
        "Transferred {} from '{}' to '{}'",
        amount.format_with_symbol(symbol),
        from.name,
        to.name
    );
    println!(
        "  {}: {}   {}: {}",
        from.name,
        from.balance.format_with_symbol(symbol),
        to.name,
        to.balance.format_with_symbol(symbol)
    );

    Ok(())
}
