//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_goal_list;
use crate::error::FintrackResult;
use crate::services::{SavingsService, WalletService};
use crate::storage::Storage;

/// Savings subcommands
#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount (e.g., "2500.00")
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short = 'D', long)]
        deadline: Option<String>,
        /// Default wallet to draw contributions from
        #[arg(short, long)]
        wallet: Option<String>,
        /// Emoji tag
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// List goals
    List {
        /// Show closed goals too
        #[arg(short, long)]
        all: bool,
    },
    /// Contribute to a goal from a wallet
    Add {
        /// Goal name or ID
        goal: String,
        /// Amount to contribute
        amount: String,
        /// Wallet to draw from (the goal's default if omitted)
        #[arg(short, long)]
        wallet: Option<String>,
        /// Contribution date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Take money back out of a goal
    Withdraw {
        /// Goal name or ID
        goal: String,
        /// Amount to withdraw
        amount: String,
        /// Wallet to credit (the goal's default if omitted)
        #[arg(short, long)]
        wallet: Option<String>,
        /// Withdrawal date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Close a goal
    Close {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a savings command
pub fn handle_savings_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SavingsCommands,
) -> FintrackResult<()> {
    let service = SavingsService::new(storage);
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        SavingsCommands::Create {
            name,
            target,
            deadline,
            wallet,
            emoji,
        } => {
            let target = super::parse_money(&target)?;
            let deadline = deadline.as_deref().map(super::parse_date).transpose()?;
            let wallet_id = wallet
                .map(|w| wallets.require(&w).map(|w| w.id))
                .transpose()?;

            let goal = service.create(&name, target, deadline, wallet_id, emoji)?;
            println!(
                "Created goal: {} {} (target {})",
                goal.emoji,
                goal.name,
                goal.target_amount.format_with_symbol(symbol)
            );
        }

        SavingsCommands::List { all } => {
            let goals = service.list(all)?;
            print!("{}", format_goal_list(&goals, symbol));
        }

        SavingsCommands::Add {
            goal,
            amount,
            wallet,
            date,
        } => {
            let goal = service.require(&goal)?;
            let amount = super::parse_money(&amount)?;
            let date = super::parse_date_or_today(date.as_deref())?;
            let wallet_id = resolve_wallet(&wallets, wallet, goal.wallet_id, &goal.name)?;

            let goal = service.contribute(goal.id, wallet_id, amount, date)?;
            println!(
                "Added {} to '{}' ({} of {})",
                amount.format_with_symbol(symbol),
                goal.name,
                goal.current_amount.format_with_symbol(symbol),
                goal.target_amount.format_with_symbol(symbol),
            );
            if goal.is_reached() {
                println!("Goal reached! 🎉");
            }
        }

        SavingsCommands::Withdraw {
            goal,
            amount,
            wallet,
            date,
        } => {
            let goal = service.require(&goal)?;
            let amount = super::parse_money(&amount)?;
            let date = super::parse_date_or_today(date.as_deref())?;
            let wallet_id = resolve_wallet(&wallets, wallet, goal.wallet_id, &goal.name)?;

            let goal = service.withdraw(goal.id, wallet_id, amount, date)?;
            println!(
                "Withdrew {} from '{}' ({} remaining in goal)",
                amount.format_with_symbol(symbol),
                goal.name,
                goal.current_amount.format_with_symbol(symbol),
            );
        }

        SavingsCommands::Close { goal } => {
            let goal = service.require(&goal)?;
            let goal = service.close(goal.id)?;
            println!("Closed goal '{}'", goal.name);
        }
    }

    Ok(())
}

/// Pick the wallet argument, the goal's default, or fail
fn resolve_wallet(
    wallets: &WalletService,
    argument: Option<String>,
    goal_default: Option<crate::models::WalletId>,
    goal_name: &str,
) -> FintrackResult<crate::models::WalletId> {
    match argument {
        Some(name) => Ok(wallets.require_active(&name)?.id),
        None => goal_default.ok_or_else(|| {
            crate::error::FintrackError::Validation(format!(
                "Goal '{}' has no default wallet; pass one with --wallet",
                goal_name
            ))
        }),
    }
}
