use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_backup_command, handle_bill_command, handle_budget_command, handle_category_command,
    handle_debt_command, handle_doctor_command, handle_export_command, handle_gold_command,
    handle_report_command, handle_savings_command, handle_settings_command,
    handle_transaction_command, handle_transfer_command, handle_wallet_command,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Command-line personal finance tracker",
    long_about = "fintrack tracks wallets, transactions, budgets, gold holdings, \
                  bills, debts, and savings goals in plain JSON files, with \
                  reports and backups built in."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files and seed default categories
    Init,

    /// Wallet management
    #[command(subcommand)]
    Wallet(fintrack::cli::WalletCommands),

    /// Category management
    #[command(subcommand)]
    Category(fintrack::cli::CategoryCommands),

    /// Record and inspect transactions
    #[command(subcommand, alias = "txn")]
    Transaction(fintrack::cli::TransactionCommands),

    /// Move money between wallets
    Transfer {
        /// Source wallet name or ID
        from: String,
        /// Destination wallet name or ID
        to: String,
        /// Amount (e.g., "100.00")
        amount: String,
        /// Transfer date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Budget management
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Gold holdings, trades, and the spot price
    #[command(subcommand)]
    Gold(fintrack::cli::GoldCommands),

    /// Savings goals
    #[command(subcommand)]
    Savings(fintrack::cli::SavingsCommands),

    /// Bill reminders
    #[command(subcommand)]
    Bill(fintrack::cli::BillCommands),

    /// Tracked debts and payments
    #[command(subcommand)]
    Debt(fintrack::cli::DebtCommands),

    /// Reports: dashboard, spending, calendar
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Backups: create, list, restore, prune
    #[command(subcommand)]
    Backup(fintrack::cli::BackupCommands),

    /// Export data as JSON or CSV
    #[command(subcommand)]
    Export(fintrack::cli::ExportCommands),

    /// Show or change settings
    #[command(subcommand)]
    Settings(fintrack::cli::SettingsCommands),

    /// Check stored balances against the ledgers
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FintrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.data_dir().display());
            fintrack::storage::init::initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;
            storage.load_all()?;
            println!("Initialization complete!");
            println!();
            println!("Default categories and a Cash wallet have been created.");
            println!("Run 'fintrack category list' to see the categories.");
        }
        Some(Commands::Wallet(cmd)) => {
            handle_wallet_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transfer {
            from,
            to,
            amount,
            date,
            notes,
        }) => {
            handle_transfer_command(&storage, &settings, &from, &to, &amount, date.as_deref(), notes)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Gold(cmd)) => {
            handle_gold_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Savings(cmd)) => {
            handle_savings_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Bill(cmd)) => {
            handle_bill_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Debt(cmd)) => {
            handle_debt_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Doctor) => {
            handle_doctor_command(&storage)?;
        }
        None => {
            println!("fintrack - personal finance from the command line");
            println!();
            println!("Run 'fintrack init' to set up, then 'fintrack --help' for usage.");
        }
    }

    Ok(())
}
