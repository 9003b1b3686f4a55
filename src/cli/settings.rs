//! Settings CLI commands

use clap::Subcommand;

use crate::config::paths::FintrackPaths;
use crate::config::{Settings, Theme};
use crate::error::{FintrackError, FintrackResult};

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current configuration and paths
    Show,
    /// Change a setting
    Set {
        /// Setting key (currency, date-format, theme, accent, first-day)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &FintrackPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> FintrackResult<()> {
    match cmd {
        SettingsCommands::Show => {
            println!("fintrack configuration");
            println!("======================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  currency:    {}", settings.currency_symbol);
            println!("  date-format: {}", settings.date_format);
            println!("  theme:       {}", settings.theme);
            println!("  accent:      {}", settings.accent);
            println!("  first-day:   {}", settings.first_day_of_week);
            println!(
                "  backups:     keep {} daily / {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }

        SettingsCommands::Set { key, value } => {
            match key.as_str() {
                "currency" => {
                    settings.currency_symbol = value.clone();
                }
                "date-format" => {
                    settings.date_format = value.clone();
                }
                "theme" => {
                    settings.theme = Theme::parse(&value).ok_or_else(|| {
                        FintrackError::Validation(format!(
                            "Invalid theme: '{}'. Valid themes: system, dark, light",
                            value
                        ))
                    })?;
                }
                "accent" => {
                    settings.accent = value.clone();
                }
                "first-day" => {
                    let day: u8 = value.parse().map_err(|_| {
                        FintrackError::Validation(
                            "first-day must be 0 (Sunday) or 1 (Monday)".into(),
                        )
                    })?;
                    if day > 1 {
                        return Err(FintrackError::Validation(
                            "first-day must be 0 (Sunday) or 1 (Monday)".into(),
                        ));
                    }
                    settings.first_day_of_week = day;
                }
                _ => {
                    return Err(FintrackError::Validation(format!(
                        "Unknown setting '{}'. Valid keys: currency, date-format, theme, accent, first-day",
                        key
                    )));
                }
            }

            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
