//! fintrack - Command-line personal finance tracker
//!
//! This library provides the core functionality for fintrack: wallets,
//! transactions, budgets, gold investment tracking, bills, liabilities,
//! and savings goals, persisted as per-entity JSON files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (wallets, transactions, gold, bills, etc.)
//! - `storage`: JSON file storage layer with first-run seeding
//! - `services`: Ledger mutation and business logic layer
//! - `reports`: Dashboard, spending, budget, and calendar reports
//! - `display`: Terminal formatting for models and reports
//! - `backup`: Full-state archives with rolling retention
//! - `export`: JSON and CSV exports
//! - `cli`: Command handlers bridging clap and the service layer
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FintrackPaths, settings::Settings};
//! use fintrack::storage::Storage;
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
