//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pennywise - Understand where your money goes
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Spending insights from your expense records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Threshold config file (defaults to the per-user override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timezone used to group expenses into days (IANA name)
    #[arg(long, default_value = "UTC", global = true)]
    pub tz: String,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the records come from and how to analyze them
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Ledger JSON file with expenses, incomes and monthly_income
    #[arg(short, long, conflicts_with = "expenses", required_unless_present = "expenses")]
    pub ledger: Option<PathBuf>,

    /// Expense CSV (id,description,amount,category,date)
    #[arg(short, long)]
    pub expenses: Option<PathBuf>,

    /// Income CSV (id,description,amount,category,date,recurring,frequency)
    #[arg(long, requires = "expenses")]
    pub incomes: Option<PathBuf>,

    /// Monthly income; overrides the ledger's value
    #[arg(short, long)]
    pub income: Option<f64>,

    /// Analysis date (YYYY-MM-DD), defaults to today in --tz
    #[arg(long)]
    pub today: Option<String>,

    /// Seed for the general tip, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full insight report
    Insights {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Spending totals, category breakdown and income ratios
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Recommended category budget vs. current spend
    Budget {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Monthly projection and spending trend
    Forecast {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Spending alerts
    Alerts {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Financial health score and recommendations
    Health {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Inspect threshold configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, requests need an API key from PENNYWISE_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the override file location
    Path,
}
