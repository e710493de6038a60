//! Pennywise CLI - Spending insights from expense records
//!
//! Usage:
//!   pennywise insights --expenses expenses.csv --income 3000
//!   pennywise health --ledger ledger.json --json
//!   pennywise config show
//!   pennywise serve --port 3000

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::GlobalOpts;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let opts = GlobalOpts {
        config: cli.config.as_deref(),
        tz: &cli.tz,
        json: cli.json,
    };

    match &cli.command {
        Commands::Insights { input } => commands::cmd_insights(input, &opts),
        Commands::Stats { input } => commands::cmd_stats(input, &opts),
        Commands::Budget { input } => commands::cmd_budget(input, &opts),
        Commands::Forecast { input } => commands::cmd_forecast(input, &opts),
        Commands::Alerts { input } => commands::cmd_alerts(input, &opts),
        Commands::Health { input } => commands::cmd_health(input, &opts),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::cmd_config_show(opts.config, opts.json),
            ConfigAction::Path => commands::cmd_config_path(),
        },
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(host, *port, *no_auth, opts.config).await,
    }
}
