//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Insight commands (insights, stats, budget, forecast, alerts, health)
//! - `config` - Threshold configuration commands (show, path)
//! - `core` - Shared utilities (config/ledger loading, engine run, JSON output)
//! - `serve` - Web server command

pub mod analysis;
pub mod config;
pub mod core;
pub mod serve;

// Re-export command functions for main.rs
pub use analysis::*;
pub use config::*;
pub use core::*;
pub use serve::*;
