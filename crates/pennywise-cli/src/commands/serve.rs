//! Server command implementation

use std::path::Path;

use anyhow::Result;

use pennywise_server::{parse_api_keys, ServerConfig, API_KEYS_ENV};

use super::load_config;

pub async fn cmd_serve(
    host: &str,
    port: u16,
    no_auth: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let insights = load_config(config_path)?;

    println!("🚀 Starting Pennywise web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(path) = config_path {
        println!("   Config: {}", path.display());
    }

    // Parse API keys from environment (comma-separated)
    let api_keys = parse_api_keys(&std::env::var(API_KEYS_ENV).unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!("   🔒 Authentication: required, but no keys set in {}", API_KEYS_ENV);
        println!("      All /api requests except /api/health will be rejected");
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            api_keys.len(),
            API_KEYS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    pennywise_server::serve_with_config(host, port, config, insights).await
}
