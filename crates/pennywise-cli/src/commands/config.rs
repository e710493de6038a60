//! Configuration command implementations

use std::path::Path;

use anyhow::{Context, Result};

use pennywise_core::config::default_config_path;

use super::{load_config, print_json};

pub fn cmd_config_show(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    if json {
        return print_json(&config);
    }

    let toml = config
        .to_toml_string()
        .context("Failed to render config as TOML")?;
    print!("{}", toml);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    let Some(path) = default_config_path() else {
        println!("No per-user data directory on this platform; using built-in defaults");
        return Ok(());
    };

    println!("{}", path.display());
    if path.exists() {
        println!("   ✅ Override file present");
    } else {
        println!("   Not present, built-in defaults are used");
        println!("   Create it with: pennywise config show > {}", path.display());
    }
    Ok(())
}
