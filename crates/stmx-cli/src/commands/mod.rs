//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod process;

use std::path::Path;

use stmx_core::StmxConfig;

/// Load the configuration named by `--config`, else the user config file if it
/// exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StmxConfig> {
    if let Some(path) = config_path {
        return Ok(StmxConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        tracing::debug!("Using config file {}", default_path.display());
        Ok(StmxConfig::from_file(&default_path)?)
    } else {
        Ok(StmxConfig::default())
    }
}
