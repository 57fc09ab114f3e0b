//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use stmx_core::{ExtractionPipeline, StmxConfig};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.vp_mode")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Check that footer patterns compile
    Validate,

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Validate => validate_config(&path),
        ConfigCommand::Path => show_path(&path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stmx")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<StmxConfig> {
    if path.exists() {
        Ok(StmxConfig::from_file(path)?)
    } else {
        Ok(StmxConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    StmxConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup(&json, key)?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;

    // Accept JSON literals, fall back to a plain string
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let updated = with_value(&config, key, parsed.clone())?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    updated.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn validate_config(path: &Path) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    ExtractionPipeline::new(&config)?;

    println!(
        "{} Configuration is valid ({} footer patterns)",
        style("✓").green(),
        config.filter.footer_patterns.len()
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'stmx config init' to create a configuration file.");
    }

    Ok(())
}

/// Follow a dotted key path through a JSON value.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Return a copy of `config` with the dotted key replaced.
///
/// The result must still deserialize as a configuration, so unknown keys and
/// mistyped values are rejected.
fn with_value(config: &StmxConfig, key: &str, value: Value) -> anyhow::Result<StmxConfig> {
    let mut json = serde_json::to_value(config)?;

    let (parent_key, field) = match key.rsplit_once('.') {
        Some((parent, field)) => (Some(parent), field),
        None => (None, key),
    };

    let parent = match parent_key {
        Some(parent_key) => parent_key.split('.').try_fold(&mut json, |current, part| {
            current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))
        })?,
        None => &mut json,
    };

    let obj = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !obj.contains_key(field) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    obj.insert(field.to_string(), value);

    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stmx_core::models::config::VpMode;

    #[test]
    fn test_lookup() {
        let json = serde_json::to_value(StmxConfig::default()).unwrap();

        assert_eq!(*lookup(&json, "extraction.vp_mode").unwrap(), "canonical");
        assert_eq!(*lookup(&json, "export.delimiter").unwrap(), ",");
        assert!(lookup(&json, "extraction.nope").is_err());
    }

    #[test]
    fn test_with_value() {
        let config = StmxConfig::default();

        let updated = with_value(&config, "extraction.vp_mode", Value::from("legacy")).unwrap();
        assert_eq!(updated.extraction.vp_mode, VpMode::Legacy);

        let updated = with_value(&config, "parallel", Value::Bool(true)).unwrap();
        assert!(updated.parallel);
    }

    #[test]
    fn test_with_value_rejects_bad_input() {
        let config = StmxConfig::default();

        assert!(with_value(&config, "extraction.vp_mode", Value::from("fast")).is_err());
        assert!(with_value(&config, "extraction.unknown", Value::Bool(true)).is_err());
        assert!(with_value(&config, "missing.key", Value::Bool(true)).is_err());
    }

    #[test]
    fn test_init_then_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        init_config(&path, false).unwrap();
        assert!(init_config(&path, false).is_err());

        set_config(&path, "export.decimal_comma", "true").unwrap();
        let config = StmxConfig::from_file(&path).unwrap();
        assert!(config.export.decimal_comma);
    }
}
