//! Extract and ipn commands - work on a single narrative or number.

use clap::Args;
use console::style;

use stmx_core::extract::rules::validate_ipn;
use stmx_core::models::config::VpMode;
use stmx_core::{IdentifierExtractor, NarrativeExtractor};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Payment narrative text
    #[arg(required = true)]
    text: String,

    /// Use the legacy VP rules
    #[arg(long)]
    legacy_vp: bool,
}

/// Arguments for the ipn command.
#[derive(Args)]
pub struct IpnArgs {
    /// Ten-digit taxpayer number
    #[arg(required = true)]
    number: String,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.legacy_vp {
        config.extraction.vp_mode = VpMode::Legacy;
    }

    let extractor = IdentifierExtractor::from_config(&config.extraction);
    let result = extractor.extract(&args.text);

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

pub fn run_ipn(args: IpnArgs) -> anyhow::Result<()> {
    let number = args.number.trim();

    if validate_ipn(number) {
        println!("{} {} is a valid IPN", style("✓").green(), number);
        Ok(())
    } else {
        anyhow::bail!("{} is not a valid IPN (checksum mismatch or wrong length)", number)
    }
}
