//! Configuration commands.

use clap::Subcommand;
use console::style;

use bubble_core::config::AppConfig;
use bubble_core::error::BubbleResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (API key redacted).
    Show,
    /// Print the default config file path.
    Path,
    /// Write the current effective configuration to the default path.
    Init,
}

pub fn run(config: &AppConfig, action: ConfigAction, format: OutputFormat) -> BubbleResult<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "domain": config.api.domain,
                    "environment": if config.api.is_dev { "version-test" } else { "live" },
                    "timeout_ms": config.api.timeout_ms,
                    "api_key_set": !config.api.api_key.is_empty(),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Text => {
                let domain = if config.api.domain.is_empty() {
                    style("not set").red().to_string()
                } else {
                    config.api.domain.clone()
                };
                let key = if config.api.api_key.is_empty() {
                    style("not set").red().to_string()
                } else {
                    style("set").green().to_string()
                };
                println!("domain:      {domain}");
                println!(
                    "environment: {}",
                    if config.api.is_dev { "version-test" } else { "live" }
                );
                println!("timeout:     {} ms", config.api.timeout_ms);
                println!("api key:     {key}");
            }
        },
        ConfigAction::Path => {
            println!("{}", AppConfig::default_config_path()?.display());
        }
        ConfigAction::Init => {
            let path = AppConfig::default_config_path()?;
            config.save_to_file(&path)?;
            println!("  {} Wrote {}", style("OK").green().bold(), path.display());
        }
    }
    Ok(())
}
