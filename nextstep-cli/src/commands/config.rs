//! Config command - show and change settings.json

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use nextstep_core::config::{Config, SETTABLE_KEYS};

use super::get_nextstep_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings (API key masked)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        /// Setting name
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(SETTABLE_KEYS))]
        key: String,
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let nextstep_dir = get_nextstep_dir()?;
    std::fs::create_dir_all(&nextstep_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&nextstep_dir)?;
            if json {
                return output::print_json(&config.to_display_json());
            }

            println!("{}", "Settings".bold());
            let mut table = output::create_table();
            table.add_row(vec![
                "gemini.apiKey".to_string(),
                config
                    .masked_api_key()
                    .unwrap_or_else(|| "not set".dimmed().to_string()),
            ]);
            table.add_row(vec!["gemini.model".to_string(), config.gemini_model.clone()]);
            table.add_row(vec!["backend".to_string(), config.backend.to_string()]);
            table.add_row(vec!["apiUrl".to_string(), config.api_url.clone()]);
            println!("{}", table);
            println!("File: {}", nextstep_dir.join("settings.json").display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(&nextstep_dir)?;
            config.set(&key, &value)?;
            config.save(&nextstep_dir)?;

            let shown = if key == "gemini.apiKey" {
                config.masked_api_key().unwrap_or_default()
            } else {
                value.trim().to_string()
            };
            output::success(&format!("Set {} = {}", key, shown));
        }
    }

    Ok(())
}
