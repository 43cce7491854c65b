//! CLI command implementations

pub mod account;
pub mod analyze;
pub mod coach;
pub mod config;
pub mod doctor;
pub mod interview;
pub mod jobs;
pub mod letter;
pub mod logs;
pub mod resume;
pub mod roadmap;
pub mod status;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use dialoguer::{Input, Password};
use nextstep_core::{EntryPoint, LogEvent, LoggingService, NextStepContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let nextstep_dir = get_nextstep_dir().ok()?;
    std::fs::create_dir_all(&nextstep_dir).ok()?;
    LoggingService::new(&nextstep_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the nextstep directory from environment or default
pub fn get_nextstep_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("NEXTSTEP_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".nextstep"))
        .ok_or_else(|| anyhow!("Could not find home directory. Set NEXTSTEP_DIR instead."))
}

/// Get or create nextstep context
pub fn get_context() -> Result<NextStepContext> {
    let nextstep_dir = get_nextstep_dir()?;
    NextStepContext::new(&nextstep_dir)
        .with_context(|| format!("Failed to initialize nextstep in {}", nextstep_dir.display()))
}

/// Value from a flag, or an interactive prompt when the flag is missing
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

/// Password from a flag, NEXTSTEP_PASSWORD, or a hidden prompt
pub fn password_or_prompt(value: Option<String>, confirm: bool) -> Result<String> {
    if let Some(p) = value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var("NEXTSTEP_PASSWORD") {
        return Ok(p);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}
