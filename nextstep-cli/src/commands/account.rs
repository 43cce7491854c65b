//! Account commands - register, login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use nextstep_core::LogEvent;

use super::{get_context, get_logger, log_event, password_or_prompt, value_or_prompt};
use crate::output;

pub fn register(name: Option<String>, email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let name = value_or_prompt(name, "Full name")?;
    let email = value_or_prompt(email, "Email")?;
    let password = password_or_prompt(password, true)?;

    let profile = ctx.accounts.register(&name, &email, &password)?;
    log_event(&get_logger(), LogEvent::new("account_registered").with_command("register"));

    if json {
        return output::print_json(&serde_json::json!({
            "name": profile.name,
            "email": profile.email,
        }));
    }
    output::success(&format!("Welcome to NextStep, {}!", profile.name));
    Ok(())
}

pub fn login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let email = value_or_prompt(email, "Email")?;
    let password = password_or_prompt(password, false)?;

    let profile = ctx.accounts.login(&email, &password)?;

    if json {
        return output::print_json(&serde_json::json!({
            "name": profile.name,
            "email": profile.email,
        }));
    }
    output::success(&format!("Logged in as {} <{}>", profile.name, profile.email));
    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.accounts.logout()?;
    output::info("Logged out.");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.profile_service.current()?;

    if json {
        let value = user.map(|p| {
            serde_json::json!({
                "name": p.name,
                "email": p.email,
                "role": p.role,
                "skills": p.skills,
                "createdAt": p.created_at,
            })
        });
        return output::print_json(&value);
    }

    match user {
        Some(profile) => {
            println!("{} <{}>", profile.name.bold(), profile.email);
            println!("  Role: {}", profile.role);
            if !profile.skills.is_empty() {
                println!("  Skills: {}", profile.skills.join(", "));
            }
            println!("  Member since: {}", output::format_date(profile.created_at));
        }
        None => output::warning("Not logged in. Run 'nextstep login' or 'nextstep register'."),
    }
    Ok(())
}

pub fn delete_account(force: bool) -> Result<()> {
    let ctx = get_context()?;
    let profile = ctx.profile_service.require_current()?;

    if !force
        && !Confirm::new()
            .with_prompt(format!(
                "Permanently delete the account for {}? This cannot be undone",
                profile.email
            ))
            .default(false)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.accounts.delete_account()?;
    ctx.resume_service.discard_draft()?;
    log_event(&get_logger(), LogEvent::new("account_deleted").with_command("delete-account"));
    output::success("Account deleted.");
    Ok(())
}
