//! Status command - show the active profile at a glance

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        return output::print_json(&status);
    }

    println!("{}", "NextStep Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Backend", status.backend.as_str()]);
    let model = if status.llm_configured {
        status.model.clone()
    } else {
        format!("{} (no API key)", status.model)
    };
    table.add_row(vec!["Model".to_string(), model]);

    let user = match &status.user {
        Some(user) => user,
        None => {
            println!("{}", table);
            println!();
            output::warning("Not logged in. Run 'nextstep login' or 'nextstep register'.");
            return Ok(());
        }
    };

    table.add_row(vec!["User".to_string(), format!("{} <{}>", user.name, user.email)]);
    table.add_row(vec!["Role".to_string(), user.role.clone()]);
    table.add_row(vec![
        "Member since".to_string(),
        output::format_date(user.member_since),
    ]);
    table.add_row(vec![
        "Resume".to_string(),
        output::progress_bar(status.resume_completeness),
    ]);
    table.add_row(vec!["Saved jobs".to_string(), status.saved_jobs.to_string()]);
    table.add_row(vec!["Cover letters".to_string(), status.cover_letters.to_string()]);
    table.add_row(vec!["Coach sessions".to_string(), status.chat_sessions.to_string()]);
    let roadmap = match &status.roadmap {
        Some(r) => format!(
            "{} ({}/{} steps)",
            output::progress_bar(r.progress),
            r.completed_steps,
            r.total_steps
        ),
        None => "none".to_string(),
    };
    table.add_row(vec!["Roadmap".to_string(), roadmap]);

    println!("{}", table);

    if !status.missing_resume_fields.is_empty() {
        println!();
        println!(
            "Missing resume sections: {}",
            status.missing_resume_fields.join(", ").yellow()
        );
    }

    Ok(())
}
