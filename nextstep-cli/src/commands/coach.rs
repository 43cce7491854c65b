//! Coach command - chat with the career coach

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use nextstep_core::domain::ChatRole;
use nextstep_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum CoachCommands {
    /// Send a message, starting a new session unless --session is given
    Send {
        /// Message text
        message: Vec<String>,
        /// Continue an existing session
        #[arg(long, short)]
        session: Option<String>,
        /// Output as JSON (no streaming)
        #[arg(long)]
        json: bool,
    },
    /// List sessions, newest first
    Sessions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a whole session
    Show {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a session
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
    /// Conversation starters
    Prompts,
}

pub fn run(command: CoachCommands) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.coach_service;

    match command {
        CoachCommands::Send { message, session, json } => {
            let message = message.join(" ");
            let mut stdout = std::io::stdout();

            if !json {
                println!("{}", "Coach:".cyan().bold());
            }
            let reply = service.send(session.as_deref(), &message, |chunk| {
                if !json {
                    print!("{}", chunk);
                    let _ = stdout.flush();
                }
            })?;

            let logger = get_logger();
            if reply.failed {
                log_event(
                    &logger,
                    LogEvent::new("coach_reply_failed")
                        .with_feature("coach")
                        .with_error("chat stream failed"),
                );
            } else {
                log_event(&logger, LogEvent::new("coach_message").with_feature("coach"));
            }

            if json {
                return output::print_json(&serde_json::json!({
                    "sessionId": reply.session.id,
                    "title": reply.session.title,
                    "reply": reply.reply,
                    "failed": reply.failed,
                }));
            }

            if reply.failed {
                println!("{}", reply.reply.yellow());
            } else {
                println!();
            }
            println!();
            println!(
                "{}",
                format!(
                    "Session \"{}\" ({}). Continue with: nextstep coach send --session {} <message>",
                    reply.session.title, reply.session.id, reply.session.id
                )
                .dimmed()
            );
        }
        CoachCommands::Sessions { json } => {
            let sessions = service.sessions()?;
            if json {
                return output::print_json(&sessions);
            }
            if sessions.is_empty() {
                println!("No coach sessions yet. Start one with 'nextstep coach send <message>'.");
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["ID", "Title", "Messages", "Last message", "Started"]);
            for session in sessions {
                let last = session
                    .last_message()
                    .map(|m| output::truncate(&m.text, 40))
                    .unwrap_or_default();
                table.add_row(vec![
                    session.id.clone(),
                    session.title.clone(),
                    session.messages.len().to_string(),
                    last,
                    output::format_timestamp(session.created_at),
                ]);
            }
            println!("{}", table);
        }
        CoachCommands::Show { id, json } => {
            let session = service.session(&id)?;
            if json {
                return output::print_json(&session);
            }
            println!("{}", session.title.bold());
            println!();
            for message in &session.messages {
                match message.role {
                    ChatRole::User => println!("{}", "You:".green().bold()),
                    ChatRole::Model => println!("{}", "Coach:".cyan().bold()),
                }
                println!("{}", message.text);
                println!();
            }
        }
        CoachCommands::Delete { id, force } => {
            let session = service.session(&id)?;
            if !force
                && !Confirm::new()
                    .with_prompt(format!("Delete session \"{}\"?", session.title))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            service.delete_session(&id)?;
            output::success(&format!("Deleted session \"{}\"", session.title));
        }
        CoachCommands::Prompts => {
            println!("{}", "Try asking:".bold());
            for prompt in service.suggested_prompts() {
                println!("  - {}", prompt);
            }
        }
    }

    Ok(())
}
