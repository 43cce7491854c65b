//! Interview command - interactive mock interview with scored feedback
//!
//! Nothing is saved: the conversation lives for the length of the command.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use nextstep_core::LogEvent;

use super::{get_context, get_logger, log_event, value_or_prompt};
use crate::output;

/// Typed instead of an answer to end the interview and get feedback
const END_COMMAND: &str = "/end";

pub fn run(role: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let mut interview = ctx.interview();
    let role = value_or_prompt(role, "Role to practice for")?;

    let pb = output::spinner("Preparing your interviewer...", false);
    let opening = interview.start(&role);
    pb.finish_and_clear();
    let mut question = opening?;
    log_event(&get_logger(), LogEvent::new("interview_started").with_feature("interview"));

    println!(
        "{}",
        format!("Mock interview for {}. Type {} to finish and get feedback.", interview.role(), END_COMMAND).dimmed()
    );

    loop {
        println!();
        println!("{} {}", "Interviewer:".cyan().bold(), question);

        let answer: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;
        let answer = answer.trim();

        if answer.eq_ignore_ascii_case(END_COMMAND) {
            break;
        }
        if answer.is_empty() {
            continue;
        }

        let pb = output::spinner("Thinking...", false);
        let next = interview.reply(answer);
        pb.finish_and_clear();
        match next {
            Ok(q) => question = q,
            Err(e) => {
                output::error(&format!("{}. Type {} to get feedback on what you have so far.", e, END_COMMAND));
            }
        }
    }

    let pb = output::spinner("Scoring your interview...", json);
    let result = interview.finish();
    pb.finish_and_clear();
    let feedback = match result {
        Ok(f) => f,
        Err(e) => {
            log_event(
                &get_logger(),
                LogEvent::new("interview_feedback_failed")
                    .with_feature("interview")
                    .with_error(e.to_string()),
            );
            return Err(e.into());
        }
    };
    log_event(&get_logger(), LogEvent::new("interview_finished").with_feature("interview"));

    if json {
        return output::print_json(&feedback);
    }

    println!();
    println!("{}", "Interview feedback".bold());
    println!("  Technical:     {}/10", feedback.technical_score);
    println!("  Communication: {}/10", feedback.communication_score);
    println!();
    println!("{}", "Strengths".green().bold());
    println!("{}", feedback.strengths);
    println!();
    println!("{}", "To improve".yellow().bold());
    println!("{}", feedback.improvements);

    Ok(())
}
