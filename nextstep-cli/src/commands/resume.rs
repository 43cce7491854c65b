//! Resume command - edit the local draft with undo/redo and AI assists

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;
use nextstep_core::domain::resume::EDITABLE_FIELDS;
use nextstep_core::domain::{CustomSection, Education, Experience};
use nextstep_core::{LogEvent, ResumeData};

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum ResumeCommands {
    /// Show the current draft
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a field, e.g. `resume set jobTitle "Data Engineer"`
    Set {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(EDITABLE_FIELDS))]
        field: String,
        value: String,
    },
    /// Edit a field interactively, starting from its current value
    Edit {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(EDITABLE_FIELDS))]
        field: String,
    },
    /// Append a work experience entry
    AddExperience {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        start: String,
        #[arg(long, default_value = "")]
        end: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a work experience entry by its number
    RemoveExperience { number: usize },
    /// Append an education entry
    AddEducation {
        #[arg(long)]
        school: String,
        #[arg(long)]
        degree: String,
        #[arg(long, default_value = "")]
        year: String,
    },
    /// Remove an education entry by its number
    RemoveEducation { number: usize },
    /// Append a custom section
    AddSection {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Remove a custom section by its number
    RemoveSection { number: usize },
    /// Move a custom section one place up or down
    MoveSection {
        number: usize,
        #[arg(long, conflicts_with = "down")]
        up: bool,
        #[arg(long)]
        down: bool,
    },
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Show undo/redo state
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Polish the summary, or one experience description with --experience
    Polish {
        #[arg(long)]
        experience: Option<usize>,
    },
    /// Generate bullet points for an experience entry
    Points { number: usize },
    /// Generate the professional summary
    Summary,
    /// List missing required fields
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save the draft to your profile
    Save,
    /// Replace the draft with the resume saved on your profile
    Load,
    /// Throw away the draft and its history
    Discard,
}

/// 1-based number from the command line to a 0-based index
fn to_index(number: usize) -> Result<usize> {
    if number == 0 {
        bail!("Entries are numbered from 1");
    }
    Ok(number - 1)
}

fn print_resume(data: &ResumeData) {
    let title = if data.full_name.is_empty() {
        "(no name)".to_string()
    } else {
        data.full_name.clone()
    };
    println!("{}", title.bold());
    if !data.job_title.is_empty() {
        println!("{}", data.job_title.cyan());
    }

    let contact: Vec<&str> = [
        &data.email,
        &data.phone,
        &data.location,
        &data.website,
        &data.twitter,
        &data.github,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        println!("{}", contact.join(" | ").dimmed());
    }

    if !data.summary.is_empty() {
        println!();
        println!("{}", "Summary".bold());
        println!("{}", data.summary);
    }

    if !data.experience.is_empty() {
        println!();
        println!("{}", "Experience".bold());
        for (i, exp) in data.experience.iter().enumerate() {
            println!(
                "{}. {} at {} ({} - {})",
                i + 1,
                exp.role,
                exp.company,
                exp.start_date,
                exp.end_date
            );
            for line in exp.description.lines() {
                println!("   {}", line);
            }
        }
    }

    if !data.education.is_empty() {
        println!();
        println!("{}", "Education".bold());
        for (i, edu) in data.education.iter().enumerate() {
            println!("{}. {}, {} {}", i + 1, edu.degree, edu.school, edu.year);
        }
    }

    let skills = data.skill_list();
    if !skills.is_empty() {
        println!();
        println!("{}", "Skills".bold());
        println!("{}", skills.join(", "));
    }

    for (i, section) in data.custom_sections.iter().enumerate() {
        println!();
        println!("{} {}", format!("{}.", i + 1).dimmed(), section.title.bold());
        println!("{}", section.content);
    }

    println!();
    println!(
        "Completeness: {}",
        output::progress_bar(data.completeness_percent())
    );
}

pub fn run(command: ResumeCommands) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.resume_service;

    match command {
        ResumeCommands::Show { json } => {
            let draft = service.draft()?;
            if json {
                return output::print_json(&draft);
            }
            print_resume(&draft);
        }
        ResumeCommands::Set { field, value } => {
            service.set_field(&field, &value)?;
            output::success(&format!("Updated {}", field));
        }
        ResumeCommands::Edit { field } => {
            let draft = service.draft()?;
            let current = draft.field(&field).unwrap_or_default().to_string();
            let value: String = Input::new()
                .with_prompt(field.as_str())
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            service.set_field(&field, &value)?;
            output::success(&format!("Updated {}", field));
        }
        ResumeCommands::AddExperience {
            company,
            role,
            start,
            end,
            description,
        } => {
            let data = service.add_experience(Experience {
                company,
                role,
                start_date: start,
                end_date: end,
                description,
            })?;
            output::success(&format!("Added experience #{}", data.experience.len()));
        }
        ResumeCommands::RemoveExperience { number } => {
            service.remove_experience(to_index(number)?)?;
            output::success(&format!("Removed experience #{}", number));
        }
        ResumeCommands::AddEducation { school, degree, year } => {
            let data = service.add_education(Education { school, degree, year })?;
            output::success(&format!("Added education #{}", data.education.len()));
        }
        ResumeCommands::RemoveEducation { number } => {
            service.remove_education(to_index(number)?)?;
            output::success(&format!("Removed education #{}", number));
        }
        ResumeCommands::AddSection { title, content } => {
            let data = service.add_custom_section(CustomSection { title, content })?;
            output::success(&format!("Added section #{}", data.custom_sections.len()));
        }
        ResumeCommands::RemoveSection { number } => {
            service.remove_custom_section(to_index(number)?)?;
            output::success(&format!("Removed section #{}", number));
        }
        ResumeCommands::MoveSection { number, up, down } => {
            let direction = match (up, down) {
                (true, false) => -1,
                (false, true) => 1,
                _ => bail!("Pass either --up or --down"),
            };
            service.move_custom_section(to_index(number)?, direction)?;
            output::success("Section moved");
        }
        ResumeCommands::Undo => match service.undo()? {
            Some(_) => output::success("Undone"),
            None => output::warning("Nothing to undo"),
        },
        ResumeCommands::Redo => match service.redo()? {
            Some(_) => output::success("Redone"),
            None => output::warning("Nothing to redo"),
        },
        ResumeCommands::History { json } => {
            let status = service.history_status()?;
            if json {
                return output::print_json(&status);
            }
            println!("Snapshots: {}", status.entries);
            println!("Position:  {}", status.pointer + 1);
            println!(
                "Undo: {}  Redo: {}",
                if status.can_undo { "yes".green() } else { "no".dimmed() },
                if status.can_redo { "yes".green() } else { "no".dimmed() }
            );
        }
        ResumeCommands::Polish { experience } => {
            let pb = output::spinner("Polishing...", false);
            let result = match experience {
                Some(number) => service.polish_experience(to_index(number)?),
                None => service.polish_summary(),
            };
            pb.finish_and_clear();
            let data = result?;
            log_event(&get_logger(), LogEvent::new("resume_polished").with_feature("resume"));
            match experience {
                Some(number) => println!("{}", data.experience[to_index(number)?].description),
                None => println!("{}", data.summary),
            }
        }
        ResumeCommands::Points { number } => {
            let index = to_index(number)?;
            let pb = output::spinner("Writing bullet points...", false);
            let result = service.generate_experience_points(index);
            pb.finish_and_clear();
            let data = result?;
            log_event(&get_logger(), LogEvent::new("resume_points_generated").with_feature("resume"));
            println!("{}", data.experience[index].description);
        }
        ResumeCommands::Summary => {
            let pb = output::spinner("Writing summary...", false);
            let result = service.generate_summary();
            pb.finish_and_clear();
            let data = result?;
            log_event(&get_logger(), LogEvent::new("resume_summary_generated").with_feature("resume"));
            println!("{}", data.summary);
        }
        ResumeCommands::Check { json } => {
            let errors = service.draft()?.validation_errors();
            if json {
                let value: Vec<_> = errors
                    .iter()
                    .map(|(field, message)| serde_json::json!({"field": field, "message": message}))
                    .collect();
                return output::print_json(&value);
            }
            if errors.is_empty() {
                output::success("All required fields are filled in.");
            } else {
                for (field, message) in errors {
                    println!("  {} {}", format!("{}:", field).yellow(), message);
                }
            }
        }
        ResumeCommands::Save => {
            let errors = service.draft()?.validation_errors();
            if !errors.is_empty() {
                for (field, message) in &errors {
                    output::error(&format!("{}: {}", field, message));
                }
                bail!("Fix the fields above before saving");
            }
            service.save_to_profile()?;
            log_event(&get_logger(), LogEvent::new("resume_saved").with_feature("resume"));
            output::success("Resume saved to your profile");
        }
        ResumeCommands::Load => {
            service.load_from_profile()?;
            output::success("Draft replaced with your saved resume");
        }
        ResumeCommands::Discard => {
            service.discard_draft()?;
            output::info("Draft discarded");
        }
    }

    Ok(())
}
