//! Letter command - generate and keep cover letters

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use nextstep_core::services::{CoverLetterRequest, DEFAULT_TONE};
use nextstep_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum LetterCommands {
    /// Write a cover letter for a job
    Generate {
        /// Job title
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        company: String,
        /// Job description text
        #[arg(long, default_value = "")]
        description: String,
        /// Read the job description from a file
        #[arg(long, conflicts_with = "description")]
        description_file: Option<std::path::PathBuf>,
        /// Professional, Enthusiastic, Confident, Creative or Personable
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
        /// Keep the letter on your profile
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available tones
    Tones,
    /// List saved letters
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a saved letter
    Show {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved letter
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: LetterCommands) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.cover_letter_service;

    match command {
        LetterCommands::Generate {
            title,
            company,
            description,
            description_file,
            tone,
            save,
            json,
        } => {
            let job_description = match description_file {
                Some(path) => std::fs::read_to_string(path)?,
                None => description,
            };
            let request = CoverLetterRequest {
                tone,
                job_title: title,
                company,
                job_description,
            };

            let pb = output::spinner("Writing your cover letter...", json);
            let result = service.generate(&request);
            pb.finish_and_clear();
            let letter = match result {
                Ok(l) => l,
                Err(e) => {
                    log_event(
                        &get_logger(),
                        LogEvent::new("cover_letter_failed")
                            .with_feature("cover_letter")
                            .with_error(e.to_string()),
                    );
                    return Err(e.into());
                }
            };
            log_event(&get_logger(), LogEvent::new("cover_letter_generated").with_feature("cover_letter"));

            let saved = if save {
                Some(service.save(&request.job_title, &request.company, &letter)?)
            } else {
                None
            };

            if json {
                return output::print_json(&serde_json::json!({
                    "letter": letter,
                    "saved": saved,
                }));
            }

            println!("{}", letter);
            if let Some(saved) = saved {
                println!();
                output::success(&format!("Saved ({})", saved.id));
            }
        }
        LetterCommands::Tones => {
            for (name, description) in service.tones() {
                println!("  {:<14} {}", name.bold(), description);
            }
        }
        LetterCommands::List { json } => {
            let letters = service.list()?;
            if json {
                return output::print_json(&letters);
            }
            if letters.is_empty() {
                println!("No saved cover letters.");
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["ID", "Job", "Company", "Created", "Preview"]);
            for letter in letters {
                table.add_row(vec![
                    letter.id.clone(),
                    letter.job_title.clone(),
                    letter.company.clone(),
                    output::format_date(letter.created_at),
                    output::truncate(&letter.letter, 40),
                ]);
            }
            println!("{}", table);
        }
        LetterCommands::Show { id, json } => {
            let letter = service.get(&id)?;
            if json {
                return output::print_json(&letter);
            }
            let heading = if letter.company.is_empty() {
                letter.job_title.clone()
            } else {
                format!("{} at {}", letter.job_title, letter.company)
            };
            println!("{}", heading.bold());
            println!("{}", output::format_timestamp(letter.created_at).dimmed());
            println!();
            println!("{}", letter.letter);
        }
        LetterCommands::Delete { id, force } => {
            let letter = service.get(&id)?;
            if !force
                && !Confirm::new()
                    .with_prompt(format!("Delete the letter for {}?", letter.job_title))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            service.delete(&id)?;
            output::success("Letter deleted");
        }
    }

    Ok(())
}
