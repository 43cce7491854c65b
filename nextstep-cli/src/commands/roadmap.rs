//! Roadmap command - generate a learning plan and track progress

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use nextstep_core::domain::roadmap::resource_badge;
use nextstep_core::domain::{RoadmapRequest, SkillLevel};
use nextstep_core::{LogEvent, Roadmap};

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum RoadmapCommands {
    /// Generate a new roadmap, replacing the current one
    Generate {
        /// Career goal, e.g. "Become a data engineer"
        goal: Vec<String>,
        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        level: String,
        /// Weekly time commitment
        #[arg(long, default_value = "5-10 hours")]
        time: String,
        /// Preferred learning styles (comma separated)
        #[arg(long, value_delimiter = ',')]
        prefer: Vec<String>,
        /// Skip confirmation when a roadmap already exists
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current roadmap
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark step N done (or not done again)
    Toggle { number: usize },
    /// Remove the roadmap
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn print_roadmap(roadmap: &Roadmap) {
    println!(
        "{} {}",
        "Progress".bold(),
        output::progress_bar(roadmap.progress())
    );

    let skills = &roadmap.skill_analysis;
    if !skills.gap_skills.is_empty() {
        println!("{} {}", "Skills to build:".bold(), skills.gap_skills.join(", ").yellow());
    }
    if !skills.current_skills.is_empty() {
        println!("{} {}", "You already have:".bold(), skills.current_skills.join(", ").green());
    }

    for (i, step) in roadmap.steps.iter().enumerate() {
        println!();
        let marker = if step.completed { "[x]".green() } else { "[ ]".normal() };
        println!("{} {}. {} ({})", marker, i + 1, step.title.bold(), step.duration);
        if !step.description.is_empty() {
            println!("    {}", step.description);
        }
        if !step.topics.is_empty() {
            println!("    Topics: {}", step.topics.join(", "));
        }
        if !step.prerequisites.is_empty() {
            println!("    Requires: {}", step.prerequisites.join(", "));
        }
        if !step.project_idea.is_empty() {
            println!("    Project: {}", step.project_idea);
        }
        for resource in &step.resources {
            println!(
                "    {} {} {}",
                format!("[{}]", resource_badge(&resource.kind)).cyan(),
                resource.title,
                resource.url.dimmed()
            );
        }
    }
}

pub fn run(command: RoadmapCommands) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.roadmap_service;

    match command {
        RoadmapCommands::Generate {
            goal,
            level,
            time,
            prefer,
            force,
            json,
        } => {
            let skill_level: SkillLevel = level.parse().map_err(|e: String| anyhow!(e))?;

            if !force
                && !json
                && service.current()?.is_some()
                && !Confirm::new()
                    .with_prompt("This replaces your current roadmap and its progress. Continue?")
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let request = RoadmapRequest {
                goal: goal.join(" "),
                skill_level,
                time_availability: time,
                learning_preferences: prefer,
            };

            let pb = output::spinner("Building your roadmap...", json);
            let result = service.generate(&request);
            pb.finish_and_clear();
            let roadmap = match result {
                Ok(r) => r,
                Err(e) => {
                    log_event(
                        &get_logger(),
                        LogEvent::new("roadmap_failed")
                            .with_feature("roadmap")
                            .with_error(e.to_string()),
                    );
                    return Err(e.into());
                }
            };
            log_event(&get_logger(), LogEvent::new("roadmap_generated").with_feature("roadmap"));

            if json {
                return output::print_json(&roadmap);
            }
            print_roadmap(&roadmap);
        }
        RoadmapCommands::Show { json } => match service.current()? {
            Some(roadmap) if json => return output::print_json(&roadmap),
            Some(roadmap) => print_roadmap(&roadmap),
            None if json => return output::print_json(&serde_json::Value::Null),
            None => println!("No roadmap yet. Create one with 'nextstep roadmap generate <goal>'."),
        },
        RoadmapCommands::Toggle { number } => {
            if number == 0 {
                bail!("Steps are numbered from 1");
            }
            let (completed, progress) = service.toggle_step(number - 1)?;
            let state = if completed { "done" } else { "not done" };
            output::success(&format!(
                "Step {} marked {}. {}",
                number,
                state,
                output::progress_bar(progress)
            ));
        }
        RoadmapCommands::Clear { force } => {
            if !force
                && !Confirm::new()
                    .with_prompt("Remove your roadmap and its progress?")
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            service.clear()?;
            output::success("Roadmap removed");
        }
    }

    Ok(())
}
