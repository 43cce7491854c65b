//! Jobs command - web-grounded job search and bookmarks

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use nextstep_core::domain::jobs::{EXPERIENCE_LEVELS, LOCATION_TYPES};
use nextstep_core::domain::JobSearchFilters;
use nextstep_core::services::SaveOutcome;
use nextstep_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum JobsCommands {
    /// Search listings, refined by the stored filters
    Search {
        /// Job title or keywords
        query: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the last search results again
    Results {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved jobs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save result number N of the last search
    Save { number: usize },
    /// Remove a saved job by id
    Remove { id: String },
    /// Show or change search filters
    Filters {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        salary: Option<String>,
        /// Internship, Entry Level, Mid Level, Senior Level, Lead/Manager
        #[arg(long)]
        experience: Option<String>,
        /// Remote, On-site, Hybrid
        #[arg(long)]
        location: Option<String>,
        /// Reset all filters
        #[arg(long, conflicts_with_all = ["company", "salary", "experience", "location"])]
        clear: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_filters(filters: &JobSearchFilters) {
    if filters.is_empty() {
        println!("No filters set.");
        return;
    }
    let rows = [
        ("Company", &filters.company),
        ("Salary", &filters.salary),
        ("Experience", &filters.experience),
        ("Location", &filters.location_type),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("  {}: {}", label, value);
        }
    }
}

pub fn run(command: JobsCommands) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.job_search_service;

    match command {
        JobsCommands::Search { query, json } => {
            let query = query.join(" ");
            let pb = output::spinner("Searching the web for listings...", json);
            let result = service.search(&query);
            pb.finish_and_clear();
            let result = match result {
                Ok(r) => r,
                Err(e) => {
                    log_event(
                        &get_logger(),
                        LogEvent::new("job_search_failed")
                            .with_feature("jobs")
                            .with_error(e.to_string()),
                    );
                    return Err(e.into());
                }
            };
            log_event(&get_logger(), LogEvent::new("job_search").with_feature("jobs"));

            if json {
                return output::print_json(&result);
            }
            print_results(&result);
        }
        JobsCommands::Results { json } => match service.last_results()? {
            Some(result) if json => return output::print_json(&result),
            Some(result) => print_results(&result),
            None => output::warning("No search yet. Run 'nextstep jobs search <query>'."),
        },
        JobsCommands::List { json } => {
            let jobs = service.saved_jobs()?;
            if json {
                return output::print_json(&jobs);
            }
            if jobs.is_empty() {
                println!("No saved jobs.");
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["ID", "Title", "Link", "Saved"]);
            for job in jobs {
                table.add_row(vec![
                    job.id,
                    output::truncate(&job.title, 50),
                    job.uri,
                    output::format_date(job.saved_at),
                ]);
            }
            println!("{}", table);
        }
        JobsCommands::Save { number } => {
            if number == 0 {
                bail!("Results are numbered from 1");
            }
            match service.save_result(number - 1)? {
                SaveOutcome::Saved(job) => {
                    log_event(&get_logger(), LogEvent::new("job_saved").with_feature("jobs"));
                    output::success(&format!("Saved \"{}\" ({})", job.title, job.id));
                }
                SaveOutcome::AlreadySaved(job) => {
                    output::warning(&format!("\"{}\" is already saved ({})", job.title, job.id));
                }
            }
        }
        JobsCommands::Remove { id } => {
            let job = service.remove_saved(&id)?;
            output::success(&format!("Removed \"{}\"", job.title));
        }
        JobsCommands::Filters {
            company,
            salary,
            experience,
            location,
            clear,
            json,
        } => {
            if clear {
                service.clear_filters()?;
                output::success("Filters cleared");
                return Ok(());
            }

            let changing = company.is_some() || salary.is_some() || experience.is_some() || location.is_some();
            if changing {
                let mut filters = service.filters()?;
                if let Some(v) = company {
                    filters.company = v;
                }
                if let Some(v) = salary {
                    filters.salary = v;
                }
                if let Some(v) = experience {
                    filters.experience = v;
                }
                if let Some(v) = location {
                    filters.location_type = v;
                }
                if let Err(e) = service.set_filters(&filters) {
                    output::error(&format!(
                        "Experience: {}. Location: {}.",
                        EXPERIENCE_LEVELS.join(", "),
                        LOCATION_TYPES.join(", ")
                    ));
                    return Err(e.into());
                }
            }

            let filters = service.filters()?;
            if json {
                return output::print_json(&filters);
            }
            println!("{}", "Search filters".bold());
            print_filters(&filters);
        }
    }

    Ok(())
}

fn print_results(result: &nextstep_core::domain::JobSearchResult) {
    println!("{} {}", "Query:".dimmed(), result.query);
    println!();
    println!("{}", result.text.trim());

    if result.sources.is_empty() {
        println!();
        output::warning("No listing links were returned for this search.");
        return;
    }

    println!();
    println!("{}", "Sources".bold());
    for (i, source) in result.sources.iter().enumerate() {
        let title = if source.title.is_empty() { &source.uri } else { &source.title };
        println!("  {}. {}", i + 1, title);
        println!("     {}", source.uri.dimmed());
    }
    println!();
    println!("Save one with 'nextstep jobs save <number>'.");
}
