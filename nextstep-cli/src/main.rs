//! NextStep CLI - your career advisor in the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nextstep_core::LogEvent;

mod commands;
mod output;

use commands::{account, analyze, coach, config, doctor, interview, jobs, letter, logs, resume, roadmap, status};

/// NextStep - AI career coaching, resumes and job search
#[derive(Parser)]
#[command(name = "nextstep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted; NEXTSTEP_PASSWORD also works)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Permanently delete the logged-in account
    DeleteAccount {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show profile status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build and edit your resume
    Resume {
        #[command(subcommand)]
        command: resume::ResumeCommands,
    },

    /// AI review of a resume file (.pdf, .txt, .md)
    Analyze {
        /// Resume file
        file: PathBuf,
        /// Job description to match against
        #[arg(long)]
        job: Option<String>,
        /// Read the job description from a file
        #[arg(long, conflicts_with = "job")]
        job_file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search and bookmark job listings
    Jobs {
        #[command(subcommand)]
        command: jobs::JobsCommands,
    },

    /// Chat with the career coach
    Coach {
        #[command(subcommand)]
        command: coach::CoachCommands,
    },

    /// Personalized learning roadmap
    Roadmap {
        #[command(subcommand)]
        command: roadmap::RoadmapCommands,
    },

    /// Practice a mock interview
    Interview {
        /// Role to practice for (prompted when omitted)
        role: Option<String>,
        /// Print feedback as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cover letters
    Letter {
        #[command(subcommand)]
        command: letter::LetterCommands,
    },

    /// Run local storage health checks
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

impl Commands {
    /// Name recorded in the event log
    fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::DeleteAccount { .. } => "delete-account",
            Commands::Status { .. } => "status",
            Commands::Resume { .. } => "resume",
            Commands::Analyze { .. } => "analyze",
            Commands::Jobs { .. } => "jobs",
            Commands::Coach { .. } => "coach",
            Commands::Roadmap { .. } => "roadmap",
            Commands::Interview { .. } => "interview",
            Commands::Letter { .. } => "letter",
            Commands::Doctor { .. } => "doctor",
            Commands::Logs { .. } => "logs",
            Commands::Config { .. } => "config",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let name = cli.command.name();

    // The logs command reads logs.duckdb itself, so it is not logged
    let logged = name != "logs";
    if logged {
        commands::log_event(&commands::get_logger(), LogEvent::new("command_executed").with_command(name));
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if logged {
                commands::log_event(
                    &commands::get_logger(),
                    LogEvent::new("command_failed")
                        .with_command(name)
                        .with_error(e.to_string()),
                );
            }
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { name, email, password, json } => account::register(name, email, password, json),
        Commands::Login { email, password, json } => account::login(email, password, json),
        Commands::Logout => account::logout(),
        Commands::Whoami { json } => account::whoami(json),
        Commands::DeleteAccount { force } => account::delete_account(force),
        Commands::Status { json } => status::run(json),
        Commands::Resume { command } => resume::run(command),
        Commands::Analyze { file, job, job_file, json } => analyze::run(file, job, job_file, json),
        Commands::Jobs { command } => jobs::run(command),
        Commands::Coach { command } => coach::run(command),
        Commands::Roadmap { command } => roadmap::run(command),
        Commands::Interview { role, json } => interview::run(role, json),
        Commands::Letter { command } => letter::run(command),
        Commands::Doctor { verbose, json } => doctor::run(verbose, json),
        Commands::Logs { command } => logs::run(command),
        Commands::Config { command } => config::run(command),
    }
}
