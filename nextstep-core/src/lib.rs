//! NextStep Core - Business logic for the NextStep career advisor
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (UserProfile, ResumeData, Roadmap, EditHistory, etc.)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore, LanguageModel, AccountBackend)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, Gemini, REST backend)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
pub mod migrations;
pub mod log_migrations;
pub mod prompts;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbKeyValueStore;
use adapters::gemini::GeminiClient;
use adapters::rest::{RestAccountBackend, RestClient};
use config::{BackendKind, Config};
use ports::{AccountBackend, KeyValueStore, LanguageModel};
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    ChatSession, EditHistory, InterviewFeedback, ResumeAnalysis, ResumeData, Roadmap,
    SavedCoverLetter, SavedJob, UserProfile,
};
pub use domain::result::{Error, OperationResult};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for NextStep operations
///
/// This is the primary entry point for all business logic. It holds
/// the local store, the language model client, the account backend,
/// and all services.
pub struct NextStepContext {
    pub config: Config,
    pub store: Arc<DuckDbKeyValueStore>,
    pub llm: Arc<dyn LanguageModel>,
    pub accounts: Arc<dyn AccountBackend>,
    pub profile_service: ProfileService,
    pub resume_service: ResumeService,
    pub analyzer_service: AnalyzerService,
    pub job_search_service: JobSearchService,
    pub coach_service: CoachService,
    pub roadmap_service: RoadmapService,
    pub cover_letter_service: CoverLetterService,
    pub status_service: StatusService,
    pub doctor_service: DoctorService,
}

impl NextStepContext {
    /// Create a new NextStep context rooted at `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let config = Config::load(data_dir)?;

        let store = Arc::new(DuckDbKeyValueStore::open(&data_dir.join("nextstep.duckdb"))?);
        let kv: Arc<dyn KeyValueStore> = store.clone();

        let llm: Arc<dyn LanguageModel> = Arc::new(GeminiClient::new(
            config.gemini_api_key.as_deref(),
            Some(&config.gemini_model),
        )?);

        let accounts: Arc<dyn AccountBackend> = match config.backend {
            BackendKind::Local => Arc::new(LocalAccountStore::new(kv.clone())),
            BackendKind::Rest => Arc::new(RestAccountBackend::new(RestClient::new(
                &config.api_url,
                kv.clone(),
            )?)),
        };

        // Create services
        let profile_service = ProfileService::new(accounts.clone());
        let resume_service = ResumeService::new(kv.clone(), llm.clone(), profile_service.clone());
        let analyzer_service = AnalyzerService::new(llm.clone());
        let job_search_service = JobSearchService::new(kv.clone(), llm.clone(), profile_service.clone());
        let coach_service = CoachService::new(llm.clone(), profile_service.clone());
        let roadmap_service = RoadmapService::new(llm.clone(), profile_service.clone());
        let cover_letter_service = CoverLetterService::new(llm.clone(), profile_service.clone());
        let status_service = StatusService::new(profile_service.clone(), llm.clone());
        let doctor_service = DoctorService::new(kv, llm.clone());

        Ok(Self {
            config,
            store,
            llm,
            accounts,
            profile_service,
            resume_service,
            analyzer_service,
            job_search_service,
            coach_service,
            roadmap_service,
            cover_letter_service,
            status_service,
            doctor_service,
        })
    }

    /// Fresh mock interview session
    pub fn interview(&self) -> MockInterview {
        MockInterview::new(self.llm.clone())
    }
}
