//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod accounts;
mod analyzer;
mod coach;
mod cover_letter;
mod doctor;
mod interview;
mod jobs;
pub mod logging;
pub mod migration;
mod profile;
mod resume;
mod roadmap;
mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use accounts::{LocalAccountStore, UsersTable, MIN_PASSWORD_LEN};
pub use analyzer::{normalize_text, AnalyzerService};
pub use coach::{CoachReply, CoachService, CONNECTION_TROUBLE};
pub use cover_letter::{CoverLetterRequest, CoverLetterService, DEFAULT_TONE};
pub use doctor::{CheckResult, DoctorResult, DoctorService, DoctorSummary};
pub use interview::MockInterview;
pub use jobs::{JobSearchService, SaveOutcome};
pub use logging::{EntryPoint, EventCount, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use profile::ProfileService;
pub use resume::{HistoryStatus, ResumeService};
pub use roadmap::RoadmapService;
pub use status::{RoadmapSummary, StatusService, StatusSummary, UserSummary};
