//! Core domain entities
//!
//! All career data is defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod analysis;
pub mod chat;
mod credential;
pub mod history;
pub mod jobs;
pub mod profile;
pub mod result;
pub mod resume;
pub mod roadmap;

pub use analysis::{InterviewFeedback, ResumeAnalysis};
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use credential::{Argon2Params, PasswordCredential};
pub use history::EditHistory;
pub use jobs::{GroundingSource, JobSearchFilters, JobSearchResult, SavedJob};
pub use profile::{SavedCoverLetter, UserProfile};
pub use resume::{CustomSection, Education, Experience, ResumeData};
pub use roadmap::{Roadmap, RoadmapRequest, RoadmapStep, SkillLevel};
