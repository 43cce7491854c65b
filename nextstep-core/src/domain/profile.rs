//! User profile domain model

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::ChatSession;
use super::credential::PasswordCredential;
use super::jobs::SavedJob;
use super::resume::ResumeData;
use super::roadmap::Roadmap;

/// Default role assigned at registration
pub const DEFAULT_ROLE: &str = "Job Seeker";

/// Current time as Unix milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// New string id for saved records
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// One registered user and everything they have saved
///
/// The email is the table key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<PasswordCredential>,
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume_data: ResumeData,
    #[serde(default)]
    pub saved_jobs: Vec<SavedJob>,
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
    #[serde(default)]
    pub chat_sessions: Vec<ChatSession>,
    #[serde(default)]
    pub saved_cover_letters: Vec<SavedCoverLetter>,
    pub created_at: i64,
}

impl UserProfile {
    /// Profile with empty defaults for a freshly registered account
    pub fn new(name: &str, email: &str, credential: Option<PasswordCredential>) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            credential,
            role: DEFAULT_ROLE.to_string(),
            skills: Vec::new(),
            resume_data: ResumeData::for_account(name, email),
            saved_jobs: Vec::new(),
            roadmap: None,
            chat_sessions: Vec::new(),
            saved_cover_letters: Vec::new(),
            created_at: now_ms(),
        }
    }
}

/// A generated cover letter the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCoverLetter {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub created_at: i64,
    pub letter: String,
}

impl SavedCoverLetter {
    pub fn new(job_title: &str, company: &str, letter: &str) -> Self {
        Self {
            id: new_id(),
            job_title: job_title.to_string(),
            company: company.to_string(),
            created_at: now_ms(),
            letter: letter.to_string(),
        }
    }
}
