//! Doctor service - local storage health checks

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::result::Result;
use crate::domain::{EditHistory, ResumeData, UserProfile};
use crate::ports::storage::keys;
use crate::ports::{KeyValueStore, LanguageModel};

pub struct DoctorService {
    store: Arc<dyn KeyValueStore>,
    llm: Arc<dyn LanguageModel>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn KeyValueStore>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { store, llm }
    }

    /// Run all health checks
    pub fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = HashMap::new();

        // Users table
        let raw_users = self.store.get(keys::USERS_DB)?;
        let users: Option<BTreeMap<String, UserProfile>> = match &raw_users {
            None => {
                checks.insert("users_table".to_string(), CheckResult::pass("No accounts yet"));
                Some(BTreeMap::new())
            }
            Some(raw) => match serde_json::from_str::<BTreeMap<String, UserProfile>>(raw) {
                Ok(users) => {
                    checks.insert(
                        "users_table".to_string(),
                        CheckResult::pass(format!("{} account(s) stored", users.len())),
                    );
                    Some(users)
                }
                Err(e) => {
                    checks.insert(
                        "users_table".to_string(),
                        CheckResult::error(
                            "Users table is not valid JSON",
                            Some(vec![json!({"error": e.to_string()})]),
                        ),
                    );
                    None
                }
            },
        };

        if let Some(users) = &users {
            // Active session
            let active = self.store.get(keys::ACTIVE_SESSION)?;
            let session_check = match active {
                None => CheckResult::pass("No active session"),
                Some(email) if users.contains_key(&email) => {
                    CheckResult::pass("Active session points at a stored account")
                }
                Some(email) => CheckResult::error(
                    "Active session points at a missing account",
                    Some(vec![json!({"email": email})]),
                ),
            };
            checks.insert("active_session".to_string(), session_check);

            // Record keys
            let mismatched: Vec<serde_json::Value> = users
                .iter()
                .filter(|(key, profile)| **key != profile.email)
                .map(|(key, profile)| json!({"key": key, "email": profile.email}))
                .collect();
            checks.insert(
                "record_keys".to_string(),
                if mismatched.is_empty() {
                    CheckResult::pass("Every record is stored under its own email")
                } else {
                    CheckResult::error(
                        format!("{} record(s) stored under the wrong email", mismatched.len()),
                        Some(mismatched),
                    )
                },
            );

            // Credentials
            let without_credential: Vec<serde_json::Value> = users
                .values()
                .filter(|p| p.credential.is_none())
                .map(|p| json!({"email": p.email}))
                .collect();
            checks.insert(
                "credentials".to_string(),
                if without_credential.is_empty() {
                    CheckResult::pass("Every account has a password")
                } else {
                    CheckResult::warning(
                        format!("{} account(s) cannot log in locally", without_credential.len()),
                        Some(without_credential),
                    )
                },
            );
        }

        // Resume history
        let history_check = match self.store.get(keys::RESUME_HISTORY)? {
            None => CheckResult::pass("No resume history"),
            Some(raw) => match serde_json::from_str::<EditHistory<ResumeData>>(&raw) {
                Ok(history) => {
                    let mut repaired = history.clone();
                    repaired.repair();
                    if repaired == history {
                        CheckResult::pass(format!("{} snapshot(s) in resume history", history.len()))
                    } else {
                        CheckResult::warning(
                            "Resume history pointer is out of range and will be reset on next use",
                            Some(vec![json!({"pointer": history.pointer(), "entries": history.len()})]),
                        )
                    }
                }
                Err(e) => CheckResult::error(
                    "Resume history is not valid JSON",
                    Some(vec![json!({"error": e.to_string()})]),
                ),
            },
        };
        checks.insert("resume_history".to_string(), history_check);

        // LLM configuration
        checks.insert(
            "llm_config".to_string(),
            if self.llm.is_configured() {
                CheckResult::pass(format!("API key configured for {}", self.llm.model()))
            } else {
                CheckResult::warning(
                    "No Gemini API key. Set NEXTSTEP_GEMINI_API_KEY or run 'nextstep config set gemini.apiKey <key>'",
                    None,
                )
            },
        );

        let passed = checks.values().filter(|c| c.status == "pass").count() as i64;
        let warnings = checks.values().filter(|c| c.status == "warning").count() as i64;
        let errors = checks.values().filter(|c| c.status == "error").count() as i64;

        Ok(DoctorResult {
            checks,
            summary: DoctorSummary { passed, warnings, errors },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: HashMap<String, CheckResult>,
    pub summary: DoctorSummary,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            status: "pass".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warning(message: impl Into<String>, details: Option<Vec<serde_json::Value>>) -> Self {
        Self {
            status: "warning".to_string(),
            message: message.into(),
            details,
        }
    }

    fn error(message: impl Into<String>, details: Option<Vec<serde_json::Value>>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub passed: i64,
    pub warnings: i64,
    pub errors: i64,
}
