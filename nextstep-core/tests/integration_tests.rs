//! Integration tests for nextstep-core services
//!
//! These tests exercise the services against a real DuckDB file. The
//! language model is replaced by a canned implementation of the trait, but
//! all storage operations are real.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;

use nextstep_core::adapters::duckdb::DuckDbKeyValueStore;
use nextstep_core::domain::{
    ChatMessage, EditHistory, Experience, JobSearchResult, ResumeData, Roadmap, RoadmapStep,
    SavedCoverLetter,
};
use nextstep_core::ports::storage::keys;
use nextstep_core::ports::{AccountBackend, KeyValueStore, LanguageModel, TextStream};
use nextstep_core::services::{
    CoachService, CoverLetterRequest, CoverLetterService, DoctorService, LocalAccountStore, ProfileService,
    ResumeService, StatusService,
};
use nextstep_core::domain::result::Result;
use nextstep_core::Error;

// ============================================================================
// Test Helpers
// ============================================================================

/// Language model that answers from fixed queues
#[derive(Default)]
struct CannedModel {
    text: Mutex<VecDeque<String>>,
    chat: Mutex<VecDeque<Vec<String>>>,
}

impl CannedModel {
    fn with_text(replies: &[&str]) -> Self {
        let model = Self::default();
        model
            .text
            .lock()
            .unwrap()
            .extend(replies.iter().map(|r| r.to_string()));
        model
    }

    fn push_chat(&self, chunks: &[&str]) {
        self.chat
            .lock()
            .unwrap()
            .push_back(chunks.iter().map(|c| c.to_string()).collect());
    }
}

impl LanguageModel for CannedModel {
    fn model(&self) -> &str {
        "canned"
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn generate_text(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
        self.text
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::llm("no canned text"))
    }

    fn generate_json(&self, _prompt: &str, _schema: &JsonValue) -> Result<JsonValue> {
        Err(Error::llm("no canned json"))
    }

    fn search_jobs(&self, _query: &str) -> Result<JobSearchResult> {
        Err(Error::llm("no canned search"))
    }

    fn chat_stream(
        &self,
        _history: &[ChatMessage],
        _message: &str,
        _system: &str,
    ) -> Result<TextStream> {
        let chunks = self
            .chat
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::llm("no canned chat"))?;
        Ok(Box::new(chunks.into_iter().map(Ok)))
    }
}

/// Open the store used by every test
fn open_store(temp_dir: &TempDir) -> Arc<DuckDbKeyValueStore> {
    let db_path = temp_dir.path().join("nextstep.duckdb");
    Arc::new(DuckDbKeyValueStore::open(&db_path).expect("Failed to open store"))
}

/// Local accounts on top of `store`, with Ada registered and logged in
fn ada_accounts(store: Arc<DuckDbKeyValueStore>) -> Arc<LocalAccountStore> {
    let accounts = Arc::new(LocalAccountStore::new(store));
    accounts
        .register("Ada", "ada@example.com", "secret1")
        .expect("Failed to register");
    accounts
}

fn resume_service(store: Arc<DuckDbKeyValueStore>, accounts: Arc<LocalAccountStore>) -> ResumeService {
    ResumeService::new(
        store,
        Arc::new(CannedModel::default()),
        ProfileService::new(accounts),
    )
}

// ============================================================================
// Account Tests
// ============================================================================

#[test]
fn test_register_login_logout_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let accounts = ada_accounts(store.clone());

    assert_eq!(
        store.get(keys::ACTIVE_SESSION).unwrap().as_deref(),
        Some("ada@example.com")
    );

    accounts.logout().unwrap();
    assert!(accounts.current_user().unwrap().is_none());

    let profile = accounts.login("ada@example.com", "secret1").unwrap();
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.resume_data.full_name, "Ada");
}

#[test]
fn test_duplicate_registration_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = ada_accounts(open_store(&temp_dir));

    let err = accounts
        .register("Other Ada", "ada@example.com", "another1")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(accounts.users().unwrap().len(), 1);
}

#[test]
fn test_wrong_password_keeps_session_closed() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = ada_accounts(open_store(&temp_dir));
    accounts.logout().unwrap();

    let err = accounts.login("ada@example.com", "wrong-pass").unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(accounts.active_email().unwrap().is_none());
}

#[test]
fn test_password_never_stored_in_clear() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    ada_accounts(store.clone());

    let raw = store.get(keys::USERS_DB).unwrap().unwrap();
    assert!(!raw.contains("secret1"));
}

#[test]
fn test_session_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        ada_accounts(open_store(&temp_dir));
    }

    let accounts = LocalAccountStore::new(open_store(&temp_dir));
    let profile = accounts.restore_session().unwrap().unwrap();
    assert_eq!(profile.email, "ada@example.com");
}

#[test]
fn test_delete_account_ends_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let accounts = ada_accounts(store.clone());
    accounts
        .register("Grace", "grace@example.com", "secret2")
        .unwrap();

    accounts.delete_account().unwrap();

    let users = accounts.users().unwrap();
    assert!(users.contains_key("ada@example.com"));
    assert!(!users.contains_key("grace@example.com"));
    assert!(store.get(keys::ACTIVE_SESSION).unwrap().is_none());
}

// ============================================================================
// Profile Collection Tests
// ============================================================================

#[test]
fn test_cover_letters_newest_first_and_removal() {
    let temp_dir = TempDir::new().unwrap();
    let profiles = ProfileService::new(ada_accounts(open_store(&temp_dir)));

    let first = SavedCoverLetter::new("Engineer", "Acme", "Dear Acme");
    let second = SavedCoverLetter::new("Analyst", "Globex", "Dear Globex");
    profiles.add_cover_letter(first.clone()).unwrap();
    profiles.add_cover_letter(second.clone()).unwrap();

    let stored = profiles.require_current().unwrap().saved_cover_letters;
    assert_eq!(stored[0].id, second.id);
    assert_eq!(stored[1].id, first.id);

    profiles.remove_cover_letter(&second.id).unwrap();
    let stored = profiles.require_current().unwrap().saved_cover_letters;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);

    assert!(matches!(
        profiles.remove_cover_letter(&second.id),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_roadmap_progress_persists() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let profiles = ProfileService::new(ada_accounts(store.clone()));

    profiles
        .set_roadmap(Roadmap {
            steps: vec![RoadmapStep::default(); 3],
            ..Default::default()
        })
        .unwrap();
    assert!(profiles.toggle_roadmap_step(0).unwrap());
    assert!(profiles.toggle_roadmap_step(2).unwrap());
    assert!(!profiles.toggle_roadmap_step(2).unwrap());
    drop(profiles);

    let reopened = ProfileService::new(Arc::new(LocalAccountStore::new(store)));
    let roadmap = reopened.require_current().unwrap().roadmap.unwrap();
    assert_eq!(roadmap.completed_steps(), 1);
    assert_eq!(roadmap.progress(), 33);
}

#[test]
fn test_profiles_are_isolated_per_account() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = ada_accounts(open_store(&temp_dir));
    let profiles = ProfileService::new(accounts.clone());
    profiles
        .add_cover_letter(SavedCoverLetter::new("Engineer", "Acme", "Dear Acme"))
        .unwrap();

    accounts
        .register("Grace", "grace@example.com", "secret2")
        .unwrap();
    assert!(profiles
        .require_current()
        .unwrap()
        .saved_cover_letters
        .is_empty());

    accounts.login("ada@example.com", "secret1").unwrap();
    assert_eq!(
        profiles.require_current().unwrap().saved_cover_letters.len(),
        1
    );
}

// ============================================================================
// Resume History Tests
// ============================================================================

#[test]
fn test_undo_redo_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let accounts = ada_accounts(store.clone());
    let service = resume_service(store.clone(), accounts.clone());

    service.set_field("jobTitle", "Engineer").unwrap();
    service.set_field("jobTitle", "Senior Engineer").unwrap();
    service.undo().unwrap();
    drop(service);

    let reopened = resume_service(store, accounts);
    assert_eq!(reopened.draft().unwrap().job_title, "Engineer");
    let status = reopened.history_status().unwrap();
    assert!(status.can_undo);
    assert!(status.can_redo);

    let redone = reopened.redo().unwrap().unwrap();
    assert_eq!(redone.job_title, "Senior Engineer");
}

#[test]
fn test_new_edit_after_undo_drops_redo_branch() {
    let states: Vec<ResumeData> = ["A", "B", "C", "D"]
        .iter()
        .map(|title| ResumeData {
            job_title: title.to_string(),
            ..Default::default()
        })
        .collect();

    let mut history = EditHistory::new();
    history.add_state(&states[0]);
    history.add_state(&states[1]);
    history.add_state(&states[2]);
    history.undo();
    history.undo();
    history.add_state(&states[3]);

    assert_eq!(history.len(), 2);
    assert_eq!(history.pointer(), 1);
    assert!(!history.can_redo());
    assert_eq!(history.undo().unwrap().job_title, "A");
}

#[test]
fn test_save_to_profile_and_load_back() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let accounts = ada_accounts(store.clone());
    let service = resume_service(store, accounts.clone());

    service
        .add_experience(Experience {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            ..Default::default()
        })
        .unwrap();
    service.save_to_profile().unwrap();
    service.discard_draft().unwrap();

    let profile = accounts.current_user().unwrap().unwrap();
    assert_eq!(profile.resume_data.experience.len(), 1);

    let loaded = service.load_from_profile().unwrap();
    assert_eq!(loaded.experience[0].company, "Acme");
    let status = service.history_status().unwrap();
    assert_eq!(status.entries, 1);
    assert!(!status.can_undo);
}

#[test]
fn test_polish_failure_leaves_draft_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let service = resume_service(store.clone(), ada_accounts(store));

    service.set_field("summary", "i code stuff").unwrap();
    let before = service.history_status().unwrap();

    assert!(matches!(service.polish_summary(), Err(Error::Llm(_))));
    assert_eq!(service.draft().unwrap().summary, "i code stuff");
    assert_eq!(service.history_status().unwrap().entries, before.entries);
}

// ============================================================================
// Feature Flow Tests
// ============================================================================

#[test]
fn test_coach_session_persisted_with_streamed_reply() {
    let temp_dir = TempDir::new().unwrap();
    let profiles = ProfileService::new(ada_accounts(open_store(&temp_dir)));
    let llm = Arc::new(CannedModel::with_text(&["Salary Talk"]));
    llm.push_chat(&["Ask for ", "the range ", "first."]);
    let coach = CoachService::new(llm, profiles.clone());

    let mut streamed = Vec::new();
    let reply = coach
        .send(None, "How do I negotiate salary?", |chunk| {
            streamed.push(chunk.to_string())
        })
        .unwrap();

    assert!(!reply.failed);
    assert_eq!(streamed.len(), 3);
    assert_eq!(reply.reply, "Ask for the range first.");

    let sessions = profiles.require_current().unwrap().chat_sessions;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].title, "Salary Talk");
    assert_eq!(
        sessions[0].last_message().unwrap().text,
        "Ask for the range first."
    );
}

#[test]
fn test_cover_letter_generate_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let profiles = ProfileService::new(ada_accounts(open_store(&temp_dir)));
    let llm = Arc::new(CannedModel::with_text(&["Dear hiring manager"]));
    let service = CoverLetterService::new(llm, profiles);

    let letter = service
        .generate(&CoverLetterRequest {
            tone: String::new(),
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            job_description: "Build things".to_string(),
        })
        .unwrap();
    let saved = service.save("Engineer", "Acme", &letter).unwrap();

    assert_eq!(service.get(&saved.id).unwrap().letter, "Dear hiring manager");
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn test_status_reflects_stored_profile() {
    let temp_dir = TempDir::new().unwrap();
    let profiles = ProfileService::new(ada_accounts(open_store(&temp_dir)));
    let status = StatusService::new(profiles, Arc::new(CannedModel::default()))
        .get_status()
        .unwrap();

    assert_eq!(status.backend, "local");
    assert_eq!(status.user.unwrap().name, "Ada");
    assert!(status.roadmap.is_none());
}

// ============================================================================
// Doctor Tests
// ============================================================================

#[test]
fn test_doctor_on_healthy_database() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    ada_accounts(store.clone());

    let result = DoctorService::new(store, Arc::new(CannedModel::default()))
        .run_checks()
        .unwrap();

    assert_eq!(result.summary.errors, 0);
    assert_eq!(result.checks["llm_config"].status, "pass");
}

#[test]
fn test_doctor_flags_corrupt_history() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    store.set(keys::RESUME_HISTORY, "[broken").unwrap();

    let result = DoctorService::new(store, Arc::new(CannedModel::default()))
        .run_checks()
        .unwrap();

    assert_eq!(result.checks["resume_history"].status, "error");
    assert_eq!(result.summary.errors, 1);
    let report = serde_json::to_value(&result).unwrap();
    assert_eq!(report["summary"], json!({"passed": 5, "warnings": 0, "errors": 1}));
}
