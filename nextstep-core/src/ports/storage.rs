//! Key-value storage port
//!
//! Every piece of local state (the users table, the active session, the
//! resume draft and its history, search filters) is a JSON string under a
//! fixed key. No versioning, last writer wins.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;

/// Keys used by the local store
pub mod keys {
    pub const USERS_DB: &str = "nextstep_users_db";
    pub const ACTIVE_SESSION: &str = "nextstep_active_session_email";
    pub const RESUME_DRAFT: &str = "resumeData";
    pub const RESUME_HISTORY: &str = "nextstep_resume_history";
    pub const JOB_SEARCH_FILTERS: &str = "job_search_filters";
    pub const JOB_SEARCH_RESULTS: &str = "job_search_results";
    pub const AUTH_TOKEN: &str = "nextstep_token";
}

/// String key-value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// Read and parse a JSON value. Missing keys give `None`.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and store a JSON value
pub fn set_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
