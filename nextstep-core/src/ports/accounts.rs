//! Account backend port
//!
//! Where user profiles live. The local store keeps them in the key-value
//! table; the REST backend keeps them on a server.

use crate::domain::result::Result;
use crate::domain::UserProfile;

pub trait AccountBackend: Send + Sync {
    /// Backend name ("local" or "rest")
    fn name(&self) -> &str;

    /// Create an account and make it the active session
    fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile>;

    /// Authenticate and make the account the active session
    fn login(&self, email: &str, password: &str) -> Result<UserProfile>;

    fn logout(&self) -> Result<()>;

    /// Profile of the active session, if any
    fn current_user(&self) -> Result<Option<UserProfile>>;

    /// Persist the whole profile of the active user
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Remove the active account and end the session
    fn delete_account(&self) -> Result<()>;
}
