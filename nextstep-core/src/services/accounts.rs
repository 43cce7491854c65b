//! Local account store
//!
//! All accounts live in one JSON object keyed by email under
//! `nextstep_users_db`; the active session is the email stored under
//! `nextstep_active_session_email`. Every mutation rewrites the whole
//! table.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{PasswordCredential, ResumeData, Roadmap, UserProfile};
use crate::ports::storage::keys;
use crate::ports::{get_json, set_json, AccountBackend, KeyValueStore};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Users table: email -> profile
pub type UsersTable = BTreeMap<String, UserProfile>;

pub struct LocalAccountStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocalAccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The whole users table. A missing key is an empty table.
    pub fn users(&self) -> Result<UsersTable> {
        Ok(get_json(self.store.as_ref(), keys::USERS_DB)?.unwrap_or_default())
    }

    fn write_users(&self, users: &UsersTable) -> Result<()> {
        set_json(self.store.as_ref(), keys::USERS_DB, users)
    }

    pub fn active_email(&self) -> Result<Option<String>> {
        self.store.get(keys::ACTIVE_SESSION)
    }

    fn set_active(&self, email: &str) -> Result<()> {
        self.store.set(keys::ACTIVE_SESSION, email)
    }

    /// Create an account and log it in
    ///
    /// An existing email is rejected before any other check, so the
    /// stored record is never touched.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let name = name.trim();
        let email = email.trim();
        let mut users = self.users()?;

        if users.contains_key(email) {
            return Err(Error::auth("An account with this email already exists."));
        }
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(Error::validation("Name, email, and password are required."));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation("Password must be at least 6 characters long."));
        }

        let credential = PasswordCredential::create(password)?;
        let profile = UserProfile::new(name, email, Some(credential));
        users.insert(email.to_string(), profile.clone());
        self.write_users(&users)?;
        self.set_active(email)?;

        Ok(profile)
    }

    /// Check credentials and make the account active
    ///
    /// On failure the current session is left as it was.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let email = email.trim();
        let users = self.users()?;

        let profile = users
            .get(email)
            .ok_or_else(|| Error::auth("No account found with this email."))?;

        let valid = match &profile.credential {
            Some(credential) => credential.verify(password)?,
            None => false,
        };
        if !valid {
            return Err(Error::auth("Incorrect password."));
        }

        self.set_active(email)?;
        Ok(profile.clone())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::ACTIVE_SESSION)
    }

    /// Reload the active account at startup
    ///
    /// A session pointing at a record that no longer exists is cleared.
    pub fn restore_session(&self) -> Result<Option<UserProfile>> {
        let email = match self.active_email()? {
            Some(email) => email,
            None => return Ok(None),
        };

        match self.users()?.remove(&email) {
            Some(profile) => Ok(Some(profile)),
            None => {
                self.logout()?;
                Ok(None)
            }
        }
    }

    /// Write a profile into its slot and make it the active session
    ///
    /// A profile without a credential keeps the stored one.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let mut users = self.users()?;
        let mut profile = profile.clone();
        if profile.credential.is_none() {
            profile.credential = users.get(&profile.email).and_then(|p| p.credential.clone());
        }
        let email = profile.email.clone();
        users.insert(email.clone(), profile);
        self.write_users(&users)?;
        self.set_active(&email)
    }

    fn update_active<F>(&self, apply: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.restore_session()?.ok_or(Error::NotAuthenticated)?;
        apply(&mut profile);
        self.save_profile(&profile)?;
        Ok(profile)
    }

    /// Replace the active user's resume
    pub fn update_resume(&self, resume: ResumeData) -> Result<UserProfile> {
        self.update_active(|p| p.resume_data = resume)
    }

    /// Replace (or clear) the active user's roadmap
    pub fn update_roadmap(&self, roadmap: Option<Roadmap>) -> Result<UserProfile> {
        self.update_active(|p| p.roadmap = roadmap)
    }

    /// Remove the active account and end the session
    pub fn delete_account(&self) -> Result<()> {
        let email = self.active_email()?.ok_or(Error::NotAuthenticated)?;
        let mut users = self.users()?;
        users.remove(&email);
        self.write_users(&users)?;
        self.logout()
    }
}

impl AccountBackend for LocalAccountStore {
    fn name(&self) -> &str {
        "local"
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        LocalAccountStore::register(self, name, email, password)
    }

    fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        LocalAccountStore::login(self, email, password)
    }

    fn logout(&self) -> Result<()> {
        LocalAccountStore::logout(self)
    }

    fn current_user(&self) -> Result<Option<UserProfile>> {
        self.restore_session()
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        match self.active_email()? {
            Some(email) if email == profile.email => LocalAccountStore::save_profile(self, profile),
            _ => Err(Error::NotAuthenticated),
        }
    }

    fn delete_account(&self) -> Result<()> {
        LocalAccountStore::delete_account(self)
    }
}
