//! Profile commands
//!
//! Every change to a profile is a load-modify-save round trip through the
//! account backend. Each command requires an active session.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{ChatSession, ResumeData, Roadmap, SavedCoverLetter, SavedJob, UserProfile};
use crate::ports::AccountBackend;

#[derive(Clone)]
pub struct ProfileService {
    backend: Arc<dyn AccountBackend>,
}

impl ProfileService {
    pub fn new(backend: Arc<dyn AccountBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// The active profile, if anyone is logged in
    pub fn current(&self) -> Result<Option<UserProfile>> {
        self.backend.current_user()
    }

    /// The active profile, or `Error::NotAuthenticated`
    pub fn require_current(&self) -> Result<UserProfile> {
        self.backend.current_user()?.ok_or(Error::NotAuthenticated)
    }

    fn modify<R, F>(&self, apply: F) -> Result<R>
    where
        F: FnOnce(&mut UserProfile) -> Result<R>,
    {
        let mut profile = self.require_current()?;
        let out = apply(&mut profile)?;
        self.backend.save_profile(&profile)?;
        Ok(out)
    }

    pub fn update_resume(&self, resume: ResumeData) -> Result<()> {
        self.modify(|p| {
            p.resume_data = resume;
            Ok(())
        })
    }

    /// Bookmark a job. Returns false when a job with the same uri is already saved.
    pub fn add_saved_job(&self, job: SavedJob) -> Result<bool> {
        let mut profile = self.require_current()?;
        if profile.saved_jobs.iter().any(|j| j.uri == job.uri) {
            return Ok(false);
        }
        profile.saved_jobs.push(job);
        self.backend.save_profile(&profile)?;
        Ok(true)
    }

    pub fn remove_saved_job(&self, id: &str) -> Result<SavedJob> {
        self.modify(|p| remove_by_id(&mut p.saved_jobs, id, |j| &j.id, "Saved job"))
    }

    /// Keep a cover letter, newest first
    pub fn add_cover_letter(&self, letter: SavedCoverLetter) -> Result<()> {
        self.modify(|p| {
            p.saved_cover_letters.insert(0, letter);
            Ok(())
        })
    }

    pub fn remove_cover_letter(&self, id: &str) -> Result<SavedCoverLetter> {
        self.modify(|p| remove_by_id(&mut p.saved_cover_letters, id, |l| &l.id, "Cover letter"))
    }

    /// Replace the session with the same id, or add it at the front
    pub fn upsert_chat_session(&self, session: ChatSession) -> Result<()> {
        self.modify(|p| {
            match p.chat_sessions.iter_mut().find(|s| s.id == session.id) {
                Some(existing) => *existing = session,
                None => p.chat_sessions.insert(0, session),
            }
            Ok(())
        })
    }

    pub fn remove_chat_session(&self, id: &str) -> Result<ChatSession> {
        self.modify(|p| remove_by_id(&mut p.chat_sessions, id, |s| &s.id, "Chat session"))
    }

    pub fn set_roadmap(&self, roadmap: Roadmap) -> Result<()> {
        self.modify(|p| {
            p.roadmap = Some(roadmap);
            Ok(())
        })
    }

    pub fn clear_roadmap(&self) -> Result<()> {
        self.modify(|p| {
            p.roadmap = None;
            Ok(())
        })
    }

    /// Flip one roadmap step. Returns the step's new completion state.
    pub fn toggle_roadmap_step(&self, index: usize) -> Result<bool> {
        self.modify(|p| {
            let roadmap = p
                .roadmap
                .as_mut()
                .ok_or_else(|| Error::not_found("No roadmap yet. Run 'nextstep roadmap generate' first."))?;
            let total = roadmap.steps.len();
            roadmap
                .toggle_step(index)
                .ok_or_else(|| Error::not_found(format!("Step {} (roadmap has {} steps)", index + 1, total)))
        })
    }
}

/// Remove exactly one entry by id, keeping the order of the rest
fn remove_by_id<T, F>(items: &mut Vec<T>, id: &str, key: F, what: &str) -> Result<T>
where
    F: Fn(&T) -> &String,
{
    let position = items
        .iter()
        .position(|item| key(item) == id)
        .ok_or_else(|| Error::not_found(format!("{} {}", what, id)))?;
    Ok(items.remove(position))
}
