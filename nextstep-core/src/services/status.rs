//! Status service - dashboard summary of the active profile

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::ports::LanguageModel;
use crate::services::ProfileService;

pub struct StatusService {
    profiles: ProfileService,
    llm: Arc<dyn LanguageModel>,
}

impl StatusService {
    pub fn new(profiles: ProfileService, llm: Arc<dyn LanguageModel>) -> Self {
        Self { profiles, llm }
    }

    /// Summary of the active session. Works logged out, with zero counts.
    pub fn get_status(&self) -> Result<StatusSummary> {
        let mut summary = StatusSummary {
            backend: self.profiles.backend_name().to_string(),
            model: self.llm.model().to_string(),
            llm_configured: self.llm.is_configured(),
            user: None,
            saved_jobs: 0,
            cover_letters: 0,
            chat_sessions: 0,
            roadmap: None,
            resume_completeness: 0,
            missing_resume_fields: Vec::new(),
        };

        let profile = match self.profiles.current()? {
            Some(profile) => profile,
            None => return Ok(summary),
        };

        summary.user = Some(UserSummary {
            name: profile.name.clone(),
            email: profile.email.clone(),
            role: profile.role.clone(),
            member_since: profile.created_at,
        });
        summary.saved_jobs = profile.saved_jobs.len();
        summary.cover_letters = profile.saved_cover_letters.len();
        summary.chat_sessions = profile.chat_sessions.len();
        summary.roadmap = profile.roadmap.as_ref().map(|r| RoadmapSummary {
            total_steps: r.steps.len(),
            completed_steps: r.completed_steps(),
            progress: r.progress(),
        });
        summary.resume_completeness = profile.resume_data.completeness_percent();
        summary.missing_resume_fields = profile
            .resume_data
            .completeness()
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect();

        Ok(summary)
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub backend: String,
    pub model: String,
    pub llm_configured: bool,
    pub user: Option<UserSummary>,
    pub saved_jobs: usize,
    pub cover_letters: usize,
    pub chat_sessions: usize,
    pub roadmap: Option<RoadmapSummary>,
    pub resume_completeness: u8,
    pub missing_resume_fields: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub role: String,
    pub member_since: i64,
}

#[derive(Debug, Serialize)]
pub struct RoadmapSummary {
    pub total_steps: usize,
    pub completed_steps: usize,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Roadmap, RoadmapStep, SavedCoverLetter};
    use crate::services::testing::{logged_in_accounts, memory_accounts, ScriptedModel};

    #[test]
    fn test_status_logged_out() {
        let (accounts, _) = memory_accounts();
        let service = StatusService::new(ProfileService::new(accounts), Arc::new(ScriptedModel::new()));
        let status = service.get_status().unwrap();
        assert!(status.user.is_none());
        assert_eq!(status.backend, "local");
        assert_eq!(status.saved_jobs, 0);
    }

    #[test]
    fn test_status_counts() {
        let (accounts, _) = logged_in_accounts();
        let profiles = ProfileService::new(accounts);
        profiles.add_cover_letter(SavedCoverLetter::new("A", "B", "C")).unwrap();
        profiles
            .set_roadmap(Roadmap {
                steps: vec![RoadmapStep::default(); 4],
                ..Default::default()
            })
            .unwrap();
        profiles.toggle_roadmap_step(2).unwrap();

        let service = StatusService::new(profiles, Arc::new(ScriptedModel::new()));
        let status = service.get_status().unwrap();

        assert_eq!(status.user.as_ref().unwrap().email, "ada@example.com");
        assert_eq!(status.cover_letters, 1);
        let roadmap = status.roadmap.unwrap();
        assert_eq!(roadmap.completed_steps, 1);
        assert_eq!(roadmap.progress, 25);
        // name and email are seeded at registration
        assert_eq!(status.resume_completeness, 29);
        assert!(status.missing_resume_fields.contains(&"summary".to_string()));
    }
}
