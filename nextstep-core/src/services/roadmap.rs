//! Learning roadmap generation and progress tracking

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Roadmap, RoadmapRequest, UserProfile};
use crate::ports::{generate_structured, LanguageModel};
use crate::prompts;
use crate::services::ProfileService;

pub struct RoadmapService {
    llm: Arc<dyn LanguageModel>,
    profiles: ProfileService,
}

impl RoadmapService {
    pub fn new(llm: Arc<dyn LanguageModel>, profiles: ProfileService) -> Self {
        Self { llm, profiles }
    }

    /// Generate a fresh roadmap and store it on the profile, replacing any old one
    pub fn generate(&self, request: &RoadmapRequest) -> Result<Roadmap> {
        if request.goal.trim().is_empty() {
            return Err(Error::validation("Please enter a career goal."));
        }
        let profile = self.profiles.require_current()?;

        let mut roadmap: Roadmap = generate_structured(
            self.llm.as_ref(),
            &prompts::roadmap(request, &current_skills(&profile)),
            &prompts::roadmap_schema(),
        )?;
        if roadmap.steps.is_empty() {
            return Err(Error::llm("The roadmap came back without any steps."));
        }
        roadmap.reset_progress();

        self.profiles.set_roadmap(roadmap.clone())?;
        Ok(roadmap)
    }

    pub fn current(&self) -> Result<Option<Roadmap>> {
        Ok(self.profiles.require_current()?.roadmap)
    }

    /// Flip step `index` (0-based). Returns the new state and overall progress.
    pub fn toggle_step(&self, index: usize) -> Result<(bool, u8)> {
        let completed = self.profiles.toggle_roadmap_step(index)?;
        let progress = self.current()?.map(|r| r.progress()).unwrap_or(0);
        Ok((completed, progress))
    }

    pub fn clear(&self) -> Result<()> {
        self.profiles.clear_roadmap()
    }

    /// Completion percentage, 0 without a roadmap
    pub fn progress(&self) -> Result<u8> {
        Ok(self.current()?.map(|r| r.progress()).unwrap_or(0))
    }
}

/// Skills the user already has: resume skills first, then profile skills
fn current_skills(profile: &UserProfile) -> String {
    let mut skills = profile.resume_data.skill_list();
    for skill in &profile.skills {
        if !skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            skills.push(skill.clone());
        }
    }
    skills.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkillLevel;
    use crate::services::testing::{logged_in_accounts, ScriptedModel};
    use serde_json::json;

    fn request(goal: &str) -> RoadmapRequest {
        RoadmapRequest {
            goal: goal.to_string(),
            skill_level: SkillLevel::Beginner,
            time_availability: "5-10 hours".to_string(),
            learning_preferences: vec!["Projects".to_string()],
        }
    }

    fn roadmap_json() -> serde_json::Value {
        json!({
            "steps": [
                {"title": "Basics", "duration": "2 weeks", "completed": true,
                 "resources": [{"type": "video", "title": "Intro", "url": "https://example.com"}]},
                {"title": "Projects", "duration": "4 weeks"},
                {"title": "Portfolio", "duration": "2 weeks"}
            ],
            "skillAnalysis": {"currentSkills": ["Excel"], "requiredSkills": ["SQL"], "gapSkills": ["SQL"]}
        })
    }

    fn service() -> (RoadmapService, Arc<ScriptedModel>, ProfileService) {
        let (accounts, _) = logged_in_accounts();
        let llm = Arc::new(ScriptedModel::new());
        let profiles = ProfileService::new(accounts);
        (RoadmapService::new(llm.clone(), profiles.clone()), llm, profiles)
    }

    #[test]
    fn test_generate_resets_progress_and_saves() {
        let (service, llm, _) = service();
        llm.push_json(roadmap_json());

        let roadmap = service.generate(&request("Become a data analyst")).unwrap();
        assert_eq!(roadmap.steps.len(), 3);
        assert!(roadmap.steps.iter().all(|s| !s.completed));
        assert_eq!(roadmap.steps[0].resources[0].kind, "video");
        assert_eq!(service.current().unwrap().unwrap(), roadmap);
        assert!(llm.last_prompt().contains("Become a data analyst"));
    }

    #[test]
    fn test_prompt_uses_resume_skills() {
        let (service, llm, profiles) = service();
        let mut profile = profiles.require_current().unwrap();
        profile.resume_data.skills = "Excel, Python".to_string();
        profile.skills = vec!["python".to_string(), "Tableau".to_string()];
        profiles.update_resume(profile.resume_data.clone()).unwrap();

        assert_eq!(current_skills(&profile), "Excel, Python, Tableau");

        llm.push_json(roadmap_json());
        service.generate(&request("Analyst")).unwrap();
        assert!(llm.last_prompt().contains("Excel, Python"));
    }

    #[test]
    fn test_toggle_and_progress() {
        let (service, llm, _) = service();
        assert_eq!(service.progress().unwrap(), 0);
        llm.push_json(roadmap_json());
        service.generate(&request("Analyst")).unwrap();

        assert_eq!(service.toggle_step(0).unwrap(), (true, 33));
        assert_eq!(service.toggle_step(1).unwrap(), (true, 67));
        assert_eq!(service.toggle_step(0).unwrap(), (false, 33));
        assert!(matches!(service.toggle_step(3), Err(Error::NotFound(_))));

        service.clear().unwrap();
        assert!(service.current().unwrap().is_none());
    }

    #[test]
    fn test_regenerate_replaces_wholesale() {
        let (service, llm, _) = service();
        llm.push_json(roadmap_json());
        service.generate(&request("Analyst")).unwrap();
        service.toggle_step(0).unwrap();

        llm.push_json(json!({"steps": [{"title": "Only step"}]}));
        let fresh = service.generate(&request("Engineer")).unwrap();
        assert_eq!(fresh.steps.len(), 1);
        assert_eq!(service.progress().unwrap(), 0);
    }

    #[test]
    fn test_validation_and_empty_response() {
        let (service, llm, _) = service();
        assert!(matches!(service.generate(&request(" ")), Err(Error::Validation(_))));

        llm.push_json(json!({"steps": []}));
        assert!(matches!(service.generate(&request("Analyst")), Err(Error::Llm(_))));
        assert!(service.current().unwrap().is_none());
    }
}
