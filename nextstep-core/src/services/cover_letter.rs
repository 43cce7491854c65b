//! Cover letter generation and the saved-letter list

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{SavedCoverLetter, UserProfile};
use crate::ports::LanguageModel;
use crate::prompts::{self, COVER_LETTER_TONES, FALLBACK_PROFILE};
use crate::services::ProfileService;

pub const DEFAULT_TONE: &str = "Professional";

/// What the letter is for
#[derive(Debug, Clone, Default)]
pub struct CoverLetterRequest {
    pub tone: String,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
}

pub struct CoverLetterService {
    llm: Arc<dyn LanguageModel>,
    profiles: ProfileService,
}

impl CoverLetterService {
    pub fn new(llm: Arc<dyn LanguageModel>, profiles: ProfileService) -> Self {
        Self { llm, profiles }
    }

    /// Tone names with their descriptions
    pub fn tones(&self) -> &'static [(&'static str, &'static str)] {
        COVER_LETTER_TONES
    }

    /// Write a letter. Works logged out, with a generic profile line.
    pub fn generate(&self, request: &CoverLetterRequest) -> Result<String> {
        let job_title = request.job_title.trim();
        if job_title.is_empty() {
            return Err(Error::validation("Please enter the job title."));
        }
        let tone = canonical_tone(&request.tone)?;
        let profile = self.profiles.current()?;

        let letter = self.llm.generate_text(
            &prompts::cover_letter(
                tone,
                job_title,
                request.company.trim(),
                &profile_context(profile.as_ref()),
                request.job_description.trim(),
            ),
            None,
        )?;
        Ok(letter.trim().to_string())
    }

    /// Keep a generated letter, newest first
    pub fn save(&self, job_title: &str, company: &str, letter: &str) -> Result<SavedCoverLetter> {
        if letter.trim().is_empty() {
            return Err(Error::validation("Cannot save an empty letter."));
        }
        let saved = SavedCoverLetter::new(job_title.trim(), company.trim(), letter);
        self.profiles.add_cover_letter(saved.clone())?;
        Ok(saved)
    }

    pub fn list(&self) -> Result<Vec<SavedCoverLetter>> {
        Ok(self.profiles.require_current()?.saved_cover_letters)
    }

    pub fn get(&self, id: &str) -> Result<SavedCoverLetter> {
        self.list()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::not_found(format!("Cover letter {}", id)))
    }

    pub fn delete(&self, id: &str) -> Result<SavedCoverLetter> {
        self.profiles.remove_cover_letter(id)
    }
}

/// Resolve a tone name case-insensitively; empty means the default
fn canonical_tone(tone: &str) -> Result<&'static str> {
    let tone = tone.trim();
    if tone.is_empty() {
        return Ok(DEFAULT_TONE);
    }
    COVER_LETTER_TONES
        .iter()
        .map(|(name, _)| *name)
        .find(|name| name.eq_ignore_ascii_case(tone))
        .ok_or_else(|| {
            let names: Vec<&str> = COVER_LETTER_TONES.iter().map(|(n, _)| *n).collect();
            Error::validation(format!("Unknown tone '{}'. Choose one of: {}", tone, names.join(", ")))
        })
}

/// Profile line for the prompt, or the generic fallback
fn profile_context(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) if !p.resume_data.full_name.trim().is_empty() => p.resume_data.profile_line(),
        _ => FALLBACK_PROFILE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Experience;
    use crate::services::testing::{logged_in_accounts, memory_accounts, ScriptedModel};

    fn request() -> CoverLetterRequest {
        CoverLetterRequest {
            tone: "enthusiastic".to_string(),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            job_description: "Rust, Postgres".to_string(),
        }
    }

    #[test]
    fn test_generate_uses_resume_profile() {
        let (accounts, _) = logged_in_accounts();
        let profiles = ProfileService::new(accounts);
        let mut resume = profiles.require_current().unwrap().resume_data;
        resume.skills = "Rust, SQL".to_string();
        resume.experience.push(Experience {
            role: "Engineer".to_string(),
            company: "Initech".to_string(),
            ..Default::default()
        });
        profiles.update_resume(resume).unwrap();

        let llm = Arc::new(ScriptedModel::new());
        llm.push_text("Dear Hiring Manager,\n...\n");
        let service = CoverLetterService::new(llm.clone(), profiles);

        let letter = service.generate(&request()).unwrap();
        assert_eq!(letter, "Dear Hiring Manager,\n...");

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Write a Enthusiastic cover letter for a Backend Engineer position at Acme."));
        assert!(prompt.contains("Name: Ada, Skills: Rust, SQL, Experience: Engineer at Initech"));
    }

    #[test]
    fn test_generate_logged_out_uses_fallback() {
        let (accounts, _) = memory_accounts();
        let llm = Arc::new(ScriptedModel::new());
        llm.push_text("Letter");
        let service = CoverLetterService::new(llm.clone(), ProfileService::new(accounts));

        service.generate(&CoverLetterRequest { tone: String::new(), ..request() }).unwrap();
        assert!(llm.last_prompt().contains(FALLBACK_PROFILE));
        assert!(llm.last_prompt().contains("Write a Professional cover letter"));
    }

    #[test]
    fn test_generate_validation() {
        let (accounts, _) = memory_accounts();
        let llm = Arc::new(ScriptedModel::new());
        let service = CoverLetterService::new(llm.clone(), ProfileService::new(accounts));

        let no_title = CoverLetterRequest { job_title: " ".to_string(), ..request() };
        assert!(matches!(service.generate(&no_title), Err(Error::Validation(_))));
        let bad_tone = CoverLetterRequest { tone: "Sarcastic".to_string(), ..request() };
        assert!(matches!(service.generate(&bad_tone), Err(Error::Validation(_))));
        assert!(llm.prompts().is_empty());
    }

    #[test]
    fn test_save_list_delete() {
        let (accounts, _) = logged_in_accounts();
        let service = CoverLetterService::new(Arc::new(ScriptedModel::new()), ProfileService::new(accounts));

        let first = service.save("Engineer", "Acme", "one").unwrap();
        let second = service.save("Designer", "Globex", "two").unwrap();

        let letters = service.list().unwrap();
        assert_eq!(letters[0].id, second.id);
        assert_eq!(letters[1].id, first.id);
        assert_eq!(service.get(&first.id).unwrap().letter, "one");

        service.delete(&second.id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
        assert!(matches!(service.get(&second.id), Err(Error::NotFound(_))));
        assert!(matches!(service.save("x", "y", "  "), Err(Error::Validation(_))));
    }
}
