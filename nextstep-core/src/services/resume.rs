//! Resume builder
//!
//! The draft lives under `resumeData` so it survives between commands.
//! Every committed edit also goes onto a persisted linear history; undo
//! and redo move through that history without recording new entries.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{CustomSection, EditHistory, Education, Experience, ResumeData};
use crate::ports::storage::keys;
use crate::ports::{get_json, set_json, KeyValueStore, LanguageModel};
use crate::prompts;
use crate::services::ProfileService;

pub struct ResumeService {
    store: Arc<dyn KeyValueStore>,
    llm: Arc<dyn LanguageModel>,
    profiles: ProfileService,
}

/// Undo/redo availability for display
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub entries: usize,
    pub pointer: isize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl ResumeService {
    pub fn new(store: Arc<dyn KeyValueStore>, llm: Arc<dyn LanguageModel>, profiles: ProfileService) -> Self {
        Self { store, llm, profiles }
    }

    /// Current draft
    ///
    /// Falls back to the logged-in user's saved resume, then to an empty one.
    pub fn draft(&self) -> Result<ResumeData> {
        if let Some(draft) = get_json(self.store.as_ref(), keys::RESUME_DRAFT)? {
            return Ok(draft);
        }
        Ok(self
            .profiles
            .current()?
            .map(|p| p.resume_data)
            .unwrap_or_default())
    }

    fn write_draft(&self, data: &ResumeData) -> Result<()> {
        set_json(self.store.as_ref(), keys::RESUME_DRAFT, data)
    }

    /// Persisted history, with an out-of-range pointer pulled back in bounds
    pub fn history(&self) -> Result<EditHistory<ResumeData>> {
        let mut history: EditHistory<ResumeData> =
            get_json(self.store.as_ref(), keys::RESUME_HISTORY)?.unwrap_or_default();
        history.repair();
        Ok(history)
    }

    fn write_history(&self, history: &EditHistory<ResumeData>) -> Result<()> {
        set_json(self.store.as_ref(), keys::RESUME_HISTORY, history)
    }

    pub fn history_status(&self) -> Result<HistoryStatus> {
        let history = self.history()?;
        Ok(HistoryStatus {
            entries: history.len(),
            pointer: history.pointer(),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
        })
    }

    /// Store `data` as the draft and record it in the history
    ///
    /// The first commit also records the state it started from, so it can
    /// be undone.
    pub fn commit(&self, data: &ResumeData) -> Result<()> {
        let mut history = self.history()?;
        if history.is_empty() {
            history.add_state(&self.draft()?);
        }
        history.add_state(data);
        self.write_history(&history)?;
        self.write_draft(data)
    }

    /// Apply an edit to the draft and commit the result
    pub fn edit<F>(&self, apply: F) -> Result<ResumeData>
    where
        F: FnOnce(&mut ResumeData) -> Result<()>,
    {
        let mut data = self.draft()?;
        apply(&mut data)?;
        self.commit(&data)?;
        Ok(data)
    }

    pub fn set_field(&self, field: &str, value: &str) -> Result<ResumeData> {
        self.edit(|data| {
            if data.set_field(field, value) {
                Ok(())
            } else {
                Err(Error::validation(format!("Unknown resume field: {}", field)))
            }
        })
    }

    pub fn add_experience(&self, experience: Experience) -> Result<ResumeData> {
        self.edit(|data| {
            data.experience.push(experience);
            Ok(())
        })
    }

    pub fn remove_experience(&self, index: usize) -> Result<ResumeData> {
        self.edit(|data| {
            check_index(index, data.experience.len(), "Experience")?;
            data.experience.remove(index);
            Ok(())
        })
    }

    pub fn add_education(&self, education: Education) -> Result<ResumeData> {
        self.edit(|data| {
            data.education.push(education);
            Ok(())
        })
    }

    pub fn remove_education(&self, index: usize) -> Result<ResumeData> {
        self.edit(|data| {
            check_index(index, data.education.len(), "Education")?;
            data.education.remove(index);
            Ok(())
        })
    }

    pub fn add_custom_section(&self, section: CustomSection) -> Result<ResumeData> {
        self.edit(|data| {
            data.custom_sections.push(section);
            Ok(())
        })
    }

    pub fn remove_custom_section(&self, index: usize) -> Result<ResumeData> {
        self.edit(|data| {
            check_index(index, data.custom_sections.len(), "Custom section")?;
            data.custom_sections.remove(index);
            Ok(())
        })
    }

    /// Move a custom section by `direction` places (-1 up, 1 down)
    pub fn move_custom_section(&self, index: usize, direction: isize) -> Result<ResumeData> {
        self.edit(|data| {
            if data.move_custom_section(index, direction) {
                Ok(())
            } else {
                Err(Error::validation("Section cannot be moved any further"))
            }
        })
    }

    /// Step back. Returns the restored draft, or None when there is nothing to undo.
    pub fn undo(&self) -> Result<Option<ResumeData>> {
        let mut history = self.history()?;
        if !history.can_undo() {
            return Ok(None);
        }
        let restored = history.undo();
        self.write_history(&history)?;
        if let Some(data) = &restored {
            self.write_draft(data)?;
        }
        Ok(restored)
    }

    pub fn redo(&self) -> Result<Option<ResumeData>> {
        let mut history = self.history()?;
        if !history.can_redo() {
            return Ok(None);
        }
        let restored = history.redo();
        self.write_history(&history)?;
        if let Some(data) = &restored {
            self.write_draft(data)?;
        }
        Ok(restored)
    }

    /// Replace the draft with the saved profile resume and start a fresh history
    pub fn load_from_profile(&self) -> Result<ResumeData> {
        let data = self.profiles.require_current()?.resume_data;
        let mut history = EditHistory::new();
        history.add_state(&data);
        self.write_history(&history)?;
        self.write_draft(&data)?;
        Ok(data)
    }

    /// Drop the draft and its history
    pub fn discard_draft(&self) -> Result<()> {
        self.store.remove(keys::RESUME_DRAFT)?;
        self.store.remove(keys::RESUME_HISTORY)
    }

    /// Copy the draft onto the logged-in profile
    pub fn save_to_profile(&self) -> Result<ResumeData> {
        let data = self.draft()?;
        self.profiles.update_resume(data.clone())?;
        Ok(data)
    }

    // === AI assists ===

    /// Professional rewrite of arbitrary text
    pub fn polish_text(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::validation("Nothing to polish."));
        }
        let polished = self.llm.generate_text(&prompts::polish_text(text), None)?;
        Ok(polished.trim().to_string())
    }

    /// Polish the summary in place
    pub fn polish_summary(&self) -> Result<ResumeData> {
        let summary = self.draft()?.summary;
        let polished = self.polish_text(&summary)?;
        self.edit(|data| {
            data.summary = polished;
            Ok(())
        })
    }

    /// Polish one experience description in place
    pub fn polish_experience(&self, index: usize) -> Result<ResumeData> {
        let draft = self.draft()?;
        check_index(index, draft.experience.len(), "Experience")?;
        let polished = self.polish_text(&draft.experience[index].description)?;
        self.edit(|data| {
            data.experience[index].description = polished;
            Ok(())
        })
    }

    /// Bullet points for a role at a company
    pub fn experience_points(&self, role: &str, company: &str) -> Result<String> {
        if role.trim().is_empty() || company.trim().is_empty() {
            return Err(Error::validation("Please enter a Role and Company first."));
        }
        let points = self
            .llm
            .generate_text(&prompts::experience_points(role.trim(), company.trim()), None)?;
        Ok(points.trim().to_string())
    }

    /// Generate bullet points for one experience entry
    ///
    /// An existing description is kept and the points are appended after a
    /// blank line.
    pub fn generate_experience_points(&self, index: usize) -> Result<ResumeData> {
        let draft = self.draft()?;
        check_index(index, draft.experience.len(), "Experience")?;
        let entry = &draft.experience[index];
        let points = self.experience_points(&entry.role, &entry.company)?;

        self.edit(|data| {
            let description = &mut data.experience[index].description;
            *description = if description.trim().is_empty() {
                points
            } else {
                format!("{}\n\n{}", description, points)
            };
            Ok(())
        })
    }

    /// Write the summary from the job title, skills and experience
    pub fn generate_summary(&self) -> Result<ResumeData> {
        let draft = self.draft()?;
        if draft.job_title.trim().is_empty() && draft.experience.is_empty() && draft.skills.trim().is_empty() {
            return Err(Error::validation(
                "Add a job title, skills or experience before generating a summary.",
            ));
        }
        let summary = self.llm.generate_text(
            &prompts::summary(&draft.experience, &draft.job_title, &draft.skills),
            None,
        )?;
        self.edit(|data| {
            data.summary = summary.trim().to_string();
            Ok(())
        })
    }
}

fn check_index(index: usize, len: usize, what: &str) -> Result<()> {
    if index >= len {
        return Err(Error::not_found(format!("{} #{} (have {})", what, index + 1, len)));
    }
    Ok(())
}
