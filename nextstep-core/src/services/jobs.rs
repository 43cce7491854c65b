//! Job search
//!
//! Filters and the last result set are kept in local storage so a listing
//! can be bookmarked by its number in a later command.

use std::sync::Arc;

use crate::domain::jobs::{EXPERIENCE_LEVELS, LOCATION_TYPES};
use crate::domain::result::{Error, Result};
use crate::domain::{JobSearchFilters, JobSearchResult, SavedJob};
use crate::ports::storage::keys;
use crate::ports::{get_json, set_json, KeyValueStore, LanguageModel};
use crate::services::ProfileService;

/// Outcome of bookmarking a search result
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    Saved(SavedJob),
    AlreadySaved(SavedJob),
}

pub struct JobSearchService {
    store: Arc<dyn KeyValueStore>,
    llm: Arc<dyn LanguageModel>,
    profiles: ProfileService,
}

impl JobSearchService {
    pub fn new(store: Arc<dyn KeyValueStore>, llm: Arc<dyn LanguageModel>, profiles: ProfileService) -> Self {
        Self { store, llm, profiles }
    }

    pub fn filters(&self) -> Result<JobSearchFilters> {
        Ok(get_json(self.store.as_ref(), keys::JOB_SEARCH_FILTERS)?.unwrap_or_default())
    }

    /// Persist filters. Experience and location must be one of the offered options.
    pub fn set_filters(&self, filters: &JobSearchFilters) -> Result<()> {
        let filters = JobSearchFilters {
            company: filters.company.trim().to_string(),
            salary: filters.salary.trim().to_string(),
            experience: canonical_option(&filters.experience, EXPERIENCE_LEVELS, "experience level")?,
            location_type: canonical_option(&filters.location_type, LOCATION_TYPES, "location type")?,
        };
        set_json(self.store.as_ref(), keys::JOB_SEARCH_FILTERS, &filters)
    }

    pub fn clear_filters(&self) -> Result<()> {
        self.store.remove(keys::JOB_SEARCH_FILTERS)
    }

    /// Search listings for `query` refined by the stored filters
    pub fn search(&self, query: &str) -> Result<JobSearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Please enter a job title or keyword."));
        }

        let full_query = self.filters()?.build_query(query);
        let mut result = self.llm.search_jobs(&full_query)?;
        result.query = full_query;
        set_json(self.store.as_ref(), keys::JOB_SEARCH_RESULTS, &result)?;
        Ok(result)
    }

    pub fn last_results(&self) -> Result<Option<JobSearchResult>> {
        get_json(self.store.as_ref(), keys::JOB_SEARCH_RESULTS)
    }

    /// Bookmark source number `index` (0-based) of the last search
    pub fn save_result(&self, index: usize) -> Result<SaveOutcome> {
        let results = self
            .last_results()?
            .ok_or_else(|| Error::not_found("No search results. Run 'nextstep jobs search' first."))?;
        let source = results.sources.get(index).ok_or_else(|| {
            Error::not_found(format!("Result #{} (last search has {})", index + 1, results.sources.len()))
        })?;

        let job = SavedJob::from_source(source, &results.query);
        if self.profiles.add_saved_job(job.clone())? {
            Ok(SaveOutcome::Saved(job))
        } else {
            let existing = self
                .saved_jobs()?
                .into_iter()
                .find(|j| j.uri == source.uri)
                .unwrap_or(job);
            Ok(SaveOutcome::AlreadySaved(existing))
        }
    }

    pub fn saved_jobs(&self) -> Result<Vec<SavedJob>> {
        Ok(self.profiles.require_current()?.saved_jobs)
    }

    pub fn remove_saved(&self, id: &str) -> Result<SavedJob> {
        self.profiles.remove_saved_job(id)
    }
}

/// Match a filter value case-insensitively against the offered options
fn canonical_option(value: &str, options: &[&str], what: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(value))
        .map(|o| o.to_string())
        .ok_or_else(|| Error::validation(format!("Unknown {} '{}'. Choose one of: {}", what, value, options.join(", "))))
}
