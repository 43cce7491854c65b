//! Job search model

use serde::{Deserialize, Serialize};

use super::profile::{new_id, now_ms};

/// Experience levels offered by the search filters
pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Internship",
    "Entry Level",
    "Mid Level",
    "Senior Level",
    "Lead/Manager",
];

/// Location types offered by the search filters
pub const LOCATION_TYPES: &[&str] = &["Remote", "On-site", "Hybrid"];

/// Optional search refinements. Empty strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSearchFilters {
    pub company: String,
    pub salary: String,
    pub experience: String,
    pub location_type: String,
}

impl JobSearchFilters {
    pub fn is_empty(&self) -> bool {
        self.company.is_empty()
            && self.salary.is_empty()
            && self.experience.is_empty()
            && self.location_type.is_empty()
    }

    /// Append the active filters to a free-text query
    pub fn build_query(&self, query: &str) -> String {
        let mut criteria = Vec::new();
        if !self.company.is_empty() {
            criteria.push(format!("at {}", self.company));
        }
        if !self.salary.is_empty() {
            criteria.push(format!("with a salary around {}", self.salary));
        }
        if !self.experience.is_empty() {
            criteria.push(format!("suitable for {} level", self.experience));
        }
        if !self.location_type.is_empty() {
            criteria.push(format!("that are {}", self.location_type));
        }

        if criteria.is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, criteria.join(", "))
        }
    }
}

/// A web page the search tool grounded its answer on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Text answer plus its grounding sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSearchResult {
    pub query: String,
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// A job listing bookmarked on the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: String,
    pub title: String,
    pub uri: String,
    #[serde(default)]
    pub snippet: String,
    pub saved_at: i64,
}

impl SavedJob {
    pub fn from_source(source: &GroundingSource, snippet: &str) -> Self {
        Self {
            id: new_id(),
            title: source.title.clone(),
            uri: source.uri.clone(),
            snippet: snippet.to_string(),
            saved_at: now_ms(),
        }
    }
}
