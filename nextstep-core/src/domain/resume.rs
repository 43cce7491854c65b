//! Resume domain model

use serde::{Deserialize, Serialize};

/// Resume form value
///
/// Stored as the profile's resume blob, as the local draft, and as each
/// entry of the edit history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub twitter: String,
    pub github: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    /// Comma-separated skill list, as typed by the user
    pub skills: String,
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    pub title: String,
    pub content: String,
}

impl Default for CustomSection {
    fn default() -> Self {
        Self {
            title: "Custom Section".to_string(),
            content: String::new(),
        }
    }
}

/// Scalar resume fields addressable by name from the editor
pub const EDITABLE_FIELDS: &[&str] = &[
    "fullName", "jobTitle", "email", "phone", "location", "website", "twitter", "github",
    "summary", "skills",
];

impl ResumeData {
    /// Resume seeded from a new account
    pub fn for_account(name: &str, email: &str) -> Self {
        Self {
            full_name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    /// Skills split on commas, trimmed, empties dropped
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Read a scalar field by its camelCase name
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "fullName" => &self.full_name,
            "jobTitle" => &self.job_title,
            "email" => &self.email,
            "phone" => &self.phone,
            "location" => &self.location,
            "website" => &self.website,
            "twitter" => &self.twitter,
            "github" => &self.github,
            "summary" => &self.summary,
            "skills" => &self.skills,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Set a scalar field by its camelCase name. Returns false for unknown fields.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "fullName" => &mut self.full_name,
            "jobTitle" => &mut self.job_title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "location" => &mut self.location,
            "website" => &mut self.website,
            "twitter" => &mut self.twitter,
            "github" => &mut self.github,
            "summary" => &mut self.summary,
            "skills" => &mut self.skills,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Fields a recruiter expects, as (name, present) pairs
    pub fn completeness(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("fullName", !self.full_name.trim().is_empty()),
            ("jobTitle", !self.job_title.trim().is_empty()),
            ("email", !self.email.trim().is_empty()),
            ("summary", !self.summary.trim().is_empty()),
            ("experience", !self.experience.is_empty()),
            ("education", !self.education.is_empty()),
            ("skills", !self.skill_list().is_empty()),
        ]
    }

    /// Percentage of `completeness` fields that are filled in
    pub fn completeness_percent(&self) -> u8 {
        let checks = self.completeness();
        let filled = checks.iter().filter(|(_, present)| *present).count();
        ((filled as f64 / checks.len() as f64) * 100.0).round() as u8
    }

    /// Required-field problems, keyed by field path
    pub fn validation_errors(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        if self.full_name.trim().is_empty() {
            errors.push(("fullName".to_string(), "Full name is required".to_string()));
        }
        if self.job_title.trim().is_empty() {
            errors.push(("jobTitle".to_string(), "Job title is required".to_string()));
        }
        if self.email.trim().is_empty() {
            errors.push(("email".to_string(), "Email is required".to_string()));
        } else if !looks_like_email(&self.email) {
            errors.push(("email".to_string(), "Email is not valid".to_string()));
        }
        for (i, exp) in self.experience.iter().enumerate() {
            if exp.company.trim().is_empty() {
                errors.push((format!("experience.{}.company", i), "Company is required".to_string()));
            }
            if exp.role.trim().is_empty() {
                errors.push((format!("experience.{}.role", i), "Role is required".to_string()));
            }
        }
        for (i, edu) in self.education.iter().enumerate() {
            if edu.school.trim().is_empty() {
                errors.push((format!("education.{}.school", i), "School is required".to_string()));
            }
            if edu.degree.trim().is_empty() {
                errors.push((format!("education.{}.degree", i), "Degree is required".to_string()));
            }
        }
        errors
    }

    /// Move a custom section up or down. Out-of-range moves are ignored.
    pub fn move_custom_section(&mut self, index: usize, direction: isize) -> bool {
        let new_index = index as isize + direction;
        if index >= self.custom_sections.len()
            || new_index < 0
            || new_index as usize >= self.custom_sections.len()
        {
            return false;
        }
        let section = self.custom_sections.remove(index);
        self.custom_sections.insert(new_index as usize, section);
        true
    }

    /// One-line profile used as context in generation prompts
    pub fn profile_line(&self) -> String {
        let (role, company) = self
            .experience
            .first()
            .map(|e| (e.role.as_str(), e.company.as_str()))
            .unwrap_or(("", ""));
        format!(
            "Name: {}, Skills: {}, Experience: {} at {}",
            self.full_name, self.skills, role, company
        )
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeData {
        ResumeData {
            full_name: "Alex Morgan".to_string(),
            job_title: "Senior Product Designer".to_string(),
            email: "alex.morgan@example.com".to_string(),
            skills: "Figma, Sketch, , Prototyping".to_string(),
            experience: vec![Experience {
                company: "TechFlow Inc.".to_string(),
                role: "Senior UI/UX Designer".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_json_uses_camel_case_and_tolerates_missing_fields() {
        let json = r#"{"fullName":"A","experience":[{"company":"C","role":"R","startDate":"2021"}]}"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.full_name, "A");
        assert_eq!(data.experience[0].start_date, "2021");
        assert!(data.education.is_empty());

        let back = serde_json::to_value(&data).unwrap();
        assert!(back.get("customSections").is_some());
    }

    #[test]
    fn test_skill_list() {
        assert_eq!(sample().skill_list(), vec!["Figma", "Sketch", "Prototyping"]);
    }

    #[test]
    fn test_field_access() {
        let mut data = sample();
        assert_eq!(data.field("jobTitle"), Some("Senior Product Designer"));
        assert!(data.set_field("summary", "Designer"));
        assert_eq!(data.summary, "Designer");
        assert!(!data.set_field("experience", "x"));
        assert_eq!(data.field("nope"), None);
    }

    #[test]
    fn test_validation_errors() {
        let mut data = sample();
        assert!(data.validation_errors().is_empty());

        data.email = "not-an-email".to_string();
        data.experience.push(Experience::default());
        let errors = data.validation_errors();
        let paths: Vec<_> = errors.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["email", "experience.1.company", "experience.1.role"]);
    }

    #[test]
    fn test_move_custom_section() {
        let mut data = sample();
        data.custom_sections = vec![
            CustomSection { title: "A".into(), content: String::new() },
            CustomSection { title: "B".into(), content: String::new() },
        ];
        assert!(data.move_custom_section(0, 1));
        assert_eq!(data.custom_sections[0].title, "B");
        assert!(!data.move_custom_section(0, -1));
        assert!(!data.move_custom_section(5, 1));
    }

    #[test]
    fn test_completeness_percent() {
        assert_eq!(ResumeData::default().completeness_percent(), 0);
        // name, title, email, experience, skills
        assert_eq!(sample().completeness_percent(), 71);
    }

    #[test]
    fn test_profile_line() {
        assert_eq!(
            sample().profile_line(),
            "Name: Alex Morgan, Skills: Figma, Sketch, , Prototyping, Experience: Senior UI/UX Designer at TechFlow Inc."
        );
    }
}
