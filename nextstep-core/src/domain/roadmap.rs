//! Learning roadmap model

use serde::{Deserialize, Serialize};

/// A generated learning plan. Regeneration replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    #[serde(default)]
    pub steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub skill_analysis: SkillAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapStep {
    pub title: String,
    pub duration: String,
    pub description: String,
    pub topics: Vec<String>,
    pub project_idea: String,
    pub prerequisites: Vec<String>,
    pub resources: Vec<LearningResource>,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillAnalysis {
    pub current_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub gap_skills: Vec<String>,
}

impl Roadmap {
    /// Reset every step to not completed (fresh plans start at zero)
    pub fn reset_progress(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
        }
    }

    /// Flip one step's completion. Returns the new state, or None when out of range.
    pub fn toggle_step(&mut self, index: usize) -> Option<bool> {
        let step = self.steps.get_mut(index)?;
        step.completed = !step.completed;
        Some(step.completed)
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Rounded completion percentage, 0 when there are no steps
    pub fn progress(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        ((self.completed_steps() as f64 / self.steps.len() as f64) * 100.0).round() as u8
    }
}

/// Self-assessed starting level for a roadmap request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(format!(
                "Unknown skill level: {}. Expected beginner, intermediate or advanced",
                other
            )),
        }
    }
}

/// Inputs for generating a roadmap
#[derive(Debug, Clone)]
pub struct RoadmapRequest {
    pub goal: String,
    pub skill_level: SkillLevel,
    /// Weekly time commitment, e.g. "5-10 hours"
    pub time_availability: String,
    /// Preferred learning styles, e.g. "Videos", "Projects"
    pub learning_preferences: Vec<String>,
}

/// Badge label for a resource type
pub fn resource_badge(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "video" => "VIDEO",
        "article" => "ARTICLE",
        "course" => "COURSE",
        "documentation" => "DOCS",
        _ => "LINK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roadmap(n: usize) -> Roadmap {
        Roadmap {
            steps: (0..n)
                .map(|i| RoadmapStep {
                    title: format!("Step {}", i),
                    ..Default::default()
                })
                .collect(),
            skill_analysis: SkillAnalysis::default(),
        }
    }

    #[test]
    fn test_progress() {
        let mut map = roadmap(3);
        assert_eq!(map.progress(), 0);
        map.toggle_step(0);
        assert_eq!(map.progress(), 33);
        map.toggle_step(1);
        assert_eq!(map.progress(), 67);
        assert_eq!(Roadmap::default().progress(), 0);
    }

    #[test]
    fn test_toggle_step_is_independent() {
        let mut map = roadmap(2);
        assert_eq!(map.toggle_step(1), Some(true));
        assert!(!map.steps[0].completed);
        assert_eq!(map.toggle_step(1), Some(false));
        assert_eq!(map.toggle_step(2), None);
    }

    #[test]
    fn test_parse_llm_shape() {
        let json = r#"{
            "steps": [{"title": "Basics", "duration": "2 Weeks", "description": "d",
                       "topics": ["SQL"], "projectIdea": "p", "prerequisites": [],
                       "resources": [{"type": "Video", "title": "t", "url": "https://x"}]}],
            "skillAnalysis": {"currentSkills": ["Excel"], "requiredSkills": ["SQL"], "gapSkills": ["SQL"]}
        }"#;
        let map: Roadmap = serde_json::from_str(json).unwrap();
        assert!(!map.steps[0].completed);
        assert_eq!(map.steps[0].resources[0].kind, "Video");
        assert_eq!(map.skill_analysis.gap_skills, vec!["SQL"]);
    }

    #[test]
    fn test_skill_level_parse() {
        assert_eq!("ADVANCED".parse::<SkillLevel>().unwrap(), SkillLevel::Advanced);
        assert!("expert".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_resource_badge() {
        assert_eq!(resource_badge("Course"), "COURSE");
        assert_eq!(resource_badge("podcast"), "LINK");
    }
}
