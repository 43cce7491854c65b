//! Structured AI review results

use serde::{Deserialize, Serialize};

/// Resume review returned by the analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    /// Match score against a job description, or a general ATS score
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: String,
    pub keyword_analysis: KeywordAnalysis,
    pub skill_gap_analysis: SkillGapAnalysis,
    pub course_recommendations: Vec<CourseRecommendation>,
    pub job_recommendations: Vec<String>,
    pub in_depth_analysis: InDepthAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordAnalysis {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGapAnalysis {
    pub user_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecommendation {
    pub course_title: String,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InDepthAnalysis {
    pub recommended_certifications: Vec<String>,
    pub career_roadmap: CareerPath,
    pub keyword_optimization: KeywordOptimization,
    pub experience_reframing_advice: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerPath {
    pub difficulty: String,
    pub essential_skills: Vec<String>,
    pub supplementary_skills: Vec<String>,
    pub career_progression: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordOptimization {
    pub underrepresented_keywords: Vec<String>,
}

/// Score band used when rendering a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ResumeAnalysis {
    pub fn score_band(&self) -> ScoreBand {
        match self.score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Weak,
        }
    }
}

/// Scored feedback at the end of a mock interview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewFeedback {
    /// Out of 10
    pub technical_score: u32,
    /// Out of 10
    pub communication_score: u32,
    pub strengths: String,
    pub improvements: String,
}
