//! Prompt builders and response schemas
//!
//! Every piece of text sent to the language model is assembled here so the
//! services only deal with typed inputs and outputs. Schemas use the
//! Gemini OpenAPI subset (uppercase type names).

use serde_json::{json, Value as JsonValue};

use crate::domain::{Experience, RoadmapRequest};

/// Fallback profile line when the user has no resume yet
pub const FALLBACK_PROFILE: &str = "A motivated professional.";

/// System instruction for the career coach chat
pub const COACH_SYSTEM_INSTRUCTION: &str = "You are NextStep, an expert AI Career Coach. \
Your persona is exceptionally direct, sharp, and focused on tangible results. \
Do not use fluff or vague encouragement. Your single most important goal is to give users \
concrete, actionable steps to advance their career. **Your response format is non-negotiable:** \
When a user asks for advice, you MUST break it down into a numbered or bulleted list of specific, \
clear actions they can take immediately. Your tone should be that of a firm but fair mentor who \
pushes for excellence and tangible outcomes. Avoid generalities at all costs. \
Every piece of advice must be a concrete step.";

/// Conversation starters offered by the coach
pub const COACH_SUGGESTED_PROMPTS: &[&str] = &[
    "How do I negotiate my salary?",
    "Review my elevator pitch",
    "What are common interview questions for...",
    "How to switch careers to tech?",
    "Tips for remote work productivity",
];

/// Cover letter tones offered by the generator, with a one-line description
pub const COVER_LETTER_TONES: &[(&str, &str)] = &[
    ("Professional", "A formal, respectful, and standard tone for most applications."),
    ("Enthusiastic", "Showcases genuine excitement and passion for the role."),
    ("Confident", "Assertive and self-assured, ideal for leadership positions."),
    ("Creative", "Original and imaginative, for roles in design or marketing."),
    ("Personable", "Friendly and approachable, great for sales or support roles."),
];

// === Resume builder ===

pub fn polish_text(text: &str) -> String {
    format!(
        "Rewrite the following text to be more professional, clear, and concise. \
Fix any grammar or spelling mistakes. Return only the improved text, without any preamble \
or surrounding quotes.\n\nOriginal Text:\n---\n{}\n---\n",
        text
    )
}

pub fn experience_points(role: &str, company: &str) -> String {
    format!(
        "Write 3-4 professional, achievement-oriented bullet points for a resume experience section.\n\
Role: {}\nCompany: {}\n\nFocus on metrics and impact. Return only the bullet points (starting with •). \
Do not include any intro or outro.",
        role, company
    )
}

pub fn summary(experience: &[Experience], job_title: &str, skills: &str) -> String {
    let highlights = experience
        .iter()
        .map(|e| format!("- {} at {}", e.role, e.company))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Based on the following career details, write a compelling and professional summary for a resume. \
It should be a concise paragraph of 2-4 sentences.\n\nDetails:\n\
- Current/Target Job Title: {}\n- Key Skills: {}\n- Experience Highlights:\n{}\n\n\
Return ONLY the summary text, without any preamble or surrounding quotes.",
        job_title, skills, highlights
    )
}

// === Job search ===

pub fn job_search(query: &str) -> String {
    format!(
        "Find real-time job listings for: {}. \n\
Provide a list of 5-10 jobs. For each job, list the Title, Company, Location, and a brief description.\n\
Explicitly mention \"Apply Link\" if found in the grounding.",
        query
    )
}

// === Career coach ===

pub fn session_title(first_message: &str) -> String {
    format!(
        "Summarize this user's question into a short title (5 words or less): \"{}\"",
        first_message
    )
}

// === Resume analyzer ===

pub fn resume_analysis(resume_text: &str, job_description: Option<&str>) -> String {
    let jd = job_description.map(str::trim).filter(|j| !j.is_empty());

    let comparison = match jd {
        Some(jd) => format!("\nJob Description for Comparison:\n---\n{}\n---\n", jd),
        None => String::new(),
    };
    let score = if jd.is_some() {
        "A \"Match Score\" out of 100 based on skill and keyword alignment with the job description."
    } else {
        "A general \"ATS Score\" out of 100 based on formatting, clarity, and best practices."
    };
    let keywords = if jd.is_some() {
        "Compare resume against the job description. Extract the 5-7 most important matched and missing keywords."
    } else {
        "Return empty arrays for matchedKeywords and missingKeywords as no job description was provided."
    };
    let skills = if jd.is_some() {
        "Analyze skills from the resume and job description. Populate \"userSkills\" with skills found in the resume, \
and \"missingSkills\" with important skills from the job description that are not in the resume."
    } else {
        "Populate \"userSkills\" with skills extracted from the resume. For \"missingSkills\", suggest 3-5 general \
technical or soft skills that would complement the user's profile."
    };

    format!(
        "Analyze the following resume and provide a detailed review in JSON format.\n\n\
Resume Text:\n---\n{resume}\n---\n{comparison}\n\
Please analyze the resume and return a JSON object with the following structure:\n\
1.  **score**: {score}\n\
2.  **strengths**: 3-4 bullet points on what the resume does well.\n\
3.  **weaknesses**: 3-4 bullet points on what needs improvement.\n\
4.  **suggestions**: A concise, actionable paragraph summarizing the most important changes.\n\
5.  **keywordAnalysis**: {keywords}\n\
6.  **skillGapAnalysis**: {skills}\n\
7.  **courseRecommendations**: Based on the analysis, suggest 2-3 specific online courses. For each, provide the course title, \
the platform (e.g., \"Coursera\", \"edX\", \"Udemy\"), and a real, direct URL to the course page.\n\
8.  **jobRecommendations**: Based on the skills and experience in the resume, suggest 3-5 alternative job titles the candidate \
might be qualified for.\n\
9.  **inDepthAnalysis**: Provide a detailed career-focused analysis.\n\
    - **recommendedCertifications**: List 5-6 popular, real-world certifications.\n\
    - **careerRoadmap**: Create a personalized learning path with essential and supplementary skills, and a potential 5-year career progression.\n\
    - **keywordOptimization**: List 10-15 crucial, underrepresented keywords.\n\
    - **experienceReframingAdvice**: Provide a detailed paragraph explaining how to re-word project descriptions to focus on \
data analysis, insights, and impact, rather than just development tasks.\n",
        resume = resume_text,
        comparison = comparison,
        score = score,
        keywords = keywords,
        skills = skills,
    )
}

pub fn resume_analysis_schema() -> JsonValue {
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "description": "Overall score out of 100." },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Positive aspects of the resume." },
            "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "Areas for improvement." },
            "suggestions": { "type": "STRING", "description": "A summary of actionable advice." },
            "keywordAnalysis": {
                "type": "OBJECT",
                "properties": { "matchedKeywords": strings, "missingKeywords": strings },
                "required": ["matchedKeywords", "missingKeywords"]
            },
            "skillGapAnalysis": {
                "type": "OBJECT",
                "properties": { "userSkills": strings, "missingSkills": strings },
                "required": ["userSkills", "missingSkills"]
            },
            "courseRecommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "courseTitle": { "type": "STRING" },
                        "platform": { "type": "STRING", "description": "The platform offering the course (e.g., Coursera, edX, Udemy)." },
                        "url": { "type": "STRING", "description": "A direct, real URL to the course page." }
                    },
                    "required": ["courseTitle", "platform", "url"]
                }
            },
            "jobRecommendations": strings,
            "inDepthAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "recommendedCertifications": strings,
                    "careerRoadmap": {
                        "type": "OBJECT",
                        "properties": {
                            "difficulty": { "type": "STRING" },
                            "essentialSkills": strings,
                            "supplementarySkills": strings,
                            "careerProgression": { "type": "STRING" }
                        },
                        "required": ["difficulty", "essentialSkills", "supplementarySkills", "careerProgression"]
                    },
                    "keywordOptimization": {
                        "type": "OBJECT",
                        "properties": { "underrepresentedKeywords": strings },
                        "required": ["underrepresentedKeywords"]
                    },
                    "experienceReframingAdvice": { "type": "STRING" }
                },
                "required": ["recommendedCertifications", "careerRoadmap", "keywordOptimization", "experienceReframingAdvice"]
            }
        },
        "required": [
            "score", "strengths", "weaknesses", "suggestions", "keywordAnalysis",
            "skillGapAnalysis", "courseRecommendations", "jobRecommendations", "inDepthAnalysis"
        ]
    })
}

// === Roadmap ===

pub fn roadmap(request: &RoadmapRequest, current_skills: &str) -> String {
    let skills = if current_skills.trim().is_empty() {
        "No skills listed"
    } else {
        current_skills
    };
    format!(
        "Create a highly personalized, detailed learning roadmap for a user.\n\n\
User Profile:\n\
- Target Role: {goal}\n\
- Current Skill Level: {level}\n\
- Current Skills (from resume): \"{skills}\"\n\
- Weekly Time Commitment: {time}\n\
- Preferred Learning Style: {style}\n\n\
Please return a JSON object with two main keys:\n\
1. \"steps\": An array of 4-6 sequential learning steps. Each step must contain:\n\
  - title: The name of the milestone.\n\
  - duration: An estimated duration (e.g., \"2 Weeks\") based on the user's time commitment.\n\
  - description: A detailed breakdown of what to learn, structured into weekly actionable tasks.\n\
  - topics: An array of key topics to cover.\n\
  - projectIdea: A concrete, small project to apply the learned skills.\n\
  - prerequisites: A list of skills or concepts that should be understood before starting this step.\n\
  - resources: An array of 2-3 specific, high-quality learning resources (like articles, videos, or courses). \
Each resource must have a 'type', 'title', and a real, working 'url'. Prioritize free resources that match the user's learning style.\n\n\
2. \"skillAnalysis\": An object performing a skill gap analysis, containing three arrays of strings:\n\
  - \"currentSkills\": The skills the user already has.\n\
  - \"requiredSkills\": A list of the most important skills for the target role.\n\
  - \"gapSkills\": The skills from \"requiredSkills\" that are missing from the user's \"currentSkills\".",
        goal = request.goal,
        level = request.skill_level.as_str(),
        skills = skills,
        time = request.time_availability,
        style = request.learning_preferences.join(", "),
    )
}

pub fn roadmap_schema() -> JsonValue {
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "duration": { "type": "STRING" },
                        "description": { "type": "STRING", "description": "Detailed description of what to learn. Break this down into weekly actionable tasks based on the user's time commitment." },
                        "topics": strings,
                        "projectIdea": { "type": "STRING", "description": "A concrete, small project idea to practice these skills." },
                        "prerequisites": strings,
                        "resources": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "type": { "type": "STRING", "description": "e.g., 'Video', 'Article', 'Course', 'Documentation'" },
                                    "title": { "type": "STRING" },
                                    "url": { "type": "STRING" }
                                },
                                "required": ["type", "title", "url"]
                            }
                        }
                    },
                    "required": ["title", "duration", "description", "topics", "projectIdea", "prerequisites", "resources"]
                }
            },
            "skillAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "currentSkills": strings,
                    "requiredSkills": strings,
                    "gapSkills": strings
                },
                "required": ["currentSkills", "requiredSkills", "gapSkills"]
            }
        },
        "required": ["steps", "skillAnalysis"]
    })
}

// === Mock interview ===

pub fn interview_start(role: &str) -> String {
    format!(
        "Act as a strict but fair technical interviewer for a {} position. Start by introducing yourself \
and asking the first question. Keep your responses concise (under 3 sentences) and ask one question at a time.",
        role
    )
}

pub fn interview_reply(role: &str, transcript: &str) -> String {
    format!(
        "You are conducting an interview for a {}.\nHistory:\n{}\n\n\
Respond as the interviewer. Evaluate the candidate's last answer implicitly, maybe give a tiny hint of feedback, \
then ask the next relevant question. Keep it short.",
        role, transcript
    )
}

pub fn interview_feedback(role: &str, transcript: &str) -> String {
    format!(
        "Analyze this interview transcript for a {} role. Provide scores out of 10 and detailed feedback.\n\
Transcript: {}",
        role, transcript
    )
}

pub fn interview_feedback_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "technicalScore": { "type": "INTEGER" },
            "communicationScore": { "type": "INTEGER" },
            "strengths": { "type": "STRING" },
            "improvements": { "type": "STRING" }
        },
        "required": ["technicalScore", "communicationScore", "strengths", "improvements"]
    })
}

// === Cover letters ===

pub fn cover_letter(tone: &str, job_title: &str, company: &str, profile: &str, job_description: &str) -> String {
    format!(
        "Write a {tone} cover letter for a {job_title} position at {company}.\n\n\
My Profile: {profile}\n\n\
Job Description Key Points:\n{job_description}\n\n\
Ensure the tone is strictly {tone}. Keep it under 300 words. Use [Placeholders] only if necessary info is missing.",
        tone = tone,
        job_title = job_title,
        company = company,
        profile = profile,
        job_description = job_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkillLevel;

    #[test]
    fn test_analysis_prompt_switches_on_job_description() {
        let general = resume_analysis("My resume", None);
        assert!(general.contains("ATS Score"));
        assert!(!general.contains("Job Description for Comparison"));

        let matched = resume_analysis("My resume", Some("Needs SQL"));
        assert!(matched.contains("Match Score"));
        assert!(matched.contains("Needs SQL"));

        // Whitespace-only description counts as absent
        assert!(resume_analysis("My resume", Some("  ")).contains("ATS Score"));
    }

    #[test]
    fn test_summary_lists_experience() {
        let experience = vec![Experience {
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }];
        let prompt = summary(&experience, "Lead Engineer", "Rust");
        assert!(prompt.contains("- Engineer at Acme"));
        assert!(prompt.contains("Current/Target Job Title: Lead Engineer"));
    }

    #[test]
    fn test_roadmap_prompt_defaults_skills() {
        let request = RoadmapRequest {
            goal: "Data Analyst".to_string(),
            skill_level: SkillLevel::Beginner,
            time_availability: "5-10 hours/week".to_string(),
            learning_preferences: vec!["Videos".to_string(), "Projects".to_string()],
        };
        let prompt = roadmap(&request, "");
        assert!(prompt.contains("\"No skills listed\""));
        assert!(prompt.contains("Preferred Learning Style: Videos, Projects"));
    }

    #[test]
    fn test_schemas_use_uppercase_types() {
        assert_eq!(resume_analysis_schema()["type"], "OBJECT");
        assert_eq!(roadmap_schema()["properties"]["steps"]["type"], "ARRAY");
        assert_eq!(interview_feedback_schema()["properties"]["technicalScore"]["type"], "INTEGER");
    }

    #[test]
    fn test_cover_letter_prompt() {
        let prompt = cover_letter("Formal", "Analyst", "Acme", FALLBACK_PROFILE, "SQL");
        assert!(prompt.starts_with("Write a Formal cover letter for a Analyst position at Acme."));
        assert!(prompt.contains("Ensure the tone is strictly Formal."));
    }
}
