//! Resume analyzer
//!
//! Loads resume text from a plain-text or PDF file and asks the model for
//! a structured review, optionally against a job description.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use crate::domain::result::{Error, Result};
use crate::domain::ResumeAnalysis;
use crate::ports::{generate_structured, LanguageModel};
use crate::prompts;

pub struct AnalyzerService {
    llm: Arc<dyn LanguageModel>,
}

impl AnalyzerService {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Read resume text from `.txt`, `.md` or `.pdf`
    pub fn load_resume_text(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let raw = match extension.as_str() {
            "pdf" => pdf_extract::extract_text(path).map_err(|e| {
                Error::validation(format!("Could not read text from {}: {}", path.display(), e))
            })?,
            "txt" | "md" | "text" | "" => std::fs::read_to_string(path)?,
            other => {
                return Err(Error::validation(format!(
                    "Unsupported file type '.{}'. Use a .pdf, .txt or .md file.",
                    other
                )))
            }
        };

        let text = normalize_text(&raw)?;
        if text.is_empty() {
            return Err(Error::validation(format!(
                "No text found in {}. Scanned PDFs are not supported.",
                path.display()
            )));
        }
        Ok(text)
    }

    /// Review a resume, as a match against `job_description` when one is given
    pub fn analyze(&self, resume_text: &str, job_description: Option<&str>) -> Result<ResumeAnalysis> {
        if resume_text.trim().is_empty() {
            return Err(Error::validation("Please provide your resume text."));
        }
        let job_description = job_description.map(str::trim).filter(|j| !j.is_empty());

        generate_structured(
            self.llm.as_ref(),
            &prompts::resume_analysis(resume_text.trim(), job_description),
            &prompts::resume_analysis_schema(),
        )
    }
}

/// Tidy extracted text: collapse runs of spaces, trim lines, keep at most
/// one blank line between paragraphs
pub fn normalize_text(raw: &str) -> Result<String> {
    let spaces = Regex::new(r"[ \t\u{00A0}]+").map_err(|e| Error::Other(e.to_string()))?;
    let blank_runs = Regex::new(r"\n{3,}").map_err(|e| Error::Other(e.to_string()))?;

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n").replace('\u{000C}', "\n");
    let lines = unified
        .lines()
        .map(|line| spaces.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(blank_runs.replace_all(&lines, "\n\n").trim().to_string())
}
