//! Analyze command - AI resume review, optionally against a job description

use std::path::PathBuf;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use nextstep_core::domain::analysis::ScoreBand;
use nextstep_core::{LogEvent, ResumeAnalysis};

use super::{get_context, get_logger, log_event};
use crate::output;

fn score_label(analysis: &ResumeAnalysis) -> ColoredString {
    let text = format!("{}/100", analysis.score);
    match analysis.score_band() {
        ScoreBand::Strong => text.green().bold(),
        ScoreBand::Fair => text.yellow().bold(),
        ScoreBand::Weak => text.red().bold(),
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold());
    for item in items {
        println!("  - {}", item);
    }
}

pub fn run(
    file: PathBuf,
    job_description: Option<String>,
    job_description_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let service = &ctx.analyzer_service;

    let resume_text = service.load_resume_text(&file)?;
    let job_description = match job_description_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => job_description,
    };

    let pb = output::spinner("Analyzing your resume...", json);
    let result = service.analyze(&resume_text, job_description.as_deref());
    pb.finish_and_clear();

    let analysis = match result {
        Ok(a) => a,
        Err(e) => {
            log_event(
                &get_logger(),
                LogEvent::new("resume_analysis_failed")
                    .with_feature("analyzer")
                    .with_error(e.to_string()),
            );
            return Err(e.into());
        }
    };
    log_event(&get_logger(), LogEvent::new("resume_analyzed").with_feature("analyzer"));

    if json {
        return output::print_json(&analysis);
    }

    let heading = if job_description.is_some() { "Match score" } else { "ATS score" };
    println!("{}: {}", heading.bold(), score_label(&analysis));

    print_list("Strengths", &analysis.strengths);
    print_list("Weaknesses", &analysis.weaknesses);

    if !analysis.suggestions.trim().is_empty() {
        println!();
        println!("{}", "Suggestions".bold());
        println!("{}", analysis.suggestions.trim());
    }

    let keywords = &analysis.keyword_analysis;
    if !keywords.matched_keywords.is_empty() || !keywords.missing_keywords.is_empty() {
        println!();
        println!("{}", "Keywords".bold());
        println!("  Matched: {}", keywords.matched_keywords.join(", ").green());
        println!("  Missing: {}", keywords.missing_keywords.join(", ").red());
    }

    print_list("Missing skills", &analysis.skill_gap_analysis.missing_skills);

    if !analysis.course_recommendations.is_empty() {
        println!();
        println!("{}", "Courses".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Course", "Platform", "Link"]);
        for course in &analysis.course_recommendations {
            table.add_row(vec![&course.course_title, &course.platform, &course.url]);
        }
        println!("{}", table);
    }

    print_list("Roles to consider", &analysis.job_recommendations);

    let in_depth = &analysis.in_depth_analysis;
    print_list("Certifications", &in_depth.recommended_certifications);
    let path = &in_depth.career_roadmap;
    if !path.career_progression.is_empty() {
        println!();
        println!("{} ({})", "Career path".bold(), path.difficulty);
        println!("{}", path.career_progression);
        if !path.essential_skills.is_empty() {
            println!("  Essential: {}", path.essential_skills.join(", "));
        }
        if !path.supplementary_skills.is_empty() {
            println!("  Supplementary: {}", path.supplementary_skills.join(", "));
        }
    }
    print_list(
        "Underrepresented keywords",
        &in_depth.keyword_optimization.underrepresented_keywords,
    );
    if !in_depth.experience_reframing_advice.is_empty() {
        println!();
        println!("{}", "Reframing your experience".bold());
        println!("{}", in_depth.experience_reframing_advice);
    }

    Ok(())
}
