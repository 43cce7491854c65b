//! Mock interview
//!
//! A live, in-memory conversation: the model plays the interviewer, asks
//! one question at a time, and scores the whole transcript at the end.
//! Nothing is persisted.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{ChatMessage, ChatRole, InterviewFeedback};
use crate::ports::{generate_structured, LanguageModel};
use crate::prompts;

pub struct MockInterview {
    llm: Arc<dyn LanguageModel>,
    role: String,
    conversation: Vec<ChatMessage>,
}

impl MockInterview {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            role: String::new(),
            conversation: Vec::new(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn is_started(&self) -> bool {
        !self.role.is_empty()
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    /// Begin an interview for `role`. Returns the interviewer's opening question.
    ///
    /// Starting again discards the previous conversation.
    pub fn start(&mut self, role: &str) -> Result<String> {
        let role = role.trim();
        if role.is_empty() {
            return Err(Error::validation("Please enter a job role to practice for."));
        }

        let question = self.llm.generate_text(&prompts::interview_start(role), None)?;
        self.role = role.to_string();
        self.conversation = vec![ChatMessage::model(question.trim())];
        Ok(question.trim().to_string())
    }

    /// Answer the current question. Returns the next question.
    ///
    /// If the model call fails the answer stays in the transcript.
    pub fn reply(&mut self, answer: &str) -> Result<String> {
        if !self.is_started() {
            return Err(Error::validation("The interview has not started yet."));
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(Error::validation("Answer cannot be empty."));
        }

        self.conversation.push(ChatMessage::user(answer));
        let next = self
            .llm
            .generate_text(&prompts::interview_reply(&self.role, &self.transcript()), None)?;
        self.conversation.push(ChatMessage::model(next.trim()));
        Ok(next.trim().to_string())
    }

    /// Score the interview so far
    pub fn finish(&self) -> Result<InterviewFeedback> {
        if !self.conversation.iter().any(|m| m.role == ChatRole::User) {
            return Err(Error::validation("Answer at least one question before ending the interview."));
        }
        generate_structured(
            self.llm.as_ref(),
            &prompts::interview_feedback(&self.role, &self.transcript()),
            &prompts::interview_feedback_schema(),
        )
    }

    /// Conversation as "Interviewer:" / "Candidate:" lines
    pub fn transcript(&self) -> String {
        self.conversation
            .iter()
            .map(|m| {
                let speaker = match m.role {
                    ChatRole::User => "Candidate",
                    ChatRole::Model => "Interviewer",
                };
                format!("{}: {}", speaker, m.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
