//! Career coach chat
//!
//! Sessions are stored on the profile. The first message of a new
//! conversation gets a short model-written title; replies stream chunk by
//! chunk to the caller and the finished session is saved once at the end.

use std::sync::Arc;

use crate::domain::chat::{clean_title, sorted_newest_first};
use crate::domain::result::{Error, Result};
use crate::domain::{ChatMessage, ChatSession};
use crate::ports::LanguageModel;
use crate::prompts;
use crate::services::ProfileService;

/// Reply shown when the model could not be reached
pub const CONNECTION_TROUBLE: &str = "I'm having trouble connecting. Please try again.";

/// Result of one coach turn
#[derive(Debug, Clone)]
pub struct CoachReply {
    pub session: ChatSession,
    pub reply: String,
    /// The stream failed and `reply` is the fallback message
    pub failed: bool,
}

pub struct CoachService {
    llm: Arc<dyn LanguageModel>,
    profiles: ProfileService,
}

impl CoachService {
    pub fn new(llm: Arc<dyn LanguageModel>, profiles: ProfileService) -> Self {
        Self { llm, profiles }
    }

    pub fn sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(sorted_newest_first(&self.profiles.require_current()?.chat_sessions))
    }

    pub fn session(&self, id: &str) -> Result<ChatSession> {
        self.profiles
            .require_current()?
            .chat_sessions
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found(format!("Chat session {}", id)))
    }

    pub fn delete_session(&self, id: &str) -> Result<ChatSession> {
        self.profiles.remove_chat_session(id)
    }

    pub fn suggested_prompts(&self) -> &'static [&'static str] {
        prompts::COACH_SUGGESTED_PROMPTS
    }

    /// Send a message, in `session_id` or in a new session when `None`
    ///
    /// `on_chunk` receives reply text as it arrives. A failed stream turns
    /// the reply into `CONNECTION_TROUBLE`; the session is saved either way.
    pub fn send<F>(&self, session_id: Option<&str>, message: &str, mut on_chunk: F) -> Result<CoachReply>
    where
        F: FnMut(&str),
    {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::validation("Message cannot be empty."));
        }

        let mut session = match session_id {
            Some(id) => {
                let mut session = self.session(id)?;
                session.messages.push(ChatMessage::user(message));
                session
            }
            None => {
                self.profiles.require_current()?;
                ChatSession::start(self.title_for(message), ChatMessage::user(message))
            }
        };

        let history = &session.messages[..session.messages.len() - 1];
        let mut reply = String::new();
        let mut failed = false;

        match self
            .llm
            .chat_stream(history, message, prompts::COACH_SYSTEM_INSTRUCTION)
        {
            Ok(stream) => {
                for chunk in stream {
                    match chunk {
                        Ok(text) => {
                            on_chunk(&text);
                            reply.push_str(&text);
                        }
                        Err(_) => {
                            failed = true;
                            break;
                        }
                    }
                }
            }
            Err(_) => failed = true,
        }

        if failed {
            reply = CONNECTION_TROUBLE.to_string();
        }

        session.messages.push(ChatMessage::model(reply.clone()));
        self.profiles.upsert_chat_session(session.clone())?;

        Ok(CoachReply { session, reply, failed })
    }

    /// Short title for a new session; "New Chat" when the model fails
    fn title_for(&self, first_message: &str) -> String {
        match self.llm.generate_text(&prompts::session_title(first_message), None) {
            Ok(raw) => clean_title(&raw),
            Err(_) => clean_title(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::COACH_GREETING;
    use crate::domain::ChatRole;
    use crate::services::testing::{logged_in_accounts, memory_accounts, ScriptedModel};

    fn service() -> (CoachService, Arc<ScriptedModel>) {
        let (accounts, _) = logged_in_accounts();
        let llm = Arc::new(ScriptedModel::new());
        (CoachService::new(llm.clone(), ProfileService::new(accounts)), llm)
    }

    #[test]
    fn test_first_message_creates_titled_session() {
        let (service, llm) = service();
        llm.push_text("\"Salary Negotiation Tips\"");
        llm.push_chat(&["Start ", "high."]);

        let mut streamed = Vec::new();
        let reply = service
            .send(None, "How do I negotiate salary?", |c| streamed.push(c.to_string()))
            .unwrap();

        assert_eq!(streamed, vec!["Start ", "high."]);
        assert_eq!(reply.reply, "Start high.");
        assert!(!reply.failed);
        assert_eq!(reply.session.title, "Salary Negotiation Tips");

        let messages = &reply.session.messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text, COACH_GREETING);
        assert_eq!(messages[2].role, ChatRole::Model);

        // History sent to the model excludes the new user message
        let history = &llm.chat_histories()[0];
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, COACH_GREETING);

        assert_eq!(service.sessions().unwrap().len(), 1);
    }

    #[test]
    fn test_title_falls_back() {
        let (service, llm) = service();
        llm.push_text_error();
        llm.push_chat(&["ok"]);
        let reply = service.send(None, "Hi", |_| {}).unwrap();
        assert_eq!(reply.session.title, "New Chat");
    }

    #[test]
    fn test_follow_up_appends_to_session() {
        let (service, llm) = service();
        llm.push_text("Interviews");
        llm.push_chat(&["First answer"]);
        let first = service.send(None, "Help me prep", |_| {}).unwrap();

        llm.push_chat(&["Second answer"]);
        let second = service.send(Some(&first.session.id), "More please", |_| {}).unwrap();

        assert_eq!(second.session.id, first.session.id);
        assert_eq!(second.session.messages.len(), 5);
        assert_eq!(llm.chat_histories()[1].len(), 4);

        let stored = service.session(&first.session.id).unwrap();
        assert_eq!(stored.messages.last().unwrap().text, "Second answer");
        assert_eq!(service.sessions().unwrap().len(), 1);
    }

    #[test]
    fn test_stream_failure_uses_fallback_and_saves() {
        let (service, llm) = service();
        llm.push_text("Title");
        llm.push_chat_broken(&["partial"]);

        let reply = service.send(None, "Hello", |_| {}).unwrap();
        assert!(reply.failed);
        assert_eq!(reply.reply, CONNECTION_TROUBLE);

        let stored = service.session(&reply.session.id).unwrap();
        assert_eq!(stored.messages.last().unwrap().text, CONNECTION_TROUBLE);
    }

    #[test]
    fn test_unknown_session_and_auth() {
        let (service, _) = service();
        assert!(matches!(service.send(Some("nope"), "Hi", |_| {}), Err(Error::NotFound(_))));
        assert!(matches!(service.send(None, "   ", |_| {}), Err(Error::Validation(_))));

        let (accounts, _) = memory_accounts();
        let llm = Arc::new(ScriptedModel::new());
        let anonymous = CoachService::new(llm.clone(), ProfileService::new(accounts));
        assert!(matches!(anonymous.send(None, "Hi", |_| {}), Err(Error::NotAuthenticated)));
        assert!(llm.prompts().is_empty());
    }

    #[test]
    fn test_delete_session() {
        let (service, llm) = service();
        llm.push_text("A");
        llm.push_chat(&["a"]);
        let a = service.send(None, "a", |_| {}).unwrap();
        llm.push_text("B");
        llm.push_chat(&["b"]);
        service.send(None, "b", |_| {}).unwrap();

        service.delete_session(&a.session.id).unwrap();
        let remaining = service.sessions().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "B");
    }
}
