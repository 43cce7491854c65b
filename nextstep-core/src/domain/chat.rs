//! Career coach chat model

use serde::{Deserialize, Serialize};

use super::profile::{new_id, now_ms};

/// Greeting every new coach session starts with
pub const COACH_GREETING: &str = "Hello! I am your AI Career Coach. How can I assist you today?";

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_html: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            display_html: None,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            display_html: None,
        }
    }
}

/// A titled conversation with the coach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Session seeded with the coach greeting and the user's first message
    pub fn start(title: impl Into<String>, first_message: ChatMessage) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            created_at: now_ms(),
            messages: vec![ChatMessage::model(COACH_GREETING), first_message],
        }
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Sessions ordered newest first
pub fn sorted_newest_first(sessions: &[ChatSession]) -> Vec<ChatSession> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Clean an LLM-suggested session title. Falls back to "New Chat".
pub fn clean_title(raw: &str) -> String {
    let title = raw.replace('"', "");
    let title = title.trim();
    if title.is_empty() {
        "New Chat".to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_with_greeting() {
        let session = ChatSession::start("Salary talk", ChatMessage::user("How do I negotiate?"));
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, ChatRole::Model);
        assert_eq!(session.last_message().unwrap().text, "How do I negotiate?");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","text":"hi"}"#);
    }

    #[test]
    fn test_sorted_newest_first() {
        let mut a = ChatSession::start("a", ChatMessage::user("a"));
        let mut b = ChatSession::start("b", ChatMessage::user("b"));
        a.created_at = 10;
        b.created_at = 20;
        let sorted = sorted_newest_first(&[a, b]);
        assert_eq!(sorted[0].title, "b");
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  \"Salary Negotiation Tips\" \n"), "Salary Negotiation Tips");
        assert_eq!(clean_title("\"\""), "New Chat");
    }
}
