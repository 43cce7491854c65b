//! Language model port
//!
//! Every AI feature goes through this trait: text in, text or JSON out.
//! Calls are blocking and made exactly once; failures surface as
//! `Error::Llm` or `Error::NotConfigured` and are never retried here.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::{ChatMessage, JobSearchResult};

/// Streamed reply: text chunks pulled in order until exhausted
pub type TextStream = Box<dyn Iterator<Item = Result<String>> + Send>;

pub trait LanguageModel: Send + Sync {
    /// Model identifier, e.g. "gemini-2.5-flash"
    fn model(&self) -> &str;

    /// Whether an API key is present
    fn is_configured(&self) -> bool;

    /// Free-form completion with an optional system instruction
    fn generate_text(&self, prompt: &str, system_instruction: Option<&str>) -> Result<String>;

    /// Completion constrained to a response schema, parsed as JSON
    fn generate_json(&self, prompt: &str, schema: &JsonValue) -> Result<JsonValue>;

    /// Web-grounded job listing search
    fn search_jobs(&self, query: &str) -> Result<JobSearchResult>;

    /// Multi-turn chat reply delivered as a stream of chunks
    fn chat_stream(
        &self,
        history: &[ChatMessage],
        message: &str,
        system_instruction: &str,
    ) -> Result<TextStream>;
}

/// Request JSON and deserialize it into `T`
pub fn generate_structured<T: DeserializeOwned>(
    model: &dyn LanguageModel,
    prompt: &str,
    schema: &JsonValue,
) -> Result<T> {
    let value = model.generate_json(prompt, schema)?;
    serde_json::from_value(value)
        .map_err(|e| Error::llm(format!("Response did not match the expected shape: {}", e)))
}
