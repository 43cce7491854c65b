//! Scripted language model for service tests
//!
//! Responses are queued per call kind and handed out in order. An empty
//! queue answers with an `Error::Llm`, which doubles as the way to simulate
//! a network failure.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value as JsonValue;

use crate::adapters::memory::MemoryKeyValueStore;
use crate::domain::result::{Error, Result};
use crate::domain::{ChatMessage, JobSearchResult};
use crate::ports::{LanguageModel, TextStream};
use crate::services::LocalAccountStore;

#[derive(Default)]
pub struct ScriptedModel {
    text: Mutex<VecDeque<Result<String>>>,
    json: Mutex<VecDeque<Result<JsonValue>>>,
    search: Mutex<VecDeque<Result<JobSearchResult>>>,
    chat: Mutex<VecDeque<Result<Vec<Result<String>>>>>,
    prompts: Mutex<Vec<String>>,
    chat_histories: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: &str) {
        self.text.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_text_error(&self) {
        self.text.lock().unwrap().push_back(Err(Error::llm("scripted failure")));
    }

    pub fn push_json(&self, value: JsonValue) {
        self.json.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_search(&self, result: JobSearchResult) {
        self.search.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_chat(&self, chunks: &[&str]) {
        let chunks = chunks.iter().map(|c| Ok(c.to_string())).collect();
        self.chat.lock().unwrap().push_back(Ok(chunks));
    }

    /// Stream that yields `chunks` and then fails
    pub fn push_chat_broken(&self, chunks: &[&str]) {
        let mut items: Vec<Result<String>> = chunks.iter().map(|c| Ok(c.to_string())).collect();
        items.push(Err(Error::llm("stream interrupted")));
        self.chat.lock().unwrap().push_back(Ok(items));
    }

    /// Every prompt received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().last().cloned().unwrap_or_default()
    }

    pub fn chat_histories(&self) -> Vec<Vec<ChatMessage>> {
        self.chat_histories.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) {
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}

fn exhausted() -> Error {
    Error::llm("no scripted response")
}

impl LanguageModel for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn generate_text(&self, prompt: &str, _system_instruction: Option<&str>) -> Result<String> {
        self.record(prompt);
        self.text.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    fn generate_json(&self, prompt: &str, _schema: &JsonValue) -> Result<JsonValue> {
        self.record(prompt);
        self.json.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    fn search_jobs(&self, query: &str) -> Result<JobSearchResult> {
        self.record(query);
        self.search.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    fn chat_stream(
        &self,
        history: &[ChatMessage],
        message: &str,
        _system_instruction: &str,
    ) -> Result<TextStream> {
        self.record(message);
        self.chat_histories.lock().unwrap().push(history.to_vec());
        let chunks = self.chat.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))?;
        Ok(Box::new(chunks.into_iter()))
    }
}

/// Local account store on an in-memory table, plus the table itself
pub fn memory_accounts() -> (Arc<LocalAccountStore>, Arc<MemoryKeyValueStore>) {
    let store = Arc::new(MemoryKeyValueStore::new());
    let accounts = Arc::new(LocalAccountStore::new(store.clone()));
    (accounts, store)
}

/// Same as `memory_accounts` with "Ada" registered and logged in
pub fn logged_in_accounts() -> (Arc<LocalAccountStore>, Arc<MemoryKeyValueStore>) {
    let (accounts, store) = memory_accounts();
    accounts.register("Ada", "ada@example.com", "secret1").unwrap();
    (accounts, store)
}
