//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod accounts;
mod llm;
pub mod storage;

pub use accounts::AccountBackend;
pub use llm::{generate_structured, LanguageModel, TextStream};
pub use storage::{get_json, set_json, KeyValueStore};
