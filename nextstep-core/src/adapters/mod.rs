//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore port
//! - In-memory map for the KeyValueStore port (tests, dry runs)
//! - Gemini HTTP client for the LanguageModel port
//! - REST HTTP client for the AccountBackend port

pub mod duckdb;
pub mod gemini;
pub mod memory;
pub mod rest;

#[cfg(test)]
pub mod mock_server;
