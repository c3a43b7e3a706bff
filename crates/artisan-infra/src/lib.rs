//! Infrastructure layer for Prompt Artisan.
//!
//! Contains implementations of the gateway traits defined in `artisan-core`:
//! SQLite prompt history, the Anthropic LLM provider, and the LLM-backed
//! assist gateway. Also loads `config.toml` and resolves the data directory.

pub mod assist;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
