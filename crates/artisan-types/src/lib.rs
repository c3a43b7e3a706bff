//! Shared domain types for Prompt Artisan.
//!
//! This crate contains the core domain types used across the workspace:
//! prompt elements, history records, templates, the workspace read model,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, schemars.

pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod prompt;
pub mod template;
pub mod workspace;
