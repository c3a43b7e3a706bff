//! Business logic and gateway trait definitions for Prompt Artisan.
//!
//! This crate defines the "ports" (assist, history and LLM provider traits)
//! that the infrastructure layer implements, plus the workspace
//! synchronization engine that drives a prompt-building session. It depends
//! only on `artisan-types` -- never on `artisan-infra` or any IO crate.

pub mod assist;
pub mod event;
pub mod history;
pub mod llm;
pub mod prompt;
pub mod schedule;
pub mod template;
pub mod workspace;
