//! Prompt element store, composition and merge rules.

pub mod compose;
pub mod merge;
pub mod store;

pub use compose::compose_prompt;
pub use store::PromptStore;
