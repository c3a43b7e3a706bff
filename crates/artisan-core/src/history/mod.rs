//! Prompt history persistence.

pub mod store;

pub use store::HistoryStore;
