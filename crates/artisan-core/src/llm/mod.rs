//! LLM provider abstraction used by the assist gateway implementation.

pub mod box_provider;
pub mod provider;

pub use box_provider::BoxLlmProvider;
pub use provider::LlmProvider;
