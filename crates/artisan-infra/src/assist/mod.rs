//! AI assist gateway implementations.

pub mod llm_assist;

pub use llm_assist::LlmAssistGateway;
