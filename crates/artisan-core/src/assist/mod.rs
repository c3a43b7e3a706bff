//! AI assist gateway: the four suggestion operations the workspace consumes.

pub mod gateway;

pub use gateway::AssistGateway;
