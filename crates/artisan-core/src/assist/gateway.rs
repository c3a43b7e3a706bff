//! AssistGateway trait definition.

use artisan_types::error::AssistError;
use artisan_types::prompt::{PartialPromptElements, SuggestionSet};

/// Trait for AI assist backends.
///
/// The four operations are independent: callers may have several in flight
/// at once and no ordering between their completions is promised. A response
/// that does not have the expected shape must be reported as
/// [`AssistError::Malformed`], never patched up.
///
/// Implementations live in artisan-infra (e.g., `LlmAssistGateway`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AssistGateway: Send + Sync {
    /// Expand a free-text idea into prompt elements.
    ///
    /// Fields the backend did not produce are `None` and must be left
    /// untouched by the caller.
    fn expand_idea(
        &self,
        idea: &str,
    ) -> impl std::future::Future<Output = Result<PartialPromptElements, AssistError>> + Send;

    /// Suggest role, purpose and constraint candidates for an idea.
    fn suggest_elements(
        &self,
        idea: &str,
    ) -> impl std::future::Future<Output = Result<SuggestionSet, AssistError>> + Send;

    /// Propose the single best next addition to a composed prompt.
    ///
    /// An empty string means there is nothing worth adding.
    fn next_addition(
        &self,
        composed: &str,
    ) -> impl std::future::Future<Output = Result<String, AssistError>> + Send;

    /// Propose short refinements for the details of a composed prompt.
    fn refine(
        &self,
        composed: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, AssistError>> + Send;
}
