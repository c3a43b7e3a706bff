use thiserror::Error;

/// Errors from repository operations (used by trait definitions in artisan-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the AI assist gateway.
///
/// A malformed response is treated exactly like a transport failure by the
/// workspace; the split only exists for logging.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("assist unavailable: {0}")]
    Unavailable(String),

    #[error("malformed assist response: {0}")]
    Malformed(String),
}

/// Errors returned by workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The action's precondition is not met (blank idea, blank prompt, ...).
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    AssistUnavailable(#[from] AssistError),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] RepositoryError),

    /// The workspace session has been torn down.
    #[error("workspace is closed")]
    Closed,
}

impl WorkspaceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_validation_error_displays_instruction_only() {
        let err = WorkspaceError::validation("Enter an idea first.");
        assert_eq!(err.to_string(), "Enter an idea first.");
    }

    #[test]
    fn test_assist_error_converts_into_workspace_error() {
        let err: WorkspaceError = AssistError::Malformed("missing roles".into()).into();
        assert!(matches!(err, WorkspaceError::AssistUnavailable(_)));
        assert!(err.to_string().contains("missing roles"));
    }
}
