//! HistoryStore trait definition.

use artisan_types::error::RepositoryError;
use artisan_types::history::{HistoryRecord, SaveRequest};
use uuid::Uuid;

/// Repository trait for prompt history.
///
/// Records are only ever created or updated through this trait; nothing in
/// the workspace deletes them.
///
/// Implementations live in artisan-infra (e.g., `SqliteHistoryStore`).
pub trait HistoryStore: Send + Sync {
    /// Create or update a record. Returns the record id.
    ///
    /// A request without an id creates a new record with a freshly assigned
    /// id. A request with an id the store does not know creates the record
    /// under that id, so a session's id never changes once claimed. A known
    /// id is updated in place (its `created_at` is kept) and becomes the
    /// most recent record.
    fn save(
        &self,
        request: &SaveRequest,
    ) -> impl std::future::Future<Output = Result<Uuid, RepositoryError>> + Send;

    /// All records, most recently saved first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryRecord>, RepositoryError>> + Send;

    /// Get a record by id.
    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<HistoryRecord>, RepositoryError>> + Send;
}
