//! ResultsStore port - persistence for saved session results.

use async_trait::async_trait;

use crate::domain::flow::SavedResults;
use crate::domain::foundation::{DomainError, SessionId};

/// Stores results snapshots.
///
/// Saving is fire-and-forget from the flow's point of view: a failure is
/// logged by the caller and never changes the current screen.
#[async_trait]
pub trait ResultsStore: Send + Sync {
    /// Persists a snapshot. Saving twice for one session keeps both.
    async fn save(&self, results: &SavedResults) -> Result<(), DomainError>;

    /// All snapshots saved for `session_id`, oldest first.
    async fn find_by_session(&self, session_id: &SessionId) -> Result<Vec<SavedResults>, DomainError>;
}
