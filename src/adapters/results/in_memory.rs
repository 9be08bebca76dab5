//! In-memory results store.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::flow::SavedResults;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::ResultsStore;

/// Keeps saved results in a vector.
#[derive(Debug, Default)]
pub struct InMemoryResultsStore {
    saved: RwLock<Vec<SavedResults>>,
    fail_saves: bool,
}

impl InMemoryResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every save fail with `PersistenceFailed`.
    pub fn failing() -> Self {
        Self {
            saved: RwLock::new(Vec::new()),
            fail_saves: true,
        }
    }

    /// Everything saved so far, oldest first.
    pub fn all(&self) -> Vec<SavedResults> {
        self.saved
            .read()
            .expect("InMemoryResultsStore: lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.saved
            .read()
            .expect("InMemoryResultsStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResultsStore for InMemoryResultsStore {
    async fn save(&self, results: &SavedResults) -> Result<(), DomainError> {
        if self.fail_saves {
            return Err(DomainError::new(
                ErrorCode::PersistenceFailed,
                "Simulated save failure",
            )
            .with_detail("session_id", results.session_id.to_string()));
        }
        self.saved
            .write()
            .expect("InMemoryResultsStore: write lock poisoned")
            .push(results.clone());
        Ok(())
    }

    async fn find_by_session(&self, session_id: &SessionId) -> Result<Vec<SavedResults>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|r| &r.session_id == session_id)
            .collect())
    }
}
