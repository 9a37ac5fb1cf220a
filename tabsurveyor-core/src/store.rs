//! In-memory dataset store keyed by session.
//!
//! A front end keeps at most one uploaded dataset per session. Handles are
//! shared as `Arc<Dataset>` so readers never hold the lock while profiling.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{Result, SurveyorError};
use crate::models::Dataset;

/// Identifier of a stored dataset.
pub type SessionId = Uuid;

/// Thread-safe map from session id to dataset.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<HashMap<SessionId, Arc<Dataset>>>,
}

impl DatasetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a dataset under a fresh session id.
    pub fn insert(&self, dataset: Dataset) -> SessionId {
        let id = Uuid::new_v4();
        self.datasets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(dataset));
        tracing::debug!("Stored dataset for session {}", id);
        id
    }

    /// Stores a dataset under a fresh id and drops the previous one.
    ///
    /// Uploading a new file replaces the session's dataset rather than
    /// accumulating them.
    pub fn replace(&self, previous: Option<SessionId>, dataset: Dataset) -> SessionId {
        let id = Uuid::new_v4();
        let mut datasets = self
            .datasets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = previous
            && datasets.remove(&previous).is_some()
        {
            tracing::debug!("Dropped dataset for session {}", previous);
        }
        datasets.insert(id, Arc::new(dataset));
        id
    }

    /// Returns the dataset stored for `id`.
    ///
    /// # Errors
    /// Returns [`SurveyorError::SessionNotFound`] if nothing is stored.
    pub fn get(&self, id: SessionId) -> Result<Arc<Dataset>> {
        self.datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(SurveyorError::SessionNotFound { id })
    }

    /// Removes the dataset for `id`, returning whether one was stored.
    pub fn remove(&self, id: SessionId) -> bool {
        self.datasets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        self.datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no dataset is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
