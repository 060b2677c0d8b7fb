//! Per-project cache of session settings query results

use console_core::{AuthSessionSettings, ProjectId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cached query results, shared by every clone
///
/// An entry of `None` records that the project has no session settings, which
/// is distinct from the project not being cached at all.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<ProjectId, Option<AuthSessionSettings>>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProjectId, Option<AuthSessionSettings>>> {
        // Entries are replaced whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a project; the outer `None` is a cache miss
    pub fn get(&self, project_id: &ProjectId) -> Option<Option<AuthSessionSettings>> {
        self.lock().get(project_id).copied()
    }

    pub fn insert(&self, project_id: ProjectId, settings: Option<AuthSessionSettings>) {
        self.lock().insert(project_id, settings);
    }

    pub fn invalidate(&self, project_id: &ProjectId) -> bool {
        self.lock().remove(project_id).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
