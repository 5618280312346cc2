//! Thread-shared handle over the project store.

use std::sync::Arc;

use parking_lot::Mutex;
use lumina_timeline::Project;

use crate::store::ProjectStore;

/// Cloneable handle embedders share across threads.
///
/// Every access runs under the lock, so each store transition (an edit, a
/// tick, a seek) is atomic from the point of view of every other holder.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<ProjectStore>>,
}

impl SharedStore {
    pub fn new(project: Project) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ProjectStore::new(project))),
        }
    }

    pub fn from_store(store: ProjectStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut ProjectStore) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// An owned snapshot of the current project value.
    pub fn snapshot(&self) -> Project {
        self.inner.lock().snapshot()
    }
}
