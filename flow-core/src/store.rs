//! Shared storage for the current derived model.
//!
//! Provides a thread-safe [`ModelStore`] for hosts that run several viewers
//! over one document. Derivation happens outside the lock; only the pointer
//! swap is serialized, so readers see either the old model or the new one.

use std::sync::{Arc, RwLock};

use crate::element::Element;
use crate::manager::SceneManager;

/// Thread-safe holder of the current [`SceneManager`].
///
/// # Example
///
/// ```
/// use flow_core::store::ModelStore;
/// use flow_core::{link_to, Element, ElementType};
///
/// let store = ModelStore::new();
/// let revision = store.publish(&[
///     Element::new("a", ElementType::Image).with_groups(["g1"]),
///     Element::new("b", ElementType::Rectangle).with_link(link_to("a")),
/// ]);
///
/// assert_eq!(revision, 1);
/// assert_eq!(store.current().workflow_scene().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    inner: Arc<RwLock<Published>>,
}

#[derive(Debug, Default)]
struct Published {
    model: Arc<SceneManager>,
    revision: u64,
}

impl ModelStore {
    /// Create a store holding an empty model at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current model.
    #[must_use]
    pub fn current(&self) -> Arc<SceneManager> {
        let published = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&published.model)
    }

    /// Revision of the current model; bumped by every publish.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .revision
    }

    /// Derive a model from a document snapshot and make it current.
    ///
    /// Returns the new revision.
    pub fn publish(&self, elements: &[Element]) -> u64 {
        let model = Arc::new(SceneManager::new(elements));
        self.replace(model)
    }

    /// Make an already-derived model current. Returns the new revision.
    pub fn replace(&self, model: Arc<SceneManager>) -> u64 {
        let mut published = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        published.model = model;
        published.revision += 1;
        tracing::debug!("Published model revision {}", published.revision);
        published.revision
    }
}
