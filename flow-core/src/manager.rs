//! The derived presentation graph of one document revision.
//!
//! ```text
//! raw elements ─► GroupIndex ─► LinkCanonicalizer ─► ScenePartitioner ─► SceneDeduplicator
//!                                                                          │
//!                                               workflow scene ◄───────────┴──► scenes by link
//! ```
//!
//! A [`SceneManager`] is rebuilt from scratch whenever the document changes;
//! it is never patched in place.

use indexmap::IndexMap;

use crate::dedup::deduplicate;
use crate::element::Element;
use crate::group::GroupIndex;
use crate::link::{LinkCanonicalizer, LinkKey};
use crate::partition::partition;
use crate::scene::Scene;
use crate::title::{extract_title, TitledScene};

/// Workflow scene plus one screenshot scene per canonical link.
#[derive(Debug, Clone, Default)]
pub struct SceneManager {
    workflow: Scene,
    scenes_by_link: IndexMap<LinkKey, Scene>,
    empty: Scene,
}

impl SceneManager {
    /// Derive the presentation graph of a document.
    ///
    /// Deleted elements are ignored.
    #[must_use]
    pub fn new(raw: &[Element]) -> Self {
        let live: Vec<Element> = raw.iter().filter(|e| !e.is_deleted).cloned().collect();

        let raw_groups = GroupIndex::new(&live);
        let canonical = LinkCanonicalizer::new(&live, &raw_groups).canonicalize(&live);

        let groups = GroupIndex::new(&canonical);
        let parts = partition(&canonical, &groups);
        let link_count = parts.scenes.len();
        let scenes_by_link = deduplicate(parts.scenes);
        debug_assert_eq!(scenes_by_link.len(), link_count, "every link keeps its scene entry");

        tracing::debug!(
            "Derived {} screenshot scenes and a workflow of {} elements",
            scenes_by_link.len(),
            parts.workflow.len()
        );

        Self {
            workflow: Scene::new(parts.workflow),
            scenes_by_link,
            empty: Scene::default(),
        }
    }

    /// Elements no link reaches.
    #[must_use]
    pub fn workflow_scene(&self) -> &Scene {
        &self.workflow
    }

    /// Screenshot scenes per canonical link, in first-seen link order.
    #[must_use]
    pub fn scenes_by_link(&self) -> &IndexMap<LinkKey, Scene> {
        &self.scenes_by_link
    }

    /// The scene for a link, or `None` for a link this document never produced.
    #[must_use]
    pub fn scene(&self, link: &str) -> Option<&Scene> {
        self.scenes_by_link.get(link)
    }

    /// The scene for a link, treating unknown links as an empty scene.
    #[must_use]
    pub fn scene_or_empty(&self, link: &str) -> &Scene {
        self.scene(link).unwrap_or_else(|| {
            tracing::debug!("No scene for link {link}");
            &self.empty
        })
    }

    /// The scene for a link split into title and body.
    #[must_use]
    pub fn titled_scene(&self, link: &str) -> TitledScene {
        extract_title(self.scene_or_empty(link))
    }

    /// Canonical links in first-seen order.
    pub fn links(&self) -> impl Iterator<Item = &LinkKey> {
        self.scenes_by_link.keys()
    }

    /// The first canonical link in the document, if any.
    #[must_use]
    pub fn first_link(&self) -> Option<&LinkKey> {
        self.scenes_by_link.keys().next()
    }

    /// 1-based position of a link among all links.
    ///
    /// Deck exporters number their screenshot slides with this.
    #[must_use]
    pub fn link_number(&self, link: &str) -> Option<usize> {
        self.scenes_by_link.get_index_of(link).map(|i| i + 1)
    }

    /// Links that share their scene object with `link`, including itself.
    #[must_use]
    pub fn links_sharing_scene(&self, link: &str) -> Vec<&LinkKey> {
        let Some(scene) = self.scene(link) else {
            return Vec::new();
        };
        self.scenes_by_link
            .iter()
            .filter(|(_, other)| other.ptr_eq(scene))
            .map(|(key, _)| key)
            .collect()
    }

    /// Number of distinct screenshot scene objects.
    #[must_use]
    pub fn distinct_scene_count(&self) -> usize {
        let mut distinct: Vec<&Scene> = Vec::new();
        for scene in self.scenes_by_link.values() {
            if !distinct.iter().any(|seen| seen.ptr_eq(scene)) {
                distinct.push(scene);
            }
        }
        distinct.len()
    }
}
