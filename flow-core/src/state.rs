//! Viewer session state.
//!
//! The "current link" selector lives here, owned by whoever drives a viewer.
//! Several sessions can share one derived model without sharing selectors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::element::Element;
use crate::highlight::{project_highlight, project_workflow_highlight};
use crate::manager::SceneManager;
use crate::navigation::{link_at, Point};
use crate::title::TitledScene;

/// What the host is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The document is being edited; the derived model may be stale.
    Edit,
    /// The workflow scene with the current link highlighted.
    Workflow,
    /// The screenshot scene of the current link.
    Screenshot,
}

/// One viewer's state: mode, selector and the derived model it reads.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    /// Current mode.
    pub mode: ViewMode,
    current_link: String,
    model: Arc<SceneManager>,
    config: ViewerConfig,
}

impl ViewerSession {
    /// Create a session in edit mode with an empty model.
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            mode: ViewMode::Edit,
            current_link: String::new(),
            model: Arc::new(SceneManager::default()),
            config,
        }
    }

    /// Enter a view mode, re-deriving the model from the edited document.
    pub fn enter_view_mode(&mut self, elements: &[Element], mode: ViewMode) {
        self.set_model(Arc::new(SceneManager::new(elements)));
        self.mode = mode;
        tracing::info!("Entered {:?} view with {} links", mode, self.model.scenes_by_link().len());
    }

    /// Swap in an already-derived model.
    ///
    /// A selector that no longer names a scene is replaced by the first link
    /// when auto-selection is on.
    pub fn set_model(&mut self, model: Arc<SceneManager>) {
        self.model = model;
        if self.config.auto_select_first_link && self.model.scene(&self.current_link).is_none() {
            if let Some(first) = self.model.first_link() {
                tracing::debug!("Selecting first link {first}");
                self.current_link = first.to_string();
            }
        }
    }

    /// Drop back to editing. The selector is kept for the next view.
    pub fn revert_to_edit_mode(&mut self) {
        tracing::info!("Reverting to edit mode");
        self.mode = ViewMode::Edit;
    }

    /// The current link selector (possibly empty).
    #[must_use]
    pub fn current_link(&self) -> &str {
        &self.current_link
    }

    /// Set the current link selector.
    pub fn select_link(&mut self, link: impl Into<String>) {
        self.current_link = link.into();
    }

    /// The derived model this session reads.
    #[must_use]
    pub fn model(&self) -> &Arc<SceneManager> {
        &self.model
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Handle a pointer press on the scene currently shown.
    ///
    /// Returns `true` if the selector changed.
    pub fn navigate(&mut self, point: Point) -> bool {
        let hit: Option<String> = match self.mode {
            ViewMode::Edit => None,
            ViewMode::Workflow => link_at(self.model.workflow_scene(), point).map(str::to_string),
            ViewMode::Screenshot => {
                let titled = self.titled_current_scene();
                link_at(&titled.scene, point).map(str::to_string)
            }
        };

        match hit {
            Some(link) if link != self.current_link => {
                tracing::debug!("Navigating to {link}");
                self.current_link = link;
                true
            }
            _ => false,
        }
    }

    /// The workflow scene as it should be drawn for the current selector.
    #[must_use]
    pub fn highlighted_workflow(&self) -> Vec<Element> {
        project_workflow_highlight(&self.model, &self.current_link, &self.config.highlight)
    }

    /// The current screenshot scene, title split off, highlighted.
    ///
    /// An unknown selector yields an empty scene.
    #[must_use]
    pub fn highlighted_screenshot(&self) -> TitledScene {
        let titled = self.titled_current_scene();
        TitledScene {
            scene: project_highlight(&titled.scene, &self.current_link, &self.config.highlight),
            title: titled.title,
        }
    }

    fn titled_current_scene(&self) -> TitledScene {
        self.model.titled_scene(&self.current_link)
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
