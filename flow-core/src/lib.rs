//! # Excaliflow Core
//!
//! Derives a navigable presentation graph from a hyperlinked canvas document.
//! Elements that no link reaches form the workflow scene; every link designates
//! a screenshot scene built from the groups its target belongs to.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 flow-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Derivation       │  Viewer                 │
//! │  - GroupIndex     │  - Title extraction     │
//! │  - Canonical links│  - Highlight projection │
//! │  - Partitioning   │  - Navigation           │
//! │  - Deduplication  │  - Sessions             │
//! ├─────────────────────────────────────────────┤
//! │  Documents        │  Sharing                │
//! │  - Element model  │  - ModelStore           │
//! │  - Arrow linking  │  - Viewer config        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The whole derived model is rebuilt from each document revision by
//! [`SceneManager::new`]; nothing in it is updated incrementally.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dedup;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod group;
pub mod highlight;
pub mod link;
pub mod manager;
pub mod navigation;
pub mod partition;
pub mod scene;
pub mod state;
pub mod store;
pub mod title;

pub use config::ViewerConfig;
pub use dedup::{deduplicate, strip_link_and_preserve_stroke};
pub use document::CanvasDocument;
pub use editor::link_arrows;
pub use element::{Binding, CustomData, Element, ElementId, ElementType, GroupId};
pub use error::{FlowError, FlowResult};
pub use group::GroupIndex;
pub use highlight::{project_highlight, project_workflow_highlight, HighlightStyle};
pub use link::{canonicalize, link_target, link_to, LinkCanonicalizer, LinkKey, ELEMENT_LINK_PREFIX};
pub use manager::SceneManager;
pub use navigation::{link_at, resolve_navigation, Point};
pub use partition::{partition, Partition};
pub use scene::{Bounds, Scene, SceneKey};
pub use state::{ViewMode, ViewerSession};
pub use store::ModelStore;
pub use title::{extract_title, TitledScene};

/// Flow core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
