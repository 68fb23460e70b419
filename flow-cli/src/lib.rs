//! # Excaliflow CLI
//!
//! Inspection shell over `flow-core`. Loads a canvas document, derives its
//! presentation graph and prints the result as JSON.
//!
//! ## Usage
//!
//! ```bash
//! excaliflow scenes flow.excalidraw
//! excaliflow highlight flow.excalidraw --link "https://excalidraw.com/?element=g1"
//! excaliflow navigate flow.excalidraw --x 120 --y 340
//! excaliflow link-arrows flow.excalidraw --arrow a1 --arrow a2
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `run` - Executes one subcommand and renders its JSON output
//! - Summaries are plain serde structs built from `flow_core::SceneManager`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flow_core::{
    link_arrows, CanvasDocument, Element, FlowError, Point, SceneManager, ViewMode, ViewerConfig,
    ViewerSession,
};
use serde::Serialize;
use thiserror::Error;

/// Errors from running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, parsing or editing the document failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Rendering output failed.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Command-line arguments for excaliflow.
#[derive(Debug, Clone, Parser)]
#[command(name = "excaliflow")]
#[command(about = "Inspect presentation graphs derived from hyperlinked canvas documents")]
#[command(version)]
pub struct CliArgs {
    /// Viewer configuration file (JSON)
    #[arg(long, global = true, env = "EXCALIFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Highlight stroke colour, overriding the config file
    #[arg(long, global = true, env = "EXCALIFLOW_HIGHLIGHT_COLOR")]
    pub highlight_color: Option<String>,

    /// Highlight stroke width, overriding the config file
    #[arg(long, global = true, env = "EXCALIFLOW_HIGHLIGHT_WIDTH")]
    pub highlight_width: Option<f64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Summarize the workflow and every screenshot scene
    Scenes {
        /// Canvas document to load
        document: PathBuf,
    },
    /// Print the highlight projection for a link
    Highlight {
        /// Canvas document to load
        document: PathBuf,
        /// Current link
        #[arg(long)]
        link: String,
    },
    /// Resolve a pointer press into the next link
    Navigate {
        /// Canvas document to load
        document: PathBuf,
        /// X position in scene coordinates
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y position in scene coordinates
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Current link; the press lands on its screenshot scene, or on the
        /// workflow when omitted
        #[arg(long)]
        link: Option<String>,
    },
    /// Replace bound arrows with links and print the new document
    LinkArrows {
        /// Canvas document to load
        document: PathBuf,
        /// Arrow element ids
        #[arg(long = "arrow", required = true)]
        arrows: Vec<String>,
    },
}

impl CliArgs {
    /// Build the viewer configuration: config file first, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn viewer_config(&self) -> Result<ViewerConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(color) = &self.highlight_color {
            config.highlight.stroke_color.clone_from(color);
        }
        if let Some(width) = self.highlight_width {
            config.highlight.stroke_width = width;
        }
        Ok(config)
    }
}

/// Per-link entry of a [`DocumentSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    /// Canonical link key.
    pub link: String,
    /// 1-based position among links.
    pub number: usize,
    /// Scene member ids, title included.
    pub members: Vec<String>,
    /// Title element id, if the scene has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_id: Option<String>,
    /// Title text, if the title has text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_text: Option<String>,
    /// Other links resolving to the same scene object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shares_scene_with: Vec<String>,
}

/// Output of the `scenes` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// Workflow scene member ids.
    pub workflow: Vec<String>,
    /// One entry per canonical link, in first-seen order.
    pub links: Vec<LinkSummary>,
}

impl DocumentSummary {
    /// Summarize a derived model.
    #[must_use]
    pub fn of(manager: &SceneManager) -> Self {
        let links = manager
            .scenes_by_link()
            .iter()
            .enumerate()
            .map(|(i, (link, scene))| {
                let titled = manager.titled_scene(link.as_str());
                LinkSummary {
                    link: link.to_string(),
                    number: i + 1,
                    members: scene.element_ids().map(str::to_string).collect(),
                    title_id: titled.title.as_ref().map(|t| t.id.to_string()),
                    title_text: titled.title_text().map(str::to_string),
                    shares_scene_with: manager
                        .links_sharing_scene(link.as_str())
                        .into_iter()
                        .filter(|other| *other != link)
                        .map(ToString::to_string)
                        .collect(),
                }
            })
            .collect();

        Self {
            workflow: manager
                .workflow_scene()
                .element_ids()
                .map(str::to_string)
                .collect(),
            links,
        }
    }
}

/// Output of the `highlight` command.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightOutput {
    /// The link highlighted.
    pub link: String,
    /// Highlight-projected workflow scene.
    pub workflow: Vec<Element>,
    /// Title of the link's screenshot scene.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Element>,
    /// Highlight-projected screenshot scene, title excluded.
    pub screenshot: Vec<Element>,
}

/// Output of the `navigate` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigateOutput {
    /// Selector before the press.
    pub from: String,
    /// Selector after the press.
    pub to: String,
    /// Whether the press hit a link.
    pub changed: bool,
}

/// Run a command and render its output as pretty JSON.
///
/// # Errors
///
/// Returns an error if the document or config cannot be loaded, or if
/// `link-arrows` names an id that is missing or not an arrow.
pub fn run(args: &CliArgs) -> Result<String, CliError> {
    let config = args.viewer_config()?;

    let output = match &args.command {
        Command::Scenes { document } => {
            let manager = SceneManager::new(&load(document)?.elements);
            serde_json::to_string_pretty(&DocumentSummary::of(&manager))?
        }
        Command::Highlight { document, link } => {
            let document = load(document)?;
            let mut session = ViewerSession::new(ViewerConfig {
                auto_select_first_link: false,
                ..config
            });
            session.select_link(link.as_str());
            session.enter_view_mode(&document.elements, ViewMode::Workflow);

            let screenshot = session.highlighted_screenshot();
            serde_json::to_string_pretty(&HighlightOutput {
                link: link.clone(),
                workflow: session.highlighted_workflow(),
                title: screenshot.title,
                screenshot: screenshot.scene,
            })?
        }
        Command::Navigate {
            document,
            x,
            y,
            link,
        } => {
            let document = load(document)?;
            let mode = if link.is_some() {
                ViewMode::Screenshot
            } else {
                ViewMode::Workflow
            };
            let mut session = ViewerSession::new(ViewerConfig {
                auto_select_first_link: false,
                ..config
            });
            session.select_link(link.clone().unwrap_or_default());
            session.enter_view_mode(&document.elements, mode);

            let from = session.current_link().to_string();
            let changed = session.navigate(Point::new(*x, *y));
            serde_json::to_string_pretty(&NavigateOutput {
                from,
                to: session.current_link().to_string(),
                changed,
            })?
        }
        Command::LinkArrows { document, arrows } => {
            let mut document = load(document)?;
            document.elements = link_arrows(&document.elements, arrows)?;
            document.to_json()?
        }
    };

    Ok(output)
}

fn load(path: &Path) -> Result<CanvasDocument, CliError> {
    tracing::info!("Loading {}", path.display());
    Ok(CanvasDocument::load(path)?)
}
