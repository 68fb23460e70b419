//! Pointer navigation between scenes.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// A point in scene coordinates.
///
/// The host converts pointer positions from screen space before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The stashed link of the linked element under `point`.
///
/// Elements are scanned in order and the last hit wins, so on overlap the
/// element later in the document decides. `None` means the selector should
/// stay as it is.
#[must_use]
pub fn link_at<'e>(
    elements: impl IntoIterator<Item = &'e Element>,
    point: Point,
) -> Option<&'e str> {
    elements
        .into_iter()
        .filter_map(|e| e.stashed_link().map(|link| (e, link)))
        .filter(|(e, _)| e.contains_point(point.x, point.y))
        .last()
        .map(|(e, link)| {
            tracing::debug!("Pointer at ({}, {}) hit {}", point.x, point.y, e.id);
            link
        })
}

/// Resolve a pointer press into the next selector value.
///
/// Returns the link under the pointer, or `current` when nothing linked was
/// hit.
#[must_use]
pub fn resolve_navigation<'e>(
    elements: impl IntoIterator<Item = &'e Element>,
    point: Point,
    current: &'e str,
) -> &'e str {
    link_at(elements, point).unwrap_or(current)
}
