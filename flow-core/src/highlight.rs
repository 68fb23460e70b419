//! Highlight projection.
//!
//! Given the caller's current link, elements whose stashed link matches are
//! drawn with the highlight stroke and every other element gets its stashed
//! stroke back. The projection is recomputed from scratch for every selector
//! value, so applying it twice is the same as applying it once.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::manager::SceneManager;

/// Stroke used to mark the elements of the current link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightStyle {
    /// Highlight stroke colour.
    pub stroke_color: String,
    /// Highlight stroke width.
    pub stroke_width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            stroke_color: "red".to_string(),
            stroke_width: 6.0,
        }
    }
}

/// Project highlight strokes onto a scene for the current link.
#[must_use]
pub fn project_highlight<'e>(
    elements: impl IntoIterator<Item = &'e Element>,
    current_link: &str,
    style: &HighlightStyle,
) -> Vec<Element> {
    elements
        .into_iter()
        .map(|element| {
            let highlighted = element.stashed_link() == Some(current_link);
            apply(element, highlighted, style)
        })
        .collect()
}

/// Project highlight strokes onto the workflow scene.
///
/// Besides exact link matches, every element whose stashed link leads to the
/// same deduplicated scene as `current_link` is highlighted, so links into
/// one group light up together.
#[must_use]
pub fn project_workflow_highlight(
    manager: &SceneManager,
    current_link: &str,
    style: &HighlightStyle,
) -> Vec<Element> {
    let current_scene = manager.scene(current_link);
    manager
        .workflow_scene()
        .iter()
        .map(|element| {
            let highlighted = element.stashed_link().is_some_and(|link| {
                link == current_link
                    || current_scene
                        .zip(manager.scene(link))
                        .is_some_and(|(current, other)| current.ptr_eq(other))
            });
            apply(element, highlighted, style)
        })
        .collect()
}

fn apply(element: &Element, highlighted: bool, style: &HighlightStyle) -> Element {
    let mut projected = element.clone();
    if highlighted {
        projected.stroke_color.clone_from(&style.stroke_color);
        projected.stroke_width = style.stroke_width;
    } else if let Some(stash) = &element.custom_data {
        if let Some(color) = &stash.stroke_color {
            projected.stroke_color.clone_from(color);
        }
        if let Some(width) = stash.stroke_width {
            projected.stroke_width = width;
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::strip_link_and_preserve_stroke;
    use crate::ElementType;

    fn stripped(id: &str, link: &str, color: &str) -> Element {
        strip_link_and_preserve_stroke(
            &Element::new(id, ElementType::Rectangle)
                .with_link(link)
                .with_stroke(color, 1.0),
        )
    }

    #[test]
    fn test_matching_link_is_highlighted() {
        let scene = vec![stripped("a", "L1", "#111111"), stripped("b", "L2", "#222222")];
        let style = HighlightStyle::default();
        let projected = project_highlight(&scene, "L1", &style);

        assert_eq!(projected[0].stroke_color, "red");
        assert_eq!(projected[0].stroke_width, 6.0);
        assert_eq!(projected[1].stroke_color, "#222222");
        assert_eq!(projected[1].stroke_width, 1.0);
    }

    #[test]
    fn test_empty_selector_restores_originals() {
        let scene = vec![stripped("a", "L1", "#111111"), stripped("b", "L2", "#222222")];
        let style = HighlightStyle::default();

        let highlighted = project_highlight(&scene, "L1", &style);
        let restored = project_highlight(&highlighted, "", &style);
        assert_eq!(restored, scene);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let scene = vec![stripped("a", "L1", "#111111"), stripped("b", "L2", "#222222")];
        let style = HighlightStyle {
            stroke_color: "#ff00ff".into(),
            stroke_width: 9.0,
        };

        let once = project_highlight(&scene, "L2", &style);
        let twice = project_highlight(&once, "L2", &style);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_elements_without_stash_are_untouched() {
        let scene = vec![Element::new("plain", ElementType::Text).with_stroke("#333333", 2.0)];
        let projected = project_highlight(&scene, "", &HighlightStyle::default());
        assert_eq!(projected, scene);
    }

    #[test]
    fn test_style_deserializes_with_defaults() {
        let style: HighlightStyle =
            serde_json::from_str(r#"{"strokeColor":"blue"}"#).expect("parse");
        assert_eq!(style.stroke_color, "blue");
        assert_eq!(style.stroke_width, 6.0);
    }
}
