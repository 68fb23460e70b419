//! Title extraction.
//!
//! A screenshot scene may carry a caption: a text element sitting exactly on
//! the top-left corner of the scene's common bounds.

use serde::Serialize;

use crate::element::{Element, ElementType};
use crate::scene::Scene;

/// A scene split into its optional title and the remaining body.
#[derive(Debug, Clone, Serialize)]
pub struct TitledScene {
    /// The title element, if one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Element>,
    /// Every element except the title, in scene order.
    pub scene: Vec<Element>,
}

impl TitledScene {
    /// The title's text, if there is a title with text.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }
}

/// Split off the title of a scene.
///
/// The title is the first text element whose position equals the minimum
/// corner of the scene bounds exactly. Scenes without well-formed bounds have
/// no title.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn extract_title(scene: &Scene) -> TitledScene {
    let Some(bounds) = scene.bounds() else {
        return untitled(scene);
    };

    let title_index = scene.iter().position(|e| {
        e.element_type == ElementType::Text && e.x == bounds.min_x && e.y == bounds.min_y
    });

    match title_index {
        Some(index) => {
            let elements = scene.elements();
            tracing::trace!("Scene title is {}", elements[index].id);
            TitledScene {
                title: Some(elements[index].clone()),
                scene: elements
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, e)| e.clone())
                    .collect(),
            }
        }
        None => untitled(scene),
    }
}

fn untitled(scene: &Scene) -> TitledScene {
    TitledScene {
        title: None,
        scene: scene.elements().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str, x: f64, y: f64) -> Element {
        Element::new(id, ElementType::Text)
            .with_bounds(x, y, 50.0, 10.0)
            .with_text(format!("Title {id}"))
    }

    fn image(id: &str, x: f64, y: f64) -> Element {
        Element::new(id, ElementType::Image).with_bounds(x, y, 200.0, 100.0)
    }

    #[test]
    fn test_text_at_min_corner_is_title() {
        let scene = Scene::new(vec![image("shot", 0.0, 20.0), text("caption", 0.0, 0.0)]);
        let titled = extract_title(&scene);

        assert_eq!(titled.title.as_ref().map(|t| t.id.as_str()), Some("caption"));
        assert_eq!(titled.title_text(), Some("Title caption"));
        assert_eq!(titled.scene.len(), 1);
        assert_eq!(titled.scene[0].id.as_str(), "shot");
    }

    #[test]
    fn test_near_miss_is_not_a_title() {
        let scene = Scene::new(vec![image("shot", 0.0, 20.0), text("caption", 0.5, 0.0)]);
        let titled = extract_title(&scene);

        assert!(titled.title.is_none());
        assert_eq!(titled.scene, scene.elements().to_vec());
    }

    #[test]
    fn test_non_text_at_corner_is_not_a_title() {
        let scene = Scene::new(vec![image("shot", 0.0, 0.0)]);
        assert!(extract_title(&scene).title.is_none());
    }

    #[test]
    fn test_first_matching_text_wins() {
        let scene = Scene::new(vec![text("first", 0.0, 0.0), text("second", 0.0, 0.0)]);
        let titled = extract_title(&scene);

        assert_eq!(titled.title.map(|t| t.id.as_str().to_string()), Some("first".to_string()));
        assert_eq!(titled.scene.len(), 1);
    }

    #[test]
    fn test_empty_and_malformed_scenes_have_no_title() {
        assert!(extract_title(&Scene::default()).title.is_none());

        let scene = Scene::new(vec![text("t", f64::INFINITY, 0.0)]);
        let titled = extract_title(&scene);
        assert!(titled.title.is_none());
        assert_eq!(titled.scene.len(), 1);
    }
}
