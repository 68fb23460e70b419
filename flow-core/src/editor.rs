//! Editor-side document mutations.
//!
//! The one mutation the presentation graph depends on: turning bound arrows
//! into element-links, so authors can wire screenshots together by drawing
//! arrows and converting them in one step.

use std::collections::{HashMap, HashSet};

use crate::element::{Element, ElementType};
use crate::error::{FlowError, FlowResult};
use crate::link::link_to;

/// Replace bound arrows with element-links.
///
/// For each arrow in `arrow_ids` bound at both ends to elements of the
/// document, the arrow is removed and the start-bound element gets a link to
/// the end-bound element. Arrows missing a binding, or bound to elements that
/// are not in the document, are left in place.
///
/// # Errors
///
/// Returns [`FlowError::ElementNotFound`] for an id not in the document and
/// [`FlowError::InvalidOperation`] for an id that is not an arrow.
pub fn link_arrows<S: AsRef<str>>(
    elements: &[Element],
    arrow_ids: &[S],
) -> FlowResult<Vec<Element>> {
    let by_id: HashMap<&str, &Element> = elements.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut removed: HashSet<&str> = HashSet::new();
    let mut new_links: HashMap<&str, String> = HashMap::new();

    for arrow_id in arrow_ids {
        let arrow_id = arrow_id.as_ref();
        let arrow = by_id
            .get(arrow_id)
            .ok_or_else(|| FlowError::ElementNotFound(arrow_id.to_string()))?;
        if arrow.element_type != ElementType::Arrow {
            return Err(FlowError::InvalidOperation(format!(
                "{arrow_id} is a {}, not an arrow",
                arrow.element_type.as_str()
            )));
        }

        let (Some(start), Some(end)) = (&arrow.start_binding, &arrow.end_binding) else {
            tracing::warn!("Arrow {arrow_id} is not bound at both ends, leaving it");
            continue;
        };
        let (source, target) = (start.element_id.as_str(), end.element_id.as_str());
        if !by_id.contains_key(source) || !by_id.contains_key(target) {
            tracing::warn!("Arrow {arrow_id} is bound to a missing element, leaving it");
            continue;
        }

        tracing::debug!("Linking {source} -> {target} in place of arrow {arrow_id}");
        removed.insert(arrow.id.as_str());
        new_links.insert(source, link_to(target));
    }

    Ok(elements
        .iter()
        .filter(|e| !removed.contains(e.id.as_str()))
        .map(|e| match new_links.get(e.id.as_str()) {
            Some(link) => {
                let mut linked = e.clone();
                linked.link = Some(link.clone());
                linked
            }
            None => e.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::SceneManager;

    fn document() -> Vec<Element> {
        vec![
            Element::new("step", ElementType::Rectangle),
            Element::new("shot", ElementType::Image).with_groups(["g1"]),
            Element::new("arrow", ElementType::Arrow).with_bindings("step", "shot"),
            Element::new("loose", ElementType::Arrow),
        ]
    }

    #[test]
    fn test_bound_arrow_becomes_link() {
        let result = link_arrows(&document(), &["arrow"]).expect("should link");

        let ids: Vec<_> = result.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["step", "shot", "loose"]);
        assert_eq!(result[0].link.as_deref(), Some(link_to("shot").as_str()));
    }

    #[test]
    fn test_unbound_arrow_is_left_alone() {
        let doc = document();
        let result = link_arrows(&doc, &["loose"]).expect("should succeed");
        assert_eq!(result, doc);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let err = link_arrows(&document(), &["ghost"]).expect_err("should fail");
        assert!(matches!(err, FlowError::ElementNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_non_arrow_is_an_error() {
        let err = link_arrows(&document(), &["step"]).expect_err("should fail");
        assert!(matches!(err, FlowError::InvalidOperation(_)));
    }

    #[test]
    fn test_result_feeds_scene_derivation() {
        let linked = link_arrows(&document(), &["arrow"]).expect("should link");
        let manager = SceneManager::new(&linked);

        let shots: Vec<_> = manager
            .scene(&link_to("g1"))
            .expect("scene")
            .element_ids()
            .collect();
        assert_eq!(shots, vec!["shot"]);
        assert!(manager.workflow_scene().contains("step"));
    }
}
