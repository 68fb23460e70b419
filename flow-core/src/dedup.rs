//! Scene deduplication.
//!
//! Links whose scenes have the same membership end up sharing one [`Scene`]
//! object, so consumers can compare scenes with [`Scene::ptr_eq`].

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::element::{CustomData, Element};
use crate::link::LinkKey;
use crate::scene::{Scene, SceneKey};

/// Clear an element's native link and stash its link and stroke.
///
/// The displayed stroke is left as is; the stash is what highlight projection
/// restores from. Host keys already in the metadata bag are kept.
#[must_use]
pub fn strip_link_and_preserve_stroke(element: &Element) -> Element {
    let mut stripped = element.clone();
    let extra = element
        .custom_data
        .as_ref()
        .map(|data| data.extra.clone())
        .unwrap_or_default();
    stripped.custom_data = Some(CustomData {
        link: stripped.link.take(),
        stroke_color: Some(element.stroke_color.clone()),
        stroke_width: Some(element.stroke_width),
        extra,
    });
    stripped
}

/// Replace every scene with the canonical, stripped scene for its membership.
///
/// The first link seen for a membership decides the element order of the
/// shared scene.
#[must_use]
pub fn deduplicate(scenes: IndexMap<LinkKey, Vec<Element>>) -> IndexMap<LinkKey, Scene> {
    let mut canonical: HashMap<SceneKey, Scene> = HashMap::new();
    let deduplicated: IndexMap<LinkKey, Scene> = scenes
        .into_iter()
        .map(|(link, members)| {
            let scene = canonical
                .entry(SceneKey::of(&members))
                .or_insert_with(|| {
                    Scene::new(members.iter().map(strip_link_and_preserve_stroke).collect())
                })
                .clone();
            (link, scene)
        })
        .collect();

    tracing::debug!(
        "Deduplicated {} linked scenes into {} distinct scenes",
        deduplicated.len(),
        canonical.len()
    );
    deduplicated
}
