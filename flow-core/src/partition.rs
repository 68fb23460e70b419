//! Scene partitioning.
//!
//! Every distinct canonical link designates a screenshot scene: the union of
//! the groups its target belongs to. Whatever no link reaches is the workflow.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::dedup::strip_link_and_preserve_stroke;
use crate::element::{Element, GroupId};
use crate::group::GroupIndex;
use crate::link::{LinkKey, LinkResolver, LinkTarget};

/// Result of partitioning a canonicalized document.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Elements no link reaches, already stripped of their links.
    pub workflow: Vec<Element>,
    /// Scene members per canonical link, in first-seen link order.
    ///
    /// Elements here still carry their native links; the deduplicator strips
    /// them.
    pub scenes: IndexMap<LinkKey, Vec<Element>>,
}

/// Partition canonicalized elements into per-link scenes and the workflow.
///
/// `groups` must index the same `elements`.
#[must_use]
pub fn partition(elements: &[Element], groups: &GroupIndex<'_>) -> Partition {
    let resolver = LinkResolver::new(elements, groups);

    let mut scenes: IndexMap<LinkKey, Vec<Element>> = IndexMap::new();
    for link in elements.iter().filter_map(Element::active_link) {
        if scenes.contains_key(link) {
            continue;
        }
        let members = scene_members(elements, groups, resolver.resolve(link));
        if members.is_empty() {
            tracing::warn!("Link resolves to no elements: {link}");
        }
        scenes.insert(LinkKey::from(link), members);
    }

    let targeted: HashSet<&str> = scenes
        .values()
        .flatten()
        .map(|e| e.id.as_str())
        .collect();

    let workflow: Vec<Element> = elements
        .iter()
        .filter(|e| !targeted.contains(e.id.as_str()))
        .map(strip_link_and_preserve_stroke)
        .collect();

    tracing::debug!(
        "Partitioned {} elements into {} linked scenes and a workflow of {}",
        elements.len(),
        scenes.len(),
        workflow.len()
    );

    Partition { workflow, scenes }
}

/// Members of every group the target designates, in document order.
fn scene_members(
    elements: &[Element],
    groups: &GroupIndex<'_>,
    target: LinkTarget<'_>,
) -> Vec<Element> {
    let single;
    let group_ids: &[GroupId] = match target {
        // The element's full membership, which may span several groups.
        LinkTarget::Element(element) => &element.group_ids,
        LinkTarget::Group(group) => {
            single = [GroupId::from(group)];
            &single
        }
        LinkTarget::Dangling => &[],
    };

    let member_ids: HashSet<&str> = group_ids
        .iter()
        .flat_map(|group| groups.members(group.as_str()))
        .map(|e| e.id.as_str())
        .collect();

    elements
        .iter()
        .filter(|e| member_ids.contains(e.id.as_str()))
        .cloned()
        .collect()
}
