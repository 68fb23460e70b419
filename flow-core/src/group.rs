//! Group membership index.
//!
//! Groups exist only implicitly, through each element's `groupIds`. The index
//! inverts that relation once per derivation so links can be resolved against
//! whole groups.

use indexmap::IndexMap;

use crate::element::{Element, GroupId};

/// Elements indexed by group identifier.
///
/// Groups iterate in the order they are first seen in the document, and the
/// members of each group keep document order.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex<'a> {
    groups: IndexMap<&'a str, Vec<&'a Element>>,
}

impl<'a> GroupIndex<'a> {
    /// Index the given elements.
    #[must_use]
    pub fn new(elements: &'a [Element]) -> Self {
        let mut groups: IndexMap<&'a str, Vec<&'a Element>> = IndexMap::new();
        for element in elements {
            for group in &element.group_ids {
                groups.entry(group.as_str()).or_default().push(element);
            }
        }
        tracing::trace!("Indexed {} groups over {} elements", groups.len(), elements.len());
        Self { groups }
    }

    /// Members of a group in document order. Unknown groups have no members.
    #[must_use]
    pub fn members(&self, group: &str) -> &[&'a Element] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The indexed spelling of a group id, if any element belongs to it.
    #[must_use]
    pub fn lookup(&self, group: &str) -> Option<&'a str> {
        self.groups.get_key_value(group).map(|(key, _)| *key)
    }

    /// Number of members of a group.
    #[must_use]
    pub fn size(&self, group: &str) -> usize {
        self.members(group).len()
    }

    /// Whether any element belongs to the group.
    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// The group with the most members among `ids`.
    ///
    /// Ties go to the group that comes first in `ids`. Returns `None` only
    /// for an empty slice.
    #[must_use]
    pub fn largest_group<'g>(&self, ids: &'g [GroupId]) -> Option<&'g GroupId> {
        let mut best: Option<(&'g GroupId, usize)> = None;
        for id in ids {
            let size = self.size(id.as_str());
            if best.map_or(true, |(_, best_size)| size > best_size) {
                best = Some((id, size));
            }
        }
        best.map(|(id, _)| id)
    }

    /// All known group identifiers, in first-seen order.
    pub fn group_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// Number of distinct groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no element belongs to any group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
