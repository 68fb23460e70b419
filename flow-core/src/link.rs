//! Links and their canonical form.
//!
//! Element-links and group-links share one textual prefix; what follows the
//! prefix is either an element id or a group id, and which one it is depends
//! on the document the link is resolved against.
//!
//! Canonicalization rewrites every link that reaches a group (directly, or via
//! a grouped element) to a group-link naming the *largest* group of its
//! representative element. Several links into overlapping groups therefore
//! collapse onto one key.

use std::borrow::Borrow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::element::{Element, GroupId};
use crate::group::GroupIndex;

/// Prefix shared by element-links and group-links.
pub const ELEMENT_LINK_PREFIX: &str = "https://excalidraw.com/?element=";

/// Build the link text for an element or group id.
#[must_use]
pub fn link_to(id: &str) -> String {
    format!("{ELEMENT_LINK_PREFIX}{id}")
}

/// Extract the element or group id a link names, if it has the link prefix.
#[must_use]
pub fn link_target(link: &str) -> Option<&str> {
    link.strip_prefix(ELEMENT_LINK_PREFIX)
}

/// Canonical link key: the stable identity of a target scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkKey(String);

impl LinkKey {
    /// Wrap a link string.
    #[must_use]
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LinkKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LinkKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What a link points at within a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkTarget<'a> {
    /// An element with this id exists.
    Element(&'a Element),
    /// No element has this id, but a group does.
    Group(&'a str),
    /// Neither an element nor a group, or not a link this crate understands.
    Dangling,
}

/// Resolves links against one document.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    by_id: HashMap<&'a str, &'a Element>,
    groups: &'a GroupIndex<'a>,
}

impl<'a> LinkResolver<'a> {
    /// Build a resolver over the document the group index was built from.
    #[must_use]
    pub fn new(elements: &'a [Element], groups: &'a GroupIndex<'a>) -> Self {
        let by_id = elements.iter().map(|e| (e.id.as_str(), e)).collect();
        Self { by_id, groups }
    }

    /// Resolve a link. Element ids take precedence over group ids.
    #[must_use]
    pub fn resolve(&self, link: &str) -> LinkTarget<'a> {
        let Some(id) = link_target(link) else {
            return LinkTarget::Dangling;
        };
        if let Some(&element) = self.by_id.get(id) {
            return LinkTarget::Element(element);
        }
        self.groups
            .lookup(id)
            .map_or(LinkTarget::Dangling, LinkTarget::Group)
    }

    /// The group index this resolver consults.
    #[must_use]
    pub fn groups(&self) -> &'a GroupIndex<'a> {
        self.groups
    }
}

/// Rewrites element links into canonical group-links.
#[derive(Debug)]
pub struct LinkCanonicalizer<'a> {
    resolver: LinkResolver<'a>,
}

impl<'a> LinkCanonicalizer<'a> {
    /// Build a canonicalizer for the given document and its group index.
    #[must_use]
    pub fn new(elements: &'a [Element], groups: &'a GroupIndex<'a>) -> Self {
        Self {
            resolver: LinkResolver::new(elements, groups),
        }
    }

    /// The canonical form of a single link.
    ///
    /// Returns `None` when the link stays as authored: it is dangling, or
    /// its representative element belongs to no group.
    #[must_use]
    pub fn canonical_link(&self, link: &str) -> Option<String> {
        let representative = match self.resolver.resolve(link) {
            LinkTarget::Element(target) => target,
            LinkTarget::Group(group) => *self.resolver.groups().members(group).first()?,
            LinkTarget::Dangling => {
                tracing::warn!("Dangling link, neither an element nor a group: {link}");
                return None;
            }
        };
        self.largest_group_of(representative)
            .map(|group| link_to(group.as_str()))
    }

    /// Rewrite the links of every element. Ids and groups are untouched.
    #[must_use]
    pub fn canonicalize(&self, elements: &[Element]) -> Vec<Element> {
        elements
            .iter()
            .map(|element| {
                let Some(link) = element.active_link() else {
                    return element.clone();
                };
                match self.canonical_link(link) {
                    Some(canonical) if canonical != link => {
                        tracing::trace!("Rewrote link on {}: {link} -> {canonical}", element.id);
                        let mut rewritten = element.clone();
                        rewritten.link = Some(canonical);
                        rewritten
                    }
                    _ => element.clone(),
                }
            })
            .collect()
    }

    fn largest_group_of(&self, element: &'a Element) -> Option<&'a GroupId> {
        self.resolver.groups().largest_group(&element.group_ids)
    }
}

/// Canonicalize a whole document in one call.
#[must_use]
pub fn canonicalize(elements: &[Element]) -> Vec<Element> {
    let groups = GroupIndex::new(elements);
    LinkCanonicalizer::new(elements, &groups).canonicalize(elements)
}
