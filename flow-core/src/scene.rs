//! Scenes: ordered, shared sequences of elements.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::element::Element;

/// Order-independent identity of a scene: its element ids, sorted and
/// deduplicated.
///
/// Ids are kept as a list rather than joined into one string, so ids that
/// contain a separator character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SceneKey(Box<[String]>);

impl SceneKey {
    /// Compute the key of a sequence of elements.
    #[must_use]
    pub fn of<'e>(elements: impl IntoIterator<Item = &'e Element>) -> Self {
        let mut ids: Vec<String> = elements.into_iter().map(|e| e.id.to_string()).collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids.into_boxed_slice())
    }

    /// The sorted member ids.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for SceneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Axis-aligned common bounds of a set of elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Smallest x of any element.
    pub min_x: f64,
    /// Smallest y of any element.
    pub min_y: f64,
    /// Largest right edge of any element.
    pub max_x: f64,
    /// Largest bottom edge of any element.
    pub max_y: f64,
}

impl Bounds {
    /// Common bounds of the given elements.
    ///
    /// Returns `None` for no elements or when any geometry is not finite.
    #[must_use]
    pub fn of<'e>(elements: impl IntoIterator<Item = &'e Element>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for element in elements {
            let (x0, x1) = ordered(element.x, element.x + element.width);
            let (y0, y1) = ordered(element.y, element.y + element.height);
            if ![x0, x1, y0, y1].iter().all(|v| v.is_finite()) {
                return None;
            }
            bounds = Some(match bounds {
                None => Self {
                    min_x: x0,
                    min_y: y0,
                    max_x: x1,
                    max_y: y1,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(x0),
                    min_y: b.min_y.min(y0),
                    max_x: b.max_x.max(x1),
                    max_y: b.max_y.max(y1),
                },
            });
        }
        bounds
    }

    /// Width of the bounds.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounds.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// An ordered sequence of elements.
///
/// Cloning a scene shares the underlying elements; [`Scene::ptr_eq`] tells
/// whether two scenes are the same deduplicated object. Equality (`==`)
/// compares membership only, ignoring order.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Arc<[Element]>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Scene {
    /// Create a scene from elements.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    /// The elements in scene order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate over the elements in scene order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Get an element by id.
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_str() == id)
    }

    /// Whether an element with this id is in the scene.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get_element(id).is_some()
    }

    /// Element ids in scene order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.id.as_str())
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The membership key of this scene.
    #[must_use]
    pub fn key(&self) -> SceneKey {
        SceneKey::of(self.elements.iter())
    }

    /// Common bounds of the scene, if it has well-formed geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.elements.iter())
    }

    /// Whether both scenes are the same shared object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }
}

impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.key() == other.key()
    }
}

impl Eq for Scene {}

impl From<Vec<Element>> for Scene {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

impl<'s> IntoIterator for &'s Scene {
    type Item = &'s Element;
    type IntoIter = std::slice::Iter<'s, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Scene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements.iter())
    }
}
