//! Canvas elements - the building blocks of scenes.
//!
//! The field layout mirrors the Excalidraw element JSON so that documents
//! round-trip: anything this crate does not interpret is kept in
//! [`Element::extra`] and written back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default stroke colour for elements that omit one.
pub const DEFAULT_STROKE_COLOR: &str = "#1e1e1e";

/// Default stroke width for elements that omit one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element ID from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of an authoring-time group.
///
/// Groups are never stored as objects; membership is derived from the
/// `groupIds` of each element (see [`crate::group::GroupIndex`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Create a group ID from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The kind of graphical primitive an element draws.
///
/// Unknown kinds are carried verbatim in [`ElementType::Other`] so newer
/// documents survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// A rectangle.
    Rectangle,
    /// A diamond.
    Diamond,
    /// An ellipse.
    Ellipse,
    /// An arrow, possibly bound to elements at either end.
    Arrow,
    /// A plain line.
    Line,
    /// A text label.
    Text,
    /// A raster image (screenshots are usually these).
    Image,
    /// A freehand stroke.
    Freedraw,
    /// A frame container.
    Frame,
    /// Any other kind, by its serialized name.
    Other(String),
}

impl ElementType {
    /// The serialized name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Arrow => "arrow",
            Self::Line => "line",
            Self::Text => "text",
            Self::Image => "image",
            Self::Freedraw => "freedraw",
            Self::Frame => "frame",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ElementType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "rectangle" => Self::Rectangle,
            "diamond" => Self::Diamond,
            "ellipse" => Self::Ellipse,
            "arrow" => Self::Arrow,
            "line" => Self::Line,
            "text" => Self::Text,
            "image" => Self::Image,
            "freedraw" => Self::Freedraw,
            "frame" => Self::Frame,
            _ => Self::Other(name),
        }
    }
}

impl From<ElementType> for String {
    fn from(kind: ElementType) -> Self {
        match kind {
            ElementType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// The element an arrow end is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// The bound element.
    pub element_id: ElementId,
    /// Focus, gap and any other binding attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Binding {
    /// Bind to the given element.
    pub fn to(element_id: impl Into<ElementId>) -> Self {
        Self {
            element_id: element_id.into(),
            extra: Map::new(),
        }
    }
}

/// Auxiliary metadata bag.
///
/// When an element is placed into a derived scene its native link is removed
/// and the pre-strip link and stroke are stashed here, so the viewer can
/// override the stroke for highlighting and later restore it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomData {
    /// Link the element carried before it was stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Stroke colour before any highlight override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke width before any highlight override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Host-defined keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_stroke_color() -> String {
    DEFAULT_STROKE_COLOR.to_string()
}

const fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// A canvas element: geometry, kind, group memberships and an optional link.
///
/// Elements are treated as immutable values; every transform in this crate
/// returns new elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element kind.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// X position in scene coordinates.
    #[serde(default)]
    pub x: f64,
    /// Y position in scene coordinates.
    #[serde(default)]
    pub y: f64,
    /// Width in scene units.
    #[serde(default)]
    pub width: f64,
    /// Height in scene units.
    #[serde(default)]
    pub height: f64,
    /// Group memberships, innermost first, in authored order.
    #[serde(default)]
    pub group_ids: Vec<GroupId>,
    /// Hyperlink annotation.
    #[serde(default)]
    pub link: Option<String>,
    /// Stroke colour.
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    /// Stroke width.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Auxiliary metadata (see [`CustomData`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    /// Editor tombstone flag.
    #[serde(default)]
    pub is_deleted: bool,
    /// Text content for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Element bound to the start of an arrow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_binding: Option<Binding>,
    /// Element bound to the end of an arrow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_binding: Option<Binding>,
    /// Every other attribute of the source document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Element {
    /// Create a new element of the given kind at the origin with zero size.
    pub fn new(id: impl Into<ElementId>, element_type: ElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            group_ids: Vec::new(),
            link: None,
            stroke_color: default_stroke_color(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            custom_data: None,
            is_deleted: false,
            text: None,
            start_binding: None,
            end_binding: None,
            extra: Map::new(),
        }
    }

    /// Set position and size.
    #[must_use]
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Set the group memberships.
    #[must_use]
    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.group_ids = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set the link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the stroke.
    #[must_use]
    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke_color = color.into();
        self.stroke_width = width;
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Bind the arrow ends to the given elements.
    #[must_use]
    pub fn with_bindings(
        mut self,
        start: impl Into<ElementId>,
        end: impl Into<ElementId>,
    ) -> Self {
        self.start_binding = Some(Binding::to(start));
        self.end_binding = Some(Binding::to(end));
        self
    }

    /// The native link, treating an empty string as absent.
    #[must_use]
    pub fn active_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.is_empty())
    }

    /// The link stashed in the metadata bag when the element was stripped.
    #[must_use]
    pub fn stashed_link(&self) -> Option<&str> {
        self.custom_data
            .as_ref()
            .and_then(|data| data.link.as_deref())
            .filter(|link| !link.is_empty())
    }

    /// Whether the element belongs to the given group.
    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.group_ids.iter().any(|g| g.as_str() == group)
    }

    /// Check if a point (in scene coordinates) is within this element.
    ///
    /// All four edges are inclusive.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.x <= x && x <= self.x + self.width && self.y <= y && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_excalidraw_element() {
        let json = r##"{
            "id": "abc",
            "type": "rectangle",
            "x": 10, "y": 20, "width": 30, "height": 40,
            "groupIds": ["g1", "g2"],
            "link": "https://excalidraw.com/?element=xyz",
            "strokeColor": "#000000",
            "strokeWidth": 1,
            "roughness": 1,
            "seed": 42
        }"##;

        let element: Element = serde_json::from_str(json).expect("should parse");
        assert_eq!(element.id.as_str(), "abc");
        assert_eq!(element.element_type, ElementType::Rectangle);
        assert_eq!(element.group_ids, vec![GroupId::from("g1"), GroupId::from("g2")]);
        assert_eq!(element.stroke_width, 1.0);
        assert_eq!(element.extra.get("seed"), Some(&Value::from(42)));
    }

    #[test]
    fn test_unknown_fields_and_kinds_survive_round_trip() {
        let json = r#"{"id":"e","type":"magicframe","roundness":{"type":3}}"#;
        let element: Element = serde_json::from_str(json).expect("should parse");
        assert_eq!(element.element_type, ElementType::Other("magicframe".into()));

        let value = serde_json::to_value(&element).expect("should serialize");
        assert_eq!(value["type"], "magicframe");
        assert_eq!(value["roundness"]["type"], 3);
        assert_eq!(value["strokeColor"], DEFAULT_STROKE_COLOR);
    }

    #[test]
    fn test_custom_data_keeps_host_keys() {
        let json = r#"{"id":"e","type":"text","customData":{"link":"L","owner":"me"}}"#;
        let element: Element = serde_json::from_str(json).expect("should parse");
        assert_eq!(element.stashed_link(), Some("L"));

        let data = element.custom_data.expect("custom data");
        assert_eq!(data.extra.get("owner"), Some(&Value::from("me")));
    }

    #[test]
    fn test_empty_link_is_not_active() {
        let element = Element::new("e", ElementType::Text).with_link("");
        assert!(element.active_link().is_none());
    }

    #[test]
    fn test_contains_point_is_edge_inclusive() {
        let element = Element::new("e", ElementType::Rectangle).with_bounds(100.0, 100.0, 200.0, 50.0);

        assert!(element.contains_point(150.0, 125.0));
        assert!(element.contains_point(100.0, 100.0));
        assert!(element.contains_point(300.0, 150.0));
        assert!(!element.contains_point(50.0, 50.0));
        assert!(!element.contains_point(300.1, 125.0));
    }
}
