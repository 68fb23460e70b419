//! Canvas documents as stored by the editor.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element::Element;
use crate::error::FlowResult;

/// A canvas document: the Excalidraw file wrapper around its elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    /// Document type marker, `"excalidraw"` for editor files.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Application that wrote the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Elements in document (z-) order, deleted ones included.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Editor view state, carried through untouched.
    #[serde(default)]
    pub app_state: Map<String, Value>,
    /// Embedded binary files keyed by file id, carried through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub files: Map<String, Value>,
}

impl CanvasDocument {
    /// Wrap a list of elements in a document.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            document_type: Some("excalidraw".to_string()),
            version: Some(2),
            elements,
            ..Self::default()
        }
    }

    /// Parse a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a canvas document.
    pub fn from_json(json: &str) -> FlowResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        tracing::debug!("Parsed document with {} elements", document.elements.len());
        Ok(document)
    }

    /// Load a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading document from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> FlowResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Elements that are not deleted, in document order.
    pub fn scene_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementType;
    use std::io::Write;

    const DOCUMENT: &str = r##"{
        "type": "excalidraw",
        "version": 2,
        "source": "https://excalidraw.com",
        "elements": [
            {"id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 10, "height": 10, "groupIds": ["g1"]},
            {"id": "b", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10, "text": "hi", "isDeleted": true}
        ],
        "appState": {"viewBackgroundColor": "#ffffff"},
        "files": {}
    }"##;

    #[test]
    fn test_parse_document() {
        let document = CanvasDocument::from_json(DOCUMENT).expect("should parse");
        assert_eq!(document.document_type.as_deref(), Some("excalidraw"));
        assert_eq!(document.elements.len(), 2);
        assert_eq!(document.elements[1].element_type, ElementType::Text);
        assert_eq!(document.app_state["viewBackgroundColor"], "#ffffff");
    }

    #[test]
    fn test_scene_elements_skip_deleted() {
        let document = CanvasDocument::from_json(DOCUMENT).expect("should parse");
        let ids: Vec<_> = document.scene_elements().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_round_trip_keeps_elements() {
        let document = CanvasDocument::from_json(DOCUMENT).expect("should parse");
        let json = document.to_json().expect("should serialize");
        let again = CanvasDocument::from_json(&json).expect("should reparse");
        assert_eq!(again.elements, document.elements);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(DOCUMENT.as_bytes()).expect("write");

        let document = CanvasDocument::load(file.path()).expect("should load");
        assert_eq!(document.elements.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = CanvasDocument::from_json("{not json").expect_err("should fail");
        assert!(matches!(err, crate::FlowError::Serialization(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CanvasDocument::load("/definitely/not/here.excalidraw").expect_err("should fail");
        assert!(matches!(err, crate::FlowError::Io(_)));
    }
}
