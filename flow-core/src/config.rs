//! Viewer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FlowResult;
use crate::highlight::HighlightStyle;

/// Configuration for a viewer session.
///
/// Every field is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Stroke applied to the elements of the current link.
    pub highlight: HighlightStyle,
    /// Select the first link when entering a view with no usable selection.
    pub auto_select_first_link: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            highlight: HighlightStyle::default(),
            auto_select_first_link: true,
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a configuration.
    pub fn from_json(json: &str) -> FlowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading viewer config from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.highlight.stroke_color, "red");
        assert_eq!(config.highlight.stroke_width, 6.0);
        assert!(config.auto_select_first_link);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{"highlight":{"strokeWidth":3}}"#).expect("parse");
        assert_eq!(config.highlight.stroke_color, "red");
        assert_eq!(config.highlight.stroke_width, 3.0);
        assert!(config.auto_select_first_link);

        let config = ViewerConfig::from_json(r#"{"autoSelectFirstLink":false}"#).expect("parse");
        assert!(!config.auto_select_first_link);
    }
}
