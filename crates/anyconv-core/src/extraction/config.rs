//! Extraction configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default path separator
pub const DEFAULT_SEPARATOR: &str = ".";

/// Stand-in for `.` inside regex segments (U+2024 ONE DOT LEADER)
pub const DOT_ALTERNATIVE: &str = "\u{2024}";

/// Flags that change which results `get_items` keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractOption {
    /// Drop results that resolved to null
    OmitNull,
}

/// Configuration for an [`Extractor`](super::Extractor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Separator between path segments
    pub separator: String,
    /// Text rewritten to `.` before a regex segment is compiled
    pub dot_alternative: String,
    /// Options applied to every extraction
    pub options: Vec<ExtractOption>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            dot_alternative: DOT_ALTERNATIVE.to_string(),
            options: Vec::new(),
        }
    }
}

impl ExtractionConfig {
    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_option(mut self, option: ExtractOption) -> Self {
        if !self.options.contains(&option) {
            self.options.push(option);
        }
        self
    }

    pub fn has_option(&self, option: ExtractOption) -> bool {
        self.options.contains(&option)
    }
}
