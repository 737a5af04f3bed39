//! Editor configuration.
//!
//! Passed from JavaScript as a plain object (camelCase keys, every field
//! optional) or parsed from JSON on native builds.

use serde::{Deserialize, Serialize};

use crate::codec::CodecOptions;
use crate::error::{CsvEditError, Result};

/// Settings for an editing session and its UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Download name used when no file has been imported.
    pub default_file_name: String,
    /// Media types (parameters stripped, lowercase) accepted as CSV.
    pub accepted_media_types: Vec<String>,
    /// How long a toast stays visible, in milliseconds.
    pub toast_duration_ms: u32,
    /// `tracing` filter directive, e.g. `"warn"` or `"csvedit=debug"`.
    pub log_level: String,
    pub codec: CodecOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_file_name: "data.csv".to_string(),
            accepted_media_types: vec![
                "text/csv".to_string(),
                "application/csv".to_string(),
                "text/x-csv".to_string(),
                "application/x-csv".to_string(),
            ],
            toast_duration_ms: 4000,
            log_level: "warn".to_string(),
            codec: CodecOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CsvEditError::Config(e.to_string()))
    }

    /// Whether a media type essence (see [`crate::types::FileMeta::media_type_essence`])
    /// counts as CSV.
    #[must_use]
    pub fn accepts_media_type(&self, essence: &str) -> bool {
        self.accepted_media_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence))
    }
}
