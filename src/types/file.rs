use serde::Serialize;

/// Media type attached to exported CSV downloads.
pub const CSV_EXPORT_MEDIA_TYPE: &str = "text/csv;charset=utf-8";

/// What the browser tells us about a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// File name, e.g. `people.csv`.
    pub name: String,
    /// Declared media type (`File.type`), possibly empty.
    pub media_type: String,
}

impl FileMeta {
    #[must_use]
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// The media type without parameters, lowercased: `Text/CSV; charset=x` → `text/csv`.
    #[must_use]
    pub fn media_type_essence(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// A serialized table ready to be offered as a download.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub media_type: String,
    pub contents: String,
}
