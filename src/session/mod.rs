//! The tabular editing session.
//!
//! `Session` owns the loaded [`Dataset`] and is the only place it is
//! mutated. It has three observable states:
//!
//! - `Empty`: nothing imported yet
//! - `Importing`: an import was accepted and is waiting for the file's text
//! - `Loaded`: a dataset is present
//!
//! Imports are two-phase so the browser can read the file asynchronously:
//! [`Session::begin_import`] validates the media type and hands out an
//! [`ImportToken`], [`Session::complete_import`] parses the bytes. Starting a
//! new import supersedes any in-flight one; completing with a stale token
//! fails with [`CsvEditError::Superseded`] and changes nothing, so the most
//! recently started import always wins.

pub(crate) mod mutation;

use tracing::{debug, info, warn};

use crate::codec::{self, ImportReport, ParsedTable};
use crate::config::EditorConfig;
use crate::error::{CsvEditError, Result};
use crate::types::{Dataset, ExportFile, FileMeta, Record, CSV_EXPORT_MEDIA_TYPE};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Importing,
    Loaded,
}

impl SessionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Importing => "importing",
            SessionState::Loaded => "loaded",
        }
    }
}

/// Identifies one accepted import. Only the newest token can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportToken {
    generation: u64,
}

impl ImportToken {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct PendingImport {
    token: ImportToken,
    file_name: String,
}

/// An editing session over a single CSV table.
#[derive(Debug)]
pub struct Session {
    config: EditorConfig,
    dataset: Dataset,
    loaded: bool,
    pending: Option<PendingImport>,
    last_generation: u64,
    dirty: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            dataset: Dataset::default(),
            loaded: false,
            pending: None,
            last_generation: 0,
            dirty: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.pending.is_some() {
            SessionState::Importing
        } else if self.loaded {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// The current table. Empty until the first successful import.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Whether the table changed since the last import or export.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ---- Import ----

    /// Accept a file for import if its declared media type is CSV.
    ///
    /// On rejection nothing changes. On acceptance the session enters
    /// `Importing` and any previously issued token becomes stale.
    pub fn begin_import(&mut self, file: &FileMeta) -> Result<ImportToken> {
        let essence = file.media_type_essence();
        if !self.config.accepts_media_type(&essence) {
            warn!(file = %file.name, media_type = %file.media_type, "rejected non-CSV file");
            return Err(CsvEditError::InvalidFileType(file.media_type.clone()));
        }

        self.last_generation += 1;
        let token = ImportToken {
            generation: self.last_generation,
        };
        let previous = self.pending.replace(PendingImport {
            token,
            file_name: file.name.clone(),
        });
        if let Some(previous) = previous {
            debug!(
                superseded = previous.token.generation,
                by = token.generation,
                "in-flight import superseded"
            );
        }
        debug!(file = %file.name, generation = token.generation, "import started");
        Ok(token)
    }

    /// Parse the bytes of an accepted file and replace the dataset.
    ///
    /// Fails with `Superseded` if `token` is not the newest import, and with
    /// `EmptyFile` if the file has no data rows. In both cases, and on codec
    /// errors, the dataset is left as it was.
    pub fn complete_import(&mut self, token: ImportToken, data: &[u8]) -> Result<ImportReport> {
        let pending = match self.pending.take() {
            Some(p) if p.token == token => p,
            other => {
                self.pending = other;
                debug!(generation = token.generation, "dropping stale import");
                return Err(CsvEditError::Superseded);
            }
        };

        let ParsedTable {
            headers,
            rows,
            report,
        } = codec::parse(data, &self.config.codec)?;

        if rows.is_empty() {
            warn!(file = %pending.file_name, "file has no data rows");
            return Err(CsvEditError::EmptyFile);
        }
        if report.has_adjustments() {
            warn!(
                file = %pending.file_name,
                padded_rows = report.padded_rows,
                truncated_rows = report.truncated_rows,
                renamed_headers = report.renamed_headers,
                "normalized irregular CSV"
            );
        }

        self.dataset = Dataset::new(headers, rows).with_source_file_name(pending.file_name);
        self.loaded = true;
        self.dirty = false;
        info!(
            file = self.dataset.source_file_name().unwrap_or_default(),
            rows = self.dataset.row_count(),
            columns = self.dataset.headers().len(),
            "import complete"
        );
        Ok(report)
    }

    /// Abandon an in-flight import. Returns `false` if `token` is stale.
    pub fn cancel_import(&mut self, token: ImportToken) -> bool {
        if !self.pending.as_ref().is_some_and(|p| p.token == token) {
            return false;
        }
        self.pending = None;
        debug!(generation = token.generation, "import cancelled");
        true
    }

    /// Validate and import a file whose contents are already in memory.
    pub fn import(&mut self, file: &FileMeta, data: &[u8]) -> Result<ImportReport> {
        let token = self.begin_import(file)?;
        self.complete_import(token, data)
    }

    // ---- Editing ----

    /// Set the value at `(row, column)`.
    ///
    /// Rejects unknown rows (`IndexOutOfRange`) and columns (`UnknownColumn`).
    pub fn set_cell(&mut self, row: usize, column: &str, value: &str) -> Result<()> {
        if mutation::apply_cell_edit(&mut self.dataset, row, column, value)? {
            self.dirty = true;
            debug!(row, column, "cell edited");
        }
        Ok(())
    }

    /// Append an all-empty row and return its index.
    pub fn add_row(&mut self) -> usize {
        let index = mutation::append_blank_row(&mut self.dataset);
        self.dirty = true;
        debug!(row = index, "row added");
        index
    }

    /// Delete the row at `row`. Out-of-range indices are a no-op.
    pub fn delete_row(&mut self, row: usize) -> Option<Record> {
        let removed = mutation::remove_row(&mut self.dataset, row);
        if removed.is_some() {
            self.dirty = true;
            debug!(row, "row deleted");
        } else {
            debug!(row, rows = self.dataset.row_count(), "delete ignored: no such row");
        }
        removed
    }

    // ---- Export ----

    /// Serialize the table to CSV and name the download.
    pub fn export(&mut self) -> Result<ExportFile> {
        let contents = codec::write(&self.dataset, &self.config.codec)?;
        let file_name = self
            .dataset
            .source_file_name()
            .map_or_else(|| self.config.default_file_name.clone(), str::to_string);
        self.dirty = false;
        info!(file = %file_name, bytes = contents.len(), "exported");
        Ok(ExportFile {
            file_name,
            media_type: CSV_EXPORT_MEDIA_TYPE.to_string(),
            contents,
        })
    }
}
