//! Data types for the CSV editor.

mod dataset;
mod file;

pub use dataset::*;
pub use file::*;
