//! Copies finished translations between Ren'Py `translate` scripts.
//!
//! A translated source script is reduced to a [`TranslationTable`]; the table is
//! then used to fill the empty slots of a target script line by line.

pub mod error;
pub mod line;
pub mod process;
pub mod reader;
pub mod scanner;
pub mod types;
pub mod writer;

pub use error::{Result, RpyTlError};
pub use process::{export_table, extract_file, patch_file, patch_tree};
pub use reader::extract_translations;
pub use types::{
    DialogueEntry, MatchMode, PatchOptions, PatchOutcome, PatchReport, PatchStatus, StringEntry,
    TranslationTable, TreeReport,
};
pub use writer::patch_lines;

/// Patches `target` text with the translations found in `source` text.
pub fn patch_text(source: &str, target: &str, options: &PatchOptions) -> PatchOutcome {
    let table = extract_translations(line::split_lines(source), options);
    patch_lines(line::split_lines(target), &table, options)
}
