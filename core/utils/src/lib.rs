//! Filesystem chores around translation trees: bulk renames, prefixing and
//! removal of files already present in a reference tree.

use std::path::{Path, PathBuf};

pub mod dedup;
pub mod error;
pub mod prefix;
pub mod rename;

pub use error::{Result, UtilsError};

/// A rename that was performed, or would be on a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: Vec<Renamed>,
    pub failed: usize,
}

pub(crate) fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(UtilsError::DirectoryNotFound(path.to_path_buf()))
    }
}

/// Prepends `prefix` to the final component of `path`.
pub(crate) fn prefixed(path: &Path, prefix: &str) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut new_name = std::ffi::OsString::from(prefix);
    new_name.push(name);
    Some(path.with_file_name(new_name))
}
