use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{RenameReport, Renamed, Result, prefixed, require_dir};

/// Prepends `prefix` to every file and directory name below `root`.
///
/// Files are renamed first, then directories from the deepest up, so every
/// collected path is still valid when its turn comes. `root` keeps its name.
pub fn prefix_tree(root: &Path, prefix: &str, dry_run: bool) -> Result<RenameReport> {
    require_dir(root)?;

    let mut files: Vec<PathBuf> = Vec::new();
    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else {
            files.push(entry.into_path());
        }
    }

    let mut report = RenameReport::default();
    for from in files.into_iter().chain(dirs) {
        let Some(to) = prefixed(&from, prefix) else {
            continue;
        };
        if !dry_run {
            if let Err(e) = fs::rename(&from, &to) {
                warn!("Failed to rename {:?}: {}", from, e);
                report.failed += 1;
                continue;
            }
        }
        info!("Renamed {:?} -> {:?}", from, to);
        report.renamed.push(Renamed { from, to });
    }

    Ok(report)
}
