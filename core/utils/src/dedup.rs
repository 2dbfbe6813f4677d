use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{Result, UtilsError, require_dir};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Relative paths removed from the target, or that would be on a dry run.
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}

/// Deletes every file in `target` whose relative path also names a file in
/// `reference`. The reference tree is never modified.
///
/// Both trees must be distinct: equal or nested directories are rejected
/// before anything is walked.
pub fn remove_relative_duplicates(
    reference: &Path,
    target: &Path,
    dry_run: bool,
) -> Result<DedupReport> {
    require_dir(reference)?;
    require_dir(target)?;
    ensure_disjoint(reference, target)?;

    let mut report = DedupReport::default();
    for entry in WalkDir::new(reference).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(reference) else {
            continue;
        };
        let candidate = target.join(rel);
        if !candidate.is_file() {
            continue;
        }

        if !dry_run {
            if let Err(e) = fs::remove_file(&candidate) {
                warn!("Failed to delete {:?}: {}", candidate, e);
                report.failed += 1;
                continue;
            }
        }
        info!("Removed duplicate {:?}", rel);
        report.removed.push(rel.to_path_buf());
    }

    Ok(report)
}

fn ensure_disjoint(reference: &Path, target: &Path) -> Result<()> {
    let canonical = |path: &Path| {
        fs::canonicalize(path).map_err(|source| UtilsError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    let reference_abs = canonical(reference)?;
    let target_abs = canonical(target)?;
    if reference_abs.starts_with(&target_abs) || target_abs.starts_with(&reference_abs) {
        return Err(UtilsError::OverlappingTrees {
            reference: reference_abs,
            target: target_abs,
        });
    }
    Ok(())
}
