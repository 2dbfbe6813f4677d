use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{RenameReport, Renamed, Result, require_dir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    pub from_ext: String,
    pub to_ext: String,
    pub prefix: String,
    pub dry_run: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            from_ext: "rpy".to_string(),
            to_ext: "txt".to_string(),
            prefix: String::new(),
            dry_run: false,
        }
    }
}

/// Renames every `name.<from_ext>` below `root` to `<prefix>name.<to_ext>`,
/// keeping each file in its directory.
pub fn rename_extension(root: &Path, options: &RenameOptions) -> Result<RenameReport> {
    require_dir(root)?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let matches = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(&options.from_ext));
        if matches {
            candidates.push(entry.into_path());
        }
    }

    let mut report = RenameReport::default();
    for from in candidates {
        let Some(stem) = from.file_stem() else {
            continue;
        };
        let new_name = format!(
            "{}{}.{}",
            options.prefix,
            stem.to_string_lossy(),
            options.to_ext
        );
        let to = from.with_file_name(new_name);

        if to.exists() {
            warn!("Refusing to overwrite {:?} while renaming {:?}", to, from);
            report.failed += 1;
            continue;
        }
        if !options.dry_run {
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
