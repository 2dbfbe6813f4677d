use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    PatchOptions, PatchReport, PatchStatus, TranslationTable, TreeReport,
    error::{Result, RpyTlError},
    extract_translations,
    line::split_lines,
    patch_lines,
};

const SCRIPT_EXTENSION: &str = "rpy";

pub fn read_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(RpyTlError::DocumentNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| RpyTlError::io(path, e))
}

/// Replaces `path` with `contents` through a sibling temporary file, so the
/// target is either fully rewritten or left as it was.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RpyTlError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| RpyTlError::io(tmp.path(), e))?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())
            .map_err(|e| RpyTlError::io(tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| RpyTlError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

pub fn extract_file(source: &Path, options: &PatchOptions) -> Result<TranslationTable> {
    let content = read_document(source)?;
    let table = extract_translations(split_lines(&content), options);
    debug!(
        "Extracted {} dialogue and {} string translations from {:?}",
        table.dialogue.len(),
        table.strings.len(),
        source
    );
    Ok(table)
}

pub fn patch_file(source: &Path, target: &Path, options: &PatchOptions) -> Result<PatchReport> {
    if !target.is_file() {
        return Err(RpyTlError::DocumentNotFound(target.to_path_buf()));
    }

    let table = extract_file(source, options)?;
    let mut report = PatchReport {
        status: PatchStatus::NoTranslations,
        dialogue_found: table.dialogue.len(),
        strings_found: table.strings.len(),
        dialogue_applied: 0,
        strings_applied: 0,
    };
    if table.is_empty() {
        info!("No translations found in {:?}, leaving {:?} untouched", source, target);
        return Ok(report);
    }

    let content = read_document(target)?;
    let outcome = patch_lines(split_lines(&content), &table, options);
    report.dialogue_applied = outcome.dialogue_applied;
    report.strings_applied = outcome.strings_applied;

    if outcome.applied() == 0 {
        report.status = PatchStatus::Unchanged;
        info!("No eligible slots in {:?}", target);
        return Ok(report);
    }

    write_document(target, &outcome.into_text())?;
    report.status = PatchStatus::Applied;
    info!(
        "Patched {:?}: {} dialogue, {} strings",
        target, report.dialogue_applied, report.strings_applied
    );
    Ok(report)
}

/// Patches every `.rpy` file under `target_dir` that has a counterpart with the
/// same relative path under `source_dir`.
pub fn patch_tree(source_dir: &Path, target_dir: &Path, options: &PatchOptions) -> Result<TreeReport> {
    for dir in [source_dir, target_dir] {
        if !dir.is_dir() {
            return Err(RpyTlError::DocumentNotFound(dir.to_path_buf()));
        }
    }

    let mut report = TreeReport::default();
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_script = entry
            .path()
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(SCRIPT_EXTENSION));
        if !is_script {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(source_dir)
            .unwrap_or(entry.path());
        let rel_name = rel.to_string_lossy().replace('\\', "/");
        let target = target_dir.join(rel);
        if !target.is_file() {
            debug!("No counterpart for {} in {:?}", rel_name, target_dir);
            report.skipped.push(rel_name);
            continue;
        }

        let file_report = patch_file(entry.path(), &target, options)?;
        report.files.push((rel_name, file_report));
    }

    Ok(report)
}

/// Writes the table as pretty JSON for inspection.
pub fn export_table(table: &TranslationTable, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    write_document(output, &json)
}
