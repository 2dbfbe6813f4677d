use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use utils::RenameReport;
use utils::dedup::remove_relative_duplicates;
use utils::prefix::prefix_tree;
use utils::rename::{RenameOptions, rename_extension};

#[derive(Subcommand)]
pub enum FilesCommands {
    /// Rename every .rpy under ROOT to <prefix><name>.txt
    Rename {
        /// Root directory to search
        root: PathBuf,
        /// Prefix added to each renamed file
        #[arg(short, long)]
        prefix: String,
        /// Extension to look for
        #[arg(long, default_value = "rpy")]
        from: String,
        /// Extension to rename to
        #[arg(long, default_value = "txt")]
        to: String,
        /// Only report what would be renamed
        #[arg(long)]
        dry_run: bool,
    },
    /// Prefix every file and directory name below a directory
    Prefix {
        /// Prefix (tag) added to each name
        prefix: String,
        /// Root directory (optional, defaults to the current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// Only report what would be renamed
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete files in TARGET that also exist in REFERENCE with the same relative path
    Dedupe {
        /// Reference directory (files here are kept)
        reference: PathBuf,
        /// Target directory (duplicates here are deleted)
        target: PathBuf,
        /// Only report what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn handle(cmd: FilesCommands) -> Result<()> {
    match cmd {
        FilesCommands::Rename {
            root,
            prefix,
            from,
            to,
            dry_run,
        } => {
            let options = RenameOptions {
                from_ext: from,
                to_ext: to,
                prefix,
                dry_run,
            };
            let report = rename_extension(&root, &options)?;
            print_renames(&report, dry_run);
            Ok(())
        }
        FilesCommands::Prefix {
            prefix,
            path,
            dry_run,
        } => {
            let report = prefix_tree(&path, &prefix, dry_run)?;
            print_renames(&report, dry_run);
            Ok(())
        }
        FilesCommands::Dedupe {
            reference,
            target,
            dry_run,
        } => files_dedupe(&reference, &target, dry_run),
    }
}

pub fn files_dedupe(reference: &Path, target: &Path, dry_run: bool) -> Result<()> {
    println!("Scanning {:?} for files already in {:?}", target, reference);
    let report = remove_relative_duplicates(reference, target, dry_run)?;
    for rel in &report.removed {
        if dry_run {
            println!("[DRY-RUN] Would delete: {}", rel.display());
        } else {
            println!("[DELETED] {}", rel.display());
        }
    }
    let status = if dry_run { "Simulated deletion of" } else { "Deleted" };
    println!("{} {} files ({} failures)", status, report.removed.len(), report.failed);
    Ok(())
}

fn print_renames(report: &RenameReport, dry_run: bool) {
    for renamed in &report.renamed {
        let verb = if dry_run { "Would rename" } else { "Renamed" };
        println!("{}: {:?} -> {:?}", verb, renamed.from, renamed.to);
    }
    println!(
        "Renamed {} entries ({} failures)",
        report.renamed.len(),
        report.failed
    );
}
