use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use rpytl::{MatchMode, PatchOptions, PatchReport, PatchStatus};
use std::path::{Path, PathBuf};

use crate::config::PatchJob;

#[derive(Clone, Copy, ValueEnum)]
pub enum MatchModeArg {
    /// Match dialogue by block identifier and original text
    ByTag,
    /// Match dialogue by original text only
    ByText,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::ByTag => MatchMode::ByTag,
            MatchModeArg::ByText => MatchMode::ByText,
        }
    }
}

#[derive(Args)]
pub struct MatchArgs {
    /// How dialogue blocks are correlated
    #[arg(long, value_enum)]
    match_mode: Option<MatchModeArg>,
    /// Overwrite slots that already hold a translation
    #[arg(long)]
    overwrite: bool,
    /// Only handle `translate <LANGUAGE> ...` blocks
    #[arg(long)]
    language: Option<String>,
}

impl MatchArgs {
    fn apply(self, mut options: PatchOptions) -> PatchOptions {
        if let Some(mode) = self.match_mode {
            options.match_mode = mode.into();
        }
        if self.overwrite {
            options.require_empty_slot = false;
        }
        if self.language.is_some() {
            options.language = self.language;
        }
        options
    }
}

#[derive(Subcommand)]
pub enum TlCommands {
    /// Fill the empty slots of TARGET with translations from SOURCE
    Patch {
        /// Translated source script
        source: Option<PathBuf>,
        /// Script to patch in place
        target: Option<PathBuf>,
        /// TOML job file (CLI arguments take precedence)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        matching: MatchArgs,
    },
    /// Patch every .rpy under TARGET_DIR from its counterpart under SOURCE_DIR
    PatchDir {
        /// Directory of translated scripts
        source_dir: PathBuf,
        /// Directory of scripts to patch in place
        target_dir: PathBuf,
        #[command(flatten)]
        matching: MatchArgs,
    },
    /// Dump the translations found in a script to JSON
    Extract {
        /// Translated source script
        source: PathBuf,
        /// Output JSON file (optional, defaults to source with .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        matching: MatchArgs,
    },
}

pub fn handle(cmd: TlCommands) -> Result<()> {
    match cmd {
        TlCommands::Patch {
            source,
            target,
            config,
            matching,
        } => {
            let job = match config {
                Some(path) => PatchJob::load(&path)?,
                None => PatchJob::default(),
            };
            let options = matching.apply(job.options());
            let source = source
                .or(job.source_document)
                .context("No source document given (argument or source_document)")?;
            let target = target
                .or(job.target_document)
                .context("No target document given (argument or target_document)")?;
            tl_patch(&source, &target, &options)
        }
        TlCommands::PatchDir {
            source_dir,
            target_dir,
            matching,
        } => tl_patch_dir(&source_dir, &target_dir, &matching.apply(PatchOptions::default())),
        TlCommands::Extract {
            source,
            output,
            matching,
        } => tl_extract(&source, &output, &matching.apply(PatchOptions::default())),
    }
}

pub fn tl_patch(source: &Path, target: &Path, options: &PatchOptions) -> Result<()> {
    println!("Patching {:?} from {:?}", target, source);
    let report = rpytl::patch_file(source, target, options)?;
    print_report(target, &report);
    Ok(())
}

pub fn tl_patch_dir(source_dir: &Path, target_dir: &Path, options: &PatchOptions) -> Result<()> {
    let report = rpytl::patch_tree(source_dir, target_dir, options)?;
    for (name, file_report) in &report.files {
        print_report(Path::new(name), file_report);
    }
    for name in &report.skipped {
        println!("Skipped {} (no counterpart in {:?})", name, target_dir);
    }
    println!(
        "Patched {} files: {} dialogue, {} strings applied",
        report.files.len(),
        report.dialogue_applied(),
        report.strings_applied()
    );
    Ok(())
}

pub fn tl_extract(source: &Path, output: &Option<PathBuf>, options: &PatchOptions) -> Result<()> {
    let table = rpytl::extract_file(source, options)?;

    let out_path = match output {
        Some(p) => p.clone(),
        None => source.with_extension("json"),
    };

    rpytl::export_table(&table, &out_path)?;
    println!(
        "Extracted {} dialogue and {} string translations to {:?}",
        table.dialogue.len(),
        table.strings.len(),
        out_path
    );
    Ok(())
}

fn print_report(target: &Path, report: &PatchReport) {
    match report.status {
        PatchStatus::NoTranslations => {
            println!("No translations found in source, {:?} left untouched", target);
        }
        PatchStatus::Unchanged | PatchStatus::Applied => {
            println!(
                "{:?}: found {} dialogue / {} strings, applied {} dialogue / {} strings",
                target,
                report.dialogue_found,
                report.strings_found,
                report.dialogue_applied,
                report.strings_applied
            );
        }
    }
}
