use anyhow::{Context, Result};
use rpytl::{MatchMode, PatchOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A patch job as written in a TOML file. Every key is optional so that the
/// command line can supply or override it.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatchJob {
    pub source_document: Option<PathBuf>,
    pub target_document: Option<PathBuf>,
    pub match_mode: Option<MatchMode>,
    pub require_empty_slot: Option<bool>,
    pub language: Option<String>,
}

impl PatchJob {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn options(&self) -> PatchOptions {
        let defaults = PatchOptions::default();
        PatchOptions {
            match_mode: self.match_mode.unwrap_or(defaults.match_mode),
            require_empty_slot: self
                .require_empty_slot
                .unwrap_or(defaults.require_empty_slot),
            language: self.language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_job() {
        let job = PatchJob::parse(
            r#"
source_document = "base/script.rpy"
target_document = "out/script.rpy"
match_mode = "by_text"
require_empty_slot = false
language = "spanish"
"#,
        )
        .unwrap();

        assert_eq!(job.source_document, Some(PathBuf::from("base/script.rpy")));
        let options = job.options();
        assert_eq!(options.match_mode, MatchMode::ByText);
        assert!(!options.require_empty_slot);
        assert_eq!(options.language.as_deref(), Some("spanish"));
    }

    #[test]
    fn test_empty_job_uses_defaults() {
        let job = PatchJob::parse("").unwrap();
        assert_eq!(job, PatchJob::default());
        assert_eq!(job.options(), PatchOptions::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(PatchJob::parse("match = \"by_tag\"").is_err());
    }
}
