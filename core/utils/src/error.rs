use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Reference {reference:?} and target {target:?} overlap")]
    OverlappingTrees { reference: PathBuf, target: PathBuf },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, UtilsError>;
