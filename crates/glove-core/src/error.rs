use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GloveError {
    #[error("unknown embedding model: {0}")]
    KeyNotFound(String),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("pooling method \"{mode}\" not implemented for model \"{model}\"")]
    UnsupportedPoolingMode { mode: String, model: String },

    #[error("no embedding model loaded")]
    NoModelLoaded,
}

/// Failures while reading an embedding file. A load that fails with any of
/// these leaves the previously loaded table in place.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no model file found in {}", .0.display())]
    NoModelFile(PathBuf),

    #[error(
        "{} holds {} candidate model files: {}",
        path.display(),
        candidates.len(),
        display_paths(candidates)
    )]
    AmbiguousModelDir {
        path: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type GloveResult<T> = Result<T, GloveError>;
