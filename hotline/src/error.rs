use std::path::PathBuf;

use thiserror::Error;

use crate::navigate::NavigationFailure;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum HotlineError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Navigation(#[from] NavigationFailure),

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}
