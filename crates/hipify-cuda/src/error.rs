use hipify_api::HipifyError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the CUDA front end itself, as opposed to problems in the
/// scanned source (those become diagnostics)
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("failed to load C++ grammar for {0}: {1}")]
    Language(PathBuf, String),

    #[error("parser produced no tree for {0}")]
    NoTree(PathBuf),
}

impl From<FrontendError> for HipifyError {
    fn from(err: FrontendError) -> Self {
        let path = match &err {
            FrontendError::Language(path, _) | FrontendError::NoTree(path) => path.clone(),
        };
        HipifyError::frontend(path, err.to_string())
    }
}
