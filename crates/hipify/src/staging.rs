//! Scratch copies of the files being translated.
//!
//! A `foo.cu` input is copied to `foo.hip.cu`; analysis and rewriting happen
//! on the copy, which is renamed back over `foo.cu` once edits are written.

use hipify_api::{HipifyError, HipifyResult, SourceFile, TranslatorConfig};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Scratch path for `path`, if it carries the source extension
///
/// Only a trailing extension counts: `kernel.cuh` and `a.cu.bak` are not
/// staged.
pub fn scratch_path(path: &Path, config: &TranslatorConfig) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(config.source_extension.as_str())?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(format!("{stem}{}", config.marker_extension)))
}

/// A source file and its scratch copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    original: PathBuf,
    scratch: PathBuf,
}

impl StagedFile {
    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    /// Read the scratch copy for analysis
    pub fn load(&self) -> HipifyResult<SourceFile> {
        let text = fs::read_to_string(&self.scratch)
            .map_err(|e| HipifyError::Io(self.scratch.clone(), e))?;
        Ok(SourceFile::new(self.scratch.clone(), text))
    }

    /// Move the scratch copy back over the original
    pub fn restore(self) -> HipifyResult<PathBuf> {
        fs::rename(&self.scratch, &self.original)
            .map_err(|e| HipifyError::Io(self.scratch.clone(), e))?;
        debug!("Restored {} from {}", self.original.display(), self.scratch.display());
        Ok(self.original)
    }

    /// Remove the scratch copy, leaving the original untouched
    pub fn discard(self) -> HipifyResult<()> {
        fs::remove_file(&self.scratch).map_err(|e| HipifyError::Io(self.scratch.clone(), e))
    }
}

/// Copy `path` to its scratch location
///
/// Returns `Ok(None)` for files that are not translated. A file already
/// present at the scratch location is never overwritten; staging fails with
/// an [`io::ErrorKind::AlreadyExists`] error instead.
pub fn stage(path: &Path, config: &TranslatorConfig) -> HipifyResult<Option<StagedFile>> {
    let Some(scratch) = scratch_path(path, config) else {
        warn!("Skipping {}: not a {} file", path.display(), config.source_extension);
        return Ok(None);
    };

    let mut input = fs::File::open(path).map_err(|e| HipifyError::Io(path.to_path_buf(), e))?;
    let mut output = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&scratch)
        .map_err(|e| HipifyError::Io(scratch.clone(), e))?;
    io::copy(&mut input, &mut output).map_err(|e| HipifyError::Io(scratch.clone(), e))?;
    debug!("Staged {} as {}", path.display(), scratch.display());

    Ok(Some(StagedFile {
        original: path.to_path_buf(),
        scratch,
    }))
}
