//! Finding the piece config and the scanned PDF inside a working directory.
//!
//! [`classify`] does the actual decision on a plain list of paths, so it can
//! be exercised without touching the filesystem; [`discover`] feeds it the
//! directory listing.

use crate::error::SplitError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];
pub const PDF_EXTENSION: &str = "pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub config: PathBuf,
    pub pdf: PathBuf,
    /// Further config candidates that were passed over
    pub ignored_configs: Vec<PathBuf>,
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

fn is_config(path: &Path) -> bool {
    CONFIG_EXTENSIONS.iter().any(|ext| has_extension(path, ext))
}

/// Pick the config file and the single PDF out of the files in `dir`.
///
/// Config candidates are taken in path order and the first one wins.
pub fn classify(dir: &Path, mut files: Vec<PathBuf>) -> Result<Inputs, SplitError> {
    files.sort();

    let mut configs = files.iter().filter(|p| is_config(p)).cloned();
    let config = configs.next().ok_or_else(|| SplitError::MissingConfig {
        dir: dir.to_path_buf(),
    })?;
    let ignored_configs = configs.collect();

    let mut pdfs: Vec<PathBuf> = files
        .into_iter()
        .filter(|p| has_extension(p, PDF_EXTENSION))
        .collect();

    let pdf = match pdfs.len() {
        0 => {
            return Err(SplitError::MissingPdf {
                dir: dir.to_path_buf(),
            })
        }
        1 => pdfs.remove(0),
        _ => {
            return Err(SplitError::AmbiguousPdf {
                dir: dir.to_path_buf(),
                candidates: pdfs,
            })
        }
    };

    Ok(Inputs {
        config,
        pdf,
        ignored_configs,
    })
}

/// Regular files directly inside `dir`
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Inputs> {
    let dir = dir.as_ref();
    let files = list_files(dir)?;
    tracing::debug!(count = files.len(), dir = %dir.display(), "listed directory");

    let inputs = classify(dir, files)?;
    if !inputs.ignored_configs.is_empty() {
        let ignored: Vec<_> = inputs
            .ignored_configs
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        tracing::warn!(
            "Multiple config files found, using '{}' and ignoring {}",
            inputs.config.display(),
            ignored.join(", ")
        );
    }

    Ok(inputs)
}
