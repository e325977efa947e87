use std::path::PathBuf;
use thiserror::Error;

/// Everything that stops a split before or while it runs.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Directory '{}' does not exist.", .path.display())]
    NotADirectory { path: PathBuf },

    #[error(
        "No config file found in the directory '{}'.\nDid you copy the part template into the correct place?",
        .dir.display()
    )]
    MissingConfig { dir: PathBuf },

    #[error(
        "No PDF files found in the directory '{}'.\nDid you copy the PDF file into the correct place?",
        .dir.display()
    )]
    MissingPdf { dir: PathBuf },

    #[error(
        "Multiple PDF files found in the directory '{}': {}\nPlease ensure there is only one PDF file in the directory with the parts.",
        .dir.display(),
        display_paths(.candidates)
    )]
    AmbiguousPdf {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("'{}' is encrypted; pass the password with --password", .path.display())]
    EncryptedNoPassword { path: PathBuf },

    #[error("Failed to decrypt '{}': {source}", .path.display())]
    DecryptionFailed {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ConfigSyntaxError,
    },

    #[error("Config lists no parts")]
    NoParts,

    #[error("The first part must have a positive start page, got {start_page}")]
    RelativeFirstPart { start_page: i64 },

    #[error("'{name}' cannot be used in a file name; remove '/' and '\\'")]
    UnsafeName { name: String },

    #[error("Part '{part}' has start page 0; pages are numbered from 1")]
    ZeroStartPage { part: String },

    #[error("Part '{part}' starts at page {page}, but the document only has {total} page(s)")]
    PageOutOfRange { part: String, page: u64, total: u32 },

    #[error("Part '{part}' contains no pages; start pages must increase")]
    EmptyPart { part: String },
}

/// Why a config file could not be deserialized.
#[derive(Debug, Error)]
pub enum ConfigSyntaxError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| format!("'{}'", n.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(", ")
}
