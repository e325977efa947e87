use crate::config::PieceConfig;
use crate::discovery;
use crate::error::SplitError;
use crate::page_range::plan_parts;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Split the single PDF in `dir` into one file per part listed in the
/// directory's config. Returns the written files in part order.
pub fn run<P: AsRef<Path>>(dir: P, password: Option<&str>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SplitError::NotADirectory {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let inputs = discovery::discover(dir)?;
    let config = PieceConfig::load(&inputs.config)?;
    tracing::debug!(
        config = %inputs.config.display(),
        pdf = %inputs.pdf.display(),
        parts = config.parts.len(),
        "loaded inputs"
    );

    let doc = PdfDocument::open_with_password(&inputs.pdf, password)?;
    let total_pages = doc.page_count();
    tracing::debug!(total_pages, "opened source document");

    // Every range is checked before anything is written.
    let ranges = plan_parts(&config.parts, total_pages)?;

    let mut written = Vec::with_capacity(ranges.len());
    for (range, part) in ranges.iter().zip(&config.parts) {
        let file_name = config.output_file_name(range.position, part);
        let output_path = dir.join(&file_name);
        tracing::debug!(part = %range.name, start = range.start, end = range.end, "writing part");

        let mut new_doc = doc.extract_range(range)?;
        PdfDocument::save(&mut new_doc, &output_path)?;

        println!("Created: '{}'", file_name);
        println!("\tPages {:?}", range.page_numbers());
        written.push(output_path);
    }

    Ok(written)
}
