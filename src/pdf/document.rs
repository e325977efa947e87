use crate::error::SplitError;
use crate::page_range::PartRange;
use crate::pdf::encrypted;
use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    /// Open `path` and make it readable, decrypting with `password` when the
    /// file is encrypted.
    pub fn open_with_password<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let mut pdf = Self::open(path)?;
        pdf.unlock(password)?;
        Ok(pdf)
    }

    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Make the document readable, decrypting it with `password` if needed.
    ///
    /// A password for a file that opens without one is ignored with a warning.
    pub fn unlock(&mut self, password: Option<&str>) -> Result<()> {
        if !self.is_encrypted() {
            if password.is_some() {
                tracing::warn!(
                    "A password was given, but '{}' is not encrypted; ignoring it",
                    self.path.display()
                );
            }
            return Ok(());
        }

        // lopdf already decrypted it with the empty user password.
        if self.doc.encryption_state.is_some() {
            if password.is_some() {
                tracing::warn!(
                    "'{}' opens without a password; ignoring the one given",
                    self.path.display()
                );
            }
            strip_encryption(&mut self.doc);
            return Ok(());
        }

        let Some(password) = password else {
            return Err(SplitError::EncryptedNoPassword {
                path: self.path.clone(),
            }
            .into());
        };

        let mut sealed = encrypted::load_sealed(&self.path)?;
        sealed
            .decrypt(password)
            .map_err(|source| SplitError::DecryptionFailed {
                path: self.path.clone(),
                source,
            })?;
        strip_encryption(&mut sealed);
        self.doc = sealed;
        tracing::debug!(path = %self.path.display(), "decrypted document");
        Ok(())
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy of the document holding only the pages of `range`.
    pub fn extract_range(&self, range: &PartRange) -> Result<Document> {
        self.extract_pages(&range.page_numbers())
    }

    /// Extract specific 1-based pages to a new document, keeping their order
    /// in the source.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let mut new_doc = self.doc.clone();
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{})", page, total);
            }
        }

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .map(|(num, _)| *num)
            .filter(|num| !pages.contains(num))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}

/// Outputs are written in the clear, so drop the `/Encrypt` entry and its dictionary.
fn strip_encryption(doc: &mut Document) {
    if let Some(Object::Reference(id)) = doc.trailer.remove(b"Encrypt") {
        doc.objects.remove(&id);
    }
}
