pub mod document;
pub mod encrypted;
#[cfg(test)]
pub mod fixtures;

pub use document::PdfDocument;
