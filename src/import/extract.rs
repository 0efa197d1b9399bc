//! Text extraction collaborators
//!
//! The pipeline only needs "document bytes in, concatenated text out";
//! anything that can do that (a PDF text layer reader, an OCR service)
//! plugs in behind `TextExtractor`.

use crate::import::ImportError;

pub trait TextExtractor {
    /// Produce the document's text, or `NoText` when there is none
    fn extract(&self, document: &[u8]) -> Result<String, ImportError>;
}

/// Extractor for documents that already are plain text
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String, ImportError> {
        let text = String::from_utf8_lossy(document);
        if text.trim().is_empty() {
            return Err(ImportError::NoText);
        }
        Ok(text.into_owned())
    }
}
