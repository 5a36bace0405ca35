//! lopdf-backed text extraction with password support

use crate::DEFAULT_MAX_PAGES;
use async_trait::async_trait;
use lopdf::Document;
use remit_domain::traits::DocumentTextExtractor;
use remit_domain::ExtractError;
use tracing::{debug, warn};

/// Decodes PDF bytes into plain text for the leading pages.
///
/// # Examples
///
/// ```no_run
/// use remit_pdf::PdfTextExtractor;
/// use remit_domain::traits::DocumentTextExtractor;
///
/// # async fn example(bytes: &[u8]) -> Result<(), remit_domain::ExtractError> {
/// let extractor = PdfTextExtractor::new();
/// let text = extractor.extract_text(bytes, None).await?;
/// println!("Extracted {} chars", text.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    max_pages: usize,
}

impl PdfTextExtractor {
    /// Create an extractor decoding the default number of leading pages.
    pub fn new() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Override how many leading pages are decoded.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn extract_sync(&self, bytes: &[u8], credential: Option<&str>) -> Result<String, ExtractError> {
        let mut doc = Document::load_mem(bytes).map_err(|e| classify_load_error(&e.to_string()))?;

        if doc.is_encrypted() {
            match credential {
                Some(password) => {
                    doc.decrypt(password).map_err(|e| {
                        debug!("PDF decryption rejected: {}", e);
                        ExtractError::PasswordIncorrect
                    })?;
                }
                None => return Err(ExtractError::PasswordRequired),
            }
        }

        let pages = doc.get_pages();
        let mut page_texts = Vec::new();
        for page_number in pages.keys().take(self.max_pages) {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => page_texts.push(text),
                Err(e) => {
                    // A single undecodable page degrades to empty text
                    // rather than failing the document.
                    warn!("Failed to extract text from page {}: {}", page_number, e);
                    page_texts.push(String::new());
                }
            }
        }

        let text = page_texts.join("\n\n");
        debug!(
            "Extracted {} chars from {} of {} pages",
            text.len(),
            page_texts.len(),
            pages.len()
        );
        Ok(text)
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentTextExtractor for PdfTextExtractor {
    async fn extract_text(
        &self,
        bytes: &[u8],
        credential: Option<&str>,
    ) -> Result<String, ExtractError> {
        self.extract_sync(bytes, credential)
    }
}

/// Classify a lopdf load failure into the boundary error taxonomy.
///
/// lopdf reports encrypted documents it cannot open and structural damage
/// through its message text, so classification is by message.
fn classify_load_error(message: &str) -> ExtractError {
    let lower = message.to_lowercase();

    if lower.contains("encrypted") || lower.contains("password") {
        return ExtractError::PasswordRequired;
    }
    if lower.contains("invalid")
        || lower.contains("malformed")
        || lower.contains("corrupt")
        || lower.contains("xref")
        || lower.contains("trailer")
        || lower.contains("header")
    {
        return ExtractError::Corrupt(message.to_string());
    }

    ExtractError::Other(message.to_string())
}
