//! Remit PDF Extraction Layer
//!
//! Implements the [`DocumentTextExtractor`] boundary over `lopdf`:
//! document bytes plus an optional password in, plain text for the leading
//! pages out. Encrypted documents are surfaced through the credential
//! variants of [`ExtractError`] so the pipeline can pause for a password
//! instead of failing.
//!
//! [`DocumentTextExtractor`]: remit_domain::traits::DocumentTextExtractor
//! [`ExtractError`]: remit_domain::ExtractError

#![warn(missing_docs)]

mod extractor;

pub use extractor::PdfTextExtractor;

/// Default number of leading pages decoded per document.
///
/// Statement headers (issuer, period, due date, balances) sit on the first
/// pages; later pages are transaction listings the field prompt does not
/// need.
pub const DEFAULT_MAX_PAGES: usize = 3;
