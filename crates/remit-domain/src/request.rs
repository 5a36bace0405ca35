//! Per-submission request value

/// One document submission: the raw bytes plus an optional unlock
/// credential.
///
/// Created per user action, never mutated, discarded after the pipeline
/// resolves. The controller retains only the bytes while a credential is
/// outstanding.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Raw document bytes as uploaded
    pub bytes: Vec<u8>,

    /// Unlock credential for a protected document, if the user supplied one
    pub credential: Option<String>,
}

impl ExtractionRequest {
    /// Request for an unprotected document (no credential attached).
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            credential: None,
        }
    }

    /// Request carrying an unlock credential.
    pub fn with_credential(bytes: Vec<u8>, credential: impl Into<String>) -> Self {
        Self {
            bytes,
            credential: Some(credential.into()),
        }
    }
}
