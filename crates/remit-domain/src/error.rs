//! Error taxonomy at the two external boundaries

use thiserror::Error;

/// Errors reported by a document text extractor.
///
/// The controller only distinguishes "needs a credential" (the two
/// password variants) from everything else, which is terminal for the
/// current submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document is encrypted and no credential was supplied
    #[error("document is password protected")]
    PasswordRequired,

    /// The supplied credential did not unlock the document
    #[error("incorrect document password")]
    PasswordIncorrect,

    /// The bytes are not a decodable document
    #[error("document is corrupt or unreadable: {0}")]
    Corrupt(String),

    /// Any other decode failure
    #[error("document extraction failed: {0}")]
    Other(String),
}

impl ExtractError {
    /// True for the recoverable variants that route to the
    /// awaiting-credential state.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            ExtractError::PasswordRequired | ExtractError::PasswordIncorrect
        )
    }
}

/// Errors reported by a model backend client.
///
/// All variants are terminal for the current submission; there is no
/// automatic retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The backend credential/configuration is missing; no call was made
    #[error("model backend is not configured (missing API credential)")]
    Unconfigured,

    /// Network-level failure reaching the backend
    #[error("model request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status
    #[error("model backend returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, when readable
        message: String,
    },

    /// The backend answered 2xx but the payload had no generated text
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}
