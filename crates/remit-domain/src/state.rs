//! Pipeline state machine variants

use crate::record::StatementRecord;
use std::fmt;

/// Why the pipeline is waiting for a credential.
///
/// Both reasons route through the same state; only the user-facing
/// message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialReason {
    /// The document is protected and no credential was supplied yet
    Required,
    /// A credential was supplied but the document rejected it
    Incorrect,
}

impl CredentialReason {
    /// User-facing prompt text for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            CredentialReason::Required => {
                "This document is password protected. Please supply the password."
            }
            CredentialReason::Incorrect => "Incorrect password. Please try again.",
        }
    }
}

impl fmt::Display for CredentialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The single tagged state of one extraction pipeline instance.
///
/// Owned exclusively by the controller; every transition happens through
/// its `submit` / `retry` operations. Terminal variants carry their
/// payload here rather than in separate flags, so impossible combinations
/// (succeeded while still awaiting a credential, for instance) cannot be
/// represented.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// No document submitted yet
    Idle,
    /// A document is being decoded or the model call is outstanding
    Extracting,
    /// The document needs a credential before extraction can continue
    AwaitingCredential {
        /// Whether this is the first prompt or a rejected retry
        reason: CredentialReason,
    },
    /// The pipeline finished and published a complete record
    Succeeded {
        /// The extracted record; all six fields present
        record: StatementRecord,
    },
    /// The pipeline hit a terminal error for this submission
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}

impl PipelineState {
    /// True for the two states a fresh submission leaves behind.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Succeeded { .. } | PipelineState::Failed { .. }
        )
    }

    /// The record, if this is the Succeeded state.
    pub fn record(&self) -> Option<&StatementRecord> {
        match self {
            PipelineState::Succeeded { record } => Some(record),
            _ => None,
        }
    }
}
