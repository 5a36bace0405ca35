//! Remit Domain Layer
//!
//! Core data model and boundary definitions for the statement extraction
//! pipeline. This crate defines the fundamental concepts and the trait
//! interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **StatementRecord**: the six-field extraction result; unresolved
//!   fields hold the `"Not Found"` sentinel, never null
//! - **ExtractionRequest**: immutable per-submission value (document bytes
//!   plus optional unlock credential)
//! - **PipelineState**: the single tagged state of the extraction pipeline,
//!   replacing any collection of independent status flags
//! - **ExtractError / ModelError**: the error taxonomy at the two external
//!   boundaries
//!
//! ## Architecture
//!
//! Infrastructure implementations live in other crates:
//! - `remit-pdf` implements [`traits::DocumentTextExtractor`]
//! - `remit-llm` implements [`traits::ModelClient`]
//! - `remit-extractor` orchestrates both behind the state machine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod request;
pub mod state;
pub mod traits;

// Re-exports for convenience
pub use error::{ExtractError, ModelError};
pub use record::{StatementRecord, FIELD_KEYS, NOT_FOUND};
pub use request::ExtractionRequest;
pub use state::{CredentialReason, PipelineState};
