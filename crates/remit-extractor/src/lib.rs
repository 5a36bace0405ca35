//! Remit Extractor
//!
//! The statement extraction pipeline: raw document bytes in, a structured
//! six-field record out, with password-protected documents and malformed
//! model output handled along the way.
//!
//! # Architecture
//!
//! ```text
//! Bytes → DocumentTextExtractor → PromptBuilder → ModelClient → parser → StatementRecord
//!              │ (password?)                                      (total)
//!              ↓
//!        AwaitingCredential ──retry(password)──→ back to extraction
//! ```
//!
//! The [`ExtractionController`] owns the pipeline state machine; the two
//! external collaborators sit behind the `remit-domain` traits, so tests
//! and alternative backends plug in without touching the pipeline.
//!
//! # Key Design Points
//!
//! - **Total parsing**: the model's output is inherently unreliable, so
//!   "could not parse the model's JSON" is a normal outcome absorbed into
//!   a best-effort record, never a pipeline failure
//! - **Single tagged state**: one [`PipelineState`] variant plus payload
//!   instead of scattered status flags, making impossible combinations
//!   unrepresentable
//! - **No automatic retry**: transient backend failures are terminal for
//!   the submission; the caller resubmits explicitly
//!
//! # Example Usage
//!
//! ```
//! use remit_extractor::ExtractionController;
//! use remit_llm::MockClient;
//! use remit_pdf::PdfTextExtractor;
//! use remit_domain::PipelineState;
//!
//! # async fn example(document: Vec<u8>) {
//! let model = MockClient::new(r#"{"issuer": "Chase"}"#);
//! let controller = ExtractionController::new(PdfTextExtractor::new(), model);
//!
//! match controller.submit(document).await {
//!     PipelineState::Succeeded { record } => println!("Issuer: {}", record.issuer),
//!     PipelineState::AwaitingCredential { reason } => println!("{}", reason),
//!     PipelineState::Failed { reason } => eprintln!("Extraction failed: {}", reason),
//!     _ => unreachable!("submit settles in a terminal or awaiting state"),
//! }
//! # }
//! ```
//!
//! [`PipelineState`]: remit_domain::PipelineState

#![warn(missing_docs)]

mod config;
mod controller;
mod export;
mod parser;
mod prompt;


pub use config::{BackendKind, PipelineConfig};
pub use controller::{ExtractionController, StatementPipeline};
pub use export::{export_filename, record_to_json};
pub use parser::parse_model_response;
pub use prompt::PromptBuilder;
