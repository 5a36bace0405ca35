//! Pipeline orchestration and state machine

use crate::config::{BackendKind, PipelineConfig};
use crate::parser::parse_model_response;
use crate::prompt::PromptBuilder;
use remit_domain::traits::{DocumentTextExtractor, ModelClient};
use remit_domain::{
    CredentialReason, ExtractError, ExtractionRequest, PipelineState, StatementRecord,
};
use remit_llm::{ChatCompletionClient, TextGenerationClient};
use remit_pdf::PdfTextExtractor;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Orchestrates one document's extraction pipeline.
///
/// Owns the [`PipelineState`] exclusively: every transition happens
/// through [`submit`](Self::submit) or [`retry`](Self::retry). One
/// extraction is observed at a time - a fresh `submit` abandons
/// observation of any in-flight attempt, whose late-arriving result is
/// dropped rather than published.
pub struct ExtractionController<E, M>
where
    E: DocumentTextExtractor,
    M: ModelClient,
{
    extractor: Arc<E>,
    model: Arc<M>,
    inner: Mutex<Inner>,
}

/// State owned by the controller, guarded by one lock.
///
/// The retained bytes and the attempt counter live next to the state so
/// no combination of them can go out of sync.
struct Inner {
    state: PipelineState,
    retained: Option<Vec<u8>>,
    attempt: u64,
}

/// Controller wired to the default infrastructure: PDF text extraction
/// and a config-selected hosted backend.
pub type StatementPipeline = ExtractionController<PdfTextExtractor, Box<dyn ModelClient>>;

impl StatementPipeline {
    /// Build the default pipeline from configuration.
    ///
    /// The backend credential comes from process environment; a missing
    /// credential is not an error here - the first `submit` fails with
    /// the unconfigured message instead of silently attempting a call.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let extractor = PdfTextExtractor::new().with_max_pages(config.max_pages);
        let model: Box<dyn ModelClient> = match config.backend {
            BackendKind::ChatCompletion => Box::new(
                ChatCompletionClient::from_env(config.model.clone())
                    .with_max_tokens(config.max_tokens),
            ),
            BackendKind::TextGeneration => Box::new(
                TextGenerationClient::from_env(config.model.clone())
                    .with_max_new_tokens(config.max_tokens)
                    .with_temperature(config.temperature),
            ),
        };
        ExtractionController::new(extractor, model)
    }
}

impl<E, M> ExtractionController<E, M>
where
    E: DocumentTextExtractor,
    M: ModelClient,
{
    /// Create a controller over the given collaborators.
    pub fn new(extractor: E, model: M) -> Self {
        Self {
            extractor: Arc::new(extractor),
            model: Arc::new(model),
            inner: Mutex::new(Inner {
                state: PipelineState::Idle,
                retained: None,
                attempt: 0,
            }),
        }
    }

    /// Snapshot of the current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.lock().state.clone()
    }

    /// Submit a document, restarting the pipeline from scratch.
    ///
    /// Valid from any state: a prior terminal state is discarded and a
    /// prior in-flight attempt is abandoned (its eventual result will
    /// not be published). Returns the state the pipeline settled in for
    /// this submission.
    pub async fn submit(&self, bytes: Vec<u8>) -> PipelineState {
        let attempt = {
            let mut inner = self.lock();
            inner.attempt += 1;
            inner.state = PipelineState::Extracting;
            inner.retained = None;
            inner.attempt
        };

        info!(attempt, size = bytes.len(), "Starting statement extraction");
        let request = ExtractionRequest::new(bytes);
        self.run_attempt(attempt, request).await
    }

    /// Retry the retained document with a newly supplied credential.
    ///
    /// Only meaningful while awaiting a credential; in any other state
    /// this is a no-op returning the current state. The document bytes
    /// stay retained across failed attempts, so the user may retry
    /// indefinitely without re-uploading.
    pub async fn retry(&self, credential: impl Into<String>) -> PipelineState {
        let (attempt, bytes) = {
            let mut inner = self.lock();
            if !matches!(inner.state, PipelineState::AwaitingCredential { .. }) {
                debug!("Retry called outside AwaitingCredential, ignoring");
                return inner.state.clone();
            }
            let Some(bytes) = inner.retained.clone() else {
                warn!("AwaitingCredential with no retained document");
                return inner.state.clone();
            };
            inner.attempt += 1;
            inner.state = PipelineState::Extracting;
            (inner.attempt, bytes)
        };

        info!(attempt, "Retrying extraction with supplied credential");
        let request = ExtractionRequest::with_credential(bytes, credential);
        self.run_attempt(attempt, request).await
    }

    /// Run one attempt end to end and publish its outcome.
    async fn run_attempt(&self, attempt: u64, request: ExtractionRequest) -> PipelineState {
        let had_credential = request.credential.is_some();

        let (state, retain) = match self
            .extractor
            .extract_text(&request.bytes, request.credential.as_deref())
            .await
        {
            Err(e) if e.is_credential_error() => {
                let reason = match e {
                    ExtractError::PasswordRequired if !had_credential => {
                        CredentialReason::Required
                    }
                    _ => CredentialReason::Incorrect,
                };
                info!(%reason, "Document needs a credential");
                (PipelineState::AwaitingCredential { reason }, true)
            }
            Err(e) => {
                warn!("Document extraction failed: {}", e);
                (PipelineState::Failed { reason: e.to_string() }, false)
            }
            Ok(text) => (self.extract_fields(&text).await, false),
        };

        self.publish(attempt, request.bytes, state, retain)
    }

    /// Prompt the model over the extracted text and parse the response.
    ///
    /// Empty text is still forwarded - an all-sentinel record is an
    /// acceptable terminal outcome, not an error. Parsing is total, so
    /// the only failure here is the model call itself.
    async fn extract_fields(&self, text: &str) -> PipelineState {
        debug!(text_len = text.len(), "Building field extraction prompt");
        let prompt = PromptBuilder::new(text).build();

        match self.model.generate(&prompt).await {
            Ok(raw) => {
                debug!(response_len = raw.len(), model = self.model.model_name(), "Parsing model response");
                let record = parse_model_response(&raw);
                info!(resolved = !record.is_empty(), "Extraction complete");
                PipelineState::Succeeded { record }
            }
            Err(e) => {
                warn!("Model call failed: {}", e);
                PipelineState::Failed { reason: e.to_string() }
            }
        }
    }

    /// Publish an attempt's outcome unless a newer submission superseded
    /// it.
    fn publish(
        &self,
        attempt: u64,
        bytes: Vec<u8>,
        state: PipelineState,
        retain: bool,
    ) -> PipelineState {
        let mut inner = self.lock();
        if inner.attempt != attempt {
            debug!(
                attempt,
                current = inner.attempt,
                "Dropping result of superseded attempt"
            );
            return inner.state.clone();
        }

        inner.retained = if retain { Some(bytes) } else { None };
        inner.state = state.clone();
        state
    }

    /// The last successfully extracted record, if the pipeline is in the
    /// Succeeded state.
    pub fn record(&self) -> Option<StatementRecord> {
        self.lock().state.record().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // The lock is only held for field updates, never across await
        // points; a poisoned lock still holds consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
