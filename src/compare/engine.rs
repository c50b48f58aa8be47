// src/compare/engine.rs
//! Reference/candidate comparison: validation, delegation and result states.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use super::advisor::{AdviceService, COMPARISON_INSTRUCTION};
use super::payload::AudioPayload;
use super::verdict::ComparisonVerdict;
use crate::error::ComparisonError;

#[derive(Clone)]
pub struct ComparisonEngine {
    advisor: Arc<dyn AdviceService>,
    instruction: String,
}

impl ComparisonEngine {
    pub fn new(advisor: Arc<dyn AdviceService>) -> Self {
        Self::with_instruction(advisor, COMPARISON_INSTRUCTION)
    }

    pub fn with_instruction(
        advisor: Arc<dyn AdviceService>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            advisor,
            instruction: instruction.into(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Compare two tracks. Both must be present before the delegate is
    /// contacted; any delegate or parse failure is a `DelegateFailure`.
    pub fn compare(
        &self,
        reference: Option<&AudioPayload>,
        candidate: Option<&AudioPayload>,
    ) -> Result<ComparisonVerdict, ComparisonError> {
        let (reference, candidate) = require_both(reference, candidate)?;

        info!(
            reference = %reference.file_name(),
            candidate = %candidate.file_name(),
            "requesting comparison"
        );
        let raw = self
            .advisor
            .request(reference, candidate, &self.instruction)
            .map_err(|e| ComparisonError::DelegateFailure(format!("{e:#}")))?;

        ComparisonVerdict::parse(&raw).map_err(|e| {
            warn!(error = %e, "rejected malformed verdict");
            ComparisonError::DelegateFailure(format!("malformed verdict: {e}"))
        })
    }

    /// Run `compare` on a worker thread; the single result arrives on the
    /// returned channel.
    pub fn spawn(
        &self,
        reference: AudioPayload,
        candidate: AudioPayload,
    ) -> Receiver<Result<ComparisonVerdict, ComparisonError>> {
        let (tx, rx) = mpsc::channel();
        let engine = self.clone();
        thread::spawn(move || {
            let result = engine.compare(Some(&reference), Some(&candidate));
            let _ = tx.send(result);
        });
        rx
    }
}

/// Both picks, or the first one that is missing.
pub fn require_both<'a>(
    reference: Option<&'a AudioPayload>,
    candidate: Option<&'a AudioPayload>,
) -> Result<(&'a AudioPayload, &'a AudioPayload), ComparisonError> {
    let reference = reference.ok_or(ComparisonError::MissingTrack("reference"))?;
    let candidate = candidate.ok_or(ComparisonError::MissingTrack("candidate"))?;
    Ok((reference, candidate))
}

/// What the comparison panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComparisonState {
    #[default]
    Idle,
    Pending,
    Ready(ComparisonVerdict),
    Failed(String),
}

impl ComparisonState {
    pub fn from_result(result: Result<ComparisonVerdict, ComparisonError>) -> Self {
        match result {
            Ok(verdict) => Self::Ready(verdict),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
