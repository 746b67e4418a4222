use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::transport::Transport;
use crate::error::{AnalysisError, ClientError, SubmitError};
use crate::input::FeatureDraft;
use crate::model::{AnalysisMode, AnalysisResult};
use crate::validate::{FeatureVector, validate};

pub const PREDICT_PATH: &str = "/predict";
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(10);
pub const CANCELLED_MESSAGE: &str = "Analysis cancelled";

/// Lifecycle of the single in-flight analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

/// Pacing of a submission. The warm-up delay elapses before the request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    pub warmup: Duration,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            warmup: DEFAULT_WARMUP,
        }
    }
}

/// Wire body of `/predict`: the eleven genes as top-level numeric fields.
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub patient_id: Option<&'a str>,
    pub mode: AnalysisMode,
    #[serde(flatten)]
    pub levels: BTreeMap<&'static str, f64>,
}

impl<'a> PredictRequest<'a> {
    pub fn new(features: &'a FeatureVector, mode: AnalysisMode) -> Self {
        Self {
            patient_id: features.patient_id.as_deref(),
            mode,
            levels: features.iter().collect(),
        }
    }
}

pub struct AnalysisSubmitter<T> {
    transport: T,
    policy: SubmitPolicy,
    state: RefCell<SubmissionState>,
    mounted: Cell<bool>,
}

impl<T: Transport> AnalysisSubmitter<T> {
    pub fn new(transport: T, policy: SubmitPolicy) -> Self {
        Self {
            transport,
            policy,
            state: RefCell::new(SubmissionState::Idle),
            mounted: Cell::new(true),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.state.borrow().result().cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    /// Clears an at-rest outcome. Has no effect while a submission is in flight.
    pub fn dismiss(&self) {
        if !self.is_busy() {
            self.transition(SubmissionState::Idle);
        }
    }

    /// Detaches the owner. A response arriving afterwards is discarded.
    pub fn unmount(&self) {
        self.mounted.set(false);
    }

    /// Validates the draft and submits it. Invalid drafts never reach the transport.
    pub async fn submit_draft(
        &self,
        draft: &FeatureDraft,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, AnalysisError> {
        let features = validate(draft)?;
        Ok(self.submit(&features, mode).await?)
    }

    pub async fn submit(
        &self,
        features: &FeatureVector,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, SubmitError> {
        if !self.mounted.get() {
            return Err(SubmitError::Unmounted);
        }
        if self.is_busy() {
            warn!("submission rejected: another analysis is in flight");
            return Err(SubmitError::Busy);
        }
        let body = serde_json::to_value(PredictRequest::new(features, mode))
            .map_err(|err| ClientError::Decode(err.to_string()))?;

        self.transition(SubmissionState::Submitting);
        let in_flight = InFlight::arm(&self.state);
        let started = Instant::now();
        info!(
            patient_id = features.patient_id.as_deref().unwrap_or("-"),
            %mode,
            warmup_ms = self.policy.warmup.as_millis() as u64,
            "submission started"
        );
        if !self.policy.warmup.is_zero() {
            tokio::time::sleep(self.policy.warmup).await;
        }

        let outcome = self.call(&body).await;
        in_flight.disarm();
        if !self.mounted.get() {
            debug!("response arrived after unmount; discarded");
            return Err(SubmitError::Unmounted);
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(result) => {
                info!(
                    elapsed_ms,
                    risk_category = %result.risk_category,
                    "submission finished"
                );
                self.transition(SubmissionState::Succeeded(result.clone()));
                Ok(result)
            }
            Err(err) => {
                warn!(elapsed_ms, error = %err, "submission failed");
                self.transition(SubmissionState::Failed(err.to_string()));
                Err(err.into())
            }
        }
    }

    async fn call(&self, body: &Value) -> Result<AnalysisResult, ClientError> {
        let reply = self.transport.post_json(PREDICT_PATH, body).await?;
        if !reply.is_success() {
            return Err(reply.failure("Analysis failed"));
        }
        reply.decode()
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = self.state.borrow_mut();
        debug!(from = state.label(), to = next.label(), "submission state");
        *state = next;
    }
}

/// Moves a still-pending submission to `Failed` when its future is dropped
/// before the call completes.
struct InFlight<'s> {
    state: &'s RefCell<SubmissionState>,
    armed: bool,
}

impl<'s> InFlight<'s> {
    fn arm(state: &'s RefCell<SubmissionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.borrow_mut();
        if state.is_busy() {
            warn!("submission dropped before completion");
            *state = SubmissionState::Failed(CANCELLED_MESSAGE.to_string());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/client/submit.rs"]
mod tests;
