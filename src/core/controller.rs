//! Reactive controller: owns the inputs, debounces weight text, recomputes
//!
//! Phase transitions:
//! - any → PENDING: weight text changed (new debounce token issued)
//! - PENDING → IDLE: debounce fired with empty text
//! - PENDING → SETTLED: debounce fired, text rejected by the validator
//! - PENDING → COMPUTING → SETTLED: debounce fired, text valid
//! - factor toggle / manual recompute: same as a debounce firing, but
//!   synchronous, and cancels any pending token
//!
//! Timers live outside the controller. A debounce firing carries the token
//! it was scheduled with; only the most recently issued token is honored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{DEBOUNCE_DELAY_MS, SNAPSHOT_CHANNEL_CAPACITY};
use crate::core::{CalculationEngine, Validator};
use crate::types::{
    CalculationResult, ControllerError, ControllerPhase, FactorSelection, ReasonCode,
    Snapshot, TraceStep, ValidationError,
};

/// Controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Quiet period after the last weight edit before recomputing
    pub debounce_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(DEBOUNCE_DELAY_MS),
        }
    }
}

/// Identifies one scheduled debounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebounceToken(u64);

impl DebounceToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Ask the caller to deliver `DebounceElapsed(token)` after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceRequest {
    pub token: DebounceToken,
    pub delay: Duration,
}

/// Inputs to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Raw weight text as typed
    WeightTextChanged(String),
    /// A scheduled debounce timer fired
    DebounceElapsed(DebounceToken),
    /// Factor switched on or off
    FactorToggled { id: String, active: bool },
    /// Explicit "calculate now"
    CalculateRequested,
    /// Back to the initial state
    Reset,
}

/// Settled outcome: a result or a validation error, never both
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Calculated(CalculationResult),
    Invalid(ValidationError),
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the event
    pub phase: ControllerPhase,
    /// Timer the caller must schedule, if any
    pub debounce: Option<DebounceRequest>,
}

/// Single-owner state machine over the calculator inputs
#[derive(Debug)]
pub struct ReactiveController {
    engine: CalculationEngine,
    validator: Validator,
    config: ControllerConfig,
    /// Raw text, stored immediately for echo
    weight_text: String,
    selection: FactorSelection,
    phase: ControllerPhase,
    outcome: Option<Outcome>,
    /// Only this token may fire
    pending: Option<DebounceToken>,
    next_token: u64,
    recompute_count: u64,
    last_reason: ReasonCode,
    updates: broadcast::Sender<Snapshot>,
}

impl Default for ReactiveController {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReactiveController {
    /// Create controller over an engine
    pub fn new(engine: CalculationEngine, config: ControllerConfig) -> Self {
        let (updates, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            engine,
            validator: Validator::new(),
            config,
            weight_text: String::new(),
            selection: FactorSelection::new(),
            phase: ControllerPhase::Idle,
            outcome: None,
            pending: None,
            next_token: 0,
            recompute_count: 0,
            last_reason: ReasonCode::R001_WEIGHT_EMPTY,
            updates,
        }
    }

    /// Controller over the built-in tables with default config
    pub fn standard() -> Self {
        Self::new(CalculationEngine::standard(), ControllerConfig::default())
    }

    /// Apply one event
    pub fn apply(&mut self, event: ControllerEvent) -> Result<Transition, ControllerError> {
        let debounce = match event {
            ControllerEvent::WeightTextChanged(text) => Some(self.set_weight_text(text)),
            ControllerEvent::DebounceElapsed(token) => {
                self.debounce_elapsed(token);
                None
            }
            ControllerEvent::FactorToggled { id, active } => {
                self.toggle_factor(&id, active)?;
                None
            }
            ControllerEvent::CalculateRequested => {
                self.manual_recompute();
                None
            }
            ControllerEvent::Reset => {
                self.reset();
                None
            }
        };

        Ok(Transition {
            phase: self.phase,
            debounce,
        })
    }

    /// Store new weight text and issue a fresh debounce token.
    ///
    /// Any earlier token becomes stale.
    pub fn set_weight_text(&mut self, text: impl Into<String>) -> DebounceRequest {
        self.weight_text = text.into();

        let token = DebounceToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        self.phase = ControllerPhase::Pending;

        tracing::debug!(token = token.value(), text = %self.weight_text, "debounce scheduled");
        self.publish(ReasonCode::R001_WEIGHT_TEXT_CHANGED);

        DebounceRequest {
            token,
            delay: self.config.debounce_delay,
        }
    }

    /// Timer fired. Returns false if the token was stale.
    pub fn debounce_elapsed(&mut self, token: DebounceToken) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(token = token.value(), "stale debounce ignored");
            return false;
        }
        self.recompute(ReasonCode::R003_DEBOUNCE_FIRED);
        true
    }

    /// Switch a factor on or off; recompute now if the current weight is valid
    pub fn toggle_factor(&mut self, id: &str, active: bool) -> Result<(), ControllerError> {
        if !self.engine.catalog().contains(id) {
            tracing::warn!(factor = id, "toggle for unknown factor");
            return Err(ControllerError::UnknownFactor(id.to_string()));
        }
        self.selection.set(id, active);

        if self.has_valid_weight() {
            self.recompute(ReasonCode::R005_FACTOR_TOGGLED);
        } else {
            self.publish(ReasonCode::R005_FACTOR_TOGGLED);
        }
        Ok(())
    }

    /// Recompute now, cancelling any pending debounce
    pub fn manual_recompute(&mut self) {
        self.recompute(ReasonCode::R005_MANUAL_RECOMPUTE);
    }

    /// Clear text, selection and outcome. Outstanding tokens stay stale.
    pub fn reset(&mut self) {
        self.weight_text.clear();
        self.selection = FactorSelection::new();
        self.phase = ControllerPhase::Idle;
        self.outcome = None;
        self.pending = None;
        self.publish(ReasonCode::R002_RESET);
    }

    fn has_valid_weight(&self) -> bool {
        !self.weight_text.trim().is_empty() && self.validator.is_valid(&self.weight_text)
    }

    fn recompute(&mut self, trigger: ReasonCode) {
        self.pending = None;
        self.recompute_count += 1;

        if self.weight_text.trim().is_empty() {
            self.outcome = None;
            self.phase = ControllerPhase::Idle;
            self.publish(ReasonCode::R001_WEIGHT_EMPTY);
            return;
        }

        let weight_grams = match self.validator.validate(&self.weight_text) {
            Ok(weight_grams) => weight_grams,
            Err(err) => {
                tracing::warn!(text = %self.weight_text, error = err.code(), "weight rejected");
                self.outcome = Some(Outcome::Invalid(err));
                self.phase = ControllerPhase::Settled;
                self.publish(err.into());
                return;
            }
        };

        self.phase = ControllerPhase::Computing;
        tracing::debug!(weight_grams, trigger = trigger.code(), "recomputing");
        self.publish(trigger);

        let result = match self.engine.compute(weight_grams, &self.selection) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(weight_grams, error = %err, "baseline table does not cover a validated weight");
                panic!("baseline table invariant violated: {err}");
            }
        };

        tracing::info!(
            weight_grams,
            rate = result.per_kg_per_day_rate,
            total = result.total_ml_per_day,
            "IWL computed"
        );
        self.outcome = Some(Outcome::Calculated(result));
        self.phase = ControllerPhase::Settled;
        self.publish(ReasonCode::R002_RESULT_READY);
    }

    fn publish(&mut self, reason: ReasonCode) {
        self.last_reason = reason;
        // No subscribers is fine
        let _ = self.updates.send(self.snapshot());
    }

    /// Subscribe to snapshots emitted after each transition
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// Current read model
    pub fn snapshot(&self) -> Snapshot {
        let result = self.result();
        Snapshot {
            timestamp: chrono::Utc::now(),
            phase: self.phase,
            reason: self.last_reason,
            weight_text: self.weight_text.clone(),
            per_kg_per_day_rate: result.map(|r| r.per_kg_per_day_rate),
            total_ml_per_day: result.map(|r| r.total_ml_per_day),
            trace_text: self.trace_text(),
            error_message: self.error().map(|e| e.to_string()),
            is_busy: self.is_busy(),
        }
    }

    /// Get current phase
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn weight_text(&self) -> &str {
        &self.weight_text
    }

    pub fn selection(&self) -> &FactorSelection {
        &self.selection
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Current result, if the last settle produced one
    pub fn result(&self) -> Option<&CalculationResult> {
        match &self.outcome {
            Some(Outcome::Calculated(result)) => Some(result),
            _ => None,
        }
    }

    /// Current validation error, if the last settle rejected the input
    pub fn error(&self) -> Option<ValidationError> {
        match &self.outcome {
            Some(Outcome::Invalid(err)) => Some(*err),
            _ => None,
        }
    }

    /// Trace steps, empty without a result
    pub fn trace(&self) -> &[TraceStep] {
        self.result().map(|r| r.trace.as_slice()).unwrap_or(&[])
    }

    pub fn trace_text(&self) -> String {
        self.result().map(CalculationResult::trace_text).unwrap_or_default()
    }

    /// True only during the Computing step
    pub fn is_busy(&self) -> bool {
        self.phase == ControllerPhase::Computing
    }

    /// Token the next honored debounce must carry
    pub fn pending_token(&self) -> Option<DebounceToken> {
        self.pending
    }

    /// Number of recompute cycles run (including ones ending in an error)
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    pub fn last_reason(&self) -> ReasonCode {
        self.last_reason
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    pub fn engine(&self) -> &CalculationEngine {
        &self.engine
    }
}

// =============================================================================
// TESTS
// =============================================================================
