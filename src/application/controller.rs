//! Form controller: the state machine behind the prediction screen.
//!
//! Owns the form, the result panel, the gauge animation and the particle
//! burst, and enforces a single active [`UiMode`]. The network exchange is
//! split into [`FormController::begin_submit`] and
//! [`FormController::finish_submit`] so the caller decides where the
//! request runs (background worker in the terminal app, inline in tests).

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{
    gauge_offset, is_bmi_source, validate, ConfidenceTier, ErrorBody, FormState, PredictionRequest,
    PredictionResponse, ResultView, ValidationError, TOTAL_ARC_LENGTH,
};
use crate::ports::{
    ErrorRenderer, NoopErrorRenderer, PredictionClient, PredictionOutcome, TransportError,
};

use super::animation::{GaugeArc, Transition};
use super::confetti::{ParticleBurst, ParticleFrame};

/// Submit button caption while idle.
pub const PREDICT_LABEL: &str = "🧠 Predict";
/// Submit button caption while a request is in flight.
pub const PREDICTING_LABEL: &str = "⏳ Predicting…";
/// Alert shown when the exchange itself failed.
pub const NETWORK_ERROR: &str = "Network error";

/// Which part of the screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Form editable, submit enabled
    Idle,
    /// Request in flight, submit disabled
    Submitting,
    /// Result on screen, submit disabled until reset
    ResultShown,
}

/// Where the view is scrolled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFocus {
    Form,
    Result,
}

/// Why `begin_submit` refused.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submit is disabled")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

pub struct FormController<R = NoopErrorRenderer> {
    form: FormState,
    result: ResultView,
    gauge: GaugeArc,
    particles: ParticleBurst,
    mode: UiMode,
    focus: ViewFocus,
    alerts: VecDeque<String>,
    error_renderer: R,
    rng: StdRng,
}

impl Default for FormController<NoopErrorRenderer> {
    fn default() -> Self {
        Self::new(FormState::default(), NoopErrorRenderer)
    }
}

impl<R: ErrorRenderer> FormController<R> {
    /// Create a controller over `form`, reporting server field errors to
    /// `error_renderer`.
    pub fn new(form: FormState, error_renderer: R) -> Self {
        Self {
            form,
            result: ResultView::default(),
            gauge: GaugeArc::default(),
            particles: ParticleBurst::default(),
            mode: UiMode::Idle,
            focus: ViewFocus::Form,
            alerts: VecDeque::new(),
            error_renderer,
            rng: StdRng::from_entropy(),
        }
    }

    /// Start-up hook: derive BMI from any pre-filled height and weight.
    pub fn initialize(&mut self) {
        self.form.recalc_bmi();
    }

    // === Accessors ===

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn result(&self) -> &ResultView {
        &self.result
    }

    #[must_use]
    pub fn gauge(&self) -> &GaugeArc {
        &self.gauge
    }

    pub fn particles(&self, now: Instant) -> impl Iterator<Item = ParticleFrame> + '_ {
        self.particles.frames(now)
    }

    #[must_use]
    pub fn mode(&self) -> UiMode {
        self.mode
    }

    #[must_use]
    pub fn focus(&self) -> ViewFocus {
        self.focus
    }

    #[must_use]
    pub fn error_renderer(&self) -> &R {
        &self.error_renderer
    }

    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.mode == UiMode::Idle
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            UiMode::Submitting => PREDICTING_LABEL,
            UiMode::Idle | UiMode::ResultShown => PREDICT_LABEL,
        }
    }

    #[must_use]
    pub fn reset_visible(&self) -> bool {
        self.mode == UiMode::ResultShown
    }

    #[must_use]
    pub fn result_visible(&self) -> bool {
        self.result.visible
    }

    /// Oldest alert not yet dismissed.
    #[must_use]
    pub fn pending_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    // === Editing ===

    fn editable(&self) -> bool {
        self.mode == UiMode::Idle
    }

    fn after_edit(&mut self, field: Option<&'static str>) -> bool {
        match field {
            Some(name) => {
                if is_bmi_source(name) {
                    self.form.recalc_bmi();
                }
                true
            }
            None => false,
        }
    }

    pub fn next_field(&mut self) {
        self.form.next_field();
    }

    pub fn prev_field(&mut self) {
        self.form.prev_field();
    }

    /// Type a character into the selected field.
    pub fn input_char(&mut self, c: char) -> bool {
        if !self.editable() {
            return false;
        }
        let edited = self.form.input_char(c);
        self.after_edit(edited)
    }

    pub fn delete_char(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        let edited = self.form.delete_char();
        self.after_edit(edited)
    }

    pub fn clear_field(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        let edited = self.form.clear_field();
        self.after_edit(edited)
    }

    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        if !self.editable() {
            return false;
        }
        let edited = self.form.cycle_choice(forward);
        self.after_edit(edited)
    }

    /// Set a field by name, as autofill would.
    pub fn set_field_value(&mut self, name: &str, value: &str) -> bool {
        if !self.editable() {
            return false;
        }
        let Some(field) = self.form.field_mut(name) else {
            return false;
        };
        if field.readonly {
            return false;
        }
        field.value = value.to_string();
        let name = field.name;
        self.after_edit(Some(name))
    }

    pub fn load_sample_data(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        self.form.load_sample_data();
        self.form.recalc_bmi();
        true
    }

    // === Submission ===

    /// Run the validation gate and, if it passes, enter `Submitting`.
    ///
    /// # Errors
    /// `SubmitError::Busy` while a request is in flight or a result is
    /// shown; `SubmitError::Invalid` when a field fails validation (the
    /// field is flagged and non-empty failures raise an alert).
    pub fn begin_submit(&mut self) -> Result<PredictionRequest, SubmitError> {
        if !self.submit_enabled() {
            return Err(SubmitError::Busy);
        }

        let request = match validate(&mut self.form) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Validation blocked submission: {}", e);
                if let Some(message) = e.alert_message() {
                    self.alerts.push_back(message);
                }
                return Err(e.into());
            }
        };

        tracing::debug!("Submitting prediction with {} features", request.len());
        self.mode = UiMode::Submitting;
        Ok(request)
    }

    /// Apply the outcome of the exchange started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<PredictionOutcome, TransportError>,
        now: Instant,
    ) {
        if self.mode != UiMode::Submitting {
            tracing::warn!("Ignoring prediction outcome received outside a submission");
            return;
        }

        match outcome {
            Ok(PredictionOutcome::Success(response)) => self.show_result(&response, now),
            Ok(PredictionOutcome::Rejected { status, body }) => self.show_rejection(status, &body),
            Err(e) => {
                tracing::error!("Prediction exchange failed: {}", e);
                self.alerts.push_back(NETWORK_ERROR.to_string());
                self.mode = UiMode::Idle;
            }
        }
    }

    /// Validate, submit through `client` and apply the outcome in one go.
    ///
    /// # Errors
    /// Same as [`begin_submit`](Self::begin_submit); the exchange itself
    /// never errors, its failures are reported through alerts.
    pub fn submit_with<C>(&mut self, client: &C, now: Instant) -> Result<(), SubmitError>
    where
        C: PredictionClient + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = client.predict(&request);
        self.finish_submit(outcome, now);
        Ok(())
    }

    fn show_result(&mut self, response: &PredictionResponse, now: Instant) {
        tracing::info!(
            "Prediction received: confidence={}%, tier={:?}",
            response.confidence,
            ConfidenceTier::from_confidence(response.confidence)
        );

        self.result = ResultView::from_response(response, chrono::Utc::now());
        self.gauge
            .animate_on_next_frame(gauge_offset(response.confidence), Transition::REVEAL);
        self.result.visible = true;
        self.focus = ViewFocus::Result;
        self.particles.burst(response.confidence, now, &mut self.rng);
        self.mode = UiMode::ResultShown;
    }

    fn show_rejection(&mut self, status: u16, body: &ErrorBody) {
        if let Some(details) = &body.details {
            match &body.trace {
                Some(trace) => {
                    tracing::error!("Prediction rejected ({}): {} {}", status, details, trace)
                }
                None => tracing::error!("Prediction rejected ({}): {}", status, details),
            }
        } else {
            tracing::warn!("Prediction rejected ({}): {}", status, body.message());
        }

        if let Some(errors) = body.field_errors() {
            self.error_renderer.render_errors(errors, &mut self.form);
        }

        self.alerts.push_back(body.message().to_string());
        self.mode = UiMode::Idle;
    }

    // === Reset ===

    /// Return form and result panel to their initial state.
    ///
    /// Idempotent. Submit always ends up enabled.
    pub fn reset(&mut self, now: Instant) {
        self.form.clear_for_reset();
        self.form.recalc_bmi();
        self.gauge
            .animate_to(TOTAL_ARC_LENGTH, Transition::RESET, now);
        self.result = ResultView::default();

        self.mode = UiMode::Idle;
        self.focus = ViewFocus::Form;
        self.form.selected_field = 0;
    }

    // === Frame clock ===

    /// Advance animations; call once per drawn frame.
    pub fn tick(&mut self, now: Instant) {
        self.gauge.tick(now);
        self.particles.tick(now);
    }
}
