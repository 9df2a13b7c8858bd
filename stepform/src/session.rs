//! One applicant's pass through a form.
//!
//! [`FormSession`] is the single owner of all form state. Every external event
//! (a fetch completing, an input event, a navigation click, a submit reply) is
//! a `&mut self` method, so transitions never interleave.

use stepform_types::{
    AnswerStore, AnswerValue, FormError, FormSchema, FormService, PriorResponseReply,
    QuestionId, SchemaReply, SubmitReply, SubmitRequest,
};
use thiserror::Error;

use crate::config::FormConfig;
use crate::confirmation::{self, ConfirmationEntry};
use crate::field::{Field, FieldDispatcher, RawEvent};
use crate::step::{Navigation, StepController, StepError, StepPosition};
use crate::submission::{SubmissionState, SubmissionWorkflow, SubmitError};

/// Error type for events the session refuses in its current view.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("The form is not ready for input")]
    NotReady,

    #[error("The form has already been submitted")]
    Closed,

    #[error("Answers can only be submitted from the confirmation step")]
    NotOnConfirmation,

    #[error(transparent)]
    Step(#[from] StepError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// What the applicant currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Error { message: String },
    Submitted { timestamp: Option<String> },
    Editing { section: usize },
    Confirmation,
}

/// Outcome of the schema fetch.
#[derive(Debug, Default)]
pub enum SchemaStatus {
    #[default]
    Pending,
    Ready,
    Unavailable(FormError),
}

/// Outcome of the prior-response lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorStatus {
    #[default]
    Pending,
    Resolved,
}

/// Result of a successful navigation click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    /// The step now shown.
    pub step: usize,

    /// Whether the renderer should scroll back to the top.
    pub scroll_to_top: bool,
}

/// Progress indicator contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
    pub fraction: f64,
    /// Current section name, or "Confirmation".
    pub label: String,
}

/// Flat snapshot of the session, field for field what a renderer keys off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSessionState {
    pub current_step: usize,
    pub is_loading: bool,
    pub is_error: bool,
    pub is_submitted: bool,
    pub submitted_timestamp: Option<String>,
    pub error_message: String,
    pub answers: AnswerStore,
}

#[derive(Debug)]
pub struct FormSession {
    event_id: String,
    schema: Option<FormSchema>,
    schema_status: SchemaStatus,
    prior_status: PriorStatus,
    steps: StepController,
    answers: AnswerStore,
    submission: SubmissionWorkflow,
}

impl FormSession {
    /// A freshly mounted session, waiting for both fetches.
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            schema: None,
            schema_status: SchemaStatus::Pending,
            prior_status: PriorStatus::Pending,
            steps: StepController::new(0),
            answers: AnswerStore::new(),
            submission: SubmissionWorkflow::new(),
        }
    }

    /// Mount a session for the configured default event.
    pub async fn mount(service: &dyn FormService, config: &FormConfig) -> Self {
        Self::mount_event(service, &config.default_event_id).await
    }

    /// Mount a session for an event: fetch the schema and the prior response
    /// concurrently and apply both.
    pub async fn mount_event(service: &dyn FormService, event_id: &str) -> Self {
        let mut session = Self::new(event_id);
        tracing::info!(event = event_id, "mounting form session");

        let (schema, prior) = tokio::join!(
            service.fetch_schema(event_id),
            service.fetch_prior_response(event_id)
        );
        session.apply_schema(schema);
        session.apply_prior_response(prior);
        session
    }

    /// Apply the outcome of the schema fetch.
    pub fn apply_schema(&mut self, result: anyhow::Result<SchemaReply>) {
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                let err = FormError::service(err);
                tracing::warn!(event = %self.event_id, error = %err, "schema fetch failed");
                self.schema_status = SchemaStatus::Unavailable(err);
                return;
            }
        };

        match FormSchema::load(reply.schema) {
            Some(schema) => {
                tracing::info!(
                    event = %self.event_id,
                    schema = %schema.id(),
                    sections = schema.num_sections(),
                    "schema loaded"
                );
                for question in schema.questions().filter(|q| !q.kind.is_supported()) {
                    tracing::warn!(
                        question = %question.id,
                        kind = %question.kind.tag(),
                        "no control for question type"
                    );
                }
                self.steps = StepController::for_schema(&schema);
                self.schema = Some(schema);
                self.schema_status = SchemaStatus::Ready;
            }
            None => {
                let err = FormError::SchemaUnavailable(reply.message);
                tracing::warn!(event = %self.event_id, error = %err, "no schema for event");
                self.schema_status = SchemaStatus::Unavailable(err);
            }
        }
    }

    /// Apply the outcome of the prior-response lookup.
    ///
    /// A prior response marked submitted closes the form. A failed lookup is
    /// treated like having no prior response.
    pub fn apply_prior_response(&mut self, result: anyhow::Result<PriorResponseReply>) {
        self.prior_status = PriorStatus::Resolved;
        match result {
            Ok(reply) => {
                if let Some(prior) = reply.response
                    && prior.is_submitted
                {
                    tracing::info!(event = %self.event_id, "form already submitted");
                    self.submission = SubmissionWorkflow::submitted(prior.submitted_timestamp);
                }
            }
            Err(err) => {
                tracing::warn!(event = %self.event_id, error = %err, "prior response lookup failed");
            }
        }
    }

    pub fn view(&self) -> View {
        if self.submission.is_loading() {
            return View::Loading;
        }
        if let SubmissionState::Submitted { timestamp } = self.submission.state() {
            return View::Submitted {
                timestamp: timestamp.clone(),
            };
        }
        if matches!(self.schema_status, SchemaStatus::Pending)
            || self.prior_status == PriorStatus::Pending
        {
            return View::Loading;
        }
        if let SchemaStatus::Unavailable(err) = &self.schema_status {
            return View::Error {
                message: err.user_message(),
            };
        }
        if let SubmissionState::Error { message } = self.submission.state() {
            return View::Error {
                message: message.clone(),
            };
        }
        match self.steps.position() {
            StepPosition::Section(section) => View::Editing { section },
            StepPosition::Confirmation => View::Confirmation,
        }
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.view() {
            View::Editing { .. } | View::Confirmation => Ok(()),
            View::Submitted { .. } => Err(SessionError::Closed),
            View::Loading | View::Error { .. } => Err(SessionError::NotReady),
        }
    }

    /// The fields of the section on screen, empty outside editing.
    pub fn fields(&self) -> Vec<Field> {
        match (self.view(), &self.schema) {
            (View::Editing { section }, Some(schema)) => schema
                .section(section)
                .map(FieldDispatcher::dispatch_section)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Route an input event to its field and record the answer.
    ///
    /// Returns whether an answer was recorded. Events for fields not on the
    /// current step, and events on unsupported fields, record nothing.
    pub fn handle_event(&mut self, event: &RawEvent) -> Result<bool, SessionError> {
        self.ensure_editable()?;

        let Some(question_id) = event.field_id.question_id() else {
            tracing::debug!(field = %event.field_id, "event for a foreign field id");
            return Ok(false);
        };
        let captured = self
            .schema
            .as_ref()
            .and_then(|schema| self.steps.current_section(schema))
            .and_then(|section| section.questions().iter().find(|q| q.id == question_id))
            .and_then(|question| FieldDispatcher::dispatch(question).normalize(event));

        match captured {
            Some((question_id, value)) => {
                tracing::debug!(question = %question_id, "answer captured");
                self.answers.set(question_id, value);
                Ok(true)
            }
            None => {
                tracing::debug!(question = %question_id, "event captured no answer");
                Ok(false)
            }
        }
    }

    /// Record an answer directly, bypassing field dispatch.
    pub fn set_answer(
        &mut self,
        question_id: impl Into<QuestionId>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.answers.set(question_id, value);
        Ok(())
    }

    /// Go to the next step.
    pub fn next(&mut self) -> Result<Moved, SessionError> {
        self.ensure_editable()?;
        let step = self.steps.advance()?;
        tracing::debug!(step, "advanced");
        Ok(Moved {
            step,
            scroll_to_top: true,
        })
    }

    /// Go to the previous step.
    ///
    /// Also the way out of a rejected submission: the error is dismissed and
    /// the applicant lands on the step before confirmation, answers intact.
    pub fn previous(&mut self) -> Result<Moved, SessionError> {
        if self.submission.is_error() && self.schema.is_some() {
            if self.steps.current_step() <= 1 {
                return Err(StepError::AtFirstStep.into());
            }
            self.submission.reset();
        }
        self.ensure_editable()?;
        let step = self.steps.retreat()?;
        tracing::debug!(step, "retreated");
        Ok(Moved {
            step,
            scroll_to_top: false,
        })
    }

    fn ensure_submittable(&self) -> Result<(), SessionError> {
        if self.submission.is_submitted() {
            return Err(SessionError::Closed);
        }
        if self.submission.is_loading() {
            return Err(SubmitError::InFlight.into());
        }
        if self.schema.is_none() || self.prior_status == PriorStatus::Pending {
            return Err(SessionError::NotReady);
        }
        if !self.steps.is_confirmation() {
            return Err(SessionError::NotOnConfirmation);
        }
        Ok(())
    }

    /// Start a submission, for callers that run the transport themselves.
    ///
    /// The session shows `Loading` until [`FormSession::finish_submit`] is called.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SessionError> {
        self.ensure_submittable()?;
        let schema = self.schema.as_ref().ok_or(SessionError::NotReady)?;
        self.submission.begin()?;
        Ok(SubmitRequest {
            schema_id: schema.id().clone(),
            finalize: true,
            answers: self.answers.clone(),
        })
    }

    /// Apply the outcome of a submission started with [`FormSession::begin_submit`].
    pub fn finish_submit(&mut self, result: anyhow::Result<SubmitReply>) -> View {
        if !self.submission.is_loading() {
            tracing::warn!("submit reply without a submission in flight");
            return self.view();
        }
        match result {
            Ok(reply) => self.submission.resolve(reply),
            Err(err) => self.submission.fail(err),
        };
        self.view()
    }

    /// Submit the answers and wait for the outcome.
    ///
    /// Allowed from the confirmation step, and again after a rejected
    /// submission. The answers are kept whatever the outcome.
    pub async fn submit(&mut self, service: &dyn FormService) -> Result<View, SessionError> {
        self.ensure_submittable()?;
        let schema = self.schema.as_ref().ok_or(SessionError::NotReady)?;
        self.submission
            .submit(service, schema.id(), &self.answers)
            .await?;
        Ok(self.view())
    }

    /// The review list for the confirmation step.
    pub fn confirmation(&self) -> Vec<ConfirmationEntry> {
        self.schema
            .as_ref()
            .map(|schema| confirmation::entries(schema, &self.answers))
            .unwrap_or_default()
    }

    pub fn progress(&self) -> Option<Progress> {
        let schema = self.schema.as_ref()?;
        Some(Progress {
            step: self.steps.current_step(),
            total: self.steps.num_steps(),
            fraction: self.steps.progress_fraction(),
            label: self.steps.label(schema).to_string(),
        })
    }

    /// The navigation buttons to offer. None outside editing.
    pub fn navigation(&self) -> Navigation {
        match self.view() {
            View::Editing { .. } | View::Confirmation => self.steps.navigation(),
            _ => Navigation::default(),
        }
    }

    pub fn state(&self) -> FormSessionState {
        let (is_submitted, submitted_timestamp) = match self.submission.state() {
            SubmissionState::Submitted { timestamp } => (true, timestamp.clone()),
            _ => (false, None),
        };
        let error_message = match (&self.schema_status, self.submission.state()) {
            (SchemaStatus::Unavailable(err), _) => err.user_message(),
            (_, SubmissionState::Error { message }) => message.clone(),
            _ => String::new(),
        };

        FormSessionState {
            current_step: self.steps.current_step(),
            is_loading: self.view() == View::Loading,
            is_error: matches!(self.schema_status, SchemaStatus::Unavailable(_))
                || self.submission.is_error(),
            is_submitted,
            submitted_timestamp,
            error_message,
            answers: self.answers.clone(),
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        self.schema.as_ref()
    }

    pub fn schema_status(&self) -> &SchemaStatus {
        &self.schema_status
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    pub fn submission(&self) -> &SubmissionWorkflow {
        &self.submission
    }
}
