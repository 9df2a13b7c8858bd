//! The final submit round trip.

use stepform_types::{AnswerStore, FormService, SchemaId, SubmitReply, SubmitRequest};
use thiserror::Error;

/// Error type for submit attempts the workflow refuses to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,

    #[error("The form has already been submitted")]
    AlreadySubmitted,
}

/// Where the submission stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing sent yet.
    #[default]
    Idle,

    /// Waiting for the submission service.
    Loading,

    /// Stored by the service. Terminal.
    Submitted { timestamp: Option<String> },

    /// Rejected or failed. Terminal for this attempt; the answers are kept so
    /// the user can submit again.
    Error { message: String },
}

/// Drives `Idle -> Loading -> Submitted | Error`.
///
/// The workflow never touches the answers it sends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workflow that starts out submitted, for a form the applicant already sent.
    pub fn submitted(timestamp: Option<String>) -> Self {
        Self {
            state: SubmissionState::Submitted { timestamp },
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Loading)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SubmissionState::Submitted { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, SubmissionState::Error { .. })
    }

    /// Enter `Loading`. Allowed from `Idle` and from `Error` (a resubmit).
    pub fn begin(&mut self) -> Result<(), SubmitError> {
        match self.state {
            SubmissionState::Loading => Err(SubmitError::InFlight),
            SubmissionState::Submitted { .. } => Err(SubmitError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Error { .. } => {
                self.state = SubmissionState::Loading;
                Ok(())
            }
        }
    }

    /// Apply the service reply. A reply without response id is a rejection.
    pub fn resolve(&mut self, reply: SubmitReply) -> &SubmissionState {
        match reply.response_id {
            Some(response_id) => {
                if !reply.is_submitted {
                    tracing::warn!(%response_id, "reply carries a response id but is not marked submitted");
                }
                tracing::info!(%response_id, "submission stored");
                self.state = SubmissionState::Submitted {
                    timestamp: reply.submitted_timestamp,
                };
            }
            None => {
                tracing::warn!(message = %reply.message, "submission rejected");
                self.state = SubmissionState::Error {
                    message: reply.message,
                };
            }
        }
        &self.state
    }

    /// Record a transport failure.
    pub fn fail(&mut self, err: anyhow::Error) -> &SubmissionState {
        tracing::warn!(error = %err, "submission failed");
        self.state = SubmissionState::Error {
            message: err.to_string(),
        };
        &self.state
    }

    /// Leave `Error` so the user can edit again. No effect in other states.
    pub fn reset(&mut self) {
        if self.is_error() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Send the answers as a final submission and apply the outcome.
    pub async fn submit(
        &mut self,
        service: &dyn FormService,
        schema_id: &SchemaId,
        answers: &AnswerStore,
    ) -> Result<&SubmissionState, SubmitError> {
        self.begin()?;

        let request = SubmitRequest {
            schema_id: schema_id.clone(),
            finalize: true,
            answers: answers.clone(),
        };
        tracing::debug!(schema = %schema_id, answers = answers.len(), "submitting answers");

        Ok(match service.submit_answers(request).await {
            Ok(reply) => self.resolve(reply),
            Err(err) => self.fail(err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_enters_loading() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        assert!(workflow.is_loading());
    }

    #[test]
    fn second_begin_while_loading_is_refused() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        assert_eq!(workflow.begin(), Err(SubmitError::InFlight));
    }

    #[test]
    fn accepted_reply_submits() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        let state = workflow.resolve(SubmitReply::accepted("5", "2019-06-01 12:00"));
        assert_eq!(
            state,
            &SubmissionState::Submitted {
                timestamp: Some("2019-06-01 12:00".to_string())
            }
        );
        assert_eq!(workflow.begin(), Err(SubmitError::AlreadySubmitted));
    }

    #[test]
    fn missing_response_id_is_an_error() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        workflow.resolve(SubmitReply::rejected("validation failed"));
        assert_eq!(
            workflow.state(),
            &SubmissionState::Error {
                message: "validation failed".to_string()
            }
        );
    }

    #[test]
    fn error_allows_resubmit() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        workflow.fail(anyhow::anyhow!("connection reset"));
        assert!(workflow.is_error());
        workflow.begin().unwrap();
        assert!(workflow.is_loading());
    }

    #[test]
    fn reset_only_leaves_error() {
        let mut workflow = SubmissionWorkflow::submitted(None);
        workflow.reset();
        assert!(workflow.is_submitted());

        let mut workflow = SubmissionWorkflow::new();
        workflow.begin().unwrap();
        workflow.resolve(SubmitReply::rejected("nope"));
        workflow.reset();
        assert_eq!(workflow.state(), &SubmissionState::Idle);
    }
}
