//! In-memory form service for running sessions without a server.
//!
//! `StubFormService` answers every call from pre-configured replies and
//! records what was submitted. This is useful for testing and for demos.
//!
//! # Example
//!
//! ```rust,ignore
//! use stepform::{FormSession, StubFormService, View};
//!
//! let service = StubFormService::new()
//!     .with_schema(schema)
//!     .with_submit_reply(SubmitReply::accepted("1", "2019-05-01"));
//!
//! let mut session = FormSession::mount_event(&service, "1").await;
//! assert_eq!(session.view(), View::Editing { section: 0 });
//! ```

use std::sync::{Mutex, PoisonError};

use stepform_types::{
    BoxFuture, FormService, PriorResponse, PriorResponseReply, Schema, SchemaReply, SubmitReply,
    SubmitRequest,
};

/// Error type for StubFormService.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StubServiceError {
    #[error("No stubbed reply for {0}")]
    NotConfigured(&'static str),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
enum Stubbed<T> {
    Reply(T),
    Fail(StubServiceError),
}

impl<T: Clone> Stubbed<T> {
    fn result(&self) -> anyhow::Result<T> {
        match self {
            Self::Reply(reply) => Ok(reply.clone()),
            Self::Fail(err) => Err(err.clone().into()),
        }
    }
}

/// A form service that returns pre-configured replies.
///
/// Without configuration it serves no schema, no prior response, and fails
/// every submission.
#[derive(Debug)]
pub struct StubFormService {
    schema: Stubbed<SchemaReply>,
    prior: Stubbed<PriorResponseReply>,
    submit: Stubbed<SubmitReply>,
    submissions: Mutex<Vec<SubmitRequest>>,
}

impl Default for StubFormService {
    fn default() -> Self {
        Self::new()
    }
}

impl StubFormService {
    /// Create a new unconfigured stub.
    pub fn new() -> Self {
        Self {
            schema: Stubbed::Reply(SchemaReply::default()),
            prior: Stubbed::Reply(PriorResponseReply::default()),
            submit: Stubbed::Fail(StubServiceError::NotConfigured("submit_answers")),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Serve the given schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Stubbed::Reply(SchemaReply {
            schema: Some(schema),
            message: String::new(),
        });
        self
    }

    /// Serve no schema, with the given message.
    pub fn without_schema(mut self, message: impl Into<String>) -> Self {
        self.schema = Stubbed::Reply(SchemaReply {
            schema: None,
            message: message.into(),
        });
        self
    }

    /// Fail the schema fetch as a transport error.
    pub fn failing_schema(mut self, message: impl Into<String>) -> Self {
        self.schema = Stubbed::Fail(StubServiceError::Unavailable(message.into()));
        self
    }

    /// Report an earlier response.
    pub fn with_prior_response(mut self, is_submitted: bool, timestamp: Option<&str>) -> Self {
        self.prior = Stubbed::Reply(PriorResponseReply {
            response: Some(PriorResponse {
                is_submitted,
                submitted_timestamp: timestamp.map(str::to_string),
            }),
        });
        self
    }

    /// Answer every submission with the given reply.
    pub fn with_submit_reply(mut self, reply: SubmitReply) -> Self {
        self.submit = Stubbed::Reply(reply);
        self
    }

    /// Fail every submission as a transport error.
    pub fn failing_submit(mut self, message: impl Into<String>) -> Self {
        self.submit = Stubbed::Fail(StubServiceError::Unavailable(message.into()));
        self
    }

    /// Every request submitted so far, oldest first.
    pub fn submissions(&self) -> Vec<SubmitRequest> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FormService for StubFormService {
    fn fetch_schema(&self, event_id: &str) -> BoxFuture<'_, anyhow::Result<SchemaReply>> {
        tracing::debug!(event = event_id, "stub: fetch schema");
        let result = self.schema.result();
        Box::pin(async move { result })
    }

    fn fetch_prior_response(
        &self,
        event_id: &str,
    ) -> BoxFuture<'_, anyhow::Result<PriorResponseReply>> {
        tracing::debug!(event = event_id, "stub: fetch prior response");
        let result = self.prior.result();
        Box::pin(async move { result })
    }

    fn submit_answers(&self, request: SubmitRequest) -> BoxFuture<'_, anyhow::Result<SubmitReply>> {
        tracing::debug!(schema = %request.schema_id, answers = request.answers.len(), "stub: submit");
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let result = self.submit.result();
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use stepform_types::{AnswerStore, SchemaId};

    use super::*;

    #[tokio::test]
    async fn unconfigured_stub() {
        let service = StubFormService::new();

        let schema = service.fetch_schema("1").await.unwrap();
        assert!(schema.schema.is_none());

        let prior = service.fetch_prior_response("1").await.unwrap();
        assert!(prior.response.is_none());

        let request = SubmitRequest {
            schema_id: SchemaId::new("1"),
            finalize: true,
            answers: AnswerStore::new(),
        };
        let err = service.submit_answers(request).await.unwrap_err();
        assert_eq!(err.to_string(), "No stubbed reply for submit_answers");
        assert_eq!(service.submissions().len(), 1);
    }

    #[tokio::test]
    async fn failing_schema_is_a_transport_error() {
        let service = StubFormService::new().failing_schema("connection refused");
        let err = service.fetch_schema("1").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
