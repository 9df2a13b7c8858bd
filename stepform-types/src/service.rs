use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{AnswerStore, ResponseId, Schema, SchemaId};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Reply of the schema service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaReply {
    /// The form definition, absent if the event has no form.
    #[serde(default)]
    pub schema: Option<Schema>,

    /// Human-readable status, shown to the user when `schema` is absent.
    #[serde(default)]
    pub message: String,
}

/// The applicant's earlier response to this event's form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorResponse {
    pub is_submitted: bool,

    #[serde(default)]
    pub submitted_timestamp: Option<String>,
}

/// Reply of the prior-response lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorResponseReply {
    #[serde(default)]
    pub response: Option<PriorResponse>,
}

/// Answers sent to the submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub schema_id: SchemaId,

    /// Whether this submission is final.
    pub finalize: bool,

    pub answers: AnswerStore,
}

/// Reply of the submission service.
///
/// Success is signalled only by the presence of `response_id`; there is no
/// separate status field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    pub response_id: Option<ResponseId>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub is_submitted: bool,

    #[serde(default)]
    pub submitted_timestamp: Option<String>,
}

impl SubmitReply {
    /// A successful reply.
    pub fn accepted(response_id: impl Into<ResponseId>, submitted_timestamp: impl Into<String>) -> Self {
        Self {
            response_id: Some(response_id.into()),
            message: String::new(),
            is_submitted: true,
            submitted_timestamp: Some(submitted_timestamp.into()),
        }
    }

    /// A reply without response id, carrying the service message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            response_id: None,
            message: message.into(),
            is_submitted: false,
            submitted_timestamp: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.response_id.is_some()
    }
}

/// The services a form session talks to.
///
/// Implementations own the transport. Errors returned here are transport
/// failures; a missing schema or a rejected submission is a regular reply.
pub trait FormService: Send + Sync {
    /// Fetch the form definition for an event.
    fn fetch_schema(&self, event_id: &str) -> BoxFuture<'_, anyhow::Result<SchemaReply>>;

    /// Fetch the applicant's earlier response for an event, if any.
    fn fetch_prior_response(
        &self,
        event_id: &str,
    ) -> BoxFuture<'_, anyhow::Result<PriorResponseReply>>;

    /// Send answers for storage.
    fn submit_answers(&self, request: SubmitRequest) -> BoxFuture<'_, anyhow::Result<SubmitReply>>;
}

#[cfg(test)]
mod tests {
    use crate::Answer;

    use super::*;

    #[test]
    fn rejected_reply_from_wire() {
        let reply: SubmitReply = serde_json::from_str(
            r#"{"response_id": null, "message": "validation failed", "is_submitted": false, "submitted_timestamp": null}"#,
        )
        .unwrap();

        assert!(!reply.is_accepted());
        assert_eq!(reply.message, "validation failed");
    }

    #[test]
    fn accepted_reply_from_wire() {
        let reply: SubmitReply = serde_json::from_str(
            r#"{"response_id": 17, "message": "", "is_submitted": true, "submitted_timestamp": "2019-05-01T10:00:00"}"#,
        )
        .unwrap();

        assert_eq!(reply, SubmitReply::accepted("17", "2019-05-01T10:00:00"));
    }

    #[test]
    fn prior_response_may_be_absent() {
        let reply: PriorResponseReply = serde_json::from_str(r#"{"response": null}"#).unwrap();
        assert!(reply.response.is_none());
    }

    #[test]
    fn submit_request_wire_shape() {
        let mut answers = AnswerStore::new();
        answers.set("1", "Ada");
        let request = SubmitRequest {
            schema_id: SchemaId::new("4"),
            finalize: true,
            answers,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "schema_id": "4",
                "finalize": true,
                "answers": [{"question_id": "1", "value": "Ada"}]
            })
        );
    }

    #[test]
    fn submit_request_with_repeated_answers_keeps_one_per_question() {
        let request: SubmitRequest = serde_json::from_str(
            r#"{"schema_id": 4, "finalize": true, "answers": [
                {"question_id": "1", "value": "Ada"},
                {"question_id": "1", "value": "Ada Lovelace"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(request.answers.all(), &[Answer::new("1", "Ada Lovelace")]);
    }
}
