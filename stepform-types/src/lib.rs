//! Core types for the stepform crate.
//!
//! This crate provides the foundational types for server-defined forms:
//! - `Schema`, `Section` and `FormSchema` - The form definition and its rendering order
//! - `Question` and `QuestionType` - Individual questions and their input types
//! - `AnswerStore` and `Answer` - Captured answers keyed by question id
//! - `FormService` - The port to the schema and submission services

mod ids;
pub use ids::{FIELD_ID_PREFIX, FieldId, QuestionId, ResponseId, SchemaId};

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{Answer, AnswerError, AnswerStore};

mod question;
pub use question::{Choice, Question, QuestionType, UPLOADED_FILE_LABEL};

mod schema;
pub use schema::{FormSchema, Schema, Section};

mod error;
pub use error::FormError;

mod service;
pub use service::{
    BoxFuture, FormService, PriorResponse, PriorResponseReply, SchemaReply, SubmitReply,
    SubmitRequest,
};
