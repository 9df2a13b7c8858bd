//! # stepform
//!
//! Multi-step forms driven by a server-supplied schema.
//!
//! The server describes the form as ordered sections of typed questions. This
//! crate walks that schema one section per step, captures answers from input
//! events, shows a confirmation step with everything answered, and submits.
//! It draws nothing: a renderer reads [`View`], [`Progress`], [`Navigation`],
//! the current [`Field`]s and the confirmation entries, and feeds input events
//! back into the [`FormSession`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stepform::{FormConfig, FormSession, RawEvent, View};
//!
//! let config = FormConfig::load()?;
//! let mut session = FormSession::mount(&service, &config).await;
//!
//! if let View::Editing { .. } = session.view() {
//!     for field in session.fields() {
//!         // render field.capture() ...
//!     }
//! }
//!
//! session.handle_event(&RawEvent::text(&name_id, "Ada"))?;
//! session.next()?;
//! // ...
//! session.submit(&service).await?;
//! ```
//!
//! ## Flow
//!
//! - `Loading` until the schema and the prior-response lookup both resolve
//! - `Editing { section }` for each section in ascending `order`
//! - `Confirmation` after the last section
//! - `Submitted` or `Error` after the submit round trip
//!
//! A prior response marked submitted skips straight to `Submitted`.

// Re-export all types from stepform-types
pub use stepform_types::*;

pub mod config;
pub use config::FormConfig;

pub mod logging;

pub mod confirmation;
pub use confirmation::ConfirmationEntry;

mod field;
pub use field::{Capture, Field, FieldDispatcher, RawEvent, RawInput, TOGGLE_OFF, TOGGLE_ON};

mod step;
pub use step::{CONFIRMATION_LABEL, Navigation, StepController, StepError, StepPosition};

mod submission;
pub use submission::{SubmissionState, SubmissionWorkflow, SubmitError};

mod session;
pub use session::{
    FormSession, FormSessionState, Moved, PriorStatus, Progress, SchemaStatus, SessionError, View,
};

// Stub service for running sessions without a server
mod stub_service;
pub use stub_service::{StubFormService, StubServiceError};
