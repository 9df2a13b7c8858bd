//! Step navigation over the sections of a form.
//!
//! Steps are numbered from 1. Steps `1..=num_sections` show one section each;
//! step `num_sections + 1` is the confirmation step.

use stepform_types::{FormSchema, Section};
use thiserror::Error;

/// Label of the synthetic last step.
pub const CONFIRMATION_LABEL: &str = "Confirmation";

/// Error type for illegal navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Cannot advance past the confirmation step")]
    PastConfirmation,
}

/// What the current step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    /// A section, by zero-based index into the sorted sections.
    Section(usize),

    /// The review step after the last section.
    Confirmation,
}

/// Which navigation actions the current step offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub previous: bool,
    pub next: bool,
    pub submit: bool,
}

/// Tracks the current step of a form with a fixed number of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepController {
    current: usize,
    num_sections: usize,
}

impl StepController {
    /// Start at step 1 of a form with `num_sections` sections.
    pub fn new(num_sections: usize) -> Self {
        Self {
            current: 1,
            num_sections,
        }
    }

    /// Start at step 1 of the given schema.
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self::new(schema.num_sections())
    }

    /// The current step, 1-based.
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn num_sections(&self) -> usize {
        self.num_sections
    }

    /// Total number of steps including confirmation.
    pub fn num_steps(&self) -> usize {
        self.num_sections + 1
    }

    pub fn position(&self) -> StepPosition {
        if self.current <= self.num_sections {
            StepPosition::Section(self.current - 1)
        } else {
            StepPosition::Confirmation
        }
    }

    pub fn is_confirmation(&self) -> bool {
        self.position() == StepPosition::Confirmation
    }

    /// Move to the next step. Returns the new step.
    pub fn advance(&mut self) -> Result<usize, StepError> {
        if self.current > self.num_sections {
            return Err(StepError::PastConfirmation);
        }
        self.current += 1;
        Ok(self.current)
    }

    /// Move to the previous step. Returns the new step.
    pub fn retreat(&mut self) -> Result<usize, StepError> {
        if self.current <= 1 {
            return Err(StepError::AtFirstStep);
        }
        self.current -= 1;
        Ok(self.current)
    }

    /// The section shown at the current step, `None` on confirmation.
    pub fn current_section<'a>(&self, schema: &'a FormSchema) -> Option<&'a Section> {
        match self.position() {
            StepPosition::Section(index) => schema.section(index),
            StepPosition::Confirmation => None,
        }
    }

    /// Share of the form reached so far, in `(0, 1]`. Display only.
    pub fn progress_fraction(&self) -> f64 {
        self.current as f64 / self.num_steps() as f64
    }

    pub fn navigation(&self) -> Navigation {
        Navigation {
            previous: self.current > 1,
            next: self.current <= self.num_sections,
            submit: self.current > self.num_sections,
        }
    }

    /// Heading of the current step: the section name, or [`CONFIRMATION_LABEL`].
    pub fn label<'a>(&self, schema: &'a FormSchema) -> &'a str {
        self.current_section(schema)
            .map_or(CONFIRMATION_LABEL, |section| section.name.as_str())
    }
}
