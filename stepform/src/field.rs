//! Mapping from question types to input-capture behavior.
//!
//! The dispatcher decides *how* a question is answered, never how the control
//! looks. Each [`Field`] turns raw interaction events into the
//! `(question id, value)` pair the answer store records.

use stepform_types::{AnswerValue, Choice, FieldId, Question, QuestionId, QuestionType, Section};

/// Rows of a multi-line text control.
pub const LONG_TEXT_ROWS: usize = 5;

/// Value recorded for a checked toggle.
pub const TOGGLE_ON: &str = "on";

/// Value recorded for an unchecked toggle.
pub const TOGGLE_OFF: &str = "off";

/// How a field captures its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Single-line text.
    SingleLine,

    /// A single on/off control.
    Toggle,

    /// Multi-line text.
    MultiLine { rows: usize },

    /// One option out of `options`.
    Select { options: Vec<Choice> },

    /// File picker.
    FilePicker,

    /// No control exists for the question type. Rendered as a warning only.
    Unsupported { warning: String },
}

/// The payload of an interaction event, as delivered by the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Text typed into a text control, or the raw value of any control.
    Text(String),

    /// Checked state of a toggle.
    Checked(bool),

    /// Option picked from a selection.
    Selected(Choice),

    /// Name or handle of a picked file.
    File(String),
}

/// An interaction event tagged with the field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub field_id: FieldId,
    pub input: RawInput,
}

impl RawEvent {
    pub fn new(field_id: impl Into<FieldId>, input: RawInput) -> Self {
        Self {
            field_id: field_id.into(),
            input,
        }
    }

    /// Text input for the field of the given question.
    pub fn text(question_id: &QuestionId, text: impl Into<String>) -> Self {
        Self::new(question_id, RawInput::Text(text.into()))
    }

    /// Toggle input for the field of the given question.
    pub fn checked(question_id: &QuestionId, checked: bool) -> Self {
        Self::new(question_id, RawInput::Checked(checked))
    }

    /// Selection input for the field of the given question.
    pub fn selected(question_id: &QuestionId, choice: Choice) -> Self {
        Self::new(question_id, RawInput::Selected(choice))
    }

    /// File input for the field of the given question.
    pub fn file(question_id: &QuestionId, name: impl Into<String>) -> Self {
        Self::new(question_id, RawInput::File(name.into()))
    }
}

/// A question prepared for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    question_id: QuestionId,
    headline: String,
    label: String,
    placeholder: String,
    capture: Capture,
}

impl Field {
    /// The composite identifier events for this field carry.
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self.capture, Capture::Unsupported { .. })
    }

    /// Normalize an event into the answer it records.
    ///
    /// Returns `None` for events addressed to another field, for inputs the
    /// capture cannot produce, for selections outside the option list, and
    /// for every event on an unsupported field.
    pub fn normalize(&self, event: &RawEvent) -> Option<(QuestionId, AnswerValue)> {
        if event.field_id != self.id {
            return None;
        }

        let value = match (&self.capture, &event.input) {
            (Capture::SingleLine | Capture::MultiLine { .. }, RawInput::Text(text)) => text.clone(),
            (Capture::Toggle, RawInput::Checked(checked)) => {
                let value = if *checked { TOGGLE_ON } else { TOGGLE_OFF };
                value.to_string()
            }
            (Capture::Toggle, RawInput::Text(raw)) => raw.clone(),
            (Capture::Select { options }, RawInput::Selected(choice)) => {
                known_option(options, &choice.value)?
            }
            (Capture::Select { options }, RawInput::Text(raw)) => known_option(options, raw)?,
            (Capture::FilePicker, RawInput::File(name) | RawInput::Text(name)) => name.clone(),
            (Capture::Unsupported { .. }, _) => return None,
            _ => return None,
        };

        Some((self.question_id.clone(), AnswerValue::new(value)))
    }
}

fn known_option(options: &[Choice], value: &str) -> Option<String> {
    options
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.value.clone())
}

/// Warning shown in place of a control for an unknown question type.
pub fn unsupported_warning(tag: &str) -> String {
    format!("WARNING: No control found for type {tag}!")
}

/// Selects the capture behavior for questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDispatcher;

impl FieldDispatcher {
    /// Prepare a question for input.
    pub fn dispatch(question: &Question) -> Field {
        let capture = match &question.kind {
            QuestionType::ShortText => Capture::SingleLine,
            QuestionType::SingleChoice => Capture::Toggle,
            QuestionType::LongText => Capture::MultiLine {
                rows: LONG_TEXT_ROWS,
            },
            QuestionType::MultiChoice => Capture::Select {
                options: question.options().to_vec(),
            },
            QuestionType::File => Capture::FilePicker,
            QuestionType::Unsupported(tag) => {
                tracing::debug!(question = %question.id, kind = %tag, "no control for question type");
                Capture::Unsupported {
                    warning: unsupported_warning(tag),
                }
            }
        };

        Field {
            id: FieldId::for_question(&question.id),
            question_id: question.id.clone(),
            headline: question.headline.clone(),
            label: question.description.clone(),
            placeholder: question.placeholder.clone(),
            capture,
        }
    }

    /// Prepare every question of a section, in rendering order.
    pub fn dispatch_section(section: &Section) -> Vec<Field> {
        section.questions().iter().map(Self::dispatch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: QuestionType) -> Field {
        FieldDispatcher::dispatch(
            &Question::new("7", kind, 1)
                .with_headline("Headline")
                .with_description("Label")
                .with_placeholder("Type here")
                .with_options(vec![Choice::new("m", "Medium"), Choice::new("l", "Large")]),
        )
    }

    fn id() -> QuestionId {
        QuestionId::new("7")
    }

    #[test]
    fn dispatch_covers_every_type() {
        assert_eq!(field(QuestionType::ShortText).capture(), &Capture::SingleLine);
        assert_eq!(field(QuestionType::SingleChoice).capture(), &Capture::Toggle);
        assert_eq!(
            field(QuestionType::LongText).capture(),
            &Capture::MultiLine { rows: 5 }
        );
        assert!(matches!(
            field(QuestionType::MultiChoice).capture(),
            Capture::Select { options } if options.len() == 2
        ));
        assert_eq!(field(QuestionType::File).capture(), &Capture::FilePicker);
    }

    #[test]
    fn field_carries_question_texts() {
        let field = field(QuestionType::ShortText);
        assert_eq!(field.id().as_str(), "question_7");
        assert_eq!(field.headline(), "Headline");
        assert_eq!(field.label(), "Label");
        assert_eq!(field.placeholder(), "Type here");
    }

    #[test]
    fn text_is_captured_raw() {
        let field = field(QuestionType::ShortText);
        let (question, value) = field.normalize(&RawEvent::text(&id(), " Ada ")).unwrap();
        assert_eq!(question, id());
        assert_eq!(value.as_str(), " Ada ");

        let field = self::field(QuestionType::LongText);
        let (_, value) = field.normalize(&RawEvent::text(&id(), "line\nline")).unwrap();
        assert_eq!(value.as_str(), "line\nline");
    }

    #[test]
    fn toggle_normalizes_checked_state() {
        let field = field(QuestionType::SingleChoice);
        let (_, on) = field.normalize(&RawEvent::checked(&id(), true)).unwrap();
        let (_, off) = field.normalize(&RawEvent::checked(&id(), false)).unwrap();
        assert_eq!(on.as_str(), TOGGLE_ON);
        assert_eq!(off.as_str(), TOGGLE_OFF);

        let (_, raw) = field.normalize(&RawEvent::text(&id(), "on")).unwrap();
        assert_eq!(raw.as_str(), "on");
    }

    #[test]
    fn select_records_option_value() {
        let field = field(QuestionType::MultiChoice);
        let (_, value) = field
            .normalize(&RawEvent::selected(&id(), Choice::new("l", "Large")))
            .unwrap();
        assert_eq!(value.as_str(), "l");
    }

    #[test]
    fn select_rejects_unknown_options() {
        let field = field(QuestionType::MultiChoice);
        assert!(
            field
                .normalize(&RawEvent::selected(&id(), Choice::new("xl", "Extra large")))
                .is_none()
        );
        assert!(field.normalize(&RawEvent::text(&id(), "xl")).is_none());
    }

    #[test]
    fn file_records_name() {
        let field = field(QuestionType::File);
        let (_, value) = field.normalize(&RawEvent::file(&id(), "cv.pdf")).unwrap();
        assert_eq!(value.as_str(), "cv.pdf");
    }

    #[test]
    fn mismatched_input_is_ignored() {
        let field = field(QuestionType::ShortText);
        assert!(field.normalize(&RawEvent::checked(&id(), true)).is_none());
    }

    #[test]
    fn events_for_other_fields_are_ignored() {
        let field = field(QuestionType::ShortText);
        let other = QuestionId::new("8");
        assert!(field.normalize(&RawEvent::text(&other, "Ada")).is_none());
    }

    #[test]
    fn unsupported_type_renders_warning_and_captures_nothing() {
        let field = field(QuestionType::Unsupported("date-picker".to_string()));
        assert!(!field.is_supported());
        assert_eq!(
            field.capture(),
            &Capture::Unsupported {
                warning: "WARNING: No control found for type date-picker!".to_string()
            }
        );
        assert!(field.normalize(&RawEvent::text(&id(), "2019-01-01")).is_none());
        assert!(field.normalize(&RawEvent::file(&id(), "x")).is_none());
    }

    #[test]
    fn dispatch_section_keeps_order() {
        let section = Section::new(
            "About",
            1,
            vec![
                Question::new("a", QuestionType::ShortText, 1),
                Question::new("b", QuestionType::File, 2),
            ],
        );
        let ids: Vec<_> = FieldDispatcher::dispatch_section(&section)
            .iter()
            .map(|f| f.question_id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
