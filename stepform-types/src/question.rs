use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, QuestionId};

/// Displayed in place of the file name once a file answer exists.
pub const UPLOADED_FILE_LABEL: &str = "Uploaded File";

/// The declared input type of a question.
///
/// Parsed from the wire tag. Unknown tags are kept as [`QuestionType::Unsupported`]
/// so one odd question cannot fail the whole schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// Single-line text input.
    ShortText,

    /// A single on/off toggle.
    SingleChoice,

    /// Multi-line text input. Accepts both `long-text` and `long_text`.
    LongText,

    /// Pick one option from the question's option list.
    MultiChoice,

    /// File upload.
    File,

    /// A tag this client has no control for. Holds the raw tag.
    Unsupported(String),
}

impl QuestionType {
    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "short-text" => Self::ShortText,
            "single-choice" => Self::SingleChoice,
            "long-text" | "long_text" => Self::LongText,
            "multi-choice" => Self::MultiChoice,
            "file" => Self::File,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The canonical wire tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::ShortText => "short-text",
            Self::SingleChoice => "single-choice",
            Self::LongText => "long-text",
            Self::MultiChoice => "multi-choice",
            Self::File => "file",
            Self::Unsupported(tag) => tag,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Check if answers to this type are picked from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::MultiChoice)
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single question in a form section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,

    #[serde(rename = "type")]
    pub kind: QuestionType,

    /// Title shown above the control and on the confirmation step.
    #[serde(default)]
    pub headline: String,

    /// Label text of the control.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub placeholder: String,

    /// Options for choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Choice>>,

    /// Position within the section (ascending).
    #[serde(default)]
    pub order: i64,
}

impl Question {
    /// Create a new question with empty texts.
    pub fn new(id: impl Into<QuestionId>, kind: QuestionType, order: i64) -> Self {
        Self {
            id: id.into(),
            kind,
            headline: String::new(),
            description: String::new(),
            placeholder: String::new(),
            options: None,
            order,
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_options(mut self, options: Vec<Choice>) -> Self {
        self.options = Some(options);
        self
    }

    /// The option list, empty when the question has none.
    pub fn options(&self) -> &[Choice] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Find the option with the given value.
    pub fn choice(&self, value: &str) -> Option<&Choice> {
        self.options().iter().find(|c| c.value == value)
    }

    /// How an answer to this question reads back to the user.
    ///
    /// Choice answers show the option label (the raw value if no option
    /// matches); a non-empty file answer shows [`UPLOADED_FILE_LABEL`].
    pub fn display_value<'a>(&'a self, value: &'a AnswerValue) -> &'a str {
        match &self.kind {
            QuestionType::MultiChoice => self
                .choice(value.as_str())
                .map_or(value.as_str(), |c| c.label.as_str()),
            QuestionType::File if !value.is_empty() => UPLOADED_FILE_LABEL,
            _ => value.as_str(),
        }
    }
}
