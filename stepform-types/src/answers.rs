use serde::{Deserialize, Deserializer, Serialize};

use crate::{AnswerValue, QuestionId};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("No answer recorded for question {0}")]
    Missing(QuestionId),
}

/// The captured value for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<QuestionId>, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
        }
    }
}

/// Answers collected during a form session, keyed by question id.
///
/// Writing an answer for a question that already has one replaces it, so the
/// store never holds two answers for the same question. Iteration order is the
/// order of the most recent writes and carries no meaning.
///
/// Serializes as the plain answer list the submission service expects.
/// Deserializing a list with repeated question ids keeps the last answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: Vec<Answer>,
}

impl<'de> Deserialize<'de> for AnswerStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Answer>::deserialize(deserializer).map(|answers| answers.into_iter().collect())
    }
}

impl AnswerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            answers: Vec::new(),
        }
    }

    /// Record the answer for a question, replacing any previous one.
    pub fn set(&mut self, question_id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        let answer = Answer::new(question_id, value);
        self.answers.retain(|a| a.question_id != answer.question_id);
        self.answers.push(answer);
    }

    /// Get the current value for a question.
    pub fn get(&self, question_id: &QuestionId) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|a| &a.question_id == question_id)
            .map(|a| &a.value)
    }

    /// Get the current value for a question as a string.
    pub fn text(&self, question_id: &QuestionId) -> Result<&str, AnswerError> {
        self.get(question_id)
            .map(AnswerValue::as_str)
            .ok_or_else(|| AnswerError::Missing(question_id.clone()))
    }

    /// All current answers.
    pub fn all(&self) -> &[Answer] {
        &self.answers
    }

    /// Check if an answer exists for the question.
    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.get(question_id).is_some()
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, question_id: &QuestionId) -> Option<AnswerValue> {
        let index = self
            .answers
            .iter()
            .position(|a| &a.question_id == question_id)?;
        Some(self.answers.remove(index).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl IntoIterator for AnswerStore {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnswerStore {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

impl FromIterator<Answer> for AnswerStore {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut store = Self::new();
        for answer in iter {
            store.set(answer.question_id, answer.value);
        }
        store
    }
}
