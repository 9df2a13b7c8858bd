//! The review step shown before final submission.

use stepform_types::{AnswerStore, FormSchema, QuestionId};

/// Shown when no question has been answered.
pub const NO_ANSWERS: &str = "No valid questions were answered";

/// One answered question as the applicant reviews it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEntry {
    pub question_id: QuestionId,
    pub headline: String,
    pub value: String,
}

/// Pair every answered question with its headline, in rendering order.
///
/// Answers to questions the schema does not know are skipped.
pub fn entries(schema: &FormSchema, answers: &AnswerStore) -> Vec<ConfirmationEntry> {
    schema
        .questions()
        .filter_map(|question| {
            let value = answers.get(&question.id)?;
            Some(ConfirmationEntry {
                question_id: question.id.clone(),
                headline: question.headline.clone(),
                value: question.display_value(value).to_string(),
            })
        })
        .collect()
}

/// Plain-text rendering of the review, one block per answer.
pub fn summary(entries: &[ConfirmationEntry]) -> String {
    if entries.is_empty() {
        return NO_ANSWERS.to_string();
    }

    entries
        .iter()
        .map(|entry| format!("{}\n  {}\n", entry.headline, entry.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use stepform_types::{Choice, Question, QuestionType, Schema, Section};

    use super::*;

    fn schema() -> FormSchema {
        FormSchema::new(Schema::new(
            "1",
            vec![
                Section::new(
                    "Travel",
                    2,
                    vec![
                        Question::new("size", QuestionType::MultiChoice, 1)
                            .with_headline("T-shirt")
                            .with_options(vec![Choice::new("m", "Medium")]),
                        Question::new("cv", QuestionType::File, 2).with_headline("CV"),
                    ],
                ),
                Section::new(
                    "About",
                    1,
                    vec![Question::new("name", QuestionType::ShortText, 1).with_headline("Name")],
                ),
            ],
        ))
    }

    #[test]
    fn entries_follow_schema_order() {
        let mut answers = AnswerStore::new();
        answers.set("cv", "cv.pdf");
        answers.set("size", "m");
        answers.set("name", "Ada");

        let entries = entries(&schema(), &answers);
        let pairs: Vec<_> = entries
            .iter()
            .map(|e| (e.headline.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Name", "Ada"), ("T-shirt", "Medium"), ("CV", "Uploaded File")]
        );
    }

    #[test]
    fn unknown_questions_and_unanswered_ones_are_skipped() {
        let mut answers = AnswerStore::new();
        answers.set("ghost", "boo");
        answers.set("name", "Ada");

        let entries = entries(&schema(), &answers);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question_id.as_str(), "name");
    }

    #[test]
    fn summary_text() {
        let mut answers = AnswerStore::new();
        answers.set("name", "Ada");
        let text = summary(&entries(&schema(), &answers));
        assert_eq!(text, "Name\n  Ada\n");
    }

    #[test]
    fn summary_lists_every_entry() {
        let mut answers = AnswerStore::new();
        answers.set("name", "Ada");
        answers.set("cv", "cv.pdf");
        let text = summary(&entries(&schema(), &answers));
        assert_eq!(text, "Name\n  Ada\nCV\n  Uploaded File\n");
    }

    #[test]
    fn empty_summary() {
        assert_eq!(summary(&[]), NO_ANSWERS);
    }
}
