use stepform::{Question, QuestionType, Schema, Section};

pub const NAME: &str = "name";
pub const BIO: &str = "bio";

/// Two steps, one question each: a name and a free-text bio.
pub fn profile() -> Schema {
    Schema::new(
        "profile",
        vec![
            Section::new(
                "Who are you?",
                1,
                vec![
                    Question::new(NAME, QuestionType::ShortText, 1)
                        .with_headline("Name")
                        .with_description("Your full name")
                        .with_placeholder("Ada Lovelace"),
                ],
            ),
            Section::new(
                "What do you do?",
                2,
                vec![
                    Question::new(BIO, QuestionType::LongText, 1)
                        .with_headline("Bio")
                        .with_description("A few words about your work"),
                ],
            )
            .with_description("Keep it short."),
        ],
    )
}
