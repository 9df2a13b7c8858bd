use stepform::Schema;

/// Question ids of [`conference_application`].
pub mod ids {
    pub const FIRST_NAME: &str = "101";
    pub const COUNTRY: &str = "102";
    pub const NEEDS_VISA: &str = "103";
    pub const RESEARCH: &str = "201";
    pub const MOTIVATION: &str = "202";
    pub const CAREER_STAGE: &str = "203";
    pub const CV: &str = "301";
    pub const DIETARY: &str = "302";
}

/// An application form as the schema service sends it.
///
/// Sections arrive out of order, the two spellings of the long-text tag are
/// both used, and one question has a type no client supports.
pub const CONFERENCE_APPLICATION_JSON: &str = r#"{
    "id": 4,
    "sections": [
        {
            "name": "Attendance",
            "description": "Logistics for the week of the conference.",
            "order": 3,
            "questions": [
                {
                    "id": 302,
                    "type": "short-text",
                    "headline": "Dietary requirements",
                    "description": "Anything the caterers should know",
                    "placeholder": "e.g. vegetarian",
                    "order": 2
                },
                {
                    "id": 301,
                    "type": "file",
                    "headline": "CV",
                    "description": "Upload your CV as a PDF",
                    "placeholder": "",
                    "order": 1
                },
                {
                    "id": 303,
                    "type": "date-range",
                    "headline": "Travel dates",
                    "description": "When will you arrive and leave?",
                    "placeholder": "",
                    "order": 3
                }
            ]
        },
        {
            "name": "About you",
            "description": "Tell us who you are.",
            "order": 1,
            "questions": [
                {
                    "id": 102,
                    "type": "short-text",
                    "headline": "Country of residence",
                    "description": "Country",
                    "placeholder": "Country",
                    "order": 2
                },
                {
                    "id": 101,
                    "type": "short-text",
                    "headline": "First name",
                    "description": "First name",
                    "placeholder": "First name",
                    "order": 1
                },
                {
                    "id": 103,
                    "type": "single-choice",
                    "headline": "Visa",
                    "description": "I need a visa letter",
                    "placeholder": "",
                    "order": 3
                }
            ]
        },
        {
            "name": "Your work",
            "description": "Your research and why you want to attend.",
            "order": 2,
            "questions": [
                {
                    "id": 201,
                    "type": "long-text",
                    "headline": "Research",
                    "description": "Describe your research",
                    "placeholder": "",
                    "order": 1
                },
                {
                    "id": 202,
                    "type": "long_text",
                    "headline": "Motivation",
                    "description": "Why do you want to attend?",
                    "placeholder": "",
                    "order": 2
                },
                {
                    "id": 203,
                    "type": "multi-choice",
                    "headline": "Career stage",
                    "description": "Which best describes you?",
                    "placeholder": "Choose one",
                    "options": [
                        {"value": "undergrad", "label": "Undergraduate student"},
                        {"value": "postgrad", "label": "Postgraduate student"},
                        {"value": "industry", "label": "Industry"}
                    ],
                    "order": 3
                }
            ]
        }
    ]
}"#;

/// Parse [`CONFERENCE_APPLICATION_JSON`].
pub fn conference_application() -> anyhow::Result<Schema> {
    Ok(serde_json::from_str(CONFERENCE_APPLICATION_JSON)?)
}
