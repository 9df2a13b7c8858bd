use serde::{Deserialize, Serialize};

use crate::{Question, QuestionId, SchemaId};

/// A named group of questions shown as one step of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Position of the section within the form (ascending).
    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    /// Create a new section with the given questions.
    pub fn new(name: impl Into<String>, order: i64, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            order,
            questions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// The form definition exactly as the schema service sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: SchemaId,

    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Schema {
    pub fn new(id: impl Into<SchemaId>, sections: Vec<Section>) -> Self {
        Self {
            id: id.into(),
            sections,
        }
    }
}

/// A loaded schema, arranged for rendering.
///
/// Sections are sorted by `order`, and so are the questions within each
/// section. Both sorts are stable: entries sharing an `order` keep the order
/// the server sent them in. The schema cannot be changed once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    id: SchemaId,
    sections: Vec<Section>,
}

impl FormSchema {
    /// Arrange a schema for rendering.
    pub fn new(schema: Schema) -> Self {
        let Schema { id, mut sections } = schema;
        sections.sort_by_key(|s| s.order);
        for section in &mut sections {
            section.questions.sort_by_key(|q| q.order);
        }
        Self { id, sections }
    }

    /// Load the schema an upstream fetch produced, if it produced one.
    pub fn load(schema: Option<Schema>) -> Option<Self> {
        schema.map(Self::new)
    }

    pub fn id(&self) -> &SchemaId {
        &self.id
    }

    /// Sections in rendering order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get the section at a zero-based step index.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// All questions across sections, in rendering order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Look up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions().find(|q| &q.id == id)
    }

    /// Check if the schema has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl From<Schema> for FormSchema {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    fn question(id: &str, order: i64) -> Question {
        Question::new(id, QuestionType::ShortText, order)
    }

    #[test]
    fn sections_sorted_by_order() {
        let schema = FormSchema::new(Schema::new(
            "1",
            vec![Section::new("Second", 2, vec![]), Section::new("First", 1, vec![])],
        ));

        let orders: Vec<_> = schema.sections().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(schema.section(0).unwrap().name, "First");
    }

    #[test]
    fn ties_keep_source_order() {
        let schema = FormSchema::new(Schema::new(
            "1",
            vec![
                Section::new("b", 1, vec![]),
                Section::new("a", 1, vec![]),
                Section::new("c", 0, vec![]),
            ],
        ));

        let names: Vec<_> = schema.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn question_ties_keep_source_order() {
        let schema = FormSchema::new(Schema::new(
            "1",
            vec![Section::new(
                "Only",
                1,
                vec![question("second", 2), question("first-a", 1), question("first-b", 1)],
            )],
        ));

        let ids: Vec<_> = schema.questions().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["first-a", "first-b", "second"]);
    }

    #[test]
    fn questions_sorted_within_sections_and_flattened() {
        let schema = FormSchema::new(Schema::new(
            "1",
            vec![
                Section::new("Later", 5, vec![question("z", 2), question("y", 1)]),
                Section::new("Earlier", 1, vec![question("b", 9), question("a", 3)]),
            ],
        ));

        let ids: Vec<_> = schema.questions().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "y", "z"]);
    }

    #[test]
    fn question_lookup() {
        let schema = FormSchema::new(Schema::new(
            "1",
            vec![Section::new("Only", 1, vec![question("q1", 1)])],
        ));

        assert!(schema.question(&QuestionId::new("q1")).is_some());
        assert!(schema.question(&QuestionId::new("q2")).is_none());
    }

    #[test]
    fn absent_schema_loads_as_none() {
        assert!(FormSchema::load(None).is_none());
    }

    #[test]
    fn deserializes_wire_schema() {
        let schema: Schema = serde_json::from_str(
            r#"{
                "id": 4,
                "sections": [
                    {"name": "About", "description": "", "order": 1, "questions": []}
                ]
            }"#,
        )
        .unwrap();

        let schema = FormSchema::new(schema);
        assert_eq!(schema.id().as_str(), "4");
        assert_eq!(schema.num_sections(), 1);
    }
}
