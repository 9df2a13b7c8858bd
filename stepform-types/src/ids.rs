use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix of the composite identifier a rendered field carries.
pub const FIELD_ID_PREFIX: &str = "question_";

/// Identifier as it appears on the wire: the server sends integers for some
/// records and strings for others.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Int(i64),
    Text(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(i) => i.to_string(),
            WireId::Text(s) => s,
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from its textual form.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                WireId::deserialize(deserializer).map(|id| Self(id.into()))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<i64> for $name {
            fn from(i: i64) -> Self {
                Self::new(i.to_string())
            }
        }
    };
}

opaque_id! {
    /// Identifier of a question. Treated as an opaque token: it is compared
    /// and hashed, never parsed.
    QuestionId
}

opaque_id! {
    /// Identifier of a form schema, echoed back on submission.
    SchemaId
}

opaque_id! {
    /// Identifier the submission service assigns to a stored response.
    ResponseId
}

/// Composite identifier of a rendered field, `"question_" + id`.
///
/// Input events arrive tagged with this identifier. The question id is
/// recovered by stripping the prefix exactly once; whatever follows is the
/// opaque id, even if it contains underscores itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(String);

impl FieldId {
    /// Build the field identifier for a question.
    pub fn for_question(id: &QuestionId) -> Self {
        Self(format!("{FIELD_ID_PREFIX}{id}"))
    }

    /// Wrap a raw identifier received from an input event.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The question this field captures, if the identifier is well formed.
    pub fn question_id(&self) -> Option<QuestionId> {
        self.0
            .strip_prefix(FIELD_ID_PREFIX)
            .filter(|rest| !rest.is_empty())
            .map(QuestionId::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&QuestionId> for FieldId {
    fn from(id: &QuestionId) -> Self {
        Self::for_question(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_round_trips_question_id() {
        let id = QuestionId::new("42");
        let field = FieldId::for_question(&id);
        assert_eq!(field.as_str(), "question_42");
        assert_eq!(field.question_id(), Some(id));
    }

    #[test]
    fn underscores_in_question_id_survive() {
        let id = QuestionId::new("travel_grant_amount");
        let field = FieldId::for_question(&id);
        assert_eq!(field.question_id().unwrap().as_str(), "travel_grant_amount");
    }

    #[test]
    fn foreign_field_ids_have_no_question() {
        assert!(FieldId::new("answer_3").question_id().is_none());
        assert!(FieldId::new("question_").question_id().is_none());
    }

    #[test]
    fn deserializes_integer_and_string_ids() {
        let ids: Vec<QuestionId> = serde_json::from_str(r#"[7, "x-1"]"#).unwrap();
        assert_eq!(ids, vec![QuestionId::new("7"), QuestionId::new("x-1")]);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&SchemaId::from(3_i64)).unwrap();
        assert_eq!(json, r#""3""#);
    }

    #[test]
    fn display() {
        let id = ResponseId::new("r-9");
        assert_eq!(format!("{}", id), "r-9");
    }
}
