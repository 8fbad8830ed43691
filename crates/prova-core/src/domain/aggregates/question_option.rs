//! Question option leaf entity.
//!
//! One selectable choice of a multiple-choice question. Options have no
//! business rules of their own; correctness lives on the question's
//! [`Answer`](crate::domain::aggregates::Answer).

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::{QuestionId, QuestionOptionId};

/// One selectable choice of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// Unique option identifier
    pub id: QuestionOptionId,
    /// Option text as shown to the student
    pub text: String,
    /// Owning question (weak reference)
    pub question_id: QuestionId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl QuestionOption {
    /// Create a new option with a fresh identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, question_id: QuestionId) -> Self {
        let now = Utc::now();
        Self {
            id: QuestionOptionId::new_random(),
            text: text.into(),
            question_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct an option from persisted data.
    #[must_use]
    pub fn reconstruct(
        id: QuestionOptionId,
        text: impl Into<String>,
        question_id: QuestionId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            question_id,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_option() {
        let question_id = QuestionId::new_random();
        let option = QuestionOption::new("Paris", question_id);

        assert_eq!(option.text, "Paris");
        assert_eq!(option.question_id, question_id);
        assert_eq!(option.created_at, option.updated_at);
    }

    #[test]
    fn test_serde_wire_shape() {
        let option = QuestionOption::new("42", QuestionId::new_random());
        let value = serde_json::to_value(&option).expect("serializes");

        assert_eq!(value["text"], "42");
        assert!(value.get("questionId").is_some());
        assert!(value.get("question_id").is_none());
    }
}
