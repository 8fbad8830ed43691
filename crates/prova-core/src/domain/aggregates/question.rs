//! Question aggregate root.
//!
//! A Question is a single gradeable prompt inside an assessment. Multiple
//! choice questions carry options and a correct answer; open questions are
//! graded by hand.
//!
//! # Invariants
//!
//! 1. Text cannot be empty or whitespace-only
//! 2. Text is unique per assessment after trim + lowercase normalization
//!    (enforced at the use-case boundary via [`Question::normalized_text`])
//! 3. Every question references exactly one assessment; the argument link is
//!    optional
//! 4. Timestamps are monotonic (`updated_at` >= `created_at`)

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::identifiers::{ArgumentId, AssessmentId, QuestionId};

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors that can occur during question construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    /// Text is empty or whitespace-only
    #[error("Question text cannot be empty")]
    EmptyText,
}

// ============================================================================
// QUESTION KIND
// ============================================================================

/// The kind of a question.
///
/// Wire form is SCREAMING_SNAKE_CASE (`MULTIPLE_CHOICE`, `OPEN`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    /// Auto-graded, answered by picking an option
    MultipleChoice,
    /// Free-text, graded by hand
    Open,
}

// ============================================================================
// QUESTION AGGREGATE ROOT
// ============================================================================

/// Question aggregate root.
///
/// Serialized with camelCase field names; the kind field travels as `type`
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question identifier
    pub id: QuestionId,
    /// Prompt text
    pub text: String,
    /// Question kind
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Owning assessment (weak reference, required)
    pub assessment_id: AssessmentId,
    /// Grouping argument, if any (weak reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument_id: Option<ArgumentId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Question {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new question with a fresh identifier.
    ///
    /// Length bounds are checked at the use-case boundary; the constructor
    /// re-validates content so whitespace-only text that slips past a raw
    /// length check is still rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is empty after trim.
    pub fn new(
        text: impl Into<String>,
        kind: QuestionKind,
        assessment_id: AssessmentId,
        argument_id: Option<ArgumentId>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let now = Utc::now();
        Ok(Self {
            id: QuestionId::new_random(),
            text,
            kind,
            assessment_id,
            argument_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct a question from persisted data.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is empty after trim.
    pub fn reconstruct(
        id: QuestionId,
        text: impl Into<String>,
        kind: QuestionKind,
        assessment_id: AssessmentId,
        argument_id: Option<ArgumentId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        Ok(Self {
            id,
            text,
            kind,
            assessment_id,
            argument_id,
            created_at,
            updated_at,
        })
    }

    // ========================================================================
    // CALCULATIONS
    // ========================================================================

    /// The normalized form of the text used for duplicate detection:
    /// trimmed, then lowercased.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        Self::normalize_text(&self.text)
    }

    /// Normalize arbitrary prompt text the same way stored questions are.
    #[must_use]
    pub fn normalize_text(text: &str) -> String {
        text.trim().to_lowercase()
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    /// Check if this is a multiple-choice question.
    #[must_use]
    pub const fn is_multiple_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice)
    }

    /// Check if this is an open question.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.kind, QuestionKind::Open)
    }
}

// ============================================================================
// TESTS
// ============================================================================
