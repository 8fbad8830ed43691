//! Answer aggregate root.
//!
//! The single correct answer of a question, with a default explanation and
//! optional localized translations.
//!
//! # Invariants
//!
//! 1. Explanation cannot be empty or whitespace-only
//! 2. At most one answer per question (enforced at the persistence boundary)
//! 3. At most one translation per locale (upsert-by-locale semantics)
//! 4. For multiple-choice questions the correct option id should be present;
//!    it is carried as data here and checked by grading flows

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    aggregates::locale::Locale,
    identifiers::{AnswerId, QuestionId, QuestionOptionId},
};

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors that can occur during answer construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// Explanation is empty or whitespace-only
    #[error("Answer explanation cannot be empty")]
    EmptyExplanation,
}

// ============================================================================
// ANSWER TRANSLATION
// ============================================================================

/// Localized explanation for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerTranslation {
    /// Locale this explanation is written in
    pub locale: Locale,
    /// Explanation text in that locale
    pub explanation: String,
}

impl AnswerTranslation {
    /// Create a translation.
    #[must_use]
    pub fn new(locale: Locale, explanation: impl Into<String>) -> Self {
        Self {
            locale,
            explanation: explanation.into(),
        }
    }
}

// ============================================================================
// ANSWER AGGREGATE ROOT
// ============================================================================

/// Answer aggregate root.
///
/// One per question. Holds the default explanation plus per-locale
/// translations, and for multiple-choice questions the id of the correct
/// option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Unique answer identifier
    pub id: AnswerId,
    /// Question this answer belongs to (weak reference, one-to-one)
    pub question_id: QuestionId,
    /// Correct option for multiple-choice questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<QuestionOptionId>,
    /// Default explanation
    pub explanation: String,
    /// Localized explanations, at most one per locale
    pub translations: Vec<AnswerTranslation>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Answer {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new answer with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::EmptyExplanation` if the explanation is empty
    /// after trim.
    pub fn new(
        question_id: QuestionId,
        correct_option_id: Option<QuestionOptionId>,
        explanation: impl Into<String>,
        translations: Vec<AnswerTranslation>,
    ) -> Result<Self, AnswerError> {
        let explanation = explanation.into();
        if explanation.trim().is_empty() {
            return Err(AnswerError::EmptyExplanation);
        }

        let now = Utc::now();
        Ok(Self {
            id: AnswerId::new_random(),
            question_id,
            correct_option_id,
            explanation,
            translations,
            created_at: now,
            updated_at: now,
        })
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    /// Look up the translation for a locale, if present.
    #[must_use]
    pub fn translation_for(&self, locale: Locale) -> Option<&AnswerTranslation> {
        self.translations.iter().find(|t| t.locale == locale)
    }

    /// The explanation in the given locale, falling back to the default.
    #[must_use]
    pub fn explanation_for(&self, locale: Locale) -> &str {
        self.translation_for(locale)
            .map_or(self.explanation.as_str(), |t| t.explanation.as_str())
    }

    // ========================================================================
    // UPDATE METHODS
    // ========================================================================

    /// Insert or replace the translation for a locale.
    ///
    /// Replaces an existing translation with the same locale, otherwise
    /// appends. Refreshes the modification timestamp either way.
    #[must_use]
    pub fn upsert_translation(&self, translation: AnswerTranslation) -> Self {
        let locale = translation.locale;
        let translations = self
            .translations
            .iter()
            .filter(|t| t.locale != locale)
            .cloned()
            .chain(std::iter::once(translation))
            .collect();

        Self {
            translations,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
