//! Assessment aggregate root with business rules and invariants.
//!
//! The Assessment aggregate represents a gradeable unit with:
//! - Unique identity (`AssessmentId`)
//! - Title and derived URL slug
//! - Kind (QUIZ, SIMULADO, PROVA_ABERTA) driving question-kind compatibility
//! - Optional configuration (quiz position, passing score, time limit,
//!   randomization flags, lesson attachment)
//!
//! # Invariants
//!
//! 1. Title cannot be empty
//! 2. Slug is always derived from the title (lowercase, hyphen-separated)
//! 3. Passing score, when present, is a 0-100 percentage
//! 4. Every kind recommends exactly one question kind
//! 5. Timestamps are monotonic (`updated_at` >= `created_at`)

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    aggregates::question::QuestionKind,
    identifiers::{AssessmentId, LessonId},
};

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors that can occur during assessment construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Title is missing or blank
    #[error("Assessment title cannot be empty")]
    EmptyTitle,

    /// Kind was never set on the builder
    #[error("Assessment type is required")]
    MissingKind,

    /// Passing score outside the 0-100 range
    #[error("Passing score must be at most 100 (got {0})")]
    PassingScoreOutOfRange(u8),
}

// ============================================================================
// ASSESSMENT KIND
// ============================================================================

/// The kind of an assessment, which decides how it is taken and graded.
///
/// Wire form is SCREAMING_SNAKE_CASE (`QUIZ`, `SIMULADO`, `PROVA_ABERTA`)
/// for serde, `Display` and `FromStr` alike.
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
pub enum AssessmentKind {
    /// Short quiz attached to a lesson
    Quiz,
    /// Timed mock exam
    Simulado,
    /// Open exam graded by hand
    ProvaAberta,
}

impl AssessmentKind {
    /// The question kind this assessment kind is compatible with.
    ///
    /// Quizzes and simulados are auto-graded, so they take multiple-choice
    /// questions; open exams take open questions. Total over all kinds.
    #[must_use]
    pub const fn recommended_question_kind(self) -> QuestionKind {
        match self {
            Self::Quiz | Self::Simulado => QuestionKind::MultipleChoice,
            Self::ProvaAberta => QuestionKind::Open,
        }
    }

    /// Check if this is a quiz.
    #[must_use]
    pub const fn is_quiz(self) -> bool {
        matches!(self, Self::Quiz)
    }

    /// Check if this is a simulado.
    #[must_use]
    pub const fn is_simulado(self) -> bool {
        matches!(self, Self::Simulado)
    }
}

// ============================================================================
// QUIZ POSITION
// ============================================================================

/// Where a quiz sits relative to its lesson.
///
/// Only meaningful for [`AssessmentKind::Quiz`]; carried as data here and
/// enforced by the creation use case.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizPosition {
    /// Taken before the lesson content
    BeforeLesson,
    /// Taken after the lesson content
    AfterLesson,
}

// ============================================================================
// ASSESSMENT AGGREGATE ROOT
// ============================================================================

/// Assessment aggregate root.
///
/// Constructed through [`AssessmentBuilder`], which validates invariants and
/// derives the slug. Serialized with camelCase field names; the kind field
/// travels as `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Unique assessment identifier
    pub id: AssessmentId,
    /// URL-safe slug derived from the title
    pub slug: String,
    /// Assessment title
    pub title: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assessment kind
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    /// Quiz position relative to the lesson (QUIZ only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_position: Option<QuizPosition>,
    /// Minimum percentage to pass (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<u8>,
    /// Time limit in minutes (SIMULADO only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_in_minutes: Option<u32>,
    /// Shuffle question order per attempt
    pub randomize_questions: bool,
    /// Shuffle option order per attempt
    pub randomize_options: bool,
    /// Lesson this assessment is attached to (weak reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<LessonId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start building an assessment.
    #[must_use]
    pub fn builder() -> AssessmentBuilder {
        AssessmentBuilder::new()
    }

    // ========================================================================
    // CALCULATIONS
    // ========================================================================

    /// Derive a URL-safe slug from a title.
    ///
    /// Lowercases, drops every character that is not ASCII alphanumeric,
    /// whitespace or a hyphen, turns whitespace runs into single hyphens and
    /// trims leading/trailing hyphens.
    #[must_use]
    pub fn slug_from_title(title: &str) -> String {
        let filtered: String = title
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();

        filtered.split('-').filter(|part| !part.is_empty()).join("-")
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    /// The question kind this assessment accepts.
    #[must_use]
    pub const fn recommended_question_kind(&self) -> QuestionKind {
        self.kind.recommended_question_kind()
    }

    /// Check if this assessment is a quiz.
    #[must_use]
    pub const fn is_quiz(&self) -> bool {
        self.kind.is_quiz()
    }

    /// Check if this assessment is a simulado.
    #[must_use]
    pub const fn is_simulado(&self) -> bool {
        self.kind.is_simulado()
    }

    // ========================================================================
    // UPDATE METHODS
    // ========================================================================

    /// Refresh the modification timestamp.
    #[must_use]
    pub fn touch(&self) -> Self {
        Self {
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ============================================================================
// ASSESSMENT BUILDER
// ============================================================================

/// Fluent builder for [`Assessment`].
///
/// Required fields: title and kind. Everything else defaults to absent or
/// `false`. Validation happens at [`AssessmentBuilder::build`].
#[derive(Debug, Default)]
pub struct AssessmentBuilder {
    id: Option<AssessmentId>,
    title: Option<String>,
    description: Option<String>,
    kind: Option<AssessmentKind>,
    quiz_position: Option<QuizPosition>,
    passing_score: Option<u8>,
    time_limit_in_minutes: Option<u32>,
    randomize_questions: bool,
    randomize_options: bool,
    lesson_id: Option<LessonId>,
}

impl AssessmentBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier (defaults to a fresh random one).
    #[must_use]
    pub const fn id(mut self, id: AssessmentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title (required).
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the kind (required).
    #[must_use]
    pub const fn kind(mut self, kind: AssessmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the quiz position.
    #[must_use]
    pub const fn quiz_position(mut self, position: QuizPosition) -> Self {
        self.quiz_position = Some(position);
        self
    }

    /// Set the passing score (0-100).
    #[must_use]
    pub const fn passing_score(mut self, score: u8) -> Self {
        self.passing_score = Some(score);
        self
    }

    /// Set the time limit in minutes.
    #[must_use]
    pub const fn time_limit_in_minutes(mut self, minutes: u32) -> Self {
        self.time_limit_in_minutes = Some(minutes);
        self
    }

    /// Set whether questions are shuffled per attempt.
    #[must_use]
    pub const fn randomize_questions(mut self, randomize: bool) -> Self {
        self.randomize_questions = randomize;
        self
    }

    /// Set whether options are shuffled per attempt.
    #[must_use]
    pub const fn randomize_options(mut self, randomize: bool) -> Self {
        self.randomize_options = randomize;
        self
    }

    /// Attach a lesson by id.
    #[must_use]
    pub const fn lesson_id(mut self, lesson_id: LessonId) -> Self {
        self.lesson_id = Some(lesson_id);
        self
    }

    /// Validate and build the assessment.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::EmptyTitle` if the title is absent or blank,
    /// `AssessmentError::MissingKind` if no kind was set, and
    /// `AssessmentError::PassingScoreOutOfRange` if the score exceeds 100.
    pub fn build(self) -> Result<Assessment, AssessmentError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(AssessmentError::EmptyTitle)?;
        let kind = self.kind.ok_or(AssessmentError::MissingKind)?;

        if let Some(score) = self.passing_score {
            if score > 100 {
                return Err(AssessmentError::PassingScoreOutOfRange(score));
            }
        }

        let now = Utc::now();

        Ok(Assessment {
            id: self.id.unwrap_or_else(AssessmentId::new_random),
            slug: Assessment::slug_from_title(&title),
            title,
            description: self.description,
            kind,
            quiz_position: self.quiz_position,
            passing_score: self.passing_score,
            time_limit_in_minutes: self.time_limit_in_minutes,
            randomize_questions: self.randomize_questions,
            randomize_options: self.randomize_options,
            lesson_id: self.lesson_id,
            created_at: now,
            updated_at: now,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn create_test_assessment(kind: AssessmentKind) -> Assessment {
        Assessment::builder()
            .title("JavaScript Fundamentals")
            .kind(kind)
            .build()
            .expect("assessment built")
    }

    #[test]
    fn test_build_assessment() {
        let assessment = create_test_assessment(AssessmentKind::Quiz);

        assert_eq!(assessment.title, "JavaScript Fundamentals");
        assert_eq!(assessment.slug, "javascript-fundamentals");
        assert!(assessment.is_quiz());
        assert!(!assessment.is_simulado());
        assert_eq!(assessment.created_at, assessment.updated_at);
    }

    #[test]
    fn test_build_requires_title() {
        let result = Assessment::builder().kind(AssessmentKind::Quiz).build();
        assert_eq!(result, Err(AssessmentError::EmptyTitle));

        let result = Assessment::builder()
            .title("   ")
            .kind(AssessmentKind::Quiz)
            .build();
        assert_eq!(result, Err(AssessmentError::EmptyTitle));
    }

    #[test]
    fn test_build_requires_kind() {
        let result = Assessment::builder().title("Valid Title").build();
        assert_eq!(result, Err(AssessmentError::MissingKind));
    }

    #[test]
    fn test_build_rejects_score_above_100() {
        let result = Assessment::builder()
            .title("Valid Title")
            .kind(AssessmentKind::Simulado)
            .passing_score(101)
            .build();

        assert_eq!(result, Err(AssessmentError::PassingScoreOutOfRange(101)));
    }

    #[test]
    fn test_build_accepts_boundary_scores() {
        for score in [0, 100] {
            let result = Assessment::builder()
                .title("Valid Title")
                .kind(AssessmentKind::Simulado)
                .passing_score(score)
                .build();
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_slug_from_title_basic() {
        assert_eq!(
            Assessment::slug_from_title("JavaScript Fundamentals"),
            "javascript-fundamentals"
        );
    }

    #[test]
    fn test_slug_strips_punctuation_and_collapses() {
        assert_eq!(
            Assessment::slug_from_title("  Rust: Ownership & Borrowing!  "),
            "rust-ownership-borrowing"
        );
        assert_eq!(Assessment::slug_from_title("a---b"), "a-b");
        assert_eq!(Assessment::slug_from_title("---"), "");
    }

    #[test]
    fn test_slug_drops_non_ascii() {
        // Accented characters are dropped rather than transliterated
        assert_eq!(Assessment::slug_from_title("Revisão Final"), "reviso-final");
    }

    #[test]
    fn test_recommended_question_kind_matrix() {
        assert_eq!(
            AssessmentKind::Quiz.recommended_question_kind(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(
            AssessmentKind::Simulado.recommended_question_kind(),
            QuestionKind::MultipleChoice
        );
        assert_eq!(
            AssessmentKind::ProvaAberta.recommended_question_kind(),
            QuestionKind::Open
        );
    }

    #[test]
    fn test_kind_wire_names() {
        for kind in AssessmentKind::iter() {
            let wire = kind.to_string();
            let parsed: AssessmentKind = wire.parse().expect("round-trips");
            assert_eq!(parsed, kind);
        }
        assert_eq!(AssessmentKind::ProvaAberta.to_string(), "PROVA_ABERTA");
        assert_eq!(QuizPosition::AfterLesson.to_string(), "AFTER_LESSON");
    }

    #[test]
    fn test_touch_refreshes_updated_at() {
        let assessment = create_test_assessment(AssessmentKind::Quiz);
        let touched = assessment.touch();

        assert!(touched.updated_at >= assessment.updated_at);
        assert_eq!(touched.created_at, assessment.created_at);
        assert_eq!(touched.id, assessment.id);
    }

    #[test]
    fn test_serde_wire_shape() {
        let assessment = Assessment::builder()
            .title("Unit Quiz")
            .kind(AssessmentKind::Quiz)
            .quiz_position(QuizPosition::AfterLesson)
            .passing_score(70)
            .build()
            .expect("assessment built");

        let value = serde_json::to_value(&assessment).expect("serializes");

        assert_eq!(value["type"], "QUIZ");
        assert_eq!(value["quizPosition"], "AFTER_LESSON");
        assert_eq!(value["passingScore"], 70);
        assert_eq!(value["randomizeQuestions"], false);
        // Absent options are omitted, not null
        assert!(value.get("description").is_none());
        assert!(value.get("timeLimitInMinutes").is_none());
        assert!(value.get("lessonId").is_none());
    }
}
