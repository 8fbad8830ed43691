//! # Assessment Creation
//!
//! Creates an assessment from raw input: shape and cross-field validation,
//! lesson existence check, exact-title duplicate check, then construction
//! through [`AssessmentBuilder`] (which derives the slug) and persistence.
//!
//! ## Pure Calculations (P)
//!
//! | Function | Input | Output | Purity Contract |
//! |----------|-------|--------|-----------------|
//! | `validate_create_input` | `&AssessmentCreateInput` | `Result<ValidatedAssessmentCreate, AssessmentCreateError>` | Deterministic; collects every violation |
//!
//! ## Actions (Q)
//!
//! | Function | Effect | Error Conditions |
//! |----------|--------|------------------|
//! | `AssessmentCreator::create` | Reads lessons and assessments, writes one assessment | `InvalidInput`, `LessonNotFound`, `DuplicateAssessment`, `RepositoryError` |
//!
//! Cross-field rules tie the optional fields to the assessment kind: QUIZ
//! requires a quiz position and forbids a time limit, SIMULADO is the only
//! kind that takes a time limit, and both graded kinds (QUIZ, SIMULADO)
//! require a passing score. Cross-field rules are only evaluated once the
//! kind itself parsed.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::aggregates::{Assessment, AssessmentBuilder, AssessmentKind, QuizPosition};
use crate::domain::identifiers::LessonId;
use crate::domain::repository::{AssessmentRepository, LessonRepository, RepositoryError};
use crate::domain::validation::FieldViolations;

/// Minimum title length, counted on the trimmed title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum title length, counted on the raw title.
pub const MAX_TITLE_LENGTH: usize = 255;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Raw creation request, fields as the caller sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentCreateInput {
    /// Proposed title, stored verbatim
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Unparsed kind (`QUIZ`, `SIMULADO` or `PROVA_ABERTA`)
    pub kind: String,
    /// Unparsed quiz position (`BEFORE_LESSON` or `AFTER_LESSON`)
    pub quiz_position: Option<String>,
    /// Passing score, percent; range checked here
    pub passing_score: Option<i32>,
    /// Time limit in minutes, SIMULADO only
    pub time_limit_in_minutes: Option<u32>,
    /// Shuffle questions per attempt; defaults to off
    pub randomize_questions: Option<bool>,
    /// Shuffle options per attempt; defaults to off
    pub randomize_options: Option<bool>,
    /// Unparsed lesson id to attach to
    pub lesson_id: Option<String>,
}

/// Parsed view of a creation request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedAssessmentCreate {
    /// Parsed assessment kind
    pub kind: AssessmentKind,
    /// Parsed quiz position, present exactly for QUIZ
    pub quiz_position: Option<QuizPosition>,
    /// Range-checked passing score
    pub passing_score: Option<u8>,
    /// Parsed lesson id, if one was sent
    pub lesson_id: Option<LessonId>,
}

/// Successful creation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentCreateOutput {
    /// The assessment as persisted, slug included
    pub assessment: Assessment,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when creating an assessment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentCreateError {
    /// Validation failed; `details` lists every violated rule.
    #[error("{message}")]
    InvalidInput {
        /// Summary line
        message: String,
        /// One `field: message` entry per violation
        details: Vec<String>,
    },

    /// Another assessment already carries this exact title.
    #[error("Assessment with this title already exists")]
    DuplicateAssessment,

    /// The referenced lesson does not exist.
    #[error("Lesson not found")]
    LessonNotFound,

    /// The storage backend failed.
    #[error("{0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for AssessmentCreateError {
    fn from(err: RepositoryError) -> Self {
        let message = err.message();
        if message.is_empty() {
            Self::RepositoryError("An unexpected error occurred".to_string())
        } else {
            Self::RepositoryError(message.to_string())
        }
    }
}

// ============================================================================
// CALCULATIONS: Pure Validation Functions
// ============================================================================

/// Validate the raw input, field rules first, cross-field rules last.
///
/// # Errors
///
/// Returns [`AssessmentCreateError::InvalidInput`] carrying every violation
/// found, in field order followed by cross-field order.
pub fn validate_create_input(
    input: &AssessmentCreateInput,
) -> Result<ValidatedAssessmentCreate, AssessmentCreateError> {
    let mut violations = FieldViolations::new();

    if input.title.trim().chars().count() < MIN_TITLE_LENGTH {
        violations.push(
            "title",
            "Assessment title must be at least 3 characters long",
        );
    }
    if input.title.chars().count() > MAX_TITLE_LENGTH {
        violations.push("title", "Assessment title must be at most 255 characters long");
    }

    let kind = input.kind.parse::<AssessmentKind>();
    if kind.is_err() {
        violations.push("type", "Type must be QUIZ, SIMULADO or PROVA_ABERTA");
    }

    let quiz_position = input
        .quiz_position
        .as_deref()
        .map(str::parse::<QuizPosition>)
        .transpose();
    if quiz_position.is_err() {
        violations.push(
            "quizPosition",
            "Quiz position must be BEFORE_LESSON or AFTER_LESSON",
        );
    }

    let passing_score = match input.passing_score {
        Some(score) if score < 0 => {
            violations.push("passingScore", "Passing score must be at least 0");
            Err(())
        }
        Some(score) if score > 100 => {
            violations.push("passingScore", "Passing score must be at most 100");
            Err(())
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        Some(score) => Ok(Some(score as u8)),
        None => Ok(None),
    };

    let lesson_id = input
        .lesson_id
        .as_deref()
        .map(LessonId::parse)
        .transpose();
    if lesson_id.is_err() {
        violations.push("lessonId", "Lesson ID must be a valid UUID");
    }

    // Cross-field rules hinge on the kind; skip them while it is unknown.
    if let Ok(kind) = kind {
        if kind == AssessmentKind::Quiz && input.quiz_position.is_none() {
            violations.push(
                "quizPosition",
                "Quiz position is required for QUIZ type assessments",
            );
        }
        if kind != AssessmentKind::Quiz && input.quiz_position.is_some() {
            violations.push(
                "quizPosition",
                "Quiz position is only allowed for QUIZ assessments",
            );
        }
        if kind != AssessmentKind::Simulado && input.time_limit_in_minutes.is_some() {
            violations.push(
                "timeLimitInMinutes",
                "Time limit can only be set for SIMULADO type assessments",
            );
        }
        if matches!(kind, AssessmentKind::Quiz | AssessmentKind::Simulado)
            && input.passing_score.is_none()
        {
            violations.push(
                "passingScore",
                "Passing score is required for QUIZ and SIMULADO assessments",
            );
        }
    }

    let invalid = |details: Vec<String>| AssessmentCreateError::InvalidInput {
        message: "Validation failed".to_string(),
        details,
    };

    violations.finish().map_err(invalid)?;

    // Every failed parse was recorded as a violation above.
    let (Ok(kind), Ok(quiz_position), Ok(passing_score), Ok(lesson_id)) =
        (kind, quiz_position, passing_score, lesson_id)
    else {
        return Err(invalid(Vec::new()));
    };

    Ok(ValidatedAssessmentCreate {
        kind,
        quiz_position,
        passing_score,
        lesson_id,
    })
}

// ============================================================================
// ACTIONS: Assessment Creation Service
// ============================================================================

/// Service that creates assessments.
pub struct AssessmentCreator<S, L>
where
    S: AssessmentRepository,
    L: LessonRepository,
{
    assessments: S,
    lessons: L,
}

impl<S, L> AssessmentCreator<S, L>
where
    S: AssessmentRepository,
    L: LessonRepository,
{
    /// Create a new service backed by the given repositories.
    pub const fn new(assessments: S, lessons: L) -> Self {
        Self {
            assessments,
            lessons,
        }
    }

    /// Create an assessment.
    ///
    /// # Errors
    ///
    /// - [`AssessmentCreateError::InvalidInput`] when a field or cross-field
    ///   rule is violated
    /// - [`AssessmentCreateError::LessonNotFound`] when `lesson_id` points
    ///   nowhere
    /// - [`AssessmentCreateError::DuplicateAssessment`] when the exact title
    ///   is already taken
    /// - [`AssessmentCreateError::RepositoryError`] when storage fails
    pub async fn create(
        &self,
        input: AssessmentCreateInput,
    ) -> Result<AssessmentCreateOutput, AssessmentCreateError> {
        let validated = validate_create_input(&input)?;

        if let Some(lesson_id) = validated.lesson_id {
            match self.lessons.find_by_id(lesson_id).await {
                Ok(_) => {}
                Err(RepositoryError::NotFound(_)) => {
                    tracing::debug!(
                        lesson_id = %lesson_id,
                        "Assessment creation rejected: lesson not found"
                    );
                    return Err(AssessmentCreateError::LessonNotFound);
                }
                Err(err) => return Err(err.into()),
            }
        }

        match self.assessments.find_by_title(&input.title).await {
            Ok(_) => {
                tracing::debug!(
                    title = %input.title,
                    "Assessment creation rejected: duplicate title"
                );
                return Err(AssessmentCreateError::DuplicateAssessment);
            }
            Err(RepositoryError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }

        let mut builder = AssessmentBuilder::default()
            .title(input.title.clone())
            .kind(validated.kind)
            .randomize_questions(input.randomize_questions.unwrap_or(false))
            .randomize_options(input.randomize_options.unwrap_or(false));
        if let Some(description) = input.description.clone() {
            builder = builder.description(description);
        }
        if let Some(position) = validated.quiz_position {
            builder = builder.quiz_position(position);
        }
        if let Some(score) = validated.passing_score {
            builder = builder.passing_score(score);
        }
        if let Some(minutes) = input.time_limit_in_minutes {
            builder = builder.time_limit_in_minutes(minutes);
        }
        if let Some(lesson_id) = validated.lesson_id {
            builder = builder.lesson_id(lesson_id);
        }

        let assessment = builder
            .build()
            .map_err(|err| AssessmentCreateError::InvalidInput {
                message: "Assessment creation failed".to_string(),
                details: vec![err.to_string()],
            })?;

        self.assessments.create(&assessment).await?;
        tracing::info!(
            assessment_id = %assessment.id,
            slug = %assessment.slug,
            "Assessment created"
        );

        Ok(AssessmentCreateOutput { assessment })
    }
}

// ============================================================================
// TESTS
// ============================================================================
