//! # Question Create Operation
//!
//! Adds a question to an assessment, optionally attached to one of its
//! arguments. The question kind must match what the assessment kind
//! recommends, and near-duplicate texts inside the same assessment are
//! rejected.
//!
//! ## Preconditions (P)
//!
//! | ID | Description |
//! |----|-------------|
//! | P1 | Trimmed text is at least 10 characters long |
//! | P2 | Raw text is at most 1000 characters long |
//! | P3 | Kind is `MULTIPLE_CHOICE` or `OPEN` |
//! | P4 | Assessment and (when given) argument ids are valid UUIDs |
//! | P5 | The assessment exists; the argument, when given, exists |
//! | P6 | Kind equals the assessment's recommended question kind |
//! | P7 | No question of the assessment has the same normalized text |
//!
//! ## Postconditions (Q)
//!
//! | ID | Description |
//! |----|-------------|
//! | Q1 | Question is persisted with a fresh random id |
//! | Q2 | Text is stored verbatim |
//! | Q3 | Question carries the assessment link and, when given, the argument link |
//!
//! Normalization for the duplicate scan is trim + lowercase, so texts that
//! differ only in case or surrounding whitespace collide.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::aggregates::{AssessmentKind, Question, QuestionKind};
use crate::domain::identifiers::{ArgumentId, AssessmentId};
use crate::domain::repository::{
    ArgumentRepository, AssessmentRepository, QuestionRepository, RepositoryError,
};
use crate::domain::validation::FieldViolations;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Minimum accepted text length, counted on the trimmed text.
pub const MIN_TEXT_LENGTH: usize = 10;

/// Maximum accepted text length, counted on the raw text.
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Raw request to create a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCreateInput {
    /// Question text, stored verbatim on success
    pub text: String,
    /// Question kind as its wire name (`MULTIPLE_CHOICE` or `OPEN`)
    pub kind: String,
    /// Unparsed assessment id
    pub assessment_id: String,
    /// Optional argument to attach the question to
    pub argument_id: Option<String>,
}

/// Successful creation result.
#[derive(Debug, Clone)]
pub struct QuestionCreateOutput {
    /// The question as persisted
    pub question: Question,
}

/// Typed view of a [`QuestionCreateInput`] that passed shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedQuestionCreate {
    /// Parsed question kind
    pub kind: QuestionKind,
    /// Parsed assessment id
    pub assessment_id: AssessmentId,
    /// Parsed argument id, when one was given
    pub argument_id: Option<ArgumentId>,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when creating a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionCreateError {
    /// Validation failed; `details` lists every violated rule.
    #[error("{message}")]
    InvalidInput {
        /// Summary line
        message: String,
        /// One entry per violation
        details: Vec<String>,
    },

    /// The referenced assessment does not exist.
    #[error("Assessment not found")]
    AssessmentNotFound,

    /// The referenced argument does not exist.
    #[error("Argument not found")]
    ArgumentNotFound,

    /// The question kind does not match what the assessment kind requires.
    #[error("{assessment_kind} assessments require {recommended_kind} questions")]
    QuestionTypeMismatch {
        /// Kind of the target assessment
        assessment_kind: AssessmentKind,
        /// Question kind that assessment kind requires
        recommended_kind: QuestionKind,
    },

    /// A question with the same normalized text already exists in the
    /// assessment.
    #[error("Question with similar text already exists in this assessment")]
    DuplicateQuestion,

    /// A repository call failed; the payload carries the backend message.
    #[error("{0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for QuestionCreateError {
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

/// Validate the request shape and parse kind and ids.
///
/// # Errors
///
/// Returns [`QuestionCreateError::InvalidInput`] with one detail per
/// violation:
///
/// - `text: Question text must be at least 10 characters long`
/// - `text: Question text must be at most 1000 characters long`
/// - `type: Type must be MULTIPLE_CHOICE or OPEN`
/// - `assessmentId: Assessment ID must be a valid UUID`
/// - `argumentId: Argument ID must be a valid UUID`
pub fn validate_create_input(
    input: &QuestionCreateInput,
) -> Result<ValidatedQuestionCreate, QuestionCreateError> {
    let invalid = |details: Vec<String>| QuestionCreateError::InvalidInput {
        message: "Validation failed".to_string(),
        details,
    };

    let mut violations = FieldViolations::new();

    if input.text.trim().chars().count() < MIN_TEXT_LENGTH {
        violations.push("text", "Question text must be at least 10 characters long");
    }
    if input.text.chars().count() > MAX_TEXT_LENGTH {
        violations.push("text", "Question text must be at most 1000 characters long");
    }

    let kind = input.kind.parse::<QuestionKind>();
    if kind.is_err() {
        violations.push("type", "Type must be MULTIPLE_CHOICE or OPEN");
    }

    let assessment_id = AssessmentId::parse(&input.assessment_id);
    if assessment_id.is_err() {
        violations.push("assessmentId", "Assessment ID must be a valid UUID");
    }

    let argument_id = input
        .argument_id
        .as_deref()
        .map(ArgumentId::parse)
        .transpose();
    if argument_id.is_err() {
        violations.push("argumentId", "Argument ID must be a valid UUID");
    }

    violations.finish().map_err(invalid)?;

    let (Ok(kind), Ok(assessment_id), Ok(argument_id)) = (kind, assessment_id, argument_id)
    else {
        // Every failed parse was recorded as a violation above.
        return Err(invalid(Vec::new()));
    };

    Ok(ValidatedQuestionCreate {
        kind,
        assessment_id,
        argument_id,
    })
}

// ============================================================================
// ACTIONS: Question Creation Service
// ============================================================================

/// Service that creates questions.
pub struct QuestionCreator<Q, S, A>
where
    Q: QuestionRepository,
    S: AssessmentRepository,
    A: ArgumentRepository,
{
    questions: Q,
    assessments: S,
    arguments: A,
}

impl<Q, S, A> QuestionCreator<Q, S, A>
where
    Q: QuestionRepository,
    S: AssessmentRepository,
    A: ArgumentRepository,
{
    /// Create a new service backed by the given repositories.
    pub const fn new(questions: Q, assessments: S, arguments: A) -> Self {
        Self {
            questions,
            assessments,
            arguments,
        }
    }

    /// Create a question.
    ///
    /// Steps, in order: validate the shape, check the assessment and the
    /// optional argument, enforce the kind rule, scan for near-duplicate
    /// text, construct and persist.
    ///
    /// # Errors
    ///
    /// - [`QuestionCreateError::InvalidInput`] when the shape is invalid, or
    ///   when entity construction rejects the content (message
    ///   `"Question creation failed"`)
    /// - [`QuestionCreateError::AssessmentNotFound`] /
    ///   [`QuestionCreateError::ArgumentNotFound`] when a referenced entity
    ///   does not exist
    /// - [`QuestionCreateError::QuestionTypeMismatch`] when the kind does
    ///   not fit the assessment
    /// - [`QuestionCreateError::DuplicateQuestion`] when the normalized text
    ///   is already taken inside the assessment
    /// - [`QuestionCreateError::RepositoryError`] when a repository call
    ///   fails
    pub async fn create(
        &self,
        input: QuestionCreateInput,
    ) -> Result<QuestionCreateOutput, QuestionCreateError> {
        let validated = validate_create_input(&input)?;

        let assessment = match self.assessments.find_by_id(validated.assessment_id).await {
            Ok(assessment) => assessment,
            Err(RepositoryError::NotFound(_)) => {
                return Err(QuestionCreateError::AssessmentNotFound);
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(argument_id) = validated.argument_id {
            match self.arguments.find_by_id(argument_id).await {
                Ok(_) => {}
                Err(RepositoryError::NotFound(_)) => {
                    return Err(QuestionCreateError::ArgumentNotFound);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let recommended = assessment.kind.recommended_question_kind();
        if validated.kind != recommended {
            tracing::debug!(
                assessment_kind = %assessment.kind,
                question_kind = %validated.kind,
                "Rejected question kind that does not fit the assessment"
            );
            return Err(QuestionCreateError::QuestionTypeMismatch {
                assessment_kind: assessment.kind,
                recommended_kind: recommended,
            });
        }

        let existing = self
            .questions
            .find_by_assessment_id(validated.assessment_id)
            .await?;
        let normalized = Question::normalize_text(&input.text);
        if existing.iter().any(|q| q.normalized_text() == normalized) {
            tracing::debug!(
                assessment_id = %validated.assessment_id,
                "Rejected near-duplicate question text"
            );
            return Err(QuestionCreateError::DuplicateQuestion);
        }

        let question = Question::new(
            input.text,
            validated.kind,
            validated.assessment_id,
            validated.argument_id,
        )
        .map_err(|err| QuestionCreateError::InvalidInput {
            message: "Question creation failed".to_string(),
            details: vec![err.to_string()],
        })?;
        self.questions.create(&question).await?;
        tracing::info!(
            question_id = %question.id,
            assessment_id = %question.assessment_id,
            "Question created"
        );

        Ok(QuestionCreateOutput { question })
    }
}

// ============================================================================
// TESTS
// ============================================================================
