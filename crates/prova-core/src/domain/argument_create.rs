//! # Argument Create Operation
//!
//! Creates a topic grouping (argument) that questions can later attach to,
//! optionally linked to an existing assessment.
//!
//! ## Preconditions (P)
//!
//! | ID | Description |
//! |----|-------------|
//! | P1 | Trimmed title is at least 3 characters long |
//! | P2 | Raw title is at most 255 characters long |
//! | P3 | `assessment_id`, when given, is a valid UUID |
//! | P4 | No argument with the exact same title exists |
//! | P5 | The referenced assessment, when given, exists |
//!
//! ## Postconditions (Q)
//!
//! | ID | Description |
//! |----|-------------|
//! | Q1 | Argument is persisted with a fresh random id |
//! | Q2 | Title is stored verbatim, surrounding whitespace included |
//! | Q3 | `created_at` equals `updated_at` |
//! | Q4 | Argument carries the assessment link when one was given |

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::aggregates::Argument;
use crate::domain::identifiers::AssessmentId;
use crate::domain::repository::{ArgumentRepository, AssessmentRepository, RepositoryError};
use crate::domain::validation::FieldViolations;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Minimum accepted title length, counted on the trimmed title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum accepted title length, counted on the raw title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Raw request to create an argument.
///
/// Fields arrive untrusted: the title is any string, the assessment id is an
/// unparsed UUID candidate. [`validate_create_input`] turns them into typed
/// values or a full list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentCreateInput {
    /// Argument title, stored verbatim on success
    pub title: String,
    /// Optional assessment to attach the argument to
    pub assessment_id: Option<String>,
}

/// Successful creation result.
#[derive(Debug, Clone)]
pub struct ArgumentCreateOutput {
    /// The argument as persisted
    pub argument: Argument,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when creating an argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentCreateError {
    /// Shape validation failed; `details` lists every violated rule.
    #[error("{message}")]
    InvalidInput {
        /// Summary line, always `"Validation failed"` for shape errors
        message: String,
        /// One `field: message` entry per violation
        details: Vec<String>,
    },

    /// An argument with the exact same title already exists.
    #[error("Argument with this title already exists")]
    DuplicateArgument,

    /// The referenced assessment does not exist.
    #[error("Assessment not found")]
    AssessmentNotFound,

    /// A repository call failed; the payload carries the backend message.
    #[error("{0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ArgumentCreateError {
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

/// Validate the request shape and parse the optional assessment id.
///
/// Collects every violation instead of stopping at the first, so a caller
/// fixing a form sees all problems at once.
///
/// # Errors
///
/// Returns [`ArgumentCreateError::InvalidInput`] with one detail per
/// violation:
///
/// - `title: Argument title must be at least 3 characters long`
/// - `title: Argument title must be at most 255 characters long`
/// - `assessmentId: Assessment ID must be a valid UUID`
pub fn validate_create_input(
    input: &ArgumentCreateInput,
) -> Result<Option<AssessmentId>, ArgumentCreateError> {
    let mut violations = FieldViolations::new();

    if input.title.trim().chars().count() < MIN_TITLE_LENGTH {
        violations.push(
            "title",
            "Argument title must be at least 3 characters long",
        );
    }
    if input.title.chars().count() > MAX_TITLE_LENGTH {
        violations.push(
            "title",
            "Argument title must be at most 255 characters long",
        );
    }

    let assessment_id = match input.assessment_id.as_deref() {
        Some(raw) => match AssessmentId::parse(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                violations.push("assessmentId", "Assessment ID must be a valid UUID");
                None
            }
        },
        None => None,
    };

    violations
        .finish()
        .map_err(|details| ArgumentCreateError::InvalidInput {
            message: "Validation failed".to_string(),
            details,
        })?;

    Ok(assessment_id)
}

// ============================================================================
// ACTIONS: Argument Creation Service
// ============================================================================

/// Service that creates arguments.
///
/// Generic over the repositories so tests can swap in in-memory or failing
/// implementations.
pub struct ArgumentCreator<A, S>
where
    A: ArgumentRepository,
    S: AssessmentRepository,
{
    arguments: A,
    assessments: S,
}

impl<A, S> ArgumentCreator<A, S>
where
    A: ArgumentRepository,
    S: AssessmentRepository,
{
    /// Create a new service backed by the given repositories.
    pub const fn new(arguments: A, assessments: S) -> Self {
        Self {
            arguments,
            assessments,
        }
    }

    /// Create an argument.
    ///
    /// Steps, in order: validate the shape, reject duplicate titles, check
    /// the assessment link, persist. The title is stored verbatim.
    ///
    /// # Errors
    ///
    /// - [`ArgumentCreateError::InvalidInput`] when the shape is invalid
    /// - [`ArgumentCreateError::DuplicateArgument`] when the exact title is
    ///   already taken
    /// - [`ArgumentCreateError::AssessmentNotFound`] when the referenced
    ///   assessment does not exist
    /// - [`ArgumentCreateError::RepositoryError`] when a repository call
    ///   fails
    pub async fn create(
        &self,
        input: ArgumentCreateInput,
    ) -> Result<ArgumentCreateOutput, ArgumentCreateError> {
        let assessment_id = validate_create_input(&input)?;

        match self.arguments.find_by_title(&input.title).await {
            Ok(_) => {
                tracing::debug!(title = %input.title, "Rejected duplicate argument title");
                return Err(ArgumentCreateError::DuplicateArgument);
            }
            Err(RepositoryError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }

        if let Some(id) = assessment_id {
            match self.assessments.find_by_id(id).await {
                Ok(_) => {}
                Err(RepositoryError::NotFound(_)) => {
                    tracing::debug!(assessment_id = %id, "Argument references unknown assessment");
                    return Err(ArgumentCreateError::AssessmentNotFound);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let argument = Argument::new(input.title, assessment_id);
        self.arguments.create(&argument).await?;
        tracing::info!(argument_id = %argument.id, "Argument created");

        Ok(ArgumentCreateOutput { argument })
    }
}

// ============================================================================
// TESTS
// ============================================================================
