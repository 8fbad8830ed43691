//! # Argument Update Operation
//!
//! Renames an existing argument. The title is optional: an update without
//! one only refreshes the `updated_at` timestamp.
//!
//! ## Preconditions (P)
//!
//! | ID | Description |
//! |----|-------------|
//! | P1 | `id` is a valid UUID |
//! | P2 | Raw title, when given, is 3 to 255 characters long |
//! | P3 | Title, when given, is not whitespace-only |
//! | P4 | The argument exists |
//! | P5 | No *other* argument owns the new title |
//!
//! ## Postconditions (Q)
//!
//! | ID | Description |
//! |----|-------------|
//! | Q1 | Stored title is the trimmed new title |
//! | Q2 | `updated_at` is refreshed, `created_at` is untouched |
//! | Q3 | Updating to the argument's own current title succeeds |
//!
//! Shape validation accepts a padded title whose trimmed form is shorter
//! than the minimum; only the trimmed-to-empty case is rejected after the
//! fetch. Schema validity and business validity are checked at different
//! stages, in that order.

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
use crate::domain::identifiers::ArgumentId;
use crate::domain::repository::{ArgumentRepository, RepositoryError};
use crate::domain::validation::FieldViolations;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Minimum accepted title length, counted on the raw title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum accepted title length, counted on the raw title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Raw request to update an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentUpdateInput {
    /// Unparsed argument id
    pub id: String,
    /// New title; `None` leaves the title unchanged
    pub title: Option<String>,
}

/// Successful update result.
#[derive(Debug, Clone)]
pub struct ArgumentUpdateOutput {
    /// The argument as persisted after the update
    pub argument: Argument,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when updating an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentUpdateError {
    /// Validation failed; `details` lists every violated rule.
    InvalidInput {
        /// Summary line
        message: String,
        /// One `field: message` entry per violation
        details: Vec<String>,
    },

    /// No argument with the given id exists.
    ArgumentNotFound,

    /// Another argument already owns the new title.
    DuplicateArgument,

    /// A repository call failed; the payload carries the backend message.
    RepositoryError(String),
}

impl std::fmt::Display for ArgumentUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message, .. } | Self::RepositoryError(message) => {
                write!(f, "{message}")
            }
            Self::ArgumentNotFound => write!(f, "Argument not found"),
            Self::DuplicateArgument => {
                write!(f, "Argument with this title already exists")
            }
        }
    }
}

impl std::error::Error for ArgumentUpdateError {}

impl From<RepositoryError> for ArgumentUpdateError {
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

/// Validate the request shape and parse the argument id.
///
/// # Errors
///
/// Returns [`ArgumentUpdateError::InvalidInput`] with one detail per
/// violation:
///
/// - `id: ID must be a valid UUID`
/// - `title: Title must be at least 3 characters long`
/// - `title: Title must be at most 255 characters long`
pub fn validate_update_input(
    input: &ArgumentUpdateInput,
) -> Result<ArgumentId, ArgumentUpdateError> {
    let invalid = |details: Vec<String>| ArgumentUpdateError::InvalidInput {
        message: "Validation failed".to_string(),
        details,
    };

    let mut violations = FieldViolations::new();

    let id = ArgumentId::parse(&input.id);
    if id.is_err() {
        violations.push("id", "ID must be a valid UUID");
    }

    if let Some(title) = input.title.as_deref() {
        if title.chars().count() < MIN_TITLE_LENGTH {
            violations.push("title", "Title must be at least 3 characters long");
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            violations.push("title", "Title must be at most 255 characters long");
        }
    }

    violations.finish().map_err(invalid)?;
    id.map_err(|_| invalid(vec!["id: ID must be a valid UUID".to_string()]))
}

// ============================================================================
// ACTIONS: Argument Update Service
// ============================================================================

/// Service that updates arguments.
pub struct ArgumentUpdater<A>
where
    A: ArgumentRepository,
{
    arguments: A,
}

impl<A> ArgumentUpdater<A>
where
    A: ArgumentRepository,
{
    /// Create a new service backed by the given repository.
    pub const fn new(arguments: A) -> Self {
        Self { arguments }
    }

    /// Update an argument.
    ///
    /// Steps, in order: validate the shape, fetch the argument, trim the new
    /// title and reject an empty result, reject a title owned by a different
    /// argument, persist.
    ///
    /// # Errors
    ///
    /// - [`ArgumentUpdateError::InvalidInput`] when the shape is invalid or
    ///   the title trims to nothing
    /// - [`ArgumentUpdateError::ArgumentNotFound`] when the id matches no
    ///   argument
    /// - [`ArgumentUpdateError::DuplicateArgument`] when another argument
    ///   owns the new title
    /// - [`ArgumentUpdateError::RepositoryError`] when a repository call
    ///   fails
    pub async fn update(
        &self,
        input: ArgumentUpdateInput,
    ) -> Result<ArgumentUpdateOutput, ArgumentUpdateError> {
        let id = validate_update_input(&input)?;

        let stored = match self.arguments.find_by_id(id).await {
            Ok(argument) => argument,
            Err(RepositoryError::NotFound(_)) => {
                tracing::debug!(argument_id = %id, "Update targets unknown argument");
                return Err(ArgumentUpdateError::ArgumentNotFound);
            }
            Err(err) => return Err(err.into()),
        };

        let new_title = match input.title.as_deref() {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ArgumentUpdateError::InvalidInput {
                        message: "Validation failed".to_string(),
                        details: vec!["title: Title cannot be empty".to_string()],
                    });
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        if let Some(title) = &new_title {
            if *title != stored.title {
                match self.arguments.find_by_title(title).await {
                    Ok(existing) if existing.id != id => {
                        tracing::debug!(title = %title, "Rejected rename to a taken title");
                        return Err(ArgumentUpdateError::DuplicateArgument);
                    }
                    Ok(_) | Err(RepositoryError::NotFound(_)) => {}
                    Err(err) => return Err(err.into()),
                }
            }
        }

        let updated = new_title.map_or_else(|| stored.touch(), |title| stored.rename(title));
        self.arguments.update(&updated).await?;
        tracing::info!(argument_id = %updated.id, "Argument updated");

        Ok(ArgumentUpdateOutput { argument: updated })
    }
}

// ============================================================================
// TESTS
// ============================================================================
