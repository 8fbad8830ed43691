//! # Argument List Operation
//!
//! Paginated argument listing, optionally filtered to one assessment.
//!
//! Listing is forgiving about ranges: a page past the end returns an empty
//! item list with accurate metadata. Only invalid page or limit *values*
//! (zero, or a limit above the cap) are errors.
//!
//! The two paths window differently:
//!
//! - filtered by assessment: fetch every argument of the assessment, sort
//!   newest first, slice in memory
//! - unfiltered: delegate windowing and the grand total to the repository

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::cmp::Reverse;

use itertools::Itertools;
use tap::Pipe;

use crate::domain::aggregates::Argument;
use crate::domain::identifiers::AssessmentId;
use crate::domain::pagination::{page_window, PageMeta, PageRequest};
use crate::domain::repository::{ArgumentRepository, AssessmentRepository, RepositoryError};
use crate::domain::validation::FieldViolations;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Raw request to list arguments.
///
/// `None` for page or limit means the defaults
/// ([`PageRequest::DEFAULT_PAGE`], [`PageRequest::DEFAULT_LIMIT`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentListInput {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size, capped at [`PageRequest::MAX_LIMIT`]
    pub limit: Option<u32>,
    /// Restrict the listing to one assessment
    pub assessment_id: Option<String>,
}

/// One page of arguments plus pagination metadata.
#[derive(Debug, Clone)]
pub struct ArgumentListOutput {
    /// Arguments inside the requested window, newest first
    pub items: Vec<Argument>,
    /// Pagination metadata for the whole result set
    pub meta: PageMeta,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when listing arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentListError {
    /// Validation failed; `details` lists every violated rule.
    #[error("{message}")]
    InvalidInput {
        /// Summary line
        message: String,
        /// One `field: message` entry per violation
        details: Vec<String>,
    },

    /// The assessment named by the filter does not exist.
    #[error("Assessment not found")]
    AssessmentNotFound,

    /// A repository call failed; the payload carries the backend message.
    #[error("{0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ArgumentListError {
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

/// Validate the request and resolve page and limit to concrete values.
///
/// # Errors
///
/// Returns [`ArgumentListError::InvalidInput`] with one detail per
/// violation:
///
/// - `page: Page must be at least 1`
/// - `limit: Limit must be at least 1`
/// - `limit: Limit cannot exceed 100`
/// - `assessmentId: Assessment ID must be a valid UUID`
pub fn validate_list_input(
    input: &ArgumentListInput,
) -> Result<(PageRequest, Option<AssessmentId>), ArgumentListError> {
    let mut violations = FieldViolations::new();

    if input.page == Some(0) {
        violations.push("page", "Page must be at least 1");
    }
    if input.limit == Some(0) {
        violations.push("limit", "Limit must be at least 1");
    }
    if input.limit.is_some_and(|limit| limit > PageRequest::MAX_LIMIT) {
        violations.push("limit", "Limit cannot exceed 100");
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
        .map_err(|details| ArgumentListError::InvalidInput {
            message: "Validation failed".to_string(),
            details,
        })?;

    Ok((PageRequest::resolve(input.page, input.limit), assessment_id))
}

// ============================================================================
// ACTIONS: Argument Listing Service
// ============================================================================

/// Service that lists arguments.
pub struct ArgumentLister<A, S>
where
    A: ArgumentRepository,
    S: AssessmentRepository,
{
    arguments: A,
    assessments: S,
}

impl<A, S> ArgumentLister<A, S>
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

    /// List one page of arguments, newest first.
    ///
    /// # Errors
    ///
    /// - [`ArgumentListError::InvalidInput`] when page, limit, or the
    ///   assessment id are invalid
    /// - [`ArgumentListError::AssessmentNotFound`] when the filter names an
    ///   unknown assessment
    /// - [`ArgumentListError::RepositoryError`] when a repository call fails
    pub async fn list(
        &self,
        input: ArgumentListInput,
    ) -> Result<ArgumentListOutput, ArgumentListError> {
        let (request, assessment_id) = validate_list_input(&input)?;

        let (items, total) = match assessment_id {
            Some(id) => {
                if !self.assessments.exists(id).await? {
                    tracing::debug!(assessment_id = %id, "Listing for unknown assessment");
                    return Err(ArgumentListError::AssessmentNotFound);
                }
                let all = self.arguments.find_by_assessment_id(id).await?;
                let total = all.len();
                let items = all
                    .into_iter()
                    .sorted_by_key(|a| Reverse(a.created_at))
                    .collect::<Vec<_>>()
                    .pipe(|sorted| page_window(sorted, request));
                (items, total)
            }
            None => {
                let page = self
                    .arguments
                    .find_all_paginated(request.limit_usize(), request.offset())
                    .await?;
                (page.items, page.total)
            }
        };

        Ok(ArgumentListOutput {
            items,
            meta: PageMeta::compute(request, total),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
