//! Repository pattern trait interfaces for DDD persistence abstraction.
//!
//! # Repository Pattern
//!
//! The repository pattern abstracts data access behind interfaces, enabling:
//! - **Dependency injection**: Business logic depends on traits, not concrete implementations
//! - **Testing**: Mock implementations for unit tests without real persistence
//! - **Swappable backends**: Switch between `PostgreSQL`, in-memory, etc.
//! - **Functional core**: Pure business logic independent of I/O
//!
//! # Architecture
//!
//! This module defines trait interfaces in the **domain layer** (core):
//! - Traits use domain types (`AssessmentId`, `Argument`, etc.) not primitives
//! - Methods are `async` and return `Result`s for proper error handling
//! - Absence is `Err(RepositoryError::NotFound)`, so existence checks match on
//!   the error instead of unwrapping options
//! - No implementation details leak through
//!
//! Implementations live outside the domain layer; the crate ships in-memory
//! reference implementations in [`crate::memory`].
//!
//! # Design Principles
//!
//! 1. **Domain types in signatures**: `AssessmentId` not `String`
//! 2. **Result returns**: All methods return `RepositoryResult<T>`
//! 3. **Documented ordering**: Listing methods state their sort order
//! 4. **Clear errors**: Each trait documents its error conditions
//! 5. **Testability**: Traits can be mocked for unit testing business logic
//!
//! # Example
//!
//! ```rust,ignore
//! use prova_core::domain::repository::{ArgumentRepository, RepositoryError};
//!
//! // Business logic depends on the trait (dependency injection)
//! async fn title_taken(repo: &impl ArgumentRepository, title: &str) -> bool {
//!     repo.find_by_title(title).await.is_ok()
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{
    aggregates::{Answer, Argument, Assessment, Lesson, Question, QuestionOption},
    identifiers::{
        AnswerId, ArgumentId, AssessmentId, LessonId, QuestionId, QuestionOptionId,
    },
};

// ============================================================================
// SHARED ERROR TYPES
// ============================================================================

/// Common errors across all repository operations.
///
/// This error type covers expected failures in repository operations:
/// - **Not found**: Requested entity doesn't exist (informational, not exceptional)
/// - **Conflict**: Operation would violate constraints (duplicate titles, etc.)
/// - **Invalid input**: Domain validation failed
/// - **Storage failure**: Underlying storage error (corruption, permissions, etc.)
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Entity not found in repository
    #[error("entity not found: {0}")]
    NotFound(String),

    /// Conflict with existing data (duplicate, constraint violation)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid input for domain operation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Underlying storage failure
    #[error("storage error: {0}")]
    StorageError(String),
}

impl RepositoryError {
    /// Create a not found error
    #[must_use]
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} '{id}'"))
    }

    /// Create a conflict error
    #[must_use]
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }

    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Create a storage error
    #[must_use]
    pub fn storage_error(reason: impl Into<String>) -> Self {
        Self::StorageError(reason.into())
    }

    /// Check if this is a `NotFound` error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The bare message carried by the variant, without the category prefix.
    ///
    /// Use-case errors wrap repository failures by message; the category is
    /// an implementation detail of the backend.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m) | Self::Conflict(m) | Self::InvalidInput(m)
            | Self::StorageError(m) => m,
        }
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// ============================================================================
// PAGE TYPES
// ============================================================================

/// One window of arguments plus the grand total across all windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPage {
    /// Arguments inside the requested window
    pub items: Vec<Argument>,
    /// Total number of arguments in the store
    pub total: usize,
}

/// One window of assessments plus the grand total across all windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentPage {
    /// Assessments inside the requested window
    pub items: Vec<Assessment>,
    /// Total number of assessments in the store
    pub total: usize,
}

/// One window of answers plus the grand total across all windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPage {
    /// Answers inside the requested window
    pub items: Vec<Answer>,
    /// Total number of answers in the store
    pub total: usize,
}

// ============================================================================
// ASSESSMENT REPOSITORY
// ============================================================================

/// Repository for Assessment aggregate operations.
///
/// # Error Conditions
///
/// - `NotFound`: Assessment with given id/title doesn't exist
/// - `Conflict`: Assessment title already exists (on create)
/// - `InvalidInput`: Assessment data violates constraints
/// - `StorageError`: Database corruption, permissions, I/O errors
#[async_trait::async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Load an assessment by its unique id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no assessment with the given id exists.
    /// Returns `StorageError` on backend access failure.
    async fn find_by_id(&self, id: AssessmentId) -> RepositoryResult<Assessment>;

    /// Load an assessment by exact, case-sensitive title.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no assessment with the given title exists.
    /// Returns `StorageError` on backend access failure.
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Assessment>;

    /// Load an assessment by exact title, ignoring the given id.
    ///
    /// Used by rename flows: a hit means some *other* assessment owns the
    /// title.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no other assessment with the title exists.
    /// Returns `StorageError` on backend access failure.
    async fn find_by_title_excluding_id(
        &self,
        title: &str,
        excluded_id: AssessmentId,
    ) -> RepositoryResult<Assessment>;

    /// List the assessments attached to a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend access failure.
    async fn find_by_lesson_id(&self, lesson_id: LessonId) -> RepositoryResult<Vec<Assessment>>;

    /// List all assessments in undefined order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend access failure.
    async fn find_all(&self) -> RepositoryResult<Vec<Assessment>>;

    /// One window of assessments, newest first, plus the grand total.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend access failure.
    async fn find_all_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<AssessmentPage>;

    /// Persist a new assessment.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the title is already taken.
    /// Returns `StorageError` on backend write failure.
    async fn create(&self, assessment: &Assessment) -> RepositoryResult<()>;

    /// Replace a stored assessment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assessment doesn't exist.
    /// Returns `StorageError` on backend write failure.
    async fn update(&self, assessment: &Assessment) -> RepositoryResult<()>;

    /// Delete an assessment by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assessment doesn't exist.
    /// Returns `StorageError` on backend write failure.
    async fn delete(&self, id: AssessmentId) -> RepositoryResult<()>;

    /// Check if an assessment exists by id.
    ///
    /// Returns `false` when absent (not an error).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend access failure.
    async fn exists(&self, id: AssessmentId) -> RepositoryResult<bool> {
        match self.find_by_id(id).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// ARGUMENT REPOSITORY
// ============================================================================

/// Repository for Argument aggregate operations.
///
/// # Error Conditions
///
/// - `NotFound`: Argument with given id/title doesn't exist
/// - `Conflict`: Argument title already exists (on create)
/// - `StorageError`: Database corruption, permissions, I/O errors
#[async_trait::async_trait]
pub trait ArgumentRepository: Send + Sync {
    /// Load an argument by its unique id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_id(&self, id: ArgumentId) -> RepositoryResult<Argument>;

    /// Load an argument by exact, case-sensitive title.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Argument>;

    /// List the arguments of an assessment, oldest first (`created_at`
    /// ascending).
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_assessment_id(
        &self,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Vec<Argument>>;

    /// Load an argument by exact title within one assessment.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_title_and_assessment_id(
        &self,
        title: &str,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Argument>;

    /// List all arguments in undefined order.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_all(&self) -> RepositoryResult<Vec<Argument>>;

    /// One window of arguments, newest first (`created_at` descending), plus
    /// the grand total.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_all_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<ArgumentPage>;

    /// Persist a new argument.
    ///
    /// # Errors
    ///
    /// `Conflict` if the title is already taken; `StorageError` on write
    /// failure.
    async fn create(&self, argument: &Argument) -> RepositoryResult<()>;

    /// Replace a stored argument.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `Conflict` if the new title is already taken;
    /// `StorageError` on write failure.
    async fn update(&self, argument: &Argument) -> RepositoryResult<()>;

    /// Delete an argument by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn delete(&self, id: ArgumentId) -> RepositoryResult<()>;
}

// ============================================================================
// QUESTION REPOSITORY
// ============================================================================

/// Repository for Question aggregate operations.
#[async_trait::async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load a question by its unique id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_id(&self, id: QuestionId) -> RepositoryResult<Question>;

    /// List the questions of an assessment.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_assessment_id(
        &self,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Vec<Question>>;

    /// List the questions of an argument.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_argument_id(&self, argument_id: ArgumentId)
        -> RepositoryResult<Vec<Question>>;

    /// List the questions of an assessment that belong to one argument.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_assessment_id_and_argument_id(
        &self,
        assessment_id: AssessmentId,
        argument_id: ArgumentId,
    ) -> RepositoryResult<Vec<Question>>;

    /// List all questions in undefined order.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_all(&self) -> RepositoryResult<Vec<Question>>;

    /// Persist a new question.
    ///
    /// # Errors
    ///
    /// `StorageError` on write failure.
    async fn create(&self, question: &Question) -> RepositoryResult<()>;

    /// Replace a stored question.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn update(&self, question: &Question) -> RepositoryResult<()>;

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn delete(&self, id: QuestionId) -> RepositoryResult<()>;

    /// Count the questions of an assessment.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn count_by_assessment_id(&self, assessment_id: AssessmentId)
        -> RepositoryResult<usize>;

    /// Count the questions of an argument.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn count_by_argument_id(&self, argument_id: ArgumentId) -> RepositoryResult<usize>;
}

// ============================================================================
// QUESTION OPTION REPOSITORY
// ============================================================================

/// Repository for question option operations.
#[async_trait::async_trait]
pub trait QuestionOptionRepository: Send + Sync {
    /// Load an option by its unique id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_id(&self, id: QuestionOptionId) -> RepositoryResult<QuestionOption>;

    /// List the options of one question.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_question_id(
        &self,
        question_id: QuestionId,
    ) -> RepositoryResult<Vec<QuestionOption>>;

    /// Batched load: the options of every listed question, in one call.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_by_question_ids(
        &self,
        question_ids: &[QuestionId],
    ) -> RepositoryResult<Vec<QuestionOption>>;

    /// Persist a new option.
    ///
    /// # Errors
    ///
    /// `StorageError` on write failure.
    async fn create(&self, option: &QuestionOption) -> RepositoryResult<()>;

    /// Persist a batch of options.
    ///
    /// # Errors
    ///
    /// `StorageError` on write failure.
    async fn create_many(&self, options: &[QuestionOption]) -> RepositoryResult<()>;

    /// Replace a stored option.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn update(&self, option: &QuestionOption) -> RepositoryResult<()>;

    /// Delete an option by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn delete(&self, id: QuestionOptionId) -> RepositoryResult<()>;

    /// Delete every option of a question.
    ///
    /// # Errors
    ///
    /// `StorageError` on write failure.
    async fn delete_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<()>;

    /// Count the options of a question.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn count_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<usize>;
}

// ============================================================================
// ANSWER REPOSITORY
// ============================================================================

/// Repository for Answer aggregate operations.
#[async_trait::async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Load an answer by its unique id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_id(&self, id: AnswerId) -> RepositoryResult<Answer>;

    /// Load the answer of a question (one-to-one).
    ///
    /// # Errors
    ///
    /// `NotFound` when the question has no answer; `StorageError` on access
    /// failure.
    async fn find_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<Answer>;

    /// Batched load: the answers of every listed question, in one call.
    /// Questions without an answer simply contribute nothing.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_many_by_question_ids(
        &self,
        question_ids: &[QuestionId],
    ) -> RepositoryResult<Vec<Answer>>;

    /// One window of answers, newest first, plus the grand total.
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn find_all_paginated(&self, limit: usize, offset: usize)
        -> RepositoryResult<AnswerPage>;

    /// Persist a new answer.
    ///
    /// # Errors
    ///
    /// `Conflict` if the question already has an answer; `StorageError` on
    /// write failure.
    async fn create(&self, answer: &Answer) -> RepositoryResult<()>;

    /// Replace a stored answer.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn update(&self, answer: &Answer) -> RepositoryResult<()>;

    /// Delete an answer by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on write failure.
    async fn delete(&self, id: AnswerId) -> RepositoryResult<()>;

    /// Check if an answer exists by id.
    ///
    /// Returns `false` when absent (not an error).
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn exists(&self, id: AnswerId) -> RepositoryResult<bool> {
        match self.find_by_id(id).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if a question already has an answer.
    ///
    /// Returns `false` when absent (not an error).
    ///
    /// # Errors
    ///
    /// `StorageError` on access failure.
    async fn exists_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<bool> {
        match self.find_by_question_id(question_id).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// LESSON REPOSITORY
// ============================================================================

/// Read-only repository for course-catalog lessons.
///
/// Lessons are owned by another system; this crate only resolves them for
/// labeling. Failures here are routinely treated as non-fatal by callers.
#[async_trait::async_trait]
pub trait LessonRepository: Send + Sync {
    /// Load a lesson by its unique id.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent; `StorageError` on access failure.
    async fn find_by_id(&self, id: LessonId) -> RepositoryResult<Lesson>;
}

// ============================================================================
// MOCK IMPLEMENTATIONS FOR TESTING
// ============================================================================
