//! # Domain Layer
//!
//! Core business logic for the assessment platform, independent of transport
//! and persistence concerns.
//!
//! ## Architecture
//!
//! The layer follows the **Functional Core, Imperative Shell** pattern:
//!
//! - **Pure functions** - validation and pagination math are deterministic,
//!   no I/O
//! - **Domain types** - semantic newtypes that prevent invalid states
//! - **Business rules** - enforced by use-case services against repository
//!   contracts
//! - **Error handling** - closed error enums using `thiserror`
//!
//! ## Module Structure
//!
//! ### Core Types (`identifiers`)
//!
//! UUID-backed newtypes for entity identity:
//! - [`AssessmentId`] / [`ArgumentId`] / [`QuestionId`] /
//!   [`QuestionOptionId`] / [`AnswerId`] - assessment-domain entities
//! - [`LessonId`] / [`ModuleId`] - course-catalog references (weak,
//!   read-only from this crate's perspective)
//!
//! Each identifier validates on construction and cannot represent a
//! malformed id afterwards.
//!
//! ### Aggregate Roots (`aggregates`)
//!
//! - [`Assessment`] - gradeable unit (quiz, timed simulado, open exam)
//! - [`Argument`] - thematic grouping of questions, may exist without an
//!   assessment
//! - [`Question`] - single gradeable prompt with options and at most one
//!   answer
//! - [`QuestionOption`] / [`Answer`] - leaves of the question tree
//! - [`Lesson`] - external read model used only to resolve a display label
//!
//! ### Repository Traits (`repository`)
//!
//! Async persistence contracts, one per aggregate. Absence is modeled as
//! `Err(RepositoryError::NotFound)` so existence checks match on the error
//! instead of unwrapping options.
//!
//! ### Use Cases
//!
//! One module per operation, each exposing input/output types, an error
//! enum and a service struct wired by constructor injection:
//! - [`argument_create`] / [`argument_update`] / [`argument_list`]
//! - [`question_create`]
//! - [`assessment_create`]
//! - [`questions_detailed`] - the nested read-model aggregation
//!
//! ### Supporting Modules
//!
//! - **`pagination`** - offset/limit windowing and page metadata math
//! - **`validation`** - field-violation collection for invalid-input errors
//!
//! ## Design Principles
//!
//! ### Parse at Boundaries, Validate Once
//!
//! ```rust,ignore
//! use prova_core::domain::identifiers::AssessmentId;
//!
//! // Parse and validate at the boundary
//! let id = AssessmentId::parse("550e8400-e29b-41d4-a716-446655440000")?;
//!
//! // Use throughout domain - no further validation needed
//! let assessment = repo.find_by_id(id).await?;
//! ```
//!
//! ### Fail Fast, Fail Typed
//!
//! Shape validation always precedes collaborator I/O; business-rule
//! failures (not-found, duplicate, type-mismatch) stop the flow
//! immediately; repository failures are wrapped at the call site.
//!
//! ## Error Handling
//!
//! - **`IdentifierError`** - identifier validation failures
//! - **`AssessmentError`** / **`QuestionError`** / **`AnswerError`** -
//!   aggregate construction failures
//! - **`RepositoryError`** - repository operation errors
//! - per-use-case enums (`ArgumentCreateError`, `QuestionCreateError`, ...)
//!   - the only types that cross the use-case boundary

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod aggregates;
pub mod argument_create;
pub mod argument_list;
pub mod argument_update;
pub mod assessment_create;
pub mod identifiers;
pub mod pagination;
pub mod question_create;
pub mod questions_detailed;
pub mod repository;
pub mod validation;

pub use aggregates::{
    Answer, AnswerError, AnswerTranslation, Argument, Assessment, AssessmentBuilder,
    AssessmentError, AssessmentKind, Lesson, LessonTranslation, Locale, Question, QuestionError,
    QuestionKind, QuestionOption, QuizPosition,
};
pub use identifiers::{
    AnswerId, ArgumentId, AssessmentId, IdentifierError, LessonId, ModuleId, QuestionId,
    QuestionOptionId,
};
pub use pagination::{PageMeta, PageRequest};
// Re-export repository traits for convenience
pub use repository::{
    AnswerPage, AnswerRepository, ArgumentPage, ArgumentRepository, AssessmentPage,
    AssessmentRepository, LessonRepository, QuestionOptionRepository, QuestionRepository,
    RepositoryError, RepositoryResult,
};
