//! # Aggregate Roots
//!
//! This module contains **DDD aggregate roots**, which are consistency boundaries
//! for business logic. Each aggregate encapsulates domain rules and enforces invariants.
//!
//! ## What are Aggregates?
//!
//! In Domain-Driven Design, an aggregate is a cluster of domain objects that can be
//! treated as a unit. The aggregate root is the entry point for the aggregate.
//!
//! **Key characteristics:**
//! - **Consistency boundary** - All invariants are enforced within the aggregate
//! - **Encapsulation** - Construction goes through validating constructors
//! - **Business logic** - Domain rules are implemented in aggregate methods
//!
//! ## Aggregates
//!
//! ### Assessment Aggregate
//!
//! [`Assessment`] - Gradeable unit of questions
//!
//! **Responsibilities:**
//! - Carry the assessment kind (quiz, timed simulado, open exam)
//! - Derive a URL-safe slug from the title
//! - Hold configuration (position, passing score, time limit, randomization)
//! - Recommend the question kind that fits the assessment kind
//!
//! **Business rules:**
//! - Title must be non-empty
//! - Passing score, when present, is a 0-100 percentage
//! - Quiz position only makes sense for quizzes, time limit only for simulados
//!   (enforced at the use-case boundary, carried as data here)
//!
//! ### Argument Aggregate
//!
//! [`Argument`] - Thematic grouping of questions
//!
//! **Responsibilities:**
//! - Group questions under a topic title
//! - Optionally attach to an assessment (weak reference by id)
//!
//! **Business rules:**
//! - Titles are globally unique by exact match (enforced at the use-case and
//!   persistence boundaries)
//! - The stored title is the caller's input verbatim
//!
//! ### Question Aggregate
//!
//! [`Question`] - Single gradeable prompt
//!
//! **Responsibilities:**
//! - Hold prompt text and kind (multiple choice or open)
//! - Reference its assessment (required) and argument (optional)
//! - Expose the normalized form of its text for duplicate detection
//!
//! **Business rules:**
//! - Text cannot be empty or whitespace-only
//! - Kind must match the assessment's recommended kind (use-case rule)
//!
//! ### Leaf Entities
//!
//! [`QuestionOption`] - one selectable choice of a multiple-choice question.
//! [`Answer`] - the single correct answer of a question, with localized
//! explanation translations (at most one per [`Locale`]).
//!
//! ### External Read Models
//!
//! [`Lesson`] - course-catalog lesson this crate never writes. Carried for
//! label resolution only: prefer the `pt` translation, fall back to the first
//! available, else an empty string.
//!
//! ## Design Principles
//!
//! ### 1. Validating Constructors
//!
//! Fallible construction returns `Result`, infallible construction does not
//! pretend to be fallible:
//!
//! ```rust,ignore
//! let question = Question::new(text, kind, assessment_id, None)?; // validates
//! let argument = Argument::new(title, None);                      // total
//! ```
//!
//! ### 2. Immutable Updates
//!
//! Mutating operations return a new instance with `updated_at` refreshed:
//!
//! ```rust,ignore
//! let renamed = argument.rename("New title");
//! assert!(renamed.updated_at >= argument.updated_at);
//! ```
//!
//! ### 3. Weak References
//!
//! Cross-aggregate links are identifier newtypes, never object graphs.
//! `Argument::assessment_id` is `Option<AssessmentId>`; an argument without
//! one is valid and simply never appears in per-assessment aggregation.
//!
//! ## Error Types
//!
//! Each fallible aggregate has its own error type:
//! - [`AssessmentError`] - Assessment construction errors
//! - [`QuestionError`] - Question construction errors
//! - [`AnswerError`] - Answer construction errors
//!
//! ## Related Modules
//!
//! - **`crate::domain::identifiers`** - Semantic identifier types
//! - **`crate::domain::repository`** - Repository traits for persistence
//! - **`crate::memory`** - In-memory reference repositories

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod answer;
pub mod argument;
pub mod assessment;
pub mod lesson;
pub mod locale;
pub mod question;
pub mod question_option;

// Re-export aggregate types
pub use answer::{Answer, AnswerError, AnswerTranslation};
pub use argument::Argument;
pub use assessment::{
    Assessment, AssessmentBuilder, AssessmentError, AssessmentKind, QuizPosition,
};
pub use lesson::{Lesson, LessonTranslation};
pub use locale::Locale;
pub use question::{Question, QuestionError, QuestionKind};
pub use question_option::QuestionOption;
