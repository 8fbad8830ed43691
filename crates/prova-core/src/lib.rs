//! # Prova Core
//!
//! Assessment consistency and aggregation engine for the Prova platform.
//!
//! The crate owns the business rules that keep assessments, arguments,
//! questions, options and answers mutually consistent, and the read-model
//! aggregation that reconstructs the full nested tree
//! (assessment → arguments → questions → options/answers) from
//! independently-stored flat collections.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//! - No `todo!()` / `unimplemented!()` - complete implementations only
//!
//! ## Error Handling
//!
//! Every use case returns `Result<Output, Error>` with a closed error enum;
//! nothing throws past the use-case boundary. Repository failures are wrapped
//! where the call is made, never propagated raw. Use:
//! - `?` operator for propagation
//! - `match` on repository errors where absence is an expected outcome
//!
//! ## Layout
//!
//! - [`domain`] - entities, identifiers, repository contracts and use cases
//! - [`memory`] - in-memory repository implementations for tests and
//!   embedding consumers

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod memory;

pub use domain::aggregates::{
    Answer, AnswerError, AnswerTranslation, Argument, Assessment, AssessmentBuilder,
    AssessmentError, AssessmentKind, Lesson, LessonTranslation, Locale, Question, QuestionError,
    QuestionKind, QuestionOption, QuizPosition,
};
pub use domain::argument_create::ArgumentCreator;
pub use domain::argument_list::ArgumentLister;
pub use domain::argument_update::ArgumentUpdater;
pub use domain::assessment_create::AssessmentCreator;
pub use domain::identifiers::{
    AnswerId, ArgumentId, AssessmentId, IdentifierError, LessonId, ModuleId, QuestionId,
    QuestionOptionId,
};
pub use domain::pagination::{PageMeta, PageRequest};
pub use domain::question_create::QuestionCreator;
pub use domain::questions_detailed::QuestionsDetailedQuery;
pub use domain::repository::{
    AnswerPage, AnswerRepository, ArgumentPage, ArgumentRepository, AssessmentPage,
    AssessmentRepository, LessonRepository, QuestionOptionRepository, QuestionRepository,
    RepositoryError, RepositoryResult,
};
pub use memory::{
    InMemoryAnswerRepository, InMemoryArgumentRepository, InMemoryAssessmentRepository,
    InMemoryLessonRepository, InMemoryQuestionOptionRepository, InMemoryQuestionRepository,
};
