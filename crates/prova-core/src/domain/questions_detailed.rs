//! # Detailed Questions Read-Model
//!
//! Assembles the full review tree of one assessment: every question with its
//! options and answer embedded, arguments with their questions nested (for
//! SIMULADO assessments), an optional lesson summary, and answer-coverage
//! totals.
//!
//! The aggregation degrades rather than fails wherever the data is
//! decorative:
//!
//! - a lesson that does not resolve simply drops the lesson section
//! - an argument listing failure degrades to an empty arguments list
//! - arguments without an assessment link are dropped from the tree
//!
//! Question, option, and answer fetches are load-bearing; their failures are
//! fatal and surface with fixed messages. All repository calls run
//! sequentially, each checked before the next.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::domain::aggregates::{Answer, Argument, Assessment, Lesson, Question, QuestionOption};
use crate::domain::identifiers::{AssessmentId, LessonId, ModuleId, QuestionId};
use crate::domain::repository::{
    AnswerRepository, ArgumentRepository, AssessmentRepository, LessonRepository,
    QuestionOptionRepository, QuestionRepository, RepositoryError,
};
use crate::domain::validation::FieldViolations;

// ============================================================================
// DATA: Input and Output Types
// ============================================================================

/// Raw request for the detailed questions tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsDetailedInput {
    /// Unparsed assessment id
    pub assessment_id: String,
}

/// Condensed view of the lesson an assessment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    /// Lesson identifier
    pub id: LessonId,
    /// URL-safe lesson slug
    pub slug: String,
    /// Resolved display title
    pub title: String,
    /// Position of the lesson inside its module
    pub order: u32,
    /// Module the lesson belongs to
    pub module_id: ModuleId,
}

impl LessonSummary {
    /// Condense a lesson, resolving the display title.
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            slug: lesson.slug.clone(),
            title: lesson.display_title(),
            order: lesson.order,
            module_id: lesson.module_id,
        }
    }
}

/// A question with its options and answer embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedQuestion {
    /// The question itself, flattened into the projection
    #[serde(flatten)]
    pub question: Question,
    /// Options of the question, empty for open questions
    pub options: Vec<QuestionOption>,
    /// The question's answer, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
}

/// An argument with its questions nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentWithQuestions {
    /// The argument itself, flattened into the projection
    #[serde(flatten)]
    pub argument: Argument,
    /// Detailed questions attached to this argument
    pub questions: Vec<DetailedQuestion>,
}

/// The assembled review tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsDetailedOutput {
    /// The assessment, all fields included
    pub assessment: Assessment,
    /// Lesson summary, absent when the lesson is unset or did not resolve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson: Option<LessonSummary>,
    /// Arguments with nested questions; populated for SIMULADO only
    pub arguments: Vec<ArgumentWithQuestions>,
    /// Every question of the assessment, options and answers embedded
    pub questions: Vec<DetailedQuestion>,
    /// Number of questions in the assessment
    pub total_questions: usize,
    /// Number of questions that have an answer
    pub total_questions_with_answers: usize,
}

// ============================================================================
// ERROR: Domain Errors
// ============================================================================

/// Errors that can occur when assembling the detailed questions tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionsDetailedError {
    /// Validation failed; `details` lists every violated rule.
    #[error("{message}")]
    InvalidInput {
        /// Summary line
        message: String,
        /// One `field: message` entry per violation
        details: Vec<String>,
    },

    /// The assessment does not exist.
    #[error("Assessment not found")]
    AssessmentNotFound,

    /// A load-bearing repository call failed.
    #[error("{0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for QuestionsDetailedError {
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
// CALCULATIONS: Validation and Join Helpers
// ============================================================================

/// Validate the request shape and parse the assessment id.
///
/// # Errors
///
/// Returns [`QuestionsDetailedError::InvalidInput`] with the detail
/// `assessmentId: Assessment ID must be a valid UUID`.
pub fn validate_detailed_input(
    input: &QuestionsDetailedInput,
) -> Result<AssessmentId, QuestionsDetailedError> {
    let mut violations = FieldViolations::new();

    let assessment_id = AssessmentId::parse(&input.assessment_id);
    if assessment_id.is_err() {
        violations.push("assessmentId", "Assessment ID must be a valid UUID");
    }

    violations
        .finish()
        .map_err(|details| QuestionsDetailedError::InvalidInput {
            message: "Validation failed".to_string(),
            details,
        })?;

    assessment_id.map_err(|_| QuestionsDetailedError::InvalidInput {
        message: "Validation failed".to_string(),
        details: vec!["assessmentId: Assessment ID must be a valid UUID".to_string()],
    })
}

/// Group options by their question, one pass.
fn group_options_by_question(
    options: Vec<QuestionOption>,
) -> HashMap<QuestionId, Vec<QuestionOption>> {
    options
        .into_iter()
        .map(|option| (option.question_id, option))
        .into_group_map()
}

/// Index answers by their question, one pass.
fn index_answers_by_question(answers: Vec<Answer>) -> HashMap<QuestionId, Answer> {
    answers
        .into_iter()
        .map(|answer| (answer.question_id, answer))
        .collect()
}

// ============================================================================
// ACTIONS: Detailed Questions Query Service
// ============================================================================

/// Service that assembles the detailed questions tree of an assessment.
pub struct QuestionsDetailedQuery<S, L, Q, O, A, G>
where
    S: AssessmentRepository,
    L: LessonRepository,
    Q: QuestionRepository,
    O: QuestionOptionRepository,
    A: AnswerRepository,
    G: ArgumentRepository,
{
    assessments: S,
    lessons: L,
    questions: Q,
    options: O,
    answers: A,
    arguments: G,
}

impl<S, L, Q, O, A, G> QuestionsDetailedQuery<S, L, Q, O, A, G>
where
    S: AssessmentRepository,
    L: LessonRepository,
    Q: QuestionRepository,
    O: QuestionOptionRepository,
    A: AnswerRepository,
    G: ArgumentRepository,
{
    /// Create a new service backed by the given repositories.
    pub const fn new(
        assessments: S,
        lessons: L,
        questions: Q,
        options: O,
        answers: A,
        arguments: G,
    ) -> Self {
        Self {
            assessments,
            lessons,
            questions,
            options,
            answers,
            arguments,
        }
    }

    /// Assemble the detailed questions tree.
    ///
    /// # Errors
    ///
    /// - [`QuestionsDetailedError::InvalidInput`] when the assessment id is
    ///   not a UUID
    /// - [`QuestionsDetailedError::AssessmentNotFound`] when the assessment
    ///   does not exist
    /// - [`QuestionsDetailedError::RepositoryError`] when a load-bearing
    ///   fetch fails (`"Failed to fetch questions"`,
    ///   `"Failed to fetch question options"`, `"Failed to fetch answers"`)
    pub async fn fetch(
        &self,
        input: QuestionsDetailedInput,
    ) -> Result<QuestionsDetailedOutput, QuestionsDetailedError> {
        let assessment_id = validate_detailed_input(&input)?;

        let assessment = match self.assessments.find_by_id(assessment_id).await {
            Ok(assessment) => assessment,
            Err(RepositoryError::NotFound(_)) => {
                return Err(QuestionsDetailedError::AssessmentNotFound);
            }
            Err(err) => return Err(err.into()),
        };

        let lesson = match assessment.lesson_id {
            Some(lesson_id) => match self.lessons.find_by_id(lesson_id).await {
                Ok(lesson) => Some(LessonSummary::from_lesson(&lesson)),
                Err(err) => {
                    tracing::warn!(
                        lesson_id = %lesson_id,
                        error = %err,
                        "Lesson did not resolve; omitting the lesson section"
                    );
                    None
                }
            },
            None => None,
        };

        let questions = self
            .questions
            .find_by_assessment_id(assessment_id)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to fetch questions");
                QuestionsDetailedError::RepositoryError("Failed to fetch questions".to_string())
            })?;
        let question_ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();

        let options = self
            .options
            .find_by_question_ids(&question_ids)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to fetch question options");
                QuestionsDetailedError::RepositoryError(
                    "Failed to fetch question options".to_string(),
                )
            })?;

        let answers = self
            .answers
            .find_many_by_question_ids(&question_ids)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to fetch answers");
                QuestionsDetailedError::RepositoryError("Failed to fetch answers".to_string())
            })?;

        let arguments: Vec<Argument> = if assessment.kind.is_simulado() {
            match self.arguments.find_by_assessment_id(assessment_id).await {
                Ok(list) => list.into_iter().filter(Argument::is_attached).collect(),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "Arguments did not resolve; degrading to an empty list"
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let mut options_by_question = group_options_by_question(options);
        let mut answers_by_question = index_answers_by_question(answers);

        let mut detailed = Vec::with_capacity(questions.len());
        let mut total_questions_with_answers = 0usize;
        for question in questions {
            let options = options_by_question.remove(&question.id).unwrap_or_default();
            let answer = answers_by_question.remove(&question.id);
            if answer.is_some() {
                total_questions_with_answers += 1;
            }
            detailed.push(DetailedQuestion {
                question,
                options,
                answer,
            });
        }

        let mut grouped: Vec<ArgumentWithQuestions> = arguments
            .into_iter()
            .map(|argument| ArgumentWithQuestions {
                argument,
                questions: Vec::new(),
            })
            .collect();
        for question in &detailed {
            if let Some(argument_id) = question.question.argument_id {
                if let Some(group) = grouped.iter_mut().find(|g| g.argument.id == argument_id) {
                    group.questions.push(question.clone());
                }
            }
        }

        let total_questions = detailed.len();
        tracing::debug!(
            assessment_id = %assessment_id,
            total_questions,
            total_questions_with_answers,
            "Assembled detailed questions tree"
        );

        Ok(QuestionsDetailedOutput {
            assessment,
            lesson,
            arguments: grouped,
            questions: detailed,
            total_questions,
            total_questions_with_answers,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
