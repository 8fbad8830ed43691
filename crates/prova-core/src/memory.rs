//! # In-Memory Repositories
//!
//! Reference implementations of every repository contract, backed by
//! `Arc<Mutex<Vec<T>>>` stores. They are the persistence layer used by the
//! integration tests and the benchmarks, and double as a worked example for
//! anyone writing a real backend.
//!
//! ## Semantics
//!
//! - **Cloning shares the store.** `Clone` copies the `Arc`, so a cloned
//!   repository observes the same rows. Hand clones to services and keep one
//!   handle for assertions.
//! - **Uniqueness is enforced at write time.** Use cases pre-check duplicates
//!   for friendly errors, but the store is the authoritative enforcement
//!   point: `create`/`update` report [`RepositoryError::Conflict`] when a
//!   uniqueness rule would break, which closes the check-then-write race.
//! - **Ordering is explicit.** `find_by_assessment_id` returns arguments
//!   oldest first; `find_all_paginated` returns rows newest first. Everything
//!   else is insertion order.
//! - **Poisoned locks become storage errors.** A panic while holding the lock
//!   surfaces as [`RepositoryError::StorageError`] instead of propagating.
//!
//! ## Example
//!
//! ```rust
//! use prova_core::{Argument, ArgumentRepository, InMemoryArgumentRepository};
//!
//! # tokio_test::block_on(async {
//! let repository = InMemoryArgumentRepository::new();
//! let argument = Argument::new("Pharmacology", None);
//! repository.create(&argument).await?;
//! assert_eq!(repository.find_by_id(argument.id).await?.title, "Pharmacology");
//! # Ok::<(), prova_core::RepositoryError>(())
//! # }).unwrap();
//! ```

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
use std::sync::{Arc, Mutex, MutexGuard};

use itertools::Itertools;

use crate::domain::aggregates::{Answer, Argument, Assessment, Lesson, Question, QuestionOption};
use crate::domain::identifiers::{
    AnswerId, ArgumentId, AssessmentId, LessonId, QuestionId, QuestionOptionId,
};
use crate::domain::repository::{
    AnswerPage, AnswerRepository, ArgumentPage, ArgumentRepository, AssessmentPage,
    AssessmentRepository, LessonRepository, QuestionOptionRepository, QuestionRepository,
    RepositoryError, RepositoryResult,
};

/// Acquire a store lock, converting poison into a storage error.
fn lock<T>(rows: &Mutex<Vec<T>>) -> RepositoryResult<MutexGuard<'_, Vec<T>>> {
    rows.lock()
        .map_err(|e| RepositoryError::storage_error(e.to_string()))
}

// ============================================================================
// IN-MEMORY ASSESSMENT REPOSITORY
// ============================================================================

/// In-memory [`AssessmentRepository`].
///
/// Enforces unique ids, unique titles, and unique slugs at write time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentRepository {
    rows: Arc<Mutex<Vec<Assessment>>>,
}

impl InMemoryAssessmentRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn find_by_id(&self, id: AssessmentId) -> RepositoryResult<Assessment> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("assessment", id))
    }

    async fn find_by_title(&self, title: &str) -> RepositoryResult<Assessment> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.title == title)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("assessment", title))
    }

    async fn find_by_title_excluding_id(
        &self,
        title: &str,
        excluded_id: AssessmentId,
    ) -> RepositoryResult<Assessment> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.title == title && a.id != excluded_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("assessment", title))
    }

    async fn find_by_lesson_id(&self, lesson_id: LessonId) -> RepositoryResult<Vec<Assessment>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|a| a.lesson_id == Some(lesson_id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Assessment>> {
        let rows = lock(&self.rows)?;
        Ok(rows.clone())
    }

    async fn find_all_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<AssessmentPage> {
        let rows = lock(&self.rows)?;
        let total = rows.len();
        let items = rows
            .iter()
            .cloned()
            .sorted_by_key(|a| Reverse(a.created_at))
            .skip(offset)
            .take(limit)
            .collect();
        Ok(AssessmentPage { items, total })
    }

    async fn create(&self, assessment: &Assessment) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|a| a.id == assessment.id) {
            return Err(RepositoryError::conflict(format!(
                "assessment '{}' already exists",
                assessment.id
            )));
        }
        if rows.iter().any(|a| a.title == assessment.title) {
            return Err(RepositoryError::conflict(format!(
                "assessment title already exists: '{}'",
                assessment.title
            )));
        }
        if rows.iter().any(|a| a.slug == assessment.slug) {
            return Err(RepositoryError::conflict(format!(
                "assessment slug already exists: '{}'",
                assessment.slug
            )));
        }
        rows.push(assessment.clone());
        Ok(())
    }

    async fn update(&self, assessment: &Assessment) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == assessment.id)
            .ok_or_else(|| RepositoryError::not_found("assessment", assessment.id))?;
        if rows
            .iter()
            .any(|a| a.id != assessment.id && a.title == assessment.title)
        {
            return Err(RepositoryError::conflict(format!(
                "assessment title already exists: '{}'",
                assessment.title
            )));
        }
        rows[position] = assessment.clone();
        Ok(())
    }

    async fn delete(&self, id: AssessmentId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| RepositoryError::not_found("assessment", id))?;
        rows.remove(position);
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY ARGUMENT REPOSITORY
// ============================================================================

/// In-memory [`ArgumentRepository`].
///
/// Enforces unique ids and globally unique titles at write time. Title
/// matching is exact: case and surrounding whitespace are significant.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArgumentRepository {
    rows: Arc<Mutex<Vec<Argument>>>,
}

impl InMemoryArgumentRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ArgumentRepository for InMemoryArgumentRepository {
    async fn find_by_id(&self, id: ArgumentId) -> RepositoryResult<Argument> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("argument", id))
    }

    async fn find_by_title(&self, title: &str) -> RepositoryResult<Argument> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.title == title)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("argument", title))
    }

    async fn find_by_assessment_id(
        &self,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Vec<Argument>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|a| a.assessment_id == Some(assessment_id))
            .cloned()
            .sorted_by_key(|a| a.created_at)
            .collect())
    }

    async fn find_by_title_and_assessment_id(
        &self,
        title: &str,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Argument> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.title == title && a.assessment_id == Some(assessment_id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("argument", title))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Argument>> {
        let rows = lock(&self.rows)?;
        Ok(rows.clone())
    }

    async fn find_all_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<ArgumentPage> {
        let rows = lock(&self.rows)?;
        let total = rows.len();
        let items = rows
            .iter()
            .cloned()
            .sorted_by_key(|a| Reverse(a.created_at))
            .skip(offset)
            .take(limit)
            .collect();
        Ok(ArgumentPage { items, total })
    }

    async fn create(&self, argument: &Argument) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|a| a.id == argument.id) {
            return Err(RepositoryError::conflict(format!(
                "argument '{}' already exists",
                argument.id
            )));
        }
        if rows.iter().any(|a| a.title == argument.title) {
            return Err(RepositoryError::conflict(format!(
                "argument title already exists: '{}'",
                argument.title
            )));
        }
        rows.push(argument.clone());
        Ok(())
    }

    async fn update(&self, argument: &Argument) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == argument.id)
            .ok_or_else(|| RepositoryError::not_found("argument", argument.id))?;
        if rows
            .iter()
            .any(|a| a.id != argument.id && a.title == argument.title)
        {
            return Err(RepositoryError::conflict(format!(
                "argument title already exists: '{}'",
                argument.title
            )));
        }
        rows[position] = argument.clone();
        Ok(())
    }

    async fn delete(&self, id: ArgumentId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| RepositoryError::not_found("argument", id))?;
        rows.remove(position);
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY QUESTION REPOSITORY
// ============================================================================

/// In-memory [`QuestionRepository`].
///
/// At write time, rejects a second question whose normalized text (trimmed,
/// lowercased) matches an existing question of the same assessment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionRepository {
    rows: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryQuestionRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(&self, id: QuestionId) -> RepositoryResult<Question> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("question", id))
    }

    async fn find_by_assessment_id(
        &self,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<Vec<Question>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|q| q.assessment_id == assessment_id)
            .cloned()
            .collect())
    }

    async fn find_by_argument_id(
        &self,
        argument_id: ArgumentId,
    ) -> RepositoryResult<Vec<Question>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|q| q.argument_id == Some(argument_id))
            .cloned()
            .collect())
    }

    async fn find_by_assessment_id_and_argument_id(
        &self,
        assessment_id: AssessmentId,
        argument_id: ArgumentId,
    ) -> RepositoryResult<Vec<Question>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|q| q.assessment_id == assessment_id && q.argument_id == Some(argument_id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Question>> {
        let rows = lock(&self.rows)?;
        Ok(rows.clone())
    }

    async fn create(&self, question: &Question) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|q| q.id == question.id) {
            return Err(RepositoryError::conflict(format!(
                "question '{}' already exists",
                question.id
            )));
        }
        let normalized = question.normalized_text();
        if rows
            .iter()
            .any(|q| q.assessment_id == question.assessment_id && q.normalized_text() == normalized)
        {
            return Err(RepositoryError::conflict(format!(
                "question with similar text already exists in assessment '{}'",
                question.assessment_id
            )));
        }
        rows.push(question.clone());
        Ok(())
    }

    async fn update(&self, question: &Question) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|q| q.id == question.id)
            .ok_or_else(|| RepositoryError::not_found("question", question.id))?;
        let normalized = question.normalized_text();
        if rows.iter().any(|q| {
            q.id != question.id
                && q.assessment_id == question.assessment_id
                && q.normalized_text() == normalized
        }) {
            return Err(RepositoryError::conflict(format!(
                "question with similar text already exists in assessment '{}'",
                question.assessment_id
            )));
        }
        rows[position] = question.clone();
        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| RepositoryError::not_found("question", id))?;
        rows.remove(position);
        Ok(())
    }

    async fn count_by_assessment_id(
        &self,
        assessment_id: AssessmentId,
    ) -> RepositoryResult<usize> {
        let rows = lock(&self.rows)?;
        Ok(rows.iter().filter(|q| q.assessment_id == assessment_id).count())
    }

    async fn count_by_argument_id(&self, argument_id: ArgumentId) -> RepositoryResult<usize> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|q| q.argument_id == Some(argument_id))
            .count())
    }
}

// ============================================================================
// IN-MEMORY QUESTION OPTION REPOSITORY
// ============================================================================

/// In-memory [`QuestionOptionRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionOptionRepository {
    rows: Arc<Mutex<Vec<QuestionOption>>>,
}

impl InMemoryQuestionOptionRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl QuestionOptionRepository for InMemoryQuestionOptionRepository {
    async fn find_by_id(&self, id: QuestionOptionId) -> RepositoryResult<QuestionOption> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("question option", id))
    }

    async fn find_by_question_id(
        &self,
        question_id: QuestionId,
    ) -> RepositoryResult<Vec<QuestionOption>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|o| o.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn find_by_question_ids(
        &self,
        question_ids: &[QuestionId],
    ) -> RepositoryResult<Vec<QuestionOption>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|o| question_ids.contains(&o.question_id))
            .cloned()
            .collect())
    }

    async fn create(&self, option: &QuestionOption) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|o| o.id == option.id) {
            return Err(RepositoryError::conflict(format!(
                "question option '{}' already exists",
                option.id
            )));
        }
        rows.push(option.clone());
        Ok(())
    }

    async fn create_many(&self, options: &[QuestionOption]) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        for option in options {
            if rows.iter().any(|o| o.id == option.id) {
                return Err(RepositoryError::conflict(format!(
                    "question option '{}' already exists",
                    option.id
                )));
            }
        }
        rows.extend(options.iter().cloned());
        Ok(())
    }

    async fn update(&self, option: &QuestionOption) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|o| o.id == option.id)
            .ok_or_else(|| RepositoryError::not_found("question option", option.id))?;
        rows[position] = option.clone();
        Ok(())
    }

    async fn delete(&self, id: QuestionOptionId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| RepositoryError::not_found("question option", id))?;
        rows.remove(position);
        Ok(())
    }

    async fn delete_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        rows.retain(|o| o.question_id != question_id);
        Ok(())
    }

    async fn count_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<usize> {
        let rows = lock(&self.rows)?;
        Ok(rows.iter().filter(|o| o.question_id == question_id).count())
    }
}

// ============================================================================
// IN-MEMORY ANSWER REPOSITORY
// ============================================================================

/// In-memory [`AnswerRepository`].
///
/// Enforces the one-answer-per-question rule at write time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnswerRepository {
    rows: Arc<Mutex<Vec<Answer>>>,
}

impl InMemoryAnswerRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn find_by_id(&self, id: AnswerId) -> RepositoryResult<Answer> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("answer", id))
    }

    async fn find_by_question_id(&self, question_id: QuestionId) -> RepositoryResult<Answer> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|a| a.question_id == question_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("answer for question", question_id))
    }

    async fn find_many_by_question_ids(
        &self,
        question_ids: &[QuestionId],
    ) -> RepositoryResult<Vec<Answer>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .filter(|a| question_ids.contains(&a.question_id))
            .cloned()
            .collect())
    }

    async fn find_all_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<AnswerPage> {
        let rows = lock(&self.rows)?;
        let total = rows.len();
        let items = rows
            .iter()
            .cloned()
            .sorted_by_key(|a| Reverse(a.created_at))
            .skip(offset)
            .take(limit)
            .collect();
        Ok(AnswerPage { items, total })
    }

    async fn create(&self, answer: &Answer) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|a| a.id == answer.id) {
            return Err(RepositoryError::conflict(format!(
                "answer '{}' already exists",
                answer.id
            )));
        }
        if rows.iter().any(|a| a.question_id == answer.question_id) {
            return Err(RepositoryError::conflict(format!(
                "answer already exists for question '{}'",
                answer.question_id
            )));
        }
        rows.push(answer.clone());
        Ok(())
    }

    async fn update(&self, answer: &Answer) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == answer.id)
            .ok_or_else(|| RepositoryError::not_found("answer", answer.id))?;
        rows[position] = answer.clone();
        Ok(())
    }

    async fn delete(&self, id: AnswerId) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        let position = rows
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| RepositoryError::not_found("answer", id))?;
        rows.remove(position);
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY LESSON REPOSITORY
// ============================================================================

/// In-memory [`LessonRepository`].
///
/// The contract is read-only; populate the store through [`Self::insert`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonRepository {
    rows: Arc<Mutex<Vec<Lesson>>>,
}

impl InMemoryLessonRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a lesson into the store.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a lesson with the same id is already present,
    /// `StorageError` if the lock is poisoned.
    pub fn insert(&self, lesson: Lesson) -> RepositoryResult<()> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|l| l.id == lesson.id) {
            return Err(RepositoryError::conflict(format!(
                "lesson '{}' already exists",
                lesson.id
            )));
        }
        rows.push(lesson);
        Ok(())
    }
}

#[async_trait::async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn find_by_id(&self, id: LessonId) -> RepositoryResult<Lesson> {
        let rows = lock(&self.rows)?;
        rows.iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("lesson", id))
    }
}

// ============================================================================
// TESTS
// ============================================================================
