#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Question authoring flows across assessment kinds: the kind policy,
//! argument attachment and duplicate detection, driven through the public
//! services end to end.

use prova_core::domain::argument_create::{ArgumentCreateInput, ArgumentCreator};
use prova_core::domain::assessment_create::{AssessmentCreateInput, AssessmentCreator};
use prova_core::domain::question_create::{
    QuestionCreateError, QuestionCreateInput, QuestionCreator,
};
use prova_core::{
    ArgumentId, Assessment, InMemoryArgumentRepository, InMemoryAssessmentRepository,
    InMemoryLessonRepository, InMemoryQuestionRepository, QuestionKind, QuestionRepository,
};

// ============================================================================
// SHARED FIXTURE
// ============================================================================

struct Authoring {
    questions: InMemoryQuestionRepository,
    assessment_creator: AssessmentCreator<InMemoryAssessmentRepository, InMemoryLessonRepository>,
    argument_creator: ArgumentCreator<InMemoryArgumentRepository, InMemoryAssessmentRepository>,
    question_creator: QuestionCreator<
        InMemoryQuestionRepository,
        InMemoryAssessmentRepository,
        InMemoryArgumentRepository,
    >,
}

fn authoring() -> Authoring {
    let assessments = InMemoryAssessmentRepository::new();
    let arguments = InMemoryArgumentRepository::new();
    let questions = InMemoryQuestionRepository::new();
    let lessons = InMemoryLessonRepository::new();

    Authoring {
        questions: questions.clone(),
        assessment_creator: AssessmentCreator::new(assessments.clone(), lessons),
        argument_creator: ArgumentCreator::new(arguments.clone(), assessments.clone()),
        question_creator: QuestionCreator::new(questions, assessments, arguments),
    }
}

async fn quiz(authoring: &Authoring, title: &str) -> Assessment {
    authoring
        .assessment_creator
        .create(AssessmentCreateInput {
            title: title.to_string(),
            description: None,
            kind: "QUIZ".to_string(),
            quiz_position: Some("AFTER_LESSON".to_string()),
            passing_score: Some(70),
            time_limit_in_minutes: None,
            randomize_questions: None,
            randomize_options: None,
            lesson_id: None,
        })
        .await
        .expect("quiz created")
        .assessment
}

async fn prova_aberta(authoring: &Authoring, title: &str) -> Assessment {
    authoring
        .assessment_creator
        .create(AssessmentCreateInput {
            title: title.to_string(),
            description: None,
            kind: "PROVA_ABERTA".to_string(),
            quiz_position: None,
            passing_score: None,
            time_limit_in_minutes: None,
            randomize_questions: None,
            randomize_options: None,
            lesson_id: None,
        })
        .await
        .expect("prova aberta created")
        .assessment
}

fn question_input(text: &str, kind: &str, assessment: &Assessment) -> QuestionCreateInput {
    QuestionCreateInput {
        text: text.to_string(),
        kind: kind.to_string(),
        assessment_id: assessment.id.to_string(),
        argument_id: None,
    }
}

// ============================================================================
// KIND POLICY
// ============================================================================

#[tokio::test]
async fn quiz_accepts_multiple_choice_and_rejects_open() {
    let authoring = authoring();
    let quiz = quiz(&authoring, "Anatomy Quiz").await;

    let accepted = authoring
        .question_creator
        .create(question_input(
            "Which bone is the longest in the human body?",
            "MULTIPLE_CHOICE",
            &quiz,
        ))
        .await
        .unwrap();
    assert_eq!(accepted.question.kind, QuestionKind::MultipleChoice);

    let rejected = authoring
        .question_creator
        .create(question_input(
            "Discuss the embryology of the femur.",
            "OPEN",
            &quiz,
        ))
        .await;
    let err = rejected.unwrap_err();
    assert_eq!(
        err,
        QuestionCreateError::QuestionTypeMismatch {
            assessment_kind: quiz.kind,
            recommended_kind: QuestionKind::MultipleChoice,
        }
    );
    assert_eq!(
        err.to_string(),
        "QUIZ assessments require MULTIPLE_CHOICE questions"
    );
}

#[tokio::test]
async fn prova_aberta_accepts_open_and_rejects_multiple_choice() {
    let authoring = authoring();
    let exam = prova_aberta(&authoring, "Surgery Oral Exam").await;

    authoring
        .question_creator
        .create(question_input(
            "Describe the stages of wound healing.",
            "OPEN",
            &exam,
        ))
        .await
        .unwrap();

    let rejected = authoring
        .question_creator
        .create(question_input(
            "Which suture material is absorbable?",
            "MULTIPLE_CHOICE",
            &exam,
        ))
        .await;
    assert_eq!(
        rejected.unwrap_err().to_string(),
        "PROVA_ABERTA assessments require OPEN questions"
    );
}

// ============================================================================
// ARGUMENT ATTACHMENT
// ============================================================================

#[tokio::test]
async fn simulado_questions_attach_to_arguments() {
    let authoring = authoring();
    let simulado = authoring
        .assessment_creator
        .create(AssessmentCreateInput {
            title: "National Mock Exam".to_string(),
            description: None,
            kind: "SIMULADO".to_string(),
            quiz_position: None,
            passing_score: Some(60),
            time_limit_in_minutes: Some(180),
            randomize_questions: None,
            randomize_options: None,
            lesson_id: None,
        })
        .await
        .unwrap()
        .assessment;
    let argument = authoring
        .argument_creator
        .create(ArgumentCreateInput {
            title: "Pharmacokinetics".to_string(),
            assessment_id: Some(simulado.id.to_string()),
        })
        .await
        .unwrap()
        .argument;

    let created = authoring
        .question_creator
        .create(QuestionCreateInput {
            text: "Which route of administration avoids first-pass metabolism?".to_string(),
            kind: "MULTIPLE_CHOICE".to_string(),
            assessment_id: simulado.id.to_string(),
            argument_id: Some(argument.id.to_string()),
        })
        .await
        .unwrap();

    assert_eq!(created.question.argument_id, Some(argument.id));
    let stored = authoring
        .questions
        .find_by_argument_id(argument.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.question.id);
}

#[tokio::test]
async fn rejects_an_unknown_argument() {
    let authoring = authoring();
    let quiz = quiz(&authoring, "Anatomy Quiz").await;

    let result = authoring
        .question_creator
        .create(QuestionCreateInput {
            text: "Which bone is the longest in the human body?".to_string(),
            kind: "MULTIPLE_CHOICE".to_string(),
            assessment_id: quiz.id.to_string(),
            argument_id: Some(ArgumentId::new_random().to_string()),
        })
        .await;

    assert_eq!(
        result.unwrap_err(),
        QuestionCreateError::ArgumentNotFound
    );
}

// ============================================================================
// DUPLICATE DETECTION
// ============================================================================

#[tokio::test]
async fn normalized_duplicates_are_scoped_to_one_assessment() {
    let authoring = authoring();
    let first = prova_aberta(&authoring, "Surgery Oral Exam").await;
    let second = prova_aberta(&authoring, "Surgery Retake Exam").await;

    authoring
        .question_creator
        .create(question_input(
            "Describe the stages of wound healing.",
            "OPEN",
            &first,
        ))
        .await
        .unwrap();

    // Same text after normalization: rejected within the assessment.
    let duplicate = authoring
        .question_creator
        .create(question_input(
            "  DESCRIBE THE STAGES OF WOUND HEALING.  ",
            "OPEN",
            &first,
        ))
        .await;
    assert_eq!(
        duplicate.unwrap_err(),
        QuestionCreateError::DuplicateQuestion
    );

    // The same text is fine on another assessment.
    authoring
        .question_creator
        .create(question_input(
            "Describe the stages of wound healing.",
            "OPEN",
            &second,
        ))
        .await
        .unwrap();
}
