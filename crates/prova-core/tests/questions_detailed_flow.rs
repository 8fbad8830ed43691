#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Builds an assessment through the authoring services, seeds options and
//! answers at the repository level, then checks the assembled detailed tree
//! and its wire shape.

use prova_core::domain::argument_create::{ArgumentCreateInput, ArgumentCreator};
use prova_core::domain::assessment_create::{AssessmentCreateInput, AssessmentCreator};
use prova_core::domain::question_create::{QuestionCreateInput, QuestionCreator};
use prova_core::domain::questions_detailed::{QuestionsDetailedInput, QuestionsDetailedQuery};
use prova_core::{
    Answer, AnswerRepository, Argument, Assessment, InMemoryAnswerRepository,
    InMemoryArgumentRepository, InMemoryAssessmentRepository, InMemoryLessonRepository,
    InMemoryQuestionOptionRepository, InMemoryQuestionRepository, Lesson, LessonId,
    LessonTranslation, Locale, ModuleId, Question, QuestionOption, QuestionOptionRepository,
};

// ============================================================================
// FIXTURE
// ============================================================================

/// Route service tracing through the test harness; `RUST_LOG` controls it.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Platform {
    assessments: InMemoryAssessmentRepository,
    arguments: InMemoryArgumentRepository,
    questions: InMemoryQuestionRepository,
    options: InMemoryQuestionOptionRepository,
    answers: InMemoryAnswerRepository,
    lessons: InMemoryLessonRepository,
}

impl Platform {
    fn new() -> Self {
        init_tracing();
        Self {
            assessments: InMemoryAssessmentRepository::new(),
            arguments: InMemoryArgumentRepository::new(),
            questions: InMemoryQuestionRepository::new(),
            options: InMemoryQuestionOptionRepository::new(),
            answers: InMemoryAnswerRepository::new(),
            lessons: InMemoryLessonRepository::new(),
        }
    }

    fn detailed_query(
        &self,
    ) -> QuestionsDetailedQuery<
        InMemoryAssessmentRepository,
        InMemoryLessonRepository,
        InMemoryQuestionRepository,
        InMemoryQuestionOptionRepository,
        InMemoryAnswerRepository,
        InMemoryArgumentRepository,
    > {
        QuestionsDetailedQuery::new(
            self.assessments.clone(),
            self.lessons.clone(),
            self.questions.clone(),
            self.options.clone(),
            self.answers.clone(),
            self.arguments.clone(),
        )
    }
}

async fn create_assessment(
    platform: &Platform,
    input: AssessmentCreateInput,
) -> anyhow::Result<Assessment> {
    let creator = AssessmentCreator::new(platform.assessments.clone(), platform.lessons.clone());
    Ok(creator.create(input).await?.assessment)
}

async fn create_argument(
    platform: &Platform,
    title: &str,
    assessment: &Assessment,
) -> anyhow::Result<Argument> {
    let creator = ArgumentCreator::new(platform.arguments.clone(), platform.assessments.clone());
    let output = creator
        .create(ArgumentCreateInput {
            title: title.to_string(),
            assessment_id: Some(assessment.id.to_string()),
        })
        .await?;
    Ok(output.argument)
}

async fn create_question(
    platform: &Platform,
    text: &str,
    kind: &str,
    assessment: &Assessment,
    argument_id: Option<String>,
) -> anyhow::Result<Question> {
    let creator = QuestionCreator::new(
        platform.questions.clone(),
        platform.assessments.clone(),
        platform.arguments.clone(),
    );
    let output = creator
        .create(QuestionCreateInput {
            text: text.to_string(),
            kind: kind.to_string(),
            assessment_id: assessment.id.to_string(),
            argument_id,
        })
        .await?;
    Ok(output.question)
}

fn simulado_input(lesson_id: Option<String>) -> AssessmentCreateInput {
    AssessmentCreateInput {
        title: "National Mock Exam".to_string(),
        description: None,
        kind: "SIMULADO".to_string(),
        quiz_position: None,
        passing_score: Some(60),
        time_limit_in_minutes: Some(180),
        randomize_questions: None,
        randomize_options: None,
        lesson_id,
    }
}

// ============================================================================
// FLOWS
// ============================================================================

#[tokio::test]
async fn simulado_tree_nests_arguments_questions_options_and_answers() -> anyhow::Result<()> {
    let platform = Platform::new();

    let lesson = Lesson::new(
        LessonId::new_random(),
        "pharmacology",
        4,
        ModuleId::new_random(),
        vec![
            LessonTranslation::new(Locale::Pt, "Farmacologia", None),
            LessonTranslation::new(Locale::Es, "Farmacología", None),
        ],
    );
    platform.lessons.insert(lesson.clone())?;

    let assessment =
        create_assessment(&platform, simulado_input(Some(lesson.id.to_string()))).await?;
    let kinetics = create_argument(&platform, "Pharmacokinetics", &assessment).await?;
    let dynamics = create_argument(&platform, "Pharmacodynamics", &assessment).await?;

    let absorption = create_question(
        &platform,
        "Which route of administration avoids first-pass metabolism?",
        "MULTIPLE_CHOICE",
        &assessment,
        Some(kinetics.id.to_string()),
    )
    .await?;
    let clearance = create_question(
        &platform,
        "Which organ clears most hydrophilic drugs?",
        "MULTIPLE_CHOICE",
        &assessment,
        Some(kinetics.id.to_string()),
    )
    .await?;
    create_question(
        &platform,
        "Which receptor family does adrenaline act on?",
        "MULTIPLE_CHOICE",
        &assessment,
        None,
    )
    .await?;

    let sublingual = QuestionOption::new("Sublingual", absorption.id);
    let oral = QuestionOption::new("Oral", absorption.id);
    let kidney = QuestionOption::new("Kidney", clearance.id);
    platform
        .options
        .create_many(&[sublingual.clone(), oral, kidney])
        .await?;

    let absorption_answer = Answer::new(
        absorption.id,
        Some(sublingual.id),
        "Sublingual absorption bypasses the portal circulation.",
        Vec::new(),
    )?;
    platform.answers.create(&absorption_answer).await?;

    let output = platform
        .detailed_query()
        .fetch(QuestionsDetailedInput {
            assessment_id: assessment.id.to_string(),
        })
        .await?;

    // Lesson title resolves to the Pt translation.
    let summary = output.lesson.as_ref().expect("lesson resolved");
    assert_eq!(summary.title, "Farmacologia");
    assert_eq!(summary.slug, "pharmacology");

    assert_eq!(output.total_questions, 3);
    assert_eq!(output.total_questions_with_answers, 1);

    // Flat list: everything present, options and answers embedded.
    assert_eq!(output.questions.len(), 3);
    let detailed_absorption = output
        .questions
        .iter()
        .find(|q| q.question.id == absorption.id)
        .expect("absorption question present");
    assert_eq!(detailed_absorption.options.len(), 2);
    assert_eq!(
        detailed_absorption.answer.as_ref().map(|a| a.id),
        Some(absorption_answer.id)
    );
    let detailed_clearance = output
        .questions
        .iter()
        .find(|q| q.question.id == clearance.id)
        .expect("clearance question present");
    assert_eq!(detailed_clearance.options.len(), 1);
    assert!(detailed_clearance.answer.is_none());

    // Nested view: both arguments appear, questions under their argument.
    assert_eq!(output.arguments.len(), 2);
    let kinetics_group = output
        .arguments
        .iter()
        .find(|g| g.argument.id == kinetics.id)
        .expect("kinetics group present");
    assert_eq!(kinetics_group.questions.len(), 2);
    let dynamics_group = output
        .arguments
        .iter()
        .find(|g| g.argument.id == dynamics.id)
        .expect("dynamics group present");
    assert!(dynamics_group.questions.is_empty());

    Ok(())
}

#[tokio::test]
async fn repeated_fetches_return_structurally_equal_trees() -> anyhow::Result<()> {
    let platform = Platform::new();
    let assessment = create_assessment(&platform, simulado_input(None)).await?;
    let argument = create_argument(&platform, "Pharmacokinetics", &assessment).await?;
    let question = create_question(
        &platform,
        "Which route of administration avoids first-pass metabolism?",
        "MULTIPLE_CHOICE",
        &assessment,
        Some(argument.id.to_string()),
    )
    .await?;
    let option = QuestionOption::new("Sublingual", question.id);
    platform.options.create_many(&[option.clone()]).await?;
    let answer = Answer::new(
        question.id,
        Some(option.id),
        "Sublingual absorption bypasses the portal circulation.",
        Vec::new(),
    )?;
    platform.answers.create(&answer).await?;

    let request = || QuestionsDetailedInput {
        assessment_id: assessment.id.to_string(),
    };
    let first = platform.detailed_query().fetch(request()).await?;
    let second = platform.detailed_query().fetch(request()).await?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn quiz_tree_has_no_argument_groups() -> anyhow::Result<()> {
    let platform = Platform::new();

    let assessment = create_assessment(
        &platform,
        AssessmentCreateInput {
            title: "Anatomy Quiz".to_string(),
            description: None,
            kind: "QUIZ".to_string(),
            quiz_position: Some("BEFORE_LESSON".to_string()),
            passing_score: Some(70),
            time_limit_in_minutes: None,
            randomize_questions: None,
            randomize_options: None,
            lesson_id: None,
        },
    )
    .await?;

    let question = create_question(
        &platform,
        "Which bone is the longest in the human body?",
        "MULTIPLE_CHOICE",
        &assessment,
        None,
    )
    .await?;
    let femur = QuestionOption::new("Femur", question.id);
    platform.options.create_many(&[femur.clone()]).await?;
    let answer = Answer::new(question.id, Some(femur.id), "The femur.", Vec::new())?;
    platform.answers.create(&answer).await?;

    let output = platform
        .detailed_query()
        .fetch(QuestionsDetailedInput {
            assessment_id: assessment.id.to_string(),
        })
        .await?;

    assert!(output.arguments.is_empty());
    assert!(output.lesson.is_none());
    assert_eq!(output.total_questions, 1);
    assert_eq!(output.total_questions_with_answers, 1);

    // Wire shape: camelCase keys, flattened question fields.
    let value = serde_json::to_value(&output)?;
    assert_eq!(value["assessment"]["type"], "QUIZ");
    assert_eq!(value["assessment"]["quizPosition"], "BEFORE_LESSON");
    assert_eq!(value["totalQuestions"], 1);
    assert_eq!(value["totalQuestionsWithAnswers"], 1);
    assert_eq!(
        value["questions"][0]["text"],
        "Which bone is the longest in the human body?"
    );
    assert_eq!(value["questions"][0]["options"][0]["text"], "Femur");
    assert_eq!(
        value["questions"][0]["answer"]["correctOptionId"],
        femur.id.to_string()
    );

    Ok(())
}
