#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property-based tests for the argument title rules.
//!
//! Invariants covered:
//! - any title whose trimmed length is 3..=255 characters is accepted and
//!   stored verbatim, unicode, emoji, control characters and padding
//!   included
//! - titles trimming below 3 characters or exceeding 255 raw characters are
//!   rejected with the matching field detail

use proptest::prelude::*;

use prova_core::domain::argument_create::{
    validate_create_input, ArgumentCreateError, ArgumentCreateInput, ArgumentCreator,
};
use prova_core::{ArgumentRepository, InMemoryArgumentRepository, InMemoryAssessmentRepository};

/// Shared proptest config for the validation-only properties.
fn validation_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 512,
        ..ProptestConfig::default()
    }
}

/// Smaller config for properties that run the full async create flow.
fn creation_config() -> ProptestConfig {
    ProptestConfig {
        cases: 32,
        max_shrink_iters: 128,
        ..ProptestConfig::default()
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Non-whitespace characters a title core can be built from: ASCII,
/// accented letters, an emoji block and a control character.
fn core_char_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        proptest::char::range('a', 'z'),
        proptest::char::range('A', 'Z'),
        proptest::char::range('0', '9'),
        proptest::char::range('À', 'ÿ'),
        proptest::char::range('\u{1F600}', '\u{1F64F}'),
        Just('-'),
        Just('\''),
        Just('\u{7}'),
    ]
}

/// A title that passes validation after trimming: a 3..=200 character core
/// with up to 20 spaces of padding on each side.
fn valid_title_strategy() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(core_char_strategy(), 3..=200),
        0..=20_usize,
        0..=20_usize,
    )
        .prop_map(|(core, left, right)| {
            let mut title = " ".repeat(left);
            title.extend(core);
            title.push_str(&" ".repeat(right));
            title
        })
}

/// A title that trims below the 3 character minimum.
fn too_short_title_strategy() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(core_char_strategy(), 0..=2),
        0..=20_usize,
        0..=20_usize,
    )
        .prop_map(|(core, left, right)| {
            let mut title = " ".repeat(left);
            title.extend(core);
            title.push_str(&" ".repeat(right));
            title
        })
}

/// A title over the 255 raw character maximum.
fn too_long_title_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(core_char_strategy(), 256..=400)
        .prop_map(|core| core.into_iter().collect())
}

fn input(title: String) -> ArgumentCreateInput {
    ArgumentCreateInput {
        title,
        assessment_id: None,
    }
}

fn details_of(result: Result<Option<prova_core::AssessmentId>, ArgumentCreateError>) -> Vec<String> {
    match result {
        Err(ArgumentCreateError::InvalidInput { details, .. }) => details,
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ============================================================================
// VALIDATION PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(validation_config())]

    /// Every title with a 3..=200 character core validates, whatever the
    /// characters and padding.
    #[test]
    fn prop_valid_titles_pass_validation(title in valid_title_strategy()) {
        prop_assert!(validate_create_input(&input(title)).is_ok());
    }

    /// Titles trimming below three characters carry the minimum-length
    /// detail.
    #[test]
    fn prop_short_titles_report_the_minimum(title in too_short_title_strategy()) {
        let details = details_of(validate_create_input(&input(title)));
        prop_assert!(details
            .contains(&"title: Argument title must be at least 3 characters long".to_string()));
    }

    /// Titles over 255 raw characters carry the maximum-length detail.
    #[test]
    fn prop_long_titles_report_the_maximum(title in too_long_title_strategy()) {
        let details = details_of(validate_create_input(&input(title)));
        prop_assert!(details
            .contains(&"title: Argument title must be at most 255 characters long".to_string()));
    }
}

// ============================================================================
// STORAGE PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(creation_config())]

    /// A valid title is stored verbatim; no trimming or rewriting happens
    /// on the way to the repository.
    #[test]
    fn prop_valid_titles_are_stored_verbatim(title in valid_title_strategy()) {
        tokio_test::block_on(async {
            let arguments = InMemoryArgumentRepository::new();
            let creator =
                ArgumentCreator::new(arguments.clone(), InMemoryAssessmentRepository::new());

            let output = creator
                .create(input(title.clone()))
                .await
                .expect("valid title creates");
            prop_assert_eq!(&output.argument.title, &title);

            let stored = arguments
                .find_by_title(&title)
                .await
                .expect("stored under the verbatim title");
            prop_assert_eq!(stored.id, output.argument.id);
            Ok(())
        })?;
    }
}
