//! Locale value object for translated content.
//!
//! Answers and lessons carry per-locale translations; [`Locale`] is the key.
//! `pt` is the platform default and drives fallback resolution.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Supported content locales.
///
/// Wire form is the lowercase two-letter code (`pt`, `it`, `es`), both for
/// serde payloads and for `Display`/`FromStr` round-trips.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    /// Portuguese, the platform default
    #[default]
    Pt,
    /// Italian
    It,
    /// Spanish
    Es,
}

// ============================================================================
// TESTS
// ============================================================================
