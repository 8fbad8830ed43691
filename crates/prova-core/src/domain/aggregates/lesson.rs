//! Lesson read model.
//!
//! Lessons live in the course catalog; this crate only reads them to label
//! assessments. No lesson is ever created, updated or deleted from here.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::domain::{
    aggregates::locale::Locale,
    identifiers::{LessonId, ModuleId},
};

/// Localized lesson title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTranslation {
    /// Locale this translation is written in
    pub locale: Locale,
    /// Lesson title in that locale
    pub title: String,
    /// Optional lesson description in that locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LessonTranslation {
    /// Create a translation.
    #[must_use]
    pub fn new(locale: Locale, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            locale,
            title: title.into(),
            description,
        }
    }
}

/// Course-catalog lesson, read-only from this crate's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier
    pub id: LessonId,
    /// URL-safe lesson slug
    pub slug: String,
    /// Position of the lesson inside its module
    pub order: u32,
    /// Module the lesson belongs to
    pub module_id: ModuleId,
    /// Localized titles and descriptions
    pub translations: Vec<LessonTranslation>,
}

impl Lesson {
    /// Create a lesson snapshot.
    #[must_use]
    pub fn new(
        id: LessonId,
        slug: impl Into<String>,
        order: u32,
        module_id: ModuleId,
        translations: Vec<LessonTranslation>,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            order,
            module_id,
            translations,
        }
    }

    /// Resolve the human-readable title.
    ///
    /// Prefers the default (`pt`) translation, falls back to the first
    /// available translation, else an empty string.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.translations
            .iter()
            .find(|t| t.locale == Locale::Pt)
            .or_else(|| self.translations.first())
            .map(|t| t.title.clone())
            .unwrap_or_default()
    }
}
