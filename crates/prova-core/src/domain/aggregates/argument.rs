//! Argument aggregate root.
//!
//! An Argument is a thematic bucket for questions (for example "Pediatrics"
//! inside a medical simulado). It may exist on its own or attached to one
//! assessment by id.
//!
//! # Invariants
//!
//! 1. Titles are globally unique by exact, case-sensitive match (enforced at
//!    the use-case and persistence boundaries, not here)
//! 2. The stored title is the caller's input verbatim
//! 3. Timestamps are monotonic (`updated_at` >= `created_at`)

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::{ArgumentId, AssessmentId};

// ============================================================================
// ARGUMENT AGGREGATE ROOT
// ============================================================================

/// Argument aggregate root.
///
/// Construction is total: uniqueness and length rules live in the creation
/// use case, which runs before an `Argument` ever exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// Unique argument identifier
    pub id: ArgumentId,
    /// Argument title, stored verbatim
    pub title: String,
    /// Owning assessment, if any (weak reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<AssessmentId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Argument {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new argument with a fresh identifier.
    #[must_use]
    pub fn new(title: impl Into<String>, assessment_id: Option<AssessmentId>) -> Self {
        let now = Utc::now();
        Self {
            id: ArgumentId::new_random(),
            title: title.into(),
            assessment_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct an argument from persisted data.
    #[must_use]
    pub fn reconstruct(
        id: ArgumentId,
        title: impl Into<String>,
        assessment_id: Option<AssessmentId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            assessment_id,
            created_at,
            updated_at,
        }
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    /// Check if this argument belongs to the given assessment.
    #[must_use]
    pub fn belongs_to(&self, assessment_id: AssessmentId) -> bool {
        self.assessment_id == Some(assessment_id)
    }

    /// Check if this argument is attached to any assessment.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.assessment_id.is_some()
    }

    // ========================================================================
    // UPDATE METHODS
    // ========================================================================

    /// Replace the title and refresh the modification timestamp.
    ///
    /// Callers validate the new title first; the aggregate stores what it is
    /// given.
    #[must_use]
    pub fn rename(&self, new_title: impl Into<String>) -> Self {
        Self {
            title: new_title.into(),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Refresh `updated_at` without changing anything else.
    #[must_use]
    pub fn touch(&self) -> Self {
        Self {
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
