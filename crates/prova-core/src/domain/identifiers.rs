//! Semantic newtypes for domain identifiers
//!
//! # Parse-at-Boundaries Pattern
//!
//! Each identifier type:
//! - Validates its input on construction (parse-once pattern)
//! - Trims whitespace before validation (boundary sanitization)
//! - Cannot represent invalid states
//! - Provides safe access to the underlying UUID
//! - Implements serde serialization/deserialization with validation
//!
//! # Single Source of Truth
//!
//! This module is the canonical implementation of identifier types. Use-case
//! modules and repositories consume these types rather than raw strings, so a
//! malformed identifier can only be rejected in one place.
//!
//! # Unified Error Type
//!
//! All identifier validation uses a single `IdentifierError` enum:
//! - **`Empty`**: Identifier is empty or whitespace-only
//! - **`InvalidUuid`**: Identifier is not a valid UUID
//!
//! # Weak References
//!
//! [`LessonId`] and [`ModuleId`] point into the course catalog, which this
//! crate never writes. They carry the same validation as the assessment-side
//! identifiers but no entity in this crate owns the records they name.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// UNIFIED IDENTIFIER ERROR
// ============================================================================

/// Unified error type for all identifier validation.
///
/// All identifier types use this single error type, making error handling
/// consistent across the domain layer.
///
/// # Error Categories
///
/// 1. **`Empty`**: Identifier is empty or whitespace-only
/// 2. **`InvalidUuid`**: Identifier does not parse as a UUID
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty or contains only whitespace
    #[error("identifier cannot be empty")]
    Empty,

    /// Identifier is not a valid UUID
    #[error("invalid identifier: {details}")]
    InvalidUuid {
        /// Human-readable explanation from the UUID parser
        details: String,
    },
}

impl IdentifierError {
    /// Create an `Empty` error variant
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create an `InvalidUuid` error variant
    #[must_use]
    pub fn invalid_uuid(details: impl Into<String>) -> Self {
        Self::InvalidUuid {
            details: details.into(),
        }
    }

    /// Check if this is an `Empty` error
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if this is an `InvalidUuid` error
    #[must_use]
    pub const fn is_invalid_uuid(&self) -> bool {
        matches!(self, Self::InvalidUuid { .. })
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a UUID identifier string
///
/// Rules:
/// - Trimmed input must be non-empty
/// - Trimmed input must parse as a UUID
fn validate_uuid(s: &str) -> Result<Uuid, IdentifierError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::empty());
    }

    Uuid::try_parse(trimmed).map_err(|e| IdentifierError::invalid_uuid(e.to_string()))
}

// ============================================================================
// IDENTIFIER TYPES
// ============================================================================

/// A validated assessment identifier
///
/// # Construction
///
/// ```rust
/// use prova_core::AssessmentId;
///
/// // Parse and validate
/// let id = AssessmentId::parse("550e8400-e29b-41d4-a716-446655440000")?;
/// assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
/// # Ok::<(), prova_core::IdentifierError>(())
/// ```
///
/// # Guarantees
///
/// - Always a valid UUID
/// - Whitespace trimmed before validation
/// - Cheap to copy and hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    /// Parse and validate an assessment identifier (trims whitespace first)
    ///
    /// This follows the "parse at boundaries" principle:
    /// - Trims whitespace from input
    /// - Validates once at construction
    /// - Cannot represent invalid states
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for AssessmentId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for AssessmentId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for AssessmentId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AssessmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AssessmentId> for String {
    #[allow(clippy::use_self)] // Self refers to String, not AssessmentId
    fn from(id: AssessmentId) -> String {
        id.0.to_string()
    }
}

/// A validated argument identifier
///
/// Arguments group questions thematically and may exist with or without an
/// owning assessment, so this identifier shows up both as a primary key and
/// as an optional foreign key.
///
/// # Guarantees
///
/// - Always a valid UUID
/// - Whitespace trimmed before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ArgumentId(Uuid);

impl ArgumentId {
    /// Parse and validate an argument identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for ArgumentId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for ArgumentId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for ArgumentId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ArgumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ArgumentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ArgumentId> for String {
    #[allow(clippy::use_self)] // Self refers to String, not ArgumentId
    fn from(id: ArgumentId) -> String {
        id.0.to_string()
    }
}

/// A validated question identifier
///
/// # Guarantees
///
/// - Always a valid UUID
/// - Whitespace trimmed before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Parse and validate a question identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for QuestionId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for QuestionId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for QuestionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for QuestionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A validated question option identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct QuestionOptionId(Uuid);

impl QuestionOptionId {
    /// Parse and validate a question option identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for QuestionOptionId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for QuestionOptionId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for QuestionOptionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for QuestionOptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for QuestionOptionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A validated answer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct AnswerId(Uuid);

impl AnswerId {
    /// Parse and validate an answer identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for AnswerId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for AnswerId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for AnswerId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AnswerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A validated lesson identifier (weak reference into the course catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct LessonId(Uuid);

impl LessonId {
    /// Parse and validate a lesson identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for LessonId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for LessonId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for LessonId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for LessonId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A validated module identifier (weak reference into the course catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ModuleId(Uuid);

impl ModuleId {
    /// Parse and validate a module identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the identifier is empty or not a UUID.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        validate_uuid(s).map(Self)
    }

    /// Generate a fresh random (v4) identifier
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl TryFrom<String> for ModuleId {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for ModuleId {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl std::str::FromStr for ModuleId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ModuleId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    const VALID: &str = "550e8400-e29b-41d4-a716-446655440000";

    // ===== AssessmentId Tests =====

    #[test]
    fn test_valid_assessment_id() {
        let id = AssessmentId::parse(VALID).expect("valid uuid");
        assert_eq!(id.to_string(), VALID);
    }

    #[test]
    fn test_assessment_id_trims_whitespace() {
        // Trim-then-validate: whitespace is trimmed, then validated
        let id = AssessmentId::parse("  550e8400-e29b-41d4-a716-446655440000  ")
            .expect("valid after trim");
        assert_eq!(id.to_string(), VALID);
    }

    #[test]
    fn test_assessment_id_whitespace_only_is_invalid() {
        // Whitespace-only strings become empty after trimming
        let result = AssessmentId::parse("   ");
        assert!(matches!(result, Err(IdentifierError::Empty)));
    }

    #[test]
    fn test_invalid_assessment_id_empty() {
        let result = AssessmentId::parse("");
        assert!(matches!(result, Err(IdentifierError::Empty)));
    }

    #[test]
    fn test_invalid_assessment_id_not_a_uuid() {
        let result = AssessmentId::parse("not-a-uuid");
        assert!(matches!(result, Err(IdentifierError::InvalidUuid { .. })));
    }

    #[test]
    fn test_assessment_id_new_random_is_unique() {
        let a = AssessmentId::new_random();
        let b = AssessmentId::new_random();
        assert_ne!(a, b);
    }

    #[test]
    fn test_assessment_id_from_str() {
        let id: AssessmentId = VALID.parse().expect("valid uuid");
        assert_eq!(id.to_string(), VALID);
    }

    #[test]
    fn test_assessment_id_serde_round_trip() {
        let id = AssessmentId::parse(VALID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{VALID}\""));

        let back: AssessmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_assessment_id_serde_rejects_invalid() {
        let result: Result<AssessmentId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());

        let result: Result<AssessmentId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    // ===== ArgumentId Tests =====

    #[test]
    fn test_valid_argument_id() {
        assert!(ArgumentId::parse(VALID).is_ok());
    }

    #[test]
    fn test_invalid_argument_id() {
        assert!(ArgumentId::parse("").is_err());
        assert!(ArgumentId::parse("123").is_err());
    }

    #[test]
    fn test_argument_id_into_string() {
        let id = ArgumentId::parse(VALID).unwrap();
        let s: String = id.into();
        assert_eq!(s, VALID);
    }

    // ===== QuestionId Tests =====

    #[test]
    fn test_valid_question_id() {
        assert!(QuestionId::parse(VALID).is_ok());
    }

    #[test]
    fn test_invalid_question_id() {
        assert!(QuestionId::parse("q-123").is_err());
    }

    // ===== QuestionOptionId / AnswerId Tests =====

    #[test]
    fn test_valid_option_and_answer_ids() {
        assert!(QuestionOptionId::parse(VALID).is_ok());
        assert!(AnswerId::parse(VALID).is_ok());
    }

    #[test]
    fn test_invalid_option_and_answer_ids() {
        assert!(QuestionOptionId::parse(" ").is_err());
        assert!(AnswerId::parse("xyz").is_err());
    }

    // ===== LessonId / ModuleId Tests =====

    #[test]
    fn test_valid_catalog_ids() {
        assert!(LessonId::parse(VALID).is_ok());
        assert!(ModuleId::parse(VALID).is_ok());
    }

    #[test]
    fn test_catalog_ids_from_uuid() {
        let raw = Uuid::new_v4();
        let lesson = LessonId::from(raw);
        let module = ModuleId::from(raw);
        assert_eq!(lesson.as_uuid(), raw);
        assert_eq!(module.as_uuid(), raw);
    }

    #[test]
    fn test_error_predicates() {
        assert!(IdentifierError::empty().is_empty());
        assert!(IdentifierError::invalid_uuid("bad length").is_invalid_uuid());
        assert!(!IdentifierError::invalid_uuid("bad length").is_empty());
    }
}
