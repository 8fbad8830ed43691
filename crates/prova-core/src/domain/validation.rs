//! Field-violation collection for invalid-input errors.
//!
//! Shape validation never fails fast on the first broken rule: every rule
//! runs, every failure is recorded as a `"field: message"` string, and the
//! caller turns the collected details into its own invalid-input error. A
//! client fixing a request sees all its problems at once.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

/// Accumulator for `"field: message"` validation details.
///
/// # Example
///
/// ```rust
/// use prova_core::domain::validation::FieldViolations;
///
/// let mut violations = FieldViolations::new();
/// violations.push("title", "Title must be at least 3 characters long");
/// violations.push("page", "Page must be at least 1");
///
/// assert_eq!(
///     violations.finish(),
///     Err(vec![
///         "title: Title must be at least 3 characters long".to_string(),
///         "page: Page must be at least 1".to_string(),
///     ])
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations {
    details: Vec<String>,
}

impl FieldViolations {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            details: Vec::new(),
        }
    }

    /// Record a violation against a field.
    pub fn push(&mut self, field: &str, message: &str) {
        self.details.push(format!("{field}: {message}"));
    }

    /// Check whether any violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Consume the collector: `Ok(())` when clean, the detail list otherwise.
    ///
    /// # Errors
    ///
    /// Returns the collected `"field: message"` strings, in insertion order,
    /// if any violation was recorded.
    pub fn finish(self) -> Result<(), Vec<String>> {
        if self.details.is_empty() {
            Ok(())
        } else {
            Err(self.details)
        }
    }
}
