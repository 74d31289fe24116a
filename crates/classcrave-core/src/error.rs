//! Typed parse errors.
//!
//! Generation and grading never fail; these errors only surface when callers
//! parse identifiers (template ids, attempt policies) from text and want to
//! know why a value was rejected.

use thiserror::Error;

/// Errors raised when parsing practice identifiers from strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PracticeError {
    /// The template id does not name a known question family.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The attempt policy is neither `once` nor `unlimited`.
    #[error("unknown attempt policy: {0}")]
    UnknownAttemptPolicy(String),
}

impl PracticeError {
    /// The offending input value.
    pub fn value(&self) -> &str {
        match self {
            PracticeError::UnknownTemplate(v) | PracticeError::UnknownAttemptPolicy(v) => v,
        }
    }
}
