use std::fmt;

use crate::errors::WikiError;

/// Returns true iff `candidate` is one or more ASCII letters or digits.
///
/// Titles are used verbatim as file names, so anything outside this set
/// (separators, dots, whitespace) is refused up front.
pub fn is_valid_title(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A page title that has passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

impl Title {
    /// Validate a candidate title
    pub fn parse(candidate: impl Into<String>) -> Result<Self, WikiError> {
        let candidate = candidate.into();
        if is_valid_title(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(WikiError::InvalidTitle(candidate))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
