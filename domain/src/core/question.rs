//! Question value object

use serde::{Deserialize, Serialize};

/// A business question posed by the user (Value Object)
///
/// The content is kept exactly as given. Blank questions are allowed; the
/// classifier is expected to label them "not feasible".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when the question holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}
