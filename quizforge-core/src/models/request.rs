//! Generation request types.
//!
//! A [`GenerationRequest`] describes what to ask a provider for: how many
//! questions, an optional category, a difficulty constraint, and the target
//! language. Requests are immutable once constructed.

use serde::{Deserialize, Serialize};

use super::question::{Difficulty, QuizCategory};

// ============================================================================
// Requested Difficulty
// ============================================================================

/// Difficulty constraint for a generation request.
///
/// Unlike [`Difficulty`], a request may ask for a mix, in which case the
/// prompt instructs the model to vary difficulty per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestedDifficulty {
    /// Only easy questions.
    Easy,
    /// Only medium questions.
    Medium,
    /// Only hard questions.
    Hard,
    /// A mix of difficulties, chosen by the model.
    #[default]
    Mixed,
}

impl RequestedDifficulty {
    /// Returns the fixed difficulty, or `None` for mixed.
    pub fn fixed(&self) -> Option<Difficulty> {
        match self {
            Self::Easy => Some(Difficulty::Easy),
            Self::Medium => Some(Difficulty::Medium),
            Self::Hard => Some(Difficulty::Hard),
            Self::Mixed => None,
        }
    }

    /// Returns the lowercase label for this constraint.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Mixed => "mixed",
        }
    }

    /// Parses a label (case-insensitive) into a constraint.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestedDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Generation Request
// ============================================================================

/// A request to generate quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Number of questions to generate (always at least 1).
    pub count: usize,
    /// Optional category constraint.
    pub category: Option<QuizCategory>,
    /// Difficulty constraint.
    pub difficulty: RequestedDifficulty,
    /// Target language as a locale code (e.g. "en", "es", "fr").
    pub language: String,
}

impl GenerationRequest {
    /// Creates a request for `count` questions with default constraints
    /// (no category, mixed difficulty, English).
    ///
    /// A zero count is clamped to 1.
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            category: None,
            difficulty: RequestedDifficulty::Mixed,
            language: "en".to_string(),
        }
    }

    /// Sets the category constraint.
    pub fn with_category(mut self, category: QuizCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the difficulty constraint.
    pub fn with_difficulty(mut self, difficulty: RequestedDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the target language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(5)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_count_clamped() {
        assert_eq!(GenerationRequest::new(0).count, 1);
        assert_eq!(GenerationRequest::new(3).count, 3);
    }

    #[test]
    fn test_request_builder() {
        let req = GenerationRequest::new(3)
            .with_category(QuizCategory::Science)
            .with_difficulty(RequestedDifficulty::Hard)
            .with_language("es");

        assert_eq!(req.category, Some(QuizCategory::Science));
        assert_eq!(req.difficulty, RequestedDifficulty::Hard);
        assert_eq!(req.language, "es");
    }

    #[test]
    fn test_requested_difficulty_fixed() {
        assert_eq!(RequestedDifficulty::Hard.fixed(), Some(Difficulty::Hard));
        assert_eq!(RequestedDifficulty::Mixed.fixed(), None);
    }
}
