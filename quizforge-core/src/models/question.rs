//! Quiz question types.
//!
//! This module contains the canonical, validated question shape used by the
//! quiz application, independent of any provider's native response format:
//!
//! - [`Question`] - A single multiple-choice question
//! - [`QuizCategory`] - The fixed set of six quiz categories
//! - [`Difficulty`] - Per-question difficulty level

use serde::{Deserialize, Serialize};

// ============================================================================
// Quiz Category
// ============================================================================

/// The fixed set of quiz categories.
///
/// Generated questions carry one of these; unknown labels from a provider are
/// coerced to [`QuizCategory::Science`] rather than rejected, since the
/// category is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizCategory {
    /// History questions.
    History,
    /// Mathematics questions.
    Math,
    /// Science questions (also the fallback for unknown labels).
    #[default]
    Science,
    /// Geography questions.
    Geography,
    /// Literature questions.
    Literature,
    /// Sports questions.
    Sports,
}

impl QuizCategory {
    /// Returns all categories.
    pub fn all() -> &'static [QuizCategory] {
        &[
            Self::History,
            Self::Math,
            Self::Science,
            Self::Geography,
            Self::Literature,
            Self::Sports,
        ]
    }

    /// Returns the lowercase label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Math => "math",
            Self::Science => "science",
            Self::Geography => "geography",
            Self::Literature => "literature",
            Self::Sports => "sports",
        }
    }

    /// Parses a label (case-insensitive) into a category.
    ///
    /// Returns `None` for labels outside the known set.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        Self::all().iter().find(|c| c.label() == lower).copied()
    }

    /// Normalizes an arbitrary provider-supplied label into a category,
    /// coercing anything unknown to the default.
    pub fn normalize(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl std::fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Difficulty
// ============================================================================

/// Per-question difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy question (also the fallback when a provider omits the field).
    #[default]
    Easy,
    /// Medium question.
    Medium,
    /// Hard question.
    Hard,
}

impl Difficulty {
    /// Returns the lowercase label for this difficulty.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parses a label (case-insensitive) into a difficulty.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Question
// ============================================================================

/// A validated multiple-choice quiz question.
///
/// Every field has been validated before the value is exposed to callers:
/// `options` always holds exactly 4 entries and `correct_answer` is always a
/// valid index into it. Ids are assigned sequentially at parse time and are
/// never taken from provider output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Sequential id starting at 1, assigned locally.
    pub id: u32,
    /// The question text (non-empty).
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// 0-based index of the correct option, in `[0, 3]`.
    pub correct_answer: usize,
    /// Question category.
    pub category: QuizCategory,
    /// Question difficulty.
    pub difficulty: Difficulty,
    /// Brief explanation for the correct answer (possibly empty).
    pub explanation: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for cat in QuizCategory::all() {
            assert_eq!(QuizCategory::from_label(cat.label()), Some(*cat));
        }
    }

    #[test]
    fn test_category_normalize_unknown() {
        assert_eq!(QuizCategory::normalize("unknown-xyz"), QuizCategory::Science);
        assert_eq!(QuizCategory::normalize(""), QuizCategory::Science);
        assert_eq!(QuizCategory::normalize("  History "), QuizCategory::History);
    }

    #[test]
    fn test_difficulty_from_label() {
        assert_eq!(Difficulty::from_label("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("MEDIUM"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_label("brutal"), None);
    }

    #[test]
    fn test_question_serde_camel_case() {
        let q = Question {
            id: 1,
            question: "What is 2 + 2?".to_string(),
            options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
            correct_answer: 1,
            category: QuizCategory::Math,
            difficulty: Difficulty::Easy,
            explanation: String::new(),
        };

        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"correctAnswer\":1"));
        assert!(json.contains("\"category\":\"math\""));

        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
