//! Model output normalization.
//!
//! Turns free-form model output into validated [`Question`] batches. The
//! contract is all-or-nothing: one malformed entry rejects the whole batch,
//! so callers can retry cleanly instead of merging partial results.
//!
//! Providers sometimes wrap JSON in Markdown code fences despite explicit
//! instructions not to, so fences are stripped before parsing.

use quizforge_core::{Difficulty, Question, QuizCategory};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::error::ProviderError;

// ============================================================================
// Fence Stripping
// ============================================================================

/// Matches ```json ... ``` or ``` ... ``` fenced blocks.
fn fence_regex() -> &'static Regex {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    FENCE_RE.get_or_init(|| {
        Regex::new(r"(?is)```(?:json)?\s*([\s\S]*?)```").expect("fence regex is valid")
    })
}

/// Removes Markdown code-fence wrappers, keeping the fenced content.
///
/// Text without fences is returned unchanged.
pub fn strip_code_fences(text: &str) -> String {
    let re = fence_regex();
    if re.is_match(text) {
        re.replace_all(text, "$1").into_owned()
    } else {
        text.to_string()
    }
}

// ============================================================================
// Question Parsing
// ============================================================================

/// Parses model output into a validated question batch.
///
/// # Errors
///
/// - [`ProviderError::InvalidJson`] when the (fence-stripped) text is not a
///   JSON document
/// - [`ProviderError::MissingQuestions`] when the object has no `questions`
///   array
/// - [`ProviderError::MalformedEntry`] when any entry violates the contract;
///   no partial batch is ever returned
pub fn parse_questions(text: &str) -> Result<Vec<Question>, ProviderError> {
    let cleaned = strip_code_fences(text);
    let cleaned = cleaned.trim();

    debug!(len = cleaned.len(), "Parsing model output");

    let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, "Model output is not valid JSON");
        ProviderError::InvalidJson(e.to_string())
    })?;

    let entries = parsed
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(ProviderError::MissingQuestions)?;

    let mut questions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let id = u32::try_from(index + 1).map_err(|_| {
            ProviderError::MalformedEntry(format!("entry {index}: batch too large"))
        })?;
        questions.push(parse_entry(entry, index, id)?);
    }

    debug!(count = questions.len(), "Model output parsed");
    Ok(questions)
}

/// Validates one raw entry into a canonical [`Question`].
///
/// Ids are assigned locally and sequentially; any id the provider emitted is
/// ignored.
fn parse_entry(entry: &Value, index: usize, id: u32) -> Result<Question, ProviderError> {
    let question = entry
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ProviderError::MalformedEntry(format!("entry {index}: missing \"question\""))
        })?;

    let options = entry
        .get("options")
        .and_then(Value::as_array)
        .filter(|opts| opts.len() == 4)
        .ok_or_else(|| {
            ProviderError::MalformedEntry(format!(
                "entry {index}: \"options\" must be an array of exactly 4 strings"
            ))
        })?;
    let options: Vec<String> = options.iter().map(coerce_to_string).collect();

    let correct_answer = entry
        .get("correctAnswer")
        .and_then(Value::as_i64)
        .filter(|n| (0..=3).contains(n))
        .ok_or_else(|| {
            ProviderError::MalformedEntry(format!(
                "entry {index}: \"correctAnswer\" must be an integer 0..3"
            ))
        })?;

    // Cosmetic fields are lenient: unknown categories and difficulties are
    // coerced to defaults instead of failing the batch.
    let category = entry
        .get("category")
        .and_then(Value::as_str)
        .map(QuizCategory::normalize)
        .unwrap_or_default();

    let difficulty = entry
        .get("difficulty")
        .and_then(Value::as_str)
        .and_then(Difficulty::from_label)
        .unwrap_or_default();

    let explanation = entry
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(Question {
        id,
        question: question.to_string(),
        options,
        correct_answer: usize::try_from(correct_answer).expect("bounded above by 3"),
        category,
        difficulty,
        explanation,
    })
}

/// Coerces a JSON value to a string the way the wire contract expects:
/// strings pass through, scalars are stringified.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_BATCH: &str = r#"{
        "questions": [
            {
                "question": "What is the capital of France?",
                "options": ["Lyon", "Paris", "Marseille", "Nice"],
                "correctAnswer": 1,
                "category": "geography",
                "difficulty": "easy",
                "explanation": "Paris has been the capital since 987."
            },
            {
                "question": "What is 12 * 12?",
                "options": ["122", "124", "144", "148"],
                "correctAnswer": 2,
                "category": "math",
                "difficulty": "medium",
                "explanation": ""
            },
            {
                "question": "Who wrote Hamlet?",
                "options": ["Marlowe", "Shakespeare", "Jonson", "Webster"],
                "correctAnswer": 1,
                "category": "literature",
                "difficulty": "easy",
                "explanation": "Written around 1600."
            }
        ]
    }"#;

    #[test]
    fn test_parse_valid_batch_in_order_with_sequential_ids() {
        let questions = parse_questions(VALID_BATCH).unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(questions[0].question, "What is the capital of France?");
        assert_eq!(questions[1].correct_answer, 2);
        for q in &questions {
            assert_eq!(q.options.len(), 4);
            assert!(q.correct_answer <= 3);
        }
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let fenced = format!("```json\n{VALID_BATCH}\n```");
        assert_eq!(
            parse_questions(&fenced).unwrap(),
            parse_questions(VALID_BATCH).unwrap()
        );

        let plain_fence = format!("```\n{VALID_BATCH}\n```");
        assert_eq!(
            parse_questions(&plain_fence).unwrap(),
            parse_questions(VALID_BATCH).unwrap()
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = parse_questions("not json at all").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidJson(_)));
    }

    #[test]
    fn test_missing_questions_array_rejected() {
        let err = parse_questions(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingQuestions));

        let err = parse_questions(r#"{"questions": "nope"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingQuestions));
    }

    #[test]
    fn test_three_options_rejects_whole_batch() {
        let json = r#"{
            "questions": [
                {
                    "question": "Fine question?",
                    "options": ["a", "b", "c", "d"],
                    "correctAnswer": 0
                },
                {
                    "question": "Broken question?",
                    "options": ["a", "b", "c"],
                    "correctAnswer": 0
                }
            ]
        }"#;

        let err = parse_questions(json).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedEntry(_)));
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let json = r#"{
            "questions": [{
                "question": "Q?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 4
            }]
        }"#;
        let err = parse_questions(json).unwrap_err();
        assert!(err.to_string().contains("correctAnswer"));
    }

    #[test]
    fn test_non_integer_answer_rejected() {
        let json = r#"{
            "questions": [{
                "question": "Q?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 1.5
            }]
        }"#;
        let err = parse_questions(json).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedEntry(_)));
    }

    #[test]
    fn test_unknown_category_coerced_to_default() {
        let json = r#"{
            "questions": [{
                "question": "Q?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 0,
                "category": "unknown-xyz"
            }]
        }"#;
        let questions = parse_questions(json).unwrap();
        assert_eq!(questions[0].category, QuizCategory::Science);
    }

    #[test]
    fn test_missing_optional_fields_defaulted() {
        let json = r#"{
            "questions": [{
                "question": "Q?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 3
            }]
        }"#;
        let questions = parse_questions(json).unwrap();
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[0].explanation, "");
        assert_eq!(questions[0].category, QuizCategory::Science);
    }

    #[test]
    fn test_empty_questions_array_is_ok() {
        let questions = parse_questions(r#"{"questions": []}"#).unwrap();
        assert!(questions.is_empty());
    }
}
