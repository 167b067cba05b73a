//! Prompt construction for question generation.
//!
//! Providers do not reliably honor JSON-only response modes, so the output
//! contract is enforced through prompting: the normal variant favors
//! creativity, and the strict retry variant repeats the contract as numbered
//! hard rules at a lower sampling temperature.

use quizforge_core::GenerationRequest;

// ============================================================================
// Constants
// ============================================================================

/// Sampling temperature for the first attempt.
pub const NORMAL_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for the strict retry.
pub const STRICT_TEMPERATURE: f32 = 0.2;

/// System instruction shared by the chat-style providers.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert quiz question generator. \
    Always return strictly valid JSON. Do not include code fences.";

// ============================================================================
// Prompt Builders
// ============================================================================

/// Returns the sampling temperature for the given attempt mode.
pub fn temperature(strict: bool) -> f32 {
    if strict {
        STRICT_TEMPERATURE
    } else {
        NORMAL_TEMPERATURE
    }
}

/// Builds the generation prompt for a request.
///
/// The prompt states the exact output count, target language, optional
/// category and difficulty constraints, and a literal JSON schema sample the
/// model must reproduce.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "Generate {} high-quality multiple-choice quiz questions. \
         Output ONLY valid JSON. No extra text. Language: {}.",
        request.count, request.language
    ));

    if let Some(category) = request.category {
        parts.push(format!("Category: {category}"));
    }

    match request.difficulty.fixed() {
        Some(difficulty) => parts.push(format!("Difficulty: {difficulty}")),
        None => parts.push("Difficulty: mixed (use 'easy' | 'medium' | 'hard')".to_string()),
    }

    parts.push(
        "Each question must be thoughtful, unambiguous, and factual. \
         Ensure only one correct answer."
            .to_string(),
    );

    let schema_category = request
        .category
        .map_or_else(|| "general".to_string(), |c| c.to_string());
    let schema_difficulty = request
        .difficulty
        .fixed()
        .map_or_else(|| "easy".to_string(), |d| d.to_string());

    parts.push(format!(
        r#"JSON schema (exactly this shape and property names):
{{
  "questions": [
    {{
      "question": "string (the question text)",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": 0,
      "category": "{schema_category}",
      "difficulty": "{schema_difficulty}",
      "explanation": "string (brief explanation for the correct answer)"
    }}
  ]
}}"#
    ));

    parts.push(
        r#"Rules:
- Return only a JSON object with a "questions" array (no markdown, no code fences).
- "options" must have exactly 4 distinct strings.
- "correctAnswer" must be an integer 0..3.
- "difficulty" must be one of: "easy" | "medium" | "hard". If mixed, vary appropriately.
- Keep neutral tone; no harmful content; ensure accuracy."#
            .to_string(),
    );

    parts.join("\n")
}

/// Builds the strict-retry variant of the prompt.
///
/// Appends a numbered rule block demanding format compliance: JSON only, no
/// fences, an empty `questions` array when unsure, and safe string escaping.
pub fn build_strict_prompt(request: &GenerationRequest) -> String {
    let base = build_prompt(request);
    let hard_rules = [
        "Return ONLY a valid JSON object. No markdown, no backticks, no commentary.",
        "If you are unsure, still return a syntactically valid JSON object with an empty \"questions\" array.",
        "Do NOT wrap JSON in code fences.",
        "Ensure all strings are properly escaped and UTF-8 safe.",
    ];

    let numbered: Vec<String> = hard_rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect();

    format!("{base}\n\nSTRICT MODE:\n{}", numbered.join("\n"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::{QuizCategory, RequestedDifficulty};

    #[test]
    fn test_prompt_states_count_and_language() {
        let request = GenerationRequest::new(7).with_language("es");
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Generate 7 high-quality"));
        assert!(prompt.contains("Language: es."));
    }

    #[test]
    fn test_prompt_includes_category_constraint() {
        let request = GenerationRequest::new(3).with_category(QuizCategory::History);
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Category: history"));
        assert!(prompt.contains("\"category\": \"history\""));
    }

    #[test]
    fn test_prompt_without_category_uses_general_placeholder() {
        let prompt = build_prompt(&GenerationRequest::new(3));
        assert!(!prompt.contains("Category:"));
        assert!(prompt.contains("\"category\": \"general\""));
    }

    #[test]
    fn test_prompt_mixed_difficulty_instruction() {
        let prompt = build_prompt(&GenerationRequest::new(3));
        assert!(prompt.contains("Difficulty: mixed"));

        let fixed = build_prompt(
            &GenerationRequest::new(3).with_difficulty(RequestedDifficulty::Hard),
        );
        assert!(fixed.contains("Difficulty: hard"));
        assert!(!fixed.contains("Difficulty: mixed"));
    }

    #[test]
    fn test_strict_prompt_appends_numbered_rules() {
        let request = GenerationRequest::new(3);
        let strict = build_strict_prompt(&request);

        assert!(strict.starts_with(&build_prompt(&request)));
        assert!(strict.contains("STRICT MODE:"));
        assert!(strict.contains("1. Return ONLY a valid JSON object."));
        assert!(strict.contains("4. Ensure all strings are properly escaped"));
    }

    #[test]
    fn test_temperature_per_mode() {
        assert!((temperature(false) - 0.7).abs() < f32::EPSILON);
        assert!((temperature(true) - 0.2).abs() < f32::EPSILON);
    }
}
