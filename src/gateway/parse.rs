// src/gateway/parse.rs

use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;

use crate::{error::AppError, models::question::QuizQuestion};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("code fence pattern is valid"));

/// Removes markdown code fences (```json and ```) and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Parses the service text into exactly `count` validated questions.
///
/// Extra questions are dropped; fewer than `count` is a failure.
pub fn parse_questions(raw: &str, count: usize) -> Result<Vec<QuizQuestion>, AppError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(AppError::Generation("Empty quiz response".to_string()));
    }

    let mut questions: Vec<QuizQuestion> = serde_json::from_str(&cleaned)
        .map_err(|e| AppError::Generation(format!("Quiz response is not valid JSON: {}", e)))?;

    for (position, question) in questions.iter().enumerate() {
        question.validate().map_err(|e| {
            AppError::Generation(format!("Question {} violates the contract: {}", position + 1, e))
        })?;
    }

    if questions.len() < count {
        return Err(AppError::Generation(format!(
            "Expected {} questions, received {}",
            count,
            questions.len()
        )));
    }
    if questions.len() > count {
        tracing::warn!(
            "Service returned {} questions, keeping the first {}",
            questions.len(),
            count
        );
        questions.truncate(count);
    }

    Ok(questions)
}
