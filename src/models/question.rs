// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of options every generated question must carry.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question as produced by the AI gateway.
///
/// Field names follow the JSON shape requested from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// The question text, typically a sentence with a blank.
    #[serde(rename = "question")]
    #[validate(custom(function = validate_not_blank))]
    pub question_text: String,

    /// Exactly four options, in display order.
    #[validate(length(equal = 4), custom(function = validate_options))]
    pub options: Vec<String>,

    /// 0-based index into `options`.
    #[validate(range(max = 3))]
    pub correct_answer_index: usize,

    /// Explanation in Korean.
    #[validate(custom(function = validate_not_blank))]
    pub explanation: String,
}

fn validate_not_blank(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_text"));
    }
    Ok(())
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.iter().any(|opt| opt.trim().is_empty()) {
        return Err(validator::ValidationError::new("blank_option"));
    }
    Ok(())
}

impl QuizQuestion {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer_index
    }
}

/// DTO for the active question (answer and explanation hidden until reveal).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

impl PublicQuestion {
    pub fn hidden(question: &QuizQuestion) -> Self {
        Self {
            question: question.question_text.clone(),
            options: question.options.clone(),
            correct_answer_index: None,
            explanation: None,
            is_correct: None,
        }
    }

    pub fn revealed(question: &QuizQuestion, selected: Option<usize>) -> Self {
        Self {
            correct_answer_index: Some(question.correct_answer_index),
            explanation: Some(question.explanation.clone()),
            is_correct: selected.map(|index| question.is_correct(index)),
            ..Self::hidden(question)
        }
    }
}
