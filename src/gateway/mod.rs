// src/gateway/mod.rs

//! AI gateway: the two capabilities the sessions need from the
//! generative-language service.

pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod wire;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{chat::HistoryTurn, question::QuizQuestion, topic::Topic},
};

pub use gemini::GeminiGateway;

/// Capability pair used by the quiz and chat sessions.
///
/// Both calls either complete or fail as a whole; no partial results.
/// Implementations must be shareable across handlers.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generates exactly `count` questions scoped to `topic`.
    ///
    /// Fails with `AppError::Generation` if the service errors, returns
    /// nothing, or returns text that does not satisfy the question contract.
    async fn generate_questions(
        &self,
        topic: Topic,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AppError>;

    /// Continues the tutoring conversation with `message` after `history`.
    ///
    /// Fails with `AppError::Chat`; the chat session owns the fallback text.
    async fn send_chat_message(
        &self,
        history: &[HistoryTurn],
        message: &str,
    ) -> Result<String, AppError>;
}
