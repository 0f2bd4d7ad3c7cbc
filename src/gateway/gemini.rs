// src/gateway/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    config::Config,
    error::AppError,
    gateway::{
        AiGateway, parse,
        prompt::{TUTOR_PERSONA, question_schema, quiz_instruction},
        wire::{Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig},
    },
    models::{chat::HistoryTurn, question::QuizQuestion, topic::Topic},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// `AiGateway` backed by the Gemini `generateContent` REST endpoint.
///
/// Stateless: every chat call resends the full history.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiGateway {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "API key is missing in environment variables".to_string(),
            ));
        }

        let mut base = Url::parse(&config.base_url).map_err(|e| {
            AppError::Configuration(format!("GEMINI_BASE_URL is invalid: {}", e))
        })?;
        // Without a trailing slash `join` would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(&format!("models/{}:generateContent", config.model))
            .map_err(|e| AppError::Configuration(format!("Invalid model name: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Performs one `generateContent` call and returns the candidate text.
    ///
    /// Failure descriptions are plain strings; callers wrap them in the
    /// error variant of their own operation.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Request to AI service failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => format!(
                    "{} ({})",
                    envelope.error.message,
                    envelope
                        .error
                        .status
                        .unwrap_or_else(|| envelope.error.code.unwrap_or(status.as_u16()).to_string())
                ),
                Err(_) => body,
            };
            return Err(format!("AI service returned {}: {}", status, detail));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Unreadable AI service response: {}", e))?;

        match body.text() {
            Some(text) => Ok(text),
            None => {
                let reason = body
                    .candidates
                    .first()
                    .and_then(|candidate| candidate.finish_reason.clone())
                    .unwrap_or_else(|| "no candidates".to_string());
                Err(format!("AI service returned no text ({})", reason))
            }
        }
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn generate_questions(
        &self,
        topic: Topic,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AppError> {
        tracing::debug!("Generating {} questions for topic {}", count, topic.key());

        let request = GenerateContentRequest {
            contents: vec![Content::user(quiz_instruction(topic, count))],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: question_schema(),
            }),
        };

        let text = self.generate(&request).await.map_err(|e| {
            tracing::error!("Error generating quiz: {}", e);
            AppError::Generation(e)
        })?;

        parse::parse_questions(&text, count).inspect_err(|e| {
            tracing::error!("Error parsing quiz: {}", e);
        })
    }

    async fn send_chat_message(
        &self,
        history: &[HistoryTurn],
        message: &str,
    ) -> Result<String, AppError> {
        tracing::debug!("Sending chat message with {} prior turns", history.len());

        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::user(message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(TUTOR_PERSONA)),
            generation_config: None,
        };

        self.generate(&request).await.map_err(|e| {
            tracing::error!("Error in chat: {}", e);
            AppError::Chat(e)
        })
    }
}
