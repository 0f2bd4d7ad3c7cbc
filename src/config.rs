// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::error::AppError;

/// Default model used for both quiz generation and the chat tutor.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Number of questions requested per quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;
/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 2 * 60 * 60;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub quiz_question_count: usize,
    pub session_idle_secs: u64,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    /// Reads the configuration from the process environment (and `.env`, if present).
    ///
    /// A missing API key is reported here so the binary refuses to start
    /// instead of failing on the first learner request.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration("GEMINI_API_KEY must be set".to_string())
            })?;

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_or("GEMINI_TIMEOUT_SECS", &lookup, DEFAULT_TIMEOUT_SECS)?;

        let quiz_question_count = parse_or("QUIZ_QUESTION_COUNT", &lookup, QUIZ_QUESTION_COUNT)?;
        if quiz_question_count == 0 {
            return Err(AppError::Configuration(
                "QUIZ_QUESTION_COUNT must be at least 1".to_string(),
            ));
        }

        let session_idle_secs =
            parse_or("SESSION_IDLE_SECS", &lookup, DEFAULT_SESSION_IDLE_SECS)?;
        if session_idle_secs == 0 {
            return Err(AppError::Configuration(
                "SESSION_IDLE_SECS must be at least 1".to_string(),
            ));
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Configuration(format!("BIND_ADDR is invalid: {}", e)))?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let static_dir = lookup("STATIC_DIR").map(PathBuf::from);
        let log_dir = lookup("LOG_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("logs"));
        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
            quiz_question_count,
            session_idle_secs,
            bind_addr,
            allowed_origins,
            static_dir,
            log_dir,
            rust_log,
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Configuration(format!("{} is invalid: {}", key, e))),
        None => Ok(default),
    }
}
