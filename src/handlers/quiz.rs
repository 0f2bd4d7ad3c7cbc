// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::topic::Topic,
    session::quiz::{
        AnswerOutcome, GENERATION_FAILED_NOTICE, LoadOutcome, LoadTicket, QuizSnapshot,
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SelectTopicRequest {
    pub topic: Topic,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    /// `None` when the question had already been answered.
    pub correct: Option<bool>,
    pub quiz: QuizSnapshot,
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let snapshot = session.lock().await.quiz.snapshot();
    Ok(Json(snapshot))
}

/// Picks a topic and generates a fresh question set.
///
/// * The session lock is released while the gateway works.
/// * The gateway call runs on its own task, so the outstanding request is
///   always settled even if the learner disconnects.
/// * On failure the quiz is back at topic selection and the learner gets
///   a 502 with the Korean notice; nothing partial is kept.
/// * If the quiz was reset or the session closed meanwhile, the result is dropped.
pub async fn select_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectTopicRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = {
        let session = state.sessions.get(id).await?;
        let mut guard = session.lock().await;
        guard.quiz.select_topic(req.topic)?
    };

    tokio::spawn(load_questions(state, id, ticket))
        .await
        .map_err(|e| AppError::Generation(format!("Question task failed: {}", e)))?
}

async fn load_questions(
    state: AppState,
    id: Uuid,
    ticket: LoadTicket,
) -> Result<Json<QuizSnapshot>, AppError> {
    let result = state
        .gateway
        .generate_questions(ticket.topic, state.config.quiz_question_count)
        .await;

    let session = state.sessions.get(id).await.inspect_err(|_| {
        tracing::warn!("Session {} closed while generating questions", id);
    })?;
    let mut guard = session.lock().await;

    match guard.quiz.finish_loading(ticket, result) {
        LoadOutcome::Ready => Ok(Json(guard.quiz.snapshot())),
        LoadOutcome::Failed(err) => {
            tracing::error!("Quiz generation failed for session {}: {}", id, err);
            Err(AppError::Generation(GENERATION_FAILED_NOTICE.to_string()))
        }
        LoadOutcome::Stale => Err(AppError::Conflict(
            "The quiz was reset before the questions arrived".to_string(),
        )),
    }
}

pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let mut guard = session.lock().await;

    let correct = match guard.quiz.submit_answer(req.index)? {
        AnswerOutcome::Correct => Some(true),
        AnswerOutcome::Incorrect => Some(false),
        AnswerOutcome::AlreadyRevealed => None,
    };

    Ok(Json(AnswerResponse {
        correct,
        quiz: guard.quiz.snapshot(),
    }))
}

/// Moves to the next question, or to the result screen after the last one.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let mut guard = session.lock().await;
    guard.quiz.advance()?;
    Ok(Json(guard.quiz.snapshot()))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let mut guard = session.lock().await;
    guard.quiz.reset();
    Ok(Json(guard.quiz.snapshot()))
}
