// src/handlers/chat.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    session::chat::{ChatSnapshot, PendingSend},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    /// Falls back to the stored draft when absent.
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// `false` when the send was ignored (blank text or a reply pending).
    pub accepted: bool,
    pub chat: ChatSnapshot,
}

pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let snapshot = session.lock().await.chat.snapshot();
    Ok(Json(snapshot))
}

pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DraftRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let mut guard = session.lock().await;
    guard.chat.set_draft(req.text);
    Ok(Json(guard.chat.snapshot()))
}

/// Sends a message to the tutor and waits for the reply.
///
/// The user message is appended before the gateway is called. A failed
/// round trip shows up as an error message in the transcript, not as an
/// HTTP error. The reply is applied on its own task so the pending flag is
/// cleared even if the learner disconnects.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pending = {
        let session = state.sessions.get(id).await?;
        let mut guard = session.lock().await;
        match guard.chat.begin_send(req.text.as_deref()) {
            Some(pending) => pending,
            None => {
                return Ok(Json(SendMessageResponse {
                    accepted: false,
                    chat: guard.chat.snapshot(),
                }));
            }
        }
    };

    tokio::spawn(deliver_reply(state, id, pending))
        .await
        .map_err(|e| AppError::Chat(format!("Chat task failed: {}", e)))?
}

async fn deliver_reply(
    state: AppState,
    id: Uuid,
    pending: PendingSend,
) -> Result<Json<SendMessageResponse>, AppError> {
    let result = state
        .gateway
        .send_chat_message(&pending.history, &pending.text)
        .await;

    let session = state.sessions.get(id).await.inspect_err(|_| {
        tracing::warn!("Session {} closed while waiting for a chat reply", id);
    })?;
    let mut guard = session.lock().await;
    guard.chat.complete_send(result);

    Ok(Json(SendMessageResponse {
        accepted: true,
        chat: guard.chat.snapshot(),
    }))
}
