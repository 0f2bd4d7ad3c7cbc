// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, session::SessionStore, session::view::AppView};

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub view: AppView,
}

/// Creates a learner session: home screen, empty quiz, seeded chat.
pub async fn create_session(
    State(sessions): State<Arc<SessionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.create().await;
    let snapshot = session.lock().await.snapshot();
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_session(
    State(sessions): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.get(id).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(snapshot))
}

/// Tears a session down. Replies still in flight for it are dropped on arrival.
pub async fn delete_session(
    State(sessions): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Switches the active screen. Quiz and chat state are left untouched.
pub async fn navigate(
    State(sessions): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
    Json(req): Json<NavigateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.get(id).await?;
    let mut guard = session.lock().await;
    guard.view.navigate(req.view);
    Ok(Json(guard.snapshot()))
}
