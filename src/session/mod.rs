// src/session/mod.rs

//! Per-learner state: the active screen plus the quiz and chat sessions.
//! Everything lives in memory; idle sessions are dropped by the store.

pub mod chat;
pub mod quiz;
pub mod view;

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::AppError;

use self::{
    chat::{ChatSession, ChatSnapshot},
    quiz::{QuizSession, QuizSnapshot},
    view::{AppView, ViewRouter},
};

/// Composition root for one learner.
#[derive(Debug)]
pub struct LearnerSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub view: ViewRouter,
    pub quiz: QuizSession,
    pub chat: ChatSession,
}

impl LearnerSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            view: ViewRouter::default(),
            quiz: QuizSession::new(),
            chat: ChatSession::new(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            view: self.view.current(),
            quiz: self.quiz.snapshot(),
            chat: self.chat.snapshot(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub view: AppView,
    pub quiz: QuizSnapshot,
    pub chat: ChatSnapshot,
}

pub type SharedSession = Arc<Mutex<LearnerSession>>;

#[derive(Debug)]
struct StoreEntry {
    session: SharedSession,
    last_seen: Instant,
}

/// In-memory registry of learner sessions.
///
/// Sessions not looked up for `idle_timeout` are evicted whenever a new
/// session is created.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, StoreEntry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub async fn create(&self) -> SharedSession {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(LearnerSession::new(id)));

        let mut sessions = self.sessions.write().await;
        let evicted = Self::evict_idle(&mut sessions, self.idle_timeout);
        if evicted > 0 {
            tracing::info!("Evicted {} idle learner sessions", evicted);
        }
        sessions.insert(
            id,
            StoreEntry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::info!("Created learner session {}", id);
        session
    }

    /// Looks up a live session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Result<SharedSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
        entry.last_seen = Instant::now();
        Ok(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!("Closed learner session {}", id);
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {} not found", id))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn evict_idle(sessions: &mut HashMap<Uuid, StoreEntry>, idle_timeout: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < idle_timeout);
        before - sessions.len()
    }
}
