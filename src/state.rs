use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;

use crate::{config::Config, gateway::AiGateway, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn AiGateway>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn AiGateway>) -> Self {
        Self {
            gateway,
            sessions: Arc::new(SessionStore::new(Duration::from_secs(config.session_idle_secs))),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
