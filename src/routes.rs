// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{chat, content, quiz, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the content, session, quiz and chat sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Serves the SPA bundle for non-API paths when `STATIC_DIR` is set.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let content_routes = Router::new()
        .route("/topics", get(content::list_topics))
        .route("/lessons", get(content::list_lessons));

    let quiz_routes = Router::new()
        .route("/", get(quiz::get_quiz))
        .route("/topic", post(quiz::select_topic))
        .route("/answer", post(quiz::submit_answer))
        .route("/advance", post(quiz::advance))
        .route("/reset", post(quiz::reset));

    let chat_routes = Router::new()
        .route("/", get(chat::get_chat))
        .route("/draft", put(chat::update_draft))
        .route("/messages", post(chat::send_message));

    let session_routes = Router::new()
        .route("/", post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/{id}/view", put(session::navigate))
        .nest("/{id}/quiz", quiz_routes)
        .nest("/{id}/chat", chat_routes);

    let static_dir = state.config.static_dir.clone();

    let mut router = Router::new()
        .nest("/api", content_routes)
        .nest("/api/sessions", session_routes);

    if let Some(dir) = static_dir {
        tracing::info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
