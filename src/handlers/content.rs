// src/handlers/content.rs

use axum::{Json, response::IntoResponse};

use crate::models::{
    lesson::LESSONS,
    topic::{Topic, TopicInfo},
};

/// Lists the five quiz topics.
pub async fn list_topics() -> impl IntoResponse {
    let topics: Vec<TopicInfo> = Topic::ALL.into_iter().map(TopicInfo::from).collect();
    Json(topics)
}

/// Returns the static lesson cards.
pub async fn list_lessons() -> impl IntoResponse {
    Json(LESSONS)
}
