// src/handlers/mod.rs

pub mod chat;
pub mod content;
pub mod quiz;
pub mod session;
