// src/models/mod.rs

pub mod chat;
pub mod lesson;
pub mod question;
pub mod topic;
