// src/session/chat.rs

use chrono::Utc;
use serde::Serialize;

use crate::{
    error::AppError,
    models::chat::{ChatMessage, HistoryTurn, Role},
};

pub const WELCOME_MESSAGE: &str = "안녕! 나는 동명사 지니야. 🧞‍♂️\n동명사에 대해 궁금한 게 있으면 무엇이든 물어봐!\n예: \"동명사랑 투부정사는 어떻게 달라?\"";

/// Appended in place of a reply when the round trip fails.
pub const CHAT_FAILED_MESSAGE: &str = "오류가 발생했습니다. 다시 시도해주세요.";

/// A send that has been accepted and is waiting for the gateway.
#[derive(Debug, Clone)]
pub struct PendingSend {
    /// Turns preceding `text`, in chronological order.
    pub history: Vec<HistoryTurn>,
    pub text: String,
}

/// Chat state machine: Idle <-> Sending over an append-only log.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    draft: String,
    sending: bool,
    next_seq: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "init".to_string(),
                role: Role::Assistant,
                text: WELCOME_MESSAGE.to_string(),
                is_error: false,
                created_at: Utc::now(),
            }],
            draft: String::new(),
            sending: false,
            next_seq: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Replayable history: every message so far, without the error flag.
    pub fn history(&self) -> Vec<HistoryTurn> {
        self.messages.iter().map(HistoryTurn::from).collect()
    }

    /// Accepts `text` (or the draft when `None`) and appends it as a user
    /// message. Returns `None` without touching the log when the text is
    /// blank or a send is already in flight.
    pub fn begin_send(&mut self, text: Option<&str>) -> Option<PendingSend> {
        let text = text.map(str::to_string).unwrap_or_else(|| self.draft.clone());
        if text.trim().is_empty() || self.sending {
            return None;
        }

        let history = self.history();
        self.push(Role::User, text.clone(), false);
        self.draft.clear();
        self.sending = true;

        Some(PendingSend { history, text })
    }

    /// Appends the reply (or the in-band error message) and returns to idle.
    /// Returns `false` if no send was in flight.
    pub fn complete_send(&mut self, result: Result<String, AppError>) -> bool {
        if !self.sending {
            tracing::warn!("Discarding chat reply with no send in flight");
            return false;
        }

        match result {
            Ok(reply) => self.push(Role::Assistant, reply, false),
            Err(err) => {
                tracing::warn!("Chat round trip failed: {}", err);
                self.push(Role::Assistant, CHAT_FAILED_MESSAGE.to_string(), true);
            }
        }
        self.sending = false;
        true
    }

    fn push(&mut self, role: Role, text: String, is_error: bool) {
        let now = Utc::now();
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: format!("{}-{}", now.timestamp_millis(), self.next_seq),
            role,
            text,
            is_error,
            created_at: now,
        });
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
            draft: self.draft.clone(),
            sending: self.sending,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub sending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_welcome() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].id, "init");
        assert_eq!(chat.messages()[0].role, Role::Assistant);
        assert!(!chat.is_sending());
    }

    #[test]
    fn test_successful_sends_grow_log_by_pairs() {
        let mut chat = ChatSession::new();
        for k in 1..=3 {
            let pending = chat.begin_send(Some("동명사가 뭐야?")).unwrap();
            assert_eq!(pending.history.len(), 2 * k - 1);
            assert!(chat.complete_send(Ok(format!("reply {}", k))));
            assert_eq!(chat.messages().len(), 1 + 2 * k);
        }

        let roles: Vec<Role> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant
            ]
        );
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let mut chat = ChatSession::new();
        assert!(chat.begin_send(Some("   ")).is_none());
        assert!(chat.begin_send(None).is_none());
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_sending());
    }

    #[test]
    fn test_send_while_in_flight_is_rejected() {
        let mut chat = ChatSession::new();
        chat.begin_send(Some("first")).unwrap();
        assert!(chat.is_sending());
        assert!(chat.begin_send(Some("second")).is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_failure_appends_error_and_keeps_user_message() {
        let mut chat = ChatSession::new();
        chat.begin_send(Some("stop + ing?")).unwrap();
        chat.complete_send(Err(AppError::Chat("timeout".into())));

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "stop + ing?");
        assert!(messages[2].is_error);
        assert_eq!(messages[2].text, CHAT_FAILED_MESSAGE);
        assert!(!chat.is_sending());

        // The conversation stays usable.
        assert!(chat.begin_send(Some("again")).is_some());
    }

    #[test]
    fn test_draft_is_used_and_cleared() {
        let mut chat = ChatSession::new();
        chat.set_draft("try + to-v");
        let pending = chat.begin_send(None).unwrap();
        assert_eq!(pending.text, "try + to-v");
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn test_history_excludes_new_message_and_error_flag() {
        let mut chat = ChatSession::new();
        let pending = chat.begin_send(Some("hello")).unwrap();
        assert_eq!(
            pending.history,
            vec![HistoryTurn {
                role: Role::Assistant,
                text: WELCOME_MESSAGE.to_string()
            }]
        );
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut chat = ChatSession::new();
        for _ in 0..5 {
            chat.begin_send(Some("q")).unwrap();
            chat.complete_send(Ok("a".into()));
        }
        let mut ids: Vec<&str> = chat.messages().iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), chat.messages().len());
    }

    #[test]
    fn test_completion_without_send_is_ignored() {
        let mut chat = ChatSession::new();
        assert!(!chat.complete_send(Ok("late".into())));
        assert_eq!(chat.messages().len(), 1);
    }
}
