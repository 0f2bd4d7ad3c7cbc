// src/session/view.rs

use serde::{Deserialize, Serialize};

/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    #[default]
    Home,
    Learn,
    Quiz,
    Chat,
}

/// Holds the active screen. Navigation never touches quiz or chat state.
#[derive(Debug, Default)]
pub struct ViewRouter {
    current: AppView,
}

impl ViewRouter {
    pub fn current(&self) -> AppView {
        self.current
    }

    pub fn navigate(&mut self, view: AppView) {
        self.current = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_is_idempotent() {
        let mut router = ViewRouter::default();
        assert_eq!(router.current(), AppView::Home);
        router.navigate(AppView::Chat);
        router.navigate(AppView::Chat);
        assert_eq!(router.current(), AppView::Chat);
    }

    #[test]
    fn test_view_wire_names() {
        let view: AppView = serde_json::from_str("\"quiz\"").unwrap();
        assert_eq!(view, AppView::Quiz);
        assert_eq!(serde_json::to_string(&AppView::Learn).unwrap(), "\"learn\"");
    }
}
