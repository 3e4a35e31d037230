use std::sync::Arc;

use crate::core::{
    RankedResult,
    SessionStatus,
    Theme,
};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    StatusChanged(SessionStatus),
    /// Feeds both the frequency list and the cloud renderer.
    ResultsReady(Arc<RankedResult>),
    Cleared,
    StopwordsChanged(Vec<String>),
    ThemeChanged(Theme),
    TextSaved,
    Notification(String),
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::StatusChanged(_) => "status_changed",
            SessionEvent::ResultsReady(_) => "results_ready",
            SessionEvent::Cleared => "cleared",
            SessionEvent::StopwordsChanged(_) => "stopwords_changed",
            SessionEvent::ThemeChanged(_) => "theme_changed",
            SessionEvent::TextSaved => "text_saved",
            SessionEvent::Notification(_) => "notification",
        }
    }
}
