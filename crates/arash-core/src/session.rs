//! Explicit per-session state
//!
//! One [`ChatSession`] per user: conversation history, the last-loaded
//! analysis state, and the active display language. Created on session
//! start, passed by reference into each handler, mutated only by the turn
//! currently executing, and torn down on session end. No ambient globals.

use crate::language::Language;
use arash_market::{HistoricalSeries, SeriesStats};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single entry in the display history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The last-loaded historical series and its derived statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisState {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub series: HistoricalSeries,
    pub stats: SeriesStats,
}

/// State private to one user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    id: String,
    language: Language,
    history: Vec<ConversationTurn>,
    analysis: Option<AnalysisState>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl ChatSession {
    /// Create a fresh session
    pub fn new(language: Language) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            language,
            history: Vec::new(),
            analysis: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the display language; history and analysis state survive
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.touch();
    }

    /// Append-only conversation history, oldest first
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn add_user_turn(&mut self, content: impl Into<String>) {
        self.push_turn(TurnRole::User, content.into());
    }

    pub fn add_assistant_turn(&mut self, content: impl Into<String>) {
        self.push_turn(TurnRole::Assistant, content.into());
    }

    /// Drop the conversation history (explicit user action only)
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.touch();
    }

    /// The loaded analysis state, if any
    pub fn analysis(&self) -> Option<&AnalysisState> {
        self.analysis.as_ref()
    }

    /// Replace the analysis state wholesale
    pub fn set_analysis(&mut self, state: AnalysisState) {
        self.analysis = Some(state);
        self.touch();
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    fn push_turn(&mut self, role: TurnRole, content: String) {
        self.history.push(ConversationTurn {
            role,
            content,
            timestamp: Utc::now(),
        });
        self.touch();
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_append_only() {
        let mut session = ChatSession::new(Language::Portuguese);
        session.add_user_turn("Como está AAPL?");
        session.add_assistant_turn("AAPL está em alta.");

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[1].role, TurnRole::Assistant);
    }

    #[test]
    fn test_clear_history_keeps_language_and_analysis() {
        let mut session = ChatSession::new(Language::English);
        session.add_user_turn("hello");

        session.clear_history();
        assert!(session.history().is_empty());
        assert_eq!(session.language(), Language::English);
    }

    #[test]
    fn test_language_toggle() {
        let mut session = ChatSession::new(Language::Portuguese);
        session.add_user_turn("oi");

        session.set_language(Language::English);
        assert_eq!(session.language(), Language::English);
        // switching language does not clear history
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_sessions_are_distinct() {
        let a = ChatSession::new(Language::Portuguese);
        let b = ChatSession::new(Language::Portuguese);
        assert_ne!(a.id(), b.id());
    }
}
