//! State for one server session.

use serde_json::Value;
use std::time::SystemTime;
use uuid::Uuid;

use crate::protocol::{ActionInfo, Card, Envelope};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

/// One exchanged message, kept for the lifetime of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: SystemTime,
    pub direction: Direction,
    pub envelope: Envelope,
}

/// Transport status as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Open,
    Closed {
        reason: Option<String>,
    },
}

impl ConnectionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Derived state-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    ActionInProgress,
}

/// Everything the client knows about the current connection.
///
/// Only [`SessionReducer`](super::SessionReducer) produces new values of this
/// type; everything else reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub id: Uuid,
    pub pages: Value,
    pub actions: Vec<ActionInfo>,
    pub current_action: Option<String>,
    pub cards: Vec<Card>,
    pub history: Vec<HistoryEntry>,
    pub connection: ConnectionStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_id(Uuid::new_v4())
    }
}

impl SessionState {
    /// Empty session with a caller-chosen id.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            pages: Value::Array(Vec::new()),
            actions: Vec::new(),
            current_action: None,
            cards: Vec::new(),
            history: Vec::new(),
            connection: ConnectionStatus::default(),
        }
    }
}

impl UiState for SessionState {}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.current_action.is_some() {
            SessionPhase::ActionInProgress
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == SessionPhase::Idle
    }

    /// Text of every `error` message received, oldest first.
    pub fn errors(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter(|entry| entry.direction == Direction::Inbound && entry.envelope.kind == "error")
            .map(|entry| entry.envelope.data.as_str().unwrap_or_default())
            .collect()
    }

    /// True once at least one action has been started in this session.
    pub fn has_started_action(&self) -> bool {
        self.history
            .iter()
            .any(|entry| entry.direction == Direction::Outbound && entry.envelope.kind == "start")
    }

    pub fn outbound(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history
            .iter()
            .filter(|entry| entry.direction == Direction::Outbound)
    }
}
