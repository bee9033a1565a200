//! Reducer for the session state machine.

use crate::protocol::{InboundMessage, OutboundMessage};
use crate::ui::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::{ConnectionStatus, Direction, HistoryEntry, SessionState};

/// Session state transitions.
///
/// Pure: transmission of outbound frames happens in the connection
/// controller around the dispatch call.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::ConnectionOpened => {
                state.connection = ConnectionStatus::Open;
            }

            SessionIntent::ConnectionClosed { reason } => {
                state.connection = ConnectionStatus::Closed { reason };
            }

            SessionIntent::StartAction { name, at } => {
                let message = OutboundMessage::Start(name.clone());
                state.current_action = Some(name);
                state.cards.clear();
                state.history.push(HistoryEntry {
                    timestamp: at,
                    direction: Direction::Outbound,
                    envelope: message.envelope(),
                });
            }

            SessionIntent::Sent { message, at } => {
                state.history.push(HistoryEntry {
                    timestamp: at,
                    direction: Direction::Outbound,
                    envelope: message.envelope(),
                });
            }

            SessionIntent::Received { message, at } => {
                // Envelope is captured first; the card and list payloads are
                // moved into the state below.
                let envelope = message.envelope();
                match message {
                    InboundMessage::Pages(pages) => state.pages = pages,
                    InboundMessage::Actions(actions) => state.actions = actions,
                    InboundMessage::Card(card) => state.cards.push(card),
                    InboundMessage::Done => state.current_action = None,
                    InboundMessage::Error(_) | InboundMessage::Unrecognized { .. } => {}
                }
                state.history.push(HistoryEntry {
                    timestamp: at,
                    direction: Direction::Inbound,
                    envelope,
                });
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{decode, ActionInfo};
    use crate::session::state::SessionPhase;
    use serde_json::json;
    use std::time::SystemTime;

    fn receive(state: SessionState, raw: &str) -> SessionState {
        let message = decode(raw).expect("test frame decodes");
        SessionReducer::reduce(
            state,
            SessionIntent::Received {
                message,
                at: SystemTime::now(),
            },
        )
    }

    fn start(state: SessionState, name: &str) -> SessionState {
        SessionReducer::reduce(
            state,
            SessionIntent::StartAction {
                name: name.to_string(),
                at: SystemTime::now(),
            },
        )
    }

    #[test]
    fn start_action_clears_cards_and_records_start() {
        let state = start(SessionState::default(), "first");
        let state = receive(state, r#"{"type":"display","data":{"text":"Hi"}}"#);
        assert_eq!(state.cards.len(), 1);

        let state = start(state, "second");
        assert_eq!(state.current_action.as_deref(), Some("second"));
        assert!(state.cards.is_empty());
        let last = state.history.last().expect("history entry");
        assert_eq!(last.direction, Direction::Outbound);
        assert_eq!(last.envelope.kind, "start");
        assert_eq!(last.envelope.data, json!("second"));
    }

    #[test]
    fn actions_and_pages_are_replaced_not_merged() {
        let state = receive(
            SessionState::default(),
            r#"{"type":"actions","data":[{"name":"a"},{"name":"b"}]}"#,
        );
        let state = receive(state, r#"{"type":"actions","data":[{"name":"c"}]}"#);
        assert_eq!(state.actions, vec![ActionInfo::named("c")]);

        let state = receive(state, r#"{"type":"pages","data":[{"name":"p1"}]}"#);
        let state = receive(state, r#"{"type":"pages","data":{"only":"this"}}"#);
        assert_eq!(state.pages, json!({"only": "this"}));
    }

    #[test]
    fn cards_append_in_arrival_order() {
        let state = start(SessionState::default(), "hello");
        let state = receive(state, r#"{"type":"display","data":{"text":"one"}}"#);
        let state = receive(state, r#"{"type":"markdown","data":{"content":"two"}}"#);
        let state = receive(state, r#"{"type":"textInput","data":{"label":"three"}}"#);
        let tags: Vec<_> = state.cards.iter().map(|card| card.kind.tag()).collect();
        assert_eq!(tags, vec!["display", "markdown", "textInput"]);
        assert_eq!(state.cards[2].data, json!({"label": "three"}));
    }

    #[test]
    fn done_clears_action_and_keeps_cards() {
        let state = start(SessionState::default(), "hello");
        let state = receive(state, r#"{"type":"display","data":{"text":"one"}}"#);
        let before = state.cards.clone();
        let state = receive(state, r#"{"type":"done"}"#);
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.current_action, None);
        assert_eq!(state.cards, before);
    }

    #[test]
    fn error_only_touches_history() {
        let state = start(SessionState::default(), "hello");
        let state = receive(state, r#"{"type":"actions","data":[{"name":"hello"}]}"#);
        let before = state.clone();
        let state = receive(state, r#"{"type":"error","data":"bad input"}"#);
        assert_eq!(state.cards, before.cards);
        assert_eq!(state.actions, before.actions);
        assert_eq!(state.current_action, before.current_action);
        assert_eq!(state.errors(), vec!["bad input"]);
    }

    #[test]
    fn every_inbound_message_adds_one_history_entry() {
        let frames = [
            r#"{"type":"pages","data":[]}"#,
            r#"{"type":"actions","data":[]}"#,
            r#"{"type":"image","data":{"url":"x"}}"#,
            r#"{"type":"done"}"#,
            r#"{"type":"error","data":"oops"}"#,
            r#"{"type":"group","data":{}}"#,
        ];
        let mut state = SessionState::default();
        for raw in frames {
            let before = state.history.len();
            state = receive(state, raw);
            assert_eq!(state.history.len(), before + 1, "frame {raw}");
            let last = state.history.last().expect("entry");
            assert_eq!(last.direction, Direction::Inbound);
        }
    }

    #[test]
    fn unrecognized_type_changes_nothing_but_history() {
        let state = start(SessionState::default(), "hello");
        let before = state.clone();
        let state = receive(state, r#"{"type":"group","data":{"Elements":[]}}"#);
        assert_eq!(state.cards, before.cards);
        assert_eq!(state.current_action, before.current_action);
        assert_eq!(state.history.len(), before.history.len() + 1);
        assert_eq!(state.history.last().map(|e| e.envelope.kind.as_str()), Some("group"));
    }

    #[test]
    fn cards_arriving_while_idle_are_still_appended() {
        let state = receive(SessionState::default(), r#"{"type":"display","data":{"text":"x"}}"#);
        assert_eq!(state.cards.len(), 1);
    }

    #[test]
    fn connection_transitions() {
        let state = SessionReducer::reduce(SessionState::default(), SessionIntent::ConnectionOpened);
        assert!(state.connection.is_open());
        let state = SessionReducer::reduce(
            state,
            SessionIntent::ConnectionClosed {
                reason: Some("bye".to_string()),
            },
        );
        assert_eq!(
            state.connection,
            ConnectionStatus::Closed {
                reason: Some("bye".to_string())
            }
        );
    }

    #[test]
    fn sent_messages_are_recorded_outbound() {
        let state = SessionReducer::reduce(
            SessionState::default(),
            SessionIntent::Sent {
                message: OutboundMessage::Ping,
                at: SystemTime::now(),
            },
        );
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].direction, Direction::Outbound);
        assert_eq!(state.history[0].envelope.kind, "ping");
    }
}
