use std::time::SystemTime;

use crate::commit::InputSink;
use crate::protocol::{decode, encode, InboundMessage, InputValue, OutboundMessage};
use crate::session::{SessionIntent, SessionState, SessionStore};

use super::transport::{Transport, TransportError};
use super::ws::ConnectionEvent;

/// Owns the session store and the transport of one connection.
///
/// Every outbound frame leaves through [`start_action`](Self::start_action)
/// or [`send_input`](Self::send_input); every inbound frame enters through
/// [`on_frame`](Self::on_frame).
pub struct ConnectionController {
    store: SessionStore,
    transport: Option<Box<dyn Transport>>,
    default_action: String,
}

impl ConnectionController {
    pub fn new(default_action: impl Into<String>) -> Self {
        Self {
            store: SessionStore::new(),
            transport: None,
            default_action: default_action.into(),
        }
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn default_action(&self) -> &str {
        &self.default_action
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Attach the transport, send the handshake ping and start the default
    /// action if there is one.
    pub fn on_open(&mut self, transport: Box<dyn Transport>) {
        self.transport = Some(transport);
        self.store.dispatch(SessionIntent::ConnectionOpened);
        tracing::info!(session = %self.state().id, "connection open");

        if let Err(err) = self.send(OutboundMessage::Ping) {
            tracing::warn!(session = %self.state().id, error = %err, "handshake ping not sent");
        }

        if self.default_action.is_empty() {
            tracing::info!(session = %self.state().id, "no default action; waiting for user");
            return;
        }
        let name = self.default_action.clone();
        if let Err(err) = self.start_action(name) {
            tracing::warn!(session = %self.state().id, error = %err, "default action not started");
        }
    }

    /// Decode one frame and apply it. Malformed frames are logged and dropped.
    pub fn on_frame(&mut self, raw: &str) {
        let message = match decode(raw) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(session = %self.state().id, error = %err, "dropping malformed frame");
                return;
            }
        };

        match &message {
            InboundMessage::Unrecognized { kind, .. } => {
                tracing::warn!(session = %self.state().id, kind = %kind, "quarantined unknown message type");
            }
            InboundMessage::Error(text) => {
                tracing::warn!(session = %self.state().id, error = %text, "server reported error");
            }
            other => {
                tracing::debug!(session = %self.state().id, kind = other.type_tag(), "received");
            }
        }

        self.store.dispatch(SessionIntent::Received {
            message,
            at: SystemTime::now(),
        });
    }

    /// Detach the transport. The session is kept for display; there is no
    /// reconnect.
    pub fn on_close(&mut self, reason: Option<String>) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
        tracing::info!(
            session = %self.state().id,
            reason = reason.as_deref().unwrap_or("-"),
            "connection closed"
        );
        self.store.dispatch(SessionIntent::ConnectionClosed { reason });
    }

    pub fn on_error(&self, error: &str) {
        tracing::error!(session = %self.state().id, error, "transport error");
    }

    /// Route an event from the websocket task.
    pub fn handle(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened(transport) => self.on_open(Box::new(transport)),
            ConnectionEvent::Frame(raw) => self.on_frame(&raw),
            ConnectionEvent::Closed { reason } => self.on_close(reason),
            ConnectionEvent::Error(error) => self.on_error(&error),
        }
    }

    /// Send `start` and reset the card list. Nothing changes when the frame
    /// cannot be handed to the transport.
    pub fn start_action(&mut self, name: impl Into<String>) -> Result<(), TransportError> {
        let name = name.into();
        let transport = self
            .transport
            .as_mut()
            .ok_or(TransportError::NotConnected)?;
        transport.send(encode(&OutboundMessage::Start(name.clone())))?;

        tracing::info!(session = %self.store.state().id, action = %name, "action started");
        self.store.dispatch(SessionIntent::StartAction {
            name,
            at: SystemTime::now(),
        });
        Ok(())
    }

    pub fn send_input(&mut self, value: InputValue) -> Result<(), TransportError> {
        self.send(OutboundMessage::Input(value))
    }

    /// Close the transport from our side, e.g. on quit.
    pub fn disconnect(&mut self) {
        if self.transport.is_some() {
            self.on_close(Some("closed by client".to_string()));
        }
    }

    fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError> {
        let transport = self
            .transport
            .as_mut()
            .ok_or(TransportError::NotConnected)?;
        transport.send(encode(&message))?;
        self.store.dispatch(SessionIntent::Sent {
            message,
            at: SystemTime::now(),
        });
        Ok(())
    }
}

impl InputSink for ConnectionController {
    fn send_input(&mut self, value: InputValue) -> Result<(), TransportError> {
        ConnectionController::send_input(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryTransport;
    use crate::session::{ConnectionStatus, Direction, SessionPhase};
    use serde_json::json;

    fn open(default_action: &str) -> (ConnectionController, MemoryTransport) {
        let transport = MemoryTransport::new();
        let mut controller = ConnectionController::new(default_action);
        controller.on_open(Box::new(transport.clone()));
        (controller, transport)
    }

    #[test]
    fn open_sends_ping_then_default_start() {
        let (controller, transport) = open("hello");
        assert_eq!(
            transport.sent(),
            vec![
                r#"{"type":"ping"}"#.to_string(),
                r#"{"type":"start","data":"hello"}"#.to_string(),
            ]
        );
        let state = controller.state();
        assert_eq!(state.connection, ConnectionStatus::Open);
        assert_eq!(state.current_action.as_deref(), Some("hello"));
        let kinds: Vec<_> = state.history.iter().map(|e| e.envelope.kind.as_str()).collect();
        assert_eq!(kinds, vec!["ping", "start"]);
    }

    #[test]
    fn empty_default_action_stays_idle() {
        let (controller, transport) = open("");
        assert_eq!(transport.sent(), vec![r#"{"type":"ping"}"#.to_string()]);
        assert_eq!(controller.state().phase(), SessionPhase::Idle);
    }

    #[test]
    fn start_without_transport_is_refused() {
        let mut controller = ConnectionController::new("hello");
        assert_eq!(
            controller.start_action("hello"),
            Err(TransportError::NotConnected)
        );
        assert!(controller.state().history.is_empty());
        assert_eq!(controller.state().current_action, None);
    }

    #[test]
    fn malformed_frames_are_dropped() {
        let (mut controller, _transport) = open("hello");
        let before = controller.state().clone();
        controller.on_frame("{not json");
        controller.on_frame(r#"{"type":"display","data":{"text":"x"},"extra":1}"#);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn close_detaches_transport_and_refuses_sends() {
        let (mut controller, transport) = open("hello");
        controller.handle(ConnectionEvent::Closed {
            reason: Some("server went away".to_string()),
        });
        assert!(!controller.is_connected());
        assert!(transport.is_closed());
        assert_eq!(
            controller.send_input(InputValue::Bool(true)),
            Err(TransportError::NotConnected)
        );
        assert_eq!(
            controller.state().connection,
            ConnectionStatus::Closed {
                reason: Some("server went away".to_string())
            }
        );
    }

    #[test]
    fn input_is_sent_and_recorded() {
        let (mut controller, transport) = open("hello");
        controller
            .send_input(InputValue::Text("Ada".to_string()))
            .expect("connected");
        assert_eq!(
            transport.sent_json().last(),
            Some(&json!({"type": "input", "data": "Ada"}))
        );
        let last = controller.state().history.last().expect("entry");
        assert_eq!(last.direction, Direction::Outbound);
        assert_eq!(last.envelope.data, json!("Ada"));
    }

    #[test]
    fn error_events_do_not_change_state() {
        let (mut controller, _transport) = open("hello");
        let before = controller.state().clone();
        controller.handle(ConnectionEvent::Error("reset by peer".to_string()));
        assert_eq!(controller.state(), &before);
    }
}
