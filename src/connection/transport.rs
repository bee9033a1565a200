//! Outbound side of a connection.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("not connected")]
    NotConnected,

    #[error("connection writer has stopped")]
    ChannelClosed,
}

/// Sends encoded frames to the server. Fire-and-forget: `Ok` means the
/// frame was handed over, not that the server saw it.
pub trait Transport: Send {
    fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Stop sending. Later sends fail with [`TransportError::NotConnected`].
    fn close(&mut self);
}

/// Handle to a websocket writer task.
#[derive(Debug, Clone)]
pub struct WsTransport {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl WsTransport {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }
}

impl Transport for WsTransport {
    fn send(&mut self, frame: String) -> Result<(), TransportError> {
        let tx = self.tx.as_ref().ok_or(TransportError::NotConnected)?;
        tx.send(frame).map_err(|_| TransportError::ChannelClosed)
    }

    fn close(&mut self) {
        // Dropping the sender ends the writer loop.
        self.tx = None;
    }
}

/// Keeps every sent frame in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw frames in send order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Sent frames parsed back into JSON values.
    pub fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent
            .lock()
            .iter()
            .filter_map(|frame| serde_json::from_str(frame).ok())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, frame: String) -> Result<(), TransportError> {
        if *self.closed.lock() {
            return Err(TransportError::NotConnected);
        }
        self.sent.lock().push(frame);
        Ok(())
    }

    fn close(&mut self) {
        *self.closed.lock() = true;
    }
}
