//! Shared helpers for driving a session without a real socket.

#![allow(dead_code, unused_imports)]

use cardwire::commit::InputWidget;
use cardwire::connection::{ConnectionController, MemoryTransport};
use std::path::PathBuf;
use tempfile::TempDir;

/// Controller attached to an in-memory transport, as if the socket had just
/// opened.
pub fn connected(default_action: &str) -> (ConnectionController, MemoryTransport) {
    let transport = MemoryTransport::new();
    let mut controller = ConnectionController::new(default_action);
    controller.on_open(Box::new(transport.clone()));
    (controller, transport)
}

/// Feed server frames in order.
pub fn receive(controller: &mut ConnectionController, frames: &[&str]) {
    for frame in frames {
        controller.on_frame(frame);
    }
}

/// Widget for the card at `index`, panicking if it is not an input card.
pub fn widget_at(controller: &ConnectionController, index: usize) -> InputWidget {
    let card = controller
        .state()
        .cards
        .get(index)
        .expect("card exists");
    InputWidget::for_card(card).expect("input card")
}

/// Write `content` to `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
