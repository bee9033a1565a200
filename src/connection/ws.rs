//! Websocket task: owns the socket, forwards frames both ways.

use std::sync::mpsc::Sender;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::shutdown::ShutdownHandle;

use super::transport::WsTransport;

/// What the websocket task reports to the UI thread.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// Socket is up; frames sent through the transport reach the server.
    Opened(WsTransport),
    /// One text frame from the server.
    Frame(String),
    /// Socket is gone. Sent exactly once, last.
    Closed { reason: Option<String> },
    Error(String),
}

/// Connect to `url` on the current tokio runtime.
///
/// Events are delivered over a std channel so the UI thread can block on
/// them together with terminal input.
pub fn spawn<E>(url: String, events: Sender<E>, shutdown: ShutdownHandle) -> JoinHandle<()>
where
    E: From<ConnectionEvent> + Send + 'static,
{
    tokio::spawn(run(url, events, shutdown))
}

async fn run<E>(url: String, events: Sender<E>, shutdown: ShutdownHandle)
where
    E: From<ConnectionEvent> + Send + 'static,
{
    let emit = |event: ConnectionEvent| events.send(E::from(event)).is_ok();

    tracing::info!(%url, "connecting");
    let connected = tokio::select! {
        result = connect_async(url.as_str()) => result,
        _ = shutdown.wait() => {
            emit(ConnectionEvent::Closed { reason: Some("shutdown".to_string()) });
            return;
        }
    };
    let stream = match connected {
        Ok((stream, _response)) => stream,
        Err(err) => {
            tracing::error!(%url, error = %err, "websocket connect failed");
            emit(ConnectionEvent::Error(err.to_string()));
            emit(ConnectionEvent::Closed {
                reason: Some(err.to_string()),
            });
            return;
        }
    };
    tracing::info!(%url, "websocket open");

    let (mut sink, mut stream) = stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    if !emit(ConnectionEvent::Opened(WsTransport::new(tx))) {
        let _ = sink.close().await;
        return;
    }

    let reason = loop {
        tokio::select! {
            outbound = rx.recv() => match outbound {
                Some(text) => {
                    tracing::trace!(bytes = text.len(), "ws send");
                    if let Err(err) = sink.send(Message::Text(text)).await {
                        emit(ConnectionEvent::Error(err.to_string()));
                        break Some(err.to_string());
                    }
                }
                None => {
                    let _ = sink.send(Message::Close(None)).await;
                    break Some("closed by client".to_string());
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if !emit(ConnectionEvent::Frame(text)) {
                        break None;
                    }
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        if !emit(ConnectionEvent::Frame(text)) {
                            break None;
                        }
                    }
                    Err(_) => tracing::warn!("dropping non UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    break frame
                        .map(|frame| frame.reason.to_string())
                        .filter(|reason| !reason.is_empty())
                        .or_else(|| Some("closed by server".to_string()));
                }
                // Ping/pong are answered by tungstenite.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    emit(ConnectionEvent::Error(err.to_string()));
                    break Some(err.to_string());
                }
                None => break Some("connection ended".to_string()),
            },
            _ = shutdown.wait() => {
                let _ = sink.send(Message::Close(None)).await;
                let _ = sink.close().await;
                break Some("shutdown".to_string());
            }
        }
    };

    tracing::info!(reason = reason.as_deref().unwrap_or("-"), "websocket closed");
    emit(ConnectionEvent::Closed { reason });
}
