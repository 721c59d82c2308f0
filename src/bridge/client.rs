// ABOUTME: WebSocket client task owning one remote shell connection
// Relays raw terminal bytes both ways and surfaces ordered bridge events

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bridge::protocol::{ConnectionState, ControlMessage};

/// Events emitted by the connection task, in transport delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Handshake finished and the initial resize frame is on the wire.
    Opened,
    /// Raw terminal output, written verbatim to the display surface.
    Output(Vec<u8>),
    /// The socket closed, remotely or locally. No reconnect follows.
    Closed { code: Option<u16> },
    /// Transport-level failure. No retry follows.
    Error(String),
}

enum Outbound {
    Data(Vec<u8>),
    Control(ControlMessage),
}

/// One duplex byte stream bound to one display surface.
///
/// A dedicated tokio task owns the socket; this handle holds the outbound
/// frame sender, the shared connection state, and the cancellation token
/// that is the only teardown mechanism. Frames already handed to the socket
/// are not revocable.
pub struct TerminalBridge {
    state: Arc<RwLock<ConnectionState>>,
    outbound: mpsc::UnboundedSender<Outbound>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TerminalBridge {
    /// Spawn the connection task for `url` and return the handle plus the
    /// ordered event stream. The remote pseudo-terminal is sized with
    /// `cols`×`rows` immediately on open, before any output arrives.
    pub fn connect(
        url: String,
        cols: u16,
        rows: u16,
    ) -> (Self, mpsc::UnboundedReceiver<BridgeEvent>) {
        let state = Arc::new(RwLock::new(ConnectionState::Connecting));
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (evt_tx, evt_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run_connection(
            url,
            state.clone(),
            out_rx,
            evt_tx,
            cancel.clone(),
            ControlMessage::resize(cols, rows),
        ));

        let bridge = Self {
            state,
            outbound: out_tx,
            cancel,
            task: Mutex::new(Some(task)),
        };
        (bridge, evt_rx)
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    pub async fn is_open(&self) -> bool {
        self.state.read().await.is_open()
    }

    /// Forward raw input bytes to the remote shell. Inputs arriving while
    /// connecting or after close are dropped here, before the transport;
    /// returns whether the bytes were actually forwarded.
    pub async fn send_input(&self, bytes: Vec<u8>) -> bool {
        if !self.state.read().await.is_open() {
            debug!("dropping {} input bytes, connection not open", bytes.len());
            return false;
        }
        self.outbound.send(Outbound::Data(bytes)).is_ok()
    }

    /// Send a control frame. Suppressed unless the connection is open.
    pub async fn send_control(&self, message: ControlMessage) -> bool {
        if !self.state.read().await.is_open() {
            debug!("dropping control frame, connection not open");
            return false;
        }
        self.outbound.send(Outbound::Control(message)).is_ok()
    }

    /// Tear the connection down. The close handshake runs at most once no
    /// matter how often this is called or which exit path got here first.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        if let Some(task) = self.task.lock().await.take() {
            if let Err(e) = task.await {
                warn!("connection task did not shut down cleanly: {}", e);
            }
        }
    }
}

enum Outcome {
    LocalClose,
    RemoteClose(Option<u16>),
    Failed(String),
}

async fn run_connection(
    url: String,
    state: Arc<RwLock<ConnectionState>>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::UnboundedSender<BridgeEvent>,
    cancel: CancellationToken,
    initial_size: ControlMessage,
) {
    info!("connecting to {}", url);

    let handshake = tokio::select! {
        _ = cancel.cancelled() => {
            *state.write().await = ConnectionState::Closed;
            let _ = events.send(BridgeEvent::Closed { code: None });
            return;
        }
        result = connect_async(url.as_str()) => result,
    };

    let ws = match handshake {
        Ok((ws, _response)) => ws,
        Err(e) => {
            warn!("handshake with {} failed: {}", url, e);
            *state.write().await = ConnectionState::Errored;
            let _ = events.send(BridgeEvent::Error(e.to_string()));
            return;
        }
    };

    let (mut sink, mut stream) = ws.split();

    // Size the remote pseudo-terminal before it produces any output
    if let Err(e) = sink
        .send(tungstenite::Message::Text(initial_size.to_frame()))
        .await
    {
        *state.write().await = ConnectionState::Errored;
        let _ = events.send(BridgeEvent::Error(e.to_string()));
        return;
    }

    *state.write().await = ConnectionState::Open;
    let _ = events.send(BridgeEvent::Opened);
    info!("connection to {} open", url);

    let outcome = loop {
        tokio::select! {
            // Frames already accepted into the queue are flushed before a
            // local close is honored; they are not revocable
            biased;

            queued = outbound.recv() => {
                let frame = match queued {
                    Some(Outbound::Data(bytes)) => tungstenite::Message::Binary(bytes),
                    Some(Outbound::Control(msg)) => tungstenite::Message::Text(msg.to_frame()),
                    // Handle dropped without shutdown; close on this path too
                    None => {
                        let _ = sink.close().await;
                        break Outcome::LocalClose;
                    }
                };
                if let Err(e) = sink.send(frame).await {
                    break Outcome::Failed(e.to_string());
                }
            }

            _ = cancel.cancelled() => {
                let _ = sink.close().await;
                break Outcome::LocalClose;
            }

            incoming = stream.next() => match incoming {
                Some(Ok(tungstenite::Message::Binary(bytes))) => {
                    let _ = events.send(BridgeEvent::Output(bytes));
                }
                Some(Ok(tungstenite::Message::Text(text))) => {
                    let _ = events.send(BridgeEvent::Output(text.into_bytes()));
                }
                Some(Ok(tungstenite::Message::Close(frame))) => {
                    break Outcome::RemoteClose(frame.map(|f| f.code.into()));
                }
                // Ping/Pong are answered by the protocol layer
                Some(Ok(_)) => {}
                Some(Err(e)) => break Outcome::Failed(e.to_string()),
                None => break Outcome::RemoteClose(None),
            }
        }
    };

    match outcome {
        Outcome::LocalClose => {
            info!("connection to {} closed locally", url);
            *state.write().await = ConnectionState::Closed;
            let _ = events.send(BridgeEvent::Closed { code: None });
        }
        Outcome::RemoteClose(code) => {
            info!("connection to {} closed by remote ({:?})", url, code);
            *state.write().await = ConnectionState::Closed;
            let _ = events.send(BridgeEvent::Closed { code });
        }
        Outcome::Failed(message) => {
            warn!("connection to {} failed: {}", url, message);
            *state.write().await = ConnectionState::Errored;
            let _ = events.send(BridgeEvent::Error(message));
        }
    }
}
