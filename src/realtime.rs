use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::models::RealtimeMessage;

/// Rolling cap on retained inbound frames.
pub const MESSAGE_BUFFER: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Connected,
}

/// Connection state plus the rolling frame buffer. Driven by socket events
/// and free of I/O, so the buffer and state rules are testable on their own.
#[derive(Debug)]
struct ChannelCore {
    state: ChannelState,
    messages: VecDeque<RealtimeMessage>,
    total_received: u64,
}

impl ChannelCore {
    fn new() -> Self {
        ChannelCore {
            state: ChannelState::Connecting,
            messages: VecDeque::new(),
            total_received: 0,
        }
    }

    /// Socket opened. Returns the fixed subscribe frame to write.
    fn on_open(&mut self) -> String {
        self.state = ChannelState::Connected;
        serde_json::json!({ "type": "subscribe", "channel": "detections" }).to_string()
    }

    /// Inbound text frame. Malformed JSON is logged and dropped; the
    /// connection state is untouched either way.
    fn on_frame(&mut self, text: &str) {
        match serde_json::from_str::<RealtimeMessage>(text) {
            Ok(msg) => {
                self.messages.push_front(msg);
                self.messages.truncate(MESSAGE_BUFFER);
                self.total_received += 1;
            }
            Err(e) => tracing::error!("Dropping malformed realtime frame: {e}"),
        }
    }

    fn on_close(&mut self) {
        self.state = ChannelState::Disconnected;
    }

    /// Reconnect attempt starting. The buffer carries over.
    fn on_reconnect(&mut self) {
        self.state = ChannelState::Connecting;
    }
}

/// Per-instance channel options. Reconnect is off unless configured,
/// matching the one-socket-per-mount behavior of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct ChannelOptions {
    pub reconnect: Option<Duration>,
}

/// One WebSocket connection to the backend's push feed. Opens in
/// `Connecting`, subscribes to the `detections` channel as soon as the
/// socket is up, and keeps the most recent frames in a bounded buffer,
/// newest first. Tearing the handle down closes the socket unconditionally.
pub struct RealtimeChannel {
    core: Arc<Mutex<ChannelCore>>,
    out_tx: mpsc::UnboundedSender<Message>,
    task: tokio::task::JoinHandle<()>,
}

impl RealtimeChannel {
    pub fn open(url: &str) -> Self {
        Self::open_with(url, ChannelOptions::default())
    }

    pub fn open_with(url: &str, opts: ChannelOptions) -> Self {
        let core = Arc::new(Mutex::new(ChannelCore::new()));
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_channel(url.to_string(), opts, core.clone(), out_rx));
        RealtimeChannel { core, out_tx, task }
    }

    pub fn state(&self) -> ChannelState {
        self.lock().state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ChannelState::Connected
    }

    /// Snapshot of the retained frames, most recent first.
    pub fn messages(&self) -> Vec<RealtimeMessage> {
        self.lock().messages.iter().cloned().collect()
    }

    /// Frames accepted since open, including ones already rotated out.
    pub fn total_received(&self) -> u64 {
        self.lock().total_received
    }

    /// Serialize and write a frame, but only while the socket is open.
    /// Returns whether the write was attempted; nothing is queued otherwise.
    pub fn send<T: Serialize>(&self, message: &T) -> bool {
        if self.state() != ChannelState::Connected {
            return false;
        }
        let text = match serde_json::to_string(message) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Cannot serialize outbound frame: {e}");
                return false;
            }
        };
        self.out_tx.send(Message::text(text)).is_ok()
    }

    /// Close the socket and stop the channel task, whatever state it is in.
    pub fn shutdown(&self) {
        self.task.abort();
        self.lock().on_close();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ChannelCore> {
        self.core.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_channel(
    url: String,
    opts: ChannelOptions,
    core: Arc<Mutex<ChannelCore>>,
    mut out_rx: mpsc::UnboundedReceiver<Message>,
) {
    loop {
        let ws = match connect_async(url.as_str()).await {
            Ok((ws, _resp)) => ws,
            Err(e) => {
                tracing::error!("WebSocket connect to {url} failed: {e}");
                lock(&core).on_close();
                match opts.reconnect {
                    Some(delay) => {
                        tokio::time::sleep(delay).await;
                        lock(&core).on_reconnect();
                        continue;
                    }
                    None => return,
                }
            }
        };

        let (mut ws_tx, mut ws_rx) = ws.split();

        // Default subscription, sent exactly once per connection.
        let subscribe = lock(&core).on_open();
        if ws_tx.send(Message::text(subscribe)).await.is_err() {
            tracing::error!("WebSocket dropped before subscribe");
            lock(&core).on_close();
            match opts.reconnect {
                Some(delay) => {
                    tokio::time::sleep(delay).await;
                    lock(&core).on_reconnect();
                    continue;
                }
                None => return,
            }
        }
        tracing::info!("Realtime channel connected: {url}");

        loop {
            tokio::select! {
                outbound = out_rx.recv() => match outbound {
                    Some(msg) => {
                        if ws_tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                    // Handle gone; close and stop for good.
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        lock(&core).on_close();
                        return;
                    }
                },
                inbound = ws_rx.next() => match inbound {
                    Some(Ok(Message::Text(text))) => lock(&core).on_frame(&text),
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ping/pong/binary, nothing to retain
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {e}");
                        break;
                    }
                },
            }
        }

        lock(&core).on_close();
        tracing::info!("Realtime channel disconnected: {url}");
        match opts.reconnect {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                lock(&core).on_reconnect();
            }
            None => return,
        }
    }
}

fn lock(core: &Arc<Mutex<ChannelCore>>) -> std::sync::MutexGuard<'_, ChannelCore> {
    core.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: u64) -> String {
        format!(r#"{{"type":"detection","id":{id}}}"#)
    }

    #[test]
    fn subscribe_frame_targets_detections() {
        let mut core = ChannelCore::new();
        assert_eq!(core.state, ChannelState::Connecting);

        let sub: serde_json::Value = serde_json::from_str(&core.on_open()).unwrap();
        assert_eq!(
            sub,
            serde_json::json!({ "type": "subscribe", "channel": "detections" })
        );
        assert_eq!(core.state, ChannelState::Connected);
    }

    #[test]
    fn buffer_keeps_the_200_most_recent_frames() {
        let mut core = ChannelCore::new();
        core.on_open();
        for i in 0..205 {
            core.on_frame(&frame(i));
        }
        assert_eq!(core.messages.len(), MESSAGE_BUFFER);
        assert_eq!(core.total_received, 205);
        // Newest first, oldest five rotated out.
        assert_eq!(core.messages[0].payload["id"], serde_json::json!(204));
        assert_eq!(core.messages[199].payload["id"], serde_json::json!(5));
    }

    #[test]
    fn malformed_frames_are_dropped_without_state_change() {
        let mut core = ChannelCore::new();
        core.on_open();
        core.on_frame("{this is not json");
        core.on_frame(r#"{"id": 1}"#); // missing the type tag
        assert_eq!(core.state, ChannelState::Connected);
        assert!(core.messages.is_empty());
        assert_eq!(core.total_received, 0);
    }

    #[test]
    fn close_preserves_the_buffer() {
        let mut core = ChannelCore::new();
        core.on_open();
        core.on_frame(&frame(1));
        core.on_close();
        assert_eq!(core.state, ChannelState::Disconnected);
        assert_eq!(core.messages.len(), 1);
    }
}
