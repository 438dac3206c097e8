use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::BACKEND;
use crate::data::wire::decode_point;
use crate::engine::{ConnectionStatus, LiveEvent};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Capped exponential reconnect delay. Doubles after every failed attempt and snaps back
/// to the initial delay once a connection is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BACKEND.ws.initial_reconnect_delay, BACKEND.ws.max_reconnect_delay)
    }
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            current: initial,
        }
    }

    /// Delay to wait now; advances the schedule for next time.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

enum StreamEnd {
    /// Server closed the socket (or the stream ran dry). Reconnect.
    Closed,
    /// Nobody is listening any more. Stop for good.
    ReceiverGone,
}

/// Owns the single live WebSocket connection.
/// Each `connect` runs on a dedicated thread with its own runtime and is stopped through a
/// watch channel; anything it sends is tagged with the session it was started for.
pub struct LiveStreamManager {
    url: String,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
    session: Option<u64>,
}

impl LiveStreamManager {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            shutdown: None,
            handle: None,
            session: None,
        }
    }

    /// Session currently streaming, if any.
    pub fn session(&self) -> Option<u64> {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Start streaming for `session`, replacing any running connection.
    pub fn connect(&mut self, session: u64, tx: Sender<LiveEvent>) {
        self.disconnect();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let url = self.url.clone();

        #[cfg(debug_assertions)]
        if DF.log_live_stream {
            log::info!("LIVE: starting session {} -> {}", session, url);
        }

        let handle = thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create live stream runtime: {}", e);
                    return;
                }
            };
            rt.block_on(run_live_stream_with_reconnect(url, session, tx, shutdown_rx));
        });

        self.shutdown = Some(shutdown_tx);
        self.handle = Some(handle);
        self.session = Some(session);
    }

    /// Signal the running connection to stop. Does not wait for the thread: anything it
    /// still delivers carries a stale session and is ignored downstream.
    pub fn disconnect(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // Err only means the task already exited.
            let _ = shutdown.send(true);

            #[cfg(debug_assertions)]
            if DF.log_live_stream {
                log::info!("LIVE: stopping session {:?}", self.session);
            }
        }
        self.handle = None;
        self.session = None;
    }
}

impl Drop for LiveStreamManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn run_live_stream_with_reconnect(
    url: String,
    session: u64,
    tx: Sender<LiveEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut backoff = Backoff::default();

    loop {
        let status = LiveEvent::Status {
            session,
            status: ConnectionStatus::Connecting,
        };
        if tx.send(status).is_err() {
            return;
        }

        let outcome = tokio::select! {
            r = run_live_stream(&url, session, &tx, &mut backoff) => r,
            _ = shutdown.changed() => return,
        };

        match outcome {
            Ok(StreamEnd::ReceiverGone) => return,
            Ok(StreamEnd::Closed) => {
                log::warn!("Live stream closed by server. Reconnecting...");
            }
            Err(e) => {
                log::error!("Live stream failed: {:#}", e);
            }
        }

        let status = LiveEvent::Status {
            session,
            status: ConnectionStatus::Disconnected,
        };
        if tx.send(status).is_err() {
            return;
        }

        let delay = backoff.next_delay();
        log::warn!("Reconnecting live stream in {}s", delay.as_secs());
        tokio::select! {
            _ = sleep(delay) => {}
            _ = shutdown.changed() => return,
        }
    }
}

async fn run_live_stream(
    url: &str,
    session: u64,
    tx: &Sender<LiveEvent>,
    backoff: &mut Backoff,
) -> Result<StreamEnd> {
    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("Failed to connect to {}", url))?;

    backoff.reset();
    let status = LiveEvent::Status {
        session,
        status: ConnectionStatus::Connected,
    };
    if tx.send(status).is_err() {
        return Ok(StreamEnd::ReceiverGone);
    }

    let (_write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        match msg.context("Live stream read error")? {
            Message::Text(text) => match decode_point(text.as_str()) {
                Ok(point) => {
                    #[cfg(debug_assertions)]
                    if DF.log_live_stream {
                        log::info!("[live] {} actual={:?}", point.time, point.actual);
                    }
                    if tx.send(LiveEvent::Point { session, point }).is_err() {
                        return Ok(StreamEnd::ReceiverGone);
                    }
                }
                Err(e) => log::warn!("Dropping malformed live payload: {:#}", e),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    Ok(StreamEnd::Closed)
}
