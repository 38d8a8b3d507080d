//! Push delivery boundary: receives JSON push events on a Unix stream
//! socket and forwards them into the receiver pipeline.

use std::path::PathBuf;

use tokio::io::AsyncBufReadExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use liveact_core::PushEvent;

pub struct PushSource {
    tx: mpsc::Sender<PushEvent>,
    socket_path: PathBuf,
}

impl PushSource {
    pub fn new(tx: mpsc::Sender<PushEvent>, socket_path: PathBuf) -> Self {
        Self { tx, socket_path }
    }

    /// Listen for push events. Each connection sends newline-delimited JSON;
    /// malformed lines are logged and skipped. Blocks until cancelled.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Remove stale socket file if it exists.
        if self.socket_path.exists() {
            tokio::fs::remove_file(&self.socket_path).await?;
        }

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!(path = %self.socket_path.display(), "push source listening");

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = self.tx.clone();
                    tokio::spawn(forward_events(stream, tx));
                }
                Err(e) => {
                    tracing::warn!("push source accept error: {e}");
                    continue;
                }
            }
        }
    }
}

async fn forward_events(stream: UnixStream, tx: mpsc::Sender<PushEvent>) {
    let reader = tokio::io::BufReader::new(stream);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<PushEvent>(line) {
            Ok(event) => {
                if let Err(e) = tx.send(event).await {
                    tracing::warn!("failed to forward push event: {e}");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("failed to parse push event JSON: {e}, line: {line}");
            }
        }
    }
}
