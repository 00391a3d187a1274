//! JSON-lines stdio transport.
//!
//! Inbound: one [`InboundEvent`] JSON object per stdin line; a line that
//! fails to parse is warn-logged and dropped - malformed input never crashes
//! the process. Outbound: one `{ "user": .., ...reply }` JSON object per
//! stdout line, written by a dedicated writer task so concurrent handlers
//! never interleave partial lines.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use divano_core::UserId;

use crate::session::{InboundEvent, Reply};

use super::{DeliveryError, ReplySink};

/// One outbound stdout line.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutboundFrame {
    user: UserId,
    #[serde(flatten)]
    reply: Reply,
}

/// Cheaply cloneable handle that queues replies for the writer task.
#[derive(Debug, Clone)]
pub struct StdioSink {
    tx: mpsc::UnboundedSender<OutboundFrame>,
}

impl StdioSink {
    /// Spawn the stdout writer task and return its sink handle.
    #[must_use]
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<OutboundFrame>();

        tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(frame) = rx.recv().await {
                let mut line = match serde_json::to_vec(&frame) {
                    Ok(line) => line,
                    Err(e) => {
                        error!(error = %e, "failed to encode outbound frame");
                        continue;
                    }
                };
                line.push(b'\n');
                if let Err(e) = stdout.write_all(&line).await {
                    error!(error = %e, "stdout write failed, stopping writer");
                    break;
                }
                if let Err(e) = stdout.flush().await {
                    error!(error = %e, "stdout flush failed, stopping writer");
                    break;
                }
            }
        });

        Self { tx }
    }
}

impl ReplySink for StdioSink {
    async fn send(&self, user: UserId, reply: Reply) -> Result<(), DeliveryError> {
        self.tx
            .send(OutboundFrame { user, reply })
            .map_err(|_| DeliveryError::Closed)
    }
}

/// Spawn the stdin reader task; the returned channel yields decoded events
/// until stdin closes.
#[must_use]
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<InboundEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<InboundEvent>(line) {
                        Ok(event) => {
                            if tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "dropping malformed inbound frame"),
                    }
                }
                Ok(None) => {
                    debug!("stdin closed, stopping reader");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "stdin read failed, stopping reader");
                    break;
                }
            }
        }
    });

    rx
}
