//! State recorder: appends observations to a JSON-lines file.
//!
//! The game loop is synchronous, so the recorder owns its own tokio runtime
//! and hands serialized lines to a writer task over an unbounded channel.
//! `record` never blocks on disk I/O. Write failures are logged and stop the
//! writer; they never reach the game loop.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::GameSnapshot;
use crate::protocol::{now_ms, Observation};
use crate::types::LockEvent;

/// Running recorder instance.
pub struct StateRecorder {
    rt: Runtime,
    tx: mpsc::UnboundedSender<String>,
    writer: JoinHandle<()>,
    seq: u64,
}

impl StateRecorder {
    /// Open (or create) `path` for appending and start the writer task.
    pub fn start(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let rt = Runtime::new().context("failed to create tokio runtime")?;

        let file = rt
            .block_on(
                tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path),
            )
            .with_context(|| format!("failed to open state log {}", path.display()))?;

        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer = rt.spawn(write_lines(file, rx, path));

        Ok(Self {
            rt,
            tx,
            writer,
            seq: 0,
        })
    }

    /// Number of observations queued so far
    pub fn recorded(&self) -> u64 {
        self.seq
    }

    /// Queue one observation.
    pub fn record(&mut self, snap: &GameSnapshot, event: Option<LockEvent>) {
        self.seq += 1;
        let obs = Observation::from_snapshot(self.seq, now_ms(), snap, event);
        match obs.to_json_line() {
            Ok(line) => {
                if self.tx.send(line).is_err() {
                    warn!(seq = self.seq, "state log writer has stopped; observation dropped");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize observation"),
        }
    }

    /// Close the channel and wait until every queued line is on disk.
    pub fn finish(self) -> Result<()> {
        let Self { rt, tx, writer, .. } = self;
        drop(tx);
        rt.block_on(writer)
            .map_err(|err| anyhow!("state log writer failed: {err}"))
    }
}

async fn write_lines(
    file: tokio::fs::File,
    mut rx: mpsc::UnboundedReceiver<String>,
    path: PathBuf,
) {
    let mut out = tokio::io::BufWriter::new(file);
    while let Some(line) = rx.recv().await {
        if let Err(err) = out.write_all(line.as_bytes()).await {
            warn!(error = %err, path = %path.display(), "state log write failed");
            return;
        }
        if let Err(err) = out.flush().await {
            warn!(error = %err, path = %path.display(), "state log flush failed");
            return;
        }
    }
    debug!(path = %path.display(), "state log closed");
}
