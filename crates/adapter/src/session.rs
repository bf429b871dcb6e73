//! Session actor.
//!
//! A tokio task owns the `GameSession` outright. Every caller talks to it
//! through a cloneable `SessionHandle`, so commands from many tasks are
//! applied one at a time in arrival order and no lock is ever taken.

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::core::{GameSession, GameSnapshot};
use crate::types::{Command, LockEvent};

/// Default capacity of the request queue.
pub const DEFAULT_QUEUE: usize = 64;

/// Result of one applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the active piece moved or rotated
    pub moved: bool,
    /// Set when the command locked the active piece
    pub event: Option<LockEvent>,
    /// State after the command
    pub snapshot: GameSnapshot,
}

enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<CommandOutcome>,
    },
    Reset {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
}

/// Cloneable handle to a running session task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Move `session` into a new task on the current tokio runtime.
    ///
    /// The task stops once every handle is dropped.
    pub fn spawn(session: GameSession) -> Self {
        Self::spawn_with_capacity(session, DEFAULT_QUEUE)
    }

    pub fn spawn_with_capacity(session: GameSession, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(run_session(session, rx));
        Self { tx }
    }

    pub async fn apply(&self, command: Command) -> Result<CommandOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Command { command, reply }).await?;
        rx.await.map_err(|_| anyhow!("session task dropped the reply"))
    }

    pub async fn reset(&self) -> Result<GameSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Reset { reply }).await?;
        rx.await.map_err(|_| anyhow!("session task dropped the reply"))
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Snapshot { reply }).await?;
        rx.await.map_err(|_| anyhow!("session task dropped the reply"))
    }

    async fn send(&self, request: Request) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }
}

async fn run_session(mut session: GameSession, mut rx: mpsc::Receiver<Request>) {
    while let Some(request) = rx.recv().await {
        // A caller that gave up on its reply is not an error.
        match request {
            Request::Command { command, reply } => {
                let moved = session.apply(command);
                let event = session.take_lock_event();
                if event.is_some() {
                    debug!(command = command.as_str(), "command locked piece");
                }
                let _ = reply.send(CommandOutcome {
                    moved,
                    event,
                    snapshot: session.snapshot(),
                });
            }
            Request::Reset { reply } => {
                session.reset();
                let _ = reply.send(session.snapshot());
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
        }
    }
    debug!("session task stopped");
}
