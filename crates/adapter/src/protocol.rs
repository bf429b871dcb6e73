//! Protocol module - JSON observation records
//!
//! One `Observation` is one line of JSON: the full board (active piece
//! overlaid), the active and next pieces, the counters and, when the record
//! was taken right after a lock, what that lock did. Field names are
//! snake_case; piece kinds are their letters.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;
use crate::types::{LockEvent, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

impl Default for ObservationType {
    fn default() -> Self {
        Self::Observation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardObservation {
    pub width: u8,
    pub height: u8,
    /// Row-major, top row first; 0 is empty, 1-7 are piece colours.
    pub cells: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveObservation {
    pub kind: String,
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockObservation {
    pub kind: String,
    pub lines_cleared: u32,
    pub points: u32,
    pub game_over: bool,
}

impl From<LockEvent> for LockObservation {
    fn from(event: LockEvent) -> Self {
        Self {
            kind: event.kind.as_str().to_string(),
            lines_cleared: event.lines_cleared,
            points: event.points,
            game_over: event.game_over,
        }
    }
}

/// Full game state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObservationType,
    pub seq: u64,
    /// Unix time in milliseconds
    pub ts: u64,
    pub board: BoardObservation,
    pub active: Option<ActiveObservation>,
    pub next: String,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LockObservation>,
}

impl Observation {
    pub fn from_snapshot(
        seq: u64,
        ts: u64,
        snap: &GameSnapshot,
        last_event: Option<LockEvent>,
    ) -> Self {
        Self {
            msg_type: ObservationType::Observation,
            seq,
            ts,
            board: BoardObservation {
                width: BOARD_WIDTH,
                height: BOARD_HEIGHT,
                cells: snap.board.iter().map(|row| row.to_vec()).collect(),
            },
            active: snap.active.map(|a| ActiveObservation {
                kind: a.kind.as_str().to_string(),
                x: a.x,
                y: a.y,
            }),
            next: snap.next_kind.as_str().to_string(),
            score: snap.score,
            lines: snap.lines,
            level: snap.level,
            game_over: snap.game_over,
            seed: snap.seed,
            last_event: last_event.map(LockObservation::from),
        }
    }

    /// Serialize as one newline-terminated JSON line.
    pub fn to_json_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Current Unix time in milliseconds (0 if the clock is before the epoch).
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameSession};
    use crate::types::PieceKind;

    #[test]
    fn observation_shape() {
        let session = GameSession::from_parts(Board::new(), PieceKind::T, PieceKind::O, 9);
        let obs = Observation::from_snapshot(1, 42, &session.snapshot(), None);
        let v: serde_json::Value = serde_json::from_str(&obs.to_json_line().unwrap()).unwrap();

        assert_eq!(v["type"], "observation");
        assert_eq!(v["seq"], 1);
        assert_eq!(v["board"]["width"], 10);
        assert_eq!(v["board"]["cells"].as_array().unwrap().len(), 20);
        assert_eq!(v["active"]["kind"], "T");
        assert_eq!(v["active"]["y"], -1);
        assert_eq!(v["next"], "O");
        assert_eq!(v["seed"], 9);
        assert!(v.get("last_event").is_none());
    }

    #[test]
    fn lock_event_is_included() {
        let mut session = GameSession::from_parts(Board::new(), PieceKind::O, PieceKind::T, 1);
        while session.tick() {}
        let event = session.take_lock_event();
        let obs = Observation::from_snapshot(2, 0, &session.snapshot(), event);

        let line = obs.to_json_line().unwrap();
        assert!(line.ends_with('\n'));
        let back: Observation = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(back, obs);
        let lock = back.last_event.unwrap();
        assert_eq!(lock.kind, "O");
        assert_eq!(lock.lines_cleared, 0);
    }
}
