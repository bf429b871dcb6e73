//! Play controller: turns player inputs and elapsed time into engine commands.
//!
//! The controller owns the start / pause / game-over phase and the gravity
//! schedule. It borrows the session for each call and never keeps it, so the
//! host decides where the session lives.
//!
//! Gravity runs on a period of `max(100, 1000 - 100 * level)` ms and restarts
//! whenever the level changes. Holding Down suspends gravity: each press or
//! auto-repeat drops the piece one row, and release hands control back to a
//! fresh gravity period. Terminals that never report release get a short
//! grace window instead.

use tracing::{debug, info};

use crate::core::{gravity_interval_ms, GameSession};
use crate::types::{Command, PlayPhase, SOFT_DROP_GRACE_MS};

/// Discrete player inputs, already decoupled from any key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// Start, pause, resume or restart depending on the phase
    Enter,
    Left,
    Right,
    Rotate,
    /// Down pressed or auto-repeated
    DownPressed,
    DownReleased,
}

/// Accumulating gravity timer for one level's period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    level: u32,
    elapsed_ms: u32,
    running: bool,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self {
            level: 0,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// (Re)start with a fresh period for `level`
    pub fn start(&mut self, level: u32) {
        self.level = level;
        self.elapsed_ms = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn period_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    pub fn accumulate(&mut self, elapsed_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Fire at most once if a period has fully elapsed.
    ///
    /// Whole periods beyond the first are dropped, so a stalled frame yields
    /// a single tick instead of a burst.
    pub fn take_due(&mut self) -> bool {
        let period = self.period_ms().max(1);
        if self.running && self.elapsed_ms >= period {
            self.elapsed_ms %= period;
            return true;
        }
        false
    }
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase machine plus gravity scheduling for one game session.
#[derive(Debug, Clone)]
pub struct Controller {
    phase: PlayPhase,
    gravity: GravityTimer,
    soft_drop_held: bool,
    soft_drop_grace_ms: u32,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            phase: PlayPhase::NotStarted,
            gravity: GravityTimer::new(),
            soft_drop_held: false,
            soft_drop_grace_ms: 0,
        }
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    /// Current gravity period, or None while gravity is suspended
    pub fn gravity_period_ms(&self) -> Option<u32> {
        self.gravity
            .is_running()
            .then(|| self.gravity.period_ms())
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Handle one player input. Returns true when the screen should be redrawn.
    pub fn handle(&mut self, input: KeyInput, session: &mut GameSession) -> bool {
        match input {
            KeyInput::Enter => {
                match self.phase {
                    PlayPhase::NotStarted | PlayPhase::Paused => self.play(session),
                    PlayPhase::Playing => self.pause(),
                    PlayPhase::GameOver => {
                        session.reset();
                        self.play(session);
                    }
                }
                true
            }
            KeyInput::Left => self.forward(Command::ShiftLeft, session),
            KeyInput::Right => self.forward(Command::ShiftRight, session),
            KeyInput::Rotate => self.forward(Command::Rotate, session),
            KeyInput::DownPressed => {
                if self.phase != PlayPhase::Playing {
                    return false;
                }
                self.gravity.stop();
                self.soft_drop_held = true;
                self.soft_drop_grace_ms = SOFT_DROP_GRACE_MS;
                self.forward(Command::SoftDrop, session)
            }
            KeyInput::DownReleased => {
                if self.soft_drop_held {
                    self.release_soft_drop(session);
                }
                false
            }
        }
    }

    /// Let `elapsed_ms` pass. Issues one tick if a gravity period completed
    /// and returns how many were issued (0 or 1); missed periods are not
    /// replayed.
    pub fn advance(&mut self, elapsed_ms: u32, session: &mut GameSession) -> u32 {
        if self.phase != PlayPhase::Playing {
            return 0;
        }

        if self.soft_drop_held {
            self.soft_drop_grace_ms = self.soft_drop_grace_ms.saturating_sub(elapsed_ms);
            if self.soft_drop_grace_ms == 0 {
                self.release_soft_drop(session);
            }
            return 0;
        }

        self.gravity.accumulate(elapsed_ms);

        if !self.gravity.take_due() {
            return 0;
        }

        session.tick();
        if !self.check_game_over(session) {
            let level = session.level();
            if level != self.gravity.level() {
                debug!(level, period_ms = gravity_interval_ms(level), "gravity restarted");
                self.gravity.start(level);
            }
        }
        1
    }

    fn play(&mut self, session: &GameSession) {
        self.phase = PlayPhase::Playing;
        self.soft_drop_held = false;
        self.gravity.start(session.level());
        info!(level = session.level(), "playing");
    }

    fn pause(&mut self) {
        self.phase = PlayPhase::Paused;
        self.soft_drop_held = false;
        self.gravity.stop();
        info!("paused");
    }

    fn release_soft_drop(&mut self, session: &GameSession) {
        self.soft_drop_held = false;
        self.soft_drop_grace_ms = 0;
        if self.phase == PlayPhase::Playing {
            self.gravity.start(session.level());
        }
    }

    fn forward(&mut self, command: Command, session: &mut GameSession) -> bool {
        if self.phase != PlayPhase::Playing {
            return false;
        }
        session.apply(command);
        self.check_game_over(session);
        true
    }

    fn check_game_over(&mut self, session: &GameSession) -> bool {
        if !session.is_game_over() {
            return false;
        }
        self.phase = PlayPhase::GameOver;
        self.soft_drop_held = false;
        self.gravity.stop();
        info!(score = session.score(), "game over");
        true
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
