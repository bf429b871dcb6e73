//! Terminal runner (default binary).
//!
//! Polls crossterm for keys once per frame, feeds them and the elapsed time
//! to the controller, and redraws through the diffing renderer.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::adapter::StateRecorder;
use blockfall::core::{GameSession, GameSnapshot};
use blockfall::input::{handle_key_event, should_quit, Controller};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut recorder = match &config.state_log {
        Some(path) => Some(StateRecorder::start(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, recorder.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(recorder) = recorder {
        recorder.finish()?;
    }
    result
}

/// The terminal belongs to the renderer, so logs only go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    mut recorder: Option<&mut StateRecorder>,
) -> Result<()> {
    let mut session = match config.seed {
        Some(seed) => GameSession::new(seed),
        None => GameSession::from_entropy(),
    };
    info!(seed = session.seed(), frame_ms = config.frame_ms, "session created");

    let mut controller = Controller::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(controller.phase(), &snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(input) = handle_key_event(key) {
                        controller.handle(input, &mut session);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Advance by whole milliseconds and carry the remainder.
        let elapsed_ms = last.elapsed().as_millis() as u32;
        if elapsed_ms > 0 {
            last += Duration::from_millis(elapsed_ms as u64);
            controller.advance(elapsed_ms, &mut session);
        }

        while let Some(event) = session.take_lock_event() {
            if let Some(recorder) = recorder.as_deref_mut() {
                session.snapshot_into(&mut snap);
                recorder.record(&snap, Some(event));
            }
        }
    }
}
