//! Terminal blockfall runner (default binary).
//!
//! Reads `BLOCKFALL_*` settings from the environment, drives the engine with a
//! monotonic clock and draws every frame through the terminal sink.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameConfig, GameController};
use blockfall::event_log::{EventLog, EventRecord};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, TerminalRenderer, TerminalSink, Viewport};
use blockfall::types::GameAction;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let mut log = EventLog::open(config.event_log_path.as_deref())?;
    let mut game = GameController::with_config(&config, clock_seed());

    eprintln!(
        "[blockfall] seed={} start_level={} lock_delay_ms={}",
        game.pieces().seed(),
        config.start_level,
        config.lock_delay_ms
    );
    if let Some(path) = config.event_log_path.as_deref() {
        eprintln!("[blockfall] event log: {path}");
    }

    let mut sink = TerminalSink::new(
        GameView::default(),
        TerminalRenderer::new(),
        Viewport::new(80, 24),
    );
    sink.enter()?;

    let result = run(&mut game, &mut sink, &mut log, config.start_level);

    // Always try to restore terminal state.
    let _ = sink.exit();

    eprintln!(
        "[blockfall] episode={} score={} level={} lines={} frames={} events={}",
        game.episode(),
        game.score(),
        game.level(),
        game.lines(),
        sink.frames(),
        log.written()
    );
    result
}

fn run(
    game: &mut GameController,
    sink: &mut TerminalSink,
    log: &mut EventLog,
    start_level: u32,
) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    log.record(&EventRecord::Start {
        at_ms: 0,
        seed: game.pieces().seed(),
        episode: game.episode(),
        start_level,
    })?;

    loop {
        let frame_start = Instant::now();
        game.frame(now_ms(), sink);
        if let Some(err) = sink.take_error() {
            return Err(err.context("terminal draw failed"));
        }
        drain_events(game, log, now_ms())?;

        // Input until the next frame is due.
        let timeout = FRAME.saturating_sub(frame_start.elapsed());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                game.apply_action(action);
                if action == GameAction::Restart {
                    log.record(&EventRecord::Reset {
                        at_ms: now_ms(),
                        episode: game.episode(),
                    })?;
                } else {
                    drain_events(game, log, now_ms())?;
                }
            }
            Event::Resize(w, h) => sink.resize(w, h),
            _ => {}
        }
    }
}

/// Forward the engine's last lock event (and a game over) to the log.
fn drain_events(game: &mut GameController, log: &mut EventLog, at_ms: u64) -> Result<()> {
    let Some(lock) = game.take_last_event() else {
        return Ok(());
    };
    log.record(&EventRecord::Lock { at_ms, lock })
        .context("failed to write event log")?;
    if lock.game_over {
        log.record(&EventRecord::GameOver {
            at_ms,
            episode: game.episode(),
            score: lock.score,
            level: lock.level,
            lines: lock.lines,
        })?;
    }
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
