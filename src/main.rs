//! Terminal runner (default binary).
//!
//! Pumps frames at a fixed rate: poll input until the next frame is due,
//! forward throttled commands, advance gravity with a monotonic timestamp,
//! render. See [`blocktris::config`] for the environment variables.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use blocktris::config::RunConfig;
use blocktris::core::{GameSession, GameSnapshot};
use blocktris::input::{handle_key_event, should_quit, RepeatThrottle};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::{Command, FRAME_MS};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    config.init_logging()?;
    let rules = config.load_rules()?;
    info!("starting with seed {}", config.seed);

    let session = GameSession::new(rules, config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let mut throttle = RepeatThrottle::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);
    let mut next_frame = clock;

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit at score {}", session.score());
                        return Ok(());
                    }
                    let now_ms = clock.elapsed().as_millis() as u64;
                    if let Some(command) = handle_key_event(key, session.status()) {
                        if throttle.allow(command, now_ms) {
                            if command == Command::Reset {
                                throttle.clear();
                            }
                            session.apply(command);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            continue;
        }

        session.tick(clock.elapsed().as_millis() as u64);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        next_frame = Instant::now() + frame;
    }
}
