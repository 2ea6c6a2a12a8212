//! Turret Breaker headless driver
//!
//! Runs a session under a fixed-step frame loop with the demo autopilot on
//! the trigger. Rendering and menus belong to a separate host; this binary
//! only logs lifecycle events and prints the final snapshot as JSON.
//!
//! Usage: `turret-breaker [seed] [settings.json]`

use turret_breaker::Settings;
use turret_breaker::consts::*;
use turret_breaker::sim::{Session, SessionEvent, SessionPhase, TickInput, tick};

/// Stop the demo after this many levels
const DEMO_LEVELS: u32 = 10;
/// Hard cap on simulated host frames
const MAX_FRAMES: u64 = 200_000;
/// Simulated host frame time (a 50 Hz display driving 60 Hz ticks)
const HOST_FRAME_SECS: f64 = 1.0 / 50.0;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => rand::random(),
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    log::info!("Turret Breaker (headless) starting, seed {}", seed);
    let mut session = Session::new(settings, seed)?;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let tick_secs = 1.0 / f64::from(TICKS_PER_SECOND);
    let mut accumulator = 0.0;
    let mut frames = 0u64;
    while frames < MAX_FRAMES {
        accumulator += HOST_FRAME_SECS;
        let mut substeps = 0;
        while accumulator >= tick_secs && substeps < MAX_SUBSTEPS {
            tick(&mut session, &input);
            accumulator -= tick_secs;
            substeps += 1;
        }
        frames += 1;

        for event in session.drain_events() {
            match event {
                SessionEvent::LevelStart {
                    level,
                    granted_shots,
                } => log::info!("level {} started (+{} shots)", level, granted_shots),
                SessionEvent::LevelComplete { level } => {
                    let prize = session.pending_prize().map(|p| (p.name(), p.balls));
                    log::info!("level {} complete, prize {:?}", level, prize);
                }
                SessionEvent::GameOver { level } => log::info!("game over on level {}", level),
                SessionEvent::StatsUpdated { remaining_shots } => {
                    log::debug!("{} shots left", remaining_shots)
                }
            }
        }

        match session.phase() {
            SessionPhase::LevelComplete if session.level() < DEMO_LEVELS => {
                session.advance()?;
            }
            SessionPhase::InProgress | SessionPhase::Advancing => {}
            SessionPhase::LevelComplete | SessionPhase::GameOver => break,
        }
    }

    log::info!(
        "finished after {} frames, {} ticks ({:.1}s simulated)",
        frames,
        session.ticks(),
        frames as f64 * HOST_FRAME_SECS
    );
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
