//! Scroll Arcade headless runner
//!
//! Drives the engine through the fixed-rate scheduler with a simple
//! autopilot standing in for a human, restarts on game over, and prints the
//! final snapshot as JSON.
//!
//! Usage:
//!   scroll-arcade [flight|platformer] [--seed N] [--ticks N] [--runs N] [--config <path>]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scroll_arcade::sim::{GameState, ObjectKind};
use scroll_arcade::{Engine, EngineConfig, FixedTimestep, GameStatus, Intent};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Flight,
    Platformer,
}

#[derive(Parser)]
#[command(name = "scroll-arcade")]
#[command(about = "Run a scrolling arcade session headless and print the final state")]
struct Args {
    /// Built-in configuration to start from
    #[arg(value_enum, default_value = "flight")]
    preset: Preset,

    /// JSON configuration file, replaces the preset
    #[arg(long)]
    config: Option<String>,

    /// Seed for obstacle generation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated ticks to run
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Quit after this many runs have ended instead of restarting
    #[arg(long)]
    runs: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path))?;
            EngineConfig::from_json(&json).with_context(|| format!("Invalid config {}", path))?
        }
        None => match args.preset {
            Preset::Flight => EngineConfig::flight(),
            Preset::Platformer => EngineConfig::platformer(),
        },
    };

    let mut engine = Engine::new(config, args.seed).context("Failed to create engine")?;
    log::info!("Scroll Arcade starting with seed {}", args.seed);

    let mut timestep = FixedTimestep::new(engine.config().tick_rate);
    let dt = timestep.dt();
    let mut simulated = 0;

    'frames: while simulated < args.ticks {
        // One host frame's worth of time; the scheduler decides the tick count
        for _ in 0..timestep.push(dt) {
            autopilot(&mut engine, args.runs);
            if engine.intents().quit_requested() {
                log::info!("Quit after {} runs", engine.state().runs);
                break 'frames;
            }
            engine.advance(dt);
            simulated += 1;
        }
    }

    log::info!(
        "Finished {} ticks: {} runs, best score {}",
        simulated,
        engine.state().runs,
        engine.state().best_score
    );
    let snapshot = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{}", snapshot);
    Ok(())
}

/// Press whatever a naive player would press this tick
fn autopilot(engine: &mut Engine, max_runs: Option<u32>) {
    let state = engine.state();
    let intent = match state.status {
        GameStatus::NotStarted => Some(Intent::Start),
        GameStatus::GameOver if max_runs.is_some_and(|max| state.runs >= max) => {
            Some(Intent::Quit)
        }
        GameStatus::GameOver => Some(Intent::Restart),
        GameStatus::Playing if engine.config().lethal_ground => flyer_input(engine, state),
        GameStatus::Playing => runner_input(state),
    };

    if let Some(intent) = intent {
        engine.intents_mut().press(intent);
    }
}

/// Flap when below the center of the next opening, or the spawn height if none
fn flyer_input(engine: &Engine, state: &GameState) -> Option<Intent> {
    let reference_x = engine.config().world.reference_x;
    let target = state
        .objects
        .iter()
        .filter(|obj| obj.trailing_edge() > reference_x)
        .find_map(|obj| match obj.kind {
            ObjectKind::Gap { center, .. } => Some(center),
            _ => None,
        })
        .unwrap_or(engine.config().avatar.spawn.y);

    let avatar = &state.avatar;
    (avatar.pos.y > target && avatar.vel.y >= 0.0).then_some(Intent::Flap)
}

/// Jump over hazards closing in ahead of the runner
fn runner_input(state: &GameState) -> Option<Intent> {
    let avatar = &state.avatar;
    let front = avatar.pos.x + avatar.size.x;
    let threat = state.objects.iter().any(|obj| {
        matches!(obj.kind, ObjectKind::Hazard { .. })
            && obj.x > front
            && obj.x - front < 60.0
            && obj.bounds().is_some_and(|b| b.bottom() > avatar.pos.y)
    });
    (threat && avatar.on_ground).then_some(Intent::Flap)
}
