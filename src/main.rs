//! Starjet headless runner
//!
//! Drives the simulation with a synthetic clock and an autopilot pointer,
//! standing in for the capture/render front end. Useful for soak runs and for
//! dumping snapshots.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use starjet::sim::{GamePhase, World, WorldSnapshot};
use starjet::tuning::Tuning;

/// Run the Starjet simulation without a display
#[derive(Parser, Debug)]
#[command(name = "starjet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of frames to simulate
    #[arg(short, long, default_value = "1800")]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value = "30")]
    fps: f64,

    /// RNG seed (defaults to the system clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON tuning file
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// How many times to restart after a game over before quitting
    #[arg(short, long, default_value = "2")]
    resets: u32,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Commands the front end can send between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Reset,
    Quit,
}

/// Stand-in for the hand tracker: shows up after a short delay, then steers
/// under the most threatening enemy while staying near the bottom edge.
struct Autopilot {
    warmup_frames: u64,
    cruise_y: f32,
}

impl Autopilot {
    fn new(tuning: &Tuning) -> Self {
        let (_, y) = tuning.player_spawn();
        Self {
            warmup_frames: 15,
            cruise_y: y,
        }
    }

    fn pointer(&self, frame: u64, last: Option<&WorldSnapshot>) -> Option<Vec2> {
        if frame < self.warmup_frames {
            return None;
        }
        let Some(snapshot) = last else {
            return None;
        };

        // Lowest enemy is the one closest to escaping
        let threat = snapshot
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        let x = match threat {
            Some(enemy) => enemy.pos.x,
            None => snapshot.player.pos.x,
        };
        Some(Vec2::new(x, self.cruise_y))
    }
}

fn load_tuning(path: Option<&PathBuf>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match Tuning::load(path) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(err) => {
            log::warn!("{err}; using default tuning");
            Tuning::default()
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let tuning = load_tuning(cli.tuning.as_ref());
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let fps = if cli.fps > 0.0 { cli.fps } else { 30.0 };
    log::info!("Starjet (headless) starting: seed={seed}, {} frames at {fps} fps", cli.frames);

    let autopilot = Autopilot::new(&tuning);
    let mut world = match World::new(tuning, seed) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Cannot start: {err}");
            std::process::exit(1);
        }
    };
    let mut resets_left = cli.resets;
    let mut last: Option<WorldSnapshot> = None;
    let mut games = 0u32;

    for frame in 0..cli.frames {
        let now = frame as f64 / fps;
        let pointer = autopilot.pointer(frame, last.as_ref());
        let snapshot = world.step_frame(pointer, now);

        let mut command = None;
        if snapshot.phase == GamePhase::GameOver
            && last.as_ref().map(|s| s.phase) != Some(GamePhase::GameOver)
        {
            games += 1;
            println!(
                "game {games}: {} kills at frame {} ({:.1}s), damage {:.1}",
                snapshot.kills, snapshot.frame, now, snapshot.player.damage
            );
            command = Some(if resets_left > 0 {
                resets_left -= 1;
                Command::Reset
            } else {
                Command::Quit
            });
        }
        last = Some(snapshot);

        match command {
            Some(Command::Reset) => {
                world.request_reset();
            }
            Some(Command::Quit) => break,
            None => {}
        }
    }

    let Some(snapshot) = last else {
        log::warn!("No frames simulated");
        return;
    };
    println!(
        "final: phase={:?} frame={} kills={} best={} health={} enemies={} spawn_interval={:.3}s",
        snapshot.phase,
        snapshot.frame,
        snapshot.kills,
        snapshot.best_kills,
        snapshot.player.health,
        snapshot.enemies.len(),
        snapshot.spawn_interval
    );

    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Could not serialize snapshot: {err}"),
        }
    }
}
