//! Game state and the phase machine
//!
//! A `World` owns everything for one process: the seeded RNG, the background
//! starfield and the current play `Session`. Resetting swaps the session out
//! wholesale; the stars and the RNG stream carry on.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Particle, Player, PowerUp, PowerUpKind, Projectile, Star};
use super::spawn::SpawnDirector;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first pointer signal
    #[default]
    StartScreen,
    /// Active gameplay
    Playing,
    /// Player ran out of health; waiting for a reset
    GameOver,
}

/// Notable things that happened since the previous snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Shot { pos: Vec2 },
    EnemySpawned { pos: Vec2, max_health: u32 },
    EnemyDestroyed { pos: Vec2, max_health: u32 },
    /// An enemy rammed the player
    PlayerHit { damage: u32 },
    /// An enemy slipped past the bottom edge
    EnemyEscaped { penalty: u32 },
    PowerUpDropped { pos: Vec2, kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind, healed: u32 },
    GameOver { kills: u32 },
    Reset,
}

/// Everything that belongs to a single playthrough
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub player: Player,
    /// Entity lists, in spawn order
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<PowerUp>,
    /// Enemies destroyed this playthrough
    pub kills: u32,
    pub spawner: SpawnDirector,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.player_spawn();
        Self {
            player: Player::new(
                Vec2::new(x, y),
                tuning.player_smoothing,
                tuning.shoot_cooldown,
            ),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            kills: 0,
            spawner: SpawnDirector::new(tuning),
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct World {
    /// Validated at construction
    pub(crate) tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Single source of randomness for gameplay and cosmetics
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Number of frames stepped so far
    pub frame: u64,
    pub session: Session,
    /// Background starfield; lives for the whole process
    pub stars: Vec<Star>,
    /// Highest kill count reached by any session so far
    pub best_kills: u32,
    /// Events raised since the last snapshot; drained by `snapshot`
    pub(crate) events: Vec<GameEvent>,
}

impl World {
    /// Create a world on the start screen
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..tuning.star_count)
            .map(|_| Star::scatter(&mut rng, tuning.frame_width, tuning.frame_height))
            .collect();

        Ok(Self {
            session: Session::new(&tuning),
            tuning,
            seed,
            rng,
            phase: GamePhase::StartScreen,
            frame: 0,
            stars,
            best_kills: 0,
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn frame_height(&self) -> f32 {
        self.tuning.frame_height as f32
    }

    /// Leave the start screen; the spawn timer starts at `now`
    pub(crate) fn start(&mut self, now: f64) {
        debug_assert_eq!(self.phase, GamePhase::StartScreen);
        self.phase = GamePhase::Playing;
        self.session.spawner.rebase(now);
        self.events.push(GameEvent::Started);
        log::info!("Game started (seed {})", self.seed);
    }

    /// End the run if the player is out of health
    ///
    /// Only acts while playing, so the transition fires exactly once per run.
    pub(crate) fn check_game_over(&mut self) {
        if self.phase != GamePhase::Playing || self.session.player.health > 0 {
            return;
        }
        self.session.player.health = 0;
        self.phase = GamePhase::GameOver;

        let kills = self.session.kills;
        if kills > self.best_kills {
            self.best_kills = kills;
        }
        self.events.push(GameEvent::GameOver { kills });
        log::info!(
            "Game over after {} frames: {} kills (best {})",
            self.frame,
            kills,
            self.best_kills
        );
    }

    /// Start a fresh session after a game over
    ///
    /// Ignored in any other phase. Returns whether the reset happened. The
    /// spawn timer restarts from the first frame stepped after the reset.
    pub fn request_reset(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Reset ignored in phase {:?}", self.phase);
            return false;
        }
        self.session = Session::new(&self.tuning);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
        true
    }
}
