//! Starjet - a pointer-steered arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! The crate never captures input or draws anything. Each frame the host hands
//! the simulation an optional pointer position and a clock reading, and gets
//! back a [`sim::WorldSnapshot`] to render.

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, World, WorldSnapshot};
pub use tuning::{Tuning, TuningError};

/// Fixed gameplay constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 25.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: u32 = 100;
    /// Permanent damage bonus granted per kill
    pub const KILL_DAMAGE_BONUS: f32 = 1.5;

    /// Projectile defaults (moves straight up)
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PROJECTILE_SPEED: f32 = 25.0;

    /// Enemy radius range (inclusive, pixels)
    pub const ENEMY_RADIUS_MIN: i32 = 15;
    pub const ENEMY_RADIUS_MAX: i32 = 35;
    /// Enemy fall speed range (inclusive, pixels per frame)
    pub const ENEMY_SPEED_MIN: i32 = 2;
    pub const ENEMY_SPEED_MAX: i32 = 5;
    /// Candidate max-health values; the usable prefix grows with kills
    pub const ENEMY_HEALTH_POOL: [u32; 11] = [10, 15, 20, 30, 40, 50, 60, 70, 80, 90, 100];
    /// Health lost when an enemy slips past the bottom edge
    pub const ESCAPE_PENALTY: u32 = 10;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_HEAL: u32 = 25;

    /// Particle defaults
    pub const PARTICLE_LIFE: u32 = 20;
    pub const PARTICLE_RADIUS_MIN: i32 = 2;
    pub const PARTICLE_RADIUS_MAX: i32 = 5;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    pub const PARTICLE_SHRINK: f32 = 0.95;

    /// Background star defaults
    pub const STAR_RADIUS_MIN: i32 = 1;
    pub const STAR_RADIUS_MAX: i32 = 2;
    pub const STAR_SPEED_MIN: f32 = 0.5;
    pub const STAR_SPEED_MAX: f32 = 1.5;
}
