//! Gameplay and cosmetic entities
//!
//! Each entity owns its state and a per-frame `update` rule. Interactions
//! between entities (damage, pickups, removal) live in the resolve pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::consts::*;

/// RGB color tag (cosmetic only)
pub type Rgb = [u8; 3];

/// Explosion palette: orange, yellow, white
pub const PARTICLE_COLORS: [Rgb; 3] = [[255, 165, 0], [255, 255, 0], [255, 255, 255]];

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Where the pointer last asked the ship to go
    pub target: Vec2,
    /// Fraction of the remaining distance closed per frame, in (0, 1]
    pub smoothing: f32,
    pub radius: f32,
    /// Always within [0, PLAYER_MAX_HEALTH]
    pub health: u32,
    /// Damage dealt per projectile; grows with every kill
    pub damage: f32,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: u32,
    pub max_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2, smoothing: f32, max_cooldown: u32) -> Self {
        debug_assert!(smoothing > 0.0 && smoothing <= 1.0, "smoothing out of range");
        Self {
            pos,
            target: pos,
            smoothing: smoothing.clamp(f32::EPSILON, 1.0),
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            damage: PLAYER_BASE_DAMAGE,
            shoot_cooldown: 0,
            max_cooldown,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Ease toward the target and tick down the shot cooldown
    ///
    /// Exponential smoothing: the gap shrinks by `smoothing` each frame and is
    /// never overshot.
    pub fn update(&mut self) {
        self.pos += (self.target - self.pos) * self.smoothing;
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire a projectile from the nose of the ship if the cooldown allows
    pub fn shoot(&mut self) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = self.max_cooldown;
        Some(Projectile::new(Vec2::new(self.pos.x, self.pos.y - self.radius)))
    }
}

impl Circle for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A player shot travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= self.speed;
    }

    /// Left through the top edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.y < 0.0
    }
}

impl Circle for Projectile {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Usable prefix of [`ENEMY_HEALTH_POOL`] for a given kill count
///
/// `max_index = min(len - 1, kills / 2)` and the prefix runs one element past
/// it, capped at the pool length.
pub fn health_pool(kills: u32) -> &'static [u32] {
    let last = ENEMY_HEALTH_POOL.len() - 1;
    let max_index = last.min(kills as usize / 2);
    let end = (max_index + 2).min(ENEMY_HEALTH_POOL.len());
    &ENEMY_HEALTH_POOL[..end]
}

/// A falling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Fixed at creation
    pub max_health: u32,
    /// Never above `max_health`; at or below zero means destroyed
    pub health: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f32, max_health: u32, speed: f32, color: Rgb) -> Self {
        debug_assert!(radius > 0.0, "enemy radius must be positive");
        debug_assert!(max_health > 0, "enemy max health must be positive");
        let max_health = max_health.max(1);
        Self {
            pos,
            radius: radius.max(1.0),
            max_health,
            health: max_health as f32,
            speed,
            color,
        }
    }

    /// Roll a new enemy just above the top edge
    ///
    /// Tougher enemies become possible as `kills` rises.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, kills: u32, frame_width: u32) -> Self {
        let radius = rng.random_range(ENEMY_RADIUS_MIN..=ENEMY_RADIUS_MAX);
        let right = (frame_width as i32 - radius).max(radius);
        let x = rng.random_range(radius..=right);

        let pool = health_pool(kills);
        let max_health = pool[rng.random_range(0..pool.len())];

        let speed = rng.random_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX);
        let color: Rgb = [
            rng.random_range(100..=255),
            rng.random_range(0..=100),
            rng.random_range(100..=255),
        ];

        Self::new(
            Vec2::new(x as f32, -radius as f32),
            radius as f32,
            max_health,
            speed as f32,
            color,
        )
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn take_hit(&mut self, damage: f32) {
        self.health -= damage.max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Remaining health as a fraction of max, for health bars
    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Health lost by the player when this enemy rams it
    pub fn ram_damage(&self) -> u32 {
        self.max_health / 2
    }
}

impl Circle for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Explosion debris (visual only)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Frames left to live
    pub life: u32,
}

impl Particle {
    pub fn burst<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Self {
        let radius = rng.random_range(PARTICLE_RADIUS_MIN..=PARTICLE_RADIUS_MAX) as f32;
        let color = PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())];
        let vx = rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED);
        let vy = rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED);
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            radius,
            color,
            life: PARTICLE_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.radius *= PARTICLE_SHRINK;
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores health
    Health,
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    pub speed: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            radius: POWERUP_RADIUS,
            speed: POWERUP_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    /// Center has passed the bottom edge
    pub fn is_offscreen(&self, frame_height: f32) -> bool {
        self.pos.y > frame_height
    }
}

impl Circle for PowerUp {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A drifting background star; wraps to the top instead of dying
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Star {
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, frame_width: u32, frame_height: u32) -> Self {
        let x = rng.random_range(0..=frame_width);
        let y = rng.random_range(0..=frame_height);
        Self {
            pos: Vec2::new(x as f32, y as f32),
            radius: rng.random_range(STAR_RADIUS_MIN..=STAR_RADIUS_MAX) as f32,
            speed: rng.random_range(STAR_SPEED_MIN..=STAR_SPEED_MAX),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, frame_width: u32, frame_height: u32) {
        self.pos.y += self.speed;
        if self.pos.y > frame_height as f32 {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0..=frame_width) as f32;
        }
    }
}
