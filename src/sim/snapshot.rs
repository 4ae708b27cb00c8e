//! Read-only view of the world for renderers
//!
//! Built once per frame. Rendering should be a pure function of this value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{PowerUpKind, Rgb};
use super::state::{GameEvent, GamePhase, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub damage: f32,
}

/// Position and size of a plain circle (projectiles, stars)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub max_health: u32,
    /// Remaining health in [0, 1]
    pub health_ratio: f32,
    /// Health bar is only drawn once the enemy has been hit
    pub damaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Everything a frame needs to be drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub frame: u64,
    pub player: PlayerView,
    pub projectiles: Vec<CircleView>,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub powerups: Vec<PowerUpView>,
    pub stars: Vec<CircleView>,
    /// Enemies destroyed this playthrough
    pub kills: u32,
    /// Best kill count of any playthrough this process
    pub best_kills: u32,
    /// Current seconds between enemy spawns
    pub spawn_interval: f64,
    /// Events raised since the previous snapshot, oldest first
    pub events: Vec<GameEvent>,
}

impl World {
    /// Capture the current state
    ///
    /// Pending events are handed over to the snapshot and cleared.
    pub fn snapshot(&mut self) -> WorldSnapshot {
        let session = &self.session;
        let player = &session.player;

        WorldSnapshot {
            phase: self.phase,
            frame: self.frame,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                health: player.health,
                damage: player.damage,
            },
            projectiles: session
                .projectiles
                .iter()
                .map(|p| CircleView {
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect(),
            enemies: session
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    radius: e.radius,
                    color: e.color,
                    max_health: e.max_health,
                    health_ratio: e.health_ratio(),
                    damaged: e.health < e.max_health as f32,
                })
                .collect(),
            particles: session
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            powerups: session
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    radius: p.radius,
                    kind: p.kind,
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|s| CircleView {
                    pos: s.pos,
                    radius: s.radius,
                })
                .collect(),
            kills: session.kills,
            best_kills: self.best_kills,
            spawn_interval: session.spawner.interval,
            events: std::mem::take(&mut self.events),
        }
    }
}
