//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock and pointer arrive as explicit inputs
//! - Seeded RNG only, owned by the `World`
//! - Entity lists keep spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
mod resolve;
pub mod snapshot;
pub mod spawn;
pub mod state;
mod tick;

pub use collision::{Circle, circles_overlap, overlaps};
pub use entity::{Enemy, Particle, Player, PowerUp, PowerUpKind, Projectile, Star, health_pool};
pub use snapshot::{CircleView, EnemyView, ParticleView, PlayerView, PowerUpView, WorldSnapshot};
pub use spawn::SpawnDirector;
pub use state::{GameEvent, GamePhase, Session, World};
