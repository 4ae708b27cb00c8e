//! Per-frame collision resolution
//!
//! Runs after every entity has moved. The order of the stages decides which
//! outcome wins when several overlaps happen in one frame:
//!
//! 1. projectiles damage enemies (at most one hit per enemy per frame)
//! 2. destroyed enemies are scored
//! 3. enemies ram the player
//! 4. enemies escape through the bottom edge
//! 5. power-ups are collected or fall away
//! 6. particles age
//! 7. the run ends if the player is out of health
//!
//! Removals are marked during a scan and compacted afterwards, so nothing
//! removed in a stage is seen by a later one.

use rand::Rng;

use super::collision::{below_bottom, overlaps};
use super::entity::{Particle, PowerUp, PowerUpKind};
use super::state::{GameEvent, World};
use crate::consts::{ESCAPE_PENALTY, KILL_DAMAGE_BONUS, PLAYER_MAX_HEALTH, POWERUP_HEAL};

/// Apply every collision stage in order
pub(crate) fn resolve(world: &mut World) {
    projectile_hits(world);
    score_destroyed(world);
    enemy_contacts(world);
    collect_powerups(world);
    age_particles(world);
    world.check_game_over();
}

/// Drop entries whose flag is set, keeping order
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    debug_assert_eq!(items.len(), removed.len());
    let mut flags = removed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Each projectile damages the first live enemy it overlaps and is consumed
///
/// An enemy absorbs at most one projectile per frame; later shots that overlap
/// it look for another target or fly on.
fn projectile_hits(world: &mut World) {
    let session = &mut world.session;
    let damage = session.player.damage;
    let mut spent = vec![false; session.projectiles.len()];
    let mut struck = vec![false; session.enemies.len()];

    for (shot, used) in session.projectiles.iter().zip(spent.iter_mut()) {
        let target = session
            .enemies
            .iter()
            .zip(&struck)
            .position(|(enemy, &hit)| !hit && !enemy.is_destroyed() && overlaps(shot, enemy));
        if let Some(index) = target {
            session.enemies[index].take_hit(damage);
            struck[index] = true;
            *used = true;
        }
    }

    compact(&mut session.projectiles, &spent);
}

/// Count kills, grow player damage, explode and maybe drop a power-up
fn score_destroyed(world: &mut World) {
    let session = &mut world.session;
    let mut removed = vec![false; session.enemies.len()];

    for (enemy, gone) in session.enemies.iter().zip(removed.iter_mut()) {
        if !enemy.is_destroyed() {
            continue;
        }
        session.kills += 1;
        session.player.damage += KILL_DAMAGE_BONUS;
        explode(
            &mut world.rng,
            &mut session.particles,
            enemy.pos,
            world.tuning.explosion_particles,
        );
        world.events.push(GameEvent::EnemyDestroyed {
            pos: enemy.pos,
            max_health: enemy.max_health,
        });
        log::debug!(
            "Enemy destroyed (max health {}), kills={} damage={:.1}",
            enemy.max_health,
            session.kills,
            session.player.damage
        );

        if world.rng.random_bool(world.tuning.powerup_drop_chance) {
            let kind = PowerUpKind::Health;
            session.powerups.push(PowerUp::new(enemy.pos, kind));
            world.events.push(GameEvent::PowerUpDropped {
                pos: enemy.pos,
                kind,
            });
            log::debug!("Power-up dropped at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
        }
        *gone = true;
    }

    compact(&mut session.enemies, &removed);
}

/// Enemies that ram the player or escape the bottom edge cost health
fn enemy_contacts(world: &mut World) {
    let frame_height = world.frame_height();
    let session = &mut world.session;
    let mut removed = vec![false; session.enemies.len()];

    for (enemy, gone) in session.enemies.iter().zip(removed.iter_mut()) {
        if overlaps(enemy, &session.player) {
            let damage = enemy.ram_damage();
            session.player.health = session.player.health.saturating_sub(damage);
            explode(
                &mut world.rng,
                &mut session.particles,
                enemy.pos,
                world.tuning.explosion_particles,
            );
            world.events.push(GameEvent::PlayerHit { damage });
            *gone = true;
        } else if below_bottom(enemy.pos, enemy.radius, frame_height) {
            session.player.health = session.player.health.saturating_sub(ESCAPE_PENALTY);
            world.events.push(GameEvent::EnemyEscaped {
                penalty: ESCAPE_PENALTY,
            });
            *gone = true;
        }
    }

    compact(&mut session.enemies, &removed);
}

/// Pickups heal on contact; missed ones fall off the bottom without penalty
fn collect_powerups(world: &mut World) {
    let frame_height = world.frame_height();
    let session = &mut world.session;
    let mut removed = vec![false; session.powerups.len()];

    for (pickup, gone) in session.powerups.iter().zip(removed.iter_mut()) {
        if overlaps(pickup, &session.player) {
            let healed = match pickup.kind {
                PowerUpKind::Health => {
                    let before = session.player.health;
                    session.player.health = (before + POWERUP_HEAL).min(PLAYER_MAX_HEALTH);
                    session.player.health - before
                }
            };
            world.events.push(GameEvent::PowerUpCollected {
                kind: pickup.kind,
                healed,
            });
            *gone = true;
        } else if pickup.is_offscreen(frame_height) {
            *gone = true;
        }
    }

    compact(&mut session.powerups, &removed);
}

fn age_particles(world: &mut World) {
    let particles = &mut world.session.particles;
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(|p| !p.is_expired());
}

/// Emit a burst of debris at `pos`
pub(crate) fn explode<R: Rng + ?Sized>(
    rng: &mut R,
    particles: &mut Vec<Particle>,
    pos: glam::Vec2,
    count: usize,
) {
    particles.extend((0..count).map(|_| Particle::burst(&mut *rng, pos)));
}
