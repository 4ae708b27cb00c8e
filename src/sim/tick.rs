//! Per-frame simulation step
//!
//! Core game loop that advances the world by one rendered frame.

use glam::Vec2;

use super::entity::Enemy;
use super::resolve::resolve;
use super::snapshot::WorldSnapshot;
use super::state::{GameEvent, GamePhase, World};

/// Inputs for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TickInput {
    /// Where the controlling pointer is, in playfield pixels (None = no signal)
    pub(crate) pointer: Option<Vec2>,
    /// Monotonic clock reading in seconds
    pub(crate) now: f64,
}

impl TickInput {
    pub(crate) fn new(pointer: Option<Vec2>, now: f64) -> Self {
        Self { pointer, now }
    }
}

/// Advance the world by one frame
///
/// On the start screen a pointer signal starts the game and the same frame is
/// then played with that pointer. After game over only the starfield moves.
/// Events pile up in the world until the next snapshot drains them.
pub(crate) fn tick(world: &mut World, input: &TickInput) {
    world.frame += 1;

    if world.phase == GamePhase::StartScreen && input.pointer.is_some() {
        world.start(input.now);
    }

    if world.phase == GamePhase::Playing {
        play(world, input);
    }

    update_stars(world);
}

fn play(world: &mut World, input: &TickInput) {
    let session = &mut world.session;

    // Steer and fire only while the pointer is visible
    if let Some(target) = input.pointer {
        session.player.set_target(target);
        if let Some(shot) = session.player.shoot() {
            world.events.push(GameEvent::Shot { pos: shot.pos });
            session.projectiles.push(shot);
        }
    }
    session.player.update();

    if session.spawner.poll(input.now) {
        let enemy = Enemy::spawn(&mut world.rng, session.kills, world.tuning.frame_width);
        log::debug!(
            "Enemy spawned at x={:.0} (max health {}, next in {:.3}s)",
            enemy.pos.x,
            enemy.max_health,
            session.spawner.interval
        );
        world.events.push(GameEvent::EnemySpawned {
            pos: enemy.pos,
            max_health: enemy.max_health,
        });
        session.enemies.push(enemy);
    }

    for shot in session.projectiles.iter_mut() {
        shot.update();
    }
    session.projectiles.retain(|shot| !shot.is_offscreen());

    for enemy in session.enemies.iter_mut() {
        enemy.update();
    }
    for pickup in session.powerups.iter_mut() {
        pickup.update();
    }

    resolve(world);
}

fn update_stars(world: &mut World) {
    let (width, height) = (world.tuning.frame_width, world.tuning.frame_height);
    for star in world.stars.iter_mut() {
        star.update(&mut world.rng, width, height);
    }
}

impl World {
    /// Advance one frame and capture the result
    ///
    /// The only public way to drive the simulation; every call hands back the
    /// events raised during the frame.
    pub fn step_frame(&mut self, pointer: Option<Vec2>, now: f64) -> WorldSnapshot {
        tick(self, &TickInput::new(pointer, now));
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_MAX_HEALTH;
    use crate::sim::entity::health_pool;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const FRAME: f64 = 1.0 / 30.0;

    fn world(seed: u64) -> World {
        World::new(Tuning::default(), seed).unwrap()
    }

    #[test]
    fn test_waits_on_start_screen() {
        let mut world = world(1);
        let stars_before = world.stars.clone();

        for i in 0..10 {
            let snapshot = world.step_frame(None, i as f64 * FRAME);
            assert_eq!(snapshot.phase, GamePhase::StartScreen);
            assert!(snapshot.projectiles.is_empty());
        }
        // Stars keep drifting on the start screen
        assert_ne!(world.stars, stars_before);
        assert_eq!(world.session.player.pos, Vec2::new(320.0, 380.0));
    }

    #[test]
    fn test_start_frame_consumes_pointer() {
        let mut world = world(1);
        let snapshot = world.step_frame(Some(Vec2::new(420.0, 380.0)), 5.0);

        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.events[0], GameEvent::Started);
        assert!(matches!(snapshot.events[1], GameEvent::Shot { .. }));
        // Moved a fifth of the way and fired from the pre-move position
        assert!((snapshot.player.pos.x - 340.0).abs() < 1e-4);
        assert_eq!(snapshot.projectiles.len(), 1);
        assert_eq!(snapshot.projectiles[0].pos, Vec2::new(320.0, 355.0 - 25.0));
        // Spawn timer baseline is the start frame
        assert_eq!(world.session.spawner.last_spawn, Some(5.0));
    }

    #[test]
    fn test_no_pointer_no_fire() {
        let mut world = world(1);
        world.step_frame(Some(Vec2::new(320.0, 380.0)), 0.0);
        assert_eq!(world.session.projectiles.len(), 1);

        for i in 1..20 {
            let snapshot = world.step_frame(None, i as f64 * FRAME);
            assert!(
                snapshot
                    .events
                    .iter()
                    .all(|e| !matches!(e, GameEvent::Shot { .. }))
            );
        }
        // The only shot has flown off the top
        assert!(world.session.projectiles.is_empty());
    }

    #[test]
    fn test_fire_rate_is_frame_gated() {
        let mut world = world(1);
        let mut shots = 0;
        for i in 0..20 {
            let snapshot = world.step_frame(Some(Vec2::new(320.0, 380.0)), i as f64 * FRAME);
            shots += snapshot
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Shot { .. }))
                .count();
        }
        // Frames 0, 5, 10, 15
        assert_eq!(shots, 4);
    }

    #[test]
    fn test_step_frame_leaves_no_pending_events() {
        let mut world = world(2);
        for i in 0..120 {
            world.step_frame(Some(Vec2::new(320.0, 380.0)), i as f64 * FRAME);
            assert!(world.events.is_empty());
        }
    }

    #[test]
    fn test_enemy_spawns_after_interval() {
        let mut world = world(3);
        world.step_frame(Some(Vec2::new(320.0, 380.0)), 0.0);

        let mut now = 0.0;
        while now < 2.0 {
            now += FRAME;
            let snapshot = world.step_frame(None, now);
            if now <= 2.0 {
                assert!(snapshot.enemies.is_empty(), "spawned early at {now}");
            }
        }
        let snapshot = world.step_frame(None, 2.05);
        assert_eq!(snapshot.enemies.len(), 1);
        assert!((snapshot.spawn_interval - 1.98).abs() < 1e-9);
        // Spawned above the top edge and already moved once
        let enemy = &snapshot.enemies[0];
        assert!(enemy.pos.y < 0.0);
        assert!(health_pool(0).contains(&enemy.max_health));
    }

    #[test]
    fn test_game_over_freezes_gameplay() {
        let mut world = world(4);
        world.step_frame(Some(Vec2::new(320.0, 380.0)), 0.0);
        world.session.player.health = 5;
        let pos = world.session.player.pos;
        world
            .session
            .enemies
            .push(Enemy::new(pos, 20.0, 20, 2.0, [200, 0, 200]));

        let snapshot = world.step_frame(Some(pos), FRAME);
        assert_eq!(snapshot.phase, GamePhase::GameOver);
        assert_eq!(snapshot.player.health, 0);
        assert!(snapshot.events.contains(&GameEvent::GameOver { kills: 0 }));

        let frozen = world.session.clone();
        let stars = world.stars.clone();
        for i in 2..40 {
            let snapshot = world.step_frame(Some(Vec2::new(10.0, 10.0)), i as f64);
            assert_eq!(snapshot.phase, GamePhase::GameOver);
            assert!(snapshot.events.is_empty());
        }
        assert_eq!(world.session, frozen);
        assert_ne!(world.stars, stars);
    }

    #[test]
    fn test_reset_then_play() {
        let mut world = world(4);
        world.step_frame(Some(Vec2::new(320.0, 380.0)), 0.0);
        world.session.player.health = 0;
        world.session.kills = 3;
        let snapshot = world.step_frame(None, FRAME);
        assert_eq!(snapshot.phase, GamePhase::GameOver);
        assert_eq!(snapshot.best_kills, 3);

        assert!(world.request_reset());
        assert!(!world.request_reset());

        // Timer re-baselines on the first frame after reset
        let snapshot = world.step_frame(None, 100.0);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.events[0], GameEvent::Reset);
        assert_eq!(snapshot.kills, 0);
        assert_eq!(snapshot.player.health, PLAYER_MAX_HEALTH);
        assert!(snapshot.enemies.is_empty());
        assert_eq!(snapshot.spawn_interval, 2.0);
        assert_eq!(world.session.spawner.last_spawn, Some(100.0));
        assert_eq!(snapshot.best_kills, 3);
    }

    #[test]
    fn test_escaping_enemies_drain_health() {
        let mut world = world(8);
        // Park the player in a corner so nothing rams it
        let corner = Vec2::new(0.0, 0.0);
        let mut now = 0.0;
        let mut frames = 0;
        let mut snapshot = world.step_frame(Some(corner), now);
        while snapshot.phase == GamePhase::Playing && frames < 100_000 {
            now += FRAME;
            frames += 1;
            snapshot = world.step_frame(None, now);
        }
        assert_eq!(snapshot.phase, GamePhase::GameOver);
        assert_eq!(snapshot.player.health, 0);
    }

    fn run(seed: u64, inputs: &[TickInput]) -> Vec<WorldSnapshot> {
        let mut world = world(seed);
        inputs
            .iter()
            .map(|input| world.step_frame(input.pointer, input.now))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn identical_inputs_replay_identically(
            seed in any::<u64>(),
            moves in prop::collection::vec(
                prop::option::weighted(0.8, (0.0f32..640.0, 0.0f32..480.0)),
                1..400,
            ),
        ) {
            let inputs: Vec<TickInput> = moves
                .iter()
                .enumerate()
                .map(|(i, m)| TickInput::new(m.map(|(x, y)| Vec2::new(x, y)), i as f64 * 0.1))
                .collect();
            prop_assert_eq!(run(seed, &inputs), run(seed, &inputs));
        }

        #[test]
        fn health_and_enemy_invariants_hold(
            seed in any::<u64>(),
            moves in prop::collection::vec(
                prop::option::of((0.0f32..640.0, 0.0f32..480.0)),
                1..600,
            ),
        ) {
            let mut world = world(seed);
            for (i, m) in moves.iter().enumerate() {
                let snapshot = world.step_frame(m.map(|(x, y)| Vec2::new(x, y)), i as f64 * 0.25);
                prop_assert!(snapshot.player.health <= PLAYER_MAX_HEALTH);
                if snapshot.phase == GamePhase::GameOver {
                    prop_assert_eq!(snapshot.player.health, 0);
                }
                for enemy in &world.session.enemies {
                    prop_assert!(enemy.health <= enemy.max_health as f32);
                    prop_assert!(crate::consts::ENEMY_HEALTH_POOL.contains(&enemy.max_health));
                }
            }
        }
    }
}
