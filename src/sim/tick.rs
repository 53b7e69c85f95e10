//! Per-frame simulation tick
//!
//! Order within a tick:
//! 1. Camera snaps to the player (last frame's position)
//! 2. Flash effect advances
//! 3. Player controls set acceleration and damp velocity; player may fire
//! 4. Entity pass: integrate and age every live entity, run enemy fire control,
//!    then apply the per-tag collision/lifecycle rules
//! 5. Compaction removes doomed entities
//! 6. Thrust exhaust and enemy steering
//! 7. Queued spawns join the live set

use std::collections::BTreeSet;
use std::f32::consts::PI;

use glam::Vec2;

use super::collision::Aabb;
use super::entity::{Behavior, Entity, EntityId, Lifetime, Rgb, Tag};
use super::particles::{self, BurstSpec};
use super::rng::RandomSource;
use super::state::{GameEvent, World};
use super::vector::Vec2Ext;
use crate::settings::Settings;
use crate::wrap_angle;

/// Half-width of the exhaust cone behind the ship
const THRUST_SPREAD: f32 = PI / 8.0;
/// Exhaust particle life range in seconds
const THRUST_LIFE: (f32, f32) = (0.2, 1.0);

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Pointer position in screen space
    pub pointer: Vec2,
}

impl TickInput {
    /// Thrust direction per axis; left beats right and up beats down when both are held
    pub fn axes(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// An enemy bullet hit the player
    pub player_damaged: bool,
    /// A player bullet hit an enemy
    pub enemy_damaged: bool,
    pub spawned: usize,
    pub removed: usize,
}

/// Advance the world by `dt` seconds
pub fn tick<R: RandomSource + ?Sized>(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    settings: &Settings,
    rng: &mut R,
) -> TickReport {
    let dt = dt.max(0.0);
    world.events.clear();
    world.ticks += 1;
    world.time += dt;

    let player_id = world.player;
    let positions = &world.entities;
    world
        .camera
        .update(|id| positions.iter().find(|e| e.id == id).map(|e| e.pos));

    world.flash.advance(dt, settings.effects.flash_duration);

    control_player(world, input, dt, settings);
    player_fire(world, input, dt, settings);

    for entity in &mut world.entities {
        entity.integrate(dt);
        entity.age(dt);
    }
    enemy_fire_control(world, dt, rng);

    let mut report = resolve_collisions(world, settings, rng);

    thrust_exhaust(world, dt, settings, rng);
    steer_enemies(world, dt);

    report.spawned = world.flush_spawns();
    if report.player_damaged {
        log::debug!("Player {:?} hit at tick {}", player_id, world.ticks);
    }
    report
}

/// Set acceleration from held directions and damp velocity
pub fn control_player(world: &mut World, input: &TickInput, dt: f32, settings: &Settings) {
    let tuning = &settings.player;
    let id = world.player;
    let Some(player) = world.get_mut(id) else {
        return;
    };

    player.accel = input.axes() * tuning.accel;

    if player.vel.sq_magnitude() > tuning.stop_threshold_sq {
        player.vel -= player.vel * tuning.friction * dt;
    } else {
        player.vel = Vec2::ZERO;
    }
}

/// Fire toward the pointer if the trigger is held and the cooldown allows
pub fn player_fire(world: &mut World, input: &TickInput, dt: f32, settings: &Settings) {
    let tuning = &settings.player;
    if input.fire && world.player_fire_timer >= tuning.fire_interval {
        if let Some(origin) = world.position_of(world.player) {
            let target = world.camera.to_world(input.pointer);
            let vel = (target - origin).normal() * tuning.bullet_speed;
            let (size, color, life) = (
                crate::consts::BULLET_SIZE,
                tuning.bullet_color,
                tuning.bullet_life,
            );
            world.spawn(|id| {
                Entity::new(id, Tag::PlayerBullet, origin, size, color)
                    .with_velocity(vel)
                    .with_behavior(Behavior::Timed(Lifetime::new(life)))
            });
            world.stats.shots_fired += 1;
            world.events.push(GameEvent::PlayerFired);
        }
        world.player_fire_timer = 0.0;
    }
    world.player_fire_timer += dt;
}

/// Run every enemy's firing timer and probabilistic trigger
pub fn enemy_fire_control<R: RandomSource + ?Sized>(world: &mut World, dt: f32, rng: &mut R) {
    for idx in 0..world.entities.len() {
        let Some(target) = world.entities[idx].brain().and_then(|b| b.fire.target) else {
            continue;
        };
        // A target that no longer exists suppresses firing
        let Some(target_pos) = world.position_of(target) else {
            continue;
        };

        let entity = &mut world.entities[idx];
        let (enemy_id, origin) = (entity.id, entity.pos);
        let Some(brain) = entity.brain_mut() else {
            continue;
        };
        let fire = &mut brain.fire;

        fire.timer += dt;
        if fire.timer < fire.interval {
            continue;
        }
        let in_range = fire
            .range
            .is_none_or(|range| origin.distance(target_pos) <= range);
        if !in_range {
            continue;
        }

        let shoot = rng.unit() < fire.chance;
        fire.timer = 0.0;
        if !shoot {
            continue;
        }

        let vel = (target_pos - origin).normal() * fire.speed;
        let (life, color) = (fire.bullet_life, fire.bullet_color);
        spawn_enemy_bullet(world, origin, vel, life, color);
        world.stats.enemy_shots += 1;
        world.events.push(GameEvent::EnemyFired { enemy: enemy_id });
    }
}

fn spawn_enemy_bullet(
    world: &mut World,
    origin: Vec2,
    vel: Vec2,
    life: f32,
    color: Rgb,
) -> EntityId {
    world.spawn(|id| {
        Entity::new(id, Tag::EnemyBullet, origin, crate::consts::BULLET_SIZE, color)
            .with_velocity(vel)
            .with_behavior(Behavior::Timed(Lifetime::new(life)))
    })
}

/// Apply the per-tag rules to every live entity and compact the survivors
pub fn resolve_collisions<R: RandomSource + ?Sized>(
    world: &mut World,
    settings: &Settings,
    rng: &mut R,
) -> TickReport {
    let effects = &settings.effects;
    let player = world.player_entity().map(|p| (p.bbox, p.pos));
    let enemies: Vec<(EntityId, Aabb, Vec2)> = world
        .enemies
        .iter()
        .filter_map(|&id| world.get(id).map(|e| (id, e.bbox, e.pos)))
        .collect();

    let mut report = TickReport::default();
    let mut doomed = BTreeSet::new();
    let mut bursts = Vec::new();

    for entity in &mut world.entities {
        match entity.tag {
            Tag::EnemyBullet => {
                let hit = player.filter(|(player_box, _)| entity.bbox.overlaps(player_box));
                if let Some((_, player_pos)) = hit {
                    doomed.insert(entity.id);
                    bursts.push(BurstSpec::new(
                        player_pos,
                        effects.player_hit_particles,
                        effects.player_hit_color,
                    ));
                    world.events.push(GameEvent::PlayerHit { at: player_pos });
                    world.stats.player_hits_taken += 1;
                    report.player_damaged = true;
                } else if entity.expired() {
                    doomed.insert(entity.id);
                }
            }
            Tag::PlayerBullet => {
                if let Some(&(enemy, _, enemy_pos)) = enemies
                    .iter()
                    .find(|(_, enemy_box, _)| entity.bbox.overlaps(enemy_box))
                {
                    doomed.insert(entity.id);
                    bursts.push(BurstSpec::new(
                        enemy_pos,
                        effects.enemy_hit_particles,
                        effects.enemy_hit_color,
                    ));
                    world.events.push(GameEvent::EnemyHit { enemy, at: enemy_pos });
                    world.stats.enemy_hits += 1;
                    report.enemy_damaged = true;
                } else if entity.expired() {
                    doomed.insert(entity.id);
                }
            }
            Tag::Particle => {
                particles::fade(entity, effects.min_brightness);
                if entity.expired() {
                    doomed.insert(entity.id);
                }
            }
            Tag::Player | Tag::Enemy => {
                if entity.expired() {
                    doomed.insert(entity.id);
                }
            }
        }
    }

    if report.player_damaged && settings.effective_flash() {
        world.flash.trigger();
    }
    for burst in &bursts {
        particles::spawn_burst(world, rng, burst);
    }

    report.removed = world.remove_ids(&doomed);
    report
}

/// Puff exhaust particles behind the ship while it accelerates
pub fn thrust_exhaust<R: RandomSource + ?Sized>(
    world: &mut World,
    dt: f32,
    settings: &Settings,
    rng: &mut R,
) {
    let Some(player) = world.player_entity() else {
        return;
    };
    if player.accel.sq_magnitude() <= 1.0 {
        return;
    }
    let (pos, accel) = (player.pos, player.accel);

    if world.thrust_timer >= settings.player.thrust_interval {
        let behind = (-accel).direction();
        let effects = &settings.effects;
        let burst = BurstSpec::new(pos, effects.thrust_particles, effects.thrust_color)
            .cone(behind, THRUST_SPREAD)
            .lives(THRUST_LIFE.0, THRUST_LIFE.1);
        particles::spawn_burst(world, rng, &burst);
        world.thrust_timer = 0.0;
    }
    world.thrust_timer += dt;
}

/// Scripted circular motion: point velocity at the heading, then turn
pub fn steer_enemies(world: &mut World, dt: f32) {
    for entity in &mut world.entities {
        let vel = entity.vel;
        if let Some(brain) = entity.brain_mut() {
            let heading = brain.heading;
            brain.heading = wrap_angle(brain.heading + brain.turn_rate * dt);
            entity.vel = vel.with_direction(heading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SimRng};

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        // Keep the enemy out of the way unless a test wants it
        settings.enemy.fire_chance = 0.0;
        settings
    }

    fn enemy_id(world: &World) -> EntityId {
        world.enemies[0]
    }

    #[test]
    fn test_player_acceleration_scenario() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let id = world.player;
        let player = world.get_mut(id).expect("player");
        player.pos = Vec2::ZERO;
        player.vel = Vec2::ZERO;
        player.accel = Vec2::new(500.0, 0.0);
        player.integrate(0.1);
        assert!((player.vel - Vec2::new(50.0, 0.0)).length() < 1e-4);
        assert!((player.pos - Vec2::new(5.0, 0.0)).length() < 1e-4);
        assert_eq!(player.bbox.center, player.pos);
    }

    #[test]
    fn test_axes_priority() {
        let input = TickInput {
            left: true,
            right: true,
            up: false,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.axes(), Vec2::new(-1.0, 1.0));
        assert_eq!(TickInput::default().axes(), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_thrust_is_not_normalized() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        control_player(&mut world, &input, 0.01, &settings);
        let player = world.player_entity().expect("player");
        assert_eq!(player.accel, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_friction_and_rest_snap() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let id = world.player;

        world.get_mut(id).expect("player").vel = Vec2::new(100.0, 0.0);
        control_player(&mut world, &TickInput::default(), 0.1, &settings);
        let vel = world.get(id).expect("player").vel;
        assert!((vel.x - (100.0 - 100.0 * 0.95 * 0.1)).abs() < 1e-3);

        world.get_mut(id).expect("player").vel = Vec2::new(0.5, 0.5);
        control_player(&mut world, &TickInput::default(), 0.1, &settings);
        assert_eq!(world.get(id).expect("player").vel, Vec2::ZERO);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let input = TickInput {
            fire: true,
            pointer: Vec2::new(1200.0, 350.0),
            ..Default::default()
        };

        // Timer starts at zero: first tick only accumulates
        player_fire(&mut world, &input, 0.05, &settings);
        assert_eq!(world.pending_len(), 0);
        player_fire(&mut world, &input, 0.05, &settings);
        assert_eq!(world.pending_len(), 0);
        player_fire(&mut world, &input, 0.05, &settings);
        assert_eq!(world.pending_len(), 1);
        assert!((world.player_fire_timer - 0.05).abs() < 1e-6);

        world.flush_spawns();
        let bullet = world.entities.last().expect("bullet");
        assert_eq!(bullet.tag, Tag::PlayerBullet);
        assert!((bullet.vel - Vec2::new(800.0, 0.0)).length() < 1e-3);
        assert_eq!(world.events, vec![GameEvent::PlayerFired]);
    }

    #[test]
    fn test_enemy_fires_when_gate_passes() {
        let mut settings = Settings::default();
        settings.enemy.range = Some(1000.0);
        settings.enemy.fire_chance = 0.5;
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        let player_pos = world.player_entity().expect("player").pos;
        {
            let e = world.get_mut(enemy).expect("enemy");
            e.pos = player_pos + Vec2::new(500.0, 0.0);
            e.vel = Vec2::ZERO;
            let brain = e.brain_mut().expect("brain");
            brain.fire.timer = brain.fire.interval;
        }

        let before = world.entities.len();
        let mut rng = ScriptedRng::constant(0.1);
        enemy_fire_control(&mut world, 0.001, &mut rng);
        assert_eq!(world.flush_spawns(), 1);
        assert_eq!(world.entities.len(), before + 1);

        let bullet = world.entities.last().expect("bullet");
        assert_eq!(bullet.tag, Tag::EnemyBullet);
        assert!((bullet.vel - Vec2::new(-900.0, 0.0)).length() < 1e-2);
        let brain = world.get(enemy).and_then(Entity::brain).expect("brain");
        assert_eq!(brain.fire.timer, 0.0);
    }

    #[test]
    fn test_enemy_failed_roll_still_resets_timer() {
        let mut settings = Settings::default();
        settings.enemy.fire_chance = 0.5;
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        world
            .get_mut(enemy)
            .and_then(Entity::brain_mut)
            .expect("brain")
            .fire
            .timer = 1.0;

        let mut rng = ScriptedRng::constant(0.9);
        enemy_fire_control(&mut world, 0.01, &mut rng);
        assert_eq!(world.pending_len(), 0);
        let brain = world.get(enemy).and_then(Entity::brain).expect("brain");
        assert_eq!(brain.fire.timer, 0.0);
    }

    #[test]
    fn test_enemy_out_of_range_keeps_timer() {
        let mut settings = Settings::default();
        settings.enemy.range = Some(100.0);
        settings.enemy.fire_chance = 1.0;
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        {
            let e = world.get_mut(enemy).expect("enemy");
            e.pos = Vec2::new(-5000.0, 0.0);
            e.brain_mut().expect("brain").fire.timer = 0.5;
        }
        let mut rng = ScriptedRng::constant(0.0);
        enemy_fire_control(&mut world, 0.01, &mut rng);
        assert_eq!(world.pending_len(), 0);
        let brain = world.get(enemy).and_then(Entity::brain).expect("brain");
        assert!((brain.fire.timer - 0.51).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_without_target_is_idle() {
        let mut settings = Settings::default();
        settings.enemy.fire_chance = 1.0;
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        world.get_mut(enemy).and_then(Entity::brain_mut).expect("brain").fire.target = None;

        let mut rng = ScriptedRng::constant(0.0);
        for _ in 0..100 {
            enemy_fire_control(&mut world, 0.1, &mut rng);
        }
        assert_eq!(world.pending_len(), 0);
        let brain = world.get(enemy).and_then(Entity::brain).expect("brain");
        assert_eq!(brain.fire.timer, 0.0);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let player_pos = world.player_entity().expect("player").pos;
        let green = Rgb::new(0, 255, 0);
        let bullet = spawn_enemy_bullet(&mut world, player_pos, Vec2::ZERO, 1.0, green);
        world.flush_spawns();

        let mut rng = SimRng::new(3);
        let report = resolve_collisions(&mut world, &settings, &mut rng);
        assert!(report.player_damaged);
        assert_eq!(report.removed, 1);
        assert!(world.get(bullet).is_none());
        assert_eq!(world.pending_len(), settings.effects.player_hit_particles as usize);
        assert!(world.flash.active);
        assert_eq!(world.events, vec![GameEvent::PlayerHit { at: player_pos }]);
        assert_eq!(world.stats.player_hits_taken, 1);
    }

    #[test]
    fn test_player_bullet_hits_enemy() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        let enemy_pos = world.position_of(enemy).expect("enemy");
        world.spawn(|id| {
            Entity::new(id, Tag::PlayerBullet, enemy_pos + Vec2::new(3.0, 0.0), 5.0, Rgb::WHITE)
                .with_behavior(Behavior::Timed(Lifetime::new(1.3)))
        });
        world.flush_spawns();

        let mut rng = SimRng::new(3);
        let report = resolve_collisions(&mut world, &settings, &mut rng);
        assert!(report.enemy_damaged);
        assert!(!report.player_damaged);
        assert_eq!(world.count(Tag::PlayerBullet), 0);
        assert_eq!(world.pending_len(), settings.effects.enemy_hit_particles as usize);
        assert!(!world.flash.active);
    }

    #[test]
    fn test_expired_bullets_and_particles_removed() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let far = Vec2::new(-10_000.0, -10_000.0);
        for tag in [Tag::PlayerBullet, Tag::EnemyBullet, Tag::Particle] {
            world.spawn(|id| {
                let mut life = Lifetime::new(0.5);
                life.age(0.6);
                Entity::new(id, tag, far, 3.0, Rgb::WHITE).with_behavior(Behavior::Timed(life))
            });
        }
        world.flush_spawns();

        let mut rng = SimRng::new(3);
        let report = resolve_collisions(&mut world, &settings, &mut rng);
        assert_eq!(report.removed, 3);
        assert_eq!(world.entities.len(), 2);
        assert!(!report.player_damaged && !report.enemy_damaged);
    }

    #[test]
    fn test_adjacent_removals_neither_skipped_nor_doubled() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let player_pos = world.player_entity().expect("player").pos;
        let hits: Vec<_> = (0..3)
            .map(|_| spawn_enemy_bullet(&mut world, player_pos, Vec2::ZERO, 1.0, Rgb::WHITE))
            .collect();
        let survivor = world.spawn(|id| {
            Entity::new(id, Tag::Particle, Vec2::new(-500.0, 0.0), 2.0, Rgb::WHITE)
                .with_behavior(Behavior::Timed(Lifetime::new(5.0)))
        });
        world.flush_spawns();

        let mut rng = SimRng::new(3);
        let report = resolve_collisions(&mut world, &settings, &mut rng);
        assert_eq!(report.removed, 3);
        assert_eq!(world.stats.player_hits_taken, 3);
        for id in hits {
            assert!(world.get(id).is_none());
        }
        assert!(world.get(survivor).is_some());
    }

    #[test]
    fn test_spawns_wait_for_next_tick() {
        let mut settings = Settings::default();
        settings.enemy.fire_chance = 1.0;
        settings.enemy.range = None;
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        world.get_mut(enemy).and_then(Entity::brain_mut).expect("brain").fire.timer = 1.0;

        let mut rng = ScriptedRng::constant(0.0);
        let report = tick(&mut world, &TickInput::default(), 0.01, &settings, &mut rng);
        assert_eq!(report.spawned, 1);
        let bullet = world
            .entities
            .iter()
            .find(|e| e.tag == Tag::EnemyBullet)
            .expect("bullet");
        // Not integrated or aged in the tick that created it
        let life = bullet.lifetime().expect("timed");
        assert_eq!(life.remaining, life.initial);
        assert_eq!(bullet.pos, world.position_of(enemy).expect("enemy"));
    }

    #[test]
    fn test_enemy_heading_wraps() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let enemy = enemy_id(&world);
        world.get_mut(enemy).and_then(Entity::brain_mut).expect("brain").heading = 6.2;
        steer_enemies(&mut world, 1.0);
        let e = world.get(enemy).expect("enemy");
        let brain = e.brain().expect("brain");
        assert!((brain.heading - (6.9 - std::f32::consts::TAU)).abs() < 1e-4);
        assert!((e.vel.length() - 200.0).abs() < 1e-3);
        assert!((e.vel.direction() - 6.2).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_exhaust_points_backward() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let id = world.player;
        world.get_mut(id).expect("player").accel = Vec2::new(500.0, 0.0);
        world.thrust_timer = settings.player.thrust_interval;

        let mut rng = SimRng::new(5);
        thrust_exhaust(&mut world, 0.01, &settings, &mut rng);
        assert_eq!(world.flush_spawns(), 5);
        for p in world.entities.iter().filter(|e| e.tag == Tag::Particle) {
            assert!(p.vel.x < 0.0, "exhaust should trail the ship: {:?}", p.vel);
            let life = p.lifetime().expect("timed").initial;
            assert!((0.2..=1.0).contains(&life));
        }
        assert!((world.thrust_timer - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_no_exhaust_when_coasting() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        world.thrust_timer = 1.0;
        let mut rng = SimRng::new(5);
        thrust_exhaust(&mut world, 0.01, &settings, &mut rng);
        assert_eq!(world.pending_len(), 0);
        assert_eq!(world.thrust_timer, 1.0);
    }

    #[test]
    fn test_zero_dt_first_frame_is_stationary() {
        let settings = quiet_settings();
        let mut world = World::new(&settings);
        let before: Vec<Vec2> = world.entities.iter().map(|e| e.pos).collect();
        let mut rng = SimRng::new(1);
        tick(&mut world, &TickInput::default(), 0.0, &settings, &mut rng);
        let after: Vec<Vec2> = world.entities.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = World::new(&settings);
        let mut b = World::new(&settings);
        let mut rng_a = SimRng::new(99999);
        let mut rng_b = SimRng::new(99999);

        let inputs = [
            TickInput {
                right: true,
                fire: true,
                pointer: Vec2::new(100.0, 100.0),
                ..Default::default()
            },
            TickInput { up: true, ..Default::default() },
            TickInput { left: true, down: true, fire: true, ..Default::default() },
            TickInput::default(),
        ];
        for i in 0..400 {
            let input = &inputs[(i / 50) % inputs.len()];
            tick(&mut a, input, 1.0 / 120.0, &settings, &mut rng_a);
            tick(&mut b, input, 1.0 / 120.0, &settings, &mut rng_b);
        }

        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.stats, b.stats);
        for (ea, eb) in a.entities.iter().zip(&b.entities) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
