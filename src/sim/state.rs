//! World state and core simulation types
//!
//! The world exclusively owns every entity. Spawns made while a tick is in
//! progress wait in a pending queue and are appended after the pass, so an
//! entity is never processed in the tick that created it.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{Behavior, EnemyBrain, Entity, EntityId, FireControl, Tag};
use crate::settings::Settings;

/// Something the platform layer may want to react to (sounds, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { enemy: EntityId },
    PlayerHit { at: Vec2 },
    EnemyHit { enemy: EntityId, at: Vec2 },
}

/// Full-screen flash after the player takes a hit
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Flash {
    pub active: bool,
    pub timer: f32,
    /// Draw the white fill this frame
    pub visible: bool,
}

impl Flash {
    pub fn trigger(&mut self) {
        self.active = true;
    }

    /// Advance by one frame; the flash shows for every frame it is active,
    /// including the one in which it runs out
    pub fn advance(&mut self, dt: f32, duration: f32) {
        self.visible = self.active;
        if self.active {
            self.timer += dt;
            if self.timer > duration {
                self.timer = 0.0;
                self.active = false;
            }
        }
    }
}

/// Running totals for the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub shots_fired: u64,
    pub enemy_shots: u64,
    pub player_hits_taken: u64,
    pub enemy_hits: u64,
    pub particles_spawned: u64,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Live entities (dense, stable order)
    pub entities: Vec<Entity>,
    /// Entities spawned during the current tick
    pending: Vec<Entity>,
    pub player: EntityId,
    pub enemies: Vec<EntityId>,
    pub camera: Camera,
    pub flash: Flash,
    /// Time since the player's last shot
    pub player_fire_timer: f32,
    /// Time since the last exhaust puff
    pub thrust_timer: f32,
    pub stats: Stats,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub ticks: u64,
    /// Simulated seconds
    pub time: f32,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Build the starting scene: player at screen center, one enemy, camera
    /// following the player
    pub fn new(settings: &Settings) -> Self {
        let viewport = Vec2::new(settings.display.width, settings.display.height);
        let mut world = Self {
            entities: Vec::new(),
            pending: Vec::new(),
            player: EntityId(0),
            enemies: Vec::new(),
            camera: Camera::new(viewport),
            flash: Flash::default(),
            player_fire_timer: 0.0,
            thrust_timer: 0.0,
            stats: Stats::default(),
            events: Vec::new(),
            ticks: 0,
            time: 0.0,
            next_id: 1,
        };

        let player_pos = viewport * 0.5;
        let tuning = &settings.player;
        world.player = world.insert(|id| {
            Entity::new(id, Tag::Player, player_pos, tuning.size, tuning.color)
        });

        let player = world.player;
        let enemy = &settings.enemy;
        let enemy_id = world.insert(|id| {
            let brain = EnemyBrain {
                fire: FireControl {
                    target: Some(player),
                    interval: enemy.fire_interval,
                    timer: 0.0,
                    speed: enemy.bullet_speed,
                    range: enemy.range,
                    chance: enemy.fire_chance,
                    bullet_life: enemy.bullet_life,
                    bullet_color: enemy.bullet_color,
                },
                heading: 0.0,
                turn_rate: enemy.turn_rate,
            };
            Entity::new(id, Tag::Enemy, Vec2::from(enemy.start), enemy.size, enemy.color)
                .with_velocity(Vec2::new(enemy.speed, 0.0))
                .with_behavior(Behavior::Enemy(brain))
        });
        world.enemies.push(enemy_id);

        world.camera.target = Some(world.player);
        world.camera.center_on(player_pos);

        log::debug!("World created: player {:?}, enemy {:?}", world.player, enemy_id);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the live set immediately (scene setup only)
    pub fn insert(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(build(id));
        id
    }

    /// Queue an entity; it becomes live at the next `flush_spawns`
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.pending.push(build(id));
        id
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Append queued spawns to the live set, returning how many were added
    pub fn flush_spawns(&mut self) -> usize {
        let added = self.pending.len();
        self.entities.append(&mut self.pending);
        added
    }

    /// Remove the given entities in one stable compaction pass
    pub fn remove_ids(&mut self, doomed: &BTreeSet<EntityId>) -> usize {
        if doomed.is_empty() {
            return 0;
        }
        let before = self.entities.len();
        self.entities.retain(|e| !doomed.contains(&e.id));
        before - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).map(|e| e.pos)
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.get(self.player)
    }

    /// Live entities with the given tag
    pub fn count(&self, tag: Tag) -> usize {
        self.entities.iter().filter(|e| e.tag == tag).count()
    }
}
