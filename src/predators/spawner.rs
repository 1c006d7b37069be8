use bevy::prelude::*;
use rand::Rng;

use crate::config::{GameBalance, PredatorSettings, SpawnerSettings};
use crate::health::{DamageFlash, DestroyOnDeath};
use crate::shared::*;

use super::FenceSlip;

const COYOTE_COLOR: Color = Color::srgb(0.62, 0.45, 0.28);

/// Nightly spawn queue and the list of coyotes still on the map.
#[derive(Resource, Debug)]
pub struct PredatorSpawner {
    pub pending: u32,
    pub difficulty: u32,
    pub timer: Timer,
    pub active: Vec<Entity>,
}

impl Default for PredatorSpawner {
    fn default() -> Self {
        Self {
            pending: 0,
            difficulty: 1,
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            active: Vec::new(),
        }
    }
}

impl PredatorSpawner {
    /// Coyotes still alive, as of the last prune.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Difficulty stops climbing after `max_night`.
pub fn night_difficulty(night: u32, max_night: u32) -> u32 {
    night.min(max_night).max(1)
}

/// Inclusive bounds on how many coyotes come at this difficulty.
pub fn spawn_count_range(difficulty: u32, settings: &SpawnerSettings) -> (u32, u32) {
    let extra = (difficulty.max(1) - 1) * settings.per_night;
    let min = settings.min_start + extra;
    let max = (settings.max_start + extra).max(min);
    (min, max)
}

/// Max health and bite damage for a coyote at this difficulty.
pub fn scaled_stats(difficulty: u32, predator: &PredatorSettings, spawner: &SpawnerSettings) -> (f32, f32) {
    if difficulty <= 1 {
        return (predator.base_health, predator.attack_damage);
    }
    let steps = (difficulty - 1) as f32;
    (
        predator.base_health + steps * spawner.health_per_night,
        predator.attack_damage + steps * spawner.damage_per_night,
    )
}

pub fn reset_spawner_on_world_built(
    mut events: EventReader<WorldBuiltEvent>,
    mut spawner: ResMut<PredatorSpawner>,
) {
    for _ in events.read() {
        *spawner = PredatorSpawner::default();
    }
}

pub fn schedule_night_spawns(
    mut events: EventReader<NightStartedEvent>,
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    mut spawner: ResMut<PredatorSpawner>,
) {
    let settings = &balance.spawner;
    for event in events.read() {
        if settings.spawn_points.is_empty() {
            warn!("[Predators] No spawn points configured; night {} is quiet", event.night);
            continue;
        }
        let difficulty = night_difficulty(event.night, settings.max_difficulty_night);
        let (min, max) = spawn_count_range(difficulty, settings);
        let count = rand::thread_rng().gen_range(min..=max);

        spawner.pending = count;
        spawner.difficulty = difficulty;
        // First coyote arrives right away.
        spawner.timer = Timer::from_seconds(0.0, TimerMode::Once);
        info!(
            "[Predators] Night {} (difficulty {}): {} coyotes incoming, threat x{:.2}",
            event.night,
            difficulty,
            count,
            clock.health_multiplier(balance.day_night.health_scale_per_night)
                * clock.damage_multiplier(balance.day_night.damage_scale_per_night),
        );
    }
}

pub fn run_spawn_queue(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut spawner: ResMut<PredatorSpawner>,
) {
    if spawner.pending == 0 {
        return;
    }
    spawner.timer.tick(time.delta());
    if !spawner.timer.finished() {
        return;
    }

    let settings = &balance.spawner;
    let mut rng = rand::thread_rng();
    if settings.spawn_points.is_empty() {
        spawner.pending = 0;
        return;
    }
    let point = Vec2::from(settings.spawn_points[rng.gen_range(0..settings.spawn_points.len())]);
    let jitter = settings.spawn_jitter.abs();
    let pos = point
        + Vec2::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        );

    let (max_health, damage) = scaled_stats(spawner.difficulty, &balance.predators, settings);
    let entity = spawn_coyote(&mut commands, &balance.predators, pos, max_health, damage);
    spawner.active.push(entity);
    spawner.pending -= 1;
    spawner.timer = Timer::from_seconds(settings.spawn_delay, TimerMode::Once);
    debug!("[Predators] Coyote spawned at {:?} ({} HP, {} dmg)", pos, max_health, damage);
}

fn spawn_coyote(
    commands: &mut Commands,
    settings: &PredatorSettings,
    pos: Vec2,
    max_health: f32,
    damage: f32,
) -> Entity {
    commands
        .spawn((
            Predator {
                attack_damage: damage,
                ..default()
            },
            Health::new(max_health),
            DamageFlash::new(0.1, COYOTE_COLOR),
            DestroyOnDeath {
                delay: settings.despawn_delay,
            },
            FenceSlip::default(),
            Facing::default(),
            BodyRadius(settings.body_radius),
            GameplayEntity,
            Sprite::from_color(COYOTE_COLOR, Vec2::new(1.0, 0.6)),
            Transform::from_xyz(pos.x, pos.y, Z_ACTOR),
        ))
        .id()
}

/// Forget coyotes that died or were despawned.
pub fn prune_dead_predators(
    mut spawner: ResMut<PredatorSpawner>,
    predators: Query<&Health, With<Predator>>,
) {
    let before = spawner.active_count();
    spawner
        .active
        .retain(|e| predators.get(*e).is_ok_and(|h| !h.is_dead()));
    if spawner.active_count() != before && spawner.active_count() == 0 && spawner.pending == 0 {
        info!("[Predators] All coyotes are down");
    }
}
