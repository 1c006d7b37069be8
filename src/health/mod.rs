//! Health domain: damage resolution, knockback, hit flash, and delayed
//! despawn of the dead.
//!
//! Every hit in the game travels as a `DamageEvent`. This plugin is the only
//! writer of `Health` for damage; it re-broadcasts what actually landed as
//! `DamageTakenEvent`, `HealthChangedEvent`, and `DeathEvent`.

use bevy::prelude::*;

use crate::shared::*;

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                apply_damage,
                apply_knockback,
                update_damage_flash,
                despawn_after_death,
            )
                .chain(),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Pushes the owner away from hits. `velocity` decays to zero.
#[derive(Component, Debug, Clone)]
pub struct Knockback {
    pub force: f32,
    pub velocity: Vec2,
}

impl Knockback {
    pub fn new(force: f32) -> Self {
        Self {
            force,
            velocity: Vec2::ZERO,
        }
    }
}

/// Tints the owner's sprite red for a moment after each hit.
#[derive(Component, Debug, Clone)]
pub struct DamageFlash {
    pub duration: f32,
    pub remaining: f32,
    pub base_color: Color,
}

impl DamageFlash {
    pub fn new(duration: f32, base_color: Color) -> Self {
        Self {
            duration,
            remaining: 0.0,
            base_color,
        }
    }
}

/// Despawn the owner this many seconds after it dies.
#[derive(Component, Debug, Clone, Copy)]
pub struct DestroyOnDeath {
    pub delay: f32,
}

#[derive(Component, Debug, Clone)]
pub struct DespawnTimer(pub Timer);

const KNOCKBACK_DRAG: f32 = 8.0;

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<(
        &mut Health,
        Option<&mut Knockback>,
        Option<&mut DamageFlash>,
        Option<&DestroyOnDeath>,
    )>,
    mut taken_events: EventWriter<DamageTakenEvent>,
    mut changed_events: EventWriter<HealthChangedEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut health, knockback, flash, destroy)) = targets.get_mut(event.target) else {
            continue;
        };
        let Some(killed) = health.take_damage(event.amount) else {
            continue;
        };

        taken_events.send(DamageTakenEvent {
            entity: event.target,
            amount: event.amount,
            source: event.source,
        });
        changed_events.send(HealthChangedEvent {
            entity: event.target,
            current: health.current,
            max: health.max,
        });

        if let Some(mut knockback) = knockback {
            let dir = event.direction.normalize_or_zero();
            if dir != Vec2::ZERO {
                knockback.velocity = dir * knockback.force;
            }
        }
        if let Some(mut flash) = flash {
            flash.remaining = flash.duration;
        }

        if killed {
            death_events.send(DeathEvent {
                entity: event.target,
            });
            if let Some(destroy) = destroy {
                commands.entity(event.target).insert(DespawnTimer(Timer::from_seconds(
                    destroy.delay,
                    TimerMode::Once,
                )));
            }
        }
    }
}

pub fn apply_knockback(time: Res<Time>, mut query: Query<(&mut Transform, &mut Knockback)>) {
    let dt = time.delta_secs();
    for (mut transform, mut knockback) in &mut query {
        if knockback.velocity == Vec2::ZERO {
            continue;
        }
        transform.translation += (knockback.velocity * dt).extend(0.0);
        knockback.velocity = decay_velocity(knockback.velocity, dt);
    }
}

pub fn decay_velocity(velocity: Vec2, dt: f32) -> Vec2 {
    let next = velocity * (1.0 - KNOCKBACK_DRAG * dt).max(0.0);
    if next.length_squared() < 0.0001 {
        Vec2::ZERO
    } else {
        next
    }
}

pub fn update_damage_flash(time: Res<Time>, mut query: Query<(&mut Sprite, &mut DamageFlash)>) {
    let dt = time.delta_secs();
    for (mut sprite, mut flash) in &mut query {
        if flash.remaining > 0.0 {
            flash.remaining -= dt;
            sprite.color = Color::srgb(1.0, 0.2, 0.2);
        } else {
            sprite.color = flash.base_color;
        }
    }
}

pub fn despawn_after_death(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    for (entity, mut timer) in &mut query {
        timer.0.tick(time.delta());
        if timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
