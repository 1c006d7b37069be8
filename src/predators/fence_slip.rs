use bevy::prelude::*;
use rand::Rng;

use crate::config::GameBalance;
use crate::shared::*;

/// Per-coyote fence squeezing state.
#[derive(Component, Debug, Clone, Default)]
pub struct FenceSlip {
    /// Fence bumped into this frame.
    pub touching: Option<Entity>,
    /// Seconds until the next roll is allowed.
    pub cooldown_left: f32,
    /// Fence currently passed through, and for how much longer.
    pub ignored: Option<Entity>,
    pub ignore_left: f32,
}

impl FenceSlip {
    pub fn ignored_fence(&self) -> Option<Entity> {
        if self.ignore_left > 0.0 {
            self.ignored
        } else {
            None
        }
    }
}

/// A roll in `[0, 100]` at or under `chance` gets through.
pub fn slip_succeeds(roll: f32, chance: f32) -> bool {
    roll <= chance
}

pub fn tick_fence_slip(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut predators: Query<(&mut FenceSlip, &mut Transform, &Facing, &Health), With<Predator>>,
) {
    let settings = &balance.fence;
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut slip, mut tf, facing, health) in &mut predators {
        if slip.cooldown_left > 0.0 {
            slip.cooldown_left = (slip.cooldown_left - dt).max(0.0);
        }
        if slip.ignore_left > 0.0 {
            slip.ignore_left -= dt;
            if slip.ignore_left <= 0.0 {
                // Through and clear; the next fence gets a fresh roll.
                slip.ignore_left = 0.0;
                slip.ignored = None;
                slip.cooldown_left = 0.0;
            }
        }

        let Some(fence) = slip.touching.take() else {
            continue;
        };
        if health.is_dead() || slip.cooldown_left > 0.0 {
            continue;
        }

        slip.cooldown_left = settings.slip_cooldown;
        let roll: f32 = rng.gen_range(0.0..=100.0);
        if !slip_succeeds(roll, settings.slip_chance) {
            debug!("[Predators] Fence slip failed ({:.1} > {})", roll, settings.slip_chance);
            continue;
        }

        let through = facing.0.normalize_or_zero() * settings.teleport_distance;
        let bounds = balance.world.bounds;
        tf.translation.x = (tf.translation.x + through.x).clamp(bounds[0], bounds[2]);
        tf.translation.y = (tf.translation.y + through.y).clamp(bounds[1], bounds[3]);
        slip.ignored = Some(fence);
        slip.ignore_left = settings.ignore_secs;
        info!("[Predators] A coyote slipped through the fence");
    }
}
