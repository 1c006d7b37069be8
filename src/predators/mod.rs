//! Predators domain: coyote AI, the nightly spawner, and fence slipping.
//!
//! Coyotes hunt cows first, turn on the player for a while after being hit,
//! and now and then squeeze through the pen fence.

use bevy::prelude::*;

use crate::shared::*;

mod ai;
mod fence_slip;
mod spawner;

pub use ai::{select_target, TargetCandidate};
pub use fence_slip::{slip_succeeds, FenceSlip};
pub use spawner::{night_difficulty, scaled_stats, spawn_count_range, PredatorSpawner};

pub struct PredatorPlugin;

impl Plugin for PredatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PredatorSpawner>()
            .add_systems(Update, spawner::reset_spawner_on_world_built)
            .add_systems(
                Update,
                (
                    spawner::schedule_night_spawns,
                    spawner::run_spawn_queue,
                    ai::aggro_on_damage,
                    ai::predator_ai,
                    fence_slip::tick_fence_slip,
                    ai::drop_loot_on_death,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, spawner::prune_dead_predators);
    }
}
