use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Sub-modules
// ─────────────────────────────────────────────────────────────────────────────
mod breeding;
mod day_end;
mod interaction;
mod movement;
mod products;
mod rendering;
mod spawning;

pub use breeding::{calf_position, push_apart};
pub use day_end::advance_cow_day;
pub use interaction::{cow_action, cow_info, cow_prompt, CowAction};
pub use movement::turn_heading;
pub use spawning::spawn_cow;

// ─────────────────────────────────────────────────────────────────────────────
// Private ECS components (internal to the animals domain)
// ─────────────────────────────────────────────────────────────────────────────

/// Walk-forward wander state. The cow keeps its heading until it bumps the
/// pen edge, then turns.
#[derive(Component, Debug, Clone)]
pub struct CowWander {
    pub heading: Vec2,
    pub turn_cooldown_left: f32,
}

/// Running breeding countdown; present on both parents while they breed.
#[derive(Component, Debug, Clone)]
pub struct BreedingTimer(pub Timer);

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct AnimalPlugin;

impl Plugin for AnimalPlugin {
    fn build(&self, app: &mut App) {
        app
            // ── session setup ────────────────────────────────────────────────
            .add_systems(Update, spawning::spawn_starting_herd)
            // ── gameplay ─────────────────────────────────────────────────────
            .add_systems(
                Update,
                (
                    interaction::handle_cow_interact,
                    breeding::approach_mate,
                    breeding::finish_breeding,
                    movement::handle_cow_wander,
                    products::handle_cow_death,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            // ── day-end processing ───────────────────────────────────────────
            .add_systems(Update, day_end::handle_new_day_for_cows)
            // ── presentation ─────────────────────────────────────────────────
            .add_systems(
                Update,
                (interaction::update_cow_prompts, rendering::update_cow_visuals),
            );
    }
}
