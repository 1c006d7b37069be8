mod camera;
mod combat;
mod interaction;
mod movement;
mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub use combat::{cone_hits, swing_damage};
pub use interaction::{pick_target, InteractionCandidate};
pub use movement::{blocked_by_fences, clamp_to_bounds};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AttackCooldown>();

        app.add_systems(Update, spawn::spawn_player);

        app.add_systems(
            Update,
            (
                movement::player_movement,
                interaction::find_interaction_target,
                interaction::dispatch_interaction,
                interaction::use_equipped_item,
                combat::player_attack,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (
                combat::tick_attack_flash,
                spawn::update_held_item,
                camera::camera_follow_player,
            ),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local resources & components (player-domain only)
// ═══════════════════════════════════════════════════════════════════════════

/// Seconds until the sword can swing again.
#[derive(Resource, Debug, Default)]
pub struct AttackCooldown {
    pub remaining: f32,
}

/// Child sprite showing the equipped item in the player's hand.
#[derive(Component, Debug)]
pub struct HeldItemSprite;
