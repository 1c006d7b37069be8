//! World domain: the farm layout, the pen gate, and session (re)building.
//!
//! The farm is built once when loading finishes. A restart sweeps every
//! `GameplayEntity`, builds a fresh farm, and announces it with
//! `WorldBuiltEvent` so the other domains can spawn their own pieces.

use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

pub mod gate;
pub mod layout;

pub use gate::{door_angle, gate_prompt, smoothstep, step_swing, DoorHinge, SwingGate};
pub use layout::{pen_fence, spawn_farm, zone_rect, FenceSegment, GROUND_ITEMS};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnExit(GameState::Loading), build_world)
            .add_systems(Update, handle_restart)
            .add_systems(
                Update,
                gate::toggle_gate_on_interact.run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, (gate::update_gate_prompts, gate::swing_gates));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn build_world(
    mut commands: Commands,
    balance: Res<GameBalance>,
    mut drop_events: EventWriter<DropItemEvent>,
    mut built_events: EventWriter<WorldBuiltEvent>,
) {
    populate_world(&mut commands, &balance, &mut drop_events);
    info!("[World] Farm built");
    built_events.send(WorldBuiltEvent);
}

fn handle_restart(
    mut commands: Commands,
    mut events: EventReader<RestartEvent>,
    balance: Res<GameBalance>,
    session: Query<Entity, With<GameplayEntity>>,
    mut drop_events: EventWriter<DropItemEvent>,
    mut built_events: EventWriter<WorldBuiltEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // Several restart presses in one frame still rebuild once.
    if events.read().count() == 0 {
        return;
    }

    let mut swept = 0;
    for entity in &session {
        commands.entity(entity).despawn_recursive();
        swept += 1;
    }
    info!("[World] Restarting: cleared {} entities", swept);

    populate_world(&mut commands, &balance, &mut drop_events);
    built_events.send(WorldBuiltEvent);
    next_state.set(GameState::Playing);
}

fn populate_world(
    commands: &mut Commands,
    balance: &GameBalance,
    drop_events: &mut EventWriter<DropItemEvent>,
) {
    spawn_farm(commands, balance);
    for (item_id, quantity, position) in GROUND_ITEMS {
        drop_events.send(DropItemEvent {
            item_id: item_id.to_string(),
            quantity: *quantity,
            position: Vec2::from(*position),
        });
    }
}
