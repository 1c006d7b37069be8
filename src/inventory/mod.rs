//! Inventory domain: starter kit, hotbar selection, the equipped item, and
//! item pickups lying in the world.

pub mod world_items;

use bevy::prelude::*;

use crate::shared::*;

pub use world_items::{float_offset, FloatMotion, WorldItem};

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                reset_inventory_on_world_built,
                hotbar_select.run_if(in_state(GameState::Playing)),
                refresh_equipped,
                world_items::spawn_dropped_items,
                world_items::animate_world_items,
                world_items::update_world_item_prompts,
                world_items::handle_pickup,
            ),
        );
    }
}

/// What a new farmhand starts with.
pub const STARTER_KIT: &[(&str, u32)] = &[
    ("hoe", 1),
    ("sword", 1),
    ("bottle", 1),
    ("corn_seeds", 5),
    ("corn", 2),
];

pub fn starter_inventory(registry: &ItemRegistry) -> Inventory {
    let mut inventory = Inventory::default();
    for (id, qty) in STARTER_KIT {
        let leftover = inventory.add_item(id, *qty, registry.max_stack(id));
        if leftover > 0 {
            warn!("[Inventory] Starter kit overflowed on {}: {} left", id, leftover);
        }
    }
    inventory
}

pub fn reset_inventory_on_world_built(
    mut events: EventReader<WorldBuiltEvent>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut equipped: ResMut<EquippedItem>,
) {
    for _ in events.read() {
        *inventory = starter_inventory(&registry);
        equipped.0 = None;
        info!("[Inventory] Starter kit packed");
    }
}

/// Number keys 1-6 pick a hotbar slot.
pub fn hotbar_select(input: Res<PlayerInput>, mut inventory: ResMut<Inventory>) {
    if let Some(slot) = input.hotbar_slot {
        let slot = slot as usize;
        if slot < HOTBAR_SLOTS && inventory.selected_slot != slot {
            inventory.selected_slot = slot;
        }
    }
}

/// The equipped item follows the selected slot, including the slot
/// emptying out or being refilled.
pub fn equipped_from(inventory: &Inventory) -> Option<ItemId> {
    inventory.selected().map(|slot| slot.item_id.clone())
}

pub fn refresh_equipped(inventory: Res<Inventory>, mut equipped: ResMut<EquippedItem>) {
    let next = equipped_from(&inventory);
    if equipped.0 != next {
        equipped.0 = next;
    }
}
