use bevy::prelude::*;
use rand::Rng;

use crate::config::GameBalance;
use crate::shared::*;

/// An item lying on the ground waiting to be picked up.
#[derive(Component, Debug, Clone)]
pub struct WorldItem {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Bob-and-spin idle animation around a fixed anchor.
#[derive(Component, Debug, Clone)]
pub struct FloatMotion {
    pub anchor: Vec2,
    pub phase: f32,
}

pub fn float_offset(elapsed: f32, phase: f32, frequency: f32, amplitude: f32) -> f32 {
    ((elapsed + phase) * frequency).sin() * amplitude
}

pub fn spawn_dropped_items(
    mut commands: Commands,
    mut events: EventReader<DropItemEvent>,
    registry: Res<ItemRegistry>,
) {
    let mut rng = rand::thread_rng();
    for event in events.read() {
        if event.quantity == 0 {
            continue;
        }
        let Some(def) = registry.get(&event.item_id) else {
            warn!("[Inventory] Tried to drop unknown item '{}'", event.item_id);
            continue;
        };
        commands.spawn((
            WorldItem {
                item_id: event.item_id.clone(),
                quantity: event.quantity,
            },
            FloatMotion {
                anchor: event.position,
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
            },
            Interactable::new(InteractionKind::WorldItem),
            GameplayEntity,
            Sprite::from_color(def.icon_color(), Vec2::splat(0.5)),
            Transform::from_xyz(event.position.x, event.position.y, Z_ITEM),
        ));
    }
}

pub fn animate_world_items(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut query: Query<(&FloatMotion, &mut Transform), With<WorldItem>>,
) {
    let settings = &balance.world;
    let elapsed = time.elapsed_secs();
    let spin = settings.item_spin_degrees.to_radians() * time.delta_secs();
    for (motion, mut transform) in &mut query {
        let bob = float_offset(
            elapsed,
            motion.phase,
            settings.item_float_frequency,
            settings.item_float_amplitude,
        );
        transform.translation.x = motion.anchor.x;
        transform.translation.y = motion.anchor.y + bob;
        transform.rotate_z(spin);
    }
}

pub fn update_world_item_prompts(
    registry: Res<ItemRegistry>,
    mut query: Query<(&WorldItem, &mut Interactable)>,
) {
    for (item, mut interactable) in &mut query {
        let name = registry.name_of(&item.item_id);
        interactable.set(format!("Press E to Pick Up {}", name), true);
    }
}

pub fn handle_pickup(
    mut commands: Commands,
    mut events: EventReader<InteractEvent>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut items: Query<&mut WorldItem>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        if event.kind != InteractionKind::WorldItem {
            continue;
        }
        let Ok(mut item) = items.get_mut(event.target) else {
            continue;
        };
        let leftover =
            inventory.add_item(&item.item_id, item.quantity, registry.max_stack(&item.item_id));
        let taken = item.quantity - leftover;
        if taken > 0 {
            pickup_events.send(ItemPickupEvent {
                item_id: item.item_id.clone(),
                quantity: taken,
            });
        }
        if leftover == 0 {
            commands.entity(event.target).despawn_recursive();
        } else {
            item.quantity = leftover;
            toast_events.send(ToastEvent {
                message: "Inventory full".into(),
                duration_secs: 2.0,
            });
        }
    }
}
