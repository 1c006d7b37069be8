use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

/// A slaughtered cow goes straight into the bag as meat. Whatever does not
/// fit is dropped where the cow fell.
pub fn handle_cow_death(
    mut deaths: EventReader<DeathEvent>,
    balance: Res<GameBalance>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    cows: Query<&Transform, With<Cow>>,
    mut drop_events: EventWriter<DropItemEvent>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    let settings = &balance.cows;
    for death in deaths.read() {
        let Ok(tf) = cows.get(death.entity) else {
            continue;
        };
        let meat = &settings.meat_item;
        let amount = settings.meat_drop_amount;
        if amount == 0 {
            continue;
        }
        let leftover = inventory.add_item(meat, amount, registry.max_stack(meat));
        if leftover > 0 {
            drop_events.send(DropItemEvent {
                item_id: meat.clone(),
                quantity: leftover,
                position: tf.translation.truncate(),
            });
        }
        toast_events.send(ToastEvent {
            message: format!("A cow died. +{} {}", amount, registry.name_of(meat)),
            duration_secs: 2.5,
        });
        info!("[Animals] Cow died, {} x{} collected", meat, amount);
    }
}
