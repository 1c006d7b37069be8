use bevy::prelude::*;

use crate::config::{CowSettings, GameBalance};
use crate::shared::*;

/// What pressing interact on a cow would do with the item in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CowAction {
    Milk,
    Feed,
    None,
}

fn is_bottle(def: &ItemDef) -> bool {
    def.tool == ToolKind::Bottle || def.name.to_lowercase().contains("bottle")
}

fn is_corn(def: &ItemDef) -> bool {
    def.name.to_lowercase().contains("corn")
}

pub fn cow_action(cow: &Cow, dead: bool, held: Option<&ItemDef>) -> CowAction {
    if dead || cow.is_baby {
        return CowAction::None;
    }
    let Some(def) = held else {
        return CowAction::None;
    };
    if is_bottle(def) && cow.can_be_milked {
        CowAction::Milk
    } else if is_corn(def) && cow.can_breed && !cow.in_love {
        CowAction::Feed
    } else {
        CowAction::None
    }
}

pub fn cow_prompt(action: CowAction) -> (String, bool) {
    match action {
        CowAction::Milk => ("Milk Cow [E]".into(), true),
        CowAction::Feed => ("Feed Corn [E]".into(), true),
        CowAction::None => (String::new(), false),
    }
}

/// Multi-line status readout for a cow.
pub fn cow_info(cow: &Cow, settings: &CowSettings) -> String {
    let mut lines = Vec::new();
    if cow.is_baby {
        lines.push(format!(
            "Baby Cow (Age: {}/{} days)",
            cow.age_days, settings.days_to_grow_up
        ));
        return lines.join("\n");
    }
    lines.push("Adult Cow".to_string());
    if cow.in_love {
        lines.push("In Love Mode".to_string());
    }
    if cow.can_be_milked {
        lines.push("Ready to milk!".to_string());
    } else {
        lines.push(format!("Milk in {} day(s)", cow.milk_cooldown));
    }
    if cow.can_breed {
        lines.push("Ready to breed!".to_string());
    } else {
        lines.push(format!("Breed in {} day(s)", cow.breeding_cooldown));
    }
    lines.join("\n")
}

pub fn update_cow_prompts(
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut cows: Query<(&Cow, &Health, &mut Interactable)>,
) {
    let held = equipped.0.as_deref().and_then(|id| registry.get(id));
    for (cow, health, mut interactable) in &mut cows {
        let (prompt, available) = cow_prompt(cow_action(cow, health.is_dead(), held));
        interactable.set(prompt, available);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Milk / feed
// ─────────────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn handle_cow_interact(
    mut events: EventReader<InteractEvent>,
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut cows: Query<(Entity, &mut Cow, &Health, &Transform)>,
    mut drop_events: EventWriter<DropItemEvent>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
) {
    let settings = &balance.cows;
    for event in events.read() {
        if event.kind != InteractionKind::Cow {
            continue;
        }
        let Some(held) = equipped.0.as_deref().and_then(|id| registry.get(id)) else {
            continue;
        };
        let Ok((_, mut cow, health, tf)) = cows.get_mut(event.target) else {
            continue;
        };

        match cow_action(&cow, health.is_dead(), Some(held)) {
            CowAction::Milk => {
                if settings.consume_bottle && !inventory.remove_item(&held.id, 1) {
                    continue;
                }
                let milk = &settings.milk_item;
                let leftover = inventory.add_item(milk, 1, registry.max_stack(milk));
                if leftover > 0 {
                    drop_events.send(DropItemEvent {
                        item_id: milk.clone(),
                        quantity: leftover,
                        position: tf.translation.truncate(),
                    });
                } else {
                    pickup_events.send(ItemPickupEvent {
                        item_id: milk.clone(),
                        quantity: 1,
                    });
                }
                cow.milk_cooldown = settings.milk_cooldown_days;
                cow.refresh_status();
                info!("[Animals] Milked a cow");
            }
            CowAction::Feed => {
                if !inventory.remove_item(&held.id, 1) {
                    continue;
                }
                cow.in_love = true;
                drop(cow);
                pair_with_mate(event.target, &mut cows);
            }
            CowAction::None => {}
        }
    }
}

/// Pair a cow that just entered love mode with another willing adult.
fn pair_with_mate(cow_entity: Entity, cows: &mut Query<(Entity, &mut Cow, &Health, &Transform)>) {
    let partner = cows
        .iter()
        .find(|(e, other, health, _)| {
            *e != cow_entity
                && !health.is_dead()
                && other.in_love
                && other.can_breed
                && !other.is_baby
                && other.mate.is_none()
        })
        .map(|(e, ..)| e);

    let Some(partner) = partner else {
        info!("[Animals] Cow is in love mode, waiting for a partner");
        return;
    };
    if let Ok((_, mut other, ..)) = cows.get_mut(partner) {
        other.mate = Some(cow_entity);
    }
    if let Ok((_, mut cow, ..)) = cows.get_mut(cow_entity) {
        cow.mate = Some(partner);
    }
    info!("[Animals] Two cows paired up");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, tool: ToolKind) -> ItemDef {
        ItemDef {
            id: name.to_lowercase(),
            name: name.into(),
            tool,
            ..default()
        }
    }

    #[test]
    fn test_bottle_milks_ready_adult() {
        let cow = Cow::adult();
        let bottle = item("Bottle", ToolKind::Bottle);
        assert_eq!(cow_action(&cow, false, Some(&bottle)), CowAction::Milk);
        assert_eq!(cow_prompt(CowAction::Milk), ("Milk Cow [E]".into(), true));
    }

    #[test]
    fn test_corn_feeds_cow_that_can_breed() {
        let mut cow = Cow::adult();
        let corn = item("Corn", ToolKind::None);
        assert_eq!(cow_action(&cow, false, Some(&corn)), CowAction::Feed);
        cow.in_love = true;
        assert_eq!(cow_action(&cow, false, Some(&corn)), CowAction::None);
    }

    #[test]
    fn test_babies_and_dead_cows_are_not_interactable() {
        let corn = item("Corn", ToolKind::None);
        assert_eq!(cow_action(&Cow::baby(), false, Some(&corn)), CowAction::None);
        assert_eq!(cow_action(&Cow::adult(), true, Some(&corn)), CowAction::None);
        assert_eq!(cow_prompt(CowAction::None), (String::new(), false));
    }

    #[test]
    fn test_cow_on_cooldown_cannot_be_milked() {
        let mut cow = Cow::adult();
        cow.milk_cooldown = 1;
        cow.refresh_status();
        let bottle = item("Bottle", ToolKind::Bottle);
        assert_eq!(cow_action(&cow, false, Some(&bottle)), CowAction::None);
    }

    #[test]
    fn test_cow_info_lines() {
        let settings = CowSettings::default();
        let mut calf = Cow::baby();
        calf.age_days = 1;
        assert_eq!(cow_info(&calf, &settings), "Baby Cow (Age: 1/3 days)");

        let mut cow = Cow::adult();
        cow.milk_cooldown = 1;
        cow.breeding_cooldown = 2;
        cow.refresh_status();
        assert_eq!(cow_info(&cow, &settings), "Adult Cow\nMilk in 1 day(s)\nBreed in 2 day(s)");

        let mut ready = Cow::adult();
        ready.in_love = true;
        assert_eq!(
            cow_info(&ready, &settings),
            "Adult Cow\nIn Love Mode\nReady to milk!\nReady to breed!"
        );
    }
}
