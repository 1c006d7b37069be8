//! Planting, growth by the world clock, and harvest.

use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::TilledPlot;

/// Stage a crop should be at. Uses the time-of-day difference, wrapping once
/// across midnight.
pub fn growth_target(now: f32, planted_at: f32, hours_per_stage: f32, max_stage: u32) -> u32 {
    let mut hours = now - planted_at;
    if hours < 0.0 {
        hours += 24.0;
    }
    if hours_per_stage <= 0.0 {
        return max_stage;
    }
    ((hours / hours_per_stage).floor().max(0.0) as u32).min(max_stage)
}

/// Prompt text and whether pressing interact does anything.
pub fn plot_prompt(plot: &TilledPlot, max_stage: u32, holding_seed: bool) -> (String, bool) {
    if plot.is_mature(max_stage) {
        ("Press E to Harvest".into(), true)
    } else if plot.planted {
        (format!("Growing... Stage {}/{}", plot.growth_stage, max_stage), false)
    } else {
        ("Press E to Plant Seeds".into(), holding_seed)
    }
}

/// What a mature plot sown with `seed` gives back.
pub fn harvest_yields(seed: &ItemDef) -> Vec<(ItemId, u32)> {
    let mut out = Vec::new();
    if let Some(crop) = &seed.harvest_item {
        out.push((crop.clone(), seed.harvest_yield.max(1)));
    }
    if let Some(returned) = &seed.seed_item {
        out.push((returned.clone(), seed.seed_yield.max(1)));
    }
    out
}

fn equipped_seed<'a>(equipped: &EquippedItem, registry: &'a ItemRegistry) -> Option<&'a ItemDef> {
    equipped
        .0
        .as_deref()
        .and_then(|id| registry.get(id))
        .filter(|def| def.is_seed())
}

pub fn update_plot_prompts(
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut plots: Query<(&TilledPlot, &mut Interactable)>,
) {
    let holding_seed = equipped_seed(&equipped, &registry).is_some();
    let max_stage = balance.farming.max_growth_stage;
    for (plot, mut interactable) in &mut plots {
        let (prompt, available) = plot_prompt(plot, max_stage, holding_seed);
        interactable.set(prompt, available);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_plot_interaction(
    mut events: EventReader<InteractEvent>,
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut plots: Query<(&mut TilledPlot, &Transform)>,
    mut drop_events: EventWriter<DropItemEvent>,
    mut removed_events: EventWriter<ItemRemovedEvent>,
) {
    let max_stage = balance.farming.max_growth_stage;
    for event in events.read() {
        if event.kind != InteractionKind::Plot {
            continue;
        }
        let Ok((mut plot, tf)) = plots.get_mut(event.target) else {
            continue;
        };

        if plot.is_mature(max_stage) {
            let Some(seed) = plot.crop.as_deref().and_then(|id| registry.get(id)) else {
                warn!("[Farming] Mature plot has no known crop; clearing it");
                plot.reset();
                continue;
            };
            for (item_id, quantity) in harvest_yields(seed) {
                let leftover = inventory.add_item(&item_id, quantity, registry.max_stack(&item_id));
                if leftover > 0 {
                    drop_events.send(DropItemEvent {
                        item_id,
                        quantity: leftover,
                        position: tf.translation.truncate(),
                    });
                }
            }
            info!("[Farming] Harvested {}", seed.name);
            plot.reset();
        } else if !plot.planted {
            let Some(seed) = equipped_seed(&equipped, &registry) else {
                continue;
            };
            if !inventory.remove_item(&seed.id, 1) {
                continue;
            }
            removed_events.send(ItemRemovedEvent {
                item_id: seed.id.clone(),
                quantity: 1,
            });
            plot.planted = true;
            plot.crop = Some(seed.id.clone());
            plot.growth_stage = 0;
            plot.planted_at_hour = clock.current_time;
            info!("[Farming] Planted {} at {:.2}h", seed.name, clock.current_time);
        }
    }
}

pub fn grow_crops(
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    mut plots: Query<&mut TilledPlot>,
) {
    let settings = &balance.farming;
    for mut plot in &mut plots {
        if !plot.planted || plot.growth_stage >= settings.max_growth_stage {
            continue;
        }
        let target = growth_target(
            clock.current_time,
            plot.planted_at_hour,
            settings.hours_per_stage,
            settings.max_growth_stage,
        );
        if target > plot.growth_stage {
            plot.growth_stage = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_target_steps_every_two_hours() {
        assert_eq!(growth_target(8.0, 8.0, 2.0, 3), 0);
        assert_eq!(growth_target(9.9, 8.0, 2.0, 3), 0);
        assert_eq!(growth_target(10.0, 8.0, 2.0, 3), 1);
        assert_eq!(growth_target(14.5, 8.0, 2.0, 3), 3);
        assert_eq!(growth_target(23.0, 8.0, 2.0, 3), 3);
    }

    #[test]
    fn test_growth_target_wraps_midnight() {
        assert_eq!(growth_target(1.0, 23.0, 2.0, 3), 1);
        assert_eq!(growth_target(3.0, 22.0, 2.0, 3), 2);
    }

    #[test]
    fn test_plot_prompts() {
        let mut plot = TilledPlot::default();
        assert_eq!(plot_prompt(&plot, 3, false), ("Press E to Plant Seeds".into(), false));
        assert_eq!(plot_prompt(&plot, 3, true), ("Press E to Plant Seeds".into(), true));
        plot.planted = true;
        plot.growth_stage = 1;
        assert_eq!(plot_prompt(&plot, 3, true), ("Growing... Stage 1/3".into(), false));
        plot.growth_stage = 3;
        assert_eq!(plot_prompt(&plot, 3, false), ("Press E to Harvest".into(), true));
    }

    #[test]
    fn test_harvest_yields_at_least_one_each() {
        let seed = ItemDef {
            id: "corn_seeds".into(),
            harvest_item: Some("corn".into()),
            seed_item: Some("corn_seeds".into()),
            harvest_yield: 0,
            seed_yield: 2,
            ..default()
        };
        assert_eq!(
            harvest_yields(&seed),
            vec![("corn".to_string(), 1), ("corn_seeds".to_string(), 2)]
        );
    }
}
