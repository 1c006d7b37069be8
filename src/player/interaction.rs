use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════════
// Target selection
// ═══════════════════════════════════════════════════════════════════════════

/// One interactable seen from the player's position this frame.
#[derive(Debug, Clone)]
pub struct InteractionCandidate {
    pub entity: Entity,
    pub position: Vec2,
    pub prompt: String,
    pub available: bool,
}

/// Pick the nearest available candidate inside `range` and within
/// `angle_deg / 2` of `facing`. When nothing is available, the nearest
/// unavailable candidate with a non-empty prompt is returned as a hint
/// without an entity, so the player can read why they cannot act.
pub fn pick_target(
    origin: Vec2,
    facing: Vec2,
    range: f32,
    angle_deg: f32,
    candidates: &[InteractionCandidate],
) -> (Option<Entity>, String) {
    let half_angle = angle_deg * 0.5;
    let mut best: Option<(f32, &InteractionCandidate)> = None;
    let mut hint: Option<(f32, &InteractionCandidate)> = None;

    for candidate in candidates {
        let offset = candidate.position - origin;
        let dist = offset.length();
        if dist > range || angle_between_deg(facing, offset) > half_angle {
            continue;
        }
        let slot = if candidate.available {
            &mut best
        } else if !candidate.prompt.is_empty() {
            &mut hint
        } else {
            continue;
        };
        if slot.map_or(true, |(d, _)| dist < d) {
            *slot = Some((dist, candidate));
        }
    }

    match (best, hint) {
        (Some((_, c)), _) => (Some(c.entity), c.prompt.clone()),
        (None, Some((_, c))) => (None, c.prompt.clone()),
        (None, None) => (None, String::new()),
    }
}

/// Where a hoe strike lands for a player at `pos` facing `facing`.
pub fn till_point(pos: Vec2, facing: Vec2, distance: f32) -> Vec2 {
    pos + facing.normalize_or_zero() * distance
}

pub fn in_zone(point: Vec2, zone: [f32; 4]) -> bool {
    point.x >= zone[0] && point.x <= zone[2] && point.y >= zone[1] && point.y <= zone[3]
}

pub fn find_interaction_target(
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    players: Query<(&Transform, &Facing, &Health), With<Player>>,
    interactables: Query<(Entity, &Transform, &Interactable), Without<Player>>,
    mut target: ResMut<InteractionTarget>,
) {
    let Ok((player_tf, facing, health)) = players.get_single() else {
        target.entity = None;
        target.prompt.clear();
        return;
    };
    if health.is_dead() {
        target.entity = None;
        target.prompt.clear();
        return;
    }

    let origin = player_tf.translation.truncate();
    let candidates: Vec<InteractionCandidate> = interactables
        .iter()
        .map(|(entity, tf, interactable)| InteractionCandidate {
            entity,
            position: tf.translation.truncate(),
            prompt: interactable.prompt.clone(),
            available: interactable.available,
        })
        .collect();

    let (entity, mut prompt) = pick_target(
        origin,
        facing.0,
        balance.player.interaction_range,
        balance.player.interaction_angle,
        &candidates,
    );

    if entity.is_none() && prompt.is_empty() && holding_tool(&equipped, &registry, ToolKind::Hoe) {
        let point = till_point(origin, facing.0, balance.farming.till_distance);
        if in_zone(point, balance.farming.zone) {
            prompt = "Press E to Till Soil".into();
        }
    }

    if target.entity != entity || target.prompt != prompt {
        target.entity = entity;
        target.prompt = prompt;
    }
}

fn holding_tool(equipped: &EquippedItem, registry: &ItemRegistry, tool: ToolKind) -> bool {
    equipped
        .0
        .as_deref()
        .and_then(|id| registry.get(id))
        .is_some_and(|def| def.tool == tool)
}

// ═══════════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════════

/// Route the interact press to the targeted entity's owning domain.
pub fn dispatch_interaction(
    input: Res<PlayerInput>,
    target: Res<InteractionTarget>,
    interactables: Query<&Interactable>,
    mut claimed: ResMut<InteractionClaimed>,
    mut events: EventWriter<InteractEvent>,
) {
    claimed.0 = false;
    if !input.interact {
        return;
    }
    let Some(entity) = target.entity else {
        return;
    };
    let Ok(interactable) = interactables.get(entity) else {
        return;
    };
    if !interactable.available {
        return;
    }
    events.send(InteractEvent {
        target: entity,
        kind: interactable.kind,
    });
    claimed.0 = true;
}

/// Interact with nothing targeted: till with a hoe, or eat a healing item.
#[allow(clippy::too_many_arguments)]
pub fn use_equipped_item(
    input: Res<PlayerInput>,
    claimed: Res<InteractionClaimed>,
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut players: Query<(Entity, &Transform, &Facing, &mut Health), With<Player>>,
    mut till_events: EventWriter<TillSoilEvent>,
    mut health_events: EventWriter<HealthChangedEvent>,
) {
    if !input.interact || claimed.0 {
        return;
    }
    let Some(def) = equipped.0.as_deref().and_then(|id| registry.get(id)) else {
        return;
    };
    let Ok((entity, tf, facing, mut health)) = players.get_single_mut() else {
        return;
    };
    if health.is_dead() {
        return;
    }

    if def.tool == ToolKind::Hoe {
        let position = till_point(tf.translation.truncate(), facing.0, balance.farming.till_distance);
        till_events.send(TillSoilEvent { position });
        return;
    }

    if def.heal_amount > 0.0 && !health.is_full() {
        if !inventory.remove_item(&def.id, 1) {
            return;
        }
        let restored = health.heal(def.heal_amount);
        health_events.send(HealthChangedEvent {
            entity,
            current: health.current,
            max: health.max,
        });
        info!("[Player] Ate {} (+{:.0} HP)", def.name, restored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32, pos: Vec2, available: bool, prompt: &str) -> InteractionCandidate {
        InteractionCandidate {
            entity: Entity::from_raw(id),
            position: pos,
            prompt: prompt.into(),
            available,
        }
    }

    #[test]
    fn test_pick_target_nearest_available() {
        let list = vec![
            candidate(1, Vec2::new(0.0, -2.5), true, "far"),
            candidate(2, Vec2::new(0.3, -1.0), true, "near"),
        ];
        let (entity, prompt) = pick_target(Vec2::ZERO, Vec2::NEG_Y, 3.0, 90.0, &list);
        assert_eq!(entity, Some(Entity::from_raw(2)));
        assert_eq!(prompt, "near");
    }

    #[test]
    fn test_pick_target_respects_cone_and_range() {
        let list = vec![
            candidate(1, Vec2::new(0.0, 2.0), true, "behind"),
            candidate(2, Vec2::new(2.0, -0.5), true, "side"),
            candidate(3, Vec2::new(0.0, -4.0), true, "too far"),
        ];
        let (entity, prompt) = pick_target(Vec2::ZERO, Vec2::NEG_Y, 3.0, 90.0, &list);
        assert_eq!(entity, None);
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_unavailable_prompt_is_hint_only() {
        let list = vec![candidate(1, Vec2::new(0.0, -1.0), false, "You can only sleep at night")];
        let (entity, prompt) = pick_target(Vec2::ZERO, Vec2::NEG_Y, 3.0, 90.0, &list);
        assert_eq!(entity, None);
        assert_eq!(prompt, "You can only sleep at night");
    }

    #[test]
    fn test_available_beats_closer_hint() {
        let list = vec![
            candidate(1, Vec2::new(0.0, -0.5), false, "Growing... Stage 1/3"),
            candidate(2, Vec2::new(0.0, -2.0), true, "Press E to Harvest"),
        ];
        let (entity, _) = pick_target(Vec2::ZERO, Vec2::NEG_Y, 3.0, 90.0, &list);
        assert_eq!(entity, Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_till_point_and_zone() {
        let p = till_point(Vec2::new(-10.0, 0.0), Vec2::X, 1.5);
        assert_eq!(p, Vec2::new(-8.5, 0.0));
        assert!(in_zone(p, [-18.0, -6.0, -6.0, 6.0]));
        assert!(in_zone(Vec2::new(-6.0, 6.0), [-18.0, -6.0, -6.0, 6.0]));
        assert!(!in_zone(Vec2::new(0.0, 0.0), [-18.0, -6.0, -6.0, 6.0]));
    }
}
