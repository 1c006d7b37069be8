use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::FenceSlip;

/// Something a coyote could go after.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec2,
}

/// Pick what to chase. An active aggro target always wins. Otherwise the
/// nearest cow strictly inside `detection_range` (when cows are preferred),
/// falling back to the player if within `detection_range`.
pub fn select_target(
    pos: Vec2,
    aggro: Option<Entity>,
    player: Option<TargetCandidate>,
    cows: &[TargetCandidate],
    detection_range: f32,
    prefer_cows: bool,
) -> Option<Entity> {
    if aggro.is_some() {
        return aggro;
    }

    let mut best: Option<Entity> = None;
    if prefer_cows {
        let mut closest = detection_range;
        for cow in cows {
            let d = pos.distance(cow.position);
            if d < closest {
                closest = d;
                best = Some(cow.entity);
            }
        }
    }
    if best.is_none() {
        if let Some(player) = player {
            if pos.distance(player.position) <= detection_range {
                best = Some(player.entity);
            }
        }
    }
    best
}

/// A coyote that gets hurt turns on the player if the player is close enough.
pub fn aggro_on_damage(
    mut events: EventReader<DamageTakenEvent>,
    balance: Res<GameBalance>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Predator>)>,
    mut predators: Query<(&mut Predator, &Transform, &Health)>,
) {
    let settings = &balance.predators;
    let Ok((player, player_tf)) = players.get_single() else {
        return;
    };
    for event in events.read() {
        let Ok((mut predator, tf, health)) = predators.get_mut(event.entity) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        let dist = tf.translation.truncate().distance(player_tf.translation.truncate());
        if dist <= settings.detection_range * 1.5 {
            predator.target = Some(player);
            predator.aggro_remaining = settings.aggro_duration;
            debug!("[Predators] Coyote is angry at the player for {}s", settings.aggro_duration);
        }
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn predator_ai(
    time: Res<Time>,
    balance: Res<GameBalance>,
    players: Query<(Entity, &Transform, &Health), (With<Player>, Without<Predator>)>,
    cows: Query<(Entity, &Transform, &Health), (With<Cow>, Without<Predator>)>,
    fences: Query<(Entity, &Transform, &Fence), Without<Predator>>,
    mut predators: Query<
        (Entity, &mut Predator, &mut Transform, &mut Facing, &mut FenceSlip, &BodyRadius, &Health),
        (Without<Player>, Without<Cow>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let settings = &balance.predators;
    let dt = time.delta_secs();

    let player = players
        .get_single()
        .ok()
        .filter(|(_, _, h)| !h.is_dead())
        .map(|(e, tf, _)| TargetCandidate {
            entity: e,
            position: tf.translation.truncate(),
        });
    let herd: Vec<TargetCandidate> = cows
        .iter()
        .filter(|(_, _, h)| !h.is_dead())
        .map(|(e, tf, _)| TargetCandidate {
            entity: e,
            position: tf.translation.truncate(),
        })
        .collect();
    let fence_boxes: Vec<(Entity, Vec2, Vec2)> = fences
        .iter()
        .map(|(e, tf, f)| (e, tf.translation.truncate(), f.half_extents))
        .collect();

    for (entity, mut predator, mut tf, mut facing, mut slip, radius, health) in &mut predators {
        if health.is_dead() {
            continue;
        }
        if predator.attack_cooldown_left > 0.0 {
            predator.attack_cooldown_left = (predator.attack_cooldown_left - dt).max(0.0);
        }
        if predator.target.is_some() {
            predator.aggro_remaining -= dt;
            if predator.aggro_remaining <= 0.0 {
                predator.target = None;
                predator.aggro_remaining = 0.0;
            }
        }
        // Aggro on a dead or despawned player lapses.
        if predator.target.is_some() && player.map(|p| p.entity) != predator.target {
            predator.target = None;
        }

        let pos = tf.translation.truncate();
        let Some(target) = select_target(
            pos,
            predator.target,
            player,
            &herd,
            settings.detection_range,
            settings.prefer_cows,
        ) else {
            continue;
        };
        let Some(target_pos) = player
            .filter(|p| p.entity == target)
            .or_else(|| herd.iter().copied().find(|c| c.entity == target))
            .map(|c| c.position)
        else {
            continue;
        };

        let to_target = target_pos - pos;
        let distance = to_target.length();
        let dir = to_target.normalize_or_zero();
        if distance <= settings.attack_range {
            if predator.attack_cooldown_left <= 0.0 {
                damage_events.send(DamageEvent {
                    target,
                    amount: predator.attack_damage,
                    direction: dir,
                    source: Some(entity),
                });
                predator.attack_cooldown_left = settings.attack_cooldown;
            }
        } else if distance <= settings.detection_range {
            if dir != Vec2::ZERO {
                facing.0 = dir;
            }
            let step = dir * settings.move_speed * dt;
            let next = step_around_fences(pos, step, radius.0, &fence_boxes, &mut slip);
            tf.translation.x = next.x;
            tf.translation.y = next.y;
            if dir.x.abs() > 0.1 {
                tf.scale.x = if dir.x > 0.0 { 1.0 } else { -1.0 };
            }
        }
    }
}

/// Move with axis-separated fence collision. Records the fence touched, if
/// any, so the slip roll can fire.
fn step_around_fences(
    pos: Vec2,
    step: Vec2,
    radius: f32,
    fences: &[(Entity, Vec2, Vec2)],
    slip: &mut FenceSlip,
) -> Vec2 {
    let ignored = slip.ignored_fence();
    let blocking = |p: Vec2| {
        fences
            .iter()
            .find(|(e, c, h)| ignored != Some(*e) && circle_overlaps_box(p, radius, *c, *h))
            .map(|(e, ..)| *e)
    };

    let mut out = pos;
    let try_x = Vec2::new(out.x + step.x, out.y);
    match blocking(try_x) {
        Some(fence) => slip.touching = Some(fence),
        None => out = try_x,
    }
    let try_y = Vec2::new(out.x, out.y + step.y);
    match blocking(try_y) {
        Some(fence) => slip.touching = Some(fence),
        None => out = try_y,
    }
    out
}

/// Dead coyotes leave a pelt behind.
pub fn drop_loot_on_death(
    mut deaths: EventReader<DeathEvent>,
    balance: Res<GameBalance>,
    predators: Query<&Transform, With<Predator>>,
    mut drop_events: EventWriter<DropItemEvent>,
) {
    let settings = &balance.predators;
    for death in deaths.read() {
        let Ok(tf) = predators.get(death.entity) else {
            continue;
        };
        info!("[Predators] Coyote killed");
        if settings.loot_item.is_empty() || settings.loot_amount == 0 {
            continue;
        }
        drop_events.send(DropItemEvent {
            item_id: settings.loot_item.clone(),
            quantity: settings.loot_amount,
            position: tf.translation.truncate(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(id: u32, x: f32, y: f32) -> TargetCandidate {
        TargetCandidate {
            entity: Entity::from_raw(id),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_aggro_wins() {
        let player = Some(cand(1, 50.0, 0.0));
        let cows = [cand(2, 1.0, 0.0)];
        let t = select_target(Vec2::ZERO, Some(Entity::from_raw(1)), player, &cows, 20.0, true);
        assert_eq!(t, Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_nearest_cow_preferred_over_player() {
        let player = Some(cand(1, 2.0, 0.0));
        let cows = [cand(2, 10.0, 0.0), cand(3, 6.0, 0.0)];
        let t = select_target(Vec2::ZERO, None, player, &cows, 20.0, true);
        assert_eq!(t, Some(Entity::from_raw(3)));
    }

    #[test]
    fn test_cow_must_be_strictly_inside_range() {
        let cows = [cand(2, 20.0, 0.0)];
        let player = Some(cand(1, 20.0, 0.0));
        let t = select_target(Vec2::ZERO, None, player, &cows, 20.0, true);
        assert_eq!(t, Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_player_when_cows_not_preferred() {
        let cows = [cand(2, 1.0, 0.0)];
        let player = Some(cand(1, 5.0, 0.0));
        let t = select_target(Vec2::ZERO, None, player, &cows, 20.0, false);
        assert_eq!(t, Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_nothing_in_range() {
        let cows = [cand(2, 30.0, 0.0)];
        let player = Some(cand(1, 25.0, 0.0));
        assert_eq!(select_target(Vec2::ZERO, None, player, &cows, 20.0, true), None);
    }

    #[test]
    fn test_fence_blocks_and_is_recorded() {
        let fence = Entity::from_raw(9);
        let fences = [(fence, Vec2::new(1.0, 0.0), Vec2::new(0.1, 5.0))];
        let mut slip = FenceSlip::default();
        let out = step_around_fences(Vec2::new(0.3, 0.0), Vec2::new(0.3, 0.2), 0.5, &fences, &mut slip);
        assert_eq!(out.x, 0.3);
        assert!((out.y - 0.2).abs() < 1e-6);
        assert_eq!(slip.touching, Some(fence));
    }
}
