use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::AttackCooldown;

/// Every target within `range` and inside the `angle_deg` cone in front of
/// the attacker.
pub fn cone_hits(
    origin: Vec2,
    facing: Vec2,
    range: f32,
    angle_deg: f32,
    targets: &[(Entity, Vec2)],
) -> Vec<Entity> {
    let half_angle = angle_deg * 0.5;
    targets
        .iter()
        .filter(|(_, pos)| {
            let offset = *pos - origin;
            offset.length() <= range && angle_between_deg(facing, offset) <= half_angle
        })
        .map(|(entity, _)| *entity)
        .collect()
}

/// Base swing damage plus the weapon's bonus.
pub fn swing_damage(base: f32, weapon_bonus: f32) -> f32 {
    base + weapon_bonus.max(0.0)
}

/// Space / left click swings the sword when one is in hand.
#[allow(clippy::too_many_arguments)]
pub fn player_attack(
    time: Res<Time>,
    input: Res<PlayerInput>,
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    mut cooldown: ResMut<AttackCooldown>,
    mut flash: ResMut<AttackFlash>,
    players: Query<(Entity, &Transform, &Facing, &Health), With<Player>>,
    targets: Query<(Entity, &Transform, &Health), Without<Player>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    if cooldown.remaining > 0.0 {
        cooldown.remaining = (cooldown.remaining - time.delta_secs()).max(0.0);
    }
    if !input.attack || cooldown.remaining > 0.0 {
        return;
    }
    let Ok((player, player_tf, facing, health)) = players.get_single() else {
        return;
    };
    if health.is_dead() {
        return;
    }
    let Some(weapon) = equipped
        .0
        .as_deref()
        .and_then(|id| registry.get(id))
        .filter(|def| def.tool == ToolKind::Sword)
    else {
        return;
    };

    let settings = &balance.combat;
    cooldown.remaining = settings.attack_cooldown;
    flash.duration = settings.flash_duration;
    flash.remaining = settings.flash_duration;

    let alive: Vec<(Entity, Vec2)> = targets
        .iter()
        .filter(|(_, _, h)| !h.is_dead())
        .map(|(e, tf, _)| (e, tf.translation.truncate()))
        .collect();
    let hits = cone_hits(
        player_tf.translation.truncate(),
        facing.0,
        settings.attack_range,
        settings.attack_angle,
        &alive,
    );
    let amount = swing_damage(settings.base_damage, weapon.attack_damage);
    for target in &hits {
        damage_events.send(DamageEvent {
            target: *target,
            amount,
            direction: Vec2::ZERO,
            source: Some(player),
        });
    }
    info!("[Player] Sword swing hit {} target(s) for {}", hits.len(), amount);
}

pub fn tick_attack_flash(time: Res<Time>, mut flash: ResMut<AttackFlash>) {
    if flash.remaining > 0.0 {
        flash.remaining = (flash.remaining - time.delta_secs()).max(0.0);
    }
}
