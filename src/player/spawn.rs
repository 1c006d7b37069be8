use bevy::prelude::*;

use crate::config::GameBalance;
use crate::health::{DamageFlash, Knockback};
use crate::shared::*;

use super::{AttackCooldown, HeldItemSprite};

const PLAYER_COLOR: Color = Color::srgb(0.25, 0.45, 0.85);

pub fn spawn_player(
    mut commands: Commands,
    mut events: EventReader<WorldBuiltEvent>,
    balance: Res<GameBalance>,
    mut cooldown: ResMut<AttackCooldown>,
) {
    for _ in events.read() {
        let settings = &balance.player;
        let start = Vec2::from(balance.world.player_start);
        *cooldown = AttackCooldown::default();

        commands
            .spawn((
                Player,
                GameplayEntity,
                Health::new(settings.max_health),
                Knockback::new(settings.knockback_force),
                DamageFlash::new(settings.flash_duration, PLAYER_COLOR),
                Facing::default(),
                BodyRadius(settings.body_radius),
                Sprite::from_color(PLAYER_COLOR, Vec2::new(0.8, 0.8)),
                Transform::from_xyz(start.x, start.y, Z_ACTOR),
            ))
            .with_children(|player| {
                player.spawn((
                    HeldItemSprite,
                    Sprite::from_color(Color::NONE, Vec2::splat(0.35)),
                    Transform::from_xyz(0.45, -0.2, 0.1),
                ));
            });
        info!("[Player] Spawned at {:?}", start);
    }
}

/// Tint the hand sprite with the equipped item's colour and hold it on the
/// side the player faces.
pub fn update_held_item(
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    players: Query<&Facing, With<Player>>,
    mut held: Query<(&mut Sprite, &mut Transform), With<HeldItemSprite>>,
) {
    let Ok(facing) = players.get_single() else {
        return;
    };
    let color = equipped
        .0
        .as_deref()
        .and_then(|id| registry.get(id))
        .map(|def| def.icon_color())
        .unwrap_or(Color::NONE);
    for (mut sprite, mut transform) in &mut held {
        sprite.color = color;
        let offset = facing.0 * 0.45;
        transform.translation.x = offset.x;
        transform.translation.y = offset.y - 0.1;
    }
}
