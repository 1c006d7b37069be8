use bevy::prelude::*;
use rand::Rng;

use crate::config::{CowSettings, GameBalance};
use crate::health::{DamageFlash, DestroyOnDeath};
use crate::shared::*;

use super::CowWander;

pub const COW_COLOR: Color = Color::srgb(0.92, 0.9, 0.85);

/// Offsets from the pen centre for the herd a new farm starts with:
/// two adults and one calf.
const STARTING_HERD: &[(f32, f32, bool)] = &[(-2.5, 1.5, false), (2.5, -1.5, false), (0.0, 0.0, true)];

pub fn pen_center(pen: [f32; 4]) -> Vec2 {
    Vec2::new((pen[0] + pen[2]) * 0.5, (pen[1] + pen[3]) * 0.5)
}

pub fn spawn_cow(commands: &mut Commands, settings: &CowSettings, pos: Vec2, baby: bool) -> Entity {
    let mut rng = rand::thread_rng();
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let cow = if baby { Cow::baby() } else { Cow::adult() };
    commands
        .spawn((
            cow,
            CowWander {
                heading: Vec2::from_angle(angle),
                turn_cooldown_left: 0.0,
            },
            Health::new(settings.max_health),
            DamageFlash::new(0.1, COW_COLOR),
            DestroyOnDeath { delay: 0.5 },
            Interactable::new(InteractionKind::Cow),
            BodyRadius(0.6),
            GameplayEntity,
            Sprite::from_color(COW_COLOR, Vec2::new(1.2, 0.8)),
            Transform::from_xyz(pos.x, pos.y, Z_ACTOR),
        ))
        .id()
}

pub fn spawn_starting_herd(
    mut commands: Commands,
    mut events: EventReader<WorldBuiltEvent>,
    balance: Res<GameBalance>,
) {
    for _ in events.read() {
        let settings = &balance.cows;
        let center = pen_center(settings.pen);
        for (dx, dy, baby) in STARTING_HERD {
            spawn_cow(&mut commands, settings, center + Vec2::new(*dx, *dy), *baby);
        }
        info!("[Animals] Herd of {} cows put out to pasture", STARTING_HERD.len());
    }
}
