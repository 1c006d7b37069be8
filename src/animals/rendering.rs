use bevy::prelude::*;

use crate::health::DamageFlash;
use crate::shared::*;

use super::spawning::COW_COLOR;

const LOVE_COLOR: Color = Color::srgb(1.0, 0.7, 0.8);

/// Calves are drawn smaller; cows in love mode turn pink.
pub fn update_cow_visuals(mut cows: Query<(&Cow, &mut Sprite, &mut DamageFlash), Changed<Cow>>) {
    for (cow, mut sprite, mut flash) in &mut cows {
        let size = if cow.is_baby {
            Vec2::new(0.7, 0.5)
        } else {
            Vec2::new(1.2, 0.8)
        };
        sprite.custom_size = Some(size);
        let base = if cow.in_love { LOVE_COLOR } else { COW_COLOR };
        flash.base_color = base;
        if flash.remaining <= 0.0 {
            sprite.color = base;
        }
    }
}
