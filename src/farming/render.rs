use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::{CropSprite, TilledPlot};

/// Sprout green to ripe gold across the growth stages.
pub fn stage_color(stage: u32, max_stage: u32) -> Color {
    let t = if max_stage == 0 {
        1.0
    } else {
        (stage as f32 / max_stage as f32).clamp(0.0, 1.0)
    };
    Color::srgb(0.3 + 0.65 * t, 0.75 - 0.05 * t, 0.2)
}

pub fn stage_size(stage: u32, max_stage: u32) -> f32 {
    let t = if max_stage == 0 {
        1.0
    } else {
        (stage as f32 / max_stage as f32).clamp(0.0, 1.0)
    };
    0.2 + 0.5 * t
}

pub fn update_crop_sprites(
    balance: Res<GameBalance>,
    plots: Query<(&TilledPlot, &Children), Changed<TilledPlot>>,
    mut sprites: Query<&mut Sprite, With<CropSprite>>,
) {
    let max_stage = balance.farming.max_growth_stage;
    for (plot, children) in &plots {
        for child in children.iter() {
            let Ok(mut sprite) = sprites.get_mut(*child) else {
                continue;
            };
            if plot.planted {
                sprite.color = stage_color(plot.growth_stage, max_stage);
                sprite.custom_size = Some(Vec2::splat(stage_size(plot.growth_stage, max_stage)));
            } else {
                sprite.color = Color::NONE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_size_grows() {
        assert!(stage_size(0, 3) < stage_size(1, 3));
        assert!(stage_size(2, 3) < stage_size(3, 3));
        assert_eq!(stage_size(5, 3), stage_size(3, 3));
    }
}
