//! Ambient tint overlay.
//!
//! A full-screen UI node tints the scene from keyframed colours sampled at
//! the clock's hour, standing in for a rotating sun and ambient light.

use bevy::prelude::*;

use crate::shared::*;

/// Marker component for the full-screen day/night overlay entity.
#[derive(Component, Debug)]
pub struct DayNightOverlay;

/// A single keyframe for the day/night tint cycle.
struct TintKeyframe {
    hour: f32,
    tint: (f32, f32, f32),
    intensity: f32,
}

static KEYFRAMES: &[TintKeyframe] = &[
    TintKeyframe { hour: 0.0,  tint: (0.05, 0.05, 0.2), intensity: 0.6 },  // midnight
    TintKeyframe { hour: 4.5,  tint: (0.05, 0.05, 0.2), intensity: 0.6 },
    TintKeyframe { hour: 6.0,  tint: (0.9, 0.55, 0.35), intensity: 0.25 }, // sunrise
    TintKeyframe { hour: 8.0,  tint: (1.0, 0.95, 0.8), intensity: 0.05 },
    TintKeyframe { hour: 12.0, tint: (1.0, 1.0, 1.0), intensity: 0.0 },    // noon
    TintKeyframe { hour: 16.0, tint: (1.0, 0.95, 0.85), intensity: 0.05 },
    TintKeyframe { hour: 18.0, tint: (0.95, 0.45, 0.25), intensity: 0.3 }, // sunset
    TintKeyframe { hour: 20.0, tint: (0.15, 0.1, 0.35), intensity: 0.5 },
    TintKeyframe { hour: 24.0, tint: (0.05, 0.05, 0.2), intensity: 0.6 },  // midnight (wrap)
];

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample the tint keyframes at an hour in `[0, 24]`.
pub fn sample_tint(hour: f32) -> ((f32, f32, f32), f32) {
    let t = hour.clamp(0.0, 24.0);

    for pair in KEYFRAMES.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t >= a.hour && t <= b.hour {
            let range = b.hour - a.hour;
            if range < 0.001 {
                return (a.tint, a.intensity);
            }
            let frac = (t - a.hour) / range;
            let tint = (
                lerp_f32(a.tint.0, b.tint.0, frac),
                lerp_f32(a.tint.1, b.tint.1, frac),
                lerp_f32(a.tint.2, b.tint.2, frac),
            );
            return (tint, lerp_f32(a.intensity, b.intensity, frac));
        }
    }

    ((1.0, 1.0, 1.0), 0.0)
}

pub fn spawn_day_night_overlay(mut commands: Commands) {
    commands.spawn((
        DayNightOverlay,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        // Below the HUD, above the world.
        GlobalZIndex(-1),
        PickingBehavior::IGNORE,
    ));
}

pub fn update_day_night_tint(
    clock: Res<DayNightClock>,
    mut overlay_query: Query<&mut BackgroundColor, With<DayNightOverlay>>,
) {
    let ((r, g, b), intensity) = sample_tint(clock.current_time);
    for mut bg in &mut overlay_query {
        *bg = BackgroundColor(Color::srgba(r, g, b, intensity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noon_is_clear() {
        let (_, intensity) = sample_tint(12.0);
        assert_eq!(intensity, 0.0);
    }

    #[test]
    fn test_midnight_is_darkest_and_wraps() {
        let (_, at_zero) = sample_tint(0.0);
        let (_, at_24) = sample_tint(24.0);
        assert_eq!(at_zero, at_24);
        assert!(at_zero > sample_tint(18.0).1);
    }

    #[test]
    fn test_interpolates_between_keyframes() {
        let (_, a) = sample_tint(18.0);
        let (_, b) = sample_tint(20.0);
        let (_, mid) = sample_tint(19.0);
        assert!((mid - (a + b) / 2.0).abs() < 1e-5);
    }
}
