use bevy::prelude::*;
use crate::shared::*;

/// Marker for the screen fade overlay
#[derive(Component)]
pub struct ScreenFadeOverlay;

/// Marker for the red pulse after a sword swing
#[derive(Component)]
pub struct AttackFlashOverlay;

const FLASH_PEAK_ALPHA: f32 = 0.3;

/// Spawn both full-screen overlays (always present but invisible)
pub fn spawn_overlays(mut commands: Commands) {
    commands.spawn((
        AttackFlashOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(90),
    ));

    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100), // on top of everything
    ));
}

/// Animate the fade overlay
pub fn update_fade(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    mut query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    if fade.advance(time.delta_secs()) {
        debug!("[UI] Fade finished at alpha {}", fade.alpha);
    }
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, fade.alpha));
    }
}

/// Overlay alpha for the attack flash; fades linearly to nothing.
pub fn flash_alpha(flash: &AttackFlash) -> f32 {
    if flash.duration <= 0.0 || flash.remaining <= 0.0 {
        return 0.0;
    }
    FLASH_PEAK_ALPHA * (flash.remaining / flash.duration).min(1.0)
}

pub fn update_attack_flash(
    flash: Res<AttackFlash>,
    mut query: Query<&mut BackgroundColor, With<AttackFlashOverlay>>,
) {
    let alpha = flash_alpha(&flash);
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(1.0, 0.0, 0.0, alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_alpha_fades_out() {
        let mut flash = AttackFlash {
            remaining: 0.1,
            duration: 0.1,
        };
        assert!((flash_alpha(&flash) - FLASH_PEAK_ALPHA).abs() < 1e-6);
        flash.remaining = 0.05;
        assert!((flash_alpha(&flash) - FLASH_PEAK_ALPHA * 0.5).abs() < 1e-6);
        flash.remaining = 0.0;
        assert_eq!(flash_alpha(&flash), 0.0);
    }

    #[test]
    fn test_fade_reaches_target_and_reports_completion() {
        let mut fade = ScreenFade::default();
        fade.fade_out(1.0);
        assert!(!fade.advance(0.5));
        assert!((fade.alpha - 0.5).abs() < 1e-6);
        assert!(fade.advance(0.6));
        assert_eq!(fade.alpha, 1.0);
        assert!(!fade.active);
    }
}
