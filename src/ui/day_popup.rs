//! "Day X / N" banner shown after waking up.

use bevy::prelude::*;

use crate::config::{GameBalance, SleepSettings};
use crate::shared::*;

#[derive(Component)]
pub struct DayPopupText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    #[default]
    Hidden,
    FadingIn,
    Holding,
    FadingOut,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DayPopup {
    pub phase: PopupPhase,
    pub alpha: f32,
    pub hold_left: f32,
}

impl DayPopup {
    pub fn show(&mut self) {
        self.phase = PopupPhase::FadingIn;
        self.alpha = 0.0;
    }

    pub fn advance(&mut self, dt: f32, settings: &SleepSettings) {
        match self.phase {
            PopupPhase::Hidden => {}
            PopupPhase::FadingIn => {
                self.alpha += dt * settings.popup_fade_speed;
                if self.alpha >= 1.0 {
                    self.alpha = 1.0;
                    self.hold_left = settings.popup_duration;
                    self.phase = PopupPhase::Holding;
                }
            }
            PopupPhase::Holding => {
                self.hold_left -= dt;
                if self.hold_left <= 0.0 {
                    self.phase = PopupPhase::FadingOut;
                }
            }
            PopupPhase::FadingOut => {
                self.alpha -= dt * settings.popup_fade_speed;
                if self.alpha <= 0.0 {
                    self.alpha = 0.0;
                    self.phase = PopupPhase::Hidden;
                }
            }
        }
    }
}

pub fn popup_text(day: u32, total_days: u32) -> String {
    format!("Day {} / {}", day, total_days)
}

pub fn spawn_day_popup(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            GlobalZIndex(110),
        ))
        .with_children(|parent| {
            parent.spawn((
                DayPopupText,
                Text::new(""),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
            ));
        });
}

pub fn show_day_popup(
    mut events: EventReader<DayPopupEvent>,
    mut popup: ResMut<DayPopup>,
    mut query: Query<&mut Text, With<DayPopupText>>,
) {
    for event in events.read() {
        for mut text in &mut query {
            **text = popup_text(event.day, event.total_days);
        }
        popup.show();
    }
}

pub fn animate_day_popup(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut popup: ResMut<DayPopup>,
    mut query: Query<&mut TextColor, With<DayPopupText>>,
) {
    popup.advance(time.delta_secs(), &balance.sleep);
    for mut color in &mut query {
        color.0 = Color::srgba(1.0, 1.0, 1.0, popup.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_text() {
        assert_eq!(popup_text(2, 5), "Day 2 / 5");
    }

    #[test]
    fn test_popup_fades_in_holds_and_fades_out() {
        let settings = SleepSettings::default();
        let mut popup = DayPopup::default();
        popup.show();
        popup.advance(0.5, &settings);
        assert_eq!(popup.phase, PopupPhase::Holding);
        assert_eq!(popup.alpha, 1.0);

        popup.advance(settings.popup_duration, &settings);
        assert_eq!(popup.phase, PopupPhase::FadingOut);
        popup.advance(0.25, &settings);
        assert!((popup.alpha - 0.5).abs() < 1e-6);
        popup.advance(0.25, &settings);
        assert_eq!(popup.phase, PopupPhase::Hidden);
        assert_eq!(popup.alpha, 0.0);
    }
}
