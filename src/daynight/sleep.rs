//! Going to bed: fade to black, heal, skip to morning, fade back in, and
//! announce the new day.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::{GameBalance, SleepSettings};
use crate::shared::*;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepPhase {
    #[default]
    Idle,
    FadingOut,
    /// Black screen before the clock jumps.
    Settling,
    /// Black screen after the clock jumped.
    Resting,
    FadingIn,
}

#[derive(Resource, Debug, Default)]
pub struct SleepSequence {
    pub phase: SleepPhase,
    pub timer: Timer,
}

impl SleepSequence {
    pub fn is_sleeping(&self) -> bool {
        self.phase != SleepPhase::Idle
    }

    pub fn begin(&mut self, settings: &SleepSettings) {
        self.enter(SleepPhase::FadingOut, settings.fade_duration);
    }

    fn enter(&mut self, phase: SleepPhase, secs: f32) {
        self.phase = phase;
        self.timer = Timer::from_seconds(secs.max(0.0), TimerMode::Once);
    }

    /// Tick the current phase. Returns the phase just entered, if any.
    pub fn advance(&mut self, delta: Duration, settings: &SleepSettings) -> Option<SleepPhase> {
        if !self.is_sleeping() {
            return None;
        }
        self.timer.tick(delta);
        if !self.timer.finished() {
            return None;
        }
        let (next, secs) = match self.phase {
            SleepPhase::Idle => return None,
            SleepPhase::FadingOut => (SleepPhase::Settling, settings.settle_secs),
            SleepPhase::Settling => (SleepPhase::Resting, settings.settle_secs),
            SleepPhase::Resting => (SleepPhase::FadingIn, settings.fade_duration),
            SleepPhase::FadingIn => (SleepPhase::Idle, 0.0),
        };
        self.enter(next, secs);
        Some(next)
    }
}

/// Prompt text and whether the bed can be used right now.
pub fn sleep_prompt(
    sleeping: bool,
    settings: &SleepSettings,
    is_night: bool,
    predators_alive: usize,
) -> (String, bool) {
    if sleeping {
        return (String::new(), false);
    }
    if settings.night_only && !is_night {
        return ("Can only sleep at night".into(), false);
    }
    if settings.require_no_predators && predators_alive > 0 {
        return (
            format!("Defeat all coyotes first ({} remaining)", predators_alive),
            false,
        );
    }
    ("Press E to Sleep".into(), true)
}

// ─── Systems ────────────────────────────────────────────────────────────

pub fn spawn_bed(
    mut commands: Commands,
    mut events: EventReader<WorldBuiltEvent>,
    balance: Res<GameBalance>,
    mut sequence: ResMut<SleepSequence>,
) {
    for _ in events.read() {
        *sequence = SleepSequence::default();
        let pos = Vec2::from(balance.world.bed_position);
        commands
            .spawn((
                Bed,
                GameplayEntity,
                Interactable::new(InteractionKind::Bed),
                Sprite::from_color(Color::srgb(0.55, 0.3, 0.35), Vec2::new(1.4, 2.2)),
                Transform::from_xyz(pos.x, pos.y, Z_PLOT),
            ))
            .with_children(|bed| {
                bed.spawn((
                    Sprite::from_color(Color::srgb(0.95, 0.95, 0.9), Vec2::new(1.2, 0.5)),
                    Transform::from_xyz(0.0, 0.75, 0.1),
                ));
            });
    }
}

pub fn update_bed_prompts(
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    sequence: Res<SleepSequence>,
    predators: Query<&Health, With<Predator>>,
    mut beds: Query<&mut Interactable, With<Bed>>,
) {
    let alive = predators.iter().filter(|h| !h.is_dead()).count();
    let (prompt, available) =
        sleep_prompt(sequence.is_sleeping(), &balance.sleep, clock.is_night, alive);
    for mut interactable in &mut beds {
        interactable.set(prompt.clone(), available);
    }
}

pub fn start_sleep(
    mut events: EventReader<InteractEvent>,
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    predators: Query<&Health, With<Predator>>,
    mut sequence: ResMut<SleepSequence>,
    mut fade: ResMut<ScreenFade>,
) {
    for event in events.read() {
        if event.kind != InteractionKind::Bed {
            continue;
        }
        let alive = predators.iter().filter(|h| !h.is_dead()).count();
        let (_, available) =
            sleep_prompt(sequence.is_sleeping(), &balance.sleep, clock.is_night, alive);
        if !available {
            continue;
        }
        info!("[DayNight] Going to sleep at {}", clock.formatted_time());
        sequence.begin(&balance.sleep);
        fade.fade_out(balance.sleep.fade_duration);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn advance_sleep(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut sequence: ResMut<SleepSequence>,
    mut clock: ResMut<DayNightClock>,
    mut fade: ResMut<ScreenFade>,
    mut players: Query<(Entity, &mut Health), With<Player>>,
    mut new_day_events: EventWriter<NewDayEvent>,
    mut health_events: EventWriter<HealthChangedEvent>,
    mut popup_events: EventWriter<DayPopupEvent>,
) {
    let settings = &balance.sleep;
    match sequence.advance(time.delta(), settings) {
        Some(SleepPhase::Resting) => {
            if settings.heal_on_sleep {
                for (entity, mut health) in &mut players {
                    let max = health.max;
                    health.heal(max);
                    health_events.send(HealthChangedEvent {
                        entity,
                        current: health.current,
                        max: health.max,
                    });
                }
            }
            if super::skip_to_time(&mut clock, settings.wake_up_hour) {
                new_day_events.send(NewDayEvent {
                    day: clock.current_day,
                });
            }
            info!(
                "[DayNight] Slept until {} on day {}",
                clock.formatted_time(),
                clock.current_day
            );
        }
        Some(SleepPhase::FadingIn) => {
            fade.fade_in(settings.fade_duration);
        }
        Some(SleepPhase::Idle) => {
            popup_events.send(DayPopupEvent {
                day: clock.current_day,
                total_days: balance.goal.days_to_survive,
            });
        }
        _ => {}
    }
}
