//! Day/night domain: the world clock, ambient lighting, and sleeping.
//!
//! Time advances only in `GameState::Playing`. Between the freeze hour and
//! dawn the clock stalls for as long as any predator is alive, so the night
//! cannot be waited out.

pub mod lighting;
pub mod sleep;

use bevy::prelude::*;

use crate::config::{DayNightSettings, GameBalance};
use crate::shared::*;

pub use lighting::{sample_tint, DayNightOverlay};
pub use sleep::{sleep_prompt, SleepPhase, SleepSequence};

pub struct DayNightPlugin;

impl Plugin for DayNightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SleepSequence>()
            .add_systems(Startup, lighting::spawn_day_night_overlay)
            .add_systems(
                Update,
                (
                    reset_clock_on_world_built,
                    sleep::spawn_bed,
                    tick_clock.run_if(in_state(GameState::Playing)),
                    sleep::update_bed_prompts,
                    sleep::start_sleep,
                    sleep::advance_sleep,
                    lighting::update_day_night_tint,
                ),
            );
    }
}

// ─── Clock rules ────────────────────────────────────────────────────────

/// What changed during one clock step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTick {
    pub new_day: bool,
    pub night_started: bool,
    pub night_ended: bool,
}

pub fn is_night_hour(hour: f32, settings: &DayNightSettings) -> bool {
    hour >= settings.night_start_hour || hour < settings.day_start_hour
}

/// The clock stalls in the small hours while predators are alive.
pub fn update_freeze(clock: &mut DayNightClock, settings: &DayNightSettings, predators_alive: bool) {
    if !clock.is_night {
        clock.time_frozen = false;
        return;
    }
    let in_freeze_window = clock.current_time >= settings.freeze_time_hour
        && clock.current_time < settings.day_start_hour;
    clock.time_frozen = in_freeze_window && predators_alive;
}

/// One frame of clock progress.
pub fn advance_clock(
    clock: &mut DayNightClock,
    settings: &DayNightSettings,
    dt: f32,
    predators_alive: bool,
) -> ClockTick {
    let mut tick = ClockTick::default();

    update_freeze(clock, settings, predators_alive);

    if !clock.time_frozen && settings.seconds_per_hour > 0.0 {
        clock.current_time += dt / settings.seconds_per_hour;
        if clock.current_time >= 24.0 {
            clock.current_time = 0.0;
            clock.current_day += 1;
            tick.new_day = true;
        }
    }

    let was_night = clock.is_night;
    clock.is_night = is_night_hour(clock.current_time, settings);
    if clock.is_night && !was_night {
        tick.night_started = true;
    } else if !clock.is_night && was_night {
        clock.nights_survived += 1;
        tick.night_ended = true;
    }

    tick
}

pub fn set_time(clock: &mut DayNightClock, hour: f32) {
    clock.current_time = hour.clamp(0.0, 24.0);
}

/// Jump the clock forward to `hour`. Going "backwards" means the jump
/// crossed midnight, which starts a new day. Returns true in that case.
pub fn skip_to_time(clock: &mut DayNightClock, hour: f32) -> bool {
    let crossed_midnight = hour < clock.current_time;
    if crossed_midnight {
        clock.current_day += 1;
    }
    set_time(clock, hour);
    crossed_midnight
}

// ─── Systems ────────────────────────────────────────────────────────────

pub fn reset_clock_on_world_built(
    mut events: EventReader<WorldBuiltEvent>,
    balance: Res<GameBalance>,
    mut clock: ResMut<DayNightClock>,
) {
    for _ in events.read() {
        *clock = fresh_clock(&balance.day_night);
    }
}

pub fn fresh_clock(settings: &DayNightSettings) -> DayNightClock {
    let mut clock = DayNightClock::default();
    set_time(&mut clock, settings.start_time);
    clock.is_night = is_night_hour(clock.current_time, settings);
    clock
}

pub fn tick_clock(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut clock: ResMut<DayNightClock>,
    predators: Query<&Health, With<Predator>>,
    mut new_day_events: EventWriter<NewDayEvent>,
    mut night_start_events: EventWriter<NightStartedEvent>,
    mut night_end_events: EventWriter<NightEndedEvent>,
) {
    let predators_alive = predators.iter().any(|h| !h.is_dead());
    let was_frozen = clock.time_frozen;
    let tick = advance_clock(&mut clock, &balance.day_night, time.delta_secs(), predators_alive);

    if clock.time_frozen != was_frozen {
        if clock.time_frozen {
            info!("[DayNight] Time frozen at {} until the coyotes are dead", clock.formatted_time());
        } else {
            info!("[DayNight] Time resumed");
        }
    }
    if tick.new_day {
        info!("[DayNight] Day {} begins", clock.current_day);
        new_day_events.send(NewDayEvent {
            day: clock.current_day,
        });
    }
    if tick.night_started {
        info!("[DayNight] Night falls on day {}", clock.current_day);
        night_start_events.send(NightStartedEvent {
            night: clock.nights_survived + 1,
        });
    }
    if tick.night_ended {
        info!("[DayNight] Survived night {}", clock.nights_survived);
        night_end_events.send(NightEndedEvent {
            nights_survived: clock.nights_survived,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DayNightSettings {
        DayNightSettings::default()
    }

    fn clock_at(hour: f32) -> DayNightClock {
        let s = settings();
        let mut clock = fresh_clock(&s);
        clock.current_time = hour;
        clock.is_night = is_night_hour(hour, &s);
        clock
    }

    #[test]
    fn test_one_real_minute_is_one_hour() {
        let s = settings();
        let mut clock = clock_at(6.0);
        advance_clock(&mut clock, &s, 60.0, false);
        assert!((clock.current_time - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_night_boundaries() {
        let s = settings();
        assert!(is_night_hour(18.0, &s));
        assert!(is_night_hour(23.9, &s));
        assert!(is_night_hour(0.0, &s));
        assert!(is_night_hour(5.99, &s));
        assert!(!is_night_hour(6.0, &s));
        assert!(!is_night_hour(17.99, &s));
    }

    #[test]
    fn test_midnight_wraps_and_starts_new_day() {
        let s = settings();
        let mut clock = clock_at(23.99);
        let tick = advance_clock(&mut clock, &s, 1.0, false);
        assert!(tick.new_day);
        assert_eq!(clock.current_time, 0.0);
        assert_eq!(clock.current_day, 2);
        assert!(clock.is_night);
        assert!(!tick.night_started);
    }

    #[test]
    fn test_dusk_fires_night_started() {
        let s = settings();
        let mut clock = clock_at(17.99);
        let tick = advance_clock(&mut clock, &s, 1.0, false);
        assert!(tick.night_started);
        assert!(clock.is_night);
        assert_eq!(clock.nights_survived, 0);
    }

    #[test]
    fn test_dawn_counts_a_survived_night() {
        let s = settings();
        let mut clock = clock_at(5.99);
        let tick = advance_clock(&mut clock, &s, 1.0, false);
        assert!(tick.night_ended);
        assert!(!clock.is_night);
        assert_eq!(clock.nights_survived, 1);
    }

    #[test]
    fn test_freeze_holds_time_while_predators_live() {
        let s = settings();
        let mut clock = clock_at(3.0);
        advance_clock(&mut clock, &s, 60.0, true);
        assert!(clock.time_frozen);
        assert_eq!(clock.current_time, 3.0);

        advance_clock(&mut clock, &s, 60.0, false);
        assert!(!clock.time_frozen);
        assert!((clock.current_time - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_freeze_before_freeze_hour() {
        let s = settings();
        let mut clock = clock_at(1.0);
        advance_clock(&mut clock, &s, 60.0, true);
        assert!(!clock.time_frozen);
        assert!((clock.current_time - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_freeze_during_day() {
        let s = settings();
        let mut clock = clock_at(12.0);
        advance_clock(&mut clock, &s, 1.0, true);
        assert!(!clock.time_frozen);
    }

    #[test]
    fn test_skip_to_time_past_midnight() {
        let mut clock = clock_at(22.0);
        assert!(skip_to_time(&mut clock, 6.0));
        assert_eq!(clock.current_day, 2);
        assert_eq!(clock.current_time, 6.0);
    }

    #[test]
    fn test_skip_to_time_same_day() {
        let mut clock = clock_at(3.0);
        assert!(!skip_to_time(&mut clock, 6.0));
        assert_eq!(clock.current_day, 1);
        assert_eq!(clock.current_time, 6.0);
    }

    #[test]
    fn test_set_time_clamps() {
        let mut clock = clock_at(6.0);
        set_time(&mut clock, 30.0);
        assert_eq!(clock.current_time, 24.0);
        set_time(&mut clock, -3.0);
        assert_eq!(clock.current_time, 0.0);
    }

    #[test]
    fn test_formatted_time() {
        let mut clock = clock_at(0.0);
        assert_eq!(clock.formatted_time(), "12:00 AM");
        clock.current_time = 6.5;
        assert_eq!(clock.formatted_time(), "06:30 AM");
        clock.current_time = 12.25;
        assert_eq!(clock.formatted_time(), "12:15 PM");
        clock.current_time = 18.0;
        assert_eq!(clock.formatted_time(), "06:00 PM");
    }

    #[test]
    fn test_scaling_multipliers() {
        let mut clock = clock_at(6.0);
        assert_eq!(clock.health_multiplier(1.15), 1.0);
        clock.nights_survived = 2;
        assert!((clock.health_multiplier(1.15) - 1.3225).abs() < 1e-4);
        assert!((clock.damage_multiplier(1.1) - 1.21).abs() < 1e-4);
    }
}
