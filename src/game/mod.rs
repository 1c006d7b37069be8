//! Game domain: win and loss conditions, and restarting a finished run.

use bevy::prelude::*;

use crate::config::GameBalance;
use crate::daynight::reset_clock_on_world_built;
use crate::shared::*;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameOutcome>().add_systems(
            Update,
            (
                reset_session_on_world_built,
                check_victory.run_if(in_state(GameState::Playing)),
                check_defeat,
                request_restart.run_if(in_state(GameState::GameOver)),
            )
                .chain()
                // A fresh clock must land before the goal is checked again.
                .after(reset_clock_on_world_built),
        );
    }
}

/// How the current run ended, if it has.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOutcome {
    pub ended: bool,
    pub victory: bool,
    /// Day shown on the game-over panel.
    pub day: u32,
}

impl GameOutcome {
    pub fn title(&self) -> &'static str {
        if self.victory {
            "CONGRATULATIONS!"
        } else {
            "GAME OVER"
        }
    }

    pub fn message(&self) -> String {
        if self.victory {
            format!(
                "You survived {} days!\n\nWould you like to play again?",
                self.day
            )
        } else {
            format!(
                "You were defeated on Day {}.\n\nWould you like to try again?",
                self.day
            )
        }
    }

    pub fn color(&self) -> Color {
        if self.victory {
            Color::srgb(0.3, 0.9, 0.35)
        } else {
            Color::srgb(0.9, 0.25, 0.2)
        }
    }
}

/// True once the player has made it past the last day.
pub fn survived(current_day: u32, days_to_survive: u32) -> bool {
    current_day > days_to_survive
}

pub fn reset_session_on_world_built(
    mut events: EventReader<WorldBuiltEvent>,
    mut outcome: ResMut<GameOutcome>,
    mut fade: ResMut<ScreenFade>,
    mut flash: ResMut<AttackFlash>,
    mut target: ResMut<InteractionTarget>,
) {
    for _ in events.read() {
        *outcome = GameOutcome::default();
        *fade = ScreenFade::default();
        *flash = AttackFlash::default();
        *target = InteractionTarget::default();
    }
}

pub fn check_victory(
    balance: Res<GameBalance>,
    clock: Res<DayNightClock>,
    mut outcome: ResMut<GameOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if outcome.ended || !survived(clock.current_day, balance.goal.days_to_survive) {
        return;
    }
    *outcome = GameOutcome {
        ended: true,
        victory: true,
        day: balance.goal.days_to_survive,
    };
    info!("[Game] Victory after {} days", outcome.day);
    next_state.set(GameState::GameOver);
}

pub fn check_defeat(
    mut deaths: EventReader<DeathEvent>,
    clock: Res<DayNightClock>,
    players: Query<(), With<Player>>,
    mut outcome: ResMut<GameOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for death in deaths.read() {
        if outcome.ended || !players.contains(death.entity) {
            continue;
        }
        *outcome = GameOutcome {
            ended: true,
            victory: false,
            day: clock.current_day,
        };
        info!("[Game] Defeated on day {}", outcome.day);
        next_state.set(GameState::GameOver);
    }
}

pub fn request_restart(input: Res<PlayerInput>, mut restart_events: EventWriter<RestartEvent>) {
    if input.ui_confirm {
        info!("[Game] Restart requested");
        restart_events.send(RestartEvent);
    }
}
