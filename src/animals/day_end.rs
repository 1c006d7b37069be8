use bevy::prelude::*;

use crate::config::{CowSettings, GameBalance};
use crate::shared::*;

/// Age one day: grow calves, count down cooldowns, refresh what the cow can
/// do. Returns true when a calf grew up today.
pub fn advance_cow_day(cow: &mut Cow, settings: &CowSettings) -> bool {
    cow.age_days += 1;
    let mut grew_up = false;
    if cow.is_baby && cow.age_days >= settings.days_to_grow_up {
        cow.is_baby = false;
        grew_up = true;
    }
    cow.breeding_cooldown = cow.breeding_cooldown.saturating_sub(1);
    cow.milk_cooldown = cow.milk_cooldown.saturating_sub(1);
    cow.refresh_status();
    grew_up
}

pub fn handle_new_day_for_cows(
    mut events: EventReader<NewDayEvent>,
    balance: Res<GameBalance>,
    mut cows: Query<(&mut Cow, &Health)>,
) {
    for event in events.read() {
        let mut grown = 0;
        for (mut cow, health) in &mut cows {
            if health.is_dead() {
                continue;
            }
            if advance_cow_day(&mut cow, &balance.cows) {
                grown += 1;
            }
        }
        if grown > 0 {
            info!("[Animals] Day {}: {} calf/calves grew up", event.day, grown);
        }
    }
}
