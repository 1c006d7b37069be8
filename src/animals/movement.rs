use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::CowWander;

// ─────────────────────────────────────────────────────────────────────────────
// Wander AI system
// Cows walk straight ahead and turn when they reach the edge of the pen. A
// short cooldown stops them spinning in place against a corner.
// ─────────────────────────────────────────────────────────────────────────────

pub fn clamp_to_pen(pos: Vec2, pen: [f32; 4]) -> Vec2 {
    Vec2::new(pos.x.clamp(pen[0], pen[2]), pos.y.clamp(pen[1], pen[3]))
}

fn inside_pen(pos: Vec2, pen: [f32; 4]) -> bool {
    pos.x >= pen[0] && pos.x <= pen[2] && pos.y >= pen[1] && pos.y <= pen[3]
}

/// Rotate a heading counter-clockwise by `degrees`.
pub fn turn_heading(heading: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(heading)
}

pub fn handle_cow_wander(
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut query: Query<(&Cow, &Health, &mut CowWander, &mut Transform)>,
) {
    let settings = &balance.cows;
    let dt = time.delta_secs();

    for (cow, health, mut wander, mut transform) in query.iter_mut() {
        if health.is_dead() || cow.breeding || cow.mate.is_some() {
            continue;
        }
        if wander.turn_cooldown_left > 0.0 {
            wander.turn_cooldown_left = (wander.turn_cooldown_left - dt).max(0.0);
        }

        let pos = transform.translation.truncate();
        let next = pos + wander.heading * settings.wander_speed * dt;
        if !inside_pen(next, settings.pen) {
            if wander.turn_cooldown_left <= 0.0 {
                wander.heading = turn_heading(wander.heading, settings.turn_angle);
                wander.turn_cooldown_left = settings.turn_cooldown;
            }
            let clamped = clamp_to_pen(pos, settings.pen);
            transform.translation.x = clamped.x;
            transform.translation.y = clamped.y;
            continue;
        }

        transform.translation.x = next.x;
        transform.translation.y = next.y;

        // Face the way we walk.
        if wander.heading.x.abs() > 0.1 {
            transform.scale.x = if wander.heading.x > 0.0 { 1.0 } else { -1.0 };
        }
    }
}
