use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

/// Core movement system. Reads the move axis, walks or sprints, turns the
/// player to face the direction of travel, and slides along fences.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    balance: Res<GameBalance>,
    fences: Query<(&Transform, &Fence), Without<Player>>,
    mut query: Query<(&mut Transform, &mut Facing, &BodyRadius, &Health), With<Player>>,
) {
    let Ok((mut transform, mut facing, radius, health)) = query.get_single_mut() else {
        return;
    };
    if health.is_dead() || input.move_axis == Vec2::ZERO {
        return;
    }

    let settings = &balance.player;
    facing.0 = input.move_axis.normalize_or_zero();
    let speed = if input.sprint {
        settings.sprint_speed
    } else {
        settings.walk_speed
    };
    let delta = input.move_axis * speed * time.delta_secs();

    // A fence already overlapping the player (a gate closed on them) does
    // not block, so they can walk out of it.
    let here = transform.translation.truncate();
    let boxes: Vec<(Vec2, Vec2)> = fences
        .iter()
        .map(|(tf, fence)| (tf.translation.truncate(), fence.half_extents))
        .filter(|(center, half)| !circle_overlaps_box(here, radius.0, *center, *half))
        .collect();

    // Axis-separated so the player can slide along walls.
    let pos = transform.translation.truncate();
    let candidate_x = Vec2::new(pos.x + delta.x, pos.y);
    if !blocked_by_fences(candidate_x, radius.0, &boxes) {
        transform.translation.x = candidate_x.x;
    }
    let pos = transform.translation.truncate();
    let candidate_y = Vec2::new(pos.x, pos.y + delta.y);
    if !blocked_by_fences(candidate_y, radius.0, &boxes) {
        transform.translation.y = candidate_y.y;
    }

    let clamped = clamp_to_bounds(transform.translation.truncate(), balance.world.bounds);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

pub fn blocked_by_fences(pos: Vec2, radius: f32, boxes: &[(Vec2, Vec2)]) -> bool {
    boxes
        .iter()
        .any(|(center, half)| circle_overlaps_box(pos, radius, *center, *half))
}

pub fn clamp_to_bounds(pos: Vec2, bounds: [f32; 4]) -> Vec2 {
    Vec2::new(
        pos.x.clamp(bounds[0], bounds[2]),
        pos.y.clamp(bounds[1], bounds[3]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_blocks_overlapping_circle() {
        let fence = [(Vec2::new(2.0, 0.0), Vec2::new(0.1, 3.0))];
        assert!(blocked_by_fences(Vec2::new(1.8, 0.0), 0.4, &fence));
        assert!(!blocked_by_fences(Vec2::new(1.0, 0.0), 0.4, &fence));
        assert!(!blocked_by_fences(Vec2::new(2.0, 3.5), 0.4, &fence));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let b = [-30.0, -20.0, 30.0, 20.0];
        assert_eq!(clamp_to_bounds(Vec2::new(40.0, -25.0), b), Vec2::new(30.0, -20.0));
        assert_eq!(clamp_to_bounds(Vec2::new(1.0, 2.0), b), Vec2::new(1.0, 2.0));
    }
}
