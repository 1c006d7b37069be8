use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

const LERP_SPEED: f32 = 5.0;
/// Beyond this distance the camera jumps instead of gliding (spawn, restart).
const SNAP_DISTANCE: f32 = 8.0;

/// Smoothly follow the player with the camera using a lerp, clamped so the
/// viewport stays inside the world bounds where the world is big enough.
pub fn camera_follow_player(
    time: Res<Time>,
    balance: Res<GameBalance>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &OrthographicProjection), (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_tf.translation.truncate();
    let current = cam_tf.translation.truncate();
    let next = if current.distance(target) > SNAP_DISTANCE {
        target
    } else {
        let t = (LERP_SPEED * time.delta_secs()).min(1.0);
        current.lerp(target, t)
    };

    let clamped = clamp_camera(next, balance.world.bounds, projection.area.size() * cam_tf.scale.truncate() * 0.5);
    cam_tf.translation.x = clamped.x;
    cam_tf.translation.y = clamped.y;
}

/// Keep a viewport with `half_view` half-size inside `bounds`. When the
/// viewport is wider than the world on an axis, centre on that axis.
pub fn clamp_camera(pos: Vec2, bounds: [f32; 4], half_view: Vec2) -> Vec2 {
    let axis = |p: f32, lo: f32, hi: f32, half: f32| {
        if hi - lo <= half * 2.0 {
            (lo + hi) * 0.5
        } else {
            p.clamp(lo + half, hi - half)
        }
    };
    Vec2::new(
        axis(pos.x, bounds[0], bounds[2], half_view.x),
        axis(pos.y, bounds[1], bounds[3], half_view.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_camera_inside_bounds() {
        let b = [-30.0, -20.0, 30.0, 20.0];
        let half = Vec2::new(20.0, 11.25);
        assert_eq!(clamp_camera(Vec2::new(29.0, 0.0), b, half), Vec2::new(10.0, 0.0));
        assert_eq!(clamp_camera(Vec2::new(0.0, -19.0), b, half), Vec2::new(0.0, -8.75));
    }

    #[test]
    fn test_clamp_camera_centres_small_world() {
        let b = [-5.0, -5.0, 5.0, 5.0];
        let half = Vec2::new(20.0, 11.25);
        assert_eq!(clamp_camera(Vec2::new(3.0, 3.0), b, half), Vec2::ZERO);
    }
}
