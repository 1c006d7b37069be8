//! Love mode: paired cows walk to each other, breed for a few seconds, and
//! leave a calf behind.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameBalance;
use crate::shared::*;

use super::movement::clamp_to_pen;
use super::spawning::spawn_cow;
use super::BreedingTimer;

pub fn calf_position(a: Vec2, b: Vec2, offset: Vec2) -> Vec2 {
    (a + b) * 0.5 + offset
}

/// Place two cows `distance` apart around their midpoint, keeping the line
/// between them. Cows standing on the same spot split along X.
pub fn push_apart(a: Vec2, b: Vec2, distance: f32) -> (Vec2, Vec2) {
    let mid = (a + b) * 0.5;
    let mut dir = (a - b).normalize_or_zero();
    if dir == Vec2::ZERO {
        dir = Vec2::X;
    }
    let half = dir * distance * 0.5;
    (mid + half, mid - half)
}

fn leave_love_mode(cow: &mut Cow, cooldown: Option<u32>) {
    cow.in_love = false;
    cow.mate = None;
    cow.breeding = false;
    if let Some(days) = cooldown {
        cow.breeding_cooldown = days;
    }
    cow.refresh_status();
}

pub fn approach_mate(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut cows: Query<(Entity, &mut Cow, &mut Transform, &Health)>,
) {
    let settings = &balance.cows;
    let snapshot: HashMap<Entity, (Vec2, bool, bool)> = cows
        .iter()
        .map(|(e, cow, tf, health)| (e, (tf.translation.truncate(), health.is_dead(), cow.breeding)))
        .collect();

    for (entity, mut cow, mut tf, health) in &mut cows {
        let Some(mate) = cow.mate else {
            continue;
        };
        if cow.breeding || health.is_dead() {
            continue;
        }
        let Some(&(mate_pos, mate_dead, mate_breeding)) = snapshot.get(&mate) else {
            leave_love_mode(&mut cow, None);
            continue;
        };
        if mate_dead {
            leave_love_mode(&mut cow, None);
            continue;
        }

        let pos = tf.translation.truncate();
        let to_mate = mate_pos - pos;
        if to_mate.length() <= settings.mating_distance {
            if !mate_breeding {
                cow.breeding = true;
                commands.entity(entity).insert(BreedingTimer(Timer::from_seconds(
                    settings.breeding_duration,
                    TimerMode::Once,
                )));
            }
            continue;
        }

        let step = to_mate.normalize_or_zero() * settings.mating_move_speed * time.delta_secs();
        let next = clamp_to_pen(pos + step, settings.pen);
        tf.translation.x = next.x;
        tf.translation.y = next.y;
    }
}

pub fn finish_breeding(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut cows: Query<(Entity, &mut Cow, &mut Transform, Option<&mut BreedingTimer>)>,
) {
    let settings = &balance.cows;
    let mut finished: Vec<(Entity, Option<Entity>)> = Vec::new();
    for (entity, cow, _, timer) in &mut cows {
        let Some(mut timer) = timer else {
            continue;
        };
        timer.0.tick(time.delta());
        if timer.0.finished() {
            finished.push((entity, cow.mate));
        }
    }

    let mut rng = rand::thread_rng();
    for (a, mate) in &finished {
        // Each pair resolves once, from its lower entity.
        if let Some(b) = mate {
            if *b < *a && finished.iter().any(|(e, _)| e == b) {
                continue;
            }
        }

        let Ok((_, _, tf_a, _)) = cows.get(*a) else {
            continue;
        };
        let pos_a = tf_a.translation.truncate();
        let pos_b = mate.and_then(|b| cows.get(b).ok()).map(|(_, _, tf, _)| tf.translation.truncate());

        if let Some(pos_b) = pos_b {
            let offset = Vec2::new(
                rng.gen_range(-settings.calf_offset..=settings.calf_offset),
                rng.gen_range(-settings.calf_offset..=settings.calf_offset),
            );
            let calf = clamp_to_pen(calf_position(pos_a, pos_b, offset), settings.pen);
            spawn_cow(&mut commands, settings, calf, true);

            let (new_a, new_b) = push_apart(pos_a, pos_b, settings.separation_distance);
            if let Some(b) = mate {
                if let Ok((_, mut cow_b, mut tf_b, _)) = cows.get_mut(*b) {
                    let p = clamp_to_pen(new_b, settings.pen);
                    tf_b.translation.x = p.x;
                    tf_b.translation.y = p.y;
                    leave_love_mode(&mut cow_b, Some(settings.breeding_cooldown_days));
                    commands.entity(*b).remove::<BreedingTimer>();
                }
            }
            if let Ok((_, _, mut tf_a, _)) = cows.get_mut(*a) {
                let p = clamp_to_pen(new_a, settings.pen);
                tf_a.translation.x = p.x;
                tf_a.translation.y = p.y;
            }
            info!("[Animals] A calf was born at {:?}", calf);
        }

        if let Ok((_, mut cow_a, _, _)) = cows.get_mut(*a) {
            let cooldown = pos_b.map(|_| settings.breeding_cooldown_days);
            leave_love_mode(&mut cow_a, cooldown);
        }
        commands.entity(*a).remove::<BreedingTimer>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calf_position_is_midpoint_plus_offset() {
        let p = calf_position(Vec2::new(8.0, 0.0), Vec2::new(10.0, 2.0), Vec2::new(0.5, -1.0));
        assert_eq!(p, Vec2::new(9.5, 0.0));
    }

    #[test]
    fn test_push_apart_sets_distance() {
        let (a, b) = push_apart(Vec2::new(9.0, 0.0), Vec2::new(10.0, 0.0), 3.0);
        assert!((a.distance(b) - 3.0).abs() < 1e-5);
        assert!(a.x < b.x);
        let (a, b) = push_apart(Vec2::ONE, Vec2::ONE, 3.0);
        assert_eq!(a, Vec2::new(2.5, 1.0));
        assert_eq!(b, Vec2::new(-0.5, 1.0));
    }

    #[test]
    fn test_leave_love_mode_sets_cooldown() {
        let mut cow = Cow::adult();
        cow.in_love = true;
        cow.breeding = true;
        cow.mate = Some(Entity::from_raw(7));
        leave_love_mode(&mut cow, Some(2));
        assert!(!cow.in_love && !cow.breeding);
        assert_eq!(cow.mate, None);
        assert!(!cow.can_breed);
        assert_eq!(cow.breeding_cooldown, 2);
    }
}
