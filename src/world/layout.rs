//! Static farm layout: where the ground, field, pen fence and gate go.

use bevy::prelude::*;

use crate::config::{CowSettings, FarmingSettings, GameBalance};
use crate::shared::*;

use super::gate::spawn_gate;

const GROUND_COLOR: Color = Color::srgb(0.33, 0.55, 0.27);
const FIELD_COLOR: Color = Color::srgba(0.55, 0.42, 0.25, 0.45);
const FENCE_COLOR: Color = Color::srgb(0.5, 0.35, 0.2);
const DEN_COLOR: Color = Color::srgb(0.2, 0.16, 0.12);

pub const FENCE_THICKNESS: f32 = 0.2;
/// Distance between the pen's cow area and its fence line.
pub const FENCE_MARGIN: f32 = 0.5;
pub const GATE_WIDTH: f32 = 3.0;

/// Items lying in the grass when a new farm starts.
pub const GROUND_ITEMS: &[(&str, u32, [f32; 2])] = &[
    ("corn_seeds", 3, [-4.0, -2.0]),
    ("bottle", 2, [2.0, 3.0]),
];

/// One straight run of fence as a centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceSegment {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl FenceSegment {
    fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Self {
            center: Vec2::new((x0 + x1) * 0.5, y),
            half_extents: Vec2::new((x1 - x0).abs() * 0.5, FENCE_THICKNESS * 0.5),
        }
    }

    fn vertical(x: f32, y0: f32, y1: f32) -> Self {
        Self {
            center: Vec2::new(x, (y0 + y1) * 0.5),
            half_extents: Vec2::new(FENCE_THICKNESS * 0.5, (y1 - y0).abs() * 0.5),
        }
    }
}

/// The fence ring around the cow pen, with a gap on the west side for the
/// gate. Returns the segments and the gate's centre.
pub fn pen_fence(pen: [f32; 4]) -> (Vec<FenceSegment>, Vec2) {
    let left = pen[0] - FENCE_MARGIN;
    let bottom = pen[1] - FENCE_MARGIN;
    let right = pen[2] + FENCE_MARGIN;
    let top = pen[3] + FENCE_MARGIN;
    let gate = Vec2::new(left, (bottom + top) * 0.5);
    let half_gap = GATE_WIDTH * 0.5;

    let segments = vec![
        FenceSegment::horizontal(top, left, right),
        FenceSegment::horizontal(bottom, left, right),
        FenceSegment::vertical(right, bottom, top),
        FenceSegment::vertical(left, bottom, gate.y - half_gap),
        FenceSegment::vertical(left, gate.y + half_gap, top),
    ];
    (segments, gate)
}

pub fn zone_rect(zone: [f32; 4]) -> (Vec2, Vec2) {
    let center = Vec2::new((zone[0] + zone[2]) * 0.5, (zone[1] + zone[3]) * 0.5);
    let size = Vec2::new((zone[2] - zone[0]).abs(), (zone[3] - zone[1]).abs());
    (center, size)
}

/// Spawn every static piece of the farm and the gate.
pub fn spawn_farm(commands: &mut Commands, balance: &GameBalance) {
    let bounds = balance.world.bounds;
    let (center, size) = zone_rect(bounds);
    commands.spawn((
        GameplayEntity,
        Sprite::from_color(GROUND_COLOR, size),
        Transform::from_xyz(center.x, center.y, Z_GROUND),
    ));

    spawn_field(commands, &balance.farming);
    spawn_pen(commands, &balance.cows);

    for point in &balance.spawner.spawn_points {
        commands.spawn((
            GameplayEntity,
            Sprite::from_color(DEN_COLOR, Vec2::splat(1.5)),
            Transform::from_xyz(point[0], point[1], Z_GROUND + 0.2),
        ));
    }
}

fn spawn_field(commands: &mut Commands, farming: &FarmingSettings) {
    let (center, size) = zone_rect(farming.zone);
    commands.spawn((
        GameplayEntity,
        Sprite::from_color(FIELD_COLOR, size),
        Transform::from_xyz(center.x, center.y, Z_GROUND + 0.5),
    ));
}

fn spawn_pen(commands: &mut Commands, cows: &CowSettings) {
    let (segments, gate) = pen_fence(cows.pen);
    for segment in &segments {
        commands.spawn((
            Fence {
                half_extents: segment.half_extents,
            },
            GameplayEntity,
            Sprite::from_color(FENCE_COLOR, segment.half_extents * 2.0),
            Transform::from_xyz(segment.center.x, segment.center.y, Z_ACTOR - 0.5),
        ));
    }
    spawn_gate(commands, gate, GATE_WIDTH);
}
