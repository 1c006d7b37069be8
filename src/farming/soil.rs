//! Soil tilling.

use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

use super::{CropSprite, TilledPlot};

const SOIL_COLOR: Color = Color::srgb(0.36, 0.24, 0.14);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TillOutcome {
    Tilled(Vec2),
    NoHoe,
    OutsideZone,
    AlreadyTilled,
}

pub fn snap_to_grid(pos: Vec2, snap: f32) -> Vec2 {
    if snap <= 0.0 {
        return pos;
    }
    Vec2::new((pos.x / snap).round() * snap, (pos.y / snap).round() * snap)
}

/// Decide whether a hoe strike at `pos` makes a new plot. `zone` is
/// `[min_x, min_y, max_x, max_y]`, inclusive on every edge.
pub fn till_check(
    pos: Vec2,
    has_hoe: bool,
    snap: f32,
    zone: [f32; 4],
    existing: &[Vec2],
) -> TillOutcome {
    if !has_hoe {
        return TillOutcome::NoHoe;
    }
    let snapped = snap_to_grid(pos, snap);
    let inside = snapped.x >= zone[0]
        && snapped.x <= zone[2]
        && snapped.y >= zone[1]
        && snapped.y <= zone[3];
    if !inside {
        return TillOutcome::OutsideZone;
    }
    let half = snap * 0.5;
    let taken = existing
        .iter()
        .any(|p| (p.x - snapped.x).abs() < half && (p.y - snapped.y).abs() < half);
    if taken {
        return TillOutcome::AlreadyTilled;
    }
    TillOutcome::Tilled(snapped)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hoe: till a patch of the field
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_till_soil(
    mut commands: Commands,
    mut events: EventReader<TillSoilEvent>,
    balance: Res<GameBalance>,
    equipped: Res<EquippedItem>,
    registry: Res<ItemRegistry>,
    plots: Query<&Transform, With<TilledPlot>>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    let settings = &balance.farming;
    let mut existing: Vec<Vec2> = plots.iter().map(|tf| tf.translation.truncate()).collect();

    for event in events.read() {
        let has_hoe = equipped
            .0
            .as_deref()
            .and_then(|id| registry.get(id))
            .is_some_and(|def| def.tool == ToolKind::Hoe);

        match till_check(event.position, has_hoe, settings.grid_snap, settings.zone, &existing) {
            TillOutcome::Tilled(pos) => {
                spawn_plot(&mut commands, pos, settings.grid_snap);
                existing.push(pos);
                info!("[Farming] Tilled soil at {:?}", pos);
            }
            TillOutcome::NoHoe => {
                warn!("[Farming] Till request without a hoe equipped");
            }
            TillOutcome::OutsideZone => {
                toast_events.send(ToastEvent {
                    message: "You can only till inside the field".into(),
                    duration_secs: 2.0,
                });
            }
            TillOutcome::AlreadyTilled => {
                debug!("[Farming] Soil at {:?} is already tilled", event.position);
            }
        }
    }
}

fn spawn_plot(commands: &mut Commands, pos: Vec2, size: f32) {
    let size = if size > 0.0 { size * 0.9 } else { 0.9 };
    commands
        .spawn((
            TilledPlot::default(),
            Interactable::new(InteractionKind::Plot),
            GameplayEntity,
            Sprite::from_color(SOIL_COLOR, Vec2::splat(size)),
            Transform::from_xyz(pos.x, pos.y, Z_PLOT),
        ))
        .with_children(|plot| {
            plot.spawn((
                CropSprite,
                Sprite::from_color(Color::NONE, Vec2::splat(0.2)),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}
